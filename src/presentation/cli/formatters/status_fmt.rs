use colored::{ColoredString, Colorize};

use crate::domain::entities::dashboard_view::{threshold_ratio, DashboardView, MotionBadge};

/// Bar showing how close `total` is to the alert threshold. Full and red once
/// the threshold is crossed.
#[must_use]
pub fn threshold_bar(total: u32, threshold: u32, width: usize) -> String {
    let ratio = threshold_ratio(total, threshold);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "█".repeat(filled);
    let bar_empty = "░".repeat(empty);

    let colored_bar = if total > threshold {
        bar_filled.red().bold()
    } else if ratio >= 0.8 {
        bar_filled.yellow()
    } else {
        bar_filled.green()
    };

    format!("{colored_bar}{bar_empty}")
}

#[must_use]
pub fn motion_badge(badge: MotionBadge) -> ColoredString {
    match badge {
        MotionBadge::Active => format!(" {} ", badge.label()).on_red().white().bold(),
        MotionBadge::Inactive => format!(" {} ", badge.label()).dimmed(),
    }
}

/// Aligned class/count table. Empty string when nothing is detected.
#[must_use]
pub fn format_class_table(view: &DashboardView) -> String {
    if view.rows.is_empty() {
        return String::new();
    }

    let width = view
        .rows
        .iter()
        .map(|row| row.class.chars().count())
        .max()
        .unwrap_or(0)
        .max("CLASS".len());

    let header = format!("{:<width$}  {:>5}", "CLASS", "COUNT");
    let separator = "─".repeat(header.chars().count());

    let mut lines = vec![header, separator];
    lines.extend(
        view.rows
            .iter()
            .map(|row| format!("{:<width$}  {:>5}", row.class, row.count)),
    );
    lines.join("\n")
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}
