use std::fmt::Write as _;

use anyhow::Context;
use colored::Colorize;

use crate::domain::entities::dashboard_view::DashboardView;
use crate::domain::entities::snapshot::DetectionSnapshot;
use crate::domain::ports::source::StatsSource;
use crate::domain::rules::watched::watched_hits;
use crate::domain::value_objects::alert_rules::AlertRules;
use crate::presentation::cli::formatters::status_fmt::{
    format_class_table, motion_badge, print_section_header, threshold_bar,
};

/// Fetch the detection statistics once and print them.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached, the payload is invalid,
/// or JSON serialization fails.
pub async fn run_status(
    source: &dyn StatsSource,
    rules: &AlertRules,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = source
        .fetch()
        .await
        .context("Failed to fetch detection statistics")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_section_header("lookout — Detection Status");
    print!("{}", format_status(&snapshot, rules));
    Ok(())
}

/// Human-readable status block for one snapshot
#[must_use]
pub fn format_status(snapshot: &DetectionSnapshot, rules: &AlertRules) -> String {
    let view = DashboardView::project(snapshot);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Total objects: {} {}",
        view.total.to_string().bold(),
        threshold_bar(view.total, rules.object_threshold, 20)
    );
    if view.total > rules.object_threshold {
        let _ = writeln!(
            out,
            "{}",
            format!("Above threshold ({})", rules.object_threshold)
                .red()
                .bold()
        );
    }
    let _ = writeln!(out, "Motion: {}", motion_badge(view.motion));

    let table = format_class_table(&view);
    if !table.is_empty() {
        let _ = writeln!(out, "\nDetected Objects");
        let _ = writeln!(out, "{table}");
    }

    let hits = watched_hits(snapshot, rules);
    if !hits.is_empty() {
        let _ = writeln!(out, "\nWatched: {}", hits.join(", ").yellow());
    }

    out
}
