use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Gauge, Paragraph, Row, Table};
use ratatui::Frame;

use crate::domain::entities::dashboard_view::{DashboardView, MotionBadge};

const CLASS_LIST_TITLE: &str = "Detected Objects";

fn count_color(total: u32, threshold: u32) -> Color {
    if total > threshold {
        Color::Red
    } else if u64::from(total) * 5 >= u64::from(threshold) * 4 {
        Color::Yellow
    } else {
        Color::Green
    }
}

const fn motion_style(badge: MotionBadge) -> Style {
    match badge {
        MotionBadge::Active => Style::new()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        MotionBadge::Inactive => Style::new().fg(Color::DarkGray),
    }
}

/// Draw the total count, motion badge and class list for `view`.
///
/// The class list is rebuilt from scratch on every call and only carries its
/// "Detected Objects" title when at least one class is present.
pub fn render_dashboard(frame: &mut Frame, view: &DashboardView, threshold: u32, area: Rect) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(vertical_chunks[0]);

    let ratio = view.threshold_ratio(threshold);
    let total_gauge = Gauge::default()
        .block(Block::bordered().title("Total objects"))
        .gauge_style(Style::default().fg(count_color(view.total, threshold)))
        .ratio(ratio)
        .label(format!("{} / {threshold}", view.total));
    frame.render_widget(total_gauge, top_chunks[0]);

    let badge = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", view.motion.label()),
        motion_style(view.motion),
    )))
    .block(Block::bordered().title("Motion"));
    frame.render_widget(badge, top_chunks[1]);

    if view.rows.is_empty() {
        let empty = Paragraph::new("No objects detected")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::bordered());
        frame.render_widget(empty, vertical_chunks[1]);
        return;
    }

    let header = Row::new(
        ["Class", "Count"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().bold())),
    )
    .height(1);

    let rows: Vec<Row<'_>> = view
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.class.clone()),
                Cell::from(row.count.to_string()),
            ])
        })
        .collect();

    let class_table = Table::new(rows, [Constraint::Percentage(70), Constraint::Percentage(30)])
        .header(header)
        .block(Block::bordered().title(CLASS_LIST_TITLE));

    frame.render_widget(class_table, vertical_chunks[1]);
}
