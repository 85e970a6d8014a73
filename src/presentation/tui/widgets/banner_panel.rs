use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::domain::entities::banner::Banner;
use crate::domain::value_objects::severity::Severity;

const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Danger => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Cyan,
    }
}

fn severity_style(severity: Severity) -> Style {
    let style = Style::default().fg(severity_color(severity));
    if matches!(severity, Severity::Danger) {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn remaining_secs(banner: &Banner, now: DateTime<Utc>) -> i64 {
    let millis = (banner.expires_at - now).num_milliseconds().max(0);
    (millis + 999) / 1000
}

pub fn render_banner_panel(
    frame: &mut Frame,
    banners: &[Banner],
    now: DateTime<Utc>,
    list_state: &mut ListState,
    is_focused: bool,
    area: Rect,
) {
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title("Alerts")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let highlight_style = if is_focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let items: Vec<ListItem<'_>> = if banners.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No active alerts",
            Style::default().fg(Color::Green),
        )))]
    } else {
        banners
            .iter()
            .map(|banner| {
                let line1 = Line::from(vec![Span::styled(
                    format!(
                        "{} [{}] {}",
                        banner.severity.emoji(),
                        banner.severity,
                        banner.message
                    ),
                    severity_style(banner.severity),
                )]);
                let raised = banner.raised_at.with_timezone(&Local).format("%H:%M:%S");
                let line2 = Line::from(vec![Span::styled(
                    format!("  {raised}, closes in {}s", remaining_secs(banner, now)),
                    Style::default().add_modifier(Modifier::DIM),
                )]);
                ListItem::new(vec![line1, line2])
            })
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, list_state);
}
