use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::domain::entities::banner::{Banner, BannerBoard};
use crate::presentation::tui::event::ActivePanel;
use crate::presentation::tui::view_state::TuiViewState;
use crate::presentation::tui::widgets::banner_panel::render_banner_panel;
use crate::presentation::tui::widgets::dashboard::render_dashboard;

/// Redraw cadence. Independent of the poll interval so banner countdowns
/// and expiry stay smooth.
const FRAME_RATE: Duration = Duration::from_millis(100);

struct App {
    view_state: Arc<TuiViewState>,
    board: Arc<BannerBoard>,
    threshold: u32,

    banners: Vec<Banner>,

    active_panel: ActivePanel,
    banner_list_state: ListState,

    should_quit: bool,
}

impl App {
    #[must_use]
    fn new(view_state: Arc<TuiViewState>, board: Arc<BannerBoard>, threshold: u32) -> Self {
        Self {
            view_state,
            board,
            threshold,
            banners: Vec::new(),
            active_panel: ActivePanel::default(),
            banner_list_state: ListState::default(),
            should_quit: false,
        }
    }

    /// Drop expired banners and take a fresh copy of the visible ones
    fn refresh_banners(&mut self, now: DateTime<Utc>) {
        let expired = self.board.prune(now);
        if expired > 0 {
            tracing::debug!("{expired} banner(s) expired");
        }
        self.banners = self.board.active(now);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let count = self.banners.len();
        if let Some(sel) = self.banner_list_state.selected() {
            if count == 0 {
                self.banner_list_state.select(None);
            } else if sel >= count {
                self.banner_list_state.select(Some(count - 1));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.active_panel = self.active_panel.next(),
            KeyCode::BackTab => self.active_panel = self.active_panel.prev(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Char('d') | KeyCode::Delete => self.dismiss_selected(),
            _ => {}
        }
    }

    fn scroll_down(&mut self) {
        if self.active_panel != ActivePanel::Banners {
            return;
        }
        let count = self.banners.len();
        if count > 0 {
            let i = self
                .banner_list_state
                .selected()
                .map_or(0, |i| if i >= count - 1 { 0 } else { i + 1 });
            self.banner_list_state.select(Some(i));
        }
    }

    fn scroll_up(&mut self) {
        if self.active_panel != ActivePanel::Banners {
            return;
        }
        let count = self.banners.len();
        if count > 0 {
            let i = self
                .banner_list_state
                .selected()
                .map_or(count - 1, |i| if i == 0 { count - 1 } else { i - 1 });
            self.banner_list_state.select(Some(i));
        }
    }

    /// Dismiss the highlighted banner, or the newest one when nothing is selected
    fn dismiss_selected(&mut self) {
        let target = match self.banner_list_state.selected() {
            Some(i) => self.banners.get(i),
            None => self.banners.last(),
        };
        if let Some(id) = target.map(|b| b.id) {
            if self.board.dismiss(id) {
                self.banners.retain(|b| b.id != id);
                self.clamp_selection();
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let now = Utc::now();
        self.refresh_banners(now);

        let area = frame.area();

        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let latest = self.view_state.latest();
        self.render_header(frame, header_area, latest.as_ref().map(|(_, at)| at));

        let [dashboard_area, banner_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(body_area);

        if let Some((view, _)) = &latest {
            render_dashboard(frame, view, self.threshold, dashboard_area);
        } else {
            let waiting = Paragraph::new("Waiting for detection data...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::bordered().title("Dashboard"));
            frame.render_widget(waiting, dashboard_area);
        }

        render_banner_panel(
            frame,
            &self.banners,
            now,
            &mut self.banner_list_state,
            self.active_panel == ActivePanel::Banners,
            banner_area,
        );

        Self::render_status_bar(frame, status_area);
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        updated_at: Option<&DateTime<chrono::Local>>,
    ) {
        let timestamp =
            updated_at.map_or_else(|| "--:--:--".to_string(), |t| t.format("%H:%M:%S").to_string());

        let header = Line::from(vec![
            Span::styled(
                " LOOKOUT ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("│ "),
            Span::styled(
                format!("[{}]", self.active_panel),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" │ "),
            Span::styled(timestamp, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let bar = Line::from(vec![
            Span::styled(" q", key_style),
            Span::raw(":quit "),
            Span::styled("Tab", key_style),
            Span::raw(":panel "),
            Span::styled("j/k", key_style),
            Span::raw(":nav "),
            Span::styled("d", key_style),
            Span::raw(":dismiss"),
        ]);

        frame.render_widget(
            Paragraph::new(bar).style(Style::default().bg(Color::DarkGray)),
            area,
        );
    }
}

/// Restore the terminal to its normal state.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        eprintln!("Failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        eprintln!("Failed to leave alternate screen: {e}");
    }
}

/// Launch the interactive dashboard.
///
/// Blocks until the user quits. The poller keeps running on the async
/// runtime and feeds `view_state` and `board` in the background.
///
/// # Errors
///
/// Returns an error if terminal setup, rendering, or event handling fails.
pub fn run_tui(
    view_state: Arc<TuiViewState>,
    board: Arc<BannerBoard>,
    threshold: u32,
) -> anyhow::Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    // Restore the terminal even on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(view_state, board, threshold);
    let result = run_app_loop(&mut terminal, &mut app);

    restore_terminal();
    let _ = terminal.show_cursor();
    let _ = std::panic::take_hook();

    result
}

fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(FRAME_RATE)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
