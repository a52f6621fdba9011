use crate::state::Screen;
use crate::tui::app::TuiApp;
use crate::tui::keys::key_to_action;
use crate::tui::snapshot::UiSnapshot;
use crate::tui::widgets;
use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::io;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::interval;
use watchdesk_core::{LoadState, RecordSource};

const EVENT_LIMIT: usize = 30;

pub async fn run_tui<S>(mut app: TuiApp, source: S, tick: Duration) -> anyhow::Result<()>
where
    S: RecordSource + Send + Sync + 'static,
{
    if !atty::is(atty::Stream::Stdout) {
        return Err(anyhow::anyhow!("TUI requires an interactive terminal"));
    }

    // one-shot load; the result is picked up by the draw loop
    let (load_tx, mut load_rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = source.fetch_dataset().await;
        let _ = load_tx.send(result);
    });

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut terminal = or_restore(enter_terminal(), restore_terminal)?;

    let result = event_loop(&mut terminal, &mut app, &mut load_rx, tick).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn enter_terminal() -> anyhow::Result<ratatui::Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    ratatui::Terminal::new(backend).context("Failed to create terminal")
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Passes `result` through, running `restore` first when it is an error.
fn or_restore<T>(result: anyhow::Result<T>, restore: impl FnOnce()) -> anyhow::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

async fn event_loop(
    terminal: &mut ratatui::Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
    load_rx: &mut oneshot::Receiver<Result<watchdesk_core::Dataset, watchdesk_core::LoadError>>,
    tick: Duration,
) -> anyhow::Result<()> {
    let mut ticker = interval(tick);
    let mut loading = true;

    loop {
        if loading {
            match load_rx.try_recv() {
                Ok(result) => {
                    app.on_loaded(result);
                    loading = false;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    app.on_loaded(Err(watchdesk_core::LoadError::Unavailable(
                        "loader task ended without a result".into(),
                    )));
                    loading = false;
                }
            }
        }

        app.expire_notification();
        let snapshot = UiSnapshot::from_app(app, EVENT_LIMIT);
        terminal.draw(|f| render_ui(f, app, &snapshot))?;

        if crossterm::event::poll(Duration::from_millis(33))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = key_to_action(key.code, app.mode()) {
                        if app.handle_action(action) {
                            break;
                        }
                    }
                }
            }
        }

        ticker.tick().await;
    }

    Ok(())
}

fn render_ui(f: &mut Frame, app: &TuiApp, snapshot: &UiSnapshot) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_header(f, chunks[0], snapshot);

    match &app.shell.screen {
        Screen::Report(record) => widgets::render_report_screen(f, chunks[1], record),
        Screen::Dashboard => render_dashboard(f, chunks[1], app, snapshot),
    }

    render_footer(f, chunks[2], app);

    if let Some(record) = &snapshot.detail {
        if matches!(app.shell.screen, Screen::Dashboard) {
            widgets::render_detail_modal(f, centered_rect(50, 50, size), record);
        }
    }

    if let Some(dialog) = &snapshot.dialog {
        widgets::render_delete_dialog(f, centered_rect(50, 45, size), dialog);
    }

    if let LoadState::Failed(message) = &snapshot.load {
        widgets::render_load_error(f, centered_rect(60, 30, size), message);
    }

    if app.show_help {
        widgets::render_help_panel(f, centered_rect(50, 70, size));
    }

    if let Some((message, _)) = &app.notification {
        widgets::render_notification(f, centered_rect(40, 10, size), message);
    }
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &TuiApp, snapshot: &UiSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Stat cards
            Constraint::Length(3), // Filters
            Constraint::Min(0),    // Table + activity
        ])
        .split(area);

    widgets::render_stat_cards(f, chunks[0], &snapshot.cards);
    widgets::render_filter_bar(f, chunks[1], snapshot);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[2]);

    match &snapshot.load {
        LoadState::Loading => widgets::render_empty_table(f, content[0], "Loading reports…"),
        _ if snapshot.rows.is_empty() && snapshot.total_records == 0 => {
            widgets::render_empty_table(f, content[0], "No reports")
        }
        _ if snapshot.rows.is_empty() => {
            widgets::render_empty_table(f, content[0], "No reports match the current filters")
        }
        _ => widgets::render_report_table(
            f,
            content[0],
            &snapshot.rows,
            app.selected_row,
            snapshot.total_records,
        ),
    }

    widgets::render_event_log(f, content[1], &snapshot.events);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_header(f: &mut Frame, area: Rect, snapshot: &UiSnapshot) {
    let (state_text, state_color) = match &snapshot.load {
        LoadState::Loading => ("LOADING", Color::Yellow),
        LoadState::Ready => ("READY", Color::Green),
        LoadState::Failed(_) => ("LOAD FAILED", Color::Red),
    };

    let line = Line::from(vec![
        Span::styled("Dashboard", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(state_text, Style::default().fg(state_color)),
        Span::raw(" │ "),
        Span::raw(format!("Source: {} │ ", snapshot.source)),
        Span::raw(format!("Showing: {}/{} │ ", snapshot.rows.len(), snapshot.total_records)),
        Span::raw(format!("Pending in view: {}", snapshot.pending_in_view)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &TuiApp) {
    use crate::tui::keys::InputMode;

    let hints = match app.mode() {
        InputMode::Table => "[↑↓]Select [Enter]Open [S]tatus [/]Search [M]onth [D]ate [N]ame [T]ype [C]lear [X]Delete [?]Help [Q]uit",
        InputMode::Search => "Type to search incident type │ [Enter]Done [Esc]Clear",
        InputMode::Detail => "[Enter]View Details [Esc]Close",
        InputMode::ConfirmDelete => "[Y]es [N]o",
        InputMode::Report => "[Esc]Back [Q]uit",
    };

    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(vec![Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))])
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::keys::TuiAction;
    use ratatui::backend::TestBackend;
    use watchdesk_core::{FilterCriteria, LoadError, MockSource};

    fn draw(app: &TuiApp) -> String {
        let snapshot = UiSnapshot::from_app(app, EVENT_LIMIT);
        let mut terminal = ratatui::Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| render_ui(f, app, &snapshot)).unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_loading_screen() {
        let app = TuiApp::new(FilterCriteria::default(), "built-in".into());
        let text = draw(&app);
        assert!(text.contains("LOADING"));
        assert!(text.contains("Loading reports"));
    }

    #[test]
    fn test_failed_load_shows_error_not_empty_table() {
        let mut app = TuiApp::new(FilterCriteria::default(), "reports.json".into());
        app.on_loaded(Err(LoadError::Unavailable("offline".into())));
        let text = draw(&app);
        assert!(text.contains("Could not load incident reports"));

        app.handle_action(TuiAction::DismissError);
        let text = draw(&app);
        assert!(!text.contains("Could not load incident reports"));
        assert!(text.contains("No reports"));
    }

    #[test]
    fn test_delete_dialog_overlay() {
        let mut app = TuiApp::new(FilterCriteria::default(), "built-in".into());
        app.on_loaded(Ok(MockSource::dataset()));
        app.handle_action(TuiAction::RequestDelete);
        let text = draw(&app);
        assert!(text.contains("ARE YOU SURE TO DELETE?"));
        assert!(text.contains("Poblacion"));
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: anyhow::Result<()> = or_restore(Err(anyhow::anyhow!("no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);

        let mut restored = false;
        let value = or_restore(Ok(7), || restored = true).unwrap();
        assert_eq!(value, 7);
        assert!(!restored);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(50, 50, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert_eq!(inner.width, 50);
    }
}
