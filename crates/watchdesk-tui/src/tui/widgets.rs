use crate::state::UiEventLogEntry;
use crate::tui::snapshot::{DialogView, ReportRow, UiSnapshot};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use watchdesk_core::{IncidentRecord, StatCard, Status, TrendDirection};

#[derive(Clone, Copy, Debug)]
pub enum EventColor {
    Normal,
    Error,
    Warning,
    Info,
}

impl EventColor {
    pub fn to_color(self) -> Color {
        match self {
            EventColor::Normal => Color::White,
            EventColor::Error => Color::Red,
            EventColor::Warning => Color::Yellow,
            EventColor::Info => Color::Cyan,
        }
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Done => Color::Green,
        Status::Pending => Color::Yellow,
    }
}

pub fn render_stat_cards(f: &mut Frame, area: Rect, cards: &[StatCard]) {
    if cards.is_empty() {
        let block = Block::default().borders(Borders::ALL).title("Summary");
        let paragraph = Paragraph::new("No summary available")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
        return;
    }

    let count = u32::try_from(cards.len()).unwrap_or(u32::MAX);
    let constraints: Vec<Constraint> = cards.iter().map(|_| Constraint::Ratio(1, count)).collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let (arrow, color) = match card.trend.direction() {
            TrendDirection::Up => ("▲", Color::Green),
            TrendDirection::Down => ("▼", Color::Red),
            TrendDirection::Flat => ("■", Color::DarkGray),
        };
        let lines = vec![
            Line::from(Span::styled(
                card.value.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format!("{} ", arrow), Style::default().fg(color)),
                Span::styled(card.trend.describe(), Style::default().fg(Color::Gray)),
            ]),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .title(card.label.clone());
        f.render_widget(Paragraph::new(lines).block(block), *chunk);
    }
}

pub fn render_filter_bar(f: &mut Frame, area: Rect, snapshot: &UiSnapshot) {
    let label = Style::default().fg(Color::Yellow);
    let search_style = if snapshot.searching {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if snapshot.searching { "▏" } else { "" };

    let line = Line::from(vec![
        Span::styled("Search: ", label),
        Span::styled(format!("{}{}", snapshot.filters.search, cursor), search_style),
        Span::raw(" │ "),
        Span::styled("Month: ", label),
        Span::raw(snapshot.filters.month.clone()),
        Span::raw(" │ "),
        Span::styled("Date: ", label),
        Span::raw(snapshot.filters.date.clone()),
        Span::raw(" │ "),
        Span::styled("Reporter: ", label),
        Span::raw(snapshot.filters.reporter.clone()),
        Span::raw(" │ "),
        Span::styled("Type: ", label),
        Span::raw(snapshot.filters.incident.clone()),
    ]);

    let block = Block::default().borders(Borders::ALL).title("Filters");
    f.render_widget(Paragraph::new(vec![line]).block(block), area);
}

pub fn render_report_table(f: &mut Frame, area: Rect, rows: &[ReportRow], selected: usize, total: usize) {
    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(format!("{} {}", row.icon, row.incident)),
                Cell::from(row.location.clone()),
                Cell::from(row.date_time.clone()),
                Cell::from(row.reporter.clone()),
                Cell::from(row.status.as_str()).style(
                    Style::default()
                        .fg(status_color(row.status))
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(24),
            Constraint::Percentage(22),
            Constraint::Percentage(20),
            Constraint::Percentage(12),
        ],
    )
    .header(
        Row::new(vec![
            Cell::from("Incident Report"),
            Cell::from("Location"),
            Cell::from("Date - Time"),
            Cell::from("Reporter"),
            Cell::from("Status"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray)),
    )
    .highlight_style(Style::default().bg(Color::Blue))
    .highlight_symbol("▶ ")
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Report Details ({} of {})", rows.len(), total)),
    );

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(selected.min(rows.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

pub fn render_empty_table(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default().borders(Borders::ALL).title("Report Details");
    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message.to_string())])
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(paragraph, area);
}

pub fn render_load_error(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Could not load incident reports",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[Esc] dismiss", Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Load Error")
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub fn render_detail_modal(f: &mut Frame, area: Rect, record: &IncidentRecord) {
    let image = if record.image.is_empty() { "(no image)" } else { record.image.as_str() };
    let lines = vec![
        Line::from(Span::styled(format!("[image: {}]", image), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            record.headline(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            record.location.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Reporter: {}", record.reporter)),
        Line::from(""),
        Line::from(Span::styled(
            " View Details [Enter] ",
            Style::default().fg(Color::Red).bg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("[Esc] close", Style::default().fg(Color::Gray))),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Red).fg(Color::White));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub fn render_delete_dialog(f: &mut Frame, area: Rect, dialog: &DialogView) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            dialog.heading,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let mut identity = dialog.lines.iter();
    if let Some(name) = identity.next() {
        lines.push(Line::from(Span::styled(
            name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    for rest in identity {
        lines.push(Line::from(Span::styled(rest.clone(), Style::default().fg(Color::Gray))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("  [Y] {}  ", dialog.actions[0]),
            Style::default().fg(Color::White).bg(Color::Red),
        ),
        Span::raw("   "),
        Span::styled(format!("  [N] {}  ", dialog.actions[1]), Style::default().fg(Color::Red)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Delete")
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub fn render_report_screen(f: &mut Frame, area: Rect, record: &IncidentRecord) {
    let field = Style::default().fg(Color::Yellow);
    let lines = vec![
        Line::from(Span::styled(
            record.headline(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("Report:   ", field), Span::raw(record.id.to_string())]),
        Line::from(vec![Span::styled("Type:     ", field), Span::raw(record.incident.clone())]),
        Line::from(vec![Span::styled("Location: ", field), Span::raw(record.location.clone())]),
        Line::from(vec![Span::styled("Date:     ", field), Span::raw(record.date.clone())]),
        Line::from(vec![Span::styled("Time:     ", field), Span::raw(record.time.clone())]),
        Line::from(vec![Span::styled("Reporter: ", field), Span::raw(record.reporter.clone())]),
        Line::from(vec![
            Span::styled("Status:   ", field),
            Span::styled(record.status.as_str(), Style::default().fg(status_color(record.status))),
        ]),
        Line::from(vec![Span::styled("Image:    ", field), Span::raw(record.image.clone())]),
        Line::from(""),
        Line::from(Span::styled("[Esc] back to dashboard", Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default().borders(Borders::ALL).title("Reports");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_event_log(f: &mut Frame, area: Rect, events: &[UiEventLogEntry]) {
    let log_lines: Vec<Line> = events
        .iter()
        .rev()
        .map(|entry| {
            let time_str = entry.timestamp.format("%H:%M:%S").to_string();
            Line::from(vec![
                Span::styled(format!("{} ", time_str), Style::default().fg(Color::DarkGray)),
                Span::styled(entry.event.text(), Style::default().fg(entry.event.color().to_color())),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Activity (most recent first)");
    f.render_widget(Paragraph::new(log_lines).block(block), area);
}

pub fn render_help_panel(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let entries = [
        ("↑/↓ j/k", "select report"),
        ("Enter", "open report / view details"),
        ("Space s", "toggle Pending / Done"),
        ("/", "search incident type"),
        ("m", "cycle month"),
        ("d", "cycle date"),
        ("n", "cycle reporter"),
        ("t", "cycle incident type"),
        ("c", "clear filters"),
        ("x", "delete reporter"),
        ("Esc", "close / dismiss"),
        ("?", "toggle help"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(k, what)| Line::from(vec![Span::styled(format!("{:<10}", k), key), Span::raw(*what)]))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_notification(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green));
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::TuiApp;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use watchdesk_core::{FilterCriteria, MockSource};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_table_renders_headers_and_rows() {
        let mut app = TuiApp::new(FilterCriteria::default(), "built-in".into());
        app.on_loaded(Ok(MockSource::dataset()));
        let snap = UiSnapshot::from_app(&app, 5);

        let mut terminal = Terminal::new(TestBackend::new(120, 10)).unwrap();
        terminal
            .draw(|f| render_report_table(f, f.size(), &snap.rows, 0, snap.total_records))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Incident Report"));
        assert!(text.contains("Jane Smith"));
        assert!(text.contains("Pending"));
    }

    #[test]
    fn test_stat_cards_render_trend() {
        let cards = MockSource::dataset().summary;
        let mut terminal = Terminal::new(TestBackend::new(160, 4)).unwrap();
        terminal.draw(|f| render_stat_cards(f, f.size(), &cards)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Total Reports"));
        assert!(text.contains("4.3% Down from yesterday"));
    }

    #[test]
    fn test_stat_cards_share_full_width() {
        let cards: Vec<StatCard> = MockSource::dataset().summary.into_iter().take(3).collect();
        let mut terminal = Terminal::new(TestBackend::new(90, 4)).unwrap();
        terminal.draw(|f| render_stat_cards(f, f.size(), &cards)).unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.get(0, 0).symbol(), "┌");
        assert_eq!(buffer.get(29, 0).symbol(), "┐");
        assert_eq!(buffer.get(30, 0).symbol(), "┌");
        assert_eq!(buffer.get(89, 0).symbol(), "┐");
        assert!(buffer_text(&terminal).contains("Total Alerts"));
    }
}
