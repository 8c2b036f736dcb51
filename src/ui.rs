use anyhow::Result;
use chrono::Datelike;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pto_forecast::{ForecastDay, ForecastReport};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_STEP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Timeline,
    Holidays,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Timeline => Page::Holidays,
            Page::Holidays => Page::Timeline,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Timeline => "Balance Timeline",
            Page::Holidays => "Holidays",
        }
    }
}

pub struct App {
    pub report: ForecastReport,
    pub state: TableState,
    pub holidays_state: TableState,
    pub current_page: Page,
    /// Hide days where nothing changes
    pub changes_only: bool,
}

impl App {
    pub fn new(report: ForecastReport) -> Self {
        let mut state = TableState::default();
        if !report.timeline.is_empty() {
            state.select(Some(0));
        }

        let mut holidays_state = TableState::default();
        if !report.holidays.is_empty() {
            holidays_state.select(Some(0));
        }

        Self {
            report,
            state,
            holidays_state,
            current_page: Page::Timeline,
            changes_only: false,
        }
    }

    /// Days shown in the timeline table
    pub fn visible_days(&self) -> Vec<&ForecastDay> {
        self.report
            .timeline
            .iter()
            .filter(|day| !self.changes_only || day.accrued != 0.0 || day.planned != 0.0 || day.holiday != 0.0)
            .collect()
    }

    pub fn toggle_changes_only(&mut self) {
        self.changes_only = !self.changes_only;
        let selection = if self.visible_days().is_empty() { None } else { Some(0) };
        self.state.select(selection);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    fn active(&mut self) -> (&mut TableState, usize) {
        match self.current_page {
            Page::Timeline => {
                let len = self.visible_days().len();
                (&mut self.state, len)
            }
            Page::Holidays => (&mut self.holidays_state, self.report.holidays.len()),
        }
    }

    pub fn next(&mut self) {
        let (state, len) = self.active();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.active();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let (state, len) = self.active();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| (i + PAGE_STEP).min(len - 1));
        state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let (state, len) = self.active();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| i.saturating_sub(PAGE_STEP));
        state.select(Some(i));
    }

    pub fn home(&mut self) {
        let (state, len) = self.active();
        if len > 0 {
            state.select(Some(0));
        }
    }

    pub fn end(&mut self) {
        let (state, len) = self.active();
        if len > 0 {
            state.select(Some(len - 1));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Tab | KeyCode::BackTab => app.next_page(),
                KeyCode::Char('f') => app.toggle_changes_only(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.home(),
                KeyCode::End => app.end(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Totals header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Timeline => render_timeline(f, chunks[1], app),
        Page::Holidays => render_holidays(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn hours_style(value: f64) -> Style {
    if value < 0.0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let totals = &app.report.totals;
    let closing = app.report.closing_balance();

    let spans = vec![
        Span::styled(
            format!(" {} ", app.current_page.title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::raw(format!("Opening {:.2}h", app.report.opening_balance)),
        Span::raw(" │ "),
        Span::styled(format!("+{:.2}h accrued", totals.accrued), Style::default().fg(Color::Green)),
        Span::raw(" │ "),
        Span::styled(format!("-{:.2}h planned", totals.planned_consumed), Style::default().fg(Color::Yellow)),
        Span::raw(" │ "),
        Span::styled(format!("-{:.2}h holidays", totals.holiday_consumed), Style::default().fg(Color::Magenta)),
        Span::raw(" │ "),
        Span::styled(format!("Closing {:.2}h", closing), hours_style(closing).add_modifier(Modifier::BOLD)),
    ];

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" PTO Forecast "),
    );

    f.render_widget(header, area);
}

fn render_timeline(f: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec!["Date", "Day", "Accrued", "Planned", "Holiday", "Balance"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = app
        .visible_days()
        .into_iter()
        .map(|day| {
            let marker = |value: f64, sign: &str| {
                if value == 0.0 {
                    String::new()
                } else {
                    format!("{}{:.2}", sign, value.abs())
                }
            };
            let accrued_sign = if day.accrued < 0.0 { "-" } else { "+" };

            Row::new(vec![
                Cell::from(day.date.to_string()),
                Cell::from(day.date.weekday().to_string()),
                Cell::from(marker(day.accrued, accrued_sign)).style(Style::default().fg(Color::Green)),
                Cell::from(marker(day.planned, "-")).style(Style::default().fg(Color::Yellow)),
                Cell::from(marker(day.holiday, "-")).style(Style::default().fg(Color::Magenta)),
                Cell::from(format!("{:.2}", day.balance)).style(hours_style(day.balance)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Balance by Day "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_holidays(f: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec!["Date", "Day", "Name", "Base hours", "Deducted"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = app
        .report
        .holidays
        .iter()
        .map(|holiday| {
            let deducted = app
                .report
                .timeline
                .iter()
                .find(|day| day.date == holiday.date)
                .map_or(0.0, |day| day.holiday);

            Row::new(vec![
                Cell::from(holiday.date.to_string()),
                Cell::from(holiday.date.weekday().to_string()),
                Cell::from(holiday.name.clone()),
                Cell::from(format!("{:.2}", holiday.hours)),
                Cell::from(format!("{:.2}", deducted)).style(Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(30),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Holidays Applied "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.holidays_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (selected, total) = match app.current_page {
        Page::Timeline => (app.state.selected(), app.visible_days().len()),
        Page::Holidays => (app.holidays_state.selected(), app.report.holidays.len()),
    };

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected.map_or(0, |i| i + 1), total),
        Style::default().fg(Color::Cyan),
    )];

    if app.changes_only {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("Changes only", Style::default().fg(Color::Green)));
    }

    if let Some((date, balance)) = app.report.lowest_balance() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Lowest {:.2}h on {}", balance, date),
            hours_style(balance),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" page  "));
    status_spans.push(Span::styled("f", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" changes  "));
    status_spans.push(Span::styled("j/k", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" move  "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" quit"));

    let status = Paragraph::new(Line::from(status_spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
