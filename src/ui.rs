use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ledger_reports::{
    AccountType, LedgerRecord, LedgerTable, Report, ReportKind, SectionBody, Trace,
    TransactionFilter,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Sparkline, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    TransactionLedger,
    Views,
    Report(ReportKind),
}

impl Page {
    /// Navigation order: ledger, views, then the eight report pages
    pub fn all() -> Vec<Page> {
        let mut pages = vec![Page::TransactionLedger, Page::Views];
        pages.extend(ReportKind::ALL.into_iter().map(Page::Report));
        pages
    }

    fn position(&self) -> usize {
        Page::all().iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        let pages = Page::all();
        pages[(self.position() + 1) % pages.len()]
    }

    pub fn previous(&self) -> Self {
        let pages = Page::all();
        pages[(self.position() + pages.len() - 1) % pages.len()]
    }

    pub fn title(&self) -> &str {
        match self {
            Page::TransactionLedger => "Ledger",
            Page::Views => "Views",
            Page::Report(kind) => kind.title(),
        }
    }
}

pub struct App {
    pub table: LedgerTable,
    /// Prebuilt pages, in `ReportKind::ALL` order
    pub reports: Vec<Report>,
    /// Indices into `table.records()` that pass the active filter
    pub filtered: Vec<usize>,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub active_filter: TransactionFilter,
    pub report_scroll: u16,
}

impl App {
    pub fn new(table: LedgerTable, reports: Vec<Report>) -> Self {
        let mut app = Self {
            table,
            reports,
            filtered: Vec::new(),
            state: TableState::default(),
            current_page: Page::TransactionLedger,
            show_detail: false,
            active_filter: TransactionFilter::All,
            report_scroll: 0,
        };
        app.apply_filter(TransactionFilter::All);
        app
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_transaction(&self) -> Option<&LedgerRecord> {
        self.state
            .selected()
            .and_then(|i| self.filtered.get(i))
            .and_then(|&index| self.table.records().get(index))
    }

    pub fn filtered_records(&self) -> impl Iterator<Item = &LedgerRecord> + '_ {
        self.filtered.iter().filter_map(|&i| self.table.records().get(i))
    }

    pub fn apply_filter(&mut self, filter: TransactionFilter) {
        self.active_filter = filter;
        self.filtered = self
            .table
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .map(|(i, _)| i)
            .collect();

        // Reset selection to first item
        if self.filtered.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(TransactionFilter::All);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.report_scroll = 0;
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.report_scroll = 0;
    }

    pub fn current_report(&self) -> Option<&Report> {
        match self.current_page {
            Page::Report(kind) => self.reports.iter().find(|r| r.slug == kind.slug()),
            _ => None,
        }
    }

    pub fn next(&mut self) {
        if matches!(self.current_page, Page::Report(_)) {
            self.report_scroll = self.report_scroll.saturating_add(1);
            return;
        }
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if matches!(self.current_page, Page::Report(_)) {
            self.report_scroll = self.report_scroll.saturating_sub(1);
            return;
        }
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        if matches!(self.current_page, Page::Report(_)) {
            self.report_scroll = self.report_scroll.saturating_add(20);
            return;
        }
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 20).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if matches!(self.current_page, Page::Report(_)) {
            self.report_scroll = self.report_scroll.saturating_sub(20);
            return;
        }
        if self.filtered.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(20),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            total: self.table.len(),
            assets: self.table.by_account_type(&AccountType::Asset).count(),
            liabilities: self.table.by_account_type(&AccountType::Liability).count(),
            failed: self.table.failed().count(),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct LedgerStats {
    pub total: usize,
    pub assets: usize,
    pub liabilities: usize,
    pub failed: usize,
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter if app.current_page == Page::TransactionLedger => app.toggle_detail(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('c') => {
                    app.clear_filter();
                    app.current_page = Page::TransactionLedger;
                }
                KeyCode::Char(digit @ '1'..='5') if app.current_page == Page::Views => {
                    let index = digit as usize - '1' as usize;
                    app.apply_filter(TransactionFilter::ALL[index]);
                    app.current_page = Page::TransactionLedger;
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => {
                    app.report_scroll = 0;
                    if !app.filtered.is_empty() {
                        app.state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    if !app.filtered.is_empty() {
                        app.state.select(Some(app.filtered.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::TransactionLedger {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Transaction list
                Constraint::Percentage(40), // Detail panel
            ])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::TransactionLedger => render_table(f, chunks[1], app),
            Page::Views => render_views(f, chunks[1], app),
            Page::Report(_) => render_report(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    // Page tabs: the report pages are too many to spell out, so they
    // collapse to their position unless one is open
    let mut tab_spans = vec![];
    for (i, page) in Page::all().iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let active = *page == app.current_page;
        let name = match page {
            Page::Report(_) if !active => format!("{}", i - 1),
            _ => page.title().to_string(),
        };

        let style = if active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(name, style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Total: {}", stats.total),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("A {}", stats.assets),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("L {}", stats.liabilities),
        Style::default().fg(Color::Yellow),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("✗ {}", stats.failed),
        Style::default().fg(Color::Red),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn outcome_color(record: &LedgerRecord) -> Color {
    if record.is_success() {
        Color::Green
    } else if record.is_failed() {
        Color::Red
    } else {
        Color::White
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Date", "ID", "Account", "Amount", "Cash Flow", "Net Income", "Outcome"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = app
        .filtered_records()
        .map(|tx| {
            let color = outcome_color(tx);
            let cash_color = if tx.cash_flow < 0.0 { Color::Red } else { Color::Green };

            Row::new(vec![
                Cell::from(tx.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&tx.transaction_id, 14)),
                Cell::from(truncate(tx.account_type.label(), 12)),
                Cell::from(format!("{:.2}", tx.transaction_amount)),
                Cell::from(format!("{:.2}", tx.cash_flow)).style(Style::default().fg(cash_color)),
                Cell::from(format!("{:.2}", tx.net_income)),
                Cell::from(tx.outcome.label().to_string()).style(Style::default().fg(color)),
            ])
            .height(1)
        })
        .collect();

    let title = format!(" Transactions - {} ", app.active_filter.label());

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = match app.current_page {
        Page::Report(_) => vec![Span::styled(
            format!(" Scroll: {} ", app.report_scroll),
            Style::default().fg(Color::Cyan),
        )],
        _ => {
            let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
            vec![Span::styled(
                format!(" Row: {}/{} ", selected, app.filtered.len()),
                Style::default().fg(Color::Cyan),
            )]
        }
    };

    if app.active_filter != TransactionFilter::All {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", app.active_filter.label()),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Fast | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn render_views(f: &mut Frame, area: Rect, app: &App) {
    let mut content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Quick Views & Filters",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  ╔══════════════════════════════════════════════════╗"),
    ];

    for (i, filter) in TransactionFilter::ALL.iter().enumerate() {
        let count = filter.apply(&app.table).count();
        let color = match filter {
            TransactionFilter::Success => Color::Green,
            TransactionFilter::Failed => Color::Red,
            _ => Color::White,
        };

        content.push(Line::from(vec![
            Span::raw("  ║ "),
            if *filter == app.active_filter {
                Span::styled("→", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                Span::raw(" ")
            },
            Span::styled(format!("{}", i + 1), Style::default().fg(Color::Yellow)),
            Span::raw(format!(". {:<26}", filter.label())),
            Span::styled(format!("{:>6} txs", count), Style::default().fg(color)),
            Span::raw("        ║"),
        ]));
    }

    content.push(Line::from("  ╚══════════════════════════════════════════════════╝"));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled(
            "  Hint: ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ),
        Span::styled(
            "Press ",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
        Span::styled(
            "1-5",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ),
        Span::styled(
            " to filter, ",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
        Span::styled(
            "c",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ),
        Span::styled(
            " to clear",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    ]));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Views - Quick Access Filters "),
    );

    f.render_widget(paragraph, area);
}

// ============================================================================
// REPORT PAGES
// ============================================================================

/// Lay a report's sections out as text lines
pub fn report_lines(report: &Report) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}", report.subtitle),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    for section in &report.sections {
        lines.push(Line::from(Span::styled(format!("  {}", section.heading), heading)));
        lines.push(Line::from(""));

        match &section.body {
            SectionBody::Metrics { metrics } => {
                for metric in metrics {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<28}", metric.label), label),
                        Span::raw(metric.display.clone()),
                    ]));
                }
            }
            SectionBody::Table { columns, rows } => {
                let widths: Vec<usize> = columns
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        rows.iter()
                            .filter_map(|r| r.get(i))
                            .map(|cell| cell.chars().count())
                            .chain(std::iter::once(c.chars().count()))
                            .max()
                            .unwrap_or(0)
                    })
                    .collect();

                let pad = |cells: &[String]| {
                    cells
                        .iter()
                        .zip(&widths)
                        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
                        .collect::<Vec<_>>()
                        .join("  ")
                };

                lines.push(Line::from(Span::styled(format!("  {}", pad(columns.as_slice())), label)));
                if rows.is_empty() {
                    lines.push(Line::from("  (no data)"));
                }
                for row in rows {
                    lines.push(Line::from(format!("  {}", pad(row.as_slice()))));
                }
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

fn render_report(f: &mut Frame, area: Rect, app: &App) {
    let report = match app.current_report() {
        Some(r) => r,
        None => {
            f.render_widget(
                Paragraph::new("Report unavailable").block(Block::default().borders(Borders::ALL)),
                area,
            );
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(area);

    let body = Paragraph::new(report_lines(report))
        .scroll((app.report_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", report.title)),
        );
    f.render_widget(body, chunks[0]);

    render_chart(f, chunks[1], report);
}

/// Terminal stand-in for the web chart: bars for bar/pie figures,
/// a sparkline of the first series for line figures
fn render_chart(f: &mut Frame, area: Rect, report: &Report) {
    let figure = match &report.chart {
        Some(figure) => figure,
        None => return,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", figure.title()));

    // Bars can't go below zero here; negative values draw as empty
    let to_bar = |v: f64| if v > 0.0 { v.round() as u64 } else { 0 };

    let mut bars: Vec<(String, u64)> = Vec::new();
    let mut series: Option<Vec<u64>> = None;

    for trace in &figure.data {
        match trace {
            Trace::Bar { x, y, name, .. } => {
                for (label, value) in x.iter().zip(y) {
                    let label = match name {
                        Some(name) if x.len() == 1 => name.clone(),
                        _ => label.clone(),
                    };
                    bars.push((label, to_bar(*value)));
                }
            }
            Trace::Pie { labels, values, .. } => {
                bars.extend(labels.iter().cloned().zip(values.iter().map(|v| to_bar(*v))));
            }
            Trace::Scatter { y, .. } => {
                if series.is_none() {
                    // Shift so the lowest point sits on the baseline
                    let min = y.iter().cloned().fold(f64::INFINITY, f64::min);
                    let base = if min.is_finite() { min.min(0.0) } else { 0.0 };
                    series = Some(y.iter().map(|v| to_bar(v - base)).collect());
                }
            }
        }
    }

    if let Some(points) = series {
        let sparkline = Sparkline::default()
            .block(block)
            .data(&points)
            .style(Style::default().fg(Color::Green));
        f.render_widget(sparkline, area);
    } else {
        let data: Vec<(&str, u64)> = bars.iter().map(|(l, v)| (l.as_str(), *v)).collect();
        let chart = BarChart::default()
            .block(block)
            .data(data.as_slice())
            .bar_width(20)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Blue))
            .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        f.render_widget(chart, area);
    }
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let tx = match app.selected_transaction() {
        Some(t) => t,
        None => {
            let no_selection = Paragraph::new("No transaction selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Transaction Details "),
            );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {}: ", name), label),
            Span::raw(value),
        ])
    };
    let money = |v: f64| format!("{:.2}", v);

    let coerced: Vec<&str> = tx.coerced.iter().map(|f| f.header()).collect();

    let content = vec![
        Line::from(""),
        field("ID", tx.transaction_id.clone()),
        field("Date", tx.date.format("%Y-%m-%d %H:%M:%S").to_string()),
        field("Account Type", tx.account_type.label().to_string()),
        Line::from(vec![
            Span::styled("  Outcome: ", label),
            Span::styled(
                tx.outcome.label().to_string(),
                Style::default().fg(outcome_color(tx)),
            ),
        ]),
        Line::from(""),
        field("Amount", money(tx.transaction_amount)),
        field("Cash Flow", money(tx.cash_flow)),
        field("Net Income", money(tx.net_income)),
        field("Revenue", money(tx.revenue)),
        field("Expenditure", money(tx.expenditure)),
        field("Operating Exp.", money(tx.operating_expenses)),
        field("Gross Profit", money(tx.gross_profit)),
        field("Profit Margin", money(tx.profit_margin)),
        field("Debt-to-Equity", money(tx.debt_to_equity_ratio)),
        field("Accuracy", money(tx.accuracy_score)),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  PROVENANCE",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Source File: ", label),
            Span::styled(app.table.source_name().to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("  Line Number: ", label),
            Span::styled(tx.line_number.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("  Coerced to 0: ", label),
            if coerced.is_empty() {
                Span::styled("none", Style::default().fg(Color::Green))
            } else {
                Span::styled(coerced.join(", "), Style::default().fg(Color::Red))
            },
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Press Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]),
    ];

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Transaction Details "),
    );

    f.render_widget(detail_panel, area);
}
