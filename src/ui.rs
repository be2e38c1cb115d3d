use crate::model::{Listing, PropertyKind, TransactionKind};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Summary,
    Listings,
    Views,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    None,
    All,
    Houses,
    Apartments,
    Purchases,
    Rentals,
}

#[derive(Debug, Clone)]
pub struct FilterState {
    pub active_filter: FilterType,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Summary => Page::Listings,
            Page::Listings => Page::Views,
            Page::Views => Page::Summary,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Summary => Page::Views,
            Page::Listings => Page::Summary,
            Page::Views => Page::Listings,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Summary => "Summary",
            Page::Listings => "Listings",
            Page::Views => "Views",
        }
    }
}

pub struct App {
    pub listings: Vec<Listing>,
    pub filtered_listings: Vec<Listing>,
    pub state: TableState,
    pub total_count: i64,
    pub current_page: Page,
    pub summary_state: TableState,
    pub show_detail: bool,
    pub filter_state: FilterState,
}

impl App {
    pub fn new(listings: Vec<Listing>, total_count: i64) -> Self {
        let mut state = TableState::default();
        if !listings.is_empty() {
            state.select(Some(0));
        }

        let mut summary_state = TableState::default();
        summary_state.select(Some(0));

        let filtered_listings = listings.clone();

        Self {
            listings,
            filtered_listings,
            state,
            total_count,
            current_page: Page::Listings,
            summary_state,
            show_detail: false,
            filter_state: FilterState {
                active_filter: FilterType::None,
            },
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.state.selected().and_then(|i| self.filtered_listings.get(i))
    }

    pub fn apply_filter(&mut self, filter: FilterType) {
        self.filter_state.active_filter = filter;

        self.filtered_listings = match filter {
            FilterType::None | FilterType::All => self.listings.clone(),
            FilterType::Houses => self
                .listings
                .iter()
                .filter(|l| l.kind() == PropertyKind::House)
                .cloned()
                .collect(),
            FilterType::Apartments => self
                .listings
                .iter()
                .filter(|l| l.kind() == PropertyKind::Apartment)
                .cloned()
                .collect(),
            FilterType::Purchases => self
                .listings
                .iter()
                .filter(|l| l.transaction() == TransactionKind::Purchase)
                .cloned()
                .collect(),
            FilterType::Rentals => self
                .listings
                .iter()
                .filter(|l| l.transaction() == TransactionKind::Rental)
                .cloned()
                .collect(),
        };

        // Reset selection to first item
        if !self.filtered_listings.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(FilterType::None);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    /// Per-combination summary: (label, count, average asking amount).
    ///
    /// Asking amounts are free-form; rows that do not parse as numbers are
    /// counted but excluded from the average.
    pub fn combination_summary(&self) -> Vec<(String, usize, Option<f64>)> {
        let mut summary: HashMap<String, (usize, f64, usize)> = HashMap::new();

        for listing in &self.listings {
            let entry = summary.entry(listing.label()).or_insert((0, 0.0, 0));
            entry.0 += 1;
            if let Ok(amount) = listing.terms.headline_amount().parse::<f64>() {
                entry.1 += amount;
                entry.2 += 1;
            }
        }

        let mut result: Vec<_> = summary
            .into_iter()
            .map(|(label, (count, total, parsed))| {
                let avg = if parsed > 0 {
                    Some(total / parsed as f64)
                } else {
                    None
                };
                (label, count, avg)
            })
            .collect();

        result.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        result
    }

    pub fn next(&mut self) {
        let len = self.filtered_listings.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.filtered_listings.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.filtered_listings.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                let next = i + 20;
                if next >= len {
                    len - 1
                } else {
                    next
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if i < 20 {
                    0
                } else {
                    i - 20
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn stats(&self) -> ListingStats {
        let mut stats = ListingStats::default();

        for listing in &self.listings {
            match listing.kind() {
                PropertyKind::House => stats.houses += 1,
                PropertyKind::Apartment => stats.apartments += 1,
            }
            match listing.transaction() {
                TransactionKind::Purchase => stats.purchases += 1,
                TransactionKind::Rental => stats.rentals += 1,
            }
        }

        stats
    }
}

#[derive(Default)]
pub struct ListingStats {
    pub houses: usize,
    pub apartments: usize,
    pub purchases: usize,
    pub rentals: usize,
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

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

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
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('c') => {
                    app.clear_filter();
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('1') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::All);
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('2') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::Houses);
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('3') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::Apartments);
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('4') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::Purchases);
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('5') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::Rentals);
                    app.current_page = Page::Listings;
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.state.select(Some(0)),
                KeyCode::End => {
                    if !app.filtered_listings.is_empty() {
                        app.state.select(Some(app.filtered_listings.len() - 1));
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

    // Header with page navigation
    render_header(f, chunks[0], app);

    // Content area with optional split for detail panel
    if app.show_detail && app.current_page == Page::Listings {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Listing table
                Constraint::Percentage(40), // Detail panel
            ])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        // Normal full-width content
        match app.current_page {
            Page::Summary => render_summary(f, chunks[1], app),
            Page::Listings => render_table(f, chunks[1], app),
            Page::Views => render_views(f, chunks[1], app),
        }
    }

    // Status bar
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    // Page tabs
    let pages = [Page::Summary, Page::Listings, Page::Views];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Total: {}", app.total_count),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("⌂ {}", stats.houses),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("⌐ {}", stats.apartments),
        Style::default().fg(Color::Cyan),
    ));

    let header_text = vec![Line::from(tab_spans)];

    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Kind", "Transaction", "Sq Ft", "Beds", "Baths", "Asking"]
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

    let rows = app.filtered_listings.iter().map(|listing| {
        let color = match listing.transaction() {
            TransactionKind::Purchase => Color::Green,
            TransactionKind::Rental => Color::Cyan,
        };

        let cells = vec![
            Cell::from(listing.kind().as_str()),
            Cell::from(listing.transaction().as_str()).style(Style::default().fg(color)),
            Cell::from(truncate(&listing.property.square_feet, 10)),
            Cell::from(truncate(&listing.property.bedrooms, 6)),
            Cell::from(truncate(&listing.property.bathrooms, 6)),
            Cell::from(truncate(listing.terms.headline_amount(), 14))
                .style(Style::default().fg(color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Listings "),
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
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.filtered_listings.len();

    let mut status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
    ];

    // Show filter status if active
    if app.filter_state.active_filter != FilterType::None
        && app.filter_state.active_filter != FilterType::All {
        let filter_name = match app.filter_state.active_filter {
            FilterType::Houses => "Houses",
            FilterType::Apartments => "Apartments",
            FilterType::Purchases => "Purchases",
            FilterType::Rentals => "Rentals",
            _ => "Custom",
        };
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", filter_name),
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

    let status_text = vec![Line::from(status_spans)];

    let status_bar = Paragraph::new(status_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

fn render_summary(f: &mut Frame, area: Rect, app: &mut App) {
    let summary = app.combination_summary();

    let header_cells = ["Combination", "Listings", "Avg Asking"]
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

    let rows = summary.iter().map(|(label, count, avg)| {
        let avg_cell = match avg {
            Some(avg) => format!("{:.2}", avg),
            None => "-".to_string(),
        };

        let cells = vec![
            Cell::from(label.clone()),
            Cell::from(format!("{}", count)),
            Cell::from(avg_cell).style(Style::default().fg(Color::Green)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(25),
            Constraint::Length(12),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Summary by Combination "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.summary_state);
}

fn render_views(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let view_line = |key: &'static str,
                     name: &'static str,
                     count: usize,
                     color: Color,
                     active: bool| {
        let marker = if active {
            Span::styled("→", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw(" ")
        };
        Line::from(vec![
            Span::raw("  "),
            marker,
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::raw(format!(". {:<24}", name)),
            Span::styled(format!("{:>5} listings", count), Style::default().fg(color)),
        ])
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Quick Views & Filters",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        view_line(
            "1",
            "All Listings",
            app.total_count as usize,
            Color::White,
            app.filter_state.active_filter == FilterType::All,
        ),
        view_line(
            "2",
            "Houses",
            stats.houses,
            Color::Green,
            app.filter_state.active_filter == FilterType::Houses,
        ),
        view_line(
            "3",
            "Apartments",
            stats.apartments,
            Color::Cyan,
            app.filter_state.active_filter == FilterType::Apartments,
        ),
        view_line(
            "4",
            "For Purchase",
            stats.purchases,
            Color::Green,
            app.filter_state.active_filter == FilterType::Purchases,
        ),
        view_line(
            "5",
            "For Rental",
            stats.rentals,
            Color::Cyan,
            app.filter_state.active_filter == FilterType::Rentals,
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Hint: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                "Press ",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                "1-5",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                " to filter, ",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                "c",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                " to clear",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Views - Quick Access Filters "),
    );

    f.render_widget(paragraph, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let listing = match app.selected_listing() {
        Some(l) => l,
        None => {
            let no_selection = Paragraph::new("No listing selected")
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(" Listing Details "),
                );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}", listing.label().to_uppercase()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
        ]),
        Line::from(""),
    ];

    // The same section order the console prints: property details first,
    // then kind details, then transaction terms.
    for line in listing.display_lines() {
        if line.is_empty() {
            content.push(Line::from(""));
        } else if line.ends_with("DETAILS") {
            content.push(Line::from(vec![Span::styled(
                format!("  {}", line),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]));
        } else if line.starts_with('=') {
            // Skip the console underline; the panel has its own styling.
        } else {
            content.push(Line::from(vec![Span::raw("  "), Span::raw(line)]));
        }
    }

    content.push(Line::from(""));
    content.push(Line::from("  ─────────────────────────────────────"));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Listed: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(listing.listed_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    ]));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Id: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            listing.id.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled(
            "  Press Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    ]));

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Listing Details "),
    );

    f.render_widget(detail_panel, area);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ApartmentDetails, Balcony, Fenced, Furnished, Garage, HouseDetails, KindDetails,
        Laundry, PropertyDetails, PurchaseTerms, RentalTerms, TransactionTerms,
    };

    fn sample_listings() -> Vec<Listing> {
        vec![
            Listing::new(
                PropertyDetails::new("1400", "3", "2"),
                KindDetails::House(HouseDetails {
                    stories: "2".to_string(),
                    garage: Garage::Attached,
                    fenced: Fenced::Yes,
                }),
                TransactionTerms::Purchase(PurchaseTerms {
                    price: "300000".to_string(),
                    taxes: "3600".to_string(),
                }),
            ),
            Listing::new(
                PropertyDetails::new("700", "1", "1"),
                KindDetails::Apartment(ApartmentDetails {
                    laundry: Laundry::Coin,
                    balcony: Balcony::No,
                }),
                TransactionTerms::Rental(RentalTerms {
                    rent: "1000".to_string(),
                    utilities: "80".to_string(),
                    furnished: Furnished::Yes,
                }),
            ),
            Listing::new(
                PropertyDetails::new("800", "2", "1"),
                KindDetails::Apartment(ApartmentDetails {
                    laundry: Laundry::Ensuite,
                    balcony: Balcony::Yes,
                }),
                TransactionTerms::Rental(RentalTerms {
                    rent: "1200".to_string(),
                    utilities: "also unknown".to_string(),
                    furnished: Furnished::No,
                }),
            ),
        ]
    }

    #[test]
    fn test_filters_narrow_the_table() {
        let mut app = App::new(sample_listings(), 3);

        app.apply_filter(FilterType::Apartments);
        assert_eq!(app.filtered_listings.len(), 2);

        app.apply_filter(FilterType::Purchases);
        assert_eq!(app.filtered_listings.len(), 1);

        app.clear_filter();
        assert_eq!(app.filtered_listings.len(), 3);
    }

    #[test]
    fn test_filter_resets_selection() {
        let mut app = App::new(sample_listings(), 3);
        app.state.select(Some(2));

        app.apply_filter(FilterType::Houses);
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = App::new(sample_listings(), 3);

        app.state.select(Some(2));
        app.next();
        assert_eq!(app.state.selected(), Some(0));

        app.previous();
        assert_eq!(app.state.selected(), Some(2));
    }

    #[test]
    fn test_stats_count_kinds() {
        let app = App::new(sample_listings(), 3);
        let stats = app.stats();

        assert_eq!(stats.houses, 1);
        assert_eq!(stats.apartments, 2);
        assert_eq!(stats.purchases, 1);
        assert_eq!(stats.rentals, 2);
    }

    #[test]
    fn test_combination_summary_averages_parseable_amounts() {
        let app = App::new(sample_listings(), 3);
        let summary = app.combination_summary();

        // Two apartment rentals first (sorted by count).
        assert_eq!(summary[0].0, "apartment rental");
        assert_eq!(summary[0].1, 2);
        assert_eq!(summary[0].2, Some(1100.0));

        let house = summary.iter().find(|s| s.0 == "house purchase").unwrap();
        assert_eq!(house.1, 1);
        assert_eq!(house.2, Some(300000.0));
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Summary.next(), Page::Listings);
        assert_eq!(Page::Listings.next(), Page::Views);
        assert_eq!(Page::Views.next(), Page::Summary);
        assert_eq!(Page::Summary.previous(), Page::Views);
    }

    #[test]
    fn test_truncate_long_values() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long asking price", 10), "a very ...");
    }
}
