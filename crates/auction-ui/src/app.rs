//! Main application state and TUI event loop for the auction dashboard.
//!
//! [`App`] owns the theme, the active tab, the current [`FilterSpec`] and the
//! snapshot memo. Each key press that changes the filter replaces the spec
//! with a new value; the next frame picks up the matching snapshot.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, TableState, Tabs},
    Frame, Terminal,
};

use auction_core::error::{DashboardError, Result};
use auction_core::filter_spec::FilterSpec;
use auction_core::models::Item;
use auction_runtime::snapshot::{DashboardSnapshot, SnapshotCache};

use crate::category_view;
use crate::components::header::Header;
use crate::components::indicators::category_for_key;
use crate::insights_view;
use crate::scatter_view;
use crate::summary_view;
use crate::table_view;
use crate::themes::Theme;

/// Width of the summary sidebar.
const SIDEBAR_WIDTH: u16 = 46;

// ── Tab ───────────────────────────────────────────────────────────────────────

/// Which content view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    DataTable,
    Categories,
    Scatter,
    Insights,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::DataTable, Tab::Categories, Tab::Scatter, Tab::Insights];

    pub fn title(self) -> &'static str {
        match self {
            Tab::DataTable => "Data Table",
            Tab::Categories => "Categories",
            Tab::Scatter => "Scatter",
            Tab::Insights => "Insights",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Whether keys drive navigation or edit the keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Editing the keyword; holds the draft text.
    Keyword(String),
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub tab: Tab,
    /// Current filter; replaced, never mutated in place.
    pub spec: FilterSpec,
    pub input_mode: InputMode,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    pub table_state: TableState,
    items: Vec<Item>,
    content_hash: u64,
    cache: SnapshotCache,
}

impl App {
    /// Construct a new application over an already-loaded table.
    pub fn new(
        theme_name: &str,
        items: Vec<Item>,
        content_hash: u64,
        spec: FilterSpec,
        top_n: usize,
    ) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab: Tab::DataTable,
            spec,
            input_mode: InputMode::Normal,
            should_quit: false,
            table_state: TableState::default(),
            items,
            content_hash,
            cache: SnapshotCache::new(top_n),
        }
    }

    /// Snapshot for the current filter.
    pub fn snapshot(&mut self) -> &DashboardSnapshot {
        self.cache
            .get_or_build(self.content_hash, &self.items, &self.spec)
    }

    /// Replace the filter, keeping the table cursor in range.
    pub fn set_spec(&mut self, spec: FilterSpec) {
        if spec == self.spec {
            return;
        }
        tracing::debug!(
            categories = spec.categories.len(),
            keyword = %spec.keyword,
            "filter changed"
        );
        self.spec = spec;
        let len = self.snapshot().items.len();
        match self.table_state.selected() {
            Some(_) if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            _ => {}
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the loop is
    /// synchronous because all data is already in memory.
    pub fn run(self) -> Result<()> {
        self.run_terminal()
            .map_err(|e| DashboardError::Terminal(e.to_string()))
    }

    fn run_terminal(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        let (hits, misses) = self.cache.stats();
        tracing::debug!(hits, misses, "snapshot cache usage");
        result
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match &mut self.input_mode {
            InputMode::Keyword(draft) => match key.code {
                KeyCode::Enter => {
                    let keyword = std::mem::take(draft);
                    self.input_mode = InputMode::Normal;
                    let spec = self.spec.clone().with_keyword(keyword);
                    self.set_spec(spec);
                }
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Backspace => {
                    draft.pop();
                }
                KeyCode::Char(c) => draft.push(c),
                _ => {}
            },
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.previous(),
            KeyCode::Char('a') => {
                let spec = self.spec.select_all();
                self.set_spec(spec);
            }
            KeyCode::Char('c') => {
                let spec = self.spec.clear_all();
                self.set_spec(spec);
            }
            KeyCode::Char('/') => self.input_mode = InputMode::Keyword(self.spec.keyword.clone()),
            KeyCode::Char(c) => {
                if let Some(category) = category_for_key(c) {
                    let spec = self.spec.toggle_category(category);
                    self.set_spec(spec);
                }
            }
            KeyCode::Down => self.move_selection(1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.snapshot().items.len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.table_state.select(Some(next));
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let snapshot = self
            .cache
            .get_or_build(self.content_hash, &self.items, &self.spec);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Text::from(Header::new(&snapshot.summary, &self.theme).to_lines())),
            rows[0],
        );

        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        frame.render_widget(
            Tabs::new(titles)
                .select(self.tab.index())
                .style(self.theme.tab_inactive)
                .highlight_style(self.theme.tab_active)
                .divider(Span::styled("|", self.theme.separator)),
            rows[1],
        );

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[2]);

        summary_view::render_summary_panel(frame, body[0], snapshot, &self.theme);
        render_tab(
            frame,
            body[1],
            self.tab,
            snapshot,
            &mut self.table_state,
            &self.theme,
        );

        frame.render_widget(
            Paragraph::new(footer_line(&self.input_mode, &self.theme)),
            rows[3],
        );
    }
}

fn render_tab(
    frame: &mut Frame,
    area: Rect,
    tab: Tab,
    snapshot: &DashboardSnapshot,
    table_state: &mut TableState,
    theme: &Theme,
) {
    if snapshot.is_empty() {
        table_view::render_no_results(frame, area, theme);
        return;
    }
    match tab {
        Tab::DataTable => table_view::render_items_table(
            frame,
            area,
            &snapshot.items,
            &snapshot.stats,
            table_state,
            theme,
        ),
        Tab::Categories => category_view::render_category_view(
            frame,
            area,
            &snapshot.treemap,
            &snapshot.breakdown,
            theme,
        ),
        Tab::Scatter => scatter_view::render_scatter_view(frame, area, &snapshot.scatter, theme),
        Tab::Insights => insights_view::render_insights_view(frame, area, snapshot, theme),
    }
}

/// Bottom line: key help, or the keyword being edited.
fn footer_line<'a>(mode: &InputMode, theme: &'a Theme) -> Line<'a> {
    match mode {
        InputMode::Keyword(draft) => Line::from(vec![
            Span::styled("Keyword: ", theme.label),
            Span::styled(draft.clone(), theme.info),
            Span::styled("▏", theme.info),
            Span::styled("  (Enter apply, Esc cancel)", theme.dim),
        ]),
        InputMode::Normal => Line::from(Span::styled(
            "Tab/Shift-Tab views | 1-9,0,- toggle category | a all | c clear | / keyword | q quit",
            theme.dim,
        )),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::categories::Category;
    use auction_core::pricing::Estimate;
    use ratatui::backend::TestBackend;

    fn items() -> Vec<Item> {
        [
            ("Signed Script", 1000u64),
            ("Coffee Mug", 50),
            ("Red Chair", 300),
            ("Blue Chair", 75),
        ]
        .into_iter()
        .map(|(t, p)| {
            Item::new(
                t,
                p,
                Estimate {
                    low: p / 2,
                    high: p,
                },
                format!("${} - ${}", p / 2, p),
                "",
                "",
            )
        })
        .collect()
    }

    fn app() -> App {
        App::new("dark", items(), 7, FilterSpec::all(), 10)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── Tab ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::DataTable.next(), Tab::Categories);
        assert_eq!(Tab::Insights.next(), Tab::DataTable);
        assert_eq!(Tab::DataTable.previous(), Tab::Insights);
        assert_eq!(Tab::Scatter.previous(), Tab::Categories);
    }

    #[test]
    fn test_tab_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Categories);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Insights);
    }

    // ── Filter keys ───────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_category_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        assert!(!app.spec.is_selected(Category::Furniture));
        assert_eq!(app.snapshot().items.len(), 2);

        press(&mut app, KeyCode::Char('6'));
        assert!(app.spec.is_selected(Category::Furniture));
        assert_eq!(app.snapshot().items.len(), 4);
    }

    #[test]
    fn test_clear_and_select_all() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.spec.categories.is_empty());
        assert!(app.snapshot().is_empty());

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.spec.categories.len(), Category::ALL.len());
        assert_eq!(app.snapshot().items.len(), 4);
    }

    #[test]
    fn test_keyword_edit_enter_applies() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "chairx");
        press(&mut app, KeyCode::Backspace);
        // Typing does not quit or toggle while editing.
        assert!(!app.should_quit);
        assert_eq!(app.input_mode, InputMode::Keyword("chair".into()));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.spec.keyword, "chair");
        assert_eq!(app.snapshot().items.len(), 2);
    }

    #[test]
    fn test_keyword_edit_esc_cancels() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "mug");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.spec.keyword.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = App::new("dark", items(), 7, FilterSpec::all(), 10);
        press(&mut app, KeyCode::Char('/'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_selection_clamped_after_filter() {
        let mut app = app();
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.table_state.selected(), Some(3));

        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.table_state.selected(), Some(1));

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn test_snapshot_memoized_per_spec() {
        let mut app = app();
        app.snapshot();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('1'));
        app.snapshot();
        assert_eq!(app.cache.len(), 2);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_every_tab() {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        let mut app = app();

        for _ in Tab::ALL {
            terminal.draw(|frame| app.render(frame)).unwrap();
            let text = screen(&terminal);
            assert!(text.contains("AUCTION RESULTS DASHBOARD"));
            assert!(text.contains(app.tab.title()));
            press(&mut app, KeyCode::Tab);
        }
    }

    #[test]
    fn test_render_no_results() {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("No items match"));
        assert!(text.contains("Showing 0 of 4 items"));
    }

    #[test]
    fn test_render_keyword_footer() {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "lamp");
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert!(screen(&terminal).contains("Keyword: lamp"));
    }
}
