//! App state and core application logic
//!
//! Manages per-screen state, the navigation stack, and input handling.
//! After every input the active screen's scroll offset is fed to the nav bar
//! controller; search queries go through the debounced driver and detail
//! lookups are queued until [`App::process_pending`] runs them.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::{
    CatalogError, CatalogService, DownloadManager, InMemoryCatalog, InMemoryDownloads,
};
use crate::config::Config;
use crate::models::*;
use crate::motion::{BarPose, MotionError, ScrollVisibilityController};
use crate::route::Route;
use crate::search::{DebouncedSearch, Filtered, SearchOutcome};

// =============================================================================
// Layout Metrics (rows)
// =============================================================================

/// Hero banner height on the home page
pub const HERO_HEIGHT: u16 = 9;
/// Height of one carousel section on the home page
pub const CAROUSEL_HEIGHT: u16 = 8;
/// Home sections: hero + three carousels
pub const HOME_SECTIONS: usize = 4;
/// One search result in list layout
pub const SEARCH_LIST_ROW: u16 = 3;
/// One row of cards in grid layout
pub const SEARCH_GRID_ROW: u16 = 6;
/// Cards per row in grid layout
pub const SEARCH_GRID_COLUMNS: usize = 2;
/// Result count line above the results
pub const SEARCH_HEADER: u16 = 1;
/// Smart Downloads panel above the list
pub const SMART_DOWNLOADS_HEIGHT: u16 = 4;
/// One download entry
pub const DOWNLOAD_ROW: u16 = 4;
/// Wheel notches scroll this many lines on free-scrolling pages
pub const WHEEL_LINES: u16 = 3;

/// First row index that keeps `row` inside a window of `visible` rows
pub fn keep_visible(offset: usize, row: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if row < offset {
        row
    } else if row >= offset + visible {
        row + 1 - visible
    } else {
        offset
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// First visible row
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        self.offset = keep_visible(self.offset, self.selected, visible_height);
    }

    /// Reset selection
    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        // Clamp selected to valid range
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        self.offset = self.offset.min(self.selected);
    }
}

// =============================================================================
// Home
// =============================================================================

/// Sections of the home page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSection {
    Hero,
    TopMovies,
    ContinueWatching,
    Upcoming,
}

impl HomeSection {
    pub const ALL: [HomeSection; HOME_SECTIONS] = [
        HomeSection::Hero,
        HomeSection::TopMovies,
        HomeSection::ContinueWatching,
        HomeSection::Upcoming,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            HomeSection::Hero => "Featured",
            HomeSection::TopMovies => "Top Movies",
            HomeSection::ContinueWatching => "Continue Watching",
            HomeSection::Upcoming => "Upcoming Movies",
        }
    }

    /// First line of the section on the page
    pub fn start_line(&self) -> u16 {
        match self {
            HomeSection::Hero => 0,
            HomeSection::TopMovies => HERO_HEIGHT,
            HomeSection::ContinueWatching => HERO_HEIGHT + CAROUSEL_HEIGHT,
            HomeSection::Upcoming => HERO_HEIGHT + 2 * CAROUSEL_HEIGHT,
        }
    }

    pub fn height(&self) -> u16 {
        match self {
            HomeSection::Hero => HERO_HEIGHT,
            _ => CAROUSEL_HEIGHT,
        }
    }
}

/// Home view state
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub featured: Option<FeaturedMovie>,
    pub top_movies: Vec<MovieSummary>,
    pub continue_watching: Vec<WatchProgress>,
    pub upcoming: Vec<MovieSummary>,
    /// Focused section index into [`HomeSection::ALL`]
    pub section: usize,
    /// Selected card per section
    pub columns: [usize; HOME_SECTIONS],
    pub loading: LoadingState,
}

impl HomeState {
    pub fn focused(&self) -> HomeSection {
        HomeSection::ALL[self.section.min(HOME_SECTIONS - 1)]
    }

    pub fn section_len(&self, section: HomeSection) -> usize {
        match section {
            HomeSection::Hero => usize::from(self.featured.is_some()),
            HomeSection::TopMovies => self.top_movies.len(),
            HomeSection::ContinueWatching => self.continue_watching.len(),
            HomeSection::Upcoming => self.upcoming.len(),
        }
    }

    pub fn up(&mut self) {
        self.section = self.section.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.section + 1 < HOME_SECTIONS {
            self.section += 1;
        }
    }

    pub fn left(&mut self) {
        let col = &mut self.columns[self.section];
        *col = col.saturating_sub(1);
    }

    pub fn right(&mut self) {
        let len = self.section_len(self.focused());
        let col = &mut self.columns[self.section];
        if *col + 1 < len {
            *col += 1;
        }
    }

    /// Movie id under the cursor, if a carousel card is focused
    pub fn selected_movie_id(&self) -> Option<&str> {
        let col = self.columns[self.section];
        match self.focused() {
            HomeSection::Hero => None,
            HomeSection::TopMovies => self.top_movies.get(col).map(|m| m.id.as_str()),
            HomeSection::ContinueWatching => {
                self.continue_watching.get(col).map(|w| w.movie.id.as_str())
            }
            HomeSection::Upcoming => self.upcoming.get(col).map(|m| m.id.as_str()),
        }
    }

    pub fn content_height(&self) -> u16 {
        HERO_HEIGHT + 3 * CAROUSEL_HEIGHT
    }

    /// First visible line: the focused section's top, bounded by the page end
    pub fn scroll_lines(&self, viewport: u16) -> u16 {
        let max = self.content_height().saturating_sub(viewport);
        self.focused().start_line().min(max)
    }
}

// =============================================================================
// Search
// =============================================================================

/// What the search screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// Empty query: recent and trending searches
    Suggestions,
    Loading,
    Results,
    /// Query evaluated with no matches
    NoResults,
    Error(String),
}

/// A suggestion row on the empty search screen
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion<'a> {
    Recent(&'a RecentSearch),
    Trending(&'a TrendingSearch),
}

impl Suggestion<'_> {
    pub fn title(&self) -> &str {
        match self {
            Suggestion::Recent(r) => &r.title,
            Suggestion::Trending(t) => &t.title,
        }
    }
}

/// Search view state
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in query (chars)
    pub cursor: usize,
    /// Latest evaluated results
    pub results: Filtered<SearchResult>,
    /// Results selection
    pub list: ListState,
    /// First visible result row
    pub row_offset: usize,
    /// Loading state
    pub loading: LoadingState,
    /// Grid (two columns) or list layout
    pub grid: bool,
    pub recent: Vec<RecentSearch>,
    pub trending: Vec<TrendingSearch>,
    /// Selection over recent + trending
    pub suggestions: ListState,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            results: Filtered::Empty,
            list: ListState::default(),
            row_offset: 0,
            loading: LoadingState::Idle,
            grid: true,
            recent: Vec::new(),
            trending: Vec::new(),
            suggestions: ListState::default(),
        }
    }
}

impl SearchState {
    fn byte_index(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let i = self.byte_index();
        self.query.insert(i, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let i = self.byte_index();
            self.query.remove(i);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let i = self.byte_index();
            self.query.remove(i);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the query, cursor at end
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.cursor_end();
    }

    /// Clear query and results
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.set_results(Filtered::Empty);
        self.loading = LoadingState::Idle;
    }

    /// Set results and update list state
    pub fn set_results(&mut self, results: Filtered<SearchResult>) {
        self.list.set_len(results.len());
        self.list.reset();
        self.row_offset = 0;
        self.results = results;
    }

    pub fn result_slice(&self) -> &[SearchResult] {
        match &self.results {
            Filtered::Matches(items) => items,
            Filtered::Empty => &[],
        }
    }

    /// Get currently selected result
    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.result_slice().get(self.list.selected)
    }

    pub fn view(&self) -> SearchView {
        if self.query.is_empty() {
            return SearchView::Suggestions;
        }
        match &self.loading {
            LoadingState::Loading(_) => SearchView::Loading,
            LoadingState::Error(msg) => SearchView::Error(msg.clone()),
            LoadingState::Idle if self.results.is_empty() => SearchView::NoResults,
            LoadingState::Idle => SearchView::Results,
        }
    }

    pub fn columns(&self) -> usize {
        if self.grid {
            SEARCH_GRID_COLUMNS
        } else {
            1
        }
    }

    pub fn row_height(&self) -> u16 {
        if self.grid {
            SEARCH_GRID_ROW
        } else {
            SEARCH_LIST_ROW
        }
    }

    pub fn selected_row(&self) -> usize {
        self.list.selected / self.columns()
    }

    pub fn move_up(&mut self) {
        self.list.selected = self.list.selected.saturating_sub(self.columns());
    }

    pub fn move_down(&mut self) {
        let next = self.list.selected + self.columns();
        if next < self.list.len {
            self.list.selected = next;
        }
    }

    pub fn move_left(&mut self) {
        if self.grid && self.list.selected % SEARCH_GRID_COLUMNS > 0 {
            self.list.selected -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.grid
            && self.list.selected % SEARCH_GRID_COLUMNS + 1 < SEARCH_GRID_COLUMNS
            && self.list.selected + 1 < self.list.len
        {
            self.list.selected += 1;
        }
    }

    pub fn toggle_layout(&mut self) {
        self.grid = !self.grid;
        self.row_offset = 0;
    }

    /// Keep the selected row inside `viewport` lines
    pub fn follow(&mut self, viewport: u16) {
        let visible = usize::from(viewport.saturating_sub(SEARCH_HEADER) / self.row_height());
        self.row_offset = keep_visible(self.row_offset, self.selected_row(), visible);
    }

    pub fn scroll_lines(&self) -> u16 {
        let lines = self.row_offset * usize::from(self.row_height());
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    pub fn suggestion_list(&self) -> Vec<Suggestion<'_>> {
        self.recent
            .iter()
            .map(Suggestion::Recent)
            .chain(self.trending.iter().map(Suggestion::Trending))
            .collect()
    }

    fn sync_suggestions(&mut self) {
        self.suggestions.set_len(self.recent.len() + self.trending.len());
    }

    /// Remember an opened result, newest first
    pub fn record_recent(&mut self, result: &SearchResult, max: usize) {
        self.recent.retain(|r| r.id != result.id);
        self.recent.insert(
            0,
            RecentSearch {
                id: result.id.clone(),
                title: result.title.clone(),
                poster_url: result.poster_url.clone(),
                timestamp: now_millis(),
            },
        );
        self.recent.truncate(max);
        self.sync_suggestions();
    }

    pub fn remove_recent(&mut self, id: &str) {
        self.recent.retain(|r| r.id != id);
        self.sync_suggestions();
    }

    pub fn set_trending(&mut self, trending: Vec<TrendingSearch>) {
        self.trending = trending;
        self.sync_suggestions();
    }
}

// =============================================================================
// Downloads
// =============================================================================

/// Downloads view state
#[derive(Debug, Clone, Default)]
pub struct DownloadsState {
    pub records: Vec<DownloadRecord>,
    pub list: ListState,
    pub smart_downloads: bool,
    pub loading: LoadingState,
}

impl DownloadsState {
    pub fn set_records(&mut self, records: Vec<DownloadRecord>) {
        self.list.set_len(records.len());
        self.records = records;
        self.loading = LoadingState::Idle;
    }

    pub fn selected_record(&self) -> Option<&DownloadRecord> {
        self.records.get(self.list.selected)
    }

    pub fn follow(&mut self, viewport: u16) {
        let visible = viewport.saturating_sub(SMART_DOWNLOADS_HEIGHT) / DOWNLOAD_ROW;
        self.list.scroll_into_view(usize::from(visible));
    }

    pub fn scroll_lines(&self) -> u16 {
        u16::try_from(self.list.offset * usize::from(DOWNLOAD_ROW)).unwrap_or(u16::MAX)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Right-hand side of a settings row
#[derive(Debug, Clone, PartialEq)]
pub enum SettingKind {
    /// On/off switch
    Toggle(bool),
    /// Read-only value with a disclosure arrow
    Value(String),
    /// Tappable row without a value
    Action,
    /// Plain informational value
    Info(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingItem {
    pub section: &'static str,
    pub label: &'static str,
    pub kind: SettingKind,
}

impl SettingItem {
    fn new(section: &'static str, label: &'static str, kind: SettingKind) -> Self {
        Self {
            section,
            label,
            kind,
        }
    }
}

/// Settings view state (never persisted)
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub items: Vec<SettingItem>,
    pub list: ListState,
}

impl Default for SettingsState {
    fn default() -> Self {
        use SettingKind::*;

        const GENERAL: &str = "General";
        const PLAYBACK: &str = "Streaming & Playback";
        const DOWNLOADS: &str = "Downloads";
        const ACCOUNT: &str = "Account & Backup";
        const ABOUT: &str = "About & Support";

        let items = vec![
            SettingItem::new(GENERAL, "Theme", Value("Dark".into())),
            SettingItem::new(GENERAL, "Language", Value("English".into())),
            SettingItem::new(GENERAL, "Default Player", Value("ExoPlayer".into())),
            SettingItem::new(GENERAL, "Default Home Tab", Value("Movies".into())),
            SettingItem::new(PLAYBACK, "Preferred Quality", Value("1080p".into())),
            SettingItem::new(PLAYBACK, "Auto Play Next Episode", Toggle(true)),
            SettingItem::new(PLAYBACK, "Subtitles Settings", Action),
            SettingItem::new(PLAYBACK, "Enable HW Decoder", Toggle(true)),
            SettingItem::new(DOWNLOADS, "Download Path", Value("Internal Storage".into())),
            SettingItem::new(DOWNLOADS, "Max Simultaneous Downloads", Value("2".into())),
            SettingItem::new(DOWNLOADS, "Auto Delete Watched", Toggle(false)),
            SettingItem::new(ACCOUNT, "Trakt Sync", Toggle(false)),
            SettingItem::new(ACCOUNT, "Backup & Restore", Action),
            SettingItem::new(ACCOUNT, "Clear Cache", Action),
            SettingItem::new(ABOUT, "Check for Updates", Action),
            SettingItem::new(ABOUT, "Report a Bug", Action),
            SettingItem::new(ABOUT, "Privacy Policy & Terms", Action),
            SettingItem::new(ABOUT, "App Version", Info(env!("CARGO_PKG_VERSION").into())),
        ];

        Self {
            list: ListState::new(items.len()),
            items,
        }
    }
}

impl SettingsState {
    /// Flip the selected switch. Returns the new value if it was one.
    pub fn toggle_selected(&mut self) -> Option<bool> {
        let item = self.items.get_mut(self.list.selected)?;
        match &mut item.kind {
            SettingKind::Toggle(on) => {
                *on = !*on;
                debug!(setting = item.label, enabled = *on, "setting toggled");
                Some(*on)
            }
            _ => None,
        }
    }

    /// Current value of a switch by label
    pub fn is_enabled(&self, label: &str) -> Option<bool> {
        self.items.iter().find(|i| i.label == label).and_then(|i| match i.kind {
            SettingKind::Toggle(on) => Some(on),
            _ => None,
        })
    }

    /// Items grouped by section, in order
    pub fn sections(&self) -> Vec<(&'static str, Vec<(usize, &SettingItem)>)> {
        let mut out: Vec<(&'static str, Vec<(usize, &SettingItem)>)> = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            match out.last_mut() {
                Some((section, rows)) if *section == item.section => rows.push((i, item)),
                _ => out.push((item.section, vec![(i, item)])),
            }
        }
        out
    }

    /// Rendered line of item `index`, counting a header and gap per section
    pub fn line_of(&self, index: usize) -> usize {
        let mut line = 0;
        let mut current: Option<&str> = None;
        for (i, item) in self.items.iter().enumerate() {
            if current != Some(item.section) {
                if current.is_some() {
                    line += 1;
                }
                line += 1;
                current = Some(item.section);
            }
            if i == index {
                return line;
            }
            line += 1;
        }
        line
    }

    pub fn follow(&mut self, viewport: u16) {
        let line = self.line_of(self.list.selected);
        self.list.offset = keep_visible(self.list.offset, line, usize::from(viewport));
    }

    pub fn scroll_lines(&self) -> u16 {
        u16::try_from(self.list.offset).unwrap_or(u16::MAX)
    }
}

// =============================================================================
// Movie Detail
// =============================================================================

/// Collapsed overview shows this many lines
pub const COLLAPSED_OVERVIEW_LINES: u16 = 3;

/// Detail view state
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub id: String,
    pub detail: Option<MovieDetail>,
    pub is_favorite: bool,
    pub expanded: bool,
    /// First visible line
    pub scroll: u16,
    pub loading: LoadingState,
}

impl DetailState {
    pub fn loading(id: &str) -> Self {
        Self {
            id: id.to_string(),
            loading: LoadingState::Loading(Some("Loading details...".into())),
            ..Self::default()
        }
    }

    pub fn set_detail(&mut self, detail: MovieDetail) {
        self.detail = Some(detail);
        self.loading = LoadingState::Idle;
    }

    pub fn title(&self) -> &str {
        self.detail.as_ref().map(|d| d.title.as_str()).unwrap_or("DETAIL")
    }

    /// Estimated page height in lines for a given width
    pub fn content_height(&self, width: u16) -> u16 {
        let overview = match (&self.detail, self.expanded) {
            (Some(d), true) => {
                let width = usize::from(width.max(20));
                u16::try_from(d.description.chars().count() / width + 1).unwrap_or(u16::MAX)
            }
            _ => COLLAPSED_OVERVIEW_LINES,
        };
        // poster + title/meta/genres + overview label + overview + cast + actions
        8 + 4 + 1 + overview + 5 + 3
    }

    pub fn scroll_by(&mut self, delta: i32, viewport: u16, width: u16) {
        let max = self.content_height(width).saturating_sub(viewport);
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(max));
        self.scroll = u16::try_from(next).unwrap_or(0);
    }
}

// =============================================================================
// Pending Work
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Detail(String),
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
pub struct App {
    /// Current screen
    pub route: Route,
    /// Navigation history stack
    pub nav_stack: Vec<Route>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Global error message
    pub error: Option<String>,
    /// Transient confirmation message
    pub notice: Option<String>,

    // View-specific states
    pub home: HomeState,
    pub search: SearchState,
    pub downloads: DownloadsState,
    pub settings: SettingsState,
    pub detail: DetailState,

    /// Content area size in rows/columns
    pub viewport: u16,
    pub viewport_width: u16,

    catalog: Arc<dyn CatalogService>,
    download_manager: Arc<dyn DownloadManager>,
    debounced: DebouncedSearch,
    nav_bar: ScrollVisibilityController,
    pose_rx: watch::Receiver<BarPose>,
    pending: Vec<Pending>,
    max_recent: usize,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("route", &self.route)
            .field("nav_stack", &self.nav_stack)
            .field("running", &self.running)
            .field("input_mode", &self.input_mode)
            .field("error", &self.error)
            .field("search", &self.search.query)
            .field("debounced", &self.debounced)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create an App backed by the in-memory services
    pub fn new(config: &Config) -> Result<Self, MotionError> {
        let catalog = Arc::new(InMemoryCatalog::with_latency(config.search.latency()));
        let downloads = Arc::new(InMemoryDownloads::new());
        Self::with_services(config, catalog, downloads)
    }

    /// Create an App with explicit collaborators
    pub fn with_services(
        config: &Config,
        catalog: Arc<dyn CatalogService>,
        download_manager: Arc<dyn DownloadManager>,
    ) -> Result<Self, MotionError> {
        let nav_bar = ScrollVisibilityController::new(config.nav_bar)?;
        let pose_rx = nav_bar.subscribe();
        let debounced = DebouncedSearch::new(Arc::clone(&catalog), config.search.debounce());

        Ok(Self {
            route: Route::Home,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            notice: None,

            home: HomeState::default(),
            search: SearchState::default(),
            downloads: DownloadsState::default(),
            settings: SettingsState::default(),
            detail: DetailState::default(),

            viewport: 20,
            viewport_width: 80,

            catalog,
            download_manager,
            debounced,
            nav_bar,
            pose_rx,
            pending: Vec::new(),
            max_recent: config.search.max_recent,
        })
    }

    // -------------------------------------------------------------------------
    // Data Loading
    // -------------------------------------------------------------------------

    /// Fetch everything the tab screens show
    pub async fn load(&mut self) {
        self.home.loading = LoadingState::Loading(None);
        match Self::fetch_home(self.catalog.as_ref()).await {
            Ok((featured, top, watching, upcoming)) => {
                self.home.featured = Some(featured);
                self.home.top_movies = top;
                self.home.continue_watching = watching;
                self.home.upcoming = upcoming;
                self.home.loading = LoadingState::Idle;
            }
            Err(e) => {
                warn!(error = %e, "home load failed");
                self.home.loading = LoadingState::Error(e.to_string());
            }
        }

        match self.catalog.trending_searches().await {
            Ok(trending) => self.search.set_trending(trending),
            Err(e) => warn!(error = %e, "trending searches unavailable"),
        }

        self.downloads.loading = LoadingState::Loading(None);
        match self.download_manager.list().await {
            Ok(records) => self.downloads.set_records(records),
            Err(e) => {
                warn!(error = %e, "downloads load failed");
                self.downloads.loading = LoadingState::Error(e.to_string());
            }
        }
    }

    async fn fetch_home(
        catalog: &dyn CatalogService,
    ) -> Result<
        (
            FeaturedMovie,
            Vec<MovieSummary>,
            Vec<WatchProgress>,
            Vec<MovieSummary>,
        ),
        CatalogError,
    > {
        let featured = catalog.featured().await?;
        let top = catalog.top_movies().await?;
        let watching = catalog.continue_watching().await?;
        let upcoming = catalog.upcoming().await?;
        Ok((featured, top, watching, upcoming))
    }

    /// Run queued lookups (movie details)
    pub async fn process_pending(&mut self) {
        for task in std::mem::take(&mut self.pending) {
            match task {
                Pending::Detail(id) => self.load_detail(&id).await,
            }
        }
    }

    async fn load_detail(&mut self, id: &str) {
        let catalog = Arc::clone(&self.catalog);
        let result = catalog.movie_detail(id).await;
        if self.detail.id != id {
            return;
        }
        match result {
            Ok(detail) => self.detail.set_detail(detail),
            Err(e) => {
                warn!(id, error = %e, "detail lookup failed");
                self.detail.loading = LoadingState::Error(e.to_string());
                self.set_error(e.to_string());
            }
        }
    }

    // -------------------------------------------------------------------------
    // Frame Updates
    // -------------------------------------------------------------------------

    /// Advance animations and apply finished searches
    pub fn tick(&mut self, dt: Duration) {
        self.nav_bar.tick(dt);
        while let Some(outcome) = self.debounced.try_next() {
            self.apply_search_outcome(outcome);
        }
    }

    /// Wait for the pending search to finish and apply it
    pub async fn wait_for_search(&mut self) {
        if !self.debounced.is_loading() {
            return;
        }
        if let Some(outcome) = self.debounced.next().await {
            self.apply_search_outcome(outcome);
        }
    }

    fn apply_search_outcome(&mut self, outcome: SearchOutcome) {
        debug!(query = %outcome.query, "search outcome applied");
        match outcome.result {
            Ok(results) => {
                self.search.set_results(results);
                self.search.loading = LoadingState::Idle;
            }
            Err(e) => {
                self.search.set_results(Filtered::Empty);
                self.search.loading = LoadingState::Error(e.to_string());
            }
        }
        // new results start at the top
        if self.route == Route::Search {
            self.rebase_scroll();
        }
    }

    /// Pose most recently published for the nav bar
    pub fn bar_pose(&self) -> BarPose {
        *self.pose_rx.borrow()
    }

    pub fn nav_bar(&self) -> &ScrollVisibilityController {
        &self.nav_bar
    }

    /// Update content area size
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport = height.max(1);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to a route; tabs replace each other, other screens stack
    pub fn navigate(&mut self, route: Route) {
        self.input_mode = InputMode::Normal;
        if self.route == route {
            return;
        }

        debug!(from = %self.route, to = %route, "navigate");
        if route.is_tab() {
            if !self.route.is_tab() {
                self.nav_stack.clear();
            }
            self.route = route;
        } else {
            let previous = std::mem::replace(&mut self.route, route);
            self.nav_stack.push(previous);
        }

        if let Route::MovieDetails { id } = &self.route {
            self.detail = DetailState::loading(id);
            self.pending.push(Pending::Detail(id.clone()));
        }

        self.rebase_scroll();
    }

    /// Navigate to a path like `/movie-details?id=2`
    pub fn open_path(&mut self, path: &str) -> Result<(), crate::route::RouteError> {
        let route = Route::parse(path)?;
        self.navigate(route);
        Ok(())
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        // If in editing mode, exit editing first
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            self.route = prev;
            self.rebase_scroll();
            true
        } else {
            false
        }
    }

    /// Switch to the tab at `index` in nav bar order
    pub fn select_tab(&mut self, index: usize) -> bool {
        if !self.route.is_tab() {
            return false;
        }
        match Route::TABS.get(index) {
            Some(tab) => {
                self.navigate(tab.clone());
                true
            }
            None => false,
        }
    }

    fn cycle_tab(&mut self, forward: bool) -> bool {
        let Some(current) = self.route.tab_index() else {
            return false;
        };
        let n = Route::TABS.len();
        let next = if forward {
            (current + 1) % n
        } else {
            (current + n - 1) % n
        };
        self.select_tab(next)
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        if self.route.is_tab() {
            self.navigate(Route::Search);
            self.input_mode = InputMode::Editing;
        }
    }

    // -------------------------------------------------------------------------
    // Scroll Feed
    // -------------------------------------------------------------------------

    /// First visible content line of the active screen
    pub fn scroll_lines(&self) -> u16 {
        match &self.route {
            Route::Home => self.home.scroll_lines(self.viewport),
            Route::Search => self.search.scroll_lines(),
            Route::Downloads => self.downloads.scroll_lines(),
            Route::Settings => self.settings.scroll_lines(),
            Route::MovieDetails { .. } => self.detail.scroll,
            Route::Player => 0,
        }
    }

    fn scroll_units(&self) -> f32 {
        f32::from(self.scroll_lines()) * self.nav_bar.config().units_per_line
    }

    fn sync_scroll(&mut self) {
        let y = self.scroll_units();
        self.nav_bar.on_scroll(y);
    }

    fn rebase_scroll(&mut self) {
        let y = self.scroll_units();
        self.nav_bar.rebase(y);
    }

    fn follow_selection(&mut self) {
        let viewport = self.viewport;
        match self.route {
            Route::Search => self.search.follow(viewport),
            Route::Downloads => self.downloads.follow(viewport),
            Route::Settings => self.settings.follow(viewport),
            _ => {}
        }
    }

    // -------------------------------------------------------------------------
    // Search Driving
    // -------------------------------------------------------------------------

    fn query_changed(&mut self) {
        if self.search.query.is_empty() {
            self.debounced.clear();
            self.search.set_results(Filtered::Empty);
            self.search.loading = LoadingState::Idle;
        } else {
            self.debounced.submit(&self.search.query);
            self.search.loading = LoadingState::Loading(None);
        }
    }

    /// Clear the query and any pending search
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.query_changed();
    }

    fn open_selected_result(&mut self) -> bool {
        let Some(result) = self.search.selected_result().cloned() else {
            return false;
        };
        self.search.record_recent(&result, self.max_recent);
        self.navigate(Route::movie(result.id));
        true
    }

    fn pick_suggestion(&mut self) -> bool {
        let title = match self.search.suggestion_list().get(self.search.suggestions.selected) {
            Some(s) => s.title().to_string(),
            None => return false,
        };
        self.search.set_query(&title);
        self.query_changed();
        true
    }

    // -------------------------------------------------------------------------
    // Mouse Event Handling
    // -------------------------------------------------------------------------

    /// Handle mouse event, returns true if event was consumed
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let down = match mouse.kind {
            MouseEventKind::ScrollDown => true,
            MouseEventKind::ScrollUp => false,
            _ => return false,
        };

        let consumed = match self.route {
            Route::Home => {
                if down {
                    self.home.down()
                } else {
                    self.home.up()
                }
                true
            }
            Route::Search if self.search.view() == SearchView::Results => {
                if down {
                    self.search.move_down()
                } else {
                    self.search.move_up()
                }
                true
            }
            Route::Downloads => {
                if down {
                    self.downloads.list.down()
                } else {
                    self.downloads.list.up()
                }
                true
            }
            Route::Settings => {
                if down {
                    self.settings.list.down()
                } else {
                    self.settings.list.up()
                }
                true
            }
            Route::MovieDetails { .. } => {
                let delta = i32::from(WHEEL_LINES);
                let (viewport, width) = (self.viewport, self.viewport_width);
                self.detail
                    .scroll_by(if down { delta } else { -delta }, viewport, width);
                true
            }
            _ => false,
        };

        if consumed {
            self.follow_selection();
            self.sync_scroll();
        }
        consumed
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear messages on any keypress
        self.error = None;
        self.notice = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        let route_before = self.route.clone();

        // Route to appropriate handler based on mode and state
        let consumed = if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        };

        if self.route == route_before {
            self.follow_selection();
            self.sync_scroll();
        }
        consumed
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_search();
                true
            }
            KeyCode::Char(c) => {
                self.search.insert(c);
                self.query_changed();
                true
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.query_changed();
                true
            }
            KeyCode::Delete => {
                self.search.delete();
                self.query_changed();
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        // Global shortcuts
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') => {
                self.focus_search();
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                return self.select_tab(idx);
            }
            KeyCode::Tab => return self.cycle_tab(true),
            KeyCode::BackTab => return self.cycle_tab(false),
            _ => {}
        }

        // State-specific handling
        match &self.route {
            Route::Home => self.handle_home_key(key),
            Route::Search => self.handle_search_key(key),
            Route::Downloads => self.handle_downloads_key(key),
            Route::Settings => self.handle_settings_key(key),
            Route::MovieDetails { .. } => self.handle_detail_key(key),
            Route::Player => false,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.home.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.home.down();
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.home.left();
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.home.right();
                true
            }
            KeyCode::Enter => match self.home.selected_movie_id().map(str::to_string) {
                Some(id) => {
                    self.navigate(Route::movie(id));
                    true
                }
                None if self.home.focused() == HomeSection::Hero => {
                    self.navigate(Route::Player);
                    true
                }
                None => false,
            },
            KeyCode::Char('p') if self.home.focused() == HomeSection::Hero => {
                self.navigate(Route::Player);
                true
            }
            KeyCode::Char('f') if self.home.focused() == HomeSection::Hero => {
                self.notice = Some("Added to favorites!".into());
                true
            }
            _ => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('x') => {
                self.clear_search();
                true
            }
            KeyCode::Char('g') => {
                self.search.toggle_layout();
                true
            }
            _ if self.search.view() == SearchView::Suggestions => {
                self.handle_suggestions_key(key)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.move_up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.move_down();
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.search.move_left();
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.search.move_right();
                true
            }
            KeyCode::Home => {
                self.search.list.first();
                true
            }
            KeyCode::End => {
                self.search.list.last();
                true
            }
            KeyCode::Enter => self.open_selected_result(),
            _ => false,
        }
    }

    fn handle_suggestions_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.suggestions.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.suggestions.down();
                true
            }
            KeyCode::Enter => self.pick_suggestion(),
            KeyCode::Char('d') => {
                let id = match self.search.suggestion_list().get(self.search.suggestions.selected)
                {
                    Some(Suggestion::Recent(r)) => r.id.clone(),
                    _ => return false,
                };
                self.search.remove_recent(&id);
                true
            }
            _ => false,
        }
    }

    fn handle_downloads_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.downloads.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.downloads.list.down();
                true
            }
            KeyCode::Char('s') => {
                self.downloads.smart_downloads = !self.downloads.smart_downloads;
                true
            }
            KeyCode::Enter if self.downloads.selected_record().is_some() => {
                self.navigate(Route::Player);
                true
            }
            _ => false,
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.settings.list.down();
                true
            }
            KeyCode::PageUp => {
                self.settings.list.page_up(5);
                true
            }
            KeyCode::PageDown => {
                self.settings.list.page_down(5);
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.settings.toggle_selected().is_some(),
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        let (viewport, width) = (self.viewport, self.viewport_width);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail.scroll_by(-1, viewport, width);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail.scroll_by(1, viewport, width);
                true
            }
            KeyCode::PageUp => {
                self.detail.scroll_by(-i32::from(viewport / 2), viewport, width);
                true
            }
            KeyCode::PageDown => {
                self.detail.scroll_by(i32::from(viewport / 2), viewport, width);
                true
            }
            KeyCode::Char('f') => {
                self.detail.is_favorite = !self.detail.is_favorite;
                true
            }
            KeyCode::Char('e') => {
                self.detail.expanded = !self.detail.expanded;
                true
            }
            KeyCode::Enter | KeyCode::Char('p') if self.detail.detail.is_some() => {
                self.navigate(Route::Player);
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::ScrollDirection;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn settle(app: &mut App) {
        for _ in 0..300 {
            app.tick(Duration::from_millis(16));
        }
    }

    fn app() -> App {
        App::new(&Config::default()).unwrap()
    }

    async fn loaded_app() -> App {
        let mut app = app();
        app.load().await;
        app
    }

    // -------------------------------------------------------------------------
    // ListState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(5);
        list.down();
        list.down();
        list.down();
        list.down();
        assert_eq!(list.selected, 4);

        // Can't go past end
        list.down();
        assert_eq!(list.selected, 4);

        list.up();
        assert_eq!(list.selected, 3);

        list.first();
        assert_eq!(list.selected, 0);

        list.last();
        assert_eq!(list.selected, 4);
    }

    #[test]
    fn test_list_state_empty() {
        let mut list = ListState::new(0);
        list.down();
        assert_eq!(list.selected, 0);
        list.up();
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_list_state_set_len() {
        let mut list = ListState::new(10);
        list.selected = 8;

        // Shrinking should clamp selection
        list.set_len(5);
        assert_eq!(list.selected, 4);

        // Growing shouldn't change selection
        list.set_len(10);
        assert_eq!(list.selected, 4);
    }

    #[test]
    fn test_keep_visible() {
        assert_eq!(keep_visible(0, 2, 5), 0);
        assert_eq!(keep_visible(0, 5, 5), 1);
        assert_eq!(keep_visible(3, 1, 5), 1);
        assert_eq!(keep_visible(0, 4, 0), 4);
    }

    // -------------------------------------------------------------------------
    // SearchState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_search_state_editing() {
        let mut search = SearchState::default();
        for c in "hello".chars() {
            search.insert(c);
        }
        assert_eq!(search.query, "hello");
        assert_eq!(search.cursor, 5);

        search.cursor_left();
        search.cursor_left();
        search.insert('X');
        assert_eq!(search.query, "helXlo");

        search.backspace();
        assert_eq!(search.query, "hello");

        search.cursor_home();
        search.delete();
        assert_eq!(search.query, "ello");
    }

    #[test]
    fn test_search_state_multibyte_cursor() {
        let mut search = SearchState::default();
        search.set_query("Joker: Folie à Deux");
        search.cursor_left();
        search.cursor_left();
        search.cursor_left();
        search.cursor_left();
        search.cursor_left();
        search.backspace();
        assert_eq!(search.query, "Joker: Folie  Deux");
    }

    #[test]
    fn test_search_view_states() {
        let mut search = SearchState::default();
        assert_eq!(search.view(), SearchView::Suggestions);

        search.set_query("dark");
        search.loading = LoadingState::Loading(None);
        assert_eq!(search.view(), SearchView::Loading);

        search.loading = LoadingState::Idle;
        assert_eq!(search.view(), SearchView::NoResults);
    }

    #[test]
    fn test_recent_searches_dedupe_and_bound() {
        let mut search = SearchState::default();
        let results = crate::api::fixtures::search_index();
        search.record_recent(&results[0], 2);
        search.record_recent(&results[1], 2);
        search.record_recent(&results[0], 2);
        assert_eq!(search.recent.len(), 2);
        assert_eq!(search.recent[0].id, results[0].id);

        search.remove_recent(&results[0].id);
        assert_eq!(search.recent.len(), 1);
    }

    #[test]
    fn test_grid_navigation() {
        let mut search = SearchState::default();
        search.set_results(Filtered::from_vec(
            crate::api::fixtures::search_index()
                .into_iter()
                .cycle()
                .take(5)
                .collect(),
        ));
        search.move_right();
        assert_eq!(search.list.selected, 1);
        search.move_right();
        assert_eq!(search.list.selected, 1);
        search.move_down();
        assert_eq!(search.list.selected, 3);
        search.move_down();
        assert_eq!(search.list.selected, 3);
        search.move_left();
        search.move_down();
        assert_eq!(search.list.selected, 4);
        assert_eq!(search.selected_row(), 2);
    }

    // -------------------------------------------------------------------------
    // Settings Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_settings_toggle() {
        let mut settings = SettingsState::default();
        let idx = settings
            .items
            .iter()
            .position(|i| i.label == "Trakt Sync")
            .unwrap();
        settings.list.selected = idx;
        assert_eq!(settings.toggle_selected(), Some(true));
        assert_eq!(settings.is_enabled("Trakt Sync"), Some(true));

        settings.list.selected = 0;
        assert_eq!(settings.toggle_selected(), None);
    }

    #[test]
    fn test_settings_sections_and_lines() {
        let settings = SettingsState::default();
        let sections = settings.sections();
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].0, "General");
        // header line precedes the first item
        assert_eq!(settings.line_of(0), 1);
        // 4 general items, gap, header
        assert_eq!(settings.line_of(4), 7);
    }

    // -------------------------------------------------------------------------
    // Navigation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tabs_replace_details_push() {
        let mut app = app();
        app.navigate(Route::Downloads);
        assert_eq!(app.route, Route::Downloads);
        assert!(app.nav_stack.is_empty());

        app.navigate(Route::movie("1"));
        assert_eq!(app.nav_stack, vec![Route::Downloads]);

        assert!(app.back());
        assert_eq!(app.route, Route::Downloads);
        assert!(!app.back());
    }

    #[test]
    fn test_number_keys_select_tabs() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.route, Route::Downloads);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.route, Route::Settings);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.route, Route::Home);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.route, Route::Settings);
    }

    #[test]
    fn test_tab_keys_ignored_off_tabs() {
        let mut app = app();
        app.navigate(Route::Player);
        assert!(!app.handle_key(key(KeyCode::Char('2'))));
        assert_eq!(app.route, Route::Player);
    }

    #[test]
    fn test_app_quit_key() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_app_quit_ctrl_c() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_open_path() {
        let mut app = app();
        app.open_path("/movie-details?id=4").unwrap();
        assert_eq!(app.route, Route::movie("4"));
        assert!(app.detail.loading.is_loading());
        assert!(app.open_path("/bogus").is_err());
    }

    // -------------------------------------------------------------------------
    // Async Flow Tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_load_populates_screens() {
        let app = loaded_app().await;
        assert_eq!(app.home.top_movies.len(), 3);
        assert_eq!(app.home.continue_watching.len(), 3);
        assert_eq!(app.downloads.records.len(), 2);
        assert_eq!(app.search.trending.len(), 2);
    }

    #[tokio::test]
    async fn test_home_enter_opens_detail() {
        let mut app = loaded_app().await;
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.route, Route::movie("2"));

        app.process_pending().await;
        assert_eq!(app.detail.title(), "The Dark Knight");
    }

    #[tokio::test]
    async fn test_unknown_detail_sets_error() {
        let mut app = loaded_app().await;
        app.navigate(Route::movie("404"));
        app.process_pending().await;
        assert!(app.detail.loading.is_error());
        assert!(app.error.is_some());
    }

    #[tokio::test]
    async fn test_hero_favorite_notice() {
        let mut app = loaded_app().await;
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.notice.as_deref(), Some("Added to favorites!"));
        app.handle_key(key(KeyCode::Down));
        assert!(app.notice.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_runs_one_search() {
        let mut app = loaded_app().await;
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "dark".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.search.view(), SearchView::Loading);

        app.wait_for_search().await;
        assert_eq!(app.search.view(), SearchView::Results);
        assert_eq!(app.search.result_slice().len(), 1);
        assert_eq!(app.search.result_slice()[0].title, "The Dark Knight");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_results_reset_scroll_origin() {
        let index = ["Alien", "Aliens", "Alien 3"]
            .iter()
            .enumerate()
            .map(|(i, title)| SearchResult {
                id: i.to_string(),
                title: title.to_string(),
                year: "1979".into(),
                poster_url: String::new(),
                rating: 8.0,
                genres: vec![],
            })
            .collect();
        let catalog = InMemoryCatalog::new().with_index(index);
        let mut app = App::with_services(
            &Config::default(),
            Arc::new(catalog),
            Arc::new(InMemoryDownloads::empty()),
        )
        .unwrap();
        // one list row visible
        app.set_viewport(80, 4);

        app.focus_search();
        for c in "ali".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.wait_for_search().await;
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('g')));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.search.row_offset, 1);
        assert_eq!(app.nav_bar().last_offset(), 72.0);
        assert_eq!(app.nav_bar().direction(), ScrollDirection::Down);

        app.focus_search();
        app.handle_key(key(KeyCode::Char('e')));
        app.wait_for_search().await;
        assert_eq!(app.search.row_offset, 0);
        assert_eq!(app.nav_bar().last_offset(), 0.0);

        // the next scroll is measured from the top of the new results
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.nav_bar().last_offset(), 72.0);
        assert_eq!(app.nav_bar().direction(), ScrollDirection::Down);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_result_records_recent() {
        let mut app = loaded_app().await;
        app.focus_search();
        for c in "inc".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.wait_for_search().await;

        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.route, Route::movie("1"));
        assert_eq!(app.search.recent.len(), 1);
        assert_eq!(app.search.recent[0].title, "Inception");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_shows_suggestions() {
        let mut app = loaded_app().await;
        app.focus_search();
        app.handle_key(key(KeyCode::Char('z')));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.search.view(), SearchView::Suggestions);
        assert!(!app.search.loading.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trending_suggestion_fills_query() {
        let mut app = loaded_app().await;
        app.navigate(Route::Search);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.search.query, "Dune: Part Two");
        assert!(app.search.loading.is_loading());
    }

    // -------------------------------------------------------------------------
    // Scroll Feed Tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_scrolling_home_hides_and_shows_bar() {
        let mut app = loaded_app().await;
        app.set_viewport(80, 10);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.nav_bar().direction(), ScrollDirection::Down);
        for _ in 0..200 {
            app.tick(Duration::from_millis(16));
        }
        assert!(app.bar_pose().translate_y > 80.0);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.nav_bar().direction(), ScrollDirection::Up);
        for _ in 0..200 {
            app.tick(Duration::from_millis(16));
        }
        assert_eq!(app.bar_pose(), BarPose::VISIBLE);
    }

    #[tokio::test]
    async fn test_switching_to_unscrolled_tab_reveals_bar() {
        let mut app = loaded_app().await;
        app.set_viewport(80, 20);
        app.handle_mouse(wheel(MouseEventKind::ScrollDown));
        app.handle_mouse(wheel(MouseEventKind::ScrollDown));
        settle(&mut app);
        assert!(app.bar_pose().translate_y > 80.0);

        // Downloads never scrolls, so only the tab switch can bring the bar back
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.route, Route::Downloads);
        assert_eq!(app.nav_bar().direction(), ScrollDirection::Up);
        assert_eq!(app.nav_bar().last_offset(), 0.0);
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down));
            app.handle_mouse(wheel(MouseEventKind::ScrollUp));
        }
        settle(&mut app);
        assert_eq!(app.bar_pose(), BarPose::VISIBLE);

        // back onto the scrolled home page: origin moves, no delta evaluated
        app.handle_key(key(KeyCode::Char('1')));
        assert!(app.nav_bar().last_offset() > 0.0);
        assert_eq!(app.nav_bar().direction(), ScrollDirection::Up);
        settle(&mut app);
        assert_eq!(app.bar_pose(), BarPose::VISIBLE);
    }

    #[tokio::test]
    async fn test_settings_toggle_key() {
        let mut app = loaded_app().await;
        app.navigate(Route::Settings);
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.settings.list.selected, 5);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.settings.is_enabled("Auto Play Next Episode"), Some(false));
    }

    #[tokio::test]
    async fn test_downloads_smart_toggle() {
        let mut app = loaded_app().await;
        app.navigate(Route::Downloads);
        assert!(!app.downloads.smart_downloads);
        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.downloads.smart_downloads);
    }
}
