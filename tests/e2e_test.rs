//! End-to-end flow tests
//!
//! Drives the App with key and mouse events the way the event loop does:
//! Home -> Search -> Detail -> Player and back, with the nav bar reacting
//! to scrolling along the way.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use reeltui::api::{CatalogError, CatalogService, InMemoryCatalog, InMemoryDownloads};
use reeltui::app::{App, InputMode, SearchView};
use reeltui::config::Config;
use reeltui::models::{
    FeaturedMovie, MovieDetail, MovieSummary, SearchResult, TrendingSearch, WatchProgress,
};
use reeltui::motion::BarPose;
use reeltui::route::Route;

// =============================================================================
// Helpers
// =============================================================================

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn wheel(kind: MouseEventKind) -> MouseEvent {
    MouseEvent {
        kind,
        column: 10,
        row: 10,
        modifiers: KeyModifiers::empty(),
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn settle(app: &mut App) {
    for _ in 0..300 {
        app.tick(Duration::from_millis(16));
    }
}

async fn loaded_app() -> App {
    let mut app = App::new(&Config::default()).unwrap();
    app.set_viewport(80, 20);
    app.load().await;
    app
}

// =============================================================================
// Journeys
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_search_to_detail_to_player_and_back() {
    let mut app = loaded_app().await;
    assert_eq!(app.route, Route::Home);

    // "/" jumps into the search box
    app.handle_key(key(KeyCode::Char('/')));
    assert_eq!(app.route, Route::Search);
    assert_eq!(app.input_mode, InputMode::Editing);

    type_text(&mut app, "Inc");
    assert_eq!(app.search.view(), SearchView::Loading);
    app.wait_for_search().await;
    assert_eq!(app.search.view(), SearchView::Results);
    assert_eq!(app.search.result_slice()[0].title, "Inception");

    // leave the box, open the hit
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.input_mode, InputMode::Normal);
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.route, Route::movie("1"));
    assert_eq!(app.search.recent[0].title, "Inception");

    app.process_pending().await;
    assert_eq!(app.detail.title(), "Inception");
    assert_eq!(app.detail.detail.as_ref().map(|d| d.cast.len()), Some(3));

    app.handle_key(key(KeyCode::Char('p')));
    assert_eq!(app.route, Route::Player);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.route, Route::movie("1"));
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.route, Route::Search);
    // the query survives the round trip
    assert_eq!(app.search.query, "Inc");
}

#[tokio::test(start_paused = true)]
async fn test_recent_search_suggestion_reruns_query() {
    let mut app = loaded_app().await;
    app.focus_search();
    type_text(&mut app, "dark");
    app.wait_for_search().await;
    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Enter));
    app.process_pending().await;
    app.handle_key(key(KeyCode::Esc));

    // clear the box and pick the recent entry
    app.handle_key(key(KeyCode::Char('x')));
    assert_eq!(app.search.view(), SearchView::Suggestions);
    assert_eq!(app.search.recent.len(), 1);
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.search.query, "The Dark Knight");
    app.wait_for_search().await;
    assert_eq!(app.search.result_slice().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tabs_by_number_and_cycle() {
    let mut app = loaded_app().await;
    app.handle_key(key(KeyCode::Char('3')));
    assert_eq!(app.route, Route::Downloads);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.route, Route::Settings);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.route, Route::Home);
    app.handle_key(key(KeyCode::BackTab));
    assert_eq!(app.route, Route::Settings);
    // tabs never stack
    assert!(app.nav_stack.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_start_route_from_path() {
    let mut app = loaded_app().await;
    app.open_path("/movie-details?id=2").unwrap();
    app.process_pending().await;
    assert_eq!(app.detail.title(), "The Dark Knight");
    assert!(app.open_path("/nowhere").is_err());
}

#[tokio::test(start_paused = true)]
async fn test_settings_toggle_roundtrip() {
    let mut app = loaded_app().await;
    app.navigate(Route::Settings);
    let before = app.settings.is_enabled("Auto Play Next Episode").unwrap();
    for _ in 0..5 {
        app.handle_key(key(KeyCode::Down));
    }
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.settings.is_enabled("Auto Play Next Episode"), Some(!before));
    app.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(app.settings.is_enabled("Auto Play Next Episode"), Some(before));
}

// =============================================================================
// Nav Bar Reacting To Scroll
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_wheel_hides_bar_and_settings_scroll_restores() {
    let mut app = loaded_app().await;
    assert_eq!(app.bar_pose(), BarPose::VISIBLE);

    app.handle_mouse(wheel(MouseEventKind::ScrollDown));
    app.handle_mouse(wheel(MouseEventKind::ScrollDown));
    settle(&mut app);
    assert!(app.bar_pose().translate_y > 80.0);

    // settings opens at the top, so the bar comes back
    app.handle_key(key(KeyCode::Char('4')));
    assert_eq!(app.route, Route::Settings);
    settle(&mut app);
    assert_eq!(app.bar_pose(), BarPose::VISIBLE);

    // scrolling the long settings list hides it again, scrolling up restores it
    for _ in 0..17 {
        app.handle_key(key(KeyCode::Down));
    }
    settle(&mut app);
    assert!(app.bar_pose().translate_y > 80.0);
    for _ in 0..17 {
        app.handle_key(key(KeyCode::Up));
    }
    settle(&mut app);
    assert_eq!(app.bar_pose(), BarPose::VISIBLE);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_bar_returns_on_downloads() {
    let mut app = loaded_app().await;
    app.handle_mouse(wheel(MouseEventKind::ScrollDown));
    app.handle_mouse(wheel(MouseEventKind::ScrollDown));
    settle(&mut app);
    assert!(app.bar_pose().translate_y > 80.0);

    // two records never scroll, so input there cannot move the bar
    app.handle_key(key(KeyCode::Char('3')));
    for _ in 0..15 {
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Up));
        app.handle_mouse(wheel(MouseEventKind::ScrollDown));
        app.handle_mouse(wheel(MouseEventKind::ScrollUp));
    }
    settle(&mut app);
    assert_eq!(app.nav_bar().last_offset(), 0.0);
    assert_eq!(app.bar_pose(), BarPose::VISIBLE);
}

#[tokio::test(start_paused = true)]
async fn test_detail_wheel_scrolls_page() {
    let mut app = loaded_app().await;
    app.set_viewport(40, 8);
    app.navigate(Route::movie("1"));
    app.process_pending().await;

    app.handle_mouse(wheel(MouseEventKind::ScrollDown));
    assert!(app.detail.scroll > 0);
    app.handle_mouse(wheel(MouseEventKind::ScrollUp));
    assert_eq!(app.detail.scroll, 0);
}

// =============================================================================
// Failing Backend
// =============================================================================

#[derive(Debug)]
struct OfflineCatalog;

#[async_trait::async_trait]
impl CatalogService for OfflineCatalog {
    async fn featured(&self) -> Result<FeaturedMovie, CatalogError> {
        Err(CatalogError::Unavailable("offline".into()))
    }
    async fn top_movies(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        Err(CatalogError::Unavailable("offline".into()))
    }
    async fn continue_watching(&self) -> Result<Vec<WatchProgress>, CatalogError> {
        Err(CatalogError::Unavailable("offline".into()))
    }
    async fn upcoming(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        Err(CatalogError::Unavailable("offline".into()))
    }
    async fn trending_searches(&self) -> Result<Vec<TrendingSearch>, CatalogError> {
        Err(CatalogError::Unavailable("offline".into()))
    }
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        Err(CatalogError::Unavailable("offline".into()))
    }
    async fn movie_detail(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        Err(CatalogError::NotFound(id.to_string()))
    }
}

#[tokio::test(start_paused = true)]
async fn test_offline_catalog_surfaces_errors() {
    let config = Config::default();
    let mut app = App::with_services(
        &config,
        Arc::new(OfflineCatalog),
        Arc::new(InMemoryDownloads::new()),
    )
    .unwrap();
    app.load().await;
    assert!(app.home.loading.is_error());
    // downloads come from a separate service
    assert_eq!(app.downloads.records.len(), 2);

    app.focus_search();
    type_text(&mut app, "dark");
    app.wait_for_search().await;
    assert!(matches!(app.search.view(), SearchView::Error(_)));
}

#[tokio::test(start_paused = true)]
async fn test_catalog_is_shared_with_services() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let mut app = App::with_services(
        &Config::default(),
        catalog.clone(),
        Arc::new(InMemoryDownloads::empty()),
    )
    .unwrap();
    app.focus_search();
    type_text(&mut app, "in");
    app.wait_for_search().await;
    assert_eq!(catalog.search_calls(), 1);
}
