//! UI rendering tests for ReelTUI
//!
//! Renders the full frame into a ratatui `TestBackend` and checks what a
//! user would see.
//!
//! ## Test Cases
//! - test_home_renders_at_minimum_size: 80x24 shows hero, carousels, nav bar
//! - test_hidden_bar_not_drawn: scrolled-down home has no nav bar
//! - test_search_states: no results, results, suggestions
//! - test_downloads_empty_state: explicit empty branch
//! - test_detail_page: metadata and cast
//! - test_theme_contrast: palette readability

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};

use reeltui::api::{InMemoryCatalog, InMemoryDownloads};
use reeltui::app::App;
use reeltui::config::Config;
use reeltui::route::Route;
use reeltui::ui::{
    self,
    theme::{color_to_rgb, contrast_ratio, meets_wcag_aa, Theme},
};

// =============================================================================
// Helpers
// =============================================================================

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn screen(app: &mut App, width: u16, height: u16) -> String {
    let content = ui::content_area(Rect::new(0, 0, width, height));
    app.set_viewport(content.width, content.height);

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

async fn loaded_app() -> App {
    let mut app = App::new(&Config::default()).unwrap();
    app.load().await;
    app
}

fn settle(app: &mut App) {
    for _ in 0..300 {
        app.tick(Duration::from_millis(16));
    }
}

// =============================================================================
// Home
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_home_renders_at_minimum_size() {
    let mut app = loaded_app().await;
    let text = screen(&mut app, 80, 24);

    assert!(text.contains("REELTUI"));
    assert!(text.contains("The Black Phone"));
    assert!(text.contains("Top Movies"));
    assert!(text.contains("Inception"));
    assert!(text.contains("★ 8.8"));

    // floating nav bar
    assert!(text.contains("⌂ Home"));
    assert!(text.contains("Downloads"));
    assert!(text.contains("Settings"));
}

#[tokio::test(start_paused = true)]
async fn test_home_renders_large() {
    let mut app = loaded_app().await;
    let text = screen(&mut app, 200, 50);
    assert!(text.contains("Continue Watching"));
    assert!(text.contains("Upcoming Movies"));
    assert!(text.contains("Dune: Part Two"));
}

#[tokio::test(start_paused = true)]
async fn test_tiny_terminal_does_not_panic() {
    let mut app = loaded_app().await;
    screen(&mut app, 20, 6);
    app.navigate(Route::Search);
    screen(&mut app, 20, 6);
    app.navigate(Route::movie("1"));
    app.process_pending().await;
    screen(&mut app, 20, 6);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_bar_not_drawn() {
    let mut app = loaded_app().await;
    screen(&mut app, 80, 24);

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    settle(&mut app);
    let text = screen(&mut app, 80, 24);
    assert!(!text.contains("Downloads"));
    assert!(!text.contains("⚙ Settings"));

    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Up));
    settle(&mut app);
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("Downloads"));
}

#[tokio::test(start_paused = true)]
async fn test_favorite_notice_popup() {
    let mut app = loaded_app().await;
    app.handle_key(key(KeyCode::Char('f')));
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("Added to favorites!"));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_search_states() {
    let mut app = loaded_app().await;
    app.navigate(Route::Search);

    let text = screen(&mut app, 80, 24);
    assert!(text.contains("Trending Searches"));
    assert!(text.contains("1,520 searches"));

    app.focus_search();
    for c in "zzz".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("Searching..."));
    assert!(text.contains("INSERT"));

    app.wait_for_search().await;
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("No results found"));

    for _ in 0..3 {
        app.handle_key(key(KeyCode::Backspace));
    }
    for c in "dark".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.wait_for_search().await;
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("1 result"));
    assert!(text.contains("The Dark Knight"));
    assert!(text.contains("2008"));
}

#[tokio::test(start_paused = true)]
async fn test_search_list_layout() {
    let mut app = loaded_app().await;
    app.focus_search();
    app.handle_key(key(KeyCode::Char('i')));
    app.wait_for_search().await;
    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Char('g')));

    let text = screen(&mut app, 80, 24);
    assert!(text.contains("2 results"));
    assert!(text.contains("list view"));
    assert!(text.contains("▸ Inception"));
}

// =============================================================================
// Downloads & Settings
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_downloads_list() {
    let mut app = loaded_app().await;
    app.navigate(Route::Downloads);
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("Smart Downloads"));
    assert!(text.contains("Downloading 65%"));
    assert!(text.contains("1.2GB | 1080p"));
    assert!(text.contains("Downloaded"));
}

#[tokio::test(start_paused = true)]
async fn test_downloads_empty_state() {
    let config = Config::default();
    let mut app = App::with_services(
        &config,
        Arc::new(InMemoryCatalog::new()),
        Arc::new(InMemoryDownloads::empty()),
    )
    .unwrap();
    app.load().await;
    app.navigate(Route::Downloads);

    let text = screen(&mut app, 80, 24);
    assert!(text.contains("No Downloads Yet"));
}

#[tokio::test(start_paused = true)]
async fn test_settings_page() {
    let mut app = loaded_app().await;
    app.navigate(Route::Settings);
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("GENERAL"));
    assert!(text.contains("Theme"));
    assert!(text.contains("Dark"));
}

// =============================================================================
// Detail & Player
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_detail_page() {
    let mut app = loaded_app().await;
    app.navigate(Route::movie("1"));

    let text = screen(&mut app, 80, 24);
    assert!(text.contains("Loading details..."));

    app.process_pending().await;
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("Inception"));
    assert!(text.contains("2h 28m"));
    assert!(text.contains("★ 88%"));
    assert!(text.contains("Leonardo DiCaprio"));
    // no floating bar off the tab screens
    assert!(!text.contains("⌂ Home"));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_movie_shows_error_popup() {
    let mut app = loaded_app().await;
    app.navigate(Route::movie("nope"));
    app.process_pending().await;
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("ERROR"));
    assert!(text.contains("Movie not found"));
}

#[tokio::test(start_paused = true)]
async fn test_player_placeholder() {
    let mut app = loaded_app().await;
    app.navigate(Route::Downloads);
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.route, Route::Player);
    let text = screen(&mut app, 80, 24);
    assert!(text.contains("PLAYER"));
    assert!(text.contains("Back to Downloads"));
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_theme_contrast() {
    let bg = color_to_rgb(Theme::BACKGROUND).unwrap();
    for color in [Theme::TEXT, Theme::TEXT_MUTED, Theme::GOLD, Theme::BLUE, Theme::RED] {
        let fg = color_to_rgb(color).unwrap();
        assert!(
            meets_wcag_aa(fg, bg),
            "{:?} on black: {:.2}",
            color,
            contrast_ratio(fg, bg)
        );
    }
}
