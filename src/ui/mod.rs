//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout, mouse wheel
//! scrolls the active page.

pub mod detail;
pub mod downloads;
pub mod home;
pub mod nav_bar;
pub mod player;
pub mod search;
pub mod settings;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::route::Route;

/// Header rows above the content
pub const HEADER_HEIGHT: u16 = 3;
/// Status bar rows below the content
pub const STATUS_HEIGHT: u16 = 1;

/// Content area for a full terminal area
pub fn content_area(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    chunks[1]
}

/// Main render function - dispatches to view-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    // Floating bar only on tab screens
    if app.route.is_tab() {
        let hidden = app.nav_bar().config().hidden_translate();
        nav_bar::render(frame, chunks[1], &app.route, app.bar_pose(), hidden);
    }

    if let Some(ref error) = app.error {
        render_popup(frame, area, " ✗ ERROR ", error, Theme::error());
    } else if let Some(ref notice) = app.notice {
        render_popup(frame, area, " ✓ ", notice, Theme::success());
    }
}

/// Render the header with logo and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "REEL",
            Style::default()
                .fg(Theme::GOLD)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "TUI",
            Style::default()
                .fg(Theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let search_text = if editing {
        let before: String = app.search.query.chars().take(app.search.cursor).collect();
        let after: String = app.search.query.chars().skip(app.search.cursor).collect();
        format!("⌕ {}│{}", before, after)
    } else if app.search.query.is_empty() {
        "⌕ Search movies... (/)".to_string()
    } else {
        format!("⌕ {}", app.search.query)
    };

    let search_box = Paragraph::new(search_text)
        .style(if editing {
            Theme::input().fg(Theme::GOLD)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(
                    format!(" {} ", app.route.label().to_uppercase()),
                    Theme::title(),
                )),
        );
    frame.render_widget(search_box, header_chunks[1]);
}

/// Render the main content area based on current route
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.route {
        Route::Home => home::render(frame, area, app),
        Route::Search => search::render(frame, area, app),
        Route::Downloads => downloads::render(frame, area, app),
        Route::Settings => settings::render(frame, area, app),
        Route::MovieDetails { .. } => detail::render(frame, area, app),
        Route::Player => player::render(frame, area, app),
    }
}

fn help_text(app: &App) -> &'static str {
    if app.input_mode == InputMode::Editing {
        return " type to search  ↵/ESC:done  ^U:clear ";
    }
    match app.route {
        Route::Home => " ↑↓:section  ←→:card  ↵:open  1-4:tabs  q:quit ",
        Route::Search => " /:type  ↵:open  g:layout  x:clear  q:quit ",
        Route::Downloads => " ↑↓:move  s:smart  ↵:play  q:quit ",
        Route::Settings => " ↑↓:move  ↵:toggle  q:quit ",
        Route::MovieDetails { .. } => " ↑↓:scroll  e:more  f:favorite  ↵:play  ESC:back ",
        Route::Player => " ESC:back  q:quit ",
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::TEXT),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::GOLD),
        ),
    };

    let route_indicator = Span::styled(
        format!(" {} ", app.route),
        Style::default().fg(Theme::TEXT_MUTED),
    );

    let status_line = Line::from(vec![
        mode_indicator,
        route_indicator,
        Span::raw(" │ "),
        Span::styled(help_text(app), Theme::dimmed()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Render a centered message popup
fn render_popup(frame: &mut Frame, area: Rect, title: &str, message: &str, style: Style) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, style)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(style)
            .title(Span::styled(title, style))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(popup, popup_area);
}
