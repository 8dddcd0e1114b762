//! Floating bottom navigation bar
//!
//! Drawn over the bottom of the content area. The published [`BarPose`]
//! maps onto the terminal grid: translation becomes a downward row shift
//! (a fully hidden bar sits entirely below the area) and opacity dims the
//! bar toward the background.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::theme::{fade, Theme};
use crate::motion::BarPose;
use crate::route::Route;

/// Bar height in rows, borders included
pub const BAR_ROWS: u16 = 3;
/// Gap between the bar and the bottom edge
pub const BAR_MARGIN: u16 = 1;
/// Horizontal inset on each side
pub const BAR_INSET: u16 = 2;
const MAX_WIDTH: u16 = 64;

fn icon(route: &Route) -> &'static str {
    match route {
        Route::Home => "⌂",
        Route::Search => "⌕",
        Route::Downloads => "↓",
        Route::Settings => "⚙",
        _ => " ",
    }
}

/// Rows the bar is pushed down for a given translation
pub fn row_shift(translate_y: f32, hidden_translate: f32) -> u16 {
    if hidden_translate <= 0.0 {
        return 0;
    }
    let travel = f32::from(BAR_ROWS + BAR_MARGIN);
    let ratio = (translate_y / hidden_translate).clamp(0.0, 1.0);
    (ratio * travel).round() as u16
}

/// Where the bar lands inside `area`, or None when pushed fully out
pub fn bar_rect(area: Rect, pose: BarPose, hidden_translate: f32) -> Option<Rect> {
    let width = area.width.saturating_sub(BAR_INSET * 2).min(MAX_WIDTH);
    if width == 0 || area.height < BAR_ROWS + BAR_MARGIN {
        return None;
    }

    let rest_y = area.bottom() - BAR_MARGIN - BAR_ROWS;
    let y = rest_y + row_shift(pose.translate_y, hidden_translate);
    let height = BAR_ROWS.min(area.bottom().saturating_sub(y));
    if height == 0 {
        return None;
    }

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y,
        width,
        height,
    })
}

/// Render the bar for `active` at `pose`
pub fn render(frame: &mut Frame, area: Rect, active: &Route, pose: BarPose, hidden_translate: f32) {
    let Some(rect) = bar_rect(area, pose, hidden_translate) else {
        return;
    };

    let tint = |color: Color| fade(color, Theme::BACKGROUND, pose.opacity);
    let surface = tint(Theme::SURFACE_RAISED);

    let mut spans = Vec::new();
    for (i, tab) in Route::TABS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if tab == active {
            Style::default()
                .fg(tint(Theme::TEXT))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(tint(Theme::DIM))
        };
        spans.push(Span::styled(format!("{} {}", icon(tab), tab.label()), style));
    }

    frame.render_widget(Clear, rect);
    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(tint(Theme::BORDER)))
                .style(Style::default().bg(surface)),
        );
    frame.render_widget(bar, rect);
}
