//! Player placeholder
//!
//! Playback is out of scope; the screen only confirms where the user landed.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::theme::Theme;
use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" ▶ PLAYER ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let from = app
        .nav_stack
        .last()
        .map(|r| r.label())
        .unwrap_or("Home");

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Streaming player", Theme::title())),
        Line::from(Span::styled("Playback is not available yet.", Theme::dimmed())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled(format!("Back to {}", from), Theme::dimmed()),
        ]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(content, inner);
}
