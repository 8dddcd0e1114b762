//! Settings screen
//!
//! Grouped rows; switches flip in place and nothing is persisted.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::downloads::switch;
use super::theme::Theme;
use crate::app::{App, SettingKind};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let settings = &app.settings;
    let mut lines: Vec<Line> = Vec::new();

    for (n, (section, rows)) in settings.sections().into_iter().enumerate() {
        if n > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", section.to_uppercase()),
            Theme::muted().add_modifier(Modifier::BOLD),
        )));

        for (i, item) in rows {
            let is_selected = i == settings.list.selected;
            let marker = if is_selected { " ▸ " } else { "   " };
            let label_style = if is_selected {
                Theme::highlighted()
            } else {
                Theme::text()
            };

            let mut spans = vec![
                Span::styled(marker, Theme::accent()),
                Span::styled(item.label, label_style),
                Span::raw("  "),
            ];
            match &item.kind {
                SettingKind::Toggle(on) => spans.push(switch(*on)),
                SettingKind::Value(value) => {
                    spans.push(Span::styled(value.clone(), Theme::muted()));
                    spans.push(Span::styled(" ›", Theme::dimmed()));
                }
                SettingKind::Action => spans.push(Span::styled("›", Theme::dimmed())),
                SettingKind::Info(value) => spans.push(Span::styled(value.clone(), Theme::muted())),
            }
            lines.push(Line::from(spans));
        }
    }

    let scroll = settings.scroll_lines();
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}
