//! Movie detail page
//!
//! Header with metadata, collapsible overview, cast strip and actions.
//! The whole page scrolls line by line.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use super::theme::Theme;
use crate::app::{App, LoadingState, COLLAPSED_OVERVIEW_LINES};
use crate::models::MovieDetail;

/// Shortened overview for the collapsed state
pub fn collapse(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let detail = &app.detail;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(format!(" {} ", detail.title()), Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match (&detail.loading, &detail.detail) {
        (LoadingState::Loading(msg), _) => {
            let text = msg.as_deref().unwrap_or("Loading...");
            frame.render_widget(
                Paragraph::new(format!("⟳ {}", text))
                    .style(Theme::loading())
                    .alignment(Alignment::Center),
                inner,
            );
        }
        (LoadingState::Error(msg), _) => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(msg.as_str(), Theme::error())),
                    Line::from(Span::styled("ESC to go back", Theme::dimmed())),
                ])
                .alignment(Alignment::Center),
                inner,
            );
        }
        (LoadingState::Idle, Some(movie)) => {
            let lines = page_lines(movie, detail.expanded, detail.is_favorite, inner.width);
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((detail.scroll, 0)),
                inner,
            );
        }
        (LoadingState::Idle, None) => {}
    }
}

fn page_lines(movie: &MovieDetail, expanded: bool, favorite: bool, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(movie.title.clone(), Theme::title())),
        Line::from(vec![
            Span::styled(movie.release_date.clone(), Theme::year()),
            Span::raw(" • "),
            Span::styled(movie.duration.clone(), Theme::year()),
            Span::raw(" • "),
            Span::styled(format!("★ {}%", movie.rating), Theme::rating()),
        ]),
    ];

    let mut genres = Vec::new();
    for genre in &movie.genres {
        genres.push(Span::styled(format!(" {} ", genre), Theme::genre()));
        genres.push(Span::raw(" "));
    }
    lines.push(Line::from(genres));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("Overview", Theme::title()),
        Span::styled(
            if expanded { "   e: less" } else { "   e: more" },
            Theme::dimmed(),
        ),
    ]));
    let overview = if expanded {
        movie.description.clone()
    } else {
        let per_line = usize::from(width.max(20));
        collapse(&movie.description, per_line * usize::from(COLLAPSED_OVERVIEW_LINES))
    };
    lines.push(Line::from(Span::styled(overview, Theme::muted())));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Cast", Theme::title())));
    for member in &movie.cast {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", member.name), Theme::text()),
            Span::styled(format!("  as {}", member.character), Theme::dimmed()),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled(" ▶ Play ", Theme::highlighted()),
        Span::raw("  "),
        Span::styled(
            if favorite { " ♥ Favorite " } else { " ♡ Favorite " },
            if favorite {
                Theme::error()
            } else {
                Theme::card()
            },
        ),
        Span::raw("  "),
        Span::styled("↵/p", Theme::keybind()),
        Span::styled(" play  ", Theme::dimmed()),
        Span::styled("f", Theme::keybind()),
        Span::styled(" favorite", Theme::dimmed()),
    ]));

    lines
}
