//! Search screen
//!
//! Suggestions while the query is empty, then loading, results (grid or
//! list) or an explicit no-results state.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use super::theme::Theme;
use crate::app::{App, SearchState, SearchView, Suggestion, SEARCH_HEADER};
use crate::models::SearchResult;

/// Thousands separator for search counts
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let search = &app.search;
    match search.view() {
        SearchView::Suggestions => render_suggestions(frame, area, search),
        SearchView::Loading => {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("⟳ Searching...", Theme::loading())),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(loading, area);
        }
        SearchView::NoResults => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("No results found", Theme::title())),
                Line::from(Span::styled(
                    "Try searching for something else",
                    Theme::dimmed(),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(empty, area);
        }
        SearchView::Error(msg) => {
            let error = Paragraph::new(msg)
                .style(Theme::error())
                .alignment(Alignment::Center);
            frame.render_widget(error, area);
        }
        SearchView::Results => render_results(frame, area, search),
    }
}

fn render_suggestions(frame: &mut Frame, area: Rect, search: &SearchState) {
    let mut lines = Vec::new();
    let suggestions = search.suggestion_list();
    let recent_count = search.recent.len();

    for (i, suggestion) in suggestions.iter().enumerate() {
        if i == 0 && recent_count > 0 {
            lines.push(Line::from(vec![
                Span::styled(" Recent Searches", Theme::title()),
                Span::styled("   d remove", Theme::dimmed()),
            ]));
        }
        if i == recent_count {
            if recent_count > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(" Trending Searches", Theme::title())));
        }

        let is_selected = i == search.suggestions.selected;
        let marker = if is_selected { " ▸ " } else { "   " };
        let title_style = if is_selected {
            Theme::highlighted()
        } else {
            Theme::text()
        };

        let mut spans = vec![
            Span::styled(marker, Theme::accent()),
            Span::styled(suggestion.title().to_string(), title_style),
        ];
        match suggestion {
            Suggestion::Recent(_) => spans.push(Span::styled("  ✕", Theme::dimmed())),
            Suggestion::Trending(t) => spans.push(Span::styled(
                format!("  🔥 {} searches", format_count(t.search_count)),
                Theme::dimmed(),
            )),
        }
        lines.push(Line::from(spans));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Type / to search for movies...",
            Theme::dimmed(),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_results(frame: &mut Frame, area: Rect, search: &SearchState) {
    let results = search.result_slice();
    let [header, body] =
        Layout::vertical([Constraint::Length(SEARCH_HEADER), Constraint::Min(0)]).areas(area);

    let layout_label = if search.grid { "grid" } else { "list" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(
                    " {} result{}",
                    results.len(),
                    if results.len() == 1 { "" } else { "s" }
                ),
                Theme::title(),
            ),
            Span::styled(format!("   g: {} view", layout_label), Theme::dimmed()),
        ])),
        header,
    );

    let row_height = search.row_height();
    let columns = search.columns();
    let visible_rows = usize::from(body.height / row_height.max(1)) + 1;
    let card_width = body.width / columns as u16;

    for (i, result) in results.iter().enumerate() {
        let row = i / columns;
        if row < search.row_offset || row >= search.row_offset + visible_rows {
            continue;
        }
        let y = body.y + (row - search.row_offset) as u16 * row_height;
        if y >= body.bottom() {
            break;
        }
        let col = (i % columns) as u16;
        let rect = Rect {
            x: body.x + col * card_width,
            y,
            width: card_width,
            height: row_height.min(body.bottom() - y),
        };

        let is_selected = i == search.list.selected;
        if search.grid {
            render_grid_card(frame, rect, result, is_selected);
        } else {
            render_list_row(frame, rect, result, is_selected);
        }
    }
}

fn meta_line(result: &SearchResult) -> Line<'static> {
    Line::from(vec![
        Span::styled(result.year.clone(), Theme::year()),
        Span::raw("  "),
        Span::styled(format!("★ {:.1}", result.rating), Theme::rating()),
    ])
}

fn genre_line(result: &SearchResult) -> Line<'static> {
    let mut spans = Vec::new();
    for genre in &result.genres {
        spans.push(Span::styled(format!(" {} ", genre), Theme::genre()));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_grid_card(frame: &mut Frame, area: Rect, result: &SearchResult, is_selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if is_selected {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(Theme::card());

    let lines = vec![
        Line::from(Span::styled(result.title.clone(), Theme::title())),
        meta_line(result),
        genre_line(result),
    ];

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn render_list_row(frame: &mut Frame, area: Rect, result: &SearchResult, is_selected: bool) {
    let marker = if is_selected { "▸ " } else { "  " };
    let title_style = if is_selected {
        Theme::highlighted()
    } else {
        Theme::text()
    };

    let mut meta = meta_line(result);
    meta.spans.insert(0, Span::raw("  "));
    meta.spans.push(Span::raw("  "));
    meta.spans.extend(genre_line(result).spans);

    let lines = vec![
        Line::from(vec![
            Span::styled(marker, Theme::accent()),
            Span::styled(result.title.clone(), title_style),
        ]),
        meta,
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
