//! Home page: featured hero and horizontal carousels
//!
//! The page scrolls by whole sections; the app decides the first visible
//! line and each section is drawn at its offset from there.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use super::theme::Theme;
use crate::app::{App, HomeSection, HomeState, LoadingState};

/// Width of one carousel card, borders included
pub const CARD_WIDTH: u16 = 20;
const CARD_GAP: u16 = 1;

/// Text progress bar, e.g. `██████░░░░`
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// First card drawn so `selected` stays on screen
pub fn first_visible_card(selected: usize, visible: usize) -> usize {
    selected.saturating_sub(visible.saturating_sub(1))
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let home = &app.home;

    match &home.loading {
        LoadingState::Loading(_) if home.featured.is_none() => {
            let loading = Paragraph::new("⟳ Loading...")
                .style(Theme::loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, area);
            return;
        }
        LoadingState::Error(msg) => {
            let error = Paragraph::new(msg.as_str())
                .style(Theme::error())
                .alignment(Alignment::Center);
            frame.render_widget(error, area);
            return;
        }
        _ => {}
    }

    let offset = home.scroll_lines(area.height);
    for section in HomeSection::ALL {
        let start = section.start_line();
        let end = start + section.height();
        if end <= offset || start >= offset + area.height {
            continue;
        }
        let top = start.saturating_sub(offset);
        let skipped = offset.saturating_sub(start);
        let rect = Rect {
            x: area.x,
            y: area.y + top,
            width: area.width,
            height: (section.height() - skipped).min(area.height - top),
        };

        let focused = home.focused() == section;
        match section {
            HomeSection::Hero => render_hero(frame, rect, home, focused),
            _ => render_carousel(frame, rect, home, section, focused),
        }
    }
}

fn render_hero(frame: &mut Frame, area: Rect, home: &HomeState, focused: bool) {
    let Some(featured) = &home.featured else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(" FEATURED ", Theme::accent()))
        .style(Theme::card());

    let lines = vec![
        Line::from(vec![
            Span::styled(featured.title.clone(), Theme::title()),
            Span::raw("  "),
            Span::styled(format!("★ {:.1}", featured.rating), Theme::rating()),
        ]),
        Line::from(""),
        Line::from(Span::styled(featured.description.clone(), Theme::muted())),
    ];

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, actions] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        body,
    );

    let buttons = Line::from(vec![
        Span::styled(" ▶ Play ", Theme::highlighted()),
        Span::raw("  "),
        Span::styled(" ♡ Favorite ", Theme::card()),
        Span::raw("  "),
        Span::styled("↵/p", Theme::keybind()),
        Span::styled(" play  ", Theme::dimmed()),
        Span::styled("f", Theme::keybind()),
        Span::styled(" favorite", Theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(buttons), actions);
}

struct Card {
    title: String,
    rating: f32,
    progress: Option<f64>,
}

fn cards(home: &HomeState, section: HomeSection) -> Vec<Card> {
    match section {
        HomeSection::Hero => Vec::new(),
        HomeSection::TopMovies | HomeSection::Upcoming => {
            let movies = if section == HomeSection::TopMovies {
                &home.top_movies
            } else {
                &home.upcoming
            };
            movies
                .iter()
                .map(|m| Card {
                    title: m.title.clone(),
                    rating: m.rating,
                    progress: None,
                })
                .collect()
        }
        HomeSection::ContinueWatching => home
            .continue_watching
            .iter()
            .map(|w| Card {
                title: w.movie.title.clone(),
                rating: w.movie.rating,
                progress: Some(w.ratio()),
            })
            .collect(),
    }
}

fn render_carousel(
    frame: &mut Frame,
    area: Rect,
    home: &HomeState,
    section: HomeSection,
    focused: bool,
) {
    let [header, row] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let title_style = if focused {
        Theme::title()
    } else {
        Theme::muted()
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(section.title(), title_style),
        ])),
        header,
    );

    let cards = cards(home, section);
    if cards.is_empty() || row.height == 0 {
        return;
    }

    let visible = usize::from((row.width / (CARD_WIDTH + CARD_GAP)).max(1));
    let selected = home.columns[home.section.min(HomeSection::ALL.len() - 1)];
    let first = if focused {
        first_visible_card(selected, visible)
    } else {
        0
    };

    for (slot, (i, card)) in cards.iter().enumerate().skip(first).take(visible).enumerate() {
        let x = row.x + 1 + slot as u16 * (CARD_WIDTH + CARD_GAP);
        let width = CARD_WIDTH.min(row.right().saturating_sub(x));
        if width < 4 {
            break;
        }
        let rect = Rect {
            x,
            y: row.y,
            width,
            height: row.height,
        };

        let is_selected = focused && i == selected;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if is_selected {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .style(Theme::card());

        let inner_width = usize::from(width.saturating_sub(2));
        let mut lines = vec![
            Line::from(Span::styled(
                card.title.clone(),
                if is_selected {
                    Theme::title()
                } else {
                    Theme::card()
                },
            )),
            Line::from(Span::styled(format!("★ {:.1}", card.rating), Theme::rating())),
        ];
        if let Some(ratio) = card.progress {
            lines.push(Line::from(Span::styled(
                progress_bar(ratio, inner_width),
                Theme::progress_bar(),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            rect,
        );
    }
}
