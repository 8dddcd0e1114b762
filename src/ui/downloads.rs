//! Downloads screen
//!
//! Smart Downloads panel, then one entry per tracked download.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::home::progress_bar;
use super::theme::Theme;
use crate::app::{App, LoadingState, DOWNLOAD_ROW, SMART_DOWNLOADS_HEIGHT};
use crate::models::{DownloadRecord, DownloadStatus};

/// Switch glyph
pub fn switch(on: bool) -> Span<'static> {
    if on {
        Span::styled("[ ●]", Theme::toggle_on())
    } else {
        Span::styled("[○ ]", Theme::toggle_off())
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let downloads = &app.downloads;
    let [panel, list] = Layout::vertical([
        Constraint::Length(SMART_DOWNLOADS_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(area);

    let smart = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Smart Downloads  ", Theme::title()),
            switch(downloads.smart_downloads),
        ]),
        Line::from(Span::styled(
            "Completed episodes are deleted and replaced with the next ones.",
            Theme::muted(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(" s ", Theme::keybind()))
            .style(Theme::card()),
    );
    frame.render_widget(smart, panel);

    match &downloads.loading {
        LoadingState::Loading(_) => {
            frame.render_widget(
                Paragraph::new("⟳ Loading downloads...")
                    .style(Theme::loading())
                    .alignment(Alignment::Center),
                list,
            );
            return;
        }
        LoadingState::Error(msg) => {
            frame.render_widget(
                Paragraph::new(msg.as_str())
                    .style(Theme::error())
                    .alignment(Alignment::Center),
                list,
            );
            return;
        }
        LoadingState::Idle => {}
    }

    if downloads.records.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No Downloads Yet", Theme::title())),
            Line::from(Span::styled(
                "Movies you download will appear here",
                Theme::dimmed(),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, list);
        return;
    }

    for (row, (i, record)) in downloads
        .records
        .iter()
        .enumerate()
        .skip(downloads.list.offset)
        .enumerate()
    {
        let y = list.y + row as u16 * DOWNLOAD_ROW;
        if y >= list.bottom() {
            break;
        }
        let rect = Rect {
            x: list.x,
            y,
            width: list.width,
            height: DOWNLOAD_ROW.min(list.bottom() - y),
        };
        render_record(frame, rect, record, i == downloads.list.selected);
    }
}

fn render_record(frame: &mut Frame, area: Rect, record: &DownloadRecord, is_selected: bool) {
    let marker = if is_selected { "▸ " } else { "  " };
    let title_style = if is_selected {
        Theme::highlighted()
    } else {
        Theme::text()
    };

    let bar_width = usize::from(area.width.saturating_sub(4).min(40));
    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker, Theme::accent()),
            Span::styled(record.title.clone(), title_style),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(record.status_label(), Theme::download_status(record.status)),
            Span::raw("   "),
            Span::styled(record.file_info(), Theme::dimmed()),
        ]),
    ];
    if record.status != DownloadStatus::Downloaded {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(progress_bar(record.ratio(), bar_width), Theme::progress_bar()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
