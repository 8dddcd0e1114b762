//! Dark cinema theme for ReelTUI
//!
//! Color palette and style helpers for the TUI: black backdrop, charcoal
//! cards, gold ratings, blue progress, red for destructive actions.

use ratatui::style::{Color, Modifier, Style};

/// Cinema color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #000000
    pub const BACKGROUND: Color = Color::Rgb(0x00, 0x00, 0x00);

    /// Card surface: #1a1a1a
    pub const SURFACE: Color = Color::Rgb(0x1a, 0x1a, 0x1a);

    /// Raised surface (nav bar, inputs): #2a2a2a
    pub const SURFACE_RAISED: Color = Color::Rgb(0x2a, 0x2a, 0x2a);

    /// Text: #ffffff
    pub const TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Secondary text: #999999
    pub const TEXT_MUTED: Color = Color::Rgb(0x99, 0x99, 0x99);

    /// Dim: #666666
    pub const DIM: Color = Color::Rgb(0x66, 0x66, 0x66);

    /// Rating gold: #FFD700
    pub const GOLD: Color = Color::Rgb(0xff, 0xd7, 0x00);

    /// Progress blue: #2196F3
    pub const BLUE: Color = Color::Rgb(0x21, 0x96, 0xf3);

    /// Destructive red: #ff4757
    pub const RED: Color = Color::Rgb(0xff, 0x47, 0x57);

    /// Completed green: #4CAF50
    pub const GREEN: Color = Color::Rgb(0x4c, 0xaf, 0x50);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Border color
    pub const BORDER: Color = Color::Rgb(0x33, 0x33, 0x33);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::TEXT;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Selected card or row
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default().fg(Self::RED).add_modifier(Modifier::BOLD)
    }

    /// Confirmation style
    pub fn success() -> Style {
        Style::default().fg(Self::GREEN).add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    /// Star ratings
    pub fn rating() -> Style {
        Style::default().fg(Self::GOLD).add_modifier(Modifier::BOLD)
    }

    /// Accent text style (gold)
    pub fn accent() -> Style {
        Style::default().fg(Self::GOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Card surface
    pub fn card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    /// Progress bar filled portion
    pub fn progress_bar() -> Style {
        Style::default().fg(Self::BLUE).bg(Self::SURFACE_RAISED)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::GOLD)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default().fg(Self::BLUE).add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Genre tags
    pub fn genre() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE_RAISED)
    }

    /// Switch in the on position
    pub fn toggle_on() -> Style {
        Style::default().fg(Self::BLUE).add_modifier(Modifier::BOLD)
    }

    /// Switch in the off position
    pub fn toggle_off() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Download status by kind
    pub fn download_status(status: crate::models::DownloadStatus) -> Style {
        use crate::models::DownloadStatus;
        match status {
            DownloadStatus::Downloading => Style::default().fg(Self::BLUE),
            DownloadStatus::Downloaded => Style::default().fg(Self::GREEN),
            DownloadStatus::Paused => Style::default().fg(Self::GOLD),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Blend `color` toward `background` as if drawn at `opacity` (0..=1)
///
/// Non-RGB colors are returned unchanged at any opacity above zero.
pub fn fade(color: Color, background: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (color_to_rgb(color), color_to_rgb(background)) {
        (Some((r, g, b)), Some((br, bg, bb))) => {
            let mix = |c: u8, base: u8| -> u8 {
                (f32::from(base) + (f32::from(c) - f32::from(base)) * opacity).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ if opacity > 0.0 => color,
        _ => background,
    }
}

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
