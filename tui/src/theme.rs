//! Color theme and glyphs for the Nebula Field TUI.
//!
//! Emerald/amber on near-black by default, with an optional high-contrast
//! override.

use ratatui::style::{Color, Modifier, Style};

use nebula_engine::UiOptions;

mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(0, 0, 0);
    pub const BG_PANEL: Color = Color::Rgb(10, 10, 14);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(26, 26, 37);
    pub const BG_POPUP: Color = Color::Rgb(5, 5, 5);
    pub const BG_BORDER: Color = Color::Rgb(60, 60, 72);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(239, 239, 239);
    pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 180);
    pub const TEXT_MUTED: Color = Color::Rgb(107, 114, 128);

    // === Brand ===
    pub const EMERALD: Color = Color::Rgb(16, 185, 129);
    pub const AMBER: Color = Color::Rgb(245, 158, 11);
    pub const CYAN: Color = Color::Rgb(34, 211, 238);
    pub const RED: Color = Color::Rgb(248, 113, 113);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_popup: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub info: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_popup: colors::BG_POPUP,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::EMERALD,
            accent: colors::AMBER,
            info: colors::CYAN,
            error: colors::RED,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_popup: Color::Black,
            bg_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            primary: Color::Green,
            accent: Color::Yellow,
            info: Color::Cyan,
            error: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for icons, bars and spinners.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub complete: &'static str,
    pub processing: &'static str,
    pub pending: &'static str,
    pub selected: &'static str,
    pub bar_full: &'static str,
    pub bar_empty: &'static str,
    pub separator: &'static str,
    pub wave: &'static [&'static str],
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];
const WAVE: &[&str] = &["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
const WAVE_ASCII: &[&str] = &[".", ":", "-", "=", "+", "*", "#", "@"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            complete: "*",
            processing: "~",
            pending: "o",
            selected: ">",
            bar_full: "#",
            bar_empty: "-",
            separator: "|",
            wave: WAVE_ASCII,
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            complete: "●",
            processing: "◉",
            pending: "○",
            selected: "▸",
            bar_full: "█",
            bar_empty: "░",
            separator: "│",
            wave: WAVE,
            spinner_frames: SPINNER_FRAMES,
        }
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_secondary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn label(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn value(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border(palette: &Palette, focused: bool) -> Style {
        if focused {
            Style::default().fg(palette.primary)
        } else {
            Style::default().fg(palette.bg_border)
        }
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use nebula_engine::UiOptions;

    use super::{glyphs, spinner_frame};

    #[test]
    fn spinner_frame_cycles_without_reduced_motion() {
        let options = UiOptions::default();
        assert_ne!(spinner_frame(0, options), spinner_frame(1, options));
    }

    #[test]
    fn spinner_frame_static_with_reduced_motion() {
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        assert_eq!(spinner_frame(0, options), spinner_frame(3, options));
    }

    #[test]
    fn ascii_glyphs_are_ascii() {
        let g = glyphs(UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        });
        assert!(g.wave.iter().chain(g.spinner_frames).all(|s| s.is_ascii()));
    }
}
