mod builtin;
mod detect;

pub use builtin::{by_name, default_for_variant};
pub use detect::detect_terminal_theme;

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub name: String,
    pub variant: ThemeVariant,
    pub foreground: Color,
    pub foreground_dim: Color,
    pub border: Color,
    pub primary: Color,
    pub error: Color,
    pub reel_title: Color,
    pub reel_url: Color,
    pub reel_counter: Color,
    pub playing: Color,
    pub paused: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub spinner: Color,
}

/// Styles are derived from the palette so views never pick raw colors.
impl ResolvedTheme {
    fn fg(color: Color) -> Style {
        Style::new().fg(color)
    }

    pub fn text_style(&self) -> Style {
        Self::fg(self.foreground)
    }

    pub fn dim_style(&self) -> Style {
        Self::fg(self.foreground_dim)
    }

    pub fn border_style(&self) -> Style {
        Self::fg(self.border)
    }

    /// App name in the header.
    pub fn brand_style(&self) -> Style {
        Self::fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Separator rule above each reel; the committed reel is highlighted.
    pub fn rule_style(&self, current: bool) -> Style {
        if current {
            Self::fg(self.primary)
        } else {
            self.border_style()
        }
    }

    pub fn title_style(&self) -> Style {
        Self::fg(self.reel_title).add_modifier(Modifier::BOLD)
    }

    pub fn url_style(&self) -> Style {
        Self::fg(self.reel_url)
    }

    pub fn counter_style(&self) -> Style {
        Self::fg(self.reel_counter)
    }

    pub fn play_state_style(&self, playing: bool) -> Style {
        Self::fg(if playing { self.playing } else { self.paused })
    }

    pub fn error_style(&self) -> Style {
        Self::fg(self.error)
    }

    pub fn spinner_style(&self) -> Style {
        Self::fg(self.spinner)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::new().bg(self.status_bar_bg).fg(self.status_bar_fg)
    }
}
