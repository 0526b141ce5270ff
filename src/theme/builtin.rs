use ratatui::style::Color;

use super::{ResolvedTheme, ThemeVariant};

pub fn by_name(name: &str) -> Option<ResolvedTheme> {
    match name {
        "dark" => Some(dark()),
        "light" => Some(light()),
        _ => None,
    }
}

pub fn default_for_variant(variant: ThemeVariant) -> ResolvedTheme {
    match variant {
        ThemeVariant::Dark => dark(),
        ThemeVariant::Light => light(),
    }
}

fn dark() -> ResolvedTheme {
    ResolvedTheme {
        name: "dark".to_string(),
        variant: ThemeVariant::Dark,
        foreground: Color::White,
        foreground_dim: Color::Rgb(0x6A, 0x9A, 0x9A),
        border: Color::Rgb(0x6A, 0x9A, 0x9A),
        primary: Color::Yellow,
        error: Color::Red,
        reel_title: Color::White,
        reel_url: Color::Rgb(0x6A, 0x9A, 0x9A),
        reel_counter: Color::Cyan,
        playing: Color::Green,
        paused: Color::Yellow,
        status_bar_bg: Color::DarkGray,
        status_bar_fg: Color::White,
        spinner: Color::Cyan,
    }
}

fn light() -> ResolvedTheme {
    ResolvedTheme {
        name: "light".to_string(),
        variant: ThemeVariant::Light,
        foreground: Color::Black,
        foreground_dim: Color::Rgb(0x70, 0x70, 0x70),
        border: Color::Rgb(0x90, 0x90, 0x90),
        primary: Color::Blue,
        error: Color::Red,
        reel_title: Color::Black,
        reel_url: Color::Rgb(0x70, 0x70, 0x70),
        reel_counter: Color::Magenta,
        playing: Color::Rgb(0x2E, 0x7D, 0x32),
        paused: Color::Rgb(0xB2, 0x6B, 0x00),
        status_bar_bg: Color::Rgb(0xD0, 0xD0, 0xD0),
        status_bar_fg: Color::Black,
        spinner: Color::Blue,
    }
}
