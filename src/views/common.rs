use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::ResolvedTheme;

/// Render an error message in a bordered block.
pub fn render_error(frame: &mut Frame, error: &str, theme: &ResolvedTheme, area: Rect) {
    let lines = vec![
        Line::from(error.to_string()).style(theme.error_style()),
        Line::from(""),
        Line::from("r:retry").style(theme.dim_style()),
    ];
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title("Error"),
        );
    frame.render_widget(widget, area);
}

/// Render a single dimmed, centered line in the middle of `area`.
pub fn render_placeholder(frame: &mut Frame, text: &str, theme: &ResolvedTheme, area: Rect) {
    if area.height == 0 {
        return;
    }
    let row = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    let widget = Paragraph::new(text.to_string())
        .style(theme.dim_style())
        .alignment(Alignment::Center);
    frame.render_widget(widget, row);
}

/// Pad `text` on the left so it sits centered in `width` columns.
pub fn centered(text: &str, width: u16) -> String {
    let pad = (width as usize).saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Shorten `text` to at most `width` columns, ending in an ellipsis when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pads_evenly() {
        assert_eq!(centered("ab", 6), "  ab");
        assert_eq!(centered("too long", 4), "too long");
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("a_very_long_video_name", 8);
        assert_eq!(cut.width(), 8);
        assert!(cut.ends_with('…'));
    }
}
