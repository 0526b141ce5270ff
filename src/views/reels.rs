use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::feed::VideoItem;
use crate::help::reels_help;
use crate::keys::{global_keymap, reels_keymap};
use crate::theme::ResolvedTheme;
use crate::viewport::Viewport;
use crate::views::common::{centered, render_error, render_placeholder, truncate};
use crate::views::spinner::spinner_frame;
use crate::views::status_bar::StatusBar;

/// Engagement counters are display-only.
const COUNTERS: &str = "♥ 26.8K   ✎ 67   ⚑ 1,666   ➦ 448";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(0),    // Reels
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_reels(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled("Reels", theme.brand_style()),
        Span::raw("  "),
    ];

    if app.load.should_show_spinner() {
        spans.push(Span::styled(
            spinner_frame(app.load.loading_start),
            theme.spinner_style(),
        ));
        spans.push(Span::raw("  "));
    }

    if app.feed.page() > 0 {
        spans.push(Span::styled(
            format!("page {}", app.feed.page()),
            theme.dim_style(),
        ));
    }
    if !app.feed.has_more() {
        spans.push(Span::styled("  end of feed", theme.dim_style()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_reels(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if app.feed.is_empty() {
        if let Some(err) = &app.load.error {
            render_error(frame, err, theme, area);
        } else if app.load.loading {
            let text = format!("{} Loading reels", spinner_frame(app.load.loading_start));
            render_placeholder(frame, &text, theme, area);
        } else {
            render_placeholder(frame, "No videos yet. r:refresh", theme, area);
        }
        return;
    }

    let item_height = app.reel_height();
    let viewport = Viewport {
        offset: app.scroll_offset,
        height: area.height as usize,
        item_height,
        item_count: app.feed.len(),
    };
    let range = viewport.visible_range();
    let first = range.start;

    let mut lines = Vec::new();
    for index in range {
        if let Some(item) = app.feed.get(index) {
            lines.extend(reel_card(app, item, index, area.width, item_height));
        }
    }

    // Only whole cards are built, so shift by how far the first one is scrolled.
    let skip = app.scroll_offset.saturating_sub(first * item_height);
    let widget = Paragraph::new(lines).scroll((skip.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(widget, area);
}

/// One full-height card. Always exactly `height` lines.
fn reel_card(
    app: &App,
    item: &VideoItem,
    index: usize,
    width: u16,
    height: usize,
) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let is_current = index == app.feed.current();
    let text_width = (width as usize).saturating_sub(4);

    let label = format!("── {}/{} ", index + 1, app.feed.len());
    let fill = (width as usize).saturating_sub(label.chars().count());
    let rule = Line::from(Span::styled(
        format!("{label}{}", "─".repeat(fill)),
        theme.rule_style(is_current),
    ));

    let body = vec![
        state_line(app, item, theme, width),
        Line::from(""),
        Line::from(Span::styled(
            centered(&truncate(item.title(), text_width), width),
            theme.title_style(),
        )),
        Line::from(Span::styled(
            centered(&truncate(&item.url, text_width), width),
            theme.url_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            centered(COUNTERS, width),
            theme.counter_style(),
        )),
    ];

    let mut lines = Vec::with_capacity(height);
    lines.push(rule);
    let room = height.saturating_sub(1);
    let top_pad = room.saturating_sub(body.len()) / 2;
    lines.extend(std::iter::repeat_n(Line::from(""), top_pad));
    lines.extend(body.into_iter().take(room));
    lines.resize(height, Line::from(""));
    lines.truncate(height);
    lines
}

/// Failure wins over buffering, which wins over play state.
fn state_line(app: &App, item: &VideoItem, theme: &ResolvedTheme, width: u16) -> Line<'static> {
    let (text, style) = if let Some(failure) = &item.failure {
        (
            format!("✕ {}", failure),
            theme.error_style().add_modifier(Modifier::BOLD),
        )
    } else if item.loading {
        (
            format!("{} buffering", spinner_frame(app.load.loading_start)),
            theme.spinner_style(),
        )
    } else if item.playing {
        ("❚❚ playing".to_string(), theme.play_state_style(true))
    } else {
        ("▶ paused".to_string(), theme.play_state_style(false))
    };
    Line::from(Span::styled(centered(&text, width), style))
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let keymap = global_keymap().extend(reels_keymap());
    let help_text = reels_help().format(&keymap, app.show_help);

    let position = app.reel_on_screen().map(|i| i + 1).unwrap_or(0);
    let mut bar = StatusBar::new(&app.theme)
        .label("Reels")
        .position(position, app.feed.len())
        .help(&help_text);

    if app.load.loading_more {
        bar = bar.loading(format!("{} loading more", spinner_frame(app.load.loading_start)));
    }
    // With no reels the error has the whole pane to itself.
    if !app.feed.is_empty() {
        bar = bar.notice(app.load.error.as_deref());
    }
    bar.render(frame, area);
}
