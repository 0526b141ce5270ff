use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .title(" Debug ")
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let mut lines = Vec::new();

    // Feed cursor
    lines.push(Line::from(vec![
        Span::styled("Page: ", theme.dim_style()),
        Span::styled(app.feed.page().to_string(), theme.text_style()),
        Span::styled("  Videos: ", theme.dim_style()),
        Span::styled(app.feed.len().to_string(), theme.text_style()),
        Span::styled("  More: ", theme.dim_style()),
        Span::styled(
            if app.feed.has_more() { "yes" } else { "no" },
            theme.text_style(),
        ),
        Span::styled("  Gen: ", theme.dim_style()),
        Span::styled(app.generation.to_string(), theme.text_style()),
        Span::styled("  Shown: ", theme.dim_style()),
        Span::styled(
            app.tracker
                .committed()
                .map_or("-".to_string(), |i| (i + 1).to_string()),
            theme.text_style(),
        ),
    ]));

    // Running tasks
    let task_count = app.debug.running_tasks.len();
    lines.push(Line::from(vec![
        Span::styled("Tasks: ", theme.dim_style()),
        Span::styled(
            task_count.to_string(),
            if task_count > 0 {
                theme.counter_style()
            } else {
                theme.text_style()
            },
        ),
    ]));

    for task in &app.debug.running_tasks {
        let elapsed = task.started_at.elapsed();
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("[{}] ", task.id), theme.dim_style()),
            Span::styled(&task.description, theme.text_style()),
            Span::styled(format!(" ({:.1?})", elapsed), theme.url_style()),
        ]));
    }

    if !app.debug.running_tasks.is_empty() {
        lines.push(Line::from(""));
    }

    // Recent log entries, newest first
    let available_lines = area.height.saturating_sub(4) as usize; // border + two header rows
    let log_lines = available_lines.saturating_sub(app.debug.running_tasks.len() + 1);

    for entry in app.debug.log.iter().rev().take(log_lines) {
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.message),
            theme.dim_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
