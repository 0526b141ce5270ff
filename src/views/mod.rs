pub mod common;
pub mod debug;
pub mod reels;
pub mod spinner;
pub mod status_bar;

#[cfg(test)]
pub mod tests;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use crate::app::App;

/// Rows given to the debug pane when it is open.
pub const DEBUG_PANE_ROWS: u16 = 10;

/// Split the screen into the feed and, if open, the debug pane.
pub fn split(app: &App, area: Rect) -> (Rect, Option<Rect>) {
    if app.debug.visible {
        let chunks =
            Layout::vertical([Constraint::Min(0), Constraint::Length(DEBUG_PANE_ROWS)]).split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    }
}

pub fn render(app: &App, frame: &mut Frame) {
    let (main_area, debug_area) = split(app, frame.area());
    reels::render(frame, app, main_area);
    if let Some(debug_area) = debug_area {
        debug::render(frame, app, debug_area);
    }
}
