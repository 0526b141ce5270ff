use crossterm::event::{KeyEvent, MouseEvent};

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Periodic wakeup: drains task results and lets the dwell timer fire.
    Tick,
    Resize,
}
