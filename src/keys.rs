use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Message};

#[derive(Debug, Clone)]
struct Binding {
    code: KeyCode,
    mods: KeyModifiers,
    message: Message,
}

impl Binding {
    fn matches(&self, event: &KeyEvent) -> bool {
        self.code == event.code && event.modifiers.contains(self.mods)
    }
}

/// Ordered key bindings. When two bindings match, the one added last wins.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, code: KeyCode, mods: KeyModifiers, message: Message) -> Self {
        self.bindings.push(Binding {
            code,
            mods,
            message,
        });
        self
    }

    pub fn bind(self, code: KeyCode, message: Message) -> Self {
        self.with(code, KeyModifiers::NONE, message)
    }

    pub fn bind_ctrl(self, code: KeyCode, message: Message) -> Self {
        self.with(code, KeyModifiers::CONTROL, message)
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Message> {
        self.bindings
            .iter()
            .rfind(|binding| binding.matches(event))
            .map(|binding| binding.message.clone())
    }

    /// Layer `other` on top of this keymap.
    pub fn extend(mut self, other: Self) -> Self {
        self.bindings.extend(other.bindings);
        self
    }

    /// The primary key for `message`: the first one bound, as shown in help.
    pub fn find_key(&self, message: &Message) -> Option<(KeyCode, KeyModifiers)> {
        self.bindings
            .iter()
            .find(|binding| binding.message == *message)
            .map(|binding| (binding.code, binding.mods))
    }
}

/// Short label for a key, e.g. `C-e`, `Space`, `↓`.
pub fn format_key(code: KeyCode, mods: KeyModifiers) -> String {
    let key = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Up => "↑".into(),
        KeyCode::Down => "↓".into(),
        KeyCode::PageUp => "PgUp".into(),
        KeyCode::PageDown => "PgDn".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        other => other.to_string(),
    };
    if mods.contains(KeyModifiers::CONTROL) {
        format!("C-{key}")
    } else {
        key
    }
}

/// Global keybindings that work everywhere.
pub fn global_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('q'), Message::Quit)
        .bind_ctrl(KeyCode::Char('c'), Message::Quit)
        .bind(KeyCode::Char('`'), Message::ToggleDebug)
        .bind(KeyCode::Char('?'), Message::ToggleHelp)
}

/// Feed keybindings.
pub fn reels_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('j'), Message::NextReel)
        .bind(KeyCode::Down, Message::NextReel)
        .bind(KeyCode::PageDown, Message::NextReel)
        .bind(KeyCode::Char('k'), Message::PrevReel)
        .bind(KeyCode::Up, Message::PrevReel)
        .bind(KeyCode::PageUp, Message::PrevReel)
        .bind(KeyCode::Char('J'), Message::ScrollDown)
        .bind_ctrl(KeyCode::Char('e'), Message::ScrollDown)
        .bind(KeyCode::Char('K'), Message::ScrollUp)
        .bind_ctrl(KeyCode::Char('y'), Message::ScrollUp)
        .bind(KeyCode::Char('g'), Message::FirstReel)
        .bind(KeyCode::Home, Message::FirstReel)
        .bind(KeyCode::Char('G'), Message::LastReel)
        .bind(KeyCode::End, Message::LastReel)
        .bind(KeyCode::Char(' '), Message::TogglePlay)
        .bind(KeyCode::Enter, Message::TogglePlay)
        .bind(KeyCode::Char('o'), Message::OpenVideo)
        .bind(KeyCode::Char('r'), Message::Refresh)
}

pub fn handle_key(key: KeyEvent, _app: &App) -> Option<Message> {
    global_keymap().extend(reels_keymap()).get(&key)
}

/// Wheel scrolling moves the feed freely; the viewport tracker picks the reel.
pub fn handle_mouse(event: MouseEvent) -> Option<Message> {
    match event.kind {
        MouseEventKind::ScrollDown => Some(Message::ScrollDown),
        MouseEventKind::ScrollUp => Some(Message::ScrollUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestAppBuilder;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn make_key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn make_mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_quit_key() {
        let app = TestAppBuilder::new().build();
        assert_eq!(
            handle_key(make_key(KeyCode::Char('q')), &app),
            Some(Message::Quit)
        );
    }

    #[test]
    fn test_ctrl_c_quit() {
        let app = TestAppBuilder::new().build();
        assert_eq!(
            handle_key(
                make_key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &app
            ),
            Some(Message::Quit)
        );
    }

    #[test]
    fn test_navigation_keys() {
        let app = TestAppBuilder::new().build();
        assert_eq!(
            handle_key(make_key(KeyCode::Char('j')), &app),
            Some(Message::NextReel)
        );
        assert_eq!(
            handle_key(make_key(KeyCode::Char('k')), &app),
            Some(Message::PrevReel)
        );
        assert_eq!(
            handle_key(make_key(KeyCode::Char('G')), &app),
            Some(Message::LastReel)
        );
        assert_eq!(
            handle_key(
                make_key_with_mods(KeyCode::Char('e'), KeyModifiers::CONTROL),
                &app
            ),
            Some(Message::ScrollDown)
        );
    }

    #[test]
    fn test_space_toggles_play() {
        let app = TestAppBuilder::new().build();
        assert_eq!(
            handle_key(make_key(KeyCode::Char(' ')), &app),
            Some(Message::TogglePlay)
        );
    }

    #[test]
    fn test_wheel_scrolls() {
        assert_eq!(
            handle_mouse(make_mouse(MouseEventKind::ScrollDown)),
            Some(Message::ScrollDown)
        );
        assert_eq!(
            handle_mouse(make_mouse(MouseEventKind::ScrollUp)),
            Some(Message::ScrollUp)
        );
        assert_eq!(handle_mouse(make_mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_keymap_extend_precedence() {
        // Later bindings take precedence
        let base = Keymap::new().bind(KeyCode::Char('x'), Message::Quit);
        let extended = base.extend(Keymap::new().bind(KeyCode::Char('x'), Message::Refresh));

        let event = make_key(KeyCode::Char('x'));
        assert_eq!(extended.get(&event), Some(Message::Refresh));
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let app = TestAppBuilder::new().build();
        assert!(handle_key(make_key(KeyCode::F(12)), &app).is_none());
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key(KeyCode::Char(' '), KeyModifiers::NONE), "Space");
        assert_eq!(format_key(KeyCode::Char('e'), KeyModifiers::CONTROL), "C-e");
    }
}
