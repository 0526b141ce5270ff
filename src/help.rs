//! Status bar hints generated from the active keymap.

use crate::app::Message;
use crate::keys::{Keymap, format_key};
use Message::{
    FirstReel, LastReel, NextReel, OpenVideo, PrevReel, Quit, Refresh, ScrollDown, ScrollUp,
    ToggleDebug, ToggleHelp, TogglePlay,
};

/// One hint: the keys bound to `actions`, joined with "/", then a label.
pub struct Hint {
    actions: &'static [Message],
    label: &'static str,
}

const fn hint(actions: &'static [Message], label: &'static str) -> Hint {
    Hint { actions, label }
}

impl Hint {
    /// `None` when none of the actions has a key.
    pub fn format(&self, keymap: &Keymap) -> Option<String> {
        let keys: Vec<String> = self
            .actions
            .iter()
            .filter_map(|action| keymap.find_key(action))
            .map(|(code, mods)| format_key(code, mods))
            .collect();
        (!keys.is_empty()).then(|| format!("{}:{}", keys.join("/"), self.label))
    }
}

/// Hints for the compact bar and for the expanded one behind `?`.
pub struct HelpConfig {
    pub expanded: &'static [Hint],
    pub compact: &'static [Hint],
}

impl HelpConfig {
    pub fn format(&self, keymap: &Keymap, show_expanded: bool) -> String {
        let hints = if show_expanded {
            self.expanded
        } else {
            self.compact
        };
        hints
            .iter()
            .filter_map(|hint| hint.format(keymap))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

const EXPANDED: &[Hint] = &[
    hint(&[NextReel, PrevReel], "nav"),
    hint(&[ScrollDown, ScrollUp], "scroll"),
    hint(&[FirstReel, LastReel], "first/last"),
    hint(&[TogglePlay], "play"),
    hint(&[OpenVideo], "open"),
    hint(&[Refresh], "refresh"),
    hint(&[ToggleDebug], "debug"),
    hint(&[Quit], "quit"),
    hint(&[ToggleHelp], "hide"),
];

const COMPACT: &[Hint] = &[
    hint(&[NextReel, PrevReel], "nav"),
    hint(&[TogglePlay], "play"),
    hint(&[ToggleHelp], "help"),
    hint(&[Quit], "quit"),
];

pub fn reels_help() -> HelpConfig {
    HelpConfig {
        expanded: EXPANDED,
        compact: COMPACT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{global_keymap, reels_keymap};

    #[test]
    fn reels_help_expanded_contains_expected_items() {
        let keymap = global_keymap().extend(reels_keymap());
        let help = reels_help().format(&keymap, true);
        assert!(help.contains("j/k:nav"));
        assert!(help.contains("J/K:scroll"));
        assert!(help.contains("g/G:first/last"));
        assert!(help.contains("Space:play"));
        assert!(help.contains("o:open"));
        assert!(help.contains("q:quit"));
    }

    #[test]
    fn reels_help_compact_is_shorter() {
        let keymap = global_keymap().extend(reels_keymap());
        let expanded = reels_help().format(&keymap, true);
        let compact = reels_help().format(&keymap, false);
        assert!(compact.len() < expanded.len());
        assert!(compact.contains("?:help"));
    }

    #[test]
    fn hint_without_bound_key_is_skipped() {
        let keymap = Keymap::new();
        assert!(hint(&[Message::Quit], "quit").format(&keymap).is_none());
    }
}
