use tracing::debug;

use super::ThemeVariant;

/// Guess the terminal background from its reported luma.
///
/// Terminals that do not answer the query are treated as dark.
pub fn detect_terminal_theme() -> ThemeVariant {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => ThemeVariant::Light,
        Ok(_) => ThemeVariant::Dark,
        Err(e) => {
            debug!(error = %e, "terminal background detection failed");
            ThemeVariant::Dark
        }
    }
}
