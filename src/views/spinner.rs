use std::time::Instant;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MILLIS: u128 = 80;

/// Spinner glyph for the time elapsed since `start`.
pub fn spinner_frame(start: Option<Instant>) -> &'static str {
    let elapsed = start.map(|s| s.elapsed().as_millis()).unwrap_or(0);
    FRAMES[(elapsed / FRAME_MILLIS) as usize % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_start_shows_first_frame() {
        assert_eq!(spinner_frame(None), FRAMES[0]);
    }

    #[test]
    fn frame_is_always_a_known_glyph() {
        let frame = spinner_frame(Some(Instant::now()));
        assert!(FRAMES.contains(&frame));
    }
}
