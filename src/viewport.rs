//! Viewport tracking: which reel counts as "currently shown".
//!
//! A reel becomes dominant once enough of it is on screen, and the change is
//! only committed after it has stayed dominant for the dwell time. Rapid
//! scrolling past reels therefore never starts their playback.

use std::time::{Duration, Instant};

/// Vertical geometry of the scrolled feed, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Row offset of the top of the viewport into the feed.
    pub offset: usize,
    /// Visible rows.
    pub height: usize,
    /// Rows per reel.
    pub item_height: usize,
    pub item_count: usize,
}

impl Viewport {
    /// Fraction of reel `index` that is on screen.
    pub fn visible_fraction(&self, index: usize) -> f32 {
        if self.item_height == 0 {
            return 0.0;
        }
        let top = index * self.item_height;
        let bottom = top + self.item_height;
        let view_bottom = self.offset + self.height;
        let overlap = bottom.min(view_bottom).saturating_sub(top.max(self.offset));
        overlap as f32 / self.item_height as f32
    }

    /// Indices of reels that intersect the viewport.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        if self.item_height == 0 || self.item_count == 0 {
            return 0..0;
        }
        let first = self.offset / self.item_height;
        let last = (self.offset + self.height).div_ceil(self.item_height);
        first.min(self.item_count)..last.min(self.item_count)
    }

    /// First reel showing at least `threshold` of itself.
    pub fn dominant(&self, threshold: f32) -> Option<usize> {
        self.visible_range()
            .find(|&index| self.visible_fraction(index) >= threshold)
    }

    /// Largest useful offset: the last reel aligned to the top.
    pub fn max_offset(&self) -> usize {
        self.item_count.saturating_sub(1) * self.item_height
    }
}

#[derive(Debug, Clone)]
pub struct ViewportTracker {
    min_dwell: Duration,
    committed: Option<usize>,
    pending: Option<(usize, Instant)>,
}

impl ViewportTracker {
    pub fn new(min_dwell: Duration) -> Self {
        Self {
            min_dwell,
            committed: None,
            pending: None,
        }
    }

    pub fn committed(&self) -> Option<usize> {
        self.committed
    }

    /// Record the reel that is dominant right now.
    pub fn observe(&mut self, candidate: Option<usize>, now: Instant) {
        match candidate {
            None => self.pending = None,
            Some(index) if Some(index) == self.committed => self.pending = None,
            Some(index) => {
                if self.pending.map(|(pending, _)| pending) != Some(index) {
                    self.pending = Some((index, now));
                }
            }
        }
    }

    /// Commit the pending reel once it has been dominant long enough.
    /// Returns the newly committed index.
    pub fn poll(&mut self, now: Instant) -> Option<usize> {
        let (index, since) = self.pending?;
        if now.duration_since(since) < self.min_dwell {
            return None;
        }
        self.pending = None;
        self.committed = Some(index);
        Some(index)
    }

    /// Forget everything and treat `index` as already shown.
    pub fn reset(&mut self, index: Option<usize>) {
        self.committed = index;
        self.pending = None;
    }
}
