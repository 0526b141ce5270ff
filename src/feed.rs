//! Feed store: the ordered reels plus pagination cursor.
//!
//! Each reel carries its own playback flags, so the flags can never drift out
//! of step with the list of URLs.

use std::collections::HashSet;

/// One reel in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoItem {
    pub url: String,
    pub playing: bool,
    /// True until the media reports ready, and again while it buffers.
    pub loading: bool,
    /// Set once playback failed. The reel stays in place but never plays.
    pub failure: Option<String>,
}

impl VideoItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            playing: false,
            loading: true,
            failure: None,
        }
    }

    /// Display title derived from the last path segment of the URL.
    pub fn title(&self) -> &str {
        let path = self
            .url
            .split(['?', '#'])
            .next()
            .unwrap_or(&self.url)
            .trim_end_matches('/');
        let name = path.rsplit('/').next().unwrap_or(path);
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        if stem.is_empty() { &self.url } else { stem }
    }
}

/// Whether a fetched page extends the feed or starts it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Append,
    Replace,
}

#[derive(Debug, Clone)]
pub struct FeedState {
    items: Vec<VideoItem>,
    /// Last consumed page; 0 until the first page arrives.
    page: u32,
    has_more: bool,
    current: usize,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            has_more: true,
            current: 0,
        }
    }

    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&VideoItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn urls(&self) -> HashSet<String> {
        self.items.iter().map(|item| item.url.clone()).collect()
    }

    /// Merge a fetched page into the feed and return how many reels were added.
    ///
    /// URLs already in the feed (or repeated within the page) are dropped.
    /// Existing reels keep their flags; the current reel is set playing.
    /// `Replace` starts the feed over, including the page cursor.
    pub fn apply_page(&mut self, page: u32, urls: Vec<String>, mode: FetchMode) -> usize {
        if mode == FetchMode::Replace {
            self.reset();
        }
        let mut seen = self.urls();
        let before = self.items.len();
        for url in urls {
            if seen.insert(url.clone()) {
                self.items.push(VideoItem::new(url));
            }
        }
        if let Some(item) = self.items.get_mut(self.current) {
            item.playing = true;
        }
        self.advance_page(page);
        self.items.len() - before
    }

    /// Move the cursor forward. The cursor never goes backwards.
    pub fn advance_page(&mut self, page: u32) {
        self.page = self.page.max(page);
    }

    pub fn mark_exhausted(&mut self) {
        self.has_more = false;
    }

    /// Make `index` the only playing reel.
    pub fn set_visible(&mut self, index: usize) {
        self.current = index;
        for (i, item) in self.items.iter_mut().enumerate() {
            item.playing = i == index;
        }
    }

    /// Flip play state of a single reel. Other reels are untouched.
    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.playing = !item.playing;
        }
    }

    pub fn set_ready(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.loading = false;
        }
    }

    pub fn set_buffering(&mut self, index: usize, buffering: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.loading = buffering;
        }
    }

    pub fn set_failed(&mut self, index: usize, info: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.failure = Some(info.into());
        }
    }

    /// Drop everything and start pagination over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[cfg(test)]
    pub fn playing_flags(&self) -> Vec<bool> {
        self.items.iter().map(|item| item.playing).collect()
    }

    #[cfg(test)]
    pub fn loading_flags(&self) -> Vec<bool> {
        self.items.iter().map(|item| item.loading).collect()
    }
}
