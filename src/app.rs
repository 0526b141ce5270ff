use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{FetchError, VideoClient};
use crate::feed::{FeedState, FetchMode};
use crate::pager::{self, PageOutcome, PageRequest};
use crate::playback::{self, PlaybackEvent, PlaybackEventKind};
use crate::settings::FeedConfig;
use crate::theme::ResolvedTheme;
use crate::viewport::{Viewport, ViewportTracker};

/// Rows taken by the header line and the status bar.
pub const CHROME_ROWS: u16 = 2;

pub enum AsyncResult {
    Page {
        generation: u64,
        task_id: u64,
        mode: FetchMode,
        result: Result<PageOutcome, FetchError>,
    },
    Playback {
        generation: u64,
        event: PlaybackEvent,
    },
}

#[derive(Debug)]
pub struct TaskInfo {
    pub id: u64,
    pub description: String,
    pub started_at: Instant,
}

#[derive(Debug)]
pub struct LogEntry {
    pub message: String,
}

/// Debug panel state: task tracking and log messages.
#[derive(Debug, Default)]
pub struct DebugState {
    pub visible: bool,
    pub running_tasks: Vec<TaskInfo>,
    pub log: VecDeque<LogEntry>,
    next_task_id: u64,
}

impl DebugState {
    const MAX_LOG_ENTRIES: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        self.log.push_back(LogEntry {
            message: msg.into(),
        });
        if self.log.len() > Self::MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    pub fn start_task(&mut self, description: impl Into<String>) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        let desc = description.into();
        self.log(format!("Started: {}", desc));
        self.running_tasks.push(TaskInfo {
            id,
            description: desc,
            started_at: Instant::now(),
        });
        id
    }

    pub fn end_task(&mut self, id: u64, outcome: &str) {
        if let Some(pos) = self.running_tasks.iter().position(|t| t.id == id) {
            let task = self.running_tasks.remove(pos);
            let elapsed = task.started_at.elapsed();
            self.log(format!("{} {}: {:.2?}", task.description, outcome, elapsed));
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// Loading state for page fetches. At most one fetch is in flight.
#[derive(Debug, Default)]
pub struct LoadState {
    pub loading: bool,
    pub loading_start: Option<Instant>,
    pub loading_more: bool,
    pub error: Option<String>,
}

impl LoadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.loading_start = Some(Instant::now());
        }
        // Don't clear loading_start when done - used for minimum spinner duration
    }

    pub fn in_flight(&self) -> bool {
        self.loading || self.loading_more
    }

    pub fn should_show_spinner(&self) -> bool {
        const MIN_SPINNER_DURATION: std::time::Duration = std::time::Duration::from_millis(500);
        if self.loading_more {
            return true;
        }
        if let Some(start) = self.loading_start {
            self.loading || start.elapsed() < MIN_SPINNER_DURATION
        } else {
            false
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    NextReel,
    PrevReel,
    ScrollDown,
    ScrollUp,
    FirstReel,
    LastReel,
    TogglePlay,
    OpenVideo,
    Refresh,
    ToggleHelp,
    ToggleDebug,
    Quit,
    UpdateViewportHeight(u16),
}

impl Message {
    /// Acting on the feed or retrying clears a fetch notice. Pane toggles and
    /// resizes leave it up.
    fn dismisses_notice(&self) -> bool {
        !matches!(
            self,
            Message::ToggleHelp
                | Message::ToggleDebug
                | Message::Quit
                | Message::UpdateViewportHeight(_)
        )
    }
}

pub struct App {
    pub feed: FeedState,
    pub load: LoadState,
    pub config: FeedConfig,
    pub client: VideoClient,
    pub theme: ResolvedTheme,
    pub tracker: ViewportTracker,
    /// Row offset of the top of the reel area into the feed.
    pub scroll_offset: usize,
    pub viewport_height: Option<u16>,
    pub should_quit: bool,
    pub show_help: bool,
    // Async task management
    pub result_tx: mpsc::Sender<AsyncResult>,
    pub result_rx: mpsc::Receiver<AsyncResult>,
    pub generation: u64,
    pub debug: DebugState,
    /// URLs whose media probe has been started this generation.
    pub probed: HashSet<String>,
    /// Cancelled when the feed goes away; late task results are dropped.
    pub alive: CancellationToken,
}

impl App {
    pub fn new(theme: ResolvedTheme, config: FeedConfig, client: VideoClient) -> Self {
        let (result_tx, result_rx) = mpsc::channel(32);
        let mut tracker = ViewportTracker::new(config.min_dwell);
        tracker.reset(Some(0));
        Self {
            feed: FeedState::new(),
            load: LoadState::new(),
            config,
            client,
            theme,
            tracker,
            scroll_offset: 0,
            viewport_height: None,
            should_quit: false,
            show_help: false,
            result_tx,
            result_rx,
            generation: 0,
            debug: DebugState::new(),
            probed: HashSet::new(),
            alive: CancellationToken::new(),
        }
    }

    /// Stop accepting results from background tasks and cancel them.
    pub fn unmount(&mut self) {
        if !self.alive.is_cancelled() {
            info!(videos = self.feed.len(), "closing feed");
            self.alive.cancel();
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.alive.is_cancelled()
    }

    pub fn reel_height(&self) -> usize {
        self.viewport_height
            .map(|h| h.saturating_sub(CHROME_ROWS).max(1) as usize)
            .unwrap_or(1)
    }

    pub fn viewport(&self) -> Viewport {
        let height = self.reel_height();
        Viewport {
            offset: self.scroll_offset,
            height,
            item_height: height,
            item_count: self.feed.len(),
        }
    }

    /// The reel that takes up most of the screen right now.
    pub fn reel_on_screen(&self) -> Option<usize> {
        self.viewport()
            .dominant(self.config.visible_threshold)
            .or_else(|| (!self.feed.is_empty()).then(|| self.feed.current()))
    }

    pub fn handle_async_result(&mut self, result: AsyncResult) {
        if !self.is_mounted() {
            return;
        }
        match result {
            AsyncResult::Page {
                generation,
                task_id,
                mode,
                result,
            } => {
                if generation != self.generation {
                    self.debug.end_task(task_id, "discarded (stale)");
                    return;
                }
                self.debug.end_task(
                    task_id,
                    if result.is_ok() {
                        "completed"
                    } else {
                        "failed"
                    },
                );
                self.load.set_loading(false);
                self.load.loading_more = false;
                match result {
                    Ok(outcome) => self.apply_outcome(outcome, mode),
                    Err(e) => {
                        warn!(error = %e, page = self.feed.next_page(), "page fetch failed");
                        self.debug.log(format!("Fetch failed: {}", e));
                        self.load.set_error(e.user_message());
                    }
                }
            }
            AsyncResult::Playback { generation, event } => {
                if generation != self.generation {
                    return;
                }
                if playback::apply(&mut self.feed, &event)
                    && let PlaybackEventKind::Error(info) = &event.kind
                {
                    self.debug
                        .log(format!("Playback error on #{}: {}", event.index + 1, info));
                }
            }
        }
    }

    fn apply_outcome(&mut self, outcome: PageOutcome, mode: FetchMode) {
        if mode == FetchMode::Replace {
            self.reset_view();
        }
        match outcome {
            PageOutcome::Fresh { page, urls } => {
                let added = self.feed.apply_page(page, urls, mode);
                info!(page, added, total = self.feed.len(), "page applied");
                self.debug.log(format!("Page {}: +{} videos", page, added));
                self.schedule_probes();
                self.maybe_load_more();
            }
            PageOutcome::End { consumed } => {
                if mode == FetchMode::Replace {
                    self.feed.reset();
                }
                if let Some(page) = consumed {
                    self.feed.advance_page(page);
                }
                self.feed.mark_exhausted();
                self.debug.log("End of catalog");
            }
            PageOutcome::SkipLimit { consumed } => {
                if mode == FetchMode::Replace {
                    self.feed.reset();
                }
                self.feed.advance_page(consumed);
                warn!(
                    page = consumed,
                    max = self.config.max_page_skips,
                    "too many pages without new videos, pausing pagination"
                );
                self.debug
                    .log(format!("Skipped through page {} without new videos", consumed));
            }
        }
    }

    pub fn update(&mut self, msg: Message) {
        if msg.dismisses_notice() {
            self.load.clear_error();
        }
        let now = Instant::now();

        match msg {
            Message::NextReel => self.next_reel(now),
            Message::PrevReel => self.prev_reel(now),
            Message::ScrollDown => self.nudge(true, now),
            Message::ScrollUp => self.nudge(false, now),
            Message::FirstReel => self.scroll_to(0, now),
            Message::LastReel => {
                let last = self.viewport().max_offset();
                self.scroll_to(last, now);
            }
            Message::TogglePlay => self.toggle_play(),
            Message::OpenVideo => self.open_video(),
            Message::Refresh => self.refresh(),
            Message::ToggleHelp => self.show_help = !self.show_help,
            Message::ToggleDebug => self.debug.toggle(),
            Message::Quit => {
                self.should_quit = true;
                self.unmount();
            }
            Message::UpdateViewportHeight(height) => {
                self.viewport_height = Some(height);
                // Keep the committed reel aligned when the reel size changes.
                self.scroll_offset = self.feed.current() * self.reel_height();
                self.observe_viewport(now);
            }
        }
    }

    /// Commit a pending viewport change once its dwell time has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(index) = self.tracker.poll(now) {
            self.commit_viewport(index);
        }
    }

    fn commit_viewport(&mut self, index: usize) {
        debug!(index, "viewport settled");
        self.feed.set_visible(index);
        self.schedule_probes();
        self.maybe_load_more();
    }

    fn observe_viewport(&mut self, now: Instant) {
        let candidate = self.viewport().dominant(self.config.visible_threshold);
        self.tracker.observe(candidate, now);
    }

    fn scroll_to(&mut self, offset: usize, now: Instant) {
        let max = self.viewport().max_offset();
        self.scroll_offset = offset.min(max);
        self.observe_viewport(now);
        // The committed reel can't change at the end, so pushing past it retries.
        if offset >= max {
            self.maybe_load_more();
        }
    }

    fn next_reel(&mut self, now: Instant) {
        let height = self.reel_height();
        let target = (self.scroll_offset / height + 1) * height;
        self.scroll_to(target, now);
    }

    fn prev_reel(&mut self, now: Instant) {
        let height = self.reel_height();
        let index = if self.scroll_offset % height == 0 {
            (self.scroll_offset / height).saturating_sub(1)
        } else {
            self.scroll_offset / height
        };
        self.scroll_to(index * height, now);
    }

    fn nudge(&mut self, down: bool, now: Instant) {
        let step = (self.reel_height() / 3).max(1);
        let target = if down {
            self.scroll_offset + step
        } else {
            self.scroll_offset.saturating_sub(step)
        };
        self.scroll_to(target, now);
    }

    fn toggle_play(&mut self) {
        if let Some(index) = self.reel_on_screen() {
            self.feed.toggle(index);
        }
    }

    fn open_video(&mut self) {
        let Some(url) = self
            .reel_on_screen()
            .and_then(|index| self.feed.get(index))
            .map(|item| item.url.clone())
        else {
            return;
        };
        if let Err(e) = open::that(&url) {
            warn!(error = %e, url = %url, "failed to open video");
            self.load.set_error(format!("Could not open video: {e}"));
        }
    }

    fn reset_view(&mut self) {
        self.scroll_offset = 0;
        self.tracker.reset(Some(0));
        self.probed.clear();
    }

    /// Start the feed from page one, dropping any fetch still in flight.
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.load.loading_more = false;
        self.load.set_loading(true);
        self.spawn_page_fetch(1, FetchMode::Replace);
    }

    pub fn should_load_more(&self) -> bool {
        !self.load.in_flight()
            && self.feed.has_more()
            && !self.feed.is_empty()
            && self.feed.current() + self.config.prefetch_distance >= self.feed.len()
    }

    fn maybe_load_more(&mut self) {
        if self.should_load_more() {
            self.load_more();
        }
    }

    fn load_more(&mut self) {
        if self.load.in_flight() || !self.feed.has_more() {
            return;
        }
        self.load.loading_more = true;
        self.spawn_page_fetch(self.feed.next_page(), FetchMode::Append);
    }

    /// Spawn an async task to fetch the next page with unseen videos.
    ///
    /// - `page`: First page to request
    /// - `mode`: `Append` dedups against the current feed, `Replace` starts over
    fn spawn_page_fetch(&mut self, page: u32, mode: FetchMode) {
        let client = self.client.clone();
        let tx = self.result_tx.clone();
        let alive = self.alive.clone();
        let generation = self.generation;
        let request = PageRequest {
            page,
            known: match mode {
                FetchMode::Append => self.feed.urls(),
                FetchMode::Replace => HashSet::new(),
            },
            max_skips: self.config.max_page_skips,
        };

        let task_desc = match mode {
            FetchMode::Append => format!("Load page {}", page),
            FetchMode::Replace => "Load videos".to_string(),
        };
        let task_id = self.debug.start_task(task_desc);
        debug!(page, ?mode, generation, "spawning page fetch");

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = alive.cancelled() => return,
                result = pager::fetch_fresh(&client, request) => result,
            };
            let _ = tx
                .send(AsyncResult::Page {
                    generation,
                    task_id,
                    mode,
                    result,
                })
                .await;
        });
    }

    /// Probe media for the current reel and the few after it.
    fn schedule_probes(&mut self) {
        let start = self.feed.current();
        let end = (start + self.config.preload_ahead + 1).min(self.feed.len());
        for index in start..end {
            let Some(item) = self.feed.get(index) else {
                continue;
            };
            if !item.loading || item.failure.is_some() || self.probed.contains(&item.url) {
                continue;
            }
            let url = item.url.clone();
            self.probed.insert(url.clone());
            let generation = self.generation;
            playback::spawn_probe(
                self.client.clone(),
                index,
                url,
                self.alive.clone(),
                self.result_tx.clone(),
                move |event| AsyncResult::Playback { generation, event },
            );
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.alive.cancel();
    }
}
