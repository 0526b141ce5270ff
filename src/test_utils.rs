//! Test data builders for app and view testing.

use std::time::{Duration, Instant};

use crate::api::VideoClient;
use crate::app::App;
use crate::feed::FetchMode;
use crate::settings::FeedConfig;
use crate::theme::{ResolvedTheme, ThemeVariant, default_for_variant};

/// Nothing listens here, so stray probes fail fast instead of reaching the network.
pub const DEAD_HOST: &str = "http://127.0.0.1:9";

pub fn sample_urls() -> Vec<String> {
    [
        "monks_chanting.mp4",
        "ocean_waves.mp4",
        "city_timelapse.mp4",
        "forest_rain.mp4",
        "night_train.mp4",
    ]
    .iter()
    .map(|name| format!("{DEAD_HOST}/videos/{name}"))
    .collect()
}

#[allow(dead_code)]
pub struct TestAppBuilder {
    urls: Vec<String>,
    page: u32,
    current: usize,
    has_more: bool,
    loading: bool,
    loading_more: bool,
    error: Option<String>,
    show_help: bool,
    theme: ResolvedTheme,
    viewport_height: Option<u16>,
    config: FeedConfig,
    ready: Vec<usize>,
    failed: Vec<(usize, String)>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            urls: Vec::new(),
            page: 1,
            current: 0,
            has_more: true,
            loading: false,
            loading_more: false,
            error: None,
            show_help: false,
            theme: default_for_variant(ThemeVariant::Dark),
            viewport_height: None,
            config: FeedConfig {
                endpoint: format!("{DEAD_HOST}/videos"),
                request_timeout: Duration::from_secs(1),
                ..FeedConfig::default()
            },
            ready: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.urls = urls;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn current(mut self, index: usize) -> Self {
        self.current = index;
        self
    }

    pub fn has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn loading(mut self) -> Self {
        self.loading = true;
        self
    }

    pub fn loading_more(mut self, loading: bool) -> Self {
        self.loading_more = loading;
        self
    }

    pub fn error(mut self, msg: &str) -> Self {
        self.error = Some(msg.to_string());
        self
    }

    pub fn show_help(mut self) -> Self {
        self.show_help = true;
        self
    }

    pub fn theme(mut self, theme: ResolvedTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn viewport_height(mut self, height: u16) -> Self {
        self.viewport_height = Some(height);
        self
    }

    pub fn prefetch_distance(mut self, distance: usize) -> Self {
        self.config.prefetch_distance = distance;
        self
    }

    pub fn ready(mut self, index: usize) -> Self {
        self.ready.push(index);
        self
    }

    pub fn failed(mut self, index: usize, info: &str) -> Self {
        self.failed.push((index, info.to_string()));
        self
    }

    pub fn build(self) -> App {
        let client = VideoClient::new(self.config.endpoint.clone(), self.config.request_timeout)
            .expect("test client");
        let mut app = App::new(self.theme, self.config, client);

        if !self.urls.is_empty() {
            app.feed.apply_page(self.page, self.urls, FetchMode::Append);
        }
        if !self.has_more {
            app.feed.mark_exhausted();
        }
        app.feed.set_visible(self.current);
        for index in self.ready {
            app.feed.set_ready(index);
        }
        for (index, info) in self.failed {
            app.feed.set_failed(index, info);
        }

        app.viewport_height = self.viewport_height;
        app.scroll_offset = self.current * app.reel_height();
        app.tracker.reset(Some(self.current));

        app.load.loading = self.loading;
        if self.loading {
            app.load.loading_start = Some(Instant::now());
        }
        app.load.loading_more = self.loading_more;
        app.load.error = self.error;
        app.show_help = self.show_help;
        app
    }
}
