//! Page fetcher: pulls the next page that still has unseen videos.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::api::{FetchError, Page, VideoClient};

/// Anything that can serve numbered pages of video URLs.
pub trait PageSource {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<Page, FetchError>> + Send;
}

impl PageSource for VideoClient {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<Page, FetchError>> + Send {
        VideoClient::fetch_page(self, page)
    }
}

#[derive(Debug, Clone)]
pub struct PageRequest {
    /// First page to try.
    pub page: u32,
    /// URLs the feed already holds.
    pub known: HashSet<String>,
    /// How many all-duplicate pages may be skipped before giving up.
    pub max_skips: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A page with at least one unseen URL.
    Fresh { page: u32, urls: Vec<String> },
    /// The catalog ended. `consumed` is the last all-duplicate page skipped
    /// on the way, if any.
    End { consumed: Option<u32> },
    /// Every page up to `consumed` held only known URLs and the skip budget ran out.
    SkipLimit { consumed: u32 },
}

/// Drop known URLs and in-page repeats, keeping server order.
pub fn dedup(urls: Vec<String>, known: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| !known.contains(url) && seen.insert(url.clone()))
        .collect()
}

/// Fetch pages starting at `request.page` until one yields unseen URLs.
pub async fn fetch_fresh<S: PageSource>(
    source: &S,
    request: PageRequest,
) -> Result<PageOutcome, FetchError> {
    let mut page = request.page;
    let mut consumed = None;

    // At least one page is always requested.
    for _ in 0..request.max_skips.max(1) {
        let urls = match source.fetch_page(page).await? {
            Page::Videos(urls) => urls,
            Page::End => {
                info!(page, "catalog exhausted");
                return Ok(PageOutcome::End { consumed });
            }
        };
        let fetched = urls.len();
        let fresh = dedup(urls, &request.known);
        if !fresh.is_empty() {
            debug!(page, fetched, fresh = fresh.len(), "page has unseen videos");
            return Ok(PageOutcome::Fresh { page, urls: fresh });
        }
        debug!(page, fetched, "page holds only known videos, skipping");
        consumed = Some(page);
        page += 1;
    }

    Ok(PageOutcome::SkipLimit {
        consumed: page - 1,
    })
}
