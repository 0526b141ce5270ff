//! Playback surface callbacks and the media probe that drives them.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::VideoClient;
use crate::feed::FeedState;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEventKind {
    Ready,
    Buffering(bool),
    Error(String),
}

/// A report from the media layer about one reel.
///
/// The URL travels with the index so a report for a reel that has since been
/// replaced can be recognised and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackEvent {
    pub index: usize,
    pub url: String,
    pub kind: PlaybackEventKind,
}

impl PlaybackEvent {
    pub fn new(index: usize, url: impl Into<String>, kind: PlaybackEventKind) -> Self {
        Self {
            index,
            url: url.into(),
            kind,
        }
    }
}

/// Apply a playback report to the feed. Returns false if it was stale.
pub fn apply(feed: &mut FeedState, event: &PlaybackEvent) -> bool {
    let matches = feed
        .get(event.index)
        .is_some_and(|item| item.url == event.url);
    if !matches {
        debug!(index = event.index, url = %event.url, "dropping stale playback event");
        return false;
    }
    match &event.kind {
        PlaybackEventKind::Ready => feed.set_ready(event.index),
        PlaybackEventKind::Buffering(buffering) => feed.set_buffering(event.index, *buffering),
        PlaybackEventKind::Error(info) => {
            warn!(index = event.index, url = %event.url, error = %info, "playback failed");
            feed.set_failed(event.index, info.clone());
        }
    }
    true
}

/// Probe one reel's media in the background and report through `tx`.
pub fn spawn_probe<T>(
    client: VideoClient,
    index: usize,
    url: String,
    alive: CancellationToken,
    tx: mpsc::Sender<T>,
    wrap: impl Fn(PlaybackEvent) -> T + Send + 'static,
) where
    T: Send + 'static,
{
    tokio::spawn(async move {
        let buffering = PlaybackEvent::new(index, url.clone(), PlaybackEventKind::Buffering(true));
        if tx.send(wrap(buffering)).await.is_err() {
            return;
        }
        let result = tokio::select! {
            _ = alive.cancelled() => return,
            result = client.probe(&url) => result,
        };
        let kind = match result {
            Ok(()) => PlaybackEventKind::Ready,
            Err(e) => PlaybackEventKind::Error(e.user_message()),
        };
        let _ = tx.send(wrap(PlaybackEvent::new(index, url, kind))).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::feed::FetchMode;

    fn feed() -> FeedState {
        let mut feed = FeedState::new();
        feed.apply_page(
            1,
            vec!["a.mp4".into(), "b.mp4".into(), "c.mp4".into()],
            FetchMode::Append,
        );
        feed
    }

    #[test]
    fn ready_clears_loading() {
        let mut feed = feed();
        assert!(apply(
            &mut feed,
            &PlaybackEvent::new(1, "b.mp4", PlaybackEventKind::Buffering(true))
        ));
        assert!(apply(
            &mut feed,
            &PlaybackEvent::new(1, "b.mp4", PlaybackEventKind::Ready)
        ));
        assert!(!feed.items()[1].loading);
    }

    #[test]
    fn error_marks_reel_failed() {
        let mut feed = feed();
        apply(
            &mut feed,
            &PlaybackEvent::new(2, "c.mp4", PlaybackEventKind::Error("Video not found.".into())),
        );
        assert_eq!(feed.items()[2].failure.as_deref(), Some("Video not found."));
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn mismatched_url_is_ignored() {
        let mut feed = feed();
        let applied = apply(
            &mut feed,
            &PlaybackEvent::new(0, "old.mp4", PlaybackEventKind::Ready),
        );
        assert!(!applied);
        assert!(feed.items()[0].loading);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut feed = feed();
        assert!(!apply(
            &mut feed,
            &PlaybackEvent::new(7, "a.mp4", PlaybackEventKind::Ready)
        ));
    }

    #[tokio::test]
    async fn probe_reports_buffering_then_ready() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/a.mp4"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), Duration::from_secs(2)).unwrap();
        let (tx, mut rx) = mpsc::channel(4);
        let url = format!("{}/a.mp4", server.uri());
        spawn_probe(client, 0, url.clone(), CancellationToken::new(), tx, |e| e);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.kind, PlaybackEventKind::Buffering(true));
        let second = rx.recv().await.unwrap();
        assert_eq!(second, PlaybackEvent::new(0, url, PlaybackEventKind::Ready));
    }

    #[tokio::test]
    async fn cancelled_probe_stays_silent() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = VideoClient::new(server.uri(), Duration::from_secs(2)).unwrap();
        let (tx, mut rx) = mpsc::channel(4);
        let alive = CancellationToken::new();
        spawn_probe(
            client,
            0,
            format!("{}/a.mp4", server.uri()),
            alive.clone(),
            tx,
            |e| e,
        );

        assert!(rx.recv().await.is_some());
        alive.cancel();
        assert!(rx.recv().await.is_none());
    }
}
