use serde_json::Value;
use tracing::warn;

/// One page as returned by the video endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// A non-empty batch of video URLs, in server order.
    Videos(Vec<String>),
    /// The server signalled that the catalog is exhausted.
    End,
}

impl Page {
    /// Interpret a decoded JSON body.
    ///
    /// Anything other than a non-empty array counts as end of catalog. Array
    /// entries that are not strings are skipped.
    pub fn from_json(value: Value) -> Self {
        let Value::Array(entries) = value else {
            return Self::End;
        };
        let total = entries.len();
        let urls: Vec<String> = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(url) if !url.is_empty() => Some(url),
                _ => None,
            })
            .collect();
        if urls.len() < total {
            warn!(
                skipped = total - urls.len(),
                "ignoring non-string entries in page"
            );
        }
        if urls.is_empty() {
            Self::End
        } else {
            Self::Videos(urls)
        }
    }
}
