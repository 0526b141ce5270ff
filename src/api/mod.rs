mod client;
mod error;
mod types;

pub use client::VideoClient;
pub use error::FetchError;
pub use types::Page;
