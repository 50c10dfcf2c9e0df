use crate::Result;
use async_trait::async_trait;

mod save_file;
pub use save_file::{SaveToFile, sanitize_for_filename};

mod web_search;
pub use web_search::DuckDuckGo;

mod wikipedia;
pub use wikipedia::Wikipedia;

/// A lookup collaborator that turns a free-text query into context text.
#[async_trait]
pub trait Tool {
    fn name(&self) -> &str;

    async fn run(&self, query: &str) -> Result<String>;
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("research-assistant/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
