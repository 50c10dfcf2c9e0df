use crate::tools::{Tool, http_client};
use crate::{Error, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};

const SEARCH_BASE: &str = "https://html.duckduckgo.com";
const NO_RESULT: &str = "No good DuckDuckGo Search Result was found";

/// Web search over the DuckDuckGo HTML endpoint.
pub struct DuckDuckGo {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
}

impl DuckDuckGo {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: SEARCH_BASE.to_string(),
            max_results: 5,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn snippets(&self, body: &str) -> Result<Vec<String>> {
        let selector = Selector::parse(".result__snippet")
            .map_err(|e| Error::ScrapeError(e.to_string()))?;

        Ok(Html::parse_document(body)
            .select(&selector)
            .map(|el| {
                el.text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|snippet| !snippet.is_empty())
            .take(self.max_results)
            .collect())
    }
}

#[async_trait]
impl Tool for DuckDuckGo {
    fn name(&self) -> &str {
        "search"
    }

    async fn run(&self, query: &str) -> Result<String> {
        let body = self
            .client
            .get(format!("{}/html/", self.base_url.trim_end_matches('/')))
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let snippets = self.snippets(&body)?;
        if snippets.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        Ok(snippets.join(" "))
    }
}
