use crate::Result;
use crate::tools::{Tool, http_client, truncate_chars};
use async_trait::async_trait;
use serde::Deserialize;

const API_BASE: &str = "https://en.wikipedia.org";
const MAX_QUERY_CHARS: usize = 300;
const NO_RESULT: &str = "No good Wikipedia Search Result was found";

/// Encyclopedia lookup backed by the MediaWiki action API.
///
/// Searches for the best matching article and returns its title plus the
/// plain-text intro, capped at `doc_content_chars_max` characters.
pub struct Wikipedia {
    client: reqwest::Client,
    api_base: String,
    top_k_results: usize,
    doc_content_chars_max: usize,
}

impl Wikipedia {
    pub fn new(doc_content_chars_max: usize) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            api_base: API_BASE.to_string(),
            top_k_results: 1,
            doc_content_chars_max,
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/w/api.php", self.api_base.trim_end_matches('/'))
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>> {
        let limit = self.top_k_results.to_string();
        let res: SearchResponse = self
            .client
            .get(self.endpoint())
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(res.query.search.into_iter().map(|hit| hit.title).collect())
    }

    async fn page_summary(&self, title: &str) -> Result<Option<String>> {
        let res: ExtractResponse = self
            .client
            .get(self.endpoint())
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(res
            .query
            .pages
            .into_iter()
            .find_map(|page| page.extract)
            .filter(|extract| !extract.trim().is_empty()))
    }
}

#[async_trait]
impl Tool for Wikipedia {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn run(&self, query: &str) -> Result<String> {
        let query = truncate_chars(query, MAX_QUERY_CHARS);

        let mut summaries = Vec::new();
        for title in self.search_titles(query).await? {
            if let Some(summary) = self.page_summary(&title).await? {
                summaries.push(format!("Page: {}\nSummary: {}", title, summary));
            }
        }

        if summaries.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        Ok(truncate_chars(&summaries.join("\n\n"), self.doc_content_chars_max).to_string())
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Deserialize)]
struct Page {
    extract: Option<String>,
}
