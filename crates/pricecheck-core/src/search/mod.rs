pub mod links;

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::error::PriceCheckError;
use crate::model::SearchHit;

pub use links::normalize_link;

/// Anything that can answer a text query with a short list of result links.
pub trait SearchClient {
    /// Return at most `max_results` hits for `query`.
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, PriceCheckError>;
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Search page URL; `q` and `num` are appended as query parameters.
    pub endpoint: String,
    /// Pause after each search request.
    pub delay: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.google.com/search".to_string(),
            delay: Duration::from_secs(2),
        }
    }
}

/// Scrapes an HTML search results page (Google result markup).
pub struct WebSearchClient {
    client: Client,
    settings: SearchSettings,
}

impl WebSearchClient {
    pub fn new(client: Client, settings: SearchSettings) -> Self {
        Self { client, settings }
    }

    fn search_url(&self, query: &str, max_results: usize) -> Result<Url, PriceCheckError> {
        let num = max_results.to_string();
        Url::parse_with_params(
            &self.settings.endpoint,
            &[("q", query), ("num", num.as_str())],
        )
        .map_err(|e| PriceCheckError::Search {
            query: query.to_string(),
            reason: format!("invalid search endpoint: {e}"),
        })
    }

    fn fetch_results_page(&self, url: Url, query: &str) -> Result<String, PriceCheckError> {
        let failed = |reason: String| PriceCheckError::Search {
            query: query.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {status}")));
        }
        response.text().map_err(|e| failed(e.to_string()))
    }
}

impl SearchClient for WebSearchClient {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, PriceCheckError> {
        let url = self.search_url(query, max_results)?;
        log::info!("searching for '{}'", query);

        let page = self.fetch_results_page(url, query);
        // The pause applies to failed requests too.
        if !self.settings.delay.is_zero() {
            log::debug!("waiting {:?} after search request", self.settings.delay);
            thread::sleep(self.settings.delay);
        }

        let hits = parse_results(&page?, max_results);
        log::debug!("search for '{}' returned {} hit(s)", query, hits.len());
        Ok(hits)
    }
}

/// Pull (title, link) pairs out of a results page: the first link of each
/// `div.g` result block, in page order, capped at `max_results`.
pub fn parse_results(html: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let (Ok(block_sel), Ok(anchor_sel)) = (Selector::parse("div.g"), Selector::parse("a[href]"))
    else {
        return Vec::new();
    };

    document
        .select(&block_sel)
        .filter_map(|block| block.select(&anchor_sel).next())
        .filter_map(|anchor| {
            let link = anchor.value().attr("href")?.trim();
            if link.is_empty() {
                return None;
            }
            let title = anchor
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            Some(SearchHit {
                title,
                link: link.to_string(),
            })
        })
        .take(max_results)
        .collect()
}
