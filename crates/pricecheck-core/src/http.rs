use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::error::PriceCheckError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0 Safari/537.36";

/// Settings for the HTTP session shared by search and page fetching.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Whole-request timeout applied to every call.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Build the blocking client. Cloning the result shares its connection pool.
pub fn build_client(settings: &HttpSettings) -> Result<Client, PriceCheckError> {
    let mut headers = HeaderMap::new();
    let agent = HeaderValue::from_str(&settings.user_agent)
        .map_err(|e| PriceCheckError::HttpClient(format!("invalid user agent: {e}")))?;
    headers.insert(USER_AGENT, agent);

    Client::builder()
        .timeout(settings.timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| PriceCheckError::HttpClient(e.to_string()))
}
