//! Page fetching: downloads the booking page and splits out its scripts.

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;

use crate::error::ScraperError;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"));

/// Supplies the raw text blocks of the booking page.
///
/// Implementations never fail: any transport or HTTP problem is logged and
/// reported as an empty page.
pub trait PageSource {
    fn fetch_blocks(&self) -> impl Future<Output = Vec<String>> + Send;
}

/// Returns the body of every `<script>` element in `html`, in document order.
#[must_use]
pub fn extract_script_blocks(html: &str) -> Vec<String> {
    SCRIPT_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// [`PageSource`] backed by a `reqwest` client pointed at one page URL.
pub struct HttpPageSource {
    client: Client,
    page_url: String,
}

impl HttpPageSource {
    /// Creates a source with the configured request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(page_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            page_url: page_url.to_owned(),
        })
    }

    #[must_use]
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// Fetches `url` and returns its body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ScraperError::Http`] on network, timeout or body decoding failure.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_blocks(&self) -> Vec<String> {
        match self.fetch_html(&self.page_url).await {
            Ok(html) => {
                let blocks = extract_script_blocks(&html);
                tracing::debug!(url = %self.page_url, blocks = blocks.len(), "fetched page");
                blocks
            }
            Err(err) => {
                tracing::warn!(url = %self.page_url, error = %err, "error fetching page");
                Vec::new()
            }
        }
    }
}
