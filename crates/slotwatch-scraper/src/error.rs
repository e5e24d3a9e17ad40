use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("data not found: {0}")]
    DataNotFound(String),

    #[error("malformed {context}: {source}")]
    MalformedData {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing input: {dataset} is empty or absent")]
    MissingInput { dataset: &'static str },
}
