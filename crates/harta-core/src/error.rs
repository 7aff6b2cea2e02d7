use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HartaError {
    /// A page of cards could not be produced (fetch failed, bad status, markup missing).
    #[error("Scrape failure: {0}")]
    ScrapeFailure(String),
    #[error("Invalid selector: {0}")]
    Selector(String),
    #[error("Gazetteer error: {0}")]
    Gazetteer(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, HartaError>;
