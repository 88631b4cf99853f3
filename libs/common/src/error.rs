//! Unified error type for the clearing engine and its driver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Catalog config unreadable ({path}): {source}")]
    ConfigUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog config malformed: {0}")]
    ConfigMalformed(String),

    #[error("Duplicate site in catalog: {0}")]
    DuplicateSite(String),

    #[error("Duplicate bidder in catalog: {0}")]
    DuplicateBidder(String),

    #[error("Auction input unreadable ({path}): {source}")]
    InputUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Auction input malformed: {0}")]
    InputMalformed(String),

    #[error("Failed to write results: {0}")]
    OutputWrite(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
