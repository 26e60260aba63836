use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {symbol}: {message}")]
    UpstreamStatus {
        symbol: String,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid trading pair symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Missing prices for: {}", .0.join(", "))]
    IncompleteReport(Vec<String>),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
