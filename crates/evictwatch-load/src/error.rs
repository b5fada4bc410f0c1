use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("file extension {0:?} not supported")]
    UnsupportedFormat(String),

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("remote source {0} needs the `http` feature")]
    RemoteDisabled(String),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unexpected dataset layout: {0}")]
    Shape(String),

    #[error("row {row}, column {column}: {reason}")]
    Cast {
        row: usize,
        column: &'static str,
        reason: String,
    },
}

impl LoadError {
    /// Whether retrying the whole load could succeed without a config change.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            LoadError::Http(_) => true,
            LoadError::Server { status, .. } => *status >= 500 || *status == 429,
            LoadError::Io { .. } => true,
            _ => false,
        }
    }
}
