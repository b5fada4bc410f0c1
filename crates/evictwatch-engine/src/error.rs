use evictwatch_core::WindowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
