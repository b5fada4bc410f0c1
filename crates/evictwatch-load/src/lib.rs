//! Record loader: resolves a dataset key, reads its body from a remote URL or
//! a local file, and casts it into an immutable [`FilingSet`].

pub mod cast;
pub mod dataset;
mod error;
pub mod parse;

#[cfg(feature = "http")]
pub mod http;

pub use dataset::{DATASETS, DatasetSpec, Format, Resolved, Source, resolve};
pub use error::LoadError;
#[cfg(feature = "http")]
pub use http::DatasetClient;

use std::path::Path;

use evictwatch_core::FilingSet;
use tracing::info;

/// A fully loaded dataset.
#[derive(Debug)]
pub struct LoadedDataset {
    pub name: &'static str,
    pub source: Source,
    pub format: Format,
    pub filings: FilingSet,
}

/// Load a dataset by key, optionally from an overriding URL or path.
///
/// One fetch per call; no partial result is returned on failure.
pub async fn load_dataset(name: &str, location: Option<&str>) -> Result<LoadedDataset, LoadError> {
    let resolved = resolve(name, location)?;
    info!(dataset = resolved.dataset.name, source = %resolved.source, format = %resolved.format, "loading dataset");

    let bytes = match &resolved.source {
        Source::Local(path) => read_local(path).await?,
        Source::Remote(url) => fetch_remote(url).await?,
    };

    let filings = parse::parse_dataset(&bytes, resolved.format, resolved.dataset)?;
    info!(
        dataset = resolved.dataset.name,
        filings = filings.len(),
        excluded = filings.exclusions().total(),
        "dataset loaded"
    );

    Ok(LoadedDataset {
        name: resolved.dataset.name,
        source: resolved.source,
        format: resolved.format,
        filings,
    })
}

async fn read_local(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(feature = "http")]
async fn fetch_remote(url: &str) -> Result<Vec<u8>, LoadError> {
    DatasetClient::new().fetch(url).await
}

#[cfg(not(feature = "http"))]
async fn fetch_remote(url: &str) -> Result<Vec<u8>, LoadError> {
    Err(LoadError::RemoteDisabled(url.to_string()))
}
