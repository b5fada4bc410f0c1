//! HTTP(S) fetch of remote dataset bodies.

use tracing::info;

use crate::LoadError;

/// Thin wrapper over a shared `reqwest` client.
#[derive(Clone, Default)]
pub struct DatasetClient {
    client: reqwest::Client,
}

impl DatasetClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET `url` and return the body. Non-2xx responses become
    /// [`LoadError::Server`] carrying the response text.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        info!(url = %url, "fetching dataset");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LoadError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        info!(bytes = bytes.len(), "fetched dataset");
        Ok(bytes.to_vec())
    }
}
