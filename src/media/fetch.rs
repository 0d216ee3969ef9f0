// SPDX-License-Identifier: MPL-2.0
//! Asynchronous image and file retrieval over HTTP.
//!
//! Requests run on the executor; decoding is CPU-bound and is moved to the
//! blocking pool so the UI thread never waits on it.

use super::image::{decode, ImageData, ImageKind};
use crate::error::{Error, Result};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Builds the HTTP client shared by every request of the session.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Fetches and decodes an image.
///
/// # Errors
///
/// Returns [`Error::Network`] for transport or HTTP status failures and
/// [`Error::Image`] when the body is not a decodable image.
pub async fn fetch_image(client: Client, url: String, kind: ImageKind) -> Result<ImageData> {
    let response = client.get(&url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    tokio::task::spawn_blocking(move || decode(&bytes, kind))
        .await
        .map_err(|e| Error::Image(e.to_string()))?
}

/// Streams `url` into the file at `destination`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`Error::Network`] when the locator cannot be fetched and
/// [`Error::Io`] when the file cannot be written.
pub async fn download_to_file(client: Client, url: String, destination: PathBuf) -> Result<u64> {
    let response = client.get(&url).send().await?.error_for_status()?;

    let mut file = tokio::fs::File::create(&destination).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relative_locator_is_a_network_error() {
        let err = fetch_image(client(), "#".to_string(), ImageKind::Full)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn download_of_placeholder_locator_fails_without_creating_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let destination = dir.path().join("album.zip");

        let result = download_to_file(client(), "#".to_string(), destination.clone()).await;

        assert!(matches!(result, Err(Error::Network(_))));
        assert!(!destination.exists());
    }
}
