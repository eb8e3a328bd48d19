//! Archive download
//!
//! Streams the HTTP response body straight to disk so even the large
//! Electron-based distributions never sit in memory.

use crate::error::{KaskError, KaskResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fetches a distribution archive to a local path
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Download `url` to `dest`, overwriting any existing file.
    ///
    /// No retries and no timeout beyond the transport default; any HTTP
    /// or filesystem error aborts the download.
    async fn download(&self, url: &str, dest: &Path) -> KaskResult<()>;
}

/// Production fetcher backed by a plain unauthenticated HTTPS GET
pub struct HttpFetcher;

#[async_trait]
impl ArchiveFetcher for HttpFetcher {
    async fn download(&self, url: &str, dest: &Path) -> KaskResult<()> {
        debug!("downloading {} to {}", url, dest.display());

        let url = url.to_string();
        let dest: PathBuf = dest.to_path_buf();
        tokio::task::spawn_blocking(move || download_blocking(&url, &dest))
            .await
            .map_err(|e| KaskError::Internal(format!("download task panicked: {}", e)))?
    }
}

fn download_blocking(url: &str, dest: &Path) -> KaskResult<()> {
    let resp = ureq::get(url)
        .call()
        .map_err(|e| KaskError::download(url, e))?;

    let mut reader = resp.into_body().into_reader();
    let mut out = std::fs::File::create(dest)
        .map_err(|e| KaskError::io(format!("creating {}", dest.display()), e))?;

    let bytes = std::io::copy(&mut reader, &mut out).map_err(|e| KaskError::download(url, e))?;
    debug!("downloaded {} bytes", bytes);
    Ok(())
}
