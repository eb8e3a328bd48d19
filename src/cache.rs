//! Per-version distribution cache
//!
//! Owns the on-disk layout under the plugin directory:
//!
//! ```text
//! ~/.kask/
//!   bin/kubectl-<basename>          self-symlink for plugin discovery
//!   cache-<version>/
//!     downloaded.<ext>              fetched archive
//!     extract/                      unpacked distribution
//!     success                       readiness marker (empty sentinel)
//! ```
//!
//! The `success` marker is the only trusted signal that `extract/` holds a
//! complete distribution. A crash between extraction and marker creation
//! leaves the cache not-ready and the next invocation re-fetches.

use crate::config::Config;
use crate::dist::{self, Os};
use crate::error::{KaskError, KaskResult};
use crate::extract::{self, ArchiveFormat};
use crate::fetch::{ArchiveFetcher, HttpFetcher};
use crate::version::Version;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Prefix under which kubectl discovers external plugin binaries
pub const KUBECTL_PLUGIN_PREFIX: &str = "kubectl-";

/// Descriptor of the extracted root executable, valid for launching once
/// the owning cache entry is ready
#[derive(Debug, Clone)]
pub struct RootCommand {
    /// Path of the Kui root executable inside the extracted tree
    pub program: PathBuf,
    /// Environment variables to inject on top of the inherited environment
    pub env: Vec<(String, String)>,
}

/// Resolves a (version, OS) pair to a ready local installation
pub struct CacheManager {
    plugin_dir: PathBuf,
    host_override: Option<String>,
    os: Os,
    fetcher: Box<dyn ArchiveFetcher>,
}

impl CacheManager {
    /// Create a cache manager with an explicit fetcher and OS
    pub fn new(
        plugin_dir: PathBuf,
        host_override: Option<String>,
        os: Os,
        fetcher: Box<dyn ArchiveFetcher>,
    ) -> Self {
        Self {
            plugin_dir,
            host_override,
            os,
            fetcher,
        }
    }

    /// Create the production cache manager from loaded configuration
    pub fn from_config(config: &Config) -> KaskResult<Self> {
        Ok(Self::new(
            config.plugin_dir()?,
            config.dist_host(),
            Os::current(),
            Box::new(HttpFetcher),
        ))
    }

    /// Ensure a ready installation of `version` exists, fetching it if
    /// necessary, and return the launchable root command descriptor.
    ///
    /// `force` discards any existing readiness marker and extracted tree
    /// before the check, so the distribution is always re-fetched.
    pub async fn ensure_ready(&self, version: &Version, force: bool) -> KaskResult<RootCommand> {
        debug!("force refetch? {}", force);

        let url = dist::dist_url(version, self.os, self.host_override.as_deref());
        let format = ArchiveFormat::from_name(&url);

        let bin_dir = self.plugin_dir.join("bin");
        let target_dir = self.plugin_dir.join(format!("cache-{}", version));
        let success_marker = target_dir.join("success");
        let extracted_dir = target_dir.join("extract");
        debug!("target dir {}", target_dir.display());

        let executable = std::env::current_exe()
            .map_err(|e| KaskError::io("resolving own executable path", e))?;
        let basename = executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| KaskError::Internal("own executable path has no basename".into()))?;

        let command = RootCommand {
            program: dist::root_executable(&extracted_dir, self.os),
            env: vec![
                ("KUI_BIN_DIR".into(), bin_dir.display().to_string()),
                ("KUI_BIN_PREFIX".into(), KUBECTL_PLUGIN_PREFIX.into()),
                ("KUI_BIN_PREFIX_FOR_COMMANDS".into(), "kubectl".into()),
                ("KUI_BIN".into(), executable.display().to_string()),
                ("KUI_DEFAULT_PRETTY_TYPE".into(), basename.clone()),
            ],
        };

        if force {
            // best-effort reset back to the uninitialized state
            remove_file_quietly(&success_marker, "readiness marker").await;
            remove_dir_quietly(&extracted_dir, "extracted tree").await;
        }

        if fs::metadata(&success_marker).await.is_ok() {
            debug!("using cached download");
            return Ok(command);
        }

        // a partially extracted tree from a crashed run must not leak
        // stale files into the fresh extraction
        remove_dir_quietly(&extracted_dir, "stale extraction remnants").await;

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);
        builder
            .create(&extracted_dir)
            .await
            .map_err(|e| KaskError::io(format!("creating {}", extracted_dir.display()), e))?;

        let downloaded = target_dir.join(format!("downloaded.{}", format.extension()));
        self.fetcher.download(&url, &downloaded).await?;
        debug!("downloaded kui-base to {}", downloaded.display());

        self.link_self(&bin_dir, &executable, &basename).await;

        extract::extract(&downloaded, &extracted_dir, format).await?;
        debug!("extracted kui-base into {}", extracted_dir.display());

        // commit point: only a created marker makes this cache entry ready
        fs::File::create(&success_marker)
            .await
            .map_err(|e| KaskError::io(format!("creating {}", success_marker.display()), e))?;

        info!("installed Kui {} at {}", version, extracted_dir.display());
        Ok(command)
    }

    /// Symlink ourselves into `bin/` as `kubectl-<basename>` so kubectl's
    /// plugin discovery finds this launcher. Failures are logged only.
    async fn link_self(&self, bin_dir: &Path, executable: &Path, basename: &str) {
        let link = bin_dir.join(format!("{}{}", KUBECTL_PLUGIN_PREFIX, basename));

        if let Err(e) = fs::create_dir_all(bin_dir).await {
            debug!("could not create {}: {}", bin_dir.display(), e);
            return;
        }
        let _ = fs::remove_file(&link).await;

        #[cfg(unix)]
        let linked = fs::symlink(executable, &link).await;
        #[cfg(windows)]
        let linked = fs::symlink_file(executable, &link).await;

        match linked {
            Ok(()) => debug!("symlinked ourselves to {}", link.display()),
            Err(e) => debug!("could not symlink to {}: {}", link.display(), e),
        }
    }
}

async fn remove_file_quietly(path: &Path, what: &str) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            debug!("error removing {} {}: {}", what, path.display(), e);
        }
    }
}

async fn remove_dir_quietly(path: &Path, what: &str) {
    if let Err(e) = fs::remove_dir_all(path).await {
        if e.kind() != ErrorKind::NotFound {
            debug!("error removing {} {}: {}", what, path.display(), e);
        }
    }
}
