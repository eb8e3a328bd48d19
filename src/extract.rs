//! Archive extraction
//!
//! Kui ships `.zip` archives on Linux and Windows and a `.tar.bz2` on
//! macOS; the format is inferred from the archive suffix.

use crate::error::{KaskError, KaskResult};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Compression format of a distribution archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarBz2,
}

impl ArchiveFormat {
    /// Infer the format from an archive filename or URL
    pub fn from_name(name: &str) -> Self {
        if name.ends_with(".tar.bz2") {
            Self::TarBz2
        } else {
            Self::Zip
        }
    }

    /// Filename extension for the downloaded archive
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarBz2 => "tar.bz2",
        }
    }
}

/// Extract `archive` into `dest`, which must already exist.
pub async fn extract(archive: &Path, dest: &Path, format: ArchiveFormat) -> KaskResult<()> {
    debug!("extracting {} into {}", archive.display(), dest.display());

    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || match format {
        ArchiveFormat::Zip => extract_zip(&archive, &dest),
        ArchiveFormat::TarBz2 => extract_tar_bz2(&archive, &dest),
    })
    .await
    .map_err(|e| KaskError::Internal(format!("extract task panicked: {}", e)))?
}

fn extract_tar_bz2(archive: &Path, dest: &Path) -> KaskResult<()> {
    let file = File::open(archive).map_err(|e| KaskError::extraction(archive, e))?;
    let decoder = bzip2::read::BzDecoder::new(file);
    let mut tarball = tar::Archive::new(decoder);
    tarball
        .unpack(dest)
        .map_err(|e| KaskError::extraction(archive, e))
}

fn extract_zip(archive: &Path, dest: &Path) -> KaskResult<()> {
    let file = File::open(archive).map_err(|e| KaskError::extraction(archive, e))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| KaskError::extraction(archive, e))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| KaskError::extraction(archive, e))?;

        // reject entries that would escape the destination
        let entry_path: PathBuf = entry
            .enclosed_name()
            .ok_or_else(|| KaskError::extraction(archive, "unsafe entry path in archive"))?;
        let dest_path = dest.join(entry_path);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest_path).map_err(|e| KaskError::extraction(archive, e))?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| KaskError::extraction(archive, e))?;
        }

        let mut out = File::create(&dest_path).map_err(|e| KaskError::extraction(archive, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| KaskError::extraction(archive, e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dest_path, std::fs::Permissions::from_mode(mode))
                .map_err(|e| KaskError::extraction(archive, e))?;
        }
    }

    Ok(())
}
