use crate::key::CacheKey;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use storeroute_core::{PairwiseRoutes, Result, RouteError};

const FORMAT_VERSION: u32 = 1;

/// On-disk layout: every cached stop configuration in one document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheDocument {
    version: u32,
    entries: BTreeMap<CacheKey, PairwiseRoutes>,
}

/// File-backed store of [`PairwiseRoutes`] per stop configuration.
#[derive(Clone, Debug)]
pub struct DistanceCache {
    path: PathBuf,
}

impl DistanceCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached routes for `key`, or `None` on any kind of miss.
    pub fn load(&self, key: &CacheKey) -> Option<PairwiseRoutes> {
        let mut document = match self.read_document() {
            Ok(Some(document)) => document,
            Ok(None) => {
                info!("No distance cache at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("{e}; treating the cache as empty");
                return None;
            }
        };

        let entry = document.entries.remove(key);
        match &entry {
            Some(routes) => debug!(
                "Cache hit for {key}: {} edges, {} segments",
                routes.edges.len(),
                routes.segments.len()
            ),
            None => info!("No cache entry for stop configuration {key}"),
        }
        entry
    }

    /// Adds or replaces the entry for `key`, keeping every other entry.
    ///
    /// A file that parses badly is replaced. A file that cannot be read at
    /// all is left alone and the store fails.
    pub fn store(&self, key: &CacheKey, routes: &PairwiseRoutes) -> Result<()> {
        let mut document = match self.read_document() {
            Ok(Some(document)) => document,
            Ok(None) => CacheDocument::default(),
            Err(RouteError::CacheRead { path, source }) => {
                return Err(RouteError::CacheWrite { path, source });
            }
            Err(e) => {
                warn!("{e}; rewriting the cache from scratch");
                CacheDocument::default()
            }
        };
        document.version = FORMAT_VERSION;
        document.entries.insert(key.clone(), routes.clone());

        self.write_document(&document)?;
        info!(
            "Stored {} pairwise paths under {key} in {} ({} entries)",
            routes.edges.len(),
            self.path.display(),
            document.entries.len()
        );
        Ok(())
    }

    /// Keys of every readable entry.
    pub fn keys(&self) -> Vec<CacheKey> {
        match self.read_document() {
            Ok(Some(document)) => document.entries.into_keys().collect(),
            _ => Vec::new(),
        }
    }

    fn corruption(&self, reason: impl Into<String>) -> RouteError {
        RouteError::CacheCorruption {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn read_document(&self) -> Result<Option<CacheDocument>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RouteError::CacheRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if bytes.is_empty() {
            return Err(self.corruption("file is empty"));
        }

        let document: CacheDocument =
            serde_json::from_slice(&bytes).map_err(|e| self.corruption(e.to_string()))?;
        if document.version != FORMAT_VERSION {
            return Err(self.corruption(format!(
                "format version {} (expected {FORMAT_VERSION})",
                document.version
            )));
        }
        Ok(Some(document))
    }

    fn write_document(&self, document: &CacheDocument) -> Result<()> {
        let write_error = |source: io::Error| RouteError::CacheWrite {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_error)?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| write_error(io::Error::other("cache path has no file name")))?;
        let tmp_path = parent.join(format!(
            ".{}.tmp.{}",
            file_name.to_string_lossy(),
            process::id()
        ));

        let contents = serde_json::to_vec(document).map_err(|e| write_error(e.into()))?;
        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&contents)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| rename_overwrite(&tmp_path, &self.path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_error(e));
        }
        Ok(())
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
