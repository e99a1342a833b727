// ── Local fallback cache ──
//
// One named slot holding the last known apartment sequence as a JSON
// array. Read once when the store initializes, overwritten after every
// successful mutation. Advisory only: a network response always wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::CacheLocation;
use crate::model::Apartment;

/// File name of the on-disk slot.
pub const CACHE_FILE_NAME: &str = "apartments.json";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write cache {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cache {path} is not a valid apartment list: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize apartments: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted mirror of the apartment collection.
pub trait ApartmentCache: Send + Sync {
    /// The last saved sequence; empty when nothing has been saved yet.
    fn load(&self) -> Result<Vec<Apartment>, CacheError>;

    /// Replace the saved sequence.
    fn save(&self, apartments: &[Apartment]) -> Result<(), CacheError>;
}

// ── JSON file slot ──────────────────────────────────────────────────

/// Cache slot backed by a single JSON file.
///
/// Writes go to a sibling temp file and are renamed into place, so a reader
/// never observes a half-written list.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_else(|| CACHE_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ApartmentCache for JsonFileCache {
    fn load(&self) -> Result<Vec<Apartment>, CacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no apartment cache yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|source| CacheError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, apartments: &[Apartment]) -> Result<(), CacheError> {
        let write_err = |source| CacheError::Write {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_vec(apartments)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        trace!(path = %self.path.display(), count = apartments.len(), "apartment cache saved");
        Ok(())
    }
}

// ── In-memory slot ──────────────────────────────────────────────────

/// Cache slot that lives only as long as the process. Used by tests and
/// cache-less runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    slot: Mutex<Option<Vec<Apartment>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `apartments`, as if saved by an earlier run.
    pub fn with_contents(apartments: Vec<Apartment>) -> Self {
        Self {
            slot: Mutex::new(Some(apartments)),
        }
    }

    /// What is currently saved, if anything.
    pub fn contents(&self) -> Option<Vec<Apartment>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ApartmentCache for MemoryCache {
    fn load(&self) -> Result<Vec<Apartment>, CacheError> {
        Ok(self.contents().unwrap_or_default())
    }

    fn save(&self, apartments: &[Apartment]) -> Result<(), CacheError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(apartments.to_vec());
        Ok(())
    }
}

// ── Configured slot ─────────────────────────────────────────────────

/// The cache chosen by [`CacheLocation`], dispatched statically.
#[derive(Debug)]
pub enum CacheSlot {
    File(JsonFileCache),
    Memory(MemoryCache),
}

impl CacheSlot {
    pub fn from_location(location: &CacheLocation) -> Self {
        match location {
            CacheLocation::File(path) => Self::File(JsonFileCache::new(path.clone())),
            CacheLocation::Memory => Self::Memory(MemoryCache::new()),
        }
    }
}

impl ApartmentCache for CacheSlot {
    fn load(&self) -> Result<Vec<Apartment>, CacheError> {
        match self {
            Self::File(cache) => cache.load(),
            Self::Memory(cache) => cache.load(),
        }
    }

    fn save(&self, apartments: &[Apartment]) -> Result<(), CacheError> {
        match self {
            Self::File(cache) => cache.save(apartments),
            Self::Memory(cache) => cache.save(apartments),
        }
    }
}
