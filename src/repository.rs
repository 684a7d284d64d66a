//! Persistence boundary for location layouts.
//!
//! The engine never reads or writes storage. Callers load a [`Location`]
//! through a [`LayoutRepository`], edit it, and save it back after each
//! committed change.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::model::Location;

/// Errors that can occur while loading or saving layouts
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to access layout storage: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no saved layout for location '{location_id}'")]
    NotFound { location_id: String },

    /// The stored document belongs to a different location
    #[error("stored layout is for location '{found}', expected '{expected}'")]
    Mismatch { expected: String, found: String },

    #[error("location id '{0}' cannot be used as a storage key")]
    InvalidId(String),
}

/// Load/save access to location layouts
pub trait LayoutRepository {
    fn load(&self, location_id: &str) -> Result<Location, RepositoryError>;
    fn save(&mut self, location: &Location) -> Result<(), RepositoryError>;
}

/// Repository kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    locations: HashMap<String, Location>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl LayoutRepository for MemoryRepository {
    fn load(&self, location_id: &str) -> Result<Location, RepositoryError> {
        self.locations
            .get(location_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                location_id: location_id.to_string(),
            })
    }

    fn save(&mut self, location: &Location) -> Result<(), RepositoryError> {
        self.locations
            .insert(location.id.clone(), location.clone());
        Ok(())
    }
}

/// One pretty-printed JSON file per location inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that stores the given location
    pub fn path_for(&self, location_id: &str) -> Result<PathBuf, RepositoryError> {
        let usable = !location_id.is_empty()
            && location_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !usable {
            return Err(RepositoryError::InvalidId(location_id.to_string()));
        }
        Ok(self
            .dir
            .join(format!("planwise-map-data-{}.json", location_id)))
    }
}

impl LayoutRepository for JsonFileRepository {
    fn load(&self, location_id: &str) -> Result<Location, RepositoryError> {
        let path = self.path_for(location_id)?;
        let location = match read_location(&path) {
            Err(RepositoryError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepositoryError::NotFound {
                    location_id: location_id.to_string(),
                })
            }
            other => other?,
        };
        if location.id != location_id {
            return Err(RepositoryError::Mismatch {
                expected: location_id.to_string(),
                found: location.id,
            });
        }
        Ok(location)
    }

    fn save(&mut self, location: &Location) -> Result<(), RepositoryError> {
        let path = self.path_for(&location.id)?;
        fs::create_dir_all(&self.dir)?;
        write_location(&path, location)
    }
}

/// Read a layout document from a JSON file
pub fn read_location(path: &Path) -> Result<Location, RepositoryError> {
    let content = fs::read_to_string(path)?;
    let location = serde_json::from_str(&content)?;
    debug!(path = %path.display(), "layout loaded");
    Ok(location)
}

/// Write a layout document as pretty-printed JSON
pub fn write_location(path: &Path, location: &Location) -> Result<(), RepositoryError> {
    let json = serde_json::to_string_pretty(location)?;
    fs::write(path, json + "\n")?;
    debug!(path = %path.display(), location = %location.id, "layout saved");
    Ok(())
}
