//! Correlation store backed by a local JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, Correlation, CorrelationKey, MessageHandle};
use crate::ports::CorrelationStore;

#[derive(Debug, Clone)]
pub struct FileCorrelationStore {
    path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    handle: MessageHandle,
    #[serde(default)]
    retired: bool,
}

type Entries = BTreeMap<String, Entry>;

impl FileCorrelationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Entries, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            AppError::Store(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, entries: &Entries) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Store(format!("Failed to serialize correlations: {}", e)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CorrelationStore for FileCorrelationStore {
    fn put(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), Entry { handle: handle.clone(), retired: false });
        self.save(&entries)
    }

    fn lookup(&self, key: &CorrelationKey) -> Result<Correlation, AppError> {
        let entries = self.load()?;
        Ok(match entries.get(&key.to_string()) {
            None => Correlation::Absent,
            Some(entry) if entry.retired => Correlation::Retired,
            Some(entry) => Correlation::Live(entry.handle.clone()),
        })
    }

    fn retire(&self, key: &CorrelationKey, handle: &MessageHandle) -> Result<(), AppError> {
        let mut entries = self.load()?;
        match entries.get_mut(&key.to_string()) {
            Some(entry) if entry.handle == *handle => entry.retired = true,
            _ => return Ok(()),
        }
        self.save(&entries)
    }
}
