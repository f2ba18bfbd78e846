use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::StoreError;
use crate::record::VerificationCheckpoint;
use crate::step::StepName;

/// Storage backend for certified checkpoints, keyed by step name.
pub trait CheckpointStore {
    /// Write a checkpoint, replacing any record of the same name.
    fn put(&mut self, checkpoint: &VerificationCheckpoint) -> Result<(), StoreError>;

    fn get(&self, name: StepName) -> Result<Option<VerificationCheckpoint>, StoreError>;

    /// Returns whether a record was removed.
    fn remove(&mut self, name: StepName) -> Result<bool, StoreError>;

    /// Every stored step name, sorted.
    fn names(&self) -> Result<Vec<StepName>, StoreError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    records: BTreeMap<StepName, VerificationCheckpoint>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn put(&mut self, checkpoint: &VerificationCheckpoint) -> Result<(), StoreError> {
        self.records.insert(checkpoint.name(), checkpoint.clone());
        Ok(())
    }

    fn get(&self, name: StepName) -> Result<Option<VerificationCheckpoint>, StoreError> {
        Ok(self.records.get(&name).cloned())
    }

    fn remove(&mut self, name: StepName) -> Result<bool, StoreError> {
        Ok(self.records.remove(&name).is_some())
    }

    fn names(&self) -> Result<Vec<StepName>, StoreError> {
        Ok(self.records.keys().copied().collect())
    }
}

/// One pretty-printed JSON file per checkpoint: `<dir>/<name>.json`.
///
/// Files whose stem is not a step name are ignored.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, name: StepName) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn put(&mut self, checkpoint: &VerificationCheckpoint) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.path_of(checkpoint.name());
        let json = serde_json::to_string_pretty(checkpoint).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        // Write beside the target, then rename over it.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_error(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_error(&path))?;
        debug!(path = %path.display(), "checkpoint written");
        Ok(())
    }

    fn get(&self, name: StepName) -> Result<Option<VerificationCheckpoint>, StoreError> {
        let path = self.path_of(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path)(e)),
        };
        let checkpoint: VerificationCheckpoint =
            serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        if checkpoint.name() != name {
            return Err(StoreError::Corrupt {
                path,
                reason: format!("file holds checkpoint {}", checkpoint.name()),
            });
        }
        Ok(Some(checkpoint))
    }

    fn remove(&mut self, name: StepName) -> Result<bool, StoreError> {
        let path = self.path_of(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn names(&self) -> Result<Vec<StepName>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.dir)(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(io_error(&self.dir))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Only canonical stems map back to this file through `path_of`.
            match stem.parse::<StepName>() {
                Ok(name) if name.to_string() == stem => names.push(name),
                _ => {}
            }
        }
        names.sort();
        Ok(names)
    }
}
