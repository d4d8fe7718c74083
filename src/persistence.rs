use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

/// Where the serialized timetable lives. Both calls are all-or-nothing.
pub trait DocumentStore: Send + Sync {
    /// Raw document text, or `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the stored document
    fn save(&self, json: &str) -> Result<(), StoreError>;
}

/// Single JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "timetable.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, json: &str) -> Result<(), StoreError> {
        // write next to the target, then swap it in
        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        log::info!("saved timetable to {}", self.path.display());
        Ok(())
    }
}

/// In-process store, used by tests and when no data file is configured
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(json: impl Into<String>) -> Self {
        Self {
            json: Mutex::new(Some(json.into())),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let json = self.json.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(json.clone())
    }

    fn save(&self, json: &str) -> Result<(), StoreError> {
        let mut stored = self.json.lock().map_err(|_| StoreError::Poisoned)?;
        *stored = Some(json.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = temp_dir("timetable-missing");
        let store = FileStore::new(dir.join("data.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_replaces_whole_document() {
        let dir = temp_dir("timetable-save");
        let store = FileStore::new(dir.join("data.json"));

        store.save(r#"{"first": true, "padding": "xxxxxxxxxxxxxxxx"}"#).unwrap();
        store.save(r#"{"second": true}"#).unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some(r#"{"second": true}"#));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
    }
}
