//! Durable storage for the gamification profile.
//!
//! The engine talks to a [`ProfileStore`]; the default implementation is a
//! pretty-printed JSON document on disk, replaced atomically on every save
//! (write `<file>.tmp`, fsync, rename over the target).

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::error::PersistError;
use crate::gamification::Profile;

/// File name of the profile document inside the data directory.
pub const PROFILE_FILE: &str = "user_profile.json";

/// Persistence seam for [`Profile`] documents.
pub trait ProfileStore {
    /// Read the persisted document.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Map<String, Value>>, PersistError>;

    /// Replace the persisted document with `profile`.
    fn save(&mut self, profile: &Profile) -> Result<(), PersistError>;

    /// Where documents are kept, for log messages.
    fn location(&self) -> PathBuf;
}

fn into_object(value: Value, path: &Path) -> Result<Map<String, Value>, PersistError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(PersistError::read(
            path,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_atomic(&self, content: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        let result = (|| {
            let mut file = File::create(&temp_path)?;
            file.write_all(content)?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<Map<String, Value>>, PersistError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistError::read(&self.path, e)),
        };

        let value: Value =
            serde_json::from_str(&content).map_err(|e| PersistError::read(&self.path, e))?;
        into_object(value, &self.path).map(Some)
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(profile)
            .map_err(|e| PersistError::write(&self.path, e))?;
        self.write_atomic(content.as_bytes())
            .map_err(|e| PersistError::write(&self.path, e))
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

const MEMORY_LOCATION: &str = ":memory:";

/// In-process store.
///
/// Clones share the same document, so a test can keep a handle while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Arc<Mutex<Option<Value>>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw document, as if read from disk.
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document))),
            fail_writes: false,
        }
    }

    /// Store whose saves always fail.
    pub fn failing() -> Self {
        Self {
            document: Arc::default(),
            fail_writes: true,
        }
    }

    /// Last saved document.
    pub fn document(&self) -> Option<Value> {
        self.document.lock().ok().and_then(|doc| doc.clone())
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<Map<String, Value>>, PersistError> {
        let guard = self
            .document
            .lock()
            .map_err(|e| PersistError::read(MEMORY_LOCATION, e))?;
        match guard.clone() {
            None => Ok(None),
            Some(value) => into_object(value, Path::new(MEMORY_LOCATION)).map(Some),
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistError> {
        if self.fail_writes {
            return Err(PersistError::write(MEMORY_LOCATION, "store is read-only"));
        }
        let value =
            serde_json::to_value(profile).map_err(|e| PersistError::write(MEMORY_LOCATION, e))?;
        let mut guard = self
            .document
            .lock()
            .map_err(|e| PersistError::write(MEMORY_LOCATION, e))?;
        *guard = Some(value);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(MEMORY_LOCATION)
    }
}
