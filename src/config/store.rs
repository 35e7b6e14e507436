//! Configuration file sessions
//!
//! A [`ConfigFile`] pairs a pure configuration record with the file it was
//! loaded from (or will be written to) and an advisory lock on that file.
//! The record types themselves never own file handles; the session does,
//! and releases everything when dropped.

mod lock;
mod persist;

use crate::error::{MnqnError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

pub use lock::{FileLock, acquire_lock};

/// A configuration document that can be validated and stored as YAML.
pub trait Record: Serialize + DeserializeOwned {
    /// Human label used in error messages ("local configuration", ...).
    const LABEL: &'static str;

    fn validate(&self) -> Result<()>;
}

#[derive(Debug)]
pub struct ConfigFile<T: Record> {
    path: PathBuf,
    record: T,
    _lock: FileLock,
}

impl<T: Record> ConfigFile<T> {
    /// Lock and decode an existing file.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let lock = acquire_lock(&path)?;

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            IoErrorKind::NotFound => MnqnError::NotFound(format!(
                "{} not found at {}",
                T::LABEL,
                path.display()
            )),
            _ => MnqnError::io(&path, e),
        })?;

        let record = decode::<T>(&path, &content)?;

        Ok(Self {
            path,
            record,
            _lock: lock,
        })
    }

    /// Lock `path`, validate `record` and write it out, replacing any
    /// existing file.
    pub fn create(path: impl Into<PathBuf>, record: T) -> Result<Self> {
        let path = path.into();
        let lock = acquire_lock(&path)?;
        let session = Self {
            path,
            record,
            _lock: lock,
        };
        session.save()?;
        Ok(session)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut T {
        &mut self.record
    }

    pub fn into_record(self) -> T {
        self.record
    }

    /// Validate, then rewrite the file this session was opened on.
    pub fn save(&self) -> Result<()> {
        write_record(&self.path, &self.record)
    }
}

fn decode<T: Record>(path: &Path, content: &str) -> Result<T> {
    serde_yml::from_str(content).map_err(|e| MnqnError::ParseError {
        path: path.to_path_buf(),
        message: format!("couldn't read {}: {}", T::LABEL, e),
    })
}

fn write_record<T: Record>(path: &Path, record: &T) -> Result<()> {
    record
        .validate()
        .map_err(|e| MnqnError::Validation(format!("{} is not valid: {}", T::LABEL, e)))?;

    let content = serde_yml::to_string(record).map_err(|e| {
        MnqnError::Other(format!("couldn't encode {}: {}", T::LABEL, e))
    })?;

    // Never write something that can't be read back.
    decode::<T>(path, &content)?;

    persist::write_atomically(path, &content)
}
