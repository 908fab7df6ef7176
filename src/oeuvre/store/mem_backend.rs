use super::backend::StorageBackend;
use super::{RECORD_EXT, STAGING_DIR};
use crate::error::{OeuvreError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since oeuvre is single-threaded.
/// This allows the `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<BTreeMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend with a file, bypassing the record store.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn list_files(&self) -> Result<Vec<String>> {
        let staging = format!("{}/", STAGING_DIR);
        let suffix = format!(".{}", RECORD_EXT);
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|name| !name.starts_with(&staging) && name.ends_with(&suffix))
            .cloned()
            .collect())
    }

    fn read_file(&self, name: &str) -> Result<Option<String>> {
        Ok(self.files.borrow().get(name).cloned())
    }

    fn write_file(&self, name: &str, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(OeuvreError::Store("Simulated write error".to_string()));
        }
        self.files
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
        Ok(())
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        self.files.borrow_mut().remove(name);
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    fn file_path(&self, name: &str) -> PathBuf {
        PathBuf::from("/mem").join(name)
    }
}
