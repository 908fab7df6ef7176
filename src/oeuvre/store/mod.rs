//! # Storage Layer
//!
//! The collection is a directory tree of record files. There is no index or
//! cache: every operation reloads every file, and mutating operations rewrite
//! the touched files in full.
//!
//! ## Layout
//!
//! ```text
//! <directory>/
//! ├── locations.json        # Location hierarchy (optional)
//! ├── libra.txt             # Books and plays live at the root
//! ├── films/
//! │   └── the-conversation.txt
//! ├── stories/
//! │   └── the-dead.txt
//! └── editing/              # Staging copies handed to the editor (ignored)
//! ```
//!
//! Any `*.txt` file anywhere in the tree is a record, except under `editing/`.
//!
//! ## Loading
//!
//! - [`LoadMode::Strict`]: the first malformed file aborts the load.
//! - [`LoadMode::BestEffort`]: malformed files are skipped, logged and
//!   returned as warnings in the [`LoadReport`].
//!
//! Either way, errors carry the path of the offending file.
//!
//! ## Writing
//!
//! A record is serialized completely before its file is opened, so a record
//! that fails to serialize never truncates the file on disk.
//!
//! ## Implementations
//!
//! - [`CatalogStore`] over a [`StorageBackend`]:
//!   - [`fs_backend::FsBackend`]: production, files on disk ([`FileStore`])
//!   - [`mem_backend::MemBackend`]: for testing without filesystem I/O ([`MemStore`])

use crate::error::{OeuvreError, RecordError, Result};
use crate::model::Record;
use crate::query::LocationHierarchy;
use std::path::PathBuf;

pub mod backend;
pub mod catalog_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use catalog_store::CatalogStore;

/// Extension of record files.
pub const RECORD_EXT: &str = "txt";

/// Reserved subdirectory for editor staging copies, never loaded.
pub const STAGING_DIR: &str = "editing";

pub type FileStore = CatalogStore<fs_backend::FsBackend>;
pub type MemStore = CatalogStore<mem_backend::MemBackend>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    #[default]
    Strict,
    BestEffort,
}

/// Result of loading the whole collection.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<Record>,
    /// Files skipped in best-effort mode.
    pub warnings: Vec<RecordError>,
}

/// Abstract interface for record storage.
pub trait RecordStore {
    /// Load and parse every record in the collection.
    fn load(&self, mode: LoadMode) -> Result<LoadReport>;

    /// Load a single record by filename.
    fn get_record(&self, filename: &str) -> Result<Record>;

    /// Parse text as the record `filename`, attaching its path to errors.
    fn parse(&self, text: &str, filename: &str) -> Result<Record>;

    /// Overwrite an existing record's file. Returns the text written,
    /// without the trailing newline.
    fn save_record(&self, record: &Record) -> Result<String>;

    /// Write a new record. Fails if its file already exists.
    fn create_record(&self, record: &Record) -> Result<String>;

    fn exists(&self, filename: &str) -> bool;

    /// Path of a record file, for messages and the editor.
    fn record_path(&self, filename: &str) -> PathBuf;

    /// Load the location hierarchy. A missing file is an empty hierarchy.
    fn load_locations(&self, file: &str) -> Result<LocationHierarchy>;

    /// Write a staging copy for the editor, returning its path.
    fn stage(&self, filename: &str, text: &str) -> Result<PathBuf>;

    /// Whether a staging copy of `filename` exists, e.g. left by an
    /// abandoned session.
    fn is_staged(&self, filename: &str) -> bool;

    /// Path of the staging copy of `filename`.
    fn staged_path(&self, filename: &str) -> PathBuf;

    /// Read back a staging copy.
    fn read_staged(&self, filename: &str) -> Result<String>;

    /// Parse the edited staging copy of `filename`. Errors carry the staging
    /// path, since that is the file the line numbers refer to.
    fn parse_staged(&self, text: &str, filename: &str) -> Result<Record>;

    /// Remove a staging copy.
    fn unstage(&self, filename: &str) -> Result<()>;
}

/// Checks a user-supplied name for a new record.
///
/// The name becomes the file's basename, so it must be non-empty, must not
/// contain a slash, and must end in `.txt`.
pub fn validate_new_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(OeuvreError::Api("entry name may not be empty".to_string()));
    }
    if name.contains('/') {
        return Err(OeuvreError::Api(
            "entry name may not contain a slash".to_string(),
        ));
    }
    let has_ext = name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext == RECORD_EXT);
    if !has_ext {
        return Err(OeuvreError::Api(format!(
            "entry name must end in .{}",
            RECORD_EXT
        )));
    }
    Ok(())
}

/// Filename for a new record of the given type: stories and films get their
/// own subdirectories, everything else lives at the root.
pub fn new_record_filename(name: &str, kind: Option<&str>) -> String {
    let name = name.trim();
    match kind {
        Some("story") => format!("stories/{}", name),
        Some("film") => format!("films/{}", name),
        _ => name.to_string(),
    }
}

fn staging_name(filename: &str) -> String {
    format!("{}/{}", STAGING_DIR, filename)
}
