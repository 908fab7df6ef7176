use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (parsing, naming rules, timestamps).
///
/// Files are addressed by their name relative to the collection root, with
/// `/` separators, which is also the record's `filename`.
pub trait StorageBackend {
    /// All record files (`*.txt`) outside the staging directory, sorted.
    fn list_files(&self) -> Result<Vec<String>>;

    /// Read a file. Returns Ok(None) if it does not exist.
    fn read_file(&self, name: &str) -> Result<Option<String>>;

    /// Write a file, creating parent directories as needed.
    fn write_file(&self, name: &str, content: &str) -> Result<()>;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;

    fn exists(&self, name: &str) -> bool;

    /// The path shown to users and handed to the editor.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn file_path(&self, name: &str) -> PathBuf;
}
