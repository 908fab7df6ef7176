use super::backend::StorageBackend;
use super::{staging_name, LoadMode, LoadReport, RecordStore};
use crate::error::{OeuvreError, Result};
use crate::format::{parse_record, to_disk};
use crate::model::Record;
use crate::query::LocationHierarchy;
use std::path::PathBuf;

pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> CatalogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    fn read_required(&self, name: &str) -> Result<String> {
        self.backend.read_file(name)?.ok_or_else(|| {
            OeuvreError::Store(format!(
                "no such file: {}",
                self.backend.file_path(name).display()
            ))
        })
    }

    fn write_record(&self, record: &Record) -> Result<String> {
        // Serialize in full before touching the file.
        let text = to_disk(record);
        self.backend
            .write_file(&record.filename, &format!("{}\n", text))?;
        Ok(text)
    }
}

impl<B: StorageBackend> RecordStore for CatalogStore<B> {
    fn load(&self, mode: LoadMode) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for name in self.backend.list_files()? {
            let Some(text) = self.backend.read_file(&name)? else {
                continue;
            };
            match parse_record(&text, &name) {
                Ok(record) => report.records.push(record),
                Err(err) => {
                    let err = err.with_path(self.backend.file_path(&name));
                    match mode {
                        LoadMode::Strict => return Err(err.into()),
                        LoadMode::BestEffort => {
                            tracing::warn!("skipping malformed record: {}", err);
                            report.warnings.push(err);
                        }
                    }
                }
            }
        }

        tracing::debug!(
            records = report.records.len(),
            skipped = report.warnings.len(),
            "loaded collection"
        );
        Ok(report)
    }

    fn get_record(&self, filename: &str) -> Result<Record> {
        let text = self.read_required(filename)?;
        self.parse(&text, filename)
    }

    fn parse(&self, text: &str, filename: &str) -> Result<Record> {
        parse_record(text, filename)
            .map_err(|err| err.with_path(self.backend.file_path(filename)).into())
    }

    fn save_record(&self, record: &Record) -> Result<String> {
        let text = self.write_record(record)?;
        tracing::debug!(filename = %record.filename, "saved record");
        Ok(text)
    }

    fn create_record(&self, record: &Record) -> Result<String> {
        if self.backend.exists(&record.filename) {
            return Err(OeuvreError::Api(format!(
                "a file already exists at {}",
                self.backend.file_path(&record.filename).display()
            )));
        }
        let text = self.write_record(record)?;
        tracing::debug!(filename = %record.filename, "created record");
        Ok(text)
    }

    fn exists(&self, filename: &str) -> bool {
        self.backend.exists(filename)
    }

    fn record_path(&self, filename: &str) -> PathBuf {
        self.backend.file_path(filename)
    }

    fn load_locations(&self, file: &str) -> Result<LocationHierarchy> {
        match self.backend.read_file(file)? {
            Some(json) => {
                let hierarchy = LocationHierarchy::from_json(&json)?;
                tracing::debug!(locations = hierarchy.len(), "loaded location hierarchy");
                Ok(hierarchy)
            }
            None => Ok(LocationHierarchy::new()),
        }
    }

    fn stage(&self, filename: &str, text: &str) -> Result<PathBuf> {
        let name = staging_name(filename);
        self.backend.write_file(&name, text)?;
        Ok(self.backend.file_path(&name))
    }

    fn is_staged(&self, filename: &str) -> bool {
        self.backend.exists(&staging_name(filename))
    }

    fn staged_path(&self, filename: &str) -> PathBuf {
        self.backend.file_path(&staging_name(filename))
    }

    fn read_staged(&self, filename: &str) -> Result<String> {
        self.read_required(&staging_name(filename))
    }

    fn parse_staged(&self, text: &str, filename: &str) -> Result<Record> {
        parse_record(text, filename)
            .map_err(|err| err.with_path(self.staged_path(filename)).into())
    }

    fn unstage(&self, filename: &str) -> Result<()> {
        self.backend.delete_file(&staging_name(filename))
    }
}
