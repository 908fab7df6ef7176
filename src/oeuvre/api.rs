//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all oeuvre operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns session state**: the store, the location hierarchy and the load mode
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`, records, text)
//!
//! It does no business logic, no terminal I/O and no prompting.
//!
//! ## Generic Over RecordStore
//!
//! `OeuvreApi<S: RecordStore>` is generic over the storage backend:
//! - Production: `OeuvreApi<FileStore>`
//! - Testing: `OeuvreApi<MemStore>`

use std::path::PathBuf;

use crate::commands::{edit, keywords, new, search, show, CmdMessage, CmdResult, Collection};
use crate::error::Result;
use crate::format::{to_template, Verbosity};
use crate::model::{make_timestamp, Record};
use crate::query::LocationHierarchy;
use crate::store::{LoadMode, RecordStore};

pub use crate::commands::search::SearchOptions;

/// Where a record's editable text was put in the staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedCopy {
    pub path: PathBuf,
    /// The copy was left behind by an earlier session and kept as it was.
    pub resumed: bool,
}

/// The main API facade for oeuvre operations.
///
/// All UI clients should interact through this API.
pub struct OeuvreApi<S: RecordStore> {
    store: S,
    hierarchy: LocationHierarchy,
    mode: LoadMode,
}

impl<S: RecordStore> OeuvreApi<S> {
    pub fn new(store: S, hierarchy: LocationHierarchy, mode: LoadMode) -> Self {
        Self {
            store,
            hierarchy,
            mode,
        }
    }

    /// Builds the API, reading the location hierarchy from the store.
    pub fn open(store: S, locations_file: &str, mode: LoadMode) -> Result<Self> {
        let hierarchy = store.load_locations(locations_file)?;
        Ok(Self::new(store, hierarchy, mode))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hierarchy(&self) -> &LocationHierarchy {
        &self.hierarchy
    }

    fn collection(&self) -> Collection<'_> {
        Collection::new(self.mode, &self.hierarchy)
    }

    pub fn search<T: AsRef<str>>(&self, terms: &[T], options: SearchOptions) -> Result<CmdResult> {
        search::run(&self.store, self.collection(), terms, options)
    }

    pub fn show<T: AsRef<str>>(&self, terms: &[T], verbosity: Verbosity) -> Result<CmdResult> {
        show::run(&self.store, self.collection(), terms, verbosity)
    }

    pub fn keywords(&self, field: Option<&str>, by_count: bool) -> Result<CmdResult> {
        keywords::run(&self.store, self.collection(), field, by_count)
    }

    /// Keywords in `record` that the stored collection does not use yet,
    /// together with the warnings for files skipped while loading it.
    pub fn new_keywords(&self, record: &Record) -> Result<(Vec<String>, Vec<CmdMessage>)> {
        let (records, warnings) = self.collection().load(&self.store)?;
        Ok((keywords::new_keywords(record, &records), warnings))
    }

    // --- Editing ---

    pub fn find_for_edit<T: AsRef<str>>(
        &self,
        terms: &[T],
        strict_locations: bool,
    ) -> Result<(Vec<Record>, Vec<CmdMessage>)> {
        edit::find(&self.store, self.collection(), terms, strict_locations)
    }

    /// Writes the editing template of `record` to the staging area, unless an
    /// abandoned session already left a copy there.
    pub fn stage_record(&self, record: &Record) -> Result<StagedCopy> {
        self.stage_or_resume(&record.filename, || to_template(record))
    }

    pub fn apply_edit(&self, original: &Record, timestamp: &str) -> Result<Record> {
        let text = self.store.read_staged(&original.filename)?;
        edit::apply(&self.store, original, &text, timestamp)
    }

    pub fn commit_edits(&self, records: Vec<Record>) -> Result<CmdResult> {
        let result = edit::commit(&self.store, records)?;
        for record in &result.affected_records {
            self.store.unstage(&record.filename)?;
        }
        Ok(result)
    }

    // --- Creating ---

    pub fn check_new_name(&self, name: &str) -> Result<()> {
        new::check_name(&self.store, name)
    }

    /// Writes an empty template for the new record `name` to the staging area,
    /// unless an abandoned session already left a copy there.
    pub fn stage_new(&self, name: &str) -> Result<StagedCopy> {
        self.stage_or_resume(name.trim(), new::template)
    }

    pub fn apply_new(&self, name: &str, timestamp: &str) -> Result<Record> {
        let text = self.store.read_staged(name.trim())?;
        new::apply(&self.store, name, &text, timestamp)
    }

    pub fn commit_new(&self, name: &str, record: Record) -> Result<CmdResult> {
        let result = new::commit(&self.store, record)?;
        self.store.unstage(name.trim())?;
        Ok(result)
    }

    pub fn timestamp(&self) -> String {
        make_timestamp()
    }

    fn stage_or_resume(&self, filename: &str, text: impl FnOnce() -> String) -> Result<StagedCopy> {
        if self.store.is_staged(filename) {
            let path = self.store.staged_path(filename);
            tracing::info!("Resuming staged copy {}", path.display());
            return Ok(StagedCopy {
                path,
                resumed: true,
            });
        }
        let path = self.store.stage(filename, &text())?;
        Ok(StagedCopy {
            path,
            resumed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::store::MemStore;

    fn api() -> OeuvreApi<MemStore> {
        OeuvreApi::open(fixtures::store(), "locations.json", LoadMode::Strict).unwrap()
    }

    #[test]
    fn open_reads_hierarchy() {
        let api = api();
        assert_eq!(api.hierarchy().enclosing("moscow"), vec!["russia"]);
    }

    #[test]
    fn search_dispatches() {
        let result = api()
            .search(&["locations:russia"], SearchOptions::default())
            .unwrap();
        assert_eq!(result.listed_records.len(), 2);
    }

    #[test]
    fn edit_through_staging_area() {
        let api = api();
        let (found, warnings) = api.find_for_edit(&["libra.txt"], false).unwrap();
        assert!(warnings.is_empty());
        let staged = api.stage_record(&found[0]).unwrap();
        assert_eq!(staged.path, PathBuf::from("/mem/editing/libra.txt"));
        assert!(!staged.resumed);

        let edited = api.apply_edit(&found[0], "now").unwrap();
        api.commit_edits(vec![edited]).unwrap();
        assert!(api.store().read_staged("libra.txt").is_err());
        assert_eq!(
            api.store().get_record("libra.txt").unwrap().text("last-updated"),
            Some("now")
        );
    }

    #[test]
    fn create_through_staging_area() {
        let api = api();
        api.check_new_name("falcon.txt").unwrap();
        api.stage_new("falcon.txt").unwrap();
        api.store()
            .stage(
                "falcon.txt",
                "title: The Maltese Falcon\ntype: film\nkeywords:\n  film-noir\n",
            )
            .unwrap();

        let record = api.apply_new("falcon.txt", "now").unwrap();
        let (fresh, warnings) = api.new_keywords(&record).unwrap();
        assert_eq!(fresh, vec!["film-noir"]);
        assert!(warnings.is_empty());

        let result = api.commit_new("falcon.txt", record).unwrap();
        assert_eq!(
            result.rendered.as_deref(),
            Some("title: The Maltese Falcon\ntype: film\nkeywords:\n  film-noir\n\nlast-updated: now\ncreated-at: now")
        );
        assert!(api.store().exists("films/falcon.txt"));
    }

    #[test]
    fn abandoned_staged_copy_is_resumed() {
        let api = api();
        let (found, _) = api.find_for_edit(&["libra.txt"], false).unwrap();
        api.stage_record(&found[0]).unwrap();
        api.store()
            .stage("libra.txt", "title: Libra, half edited\ntype: book\n")
            .unwrap();

        let again = api.stage_record(&found[0]).unwrap();
        assert!(again.resumed);
        assert_eq!(again.path, PathBuf::from("/mem/editing/libra.txt"));
        assert_eq!(
            api.store().read_staged("libra.txt").unwrap(),
            "title: Libra, half edited\ntype: book\n"
        );
    }

    #[test]
    fn abandoned_new_template_is_resumed() {
        let api = api();
        api.stage_new("falcon.txt").unwrap();
        api.store()
            .stage("falcon.txt", "title: The Maltese Falcon\ntype: film\n")
            .unwrap();

        assert!(api.stage_new("falcon.txt").unwrap().resumed);
        let record = api.apply_new("falcon.txt", "now").unwrap();
        assert_eq!(record.title(), "The Maltese Falcon");
    }
}
