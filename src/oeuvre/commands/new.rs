//! Creating records.
//!
//! Like editing, creation is split around the editor: [`template`] gives the
//! text to edit, [`apply`] parses the result and [`commit`] writes it.

use crate::commands::CmdResult;
use crate::error::{OeuvreError, Result};
use crate::format::to_template;
use crate::model::Record;
use crate::store::{new_record_filename, validate_new_name, RecordStore};

/// Checks the name before the user spends time in the editor.
pub fn check_name<S: RecordStore>(store: &S, name: &str) -> Result<()> {
    validate_new_name(name)?;
    // The final location depends on the type, which is not known yet, but a
    // clash at the root can be reported early.
    if store.exists(name.trim()) {
        return Err(already_exists(store, name.trim()));
    }
    Ok(())
}

/// The empty editing template.
pub fn template() -> String {
    to_template(&Record::new(""))
}

/// Parses the edited template into a record named after `name`, placed
/// according to its type and stamped with `timestamp`. Nothing is written.
pub fn apply<S: RecordStore>(store: &S, name: &str, text: &str, timestamp: &str) -> Result<Record> {
    validate_new_name(name)?;
    let mut record = store.parse_staged(text, name.trim())?;
    record.filename = new_record_filename(name, record.text("type"));
    record.touch(timestamp, true);
    Ok(record)
}

pub fn commit<S: RecordStore>(store: &S, record: Record) -> Result<CmdResult> {
    if store.exists(&record.filename) {
        return Err(already_exists(store, &record.filename));
    }
    let text = store.create_record(&record)?;
    Ok(CmdResult::default()
        .with_rendered(text)
        .with_affected_records(vec![record]))
}

fn already_exists<S: RecordStore>(store: &S, filename: &str) -> OeuvreError {
    OeuvreError::Api(format!(
        "a file already exists at {}",
        store.record_path(filename).display()
    ))
}
