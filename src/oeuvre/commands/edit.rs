//! Editing existing records.
//!
//! The edit round trip is split so that the UI can run the editor in the
//! middle:
//!
//! 1. [`find`] the records to edit
//! 2. the UI stages [`to_template`](crate::format::to_template) copies and
//!    opens them in the editor
//! 3. [`apply`] each edited text; a parse error leaves everything untouched
//!    and the UI may offer to edit again
//! 4. [`commit`] writes the edited records back

use crate::commands::{CmdMessage, CmdResult, Collection};
use crate::error::{OeuvreError, Result};
use crate::model::Record;
use crate::query::Query;
use crate::schema::CREATED_AT;
use crate::store::RecordStore;

/// Records matching `terms`, sorted, with the warnings for files skipped
/// while loading. Finding none is an error.
pub fn find<S: RecordStore, T: AsRef<str>>(
    store: &S,
    collection: Collection<'_>,
    terms: &[T],
    strict_locations: bool,
) -> Result<(Vec<Record>, Vec<CmdMessage>)> {
    let mut query = Query::parse(terms)?;
    if strict_locations {
        query = query.strict_locations();
    }
    let (records, warnings) = collection.load(store)?;
    let matching = query.filter(&records, collection.hierarchy);
    if matching.is_empty() {
        return Err(OeuvreError::Api("no matching entries".to_string()));
    }
    Ok((matching, warnings))
}

/// Parses the edited staging copy of `original`.
///
/// The result keeps the original's filename and creation time, and is
/// stamped with `timestamp` as its last update. Nothing is written.
pub fn apply<S: RecordStore>(
    store: &S,
    original: &Record,
    text: &str,
    timestamp: &str,
) -> Result<Record> {
    let mut edited = store.parse_staged(text, &original.filename)?;
    if let Some(created) = original.get(CREATED_AT) {
        edited.set(CREATED_AT, created.clone());
    }
    edited.touch(timestamp, false);
    Ok(edited)
}

/// Writes edited records back. A single record is also rendered.
pub fn commit<S: RecordStore>(store: &S, records: Vec<Record>) -> Result<CmdResult> {
    let mut texts = Vec::with_capacity(records.len());
    for record in &records {
        texts.push(store.save_record(record)?);
    }

    let mut result = CmdResult::default();
    if let [text] = texts.as_slice() {
        result = result.with_rendered(text.clone());
    } else {
        result.add_message(CmdMessage::success(format!(
            "Saved {} entries.",
            records.len()
        )));
    }
    Ok(result.with_affected_records(records))
}
