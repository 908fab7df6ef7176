use crate::commands::{CmdMessage, CmdResult, Collection, ListedRecord};
use crate::error::Result;
use crate::format::{to_display, Verbosity};
use crate::query::Query;
use crate::store::RecordStore;

/// Renders the one record matching `terms`.
///
/// No match, or several, is not an error: the result carries a message and,
/// for several, the list of candidates.
pub fn run<S: RecordStore, T: AsRef<str>>(
    store: &S,
    collection: Collection<'_>,
    terms: &[T],
    verbosity: Verbosity,
) -> Result<CmdResult> {
    let query = Query::parse(terms)?;
    let (records, warnings) = collection.load(store)?;
    let mut matching = query.filter(&records, collection.hierarchy);

    let mut result = CmdResult::default();
    result.messages = warnings;

    match matching.len() {
        0 => result.add_message(CmdMessage::info("No matching entries.")),
        1 => {
            let record = matching.remove(0);
            result = result.with_rendered(to_display(&record, verbosity));
        }
        _ => {
            result.add_message(CmdMessage::info("Multiple matching entries:"));
            result = result.with_listed_records(
                matching
                    .into_iter()
                    .map(|record| ListedRecord {
                        record,
                        matches: Vec::new(),
                    })
                    .collect(),
            );
        }
    }
    Ok(result)
}
