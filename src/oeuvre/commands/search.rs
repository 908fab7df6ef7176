use crate::commands::{CmdResult, Collection, ListedRecord};
use crate::error::Result;
use crate::model::sort_records;
use crate::query::Query;
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Report which field and value satisfied each term.
    pub detailed: bool,
    /// Ignore the location hierarchy for `locations:` terms.
    pub strict_locations: bool,
}

pub fn run<S: RecordStore, T: AsRef<str>>(
    store: &S,
    collection: Collection<'_>,
    terms: &[T],
    options: SearchOptions,
) -> Result<CmdResult> {
    let mut query = Query::parse(terms)?;
    if options.strict_locations {
        query = query.strict_locations();
    }

    let (mut records, warnings) = collection.load(store)?;
    sort_records(&mut records);

    let listed = records
        .into_iter()
        .filter_map(|record| {
            let matches = query.describe(&record, collection.hierarchy)?;
            Some(ListedRecord {
                record,
                matches: if options.detailed { matches } else { Vec::new() },
            })
        })
        .collect();

    let mut result = CmdResult::default().with_listed_records(listed);
    result.messages = warnings;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::query::LocationHierarchy;
    use crate::store::LoadMode;

    fn search(terms: &[&str], options: SearchOptions) -> Result<CmdResult> {
        let store = fixtures::store();
        let hierarchy = store.load_locations("locations.json")?;
        run(
            &store,
            Collection::new(LoadMode::Strict, &hierarchy),
            terms,
            options,
        )
    }

    fn shortforms(result: &CmdResult) -> Vec<String> {
        result
            .listed_records
            .iter()
            .map(|l| l.record.shortform())
            .collect()
    }

    #[test]
    fn no_terms_lists_everything_sorted() {
        let result = search(&[], SearchOptions::default()).unwrap();
        assert_eq!(
            shortforms(&result),
            vec![
                "Alphaville (Jean-Luc Godard) [films/alphaville.txt]",
                "Crime and Punishment (Fyodor Dostoyevsky) [crime-and-punishment.txt]",
                "Libra (Don DeLillo) [libra.txt]",
            ]
        );
    }

    #[test]
    fn bare_term_with_details() {
        let options = SearchOptions {
            detailed: true,
            ..Default::default()
        };
        let result = search(&["DeLillo"], options).unwrap();
        assert_eq!(result.listed_records.len(), 1);
        let matches: Vec<_> = result.listed_records[0]
            .matches
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(matches, vec!["creator: matched text (Don DeLillo)"]);
    }

    #[test]
    fn details_omitted_by_default() {
        let result = search(&["DeLillo"], SearchOptions::default()).unwrap();
        assert!(result.listed_records[0].matches.is_empty());
    }

    #[test]
    fn scoped_type_search() {
        let result = search(&["type:book"], SearchOptions::default()).unwrap();
        assert_eq!(result.listed_records.len(), 2);
    }

    #[test]
    fn multiple_terms() {
        let result = search(&["year:1988", "type:book"], SearchOptions::default()).unwrap();
        assert_eq!(
            shortforms(&result),
            vec!["Libra (Don DeLillo) [libra.txt]"]
        );
    }

    #[test]
    fn location_search_uses_hierarchy() {
        let result = search(&["locations:russia"], SearchOptions::default()).unwrap();
        assert_eq!(result.listed_records.len(), 2);

        let strict = SearchOptions {
            strict_locations: true,
            ..Default::default()
        };
        let result = search(&["locations:russia"], strict).unwrap();
        assert!(result.listed_records.is_empty());
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = search(&["lol:whatever"], SearchOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "unknown field 'lol'");
    }

    #[test]
    fn empty_hierarchy_still_matches_exact_location() {
        let store = fixtures::store();
        let hierarchy = LocationHierarchy::new();
        let result = run(
            &store,
            Collection::new(LoadMode::Strict, &hierarchy),
            &["locations:moscow"],
            SearchOptions::default(),
        )
        .unwrap();
        assert_eq!(result.listed_records.len(), 1);
    }
}
