use std::collections::{BTreeMap, BTreeSet};

use crate::commands::{CmdResult, Collection, KeywordCount};
use crate::error::{OeuvreError, Result};
use crate::model::Record;
use crate::schema::{get_spec, FieldSpec, CHARACTERS, FIELDS};
use crate::store::RecordStore;

/// Keyword-style fields that count as keywords. Character names are left out.
fn keyword_fields() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS
        .iter()
        .filter(|spec| spec.keyword_style && spec.name != CHARACTERS)
}

fn check_field(field: &str) -> Result<()> {
    let spec = get_spec(field).ok_or_else(|| OeuvreError::UnknownField(field.to_string()))?;
    if !spec.keyword_style {
        return Err(OeuvreError::Api(format!("{} is not a keyword field", field)));
    }
    Ok(())
}

/// Counts keyword usage across `records`.
///
/// With a `field`, only that field is counted and names are bare keywords;
/// otherwise every keyword field is counted and names are `field:keyword`.
/// Output is ordered by name, or by descending count then name when `by_count`.
pub fn count(records: &[Record], field: Option<&str>, by_count: bool) -> Result<Vec<KeywordCount>> {
    if let Some(field) = field {
        check_field(field)?;
    }

    let mut counter: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        for spec in FIELDS.iter().filter(|spec| spec.keyword_style) {
            let wanted = match field {
                Some(field) => spec.name == field,
                None => spec.name != CHARACTERS,
            };
            if !wanted {
                continue;
            }
            let Some(entries) = record.get(spec.name).and_then(|v| v.as_keywords()) else {
                continue;
            };
            for entry in entries {
                let name = match field {
                    Some(_) => entry.keyword.clone(),
                    None => format!("{}:{}", spec.name, entry.keyword),
                };
                *counter.entry(name).or_default() += 1;
            }
        }
    }

    let mut counts: Vec<KeywordCount> = counter
        .into_iter()
        .map(|(name, count)| KeywordCount { name, count })
        .collect();
    if by_count {
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    }
    Ok(counts)
}

/// Keywords in `record` that nothing in `collection` uses yet.
///
/// `collection` is the catalogue as stored, so for an edited record only the
/// keywords added since its last save are reported.
pub fn new_keywords(record: &Record, collection: &[Record]) -> Vec<String> {
    let known: BTreeSet<(&str, &str)> = collection
        .iter()
        .flat_map(|other| {
            keyword_fields().flat_map(move |spec| {
                other
                    .get(spec.name)
                    .and_then(|v| v.as_keywords())
                    .unwrap_or_default()
                    .iter()
                    .map(move |entry| (spec.name, entry.keyword.as_str()))
            })
        })
        .collect();

    let mut fresh = Vec::new();
    for spec in keyword_fields() {
        let Some(entries) = record.get(spec.name).and_then(|v| v.as_keywords()) else {
            continue;
        };
        for entry in entries {
            if !known.contains(&(spec.name, entry.keyword.as_str()))
                && !fresh.contains(&entry.keyword)
            {
                fresh.push(entry.keyword.clone());
            }
        }
    }
    fresh
}

pub fn run<S: RecordStore>(
    store: &S,
    collection: Collection<'_>,
    field: Option<&str>,
    by_count: bool,
) -> Result<CmdResult> {
    if let Some(field) = field {
        check_field(field)?;
    }
    let (records, warnings) = collection.load(store)?;
    let mut result = CmdResult {
        keyword_counts: count(&records, field, by_count)?,
        ..Default::default()
    };
    result.messages = warnings;
    Ok(result)
}
