//! Field and record validation.
//!
//! Field values are checked when the parser finishes a field block; whole
//! records are checked once every line has been consumed.

use std::collections::HashMap;

use crate::error::RecordError;
use crate::model::{FieldValue, Record};
use crate::schema::{get_spec, FieldSpec, FIELDS};

/// Validates and coerces a trimmed scalar value for `field`.
///
/// Returns `Ok(None)` for an empty value on an optional field.
pub fn validate_value(field: &str, value: &str) -> Result<Option<FieldValue>, RecordError> {
    let spec = get_spec(field).ok_or_else(|| RecordError::new(unknown_field(field)))?;
    validate_with_spec(spec, value)
}

pub(crate) fn validate_with_spec(
    spec: &FieldSpec,
    value: &str,
) -> Result<Option<FieldValue>, RecordError> {
    if value.is_empty() {
        if spec.required {
            return Err(RecordError::new(missing_field(spec.name)));
        }
        return Ok(None);
    }

    if let Some(choices) = spec.choices {
        if !choices.contains(&value) {
            return Err(RecordError::new(invalid_choice(spec, value)));
        }
    }

    if spec.numeric {
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(RecordError::new(format!(
                "field '{}' must be a number, got '{}'",
                spec.name, value
            )));
        }
        let number = value.parse::<u64>().map_err(|_| {
            RecordError::new(format!("field '{}' is out of range: {}", spec.name, value))
        })?;
        return Ok(Some(FieldValue::Number(number)));
    }

    Ok(Some(FieldValue::Text(value.to_string())))
}

/// Record-level checks: every required field is present and every
/// choice-constrained field holds a permitted value.
///
/// `header_lines` maps field names to the line their header was on, so that
/// errors point at the offending field whenever it exists in the text.
pub fn validate_record(
    record: &Record,
    header_lines: &HashMap<&'static str, usize>,
) -> Result<(), RecordError> {
    for spec in FIELDS {
        let located = |err: RecordError| match header_lines.get(spec.name) {
            Some(line) => err.with_line(*line),
            None => err,
        };

        match record.get(spec.name) {
            None => {
                if spec.required {
                    return Err(located(RecordError::new(missing_field(spec.name))));
                }
            }
            Some(value) => {
                if let (Some(choices), FieldValue::Text(text)) = (spec.choices, value) {
                    if !choices.contains(&text.as_str()) {
                        return Err(located(RecordError::new(invalid_choice(spec, text))));
                    }
                }
            }
        }
    }

    for (name, _) in record.fields() {
        if get_spec(name).is_none() {
            return Err(RecordError::new(unknown_field(name)));
        }
    }

    Ok(())
}

pub(crate) fn unknown_field(name: &str) -> String {
    format!("unknown field '{}'", name)
}

fn missing_field(name: &str) -> String {
    format!("missing required field '{}'", name)
}

fn invalid_choice(spec: &FieldSpec, value: &str) -> String {
    let allowed = spec.choices.unwrap_or_default().join(", ");
    format!(
        "invalid value '{}' for field '{}' (must be one of: {})",
        value, spec.name, allowed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_passes_through() {
        let value = validate_value("creator", "Don DeLillo").unwrap();
        assert_eq!(value, Some(FieldValue::Text("Don DeLillo".into())));
    }

    #[test]
    fn empty_optional_value_is_absent() {
        assert_eq!(validate_value("creator", "").unwrap(), None);
    }

    #[test]
    fn empty_required_value_fails() {
        let err = validate_value("title", "").unwrap_err();
        assert_eq!(err.message, "missing required field 'title'");
    }

    #[test]
    fn choice_outside_set_lists_allowed_values() {
        let err = validate_value("type", "poem").unwrap_err();
        assert_eq!(
            err.message,
            "invalid value 'poem' for field 'type' (must be one of: book, film, play, story)"
        );
    }

    #[test]
    fn choice_inside_set_passes() {
        assert_eq!(
            validate_value("type", "film").unwrap(),
            Some(FieldValue::Text("film".into()))
        );
    }

    #[test]
    fn year_is_coerced_to_number() {
        assert_eq!(
            validate_value("year", "1988").unwrap(),
            Some(FieldValue::Number(1988))
        );
    }

    #[test]
    fn year_must_be_all_digits() {
        assert!(validate_value("year", "1988a").is_err());
        assert!(validate_value("year", "-5").is_err());
        assert!(validate_value("year", "circa 1900").is_err());
    }

    #[test]
    fn empty_year_is_absent() {
        assert_eq!(validate_value("year", "").unwrap(), None);
    }

    #[test]
    fn unknown_field_fails() {
        let err = validate_value("lol", "x").unwrap_err();
        assert_eq!(err.message, "unknown field 'lol'");
    }

    #[test]
    fn record_missing_required_field_names_it() {
        let mut record = Record::new("x.txt");
        record.set("title", FieldValue::Text("Libra".into()));
        let err = validate_record(&record, &HashMap::new()).unwrap_err();
        assert!(err.message.contains("'type'"));
        assert_eq!(err.line, None);
    }

    #[test]
    fn record_choice_violation_carries_header_line() {
        let mut record = Record::new("x.txt");
        record.set("title", FieldValue::Text("Libra".into()));
        record.set("type", FieldValue::Text("poem".into()));
        let lines = HashMap::from([("type", 2)]);
        let err = validate_record(&record, &lines).unwrap_err();
        assert_eq!(err.line, Some(2));
    }
}
