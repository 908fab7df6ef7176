//! Record parser: text to [`Record`].
//!
//! The format is line oriented. A non-indented line opens a field
//! (`name: value`), and the lines indented under it belong to that field:
//!
//! ```text
//! title: Libra
//! type: book
//! locations:
//!   moscow
//!   dallas: where it ends
//!     and where it began
//! ```
//!
//! - In list fields every line indented one level is an element. For
//!   keyword-style lists, a line indented two levels continues the
//!   description of the previous element.
//! - In scalar fields indented lines are appended to the value, joined by a
//!   space, or by a newline when a blank line came before them (paragraphs).
//!
//! Every field value is validated when its block ends, and the whole record
//! is validated once the input is exhausted. Errors carry the 1-based line
//! number of the offending line, or of the field header for value errors.

use std::collections::HashMap;

use crate::error::RecordError;
use crate::model::{FieldValue, KeywordEntry, Record};
use crate::schema::{get_spec, FieldSpec, INDENT};

use super::validate::{unknown_field, validate_record, validate_with_spec};

/// Parses the text of one record file.
///
/// `filename` is the record's identity within the collection; it is attached
/// to the result and never read from the text.
pub fn parse_record(text: &str, filename: &str) -> Result<Record, RecordError> {
    let mut parser = Parser::new(filename);
    for (index, line) in text.lines().enumerate() {
        parser.feed(index + 1, line)?;
    }
    parser.finish()
}

enum Body {
    Scalar(String),
    List(Vec<String>),
    Keywords(Vec<KeywordEntry>),
}

struct OpenField {
    spec: &'static FieldSpec,
    line: usize,
    body: Body,
}

struct Parser {
    record: Record,
    header_lines: HashMap<&'static str, usize>,
    open: Option<OpenField>,
    /// A blank line was seen since the last content line.
    paragraph_break: bool,
}

impl Parser {
    fn new(filename: &str) -> Self {
        Self {
            record: Record::new(filename),
            header_lines: HashMap::new(),
            open: None,
            paragraph_break: false,
        }
    }

    fn feed(&mut self, lineno: usize, raw: &str) -> Result<(), RecordError> {
        let indented = raw.starts_with(INDENT);
        let double_indented = raw.starts_with(&INDENT.repeat(2));
        let line = raw.trim();

        if line.is_empty() {
            self.paragraph_break = true;
            return Ok(());
        }

        let keyword_style = self
            .open
            .as_ref()
            .is_some_and(|open| open.spec.keyword_style);

        if double_indented && keyword_style {
            self.continue_description(lineno, line)?;
        } else if indented {
            self.continue_field(lineno, line)?;
        } else {
            self.open_field(lineno, line)?;
        }

        self.paragraph_break = false;
        Ok(())
    }

    fn continue_description(&mut self, lineno: usize, line: &str) -> Result<(), RecordError> {
        let last = match self.open.as_mut().map(|open| &mut open.body) {
            Some(Body::Keywords(entries)) => entries.last_mut(),
            _ => None,
        };
        match last {
            Some(entry) => {
                entry.extend_description(line);
                Ok(())
            }
            None => Err(RecordError::at_line("unexpected double indentation", lineno)),
        }
    }

    fn continue_field(&mut self, lineno: usize, line: &str) -> Result<(), RecordError> {
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| RecordError::at_line("indented text without a field", lineno))?;

        match &mut open.body {
            Body::Keywords(entries) => entries.push(KeywordEntry::parse(line)),
            Body::List(items) => items.push(line.to_string()),
            Body::Scalar(text) => {
                if !text.is_empty() {
                    text.push(if self.paragraph_break { '\n' } else { ' ' });
                }
                text.push_str(line);
            }
        }
        Ok(())
    }

    fn open_field(&mut self, lineno: usize, line: &str) -> Result<(), RecordError> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| RecordError::at_line("un-indented line without a colon", lineno))?;
        let name = name.trim();
        let value = value.trim();

        let spec = get_spec(name).ok_or_else(|| RecordError::at_line(unknown_field(name), lineno))?;

        self.close_field()?;

        if self.header_lines.contains_key(spec.name) {
            return Err(RecordError::at_line(
                format!("duplicate field '{}'", spec.name),
                lineno,
            ));
        }
        self.header_lines.insert(spec.name, lineno);

        if (spec.multiple || spec.longform) && !value.is_empty() {
            return Err(RecordError::at_line(
                format!("trailing content after '{}:'", spec.name),
                lineno,
            ));
        }

        let body = if spec.keyword_style {
            Body::Keywords(Vec::new())
        } else if spec.multiple {
            Body::List(Vec::new())
        } else {
            Body::Scalar(value.to_string())
        };

        self.open = Some(OpenField {
            spec,
            line: lineno,
            body,
        });
        Ok(())
    }

    /// Validates the open field, if any, and stores it on the record.
    fn close_field(&mut self) -> Result<(), RecordError> {
        let Some(OpenField { spec, line, body }) = self.open.take() else {
            return Ok(());
        };

        let value = match body {
            Body::Scalar(text) => validate_with_spec(spec, &text).map_err(|e| e.with_line(line))?,
            Body::List(items) => Some(FieldValue::List(items)),
            Body::Keywords(entries) => Some(FieldValue::Keywords(
                entries.into_iter().filter(KeywordEntry::is_present).collect(),
            )),
        };

        if let Some(value) = value {
            self.record.set(spec.name, value);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Record, RecordError> {
        self.close_field()?;
        validate_record(&self.record, &self.header_lines)?;
        Ok(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRA: &str = "title: Libra\ntype: book\nyear: 1988\nlocations:\n  moscow\n";

    #[test]
    fn parses_minimal_record() {
        let record = parse_record(LIBRA, "libra.txt").unwrap();
        assert_eq!(record.filename, "libra.txt");
        assert_eq!(record.title(), "Libra");
        assert_eq!(record.text("type"), Some("book"));
        assert_eq!(record.get("year"), Some(&FieldValue::Number(1988)));
        assert_eq!(
            record.get("locations"),
            Some(&FieldValue::Keywords(vec![KeywordEntry::new("moscow", None)]))
        );
    }

    #[test]
    fn keyword_with_description() {
        let text = "title: X\ntype: film\nkeywords:\n  noir: classic genre\n";
        let record = parse_record(text, "x.txt").unwrap();
        let entries = record.get("keywords").unwrap().as_keywords().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].keyword, "noir");
        assert_eq!(entries[0].description.as_deref(), Some("classic genre"));
        assert_eq!(entries[0].to_string(), "noir: classic genre");
    }

    #[test]
    fn double_indent_continues_description() {
        let text = "title: X\ntype: book\ncharacters:\n  Lee: a drifter\n    with a rifle\n  Win\n";
        let record = parse_record(text, "x.txt").unwrap();
        let entries = record.get("characters").unwrap().as_keywords().unwrap();
        assert_eq!(entries[0].description.as_deref(), Some("a drifter with a rifle"));
        assert_eq!(entries[1].keyword, "Win");
    }

    #[test]
    fn double_indent_without_element_fails() {
        let text = "title: X\ntype: book\nkeywords:\n    orphan\n";
        let err = parse_record(text, "x.txt").unwrap_err();
        assert_eq!(err.message, "unexpected double indentation");
        assert_eq!(err.line, Some(4));
    }

    #[test]
    fn longform_paragraphs() {
        let text = "title: X\ntype: book\nnotes:\n  first line\n  continues\n\n  second\n";
        let record = parse_record(text, "x.txt").unwrap();
        assert_eq!(record.text("notes"), Some("first line continues\nsecond"));
    }

    #[test]
    fn wrapped_scalar_is_joined_with_space() {
        let text = "title:\n  A Very Long\n  Title\ntype: book\n";
        let record = parse_record(text, "x.txt").unwrap();
        assert_eq!(record.title(), "A Very Long Title");
    }

    #[test]
    fn scalar_continuation_after_blank_line_starts_paragraph() {
        let text = "title: A\n\n  B\ntype: book\n";
        let record = parse_record(text, "x.txt").unwrap();
        assert_eq!(record.title(), "A\nB");
        assert_eq!(record.text("type"), Some("book"));
    }

    #[test]
    fn header_value_and_continuation_are_joined() {
        let text = "title: A Very\n  Long Title\ntype: book\n";
        let record = parse_record(text, "x.txt").unwrap();
        assert_eq!(record.title(), "A Very Long Title");
    }

    #[test]
    fn whitespace_is_trimmed() {
        let text = "  \ntitle :   Libra   \ntype: book\n";
        let record = parse_record(text, "x.txt").unwrap();
        assert_eq!(record.title(), "Libra");
    }

    #[test]
    fn indented_text_without_field_fails() {
        let err = parse_record("  stray\n", "x.txt").unwrap_err();
        assert_eq!(err.message, "indented text without a field");
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn line_without_colon_fails() {
        let err = parse_record("title: X\nnonsense\n", "x.txt").unwrap_err();
        assert_eq!(err.message, "un-indented line without a colon");
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn unknown_field_fails_with_line() {
        let err = parse_record("title: X\nlol: 1\n", "x.txt").unwrap_err();
        assert_eq!(err.message, "unknown field 'lol'");
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn inline_value_on_list_field_fails() {
        let err = parse_record("title: X\ntype: book\nkeywords: noir\n", "x.txt").unwrap_err();
        assert!(err.message.contains("trailing content"));
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn inline_value_on_longform_field_fails() {
        let err = parse_record("title: X\ntype: book\nnotes: hi\n", "x.txt").unwrap_err();
        assert!(err.message.contains("trailing content"));
    }

    #[test]
    fn duplicate_field_fails() {
        let err = parse_record("title: X\ntitle: Y\ntype: book\n", "x.txt").unwrap_err();
        assert_eq!(err.message, "duplicate field 'title'");
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn missing_required_field_names_it() {
        let err = parse_record("title: X\n", "x.txt").unwrap_err();
        assert!(err.message.contains("'type'"));
        assert_eq!(err.line, None);
    }

    #[test]
    fn empty_required_field_reports_header_line() {
        let err = parse_record("title:\ntype: book\n", "x.txt").unwrap_err();
        assert!(err.message.contains("'title'"));
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn invalid_choice_lists_choices() {
        let err = parse_record("title: X\ntype: poem\n", "x.txt").unwrap_err();
        assert!(err.message.contains("book, film, play, story"));
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn invalid_year_reports_header_line() {
        let err = parse_record("title: X\ntype: book\nyear: soon\n", "x.txt").unwrap_err();
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn empty_optional_fields_are_absent() {
        let text = "title: X\ncreator:\ntype: book\nkeywords:\nnotes:\n";
        let record = parse_record(text, "x.txt").unwrap();
        assert!(!record.contains("creator"));
        assert!(!record.contains("keywords"));
        assert!(!record.contains("notes"));
    }

    #[test]
    fn field_order_in_input_is_irrelevant() {
        let a = parse_record("type: book\ntitle: X\n", "x.txt").unwrap();
        let b = parse_record("title: X\ntype: book\n", "x.txt").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let record = parse_record("title: X\r\ntype: book\r\n", "x.txt").unwrap();
        assert_eq!(record.title(), "X");
    }
}
