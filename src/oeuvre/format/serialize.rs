//! Record serializer: [`Record`] to text.
//!
//! Output is deterministic. Fields are emitted in schema order, lists marked
//! `alphabetical` are sorted, and long values are wrapped at
//! [`MAX_WIDTH`](crate::schema::MAX_WIDTH) columns with the same indentation
//! the parser expects, so that `parse(serialize(r)) == r`.
//!
//! | Field kind | Emitted as |
//! |------------|------------|
//! | short scalar | `field: value` |
//! | long or multi-line scalar | `field:` then wrapped, indented lines, then a blank line |
//! | list | `field:` then one element per line, then a blank line |
//! | longform | `field:` then wrapped paragraphs separated by blank lines, then a blank line |
//!
//! The blank line closing the last field of the document is dropped.

use unicode_width::UnicodeWidthStr;

use crate::model::{FieldValue, KeywordEntry, Record};
use crate::schema::{FieldSpec, FIELDS, INDENT, MAX_WIDTH};

use super::wrap::wrap;

/// Placeholder for longform bodies in brief output.
pub const HIDDEN: &str = "<hidden>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Canonical on-disk form. Absent fields are omitted.
    Disk,
    /// Editing template. Every editable field appears, empty ones as a bare
    /// `field:` header; non-editable fields are left out.
    Template,
    /// Human-facing output.
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Full,
    /// Longform bodies are replaced by [`HIDDEN`].
    Brief,
}

pub fn serialize(record: &Record, mode: Mode, verbosity: Verbosity) -> String {
    let mut lines: Vec<String> = Vec::new();

    for spec in FIELDS {
        if mode == Mode::Template && !spec.editable {
            continue;
        }

        let Some(value) = record.get(spec.name).filter(|v| !v.is_empty()) else {
            if mode == Mode::Template {
                lines.push(header(spec));
            }
            continue;
        };

        if spec.longform {
            if verbosity == Verbosity::Brief {
                lines.push(format!("{}: {}", spec.name, HIDDEN));
            } else {
                push_paragraphs(&mut lines, spec, &value.to_string());
                lines.push(String::new());
            }
        } else if spec.multiple {
            push_elements(&mut lines, spec, value);
            lines.push(String::new());
        } else {
            let single = format!("{}: {}", spec.name, value);
            let text = value.to_string();
            if text.contains('\n') || single.width() > MAX_WIDTH {
                push_paragraphs(&mut lines, spec, &text);
                lines.push(String::new());
            } else {
                lines.push(single);
            }
        }
    }

    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Canonical form written to disk.
pub fn to_disk(record: &Record) -> String {
    serialize(record, Mode::Disk, Verbosity::Full)
}

/// Text handed to the editor.
pub fn to_template(record: &Record) -> String {
    serialize(record, Mode::Template, Verbosity::Full)
}

pub fn to_display(record: &Record, verbosity: Verbosity) -> String {
    serialize(record, Mode::Display, verbosity)
}

fn header(spec: &FieldSpec) -> String {
    format!("{}:", spec.name)
}

fn push_paragraphs(lines: &mut Vec<String>, spec: &FieldSpec, text: &str) {
    lines.push(header(spec));
    let paragraphs = text.lines().filter(|p| !p.trim().is_empty());
    for (i, paragraph) in paragraphs.enumerate() {
        if i != 0 {
            lines.push(String::new());
        }
        lines.extend(wrap(paragraph, MAX_WIDTH, INDENT, INDENT));
    }
}

/// One element per line. Only keyword descriptions wrap, onto
/// double-indented lines; a plain element or a keyword is never broken, as a
/// continuation line would read back as another element or as a description.
fn push_elements(lines: &mut Vec<String>, spec: &FieldSpec, value: &FieldValue) {
    lines.push(header(spec));

    if let Some(entries) = value.as_keywords().filter(|_| spec.keyword_style) {
        let mut entries: Vec<&KeywordEntry> = entries.iter().collect();
        if spec.alphabetical {
            entries.sort_by_cached_key(|entry| entry.to_string());
        }
        for entry in entries {
            lines.extend(keyword_lines(entry));
        }
        return;
    }

    let mut elements = value.elements();
    if spec.alphabetical {
        elements.sort();
    }
    lines.extend(elements.iter().map(|element| format!("{}{}", INDENT, element)));
}

fn keyword_lines(entry: &KeywordEntry) -> Vec<String> {
    let bare = || vec![format!("{}{}", INDENT, entry.keyword)];
    let Some(description) = &entry.description else {
        return bare();
    };
    let lead = format!("{}{}: ", INDENT, entry.keyword);
    let lines = wrap(description, MAX_WIDTH, &lead, &INDENT.repeat(2));
    if lines.is_empty() {
        bare()
    } else {
        lines
    }
}
