//! # Domain Model: Records, Field Values and Keyword Entries
//!
//! A [`Record`] is one catalogued work: a map from field name to
//! [`FieldValue`], plus the `filename` it was loaded from. The filename is
//! the record's identity within the collection. It is attached by whoever
//! read the file and never appears in the file itself.
//!
//! Values come in four shapes, decided by the field's spec:
//!
//! - **Text**: plain scalars and longform fields (paragraphs joined by `\n`)
//! - **Number**: `numeric` fields such as `year`
//! - **List**: `multiple` fields whose elements are bare strings
//! - **Keywords**: `keyword_style` fields, a list of [`KeywordEntry`]
//!
//! Empty values are never stored: a field is either present with content or
//! absent from the map.

use chrono::Local;
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::{CREATED_AT, LAST_UPDATED};

/// A `keyword[: description]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeywordEntry {
    pub keyword: String,
    pub description: Option<String>,
}

impl KeywordEntry {
    pub fn new(keyword: impl Into<String>, description: Option<String>) -> Self {
        let description = description.filter(|d| !d.is_empty());
        Self {
            keyword: keyword.into(),
            description,
        }
    }

    /// Parses `keyword` or `keyword: description`, splitting on the first colon.
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((keyword, description)) => Self::new(
                keyword.trim_end(),
                Some(description.trim_start().to_string()),
            ),
            None => Self::new(s, None),
        }
    }

    /// Appends a continuation line to the description.
    pub fn extend_description(&mut self, more: &str) {
        match &mut self.description {
            Some(description) => {
                description.push(' ');
                description.push_str(more);
            }
            None => self.description = Some(more.to_string()),
        }
    }

    /// False when both the keyword and the description are empty.
    pub fn is_present(&self) -> bool {
        !self.keyword.is_empty() || self.description.is_some()
    }
}

impl fmt::Display for KeywordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.keyword, description),
            None => write!(f, "{}", self.keyword),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    List(Vec<String>),
    Keywords(Vec<KeywordEntry>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Keywords(entries) => entries.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_keywords(&self) -> Option<&[KeywordEntry]> {
        match self {
            FieldValue::Keywords(entries) => Some(entries),
            _ => None,
        }
    }

    /// The strings a search term is tested against: the whole scalar, or the
    /// keyword of each element.
    pub fn match_texts(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::Number(n) => vec![n.to_string()],
            FieldValue::List(items) => items.clone(),
            FieldValue::Keywords(entries) => entries.iter().map(|e| e.keyword.clone()).collect(),
        }
    }

    /// Each element in its string form, for serialization.
    pub fn elements(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::Number(n) => vec![n.to_string()],
            FieldValue::List(items) => items.clone(),
            FieldValue::Keywords(entries) => entries.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            other => write!(f, "{}", other.elements().join(", ")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Path relative to the collection root, with `/` separators.
    pub filename: String,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Sets a field. Empty values remove the field instead.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        if value.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, value);
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replaces every field with those of `other`, keeping this record's
    /// filename. Used when an edited copy comes back from the editor.
    pub fn replace_fields(&mut self, other: Record) {
        self.fields = other.fields;
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn title(&self) -> &str {
        self.text("title").unwrap_or_default()
    }

    pub fn creator(&self) -> Option<&str> {
        self.text("creator")
    }

    /// Stamps `last-updated`, and `created-at` as well when `created` is set.
    pub fn touch(&mut self, timestamp: &str, created: bool) {
        self.set(LAST_UPDATED, FieldValue::Text(timestamp.to_string()));
        if created {
            self.set(CREATED_AT, FieldValue::Text(timestamp.to_string()));
        }
    }

    /// One-line description used in listings: `Title (Creator) [filename]`.
    pub fn shortform(&self) -> String {
        match self.creator() {
            Some(creator) => format!("{} ({}) [{}]", self.title(), creator, self.filename),
            None => format!("{} [{}]", self.title(), self.filename),
        }
    }

    /// Key for alphabetical listing: the shortform without a leading article.
    pub fn sort_key(&self) -> String {
        let name = self.shortform();
        for article in ["The ", "Le ", "La "] {
            if let Some(rest) = name.strip_prefix(article) {
                return rest.to_string();
            }
        }
        name
    }
}

/// Sorts records alphabetically by [`Record::sort_key`].
pub fn sort_records(records: &mut [Record]) {
    records.sort_by_cached_key(Record::sort_key);
}

/// Human-readable local time, e.g. `Sun 24 May 2020 08:55 AM -07:00`.
pub fn make_timestamp() -> String {
    Local::now().format("%a %d %b %Y %I:%M %p %:z").to_string()
}
