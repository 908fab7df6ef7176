//! # Query Engine
//!
//! Queries are flat lists of terms joined by AND. A term is either bare
//! (`delillo`) or scoped to a field (`creator:delillo`), split on the first
//! colon.
//!
//! ## Matching Rules
//!
//! | Term | Fields tested |
//! |------|---------------|
//! | bare | every `searchable` field, plus the filename |
//! | `field:text` | that field only |
//! | `filename:text` | the record's filename |
//! | `locations:place` | the record's locations and everything enclosing them |
//!
//! Text comparison is case-insensitive substring containment when the query
//! is partial (the default), or case-insensitive equality otherwise. List
//! fields match when any element's keyword matches; scalars are compared in
//! their string form. A scoped term against a field the record lacks never
//! matches.
//!
//! Scoped `locations:` terms are the exception: they compare keywords exactly
//! and consult the [`LocationHierarchy`], so `locations:russia` finds a record
//! set in `moscow`. Bare terms search locations like any other list field.
//!
//! A scope naming a field the schema does not define is an error, reported
//! when the query is built.

pub mod locations;

use once_cell::sync::Lazy;
use std::fmt;

use crate::error::{OeuvreError, Result};
use crate::model::{sort_records, Record};
use crate::schema::{get_spec, searchable_fields, LOCATIONS};

pub use locations::LocationHierarchy;

/// Pseudo-field that matches against the record's filename.
pub const FILENAME: &str = "filename";

/// Fields consulted by bare terms, in schema order.
static BARE_FIELDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut fields: Vec<&'static str> = searchable_fields().collect();
    fields.push(FILENAME);
    fields
});

/// One search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub field: Option<String>,
    pub text: String,
}

impl Term {
    /// Splits `field:text` on the first colon. No colon, or nothing before
    /// it, means a bare term.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some(("", text)) => Self {
                field: None,
                text: text.to_string(),
            },
            Some((field, text)) => Self {
                field: Some(field.to_string()),
                text: text.to_string(),
            },
            None => Self {
                field: None,
                text: raw.to_string(),
            },
        }
    }

    fn fields(&self) -> Vec<&str> {
        match &self.field {
            Some(field) => vec![field.as_str()],
            None => BARE_FIELDS.clone(),
        }
    }
}

/// Why a record matched one term: the field, and the value that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDescription {
    pub field: String,
    pub value: String,
}

impl fmt::Display for MatchDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: matched text ({})", self.field, self.value)
    }
}

/// A validated list of terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
    partial: bool,
    hierarchical: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            partial: true,
            hierarchical: true,
        }
    }
}

impl Query {
    /// Builds a query, rejecting scopes that name unknown fields.
    pub fn parse<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let terms = terms
            .iter()
            .map(|raw| Term::parse(raw.as_ref()))
            .collect::<Vec<_>>();

        for term in &terms {
            if let Some(field) = &term.field {
                if field != FILENAME && get_spec(field).is_none() {
                    return Err(OeuvreError::UnknownField(field.clone()));
                }
            }
        }

        Ok(Self {
            terms,
            ..Self::default()
        })
    }

    /// Require whole-value matches instead of substrings.
    pub fn exact(mut self) -> Self {
        self.partial = false;
        self
    }

    /// Match `locations:` terms against location keywords only, ignoring
    /// the hierarchy.
    pub fn strict_locations(mut self) -> Self {
        self.hierarchical = false;
        self
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, record: &Record, hierarchy: &LocationHierarchy) -> bool {
        self.terms
            .iter()
            .all(|term| !self.match_term(record, term, hierarchy).is_empty())
    }

    /// Like [`Query::matches`], but reports what each term matched.
    /// Returns `None` when the record does not match.
    pub fn describe(
        &self,
        record: &Record,
        hierarchy: &LocationHierarchy,
    ) -> Option<Vec<MatchDescription>> {
        let mut descriptions = Vec::new();
        for term in &self.terms {
            let found = self.match_term(record, term, hierarchy);
            if found.is_empty() {
                return None;
            }
            descriptions.extend(found);
        }
        Some(descriptions)
    }

    /// Records matching the query, sorted for listing.
    pub fn filter(&self, records: &[Record], hierarchy: &LocationHierarchy) -> Vec<Record> {
        let mut matched: Vec<Record> = records
            .iter()
            .filter(|record| self.matches(record, hierarchy))
            .cloned()
            .collect();
        sort_records(&mut matched);
        matched
    }

    /// Every field/value pair that satisfies `term`.
    fn match_term(
        &self,
        record: &Record,
        term: &Term,
        hierarchy: &LocationHierarchy,
    ) -> Vec<MatchDescription> {
        let mut found = Vec::new();
        let scoped_locations = term.field.as_deref() == Some(LOCATIONS);

        for field in term.fields() {
            let candidates = if field == FILENAME {
                vec![record.filename.clone()]
            } else {
                match record.get(field) {
                    Some(value) => value.match_texts(),
                    None => continue,
                }
            };

            for candidate in candidates {
                let hit = if scoped_locations {
                    self.match_location(&term.text, &candidate, hierarchy)
                } else {
                    self.match_text(&term.text, &candidate)
                };
                if hit {
                    found.push(MatchDescription {
                        field: field.to_string(),
                        value: candidate,
                    });
                }
            }
        }
        found
    }

    fn match_text(&self, term: &str, candidate: &str) -> bool {
        let term = term.to_lowercase();
        let candidate = candidate.to_lowercase();
        if self.partial {
            candidate.contains(&term)
        } else {
            candidate == term
        }
    }

    fn match_location(&self, term: &str, location: &str, hierarchy: &LocationHierarchy) -> bool {
        if self.hierarchical {
            hierarchy.contains(term, location)
        } else {
            location == term
        }
    }
}

/// Boolean match of raw terms against one record.
pub fn match_record<S: AsRef<str>>(
    record: &Record,
    terms: &[S],
    hierarchy: &LocationHierarchy,
) -> Result<bool> {
    Ok(Query::parse(terms)?.matches(record, hierarchy))
}

/// Detailed match of raw terms against one record.
pub fn match_record_detailed<S: AsRef<str>>(
    record: &Record,
    terms: &[S],
    hierarchy: &LocationHierarchy,
) -> Result<Option<Vec<MatchDescription>>> {
    Ok(Query::parse(terms)?.describe(record, hierarchy))
}
