//! # Command Layer
//!
//! This module contains the **core business logic** of oeuvre. Each command lives in its
//! own submodule and implements plain Rust functions over records and a [`RecordStore`].
//!
//! ## What Commands Do NOT Do
//!
//! Commands explicitly avoid:
//! - **Terminal I/O**: No stdout, stderr, or colors
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//! - **User interaction**: No editor, no prompts. Commands that need the user's
//!   input are split in two (prepare, then apply the edited text) and the UI
//!   runs the interaction in between
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. The UI layer decides how to render it.
//!
//! ## Testing Strategy
//!
//! Command tests use the in-memory store ([`crate::store::MemStore`]) and check
//! the returned `CmdResult`, along with what ended up in the backend.
//!
//! ## Command Modules
//!
//! - [`search`]: List records matching search terms
//! - [`show`]: Render the single record matching search terms
//! - [`edit`]: Re-parse edited records and write them back
//! - [`new`]: Create a record from an edited template
//! - [`keywords`]: Keyword frequencies and keywords new to the collection

use crate::error::Result;
use crate::model::Record;
use crate::query::{LocationHierarchy, MatchDescription};
use crate::store::{LoadMode, RecordStore};
use serde::Serialize;

pub mod edit;
pub mod keywords;
pub mod new;
pub mod search;
pub mod show;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A record in a listing, with the reasons it matched (when asked for).
#[derive(Debug, Clone)]
pub struct ListedRecord {
    pub record: Record,
    pub matches: Vec<MatchDescription>,
}

/// How often a keyword is used across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records to list, in display order.
    pub listed_records: Vec<ListedRecord>,
    /// Records written by the command.
    pub affected_records: Vec<Record>,
    /// Full text of a record, when the command renders one.
    pub rendered: Option<String>,
    pub keyword_counts: Vec<KeywordCount>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<ListedRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_rendered(mut self, text: String) -> Self {
        self.rendered = Some(text);
        self
    }
}

/// Settings shared by every command that reads the whole collection.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    pub mode: LoadMode,
    pub hierarchy: &'a LocationHierarchy,
}

impl<'a> Collection<'a> {
    pub fn new(mode: LoadMode, hierarchy: &'a LocationHierarchy) -> Self {
        Self { mode, hierarchy }
    }

    /// Loads every record. Files skipped in best-effort mode come back as
    /// warning messages.
    pub fn load<S: RecordStore>(&self, store: &S) -> Result<(Vec<Record>, Vec<CmdMessage>)> {
        let report = store.load(self.mode)?;
        let warnings = report
            .warnings
            .iter()
            .map(|w| CmdMessage::warning(w.to_string()))
            .collect();
        Ok((report.records, warnings))
    }
}
