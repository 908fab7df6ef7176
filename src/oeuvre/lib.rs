//! # Oeuvre Architecture
//!
//! Oeuvre keeps a catalogue of creative works (books, films, plays and stories) as
//! plain-text files, one record per file, in a format meant to be edited by hand.
//! It is a library with a small CLI client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the editor, prompts, prints       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Holds the store, location hierarchy and load mode        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - search, show, edit, new, keywords                        │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core: format/ (parse, validate, serialize), query/         │
//! │  Storage: store/ (RecordStore over fs or memory backends)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Record Format
//!
//! ```text
//! title: Libra
//! creator: Don DeLillo
//! type: book
//! year: 1988
//! locations:
//!   dallas
//!   moscow: Oswald's years in the Soviet Union
//!
//! keywords:
//!   conspiracy
//! ```
//!
//! Which fields exist, and how each is parsed, printed and searched, is declared
//! once in [`schema::FIELDS`]. See [`format`] for the grammar and [`query`] for
//! search semantics.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never calls
//! `std::process::exit` and never prompts. Errors are returned; the only
//! output is `tracing` events.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`format`]: Parser, validator and serializer for record text
//! - [`query`]: Search terms, matching and the location hierarchy
//! - [`store`]: Storage abstraction and implementations
//! - [`schema`]: The field table
//! - [`model`]: Core data types (`Record`, `FieldValue`, `KeywordEntry`)
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types
//! - `cli`: Printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod model;
pub mod query;
pub mod schema;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
