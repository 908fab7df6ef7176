//! # Record Format Engine
//!
//! Records live on disk as small, hand-editable text files. This module turns
//! such text into a validated [`Record`](crate::model::Record) and back:
//!
//! - [`parse`]: line-oriented parser with per-field validation
//! - [`validate`]: value coercion and record-level rules
//! - [`serialize`]: canonical, template and display output
//!
//! Everything here is pure: no I/O, no logging. Reading files and attaching
//! paths to errors is the store's job.

pub mod parse;
pub mod serialize;
pub mod validate;
mod wrap;

pub use parse::parse_record;
pub use serialize::{serialize, to_disk, to_display, to_template, Mode, Verbosity, HIDDEN};
pub use validate::{validate_record, validate_value};
