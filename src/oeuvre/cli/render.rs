//! # Rendering Module
//!
//! Turns command results into terminal text. Functions here build strings and
//! leave the printing to the caller, so output can be tested with colors off.

use colored::Colorize;
use oeuvre::commands::{CmdMessage, KeywordCount, ListedRecord, MessageLevel};
use oeuvre::model::Record;

/// `Title (Creator) [filename]`, with the title highlighted.
fn styled_shortform(record: &Record) -> String {
    let name = match record.creator() {
        Some(creator) => format!("{} ({})", record.title().bold(), creator),
        None => record.title().bold().to_string(),
    };
    format!("{} {}", name, format!("[{}]", record.filename).dimmed())
}

/// One line per record, each followed by its match descriptions.
pub fn render_listing(listed: &[ListedRecord], indent: &str) -> String {
    let mut output = String::new();
    for entry in listed {
        output.push_str(indent);
        output.push_str(&styled_shortform(&entry.record));
        output.push('\n');
        for description in &entry.matches {
            output.push_str(&format!("{}  {}\n", indent, description.to_string().cyan()));
        }
    }
    output
}

pub fn render_keyword_counts(counts: &[KeywordCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{} ({})\n", c.name, c.count.to_string().dimmed()))
        .collect()
}

/// The prompt shown before a record introduces keywords nobody used before.
pub fn render_new_keywords(filename: &str, keywords: &[String]) -> String {
    format!(
        "new keywords for {}: {}",
        filename.bold(),
        keywords.join(", ").yellow()
    )
}

pub fn render_error(message: &str) -> String {
    format!("{} {}", "error:".red().bold(), message)
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => {
                eprintln!("{} {}", "warning:".yellow().bold(), message.content)
            }
            MessageLevel::Error => eprintln!("{}", render_error(&message.content)),
        }
    }
}
