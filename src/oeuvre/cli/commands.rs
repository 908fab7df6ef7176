//! # CLI Layer
//!
//! This module is **one possible UI client** for oeuvre. It is the only place
//! that knows about terminal I/O, runs the editor and asks questions.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` from flags and configuration
//! - `handle_*()`: Per-command handlers that call the API and print the result
//!
//! ## Editing Sessions
//!
//! `edit` and `new` stage a copy of each record under `editing/`, open the
//! editor on the copies and parse them when it exits. A parse error, or a
//! declined set of new keywords, offers another round in the editor; giving up
//! leaves the staged copies in place and fails the command.

use super::prompt::confirm;
use super::render::{
    print_messages, render_error, render_keyword_counts, render_listing, render_new_keywords,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use oeuvre::api::{OeuvreApi, SearchOptions, StagedCopy};
use oeuvre::commands::{CmdMessage, CmdResult};
use oeuvre::config::OeuvreConfig;
use oeuvre::editor::{get_editor, open_in_editor};
use oeuvre::error::{OeuvreError, Result};
use oeuvre::format::Verbosity;
use oeuvre::model::Record;
use oeuvre::store::fs_backend::FsBackend;
use oeuvre::store::{FileStore, LoadMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: OeuvreApi<FileStore>,
    editor: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color || !console::colors_enabled() {
        colored::control::set_override(false);
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Search {
            terms,
            detailed,
            strict_location,
        } => handle_search(&ctx, terms, detailed, strict_location),
        Commands::Show { terms, brief } => handle_show(&ctx, terms, brief),
        Commands::Edit {
            terms,
            strict_location,
        } => handle_edit(&ctx, terms, strict_location),
        Commands::New { name } => handle_new(&ctx, name),
        Commands::Keywords { field, sorted } => handle_keywords(&ctx, field, sorted),
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("oeuvre={}", level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = OeuvreConfig::load(cli.config.as_deref())?;
    if let Some(directory) = &cli.directory {
        config.directory = Some(directory.clone());
    }
    if cli.best_effort {
        config.best_effort = true;
    }

    let root = config.directory();
    tracing::debug!(root = %root.display(), "opening collection");

    let mode = if config.best_effort {
        LoadMode::BestEffort
    } else {
        LoadMode::Strict
    };
    let store = FileStore::with_backend(FsBackend::new(root));
    let api = OeuvreApi::open(store, &config.locations_file, mode)?;

    Ok(AppContext {
        api,
        editor: config.editor,
    })
}

fn print_result(result: &CmdResult, indent: &str) {
    print_messages(&result.messages);
    print!("{}", render_listing(&result.listed_records, indent));
    if let Some(text) = &result.rendered {
        println!("{}", text);
    }
}

fn handle_search(
    ctx: &AppContext,
    terms: Vec<String>,
    detailed: bool,
    strict_locations: bool,
) -> Result<()> {
    let options = SearchOptions {
        detailed,
        strict_locations,
    };
    let result = ctx.api.search(&terms, options)?;
    print_result(&result, "");
    Ok(())
}

fn handle_show(ctx: &AppContext, terms: Vec<String>, brief: bool) -> Result<()> {
    let verbosity = if brief {
        Verbosity::Brief
    } else {
        Verbosity::Full
    };
    let result = ctx.api.show(&terms, verbosity)?;
    print_result(&result, "  ");
    Ok(())
}

fn handle_keywords(ctx: &AppContext, field: Option<String>, sorted: bool) -> Result<()> {
    let result = ctx.api.keywords(field.as_deref(), sorted)?;
    print_messages(&result.messages);
    print!("{}", render_keyword_counts(&result.keyword_counts));
    Ok(())
}

fn handle_edit(ctx: &AppContext, terms: Vec<String>, strict_locations: bool) -> Result<()> {
    let (originals, warnings) = ctx.api.find_for_edit(&terms, strict_locations)?;
    print_messages(&warnings);
    let mut paths = Vec::with_capacity(originals.len());
    for record in &originals {
        paths.push(stage(ctx.api.stage_record(record)?));
    }
    let editor = get_editor(ctx.editor.as_deref())?;

    // Skipped files were reported by the lookup above.
    let mut warned = true;
    let edited = loop {
        open_in_editor(&editor, &paths)?;
        let timestamp = ctx.api.timestamp();
        let attempt: Result<Vec<Record>> = originals
            .iter()
            .map(|record| ctx.api.apply_edit(record, &timestamp))
            .collect();
        match attempt {
            Ok(records) => {
                if keep_new_keywords(ctx, &records, &mut warned)? {
                    break records;
                }
            }
            Err(e) => eprintln!("{}", render_error(&e.to_string())),
        }
        if !confirm("Try again?")? {
            return Err(abandoned(&paths));
        }
    };

    let result = ctx.api.commit_edits(edited)?;
    print_result(&result, "");
    Ok(())
}

fn handle_new(ctx: &AppContext, name: String) -> Result<()> {
    ctx.api.check_new_name(&name)?;
    let path = stage(ctx.api.stage_new(&name)?);
    let editor = get_editor(ctx.editor.as_deref())?;

    let mut warned = false;
    let record = loop {
        open_in_editor(&editor, &[&path])?;
        match ctx.api.apply_new(&name, &ctx.api.timestamp()) {
            Ok(record) => {
                if keep_new_keywords(ctx, std::slice::from_ref(&record), &mut warned)? {
                    break record;
                }
            }
            Err(e) => eprintln!("{}", render_error(&e.to_string())),
        }
        if !confirm("Try again?")? {
            return Err(abandoned(std::slice::from_ref(&path)));
        }
    };

    let result = ctx.api.commit_new(&name, record)?;
    print_result(&result, "");
    Ok(())
}

/// Tells the user when an earlier session's text is being picked up again.
fn stage(copy: StagedCopy) -> PathBuf {
    if copy.resumed {
        print_messages(&[CmdMessage::warning(format!(
            "resuming edited text left in {}",
            copy.path.display()
        ))]);
    }
    copy.path
}

/// Asks about keywords the collection has not seen before, record by record.
/// Returns false as soon as one set is declined.
/// Files skipped while loading the collection are reported once per session.
fn keep_new_keywords(ctx: &AppContext, records: &[Record], warned: &mut bool) -> Result<bool> {
    for record in records {
        let (fresh, warnings) = ctx.api.new_keywords(record)?;
        if !*warned {
            print_messages(&warnings);
            *warned = true;
        }
        if fresh.is_empty() {
            continue;
        }
        println!("{}", render_new_keywords(&record.filename, &fresh));
        if !confirm("Keep?")? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn abandoned(paths: &[PathBuf]) -> OeuvreError {
    let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    OeuvreError::Api(format!(
        "changes not saved; edited text left in {}",
        paths.join(", ")
    ))
}
