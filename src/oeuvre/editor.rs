use crate::error::{OeuvreError, Result};
use std::env;
use std::path::Path;
use std::process::Command;

/// Gets the editor command.
/// Uses the configured editor, then $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor(configured: Option<&str>) -> Result<String> {
    if let Some(editor) = configured.filter(|e| !e.trim().is_empty()) {
        return Ok(editor.to_string());
    }

    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    // Try common fallbacks
    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(OeuvreError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Splits an editor command such as `code --wait` into program and arguments.
fn split_command(editor: &str) -> Result<(&str, Vec<&str>)> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| OeuvreError::Api("Editor command is empty".to_string()))?;
    Ok((program, parts.collect()))
}

/// Opens all `paths` in one editor session and waits for it to close.
pub fn open_in_editor<P: AsRef<Path>>(editor: &str, paths: &[P]) -> Result<()> {
    let (program, args) = split_command(editor)?;
    tracing::debug!(editor, files = paths.len(), "launching editor");

    let mut command = Command::new(program);
    command.args(args);
    for path in paths {
        let path: &Path = path.as_ref();
        command.arg(path);
    }

    let status = command
        .status()
        .map_err(|e| OeuvreError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(OeuvreError::Api(match status.code() {
            Some(code) => format!("editor process exited with error code {}", code),
            None => format!("editor '{}' was terminated by a signal", editor),
        }));
    }
    Ok(())
}
