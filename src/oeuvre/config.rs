//! # Configuration
//!
//! Oeuvre configuration is loaded with [`confique`], layering environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Command-line flags**: `--directory`, `--best-effort` (applied by the CLI).
//! 2. **Environment variables**: `OEUVRE_DIRECTORY`, `OEUVRE_BEST_EFFORT`, `EDITOR`.
//! 3. **Config file**: `oeuvre.toml` in the OS config directory (via `directories`).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `directory` | OS data dir | Root of the record collection |
//! | `locations_file` | `locations.json` | Location hierarchy, relative to `directory` |
//! | `editor` | `$EDITOR`, `$VISUAL`, vim, vi, nano | Editor command for `new` and `edit` |
//! | `best_effort` | `false` | Skip malformed records instead of failing |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CONFIG_FILENAME: &str = "oeuvre.toml";

/// Configuration for oeuvre, stored in `oeuvre.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OeuvreConfig {
    /// Root directory of the collection.
    #[config(env = "OEUVRE_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Location hierarchy file, relative to the collection directory.
    #[config(default = "locations.json")]
    pub locations_file: String,

    /// Editor command. May include arguments, e.g. "code --wait".
    #[config(env = "EDITOR")]
    pub editor: Option<String>,

    /// Skip malformed records with a warning instead of failing.
    #[config(env = "OEUVRE_BEST_EFFORT", default = false)]
    pub best_effort: bool,
}

impl Default for OeuvreConfig {
    fn default() -> Self {
        Self {
            directory: None,
            locations_file: "locations.json".to_string(),
            editor: None,
            best_effort: false,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "oeuvre")
}

impl OeuvreConfig {
    /// Loads configuration from the environment and `file`, or from the
    /// default config file when `file` is `None`. Missing files are skipped.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file.map(Path::to_path_buf).or_else(Self::default_file) {
            tracing::debug!(path = %path.display(), "reading config file");
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// `oeuvre.toml` in the OS config directory.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// The collection directory, falling back to the OS data directory.
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = OeuvreConfig::default();
        assert_eq!(config.locations_file, "locations.json");
        assert!(!config.best_effort);
        assert_eq!(config.editor, None);
    }

    #[test]
    fn test_explicit_directory_wins() {
        let config = OeuvreConfig {
            directory: Some(PathBuf::from("/tmp/collection")),
            ..Default::default()
        };
        assert_eq!(config.directory(), PathBuf::from("/tmp/collection"));
    }

    #[test]
    fn test_defaults_without_file() {
        let config = OeuvreConfig::builder().load().unwrap();
        assert_eq!(config, OeuvreConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "directory = \"/data/works\"\nbest_effort = true\neditor = \"nano\"\n",
        )
        .unwrap();

        let config = OeuvreConfig::builder().file(&path).load().unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("/data/works")));
        assert!(config.best_effort);
        assert_eq!(config.editor.as_deref(), Some("nano"));
        assert_eq!(config.locations_file, "locations.json");
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempdir().unwrap();
        let config = OeuvreConfig::builder()
            .file(dir.path().join("absent.toml"))
            .load()
            .unwrap();
        assert_eq!(config, OeuvreConfig::default());
    }
}
