use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "oeuvre", bin_name = "oeuvre", version = get_version())]
#[command(about = "Catalogue of books, films, plays and stories in plain text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory of the collection
    #[arg(short, long, global = true)]
    pub directory: Option<PathBuf>,

    /// Config file to read instead of the default one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip malformed entries with a warning instead of failing
    #[arg(long, global = true)]
    pub best_effort: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List entries matching all search terms
    #[command(alias = "s")]
    Search {
        /// Terms like `dallas` or `locations:russia`
        terms: Vec<String>,

        /// Show which fields matched
        #[arg(long)]
        detailed: bool,

        /// Match locations literally, without the location hierarchy
        #[arg(long)]
        strict_location: bool,
    },

    /// Print the entry matching all search terms
    Show {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Hide long text fields such as the plot summary
        #[arg(long)]
        brief: bool,
    },

    /// Edit the entries matching all search terms
    #[command(alias = "e")]
    Edit {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Match locations literally, without the location hierarchy
        #[arg(long)]
        strict_location: bool,
    },

    /// Create an entry, e.g. `oeuvre new blood-meridian.txt`
    #[command(alias = "n")]
    New {
        /// File name of the entry
        name: String,
    },

    /// Count keywords across the collection
    #[command(alias = "k")]
    Keywords {
        /// Only count this field, e.g. `locations`
        field: Option<String>,

        /// Order by descending count instead of by name
        #[arg(long)]
        sorted: bool,
    },
}
