use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "droplink",
    bin_name = "droplink",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Save, tag and batch-open airdrop links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding links.json and settings.json
    #[arg(long, global = true, env = "DROPLINK_DATA_DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a link (validated, duplicates allowed)
    #[command(alias = "a", display_order = 1)]
    Add {
        url: String,

        /// Title words (defaults to the url)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,

        /// Tag to apply (repeatable); defaults to the configured default tag
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Save a link unless its url is already saved
    #[command(display_order = 2)]
    Save {
        url: String,

        /// Title words (defaults to the url)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// List links
    #[command(alias = "ls", display_order = 3)]
    List {
        /// Case-insensitive match on title or url
        #[arg(short, long)]
        search: Option<String>,

        /// Only links with any of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Print the matching links as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Edit one link
    #[command(display_order = 4)]
    Edit {
        /// Index or id of the link
        selector: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        url: Option<String>,

        /// Replace all tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Remove every tag
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },

    /// Delete links
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Indexes, ranges or ids (e.g. 1 3-5)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Add a tag to links
    #[command(display_order = 6)]
    Tag {
        tag: String,

        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Remove a tag from links
    #[command(display_order = 7)]
    Untag {
        tag: String,

        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Open links in the browser
    #[command(alias = "o", display_order = 8)]
    Open {
        /// Indexes, ranges or ids
        #[arg(required_unless_present_any = ["all", "search", "tags"])]
        selectors: Vec<String>,

        /// Open every link (narrowed by --search/--tag when given)
        #[arg(long, conflicts_with = "selectors")]
        all: bool,

        /// Only links whose title or url contains this (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only links with any of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Open at most maxTabsToOpen links and never ask
        #[arg(long)]
        capped: bool,

        /// Print the urls instead of opening them
        #[arg(long)]
        dry_run: bool,
    },

    /// Export all links as JSON
    #[command(display_order = 20)]
    Export {
        /// Write to this file; "-" for stdout. Defaults to airdrop-links-<date>.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import links from a JSON file (replaces the collection)
    #[command(display_order = 21)]
    Import {
        /// File to read; "-" for stdin
        file: PathBuf,
    },

    /// Snapshot links to the backup slot when due
    #[command(display_order = 22)]
    Backup {
        /// Snapshot now regardless of settings and schedule
        #[arg(long)]
        force: bool,
    },

    /// Show collection statistics
    #[command(display_order = 30)]
    Stats,

    /// List the tags in use
    #[command(display_order = 31)]
    Tags,

    /// Show or change settings
    #[command(display_order = 32)]
    Config {
        key: Option<String>,
        value: Option<String>,
    },

    /// Write default settings if none exist
    #[command(display_order = 33)]
    Init,
}
