//! # CLI Behavior
//!
//! This is **one possible UI client** for droplink. It is the only place that
//! knows about terminal I/O, prompts and exit codes.
//!
//! ### Naked Execution (`droplink`)
//!
//! Running `droplink` with no arguments lists the collection.
//!
//! ### Two Ways In
//!
//! - `droplink add <url> [title]`: the dashboard form. Title and url are validated,
//!   duplicates are allowed.
//! - `droplink save <url> [title]`: the context-menu capture. A url that is already
//!   saved is reported and skipped.
//!
//! ### Batch-Open
//!
//! `droplink open 1-5` opens the selection in the browser. When the selection is
//! larger than `maxTabsToOpen` and `confirmBeforeOpening` is on, it asks first
//! (`--yes` skips the question). `--capped` applies the context-menu policy
//! instead: open only the first `maxTabsToOpen`, never ask.
//!
//! ### Data Directory
//!
//! `--data-dir`, else `DROPLINK_DATA_DIR`, else the platform data directory.
//!
//! ## Module Structure
//!
//! - `commands`: context setup, dispatch and per-command handlers
//! - `render`: output formatting (colors, columns, relative times)
//! - `setup`: argument parsing via clap
//! - `opener`: system browser tab opener

mod commands;
mod opener;
mod render;
pub mod setup;

pub use commands::run;
