//! # Droplink CLI
//!
//! The binary is one host for the `droplinkapp` library. It plays every role the
//! library leaves to its host: it parses arguments, supplies a directory-backed
//! blob store, asks for confirmation before a large batch-open, opens URLs in the
//! system browser and prints results.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch + prompts (commands.rs)        │
//! │  - Colored terminal output (render.rs)                      │
//! │  - Browser tab opener (opener.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  droplinkapp::api::DroplinkApi<FsBackend>                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Diagnostics go to stderr through `tracing`; stdout carries only command output
//! so `droplink list --json` and `droplink export` can be piped.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
