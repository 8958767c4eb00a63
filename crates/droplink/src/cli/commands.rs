//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin prompts)
//! - Picks the data directory
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: main dispatch logic (called by `main.rs`)
//! - `init_context()`: builds `AppContext` around a directory-backed store
//! - `handle_*()`: per-command handlers that call the API and print the result
//!
//! Business rules (validation, duplicate suppression, the open policy) live in
//! `droplinkapp`; handlers only translate arguments and render.

use super::opener::{BrowserOpener, DryRunOpener};
use super::render::{
    print_links, print_links_json, print_messages, print_path, print_settings, print_stats,
    print_tags,
};
use super::setup::{Cli, Commands};
use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use droplinkapp::api::DroplinkApi;
use droplinkapp::commands::capture::CaptureRequest;
use droplinkapp::commands::config::ConfigAction;
use droplinkapp::commands::get::LinkFilter;
use droplinkapp::commands::open::OpenSource;
use droplinkapp::commands::update::LinkUpdate;
use droplinkapp::error::{DroplinkError, Result};
use droplinkapp::model::LinkDraft;
use droplinkapp::store::fs_backend::FsBackend;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DROPLINK_LOG";
const STDIO_PATH: &str = "-";

struct AppContext {
    api: DroplinkApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { url, title, tags }) => {
            handle_add(&mut ctx, url, join_title(title), tags)
        }
        Some(Commands::Save { url, title }) => handle_save(&mut ctx, url, join_title(title)),
        Some(Commands::List { search, tags, json }) => handle_list(&ctx, search, tags, json),
        Some(Commands::Edit {
            selector,
            title,
            url,
            tags,
            clear_tags,
        }) => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            handle_edit(&mut ctx, &selector, LinkUpdate { title, url, tags })
        }
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::Tag { tag, selectors }) => handle_tag(&mut ctx, &tag, selectors),
        Some(Commands::Untag { tag, selectors }) => handle_untag(&mut ctx, &tag, selectors),
        Some(Commands::Open {
            selectors,
            all,
            search,
            tags,
            yes,
            capped,
            dry_run,
        }) => {
            // --all is the empty selection
            let selectors = if all { Vec::new() } else { selectors };
            let filter = LinkFilter { search, tags };
            let source = if capped {
                OpenSource::ContextMenu
            } else {
                OpenSource::Dashboard
            };
            handle_open(&ctx, selectors, &filter, source, yes, dry_run)
        }
        Some(Commands::Export { output }) => handle_export(&ctx, output),
        Some(Commands::Import { file }) => handle_import(&mut ctx, &file),
        Some(Commands::Backup { force }) => handle_backup(&ctx, force),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Tags) => handle_tags(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&ctx, None, Vec::new(), false),
    }
}

/// Logs go to stderr. `DROPLINK_LOG` takes an `EnvFilter` directive; `--verbose`
/// raises the fallback from `warn` to `debug`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (tests driving run() twice) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = data_dir(cli.data_dir.clone())?;
    debug!(root = %root.display(), "using data directory");

    let api = DroplinkApi::new(FsBackend::new(root));
    // The first run writes defaults, like an install hook.
    if !matches!(cli.command, Some(Commands::Init)) {
        api.init()?;
    }
    Ok(AppContext { api })
}

fn data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "droplink", "droplink")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            DroplinkError::StorageUnavailable(
                "no home directory; pass --data-dir or set DROPLINK_DATA_DIR".to_string(),
            )
        })
}

fn join_title(words: Vec<String>) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn handle_add(
    ctx: &mut AppContext,
    url: String,
    title: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let draft = LinkDraft::new(url, title).with_tags(tags);
    let result = ctx.api.add_link(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_save(ctx: &mut AppContext, url: String, title: Option<String>) -> Result<()> {
    let result = ctx.api.capture(&CaptureRequest::new(url, title))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    tags: Vec<String>,
    json: bool,
) -> Result<()> {
    let filter = LinkFilter { search, tags };
    let result = ctx.api.get_links(&filter)?;
    if json {
        print_links_json(&result.listed_links)?;
    } else {
        print_links(&result.listed_links);
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, selector: &str, changes: LinkUpdate) -> Result<()> {
    let result = ctx.api.update_link(selector, changes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_links(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tag(ctx: &mut AppContext, tag: &str, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.add_tag(&selectors, tag)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_untag(ctx: &mut AppContext, tag: &str, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.remove_tag(&selectors, tag)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_open(
    ctx: &AppContext,
    selectors: Vec<String>,
    filter: &LinkFilter,
    source: OpenSource,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    let plan = ctx.api.plan_open(&selectors, filter, source)?;
    let confirmed = if plan.needs_confirmation && !yes {
        confirm(&format!("Open {} links?", plan.links.len()))?
    } else {
        true
    };

    let result = if dry_run {
        ctx.api.open(plan, confirmed, DryRunOpener)
    } else {
        ctx.api.open(plan, confirmed, BrowserOpener)
    };
    print_messages(&result.messages);
    Ok(())
}

/// Asks on stderr, reads one line from stdin. Anything but y/yes is a no.
fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N] ", question);
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn handle_export(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(Utc::now().date_naive())?;
    let text = result.export.unwrap_or_else(|| "[]".to_string());

    let target = match output {
        Some(path) if path == Path::new(STDIO_PATH) => None,
        Some(path) => Some(path),
        // The first message carries the suggested file name.
        None => result
            .messages
            .first()
            .map(|m| PathBuf::from(&m.content)),
    };

    match target {
        Some(path) => {
            std::fs::write(&path, &text)?;
            print_messages(&result.messages[1..]);
            print_path(&path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let text = if file == Path::new(STDIO_PATH) {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(file)?
    };

    let result = ctx.api.import(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backup(ctx: &AppContext, force: bool) -> Result<()> {
    let outcome = ctx.api.backup(Utc::now().timestamp_millis(), force)?;
    print_messages(&outcome.into_result().messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    Ok(())
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.tags()?;
    print_tags(&result.tags);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(settings) = &result.settings {
            print_settings(settings);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
