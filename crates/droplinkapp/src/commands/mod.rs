//! # Command Layer
//!
//! This module contains the **core business logic** of droplink. Each command lives in
//! its own submodule and implements plain functions over a [`LinkStore`](crate::store::link_store::LinkStore)
//! and the current [`Settings`].
//!
//! ## Role and Responsibilities
//!
//! - Implement the logic for each user-visible operation
//! - Return a structured [`CmdResult`] with affected links and messages
//! - Stay UI-agnostic: the same functions back the CLI, an extension host or a web page
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: selectors arrive already parsed
//! - **User interaction**: no prompts. Batch-open returns a plan that says whether
//!   confirmation is needed; the caller asks and passes the answer back
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_links`: links created or modified, with their post-operation index
//! - `listed_links`: links to display, with their canonical index
//! - `messages`: leveled messages (info, success, warning); failures are `Err`, not messages
//! - `tags`, `stats`, `settings`, `export`: payloads for the commands that produce them
//!
//! ## Testing Strategy
//!
//! Command tests use [`MemBackend`](crate::store::mem_backend::MemBackend) and never
//! touch the filesystem.
//!
//! ## Command Modules
//!
//! - [`create`]: Add a link through the UI path (validated)
//! - [`capture`]: Save a link from a host event (duplicate suppression)
//! - [`get`]: List and filter links
//! - [`update`]: Edit title, url or tags
//! - [`delete`]: Remove links
//! - [`tagging`]: Add or remove a tag on many links
//! - [`tags`]: Collect the tags in use
//! - [`stats`]: Collection summary
//! - [`open`]: Batch-open policy
//! - [`export`] / [`import`]: JSON transfer
//! - [`backup`]: Scheduled snapshot of the collection
//! - [`config`]: Read and change settings
//! - [`helpers`]: Selector resolution

use crate::commands::stats::LinkStats;
use crate::index::DisplayLink;
use crate::model::Settings;
use serde::Serialize;

pub mod backup;
pub mod capture;
pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod helpers;
pub mod import;
pub mod open;
pub mod stats;
pub mod tagging;
pub mod tags;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_links: Vec<DisplayLink>,
    pub listed_links: Vec<DisplayLink>,
    pub messages: Vec<CmdMessage>,
    pub tags: Vec<String>,
    pub stats: Option<LinkStats>,
    pub settings: Option<Settings>,
    pub export: Option<String>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_links(mut self, links: Vec<DisplayLink>) -> Self {
        self.affected_links = links;
        self
    }

    pub fn with_listed_links(mut self, links: Vec<DisplayLink>) -> Self {
        self.listed_links = links;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Pluralizes `link` for messages.
pub(crate) fn links_word(n: usize) -> &'static str {
    if n == 1 {
        "link"
    } else {
        "links"
    }
}
