//! # Droplink Architecture
//!
//! Droplink keeps a collection of saved links (bookmarks for airdrop campaigns,
//! testnets, mints) with tags, search, batch-open and JSON import/export.
//!
//! This crate is the **UI-agnostic core**. The `droplink` binary is one client; a
//! browser extension host or a dashboard page would be others, each supplying its
//! own [`BlobStore`](store::BlobStore) and [`TabOpener`](commands::open::TabOpener).
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (CLI, extension background, dashboard)                │
//! │  - Parses input, renders results, prompts, opens tabs       │
//! │  - The ONLY place that knows about terminals or windows     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses selectors, loads settings                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic: capture policy, batch-open, import       │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - LinkStore: sole writer of the `links` array              │
//! │  - SettingsStore, BlobStore trait, Fs/Mem backends          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Whole-Collection Writes
//!
//! The collection is one JSON array under one key. Every mutation reads the array,
//! computes a new one and writes it back. See [`store::link_store`] for the writer
//! discipline and the cross-process race it does not cover.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns Rust types. It never
//! writes to stdout or stderr and never exits the process. Logging goes through
//! `tracing`; the host decides whether and where it is printed.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic per operation
//! - [`store`]: Blob store abstraction, link and settings repositories
//! - [`transfer`]: Import validation machine and export format
//! - [`model`]: `Link`, `LinkDraft`, `Settings`
//! - [`index`]: Display indexes and selectors
//! - [`config`]: Settings access by key
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod store;
pub mod transfer;
