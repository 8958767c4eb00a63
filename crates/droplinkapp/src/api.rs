//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every UI: the CLI, an extension background host, a dashboard page.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs**: selector strings become [`LinkSelector`]s
//! - **Loads settings** for the commands that depend on them
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr or prompts
//!
//! ## Selector Grammar
//!
//! - **Index**: `N` (e.g. `1`, `42`), the 1-based position in the collection
//! - **Range**: `Start-End` (e.g. `1-5`), start must be ≤ end
//! - **Id**: anything else is taken as a raw link id
//!
//! ## Generic Over BlobStore
//!
//! `DroplinkApi<B: BlobStore>` shares one backend between the link and settings
//! stores through an `Rc`:
//! - Production: `DroplinkApi<FsBackend>`
//! - Testing: `DroplinkApi<MemBackend>`

use crate::commands::backup::BackupOutcome;
use crate::commands::capture::{CaptureOutcome, CaptureRequest};
use crate::commands::config::ConfigAction;
use crate::commands::get::LinkFilter;
use crate::commands::open::{OpenPlan, OpenSource, TabOpener};
use crate::commands::update::LinkUpdate;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::{DroplinkError, Result};
use crate::index::{parse_selector, parse_selectors, LinkSelector};
use crate::model::{LinkDraft, Settings};
use crate::store::link_store::LinkStore;
use crate::store::settings_store::SettingsStore;
use crate::store::BlobStore;
use chrono::NaiveDate;
use std::rc::Rc;

pub struct DroplinkApi<B: BlobStore> {
    links: LinkStore<Rc<B>>,
    settings: SettingsStore<Rc<B>>,
}

impl<B: BlobStore> DroplinkApi<B> {
    pub fn new(backend: B) -> Self {
        let backend = Rc::new(backend);
        Self {
            links: LinkStore::new(Rc::clone(&backend)),
            settings: SettingsStore::new(backend),
        }
    }

    pub fn backend(&self) -> &B {
        self.links.backend()
    }

    pub fn settings(&self) -> Result<Settings> {
        self.settings.load()
    }

    /// First-run hook: writes default settings when none exist.
    pub fn init(&self) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        if self.settings.ensure_initialized()? {
            result.add_message(CmdMessage::success("Default settings written"));
        } else {
            result.add_message(CmdMessage::info("Settings already initialized"));
        }
        Ok(result.with_settings(self.settings.load()?))
    }

    pub fn add_link(&mut self, draft: LinkDraft) -> Result<CmdResult> {
        let settings = self.settings.load()?;
        commands::create::run(&mut self.links, &settings, draft)
    }

    pub fn capture(&mut self, request: &CaptureRequest) -> Result<CmdResult> {
        let settings = self.settings.load()?;
        let outcome: CaptureOutcome = commands::capture::run(&mut self.links, &settings, request)?;
        Ok(outcome.into_result(&settings))
    }

    pub fn get_links(&self, filter: &LinkFilter) -> Result<CmdResult> {
        commands::get::run(&self.links, filter)
    }

    pub fn update_link(&mut self, selector: &str, changes: LinkUpdate) -> Result<CmdResult> {
        let selector = parse_selector(selector).map_err(DroplinkError::Api)?;
        commands::update::run(&mut self.links, &selector, changes)
    }

    pub fn delete_links<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = selectors_from(selectors)?;
        commands::delete::run(&mut self.links, &selectors)
    }

    pub fn add_tag<I: AsRef<str>>(&mut self, selectors: &[I], tag: &str) -> Result<CmdResult> {
        let selectors = selectors_from(selectors)?;
        commands::tagging::add_tag(&mut self.links, &selectors, tag)
    }

    pub fn remove_tag<I: AsRef<str>>(&mut self, selectors: &[I], tag: &str) -> Result<CmdResult> {
        let selectors = selectors_from(selectors)?;
        commands::tagging::remove_tag(&mut self.links, &selectors, tag)
    }

    pub fn tags(&self) -> Result<CmdResult> {
        commands::tags::run(&self.links)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.links)
    }

    /// Plans a batch-open. An empty selector list means every link matching `filter`.
    pub fn plan_open<I: AsRef<str>>(
        &self,
        selectors: &[I],
        filter: &LinkFilter,
        source: OpenSource,
    ) -> Result<OpenPlan> {
        let selectors = selectors_from(selectors)?;
        let settings = self.settings.load()?;
        commands::open::prepare(&self.links, &settings, &selectors, filter, source)
    }

    pub fn open<O: TabOpener>(&self, plan: OpenPlan, confirmed: bool, opener: O) -> CmdResult {
        commands::open::execute(plan, confirmed, opener)
    }

    pub fn export(&self, today: NaiveDate) -> Result<CmdResult> {
        commands::export::run(&self.links, today)
    }

    pub fn import(&mut self, text: &str) -> Result<CmdResult> {
        let settings = self.settings.load()?;
        commands::import::run(&mut self.links, &settings, text)
    }

    pub fn backup(&self, now_ms: i64, force: bool) -> Result<BackupOutcome> {
        let settings = self.settings.load()?;
        commands::backup::run_if_due(&self.links, &settings, now_ms, force)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.settings, action)
    }
}

fn selectors_from<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<LinkSelector>> {
    parse_selectors(inputs.iter().map(|i| i.as_ref())).map_err(DroplinkError::Api)
}
