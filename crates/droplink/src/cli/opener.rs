use droplinkapp::commands::open::TabOpener;
use droplinkapp::error::{DroplinkError, Result};
use tracing::debug;

/// Hands each url to the system's default browser.
///
/// The desktop opener has no notion of background tabs, so `active` is only
/// logged; most browsers open the new tab behind the focused one anyway.
pub(super) struct BrowserOpener;

impl TabOpener for BrowserOpener {
    fn open_url(&mut self, url: &str, active: bool) -> Result<()> {
        debug!(url, active, "opening tab");
        open::that(url).map_err(|e| DroplinkError::Api(format!("Failed to open {}: {}", url, e)))
    }
}

/// Prints the urls that would open, one per line.
pub(super) struct DryRunOpener;

impl TabOpener for DryRunOpener {
    fn open_url(&mut self, url: &str, _active: bool) -> Result<()> {
        println!("{}", url);
        Ok(())
    }
}
