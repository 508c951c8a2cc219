//! Configuration to acknowledge site preferences as well as set defaults.
//!
//! Specifically, we try to find a sidefold.toml, and if present we load settings from there.
//! This provides the sidebar selectors of the site generator, the index document name, the
//! timings used to wait for late rendering, and the source extensions for the preview tool.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;

/// File looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE: &str = "sidefold.toml";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Facet, Clone, Debug)]
/// Site preferences loaded from sidefold.toml or falling back to defaults.
pub struct Config {
    #[facet(default = strings(&[".sidebar-navigation", ".quarto-sidebar", ".sidebar"]))]
    /// Selectors tried in order to find the navigation container.
    pub sidebar_selectors: Vec<String>,
    #[facet(default = ".sidebar-item".to_string())]
    /// Selector matching one navigation entry.
    pub item_selector: String,
    #[facet(default = strings(&[".sidebar-item.active", ".sidebar-item-text.active", "[aria-current=\"page\"]"]))]
    /// Selectors the host uses to mark the current page.
    pub active_selectors: Vec<String>,
    #[facet(default = "index.html".to_string())]
    /// Document name that makes a link a section header.
    pub index_document: String,
    #[facet(default = 500)]
    /// Delay before looking for the sidebar again.
    pub retry_delay_ms: u32,
    #[facet(default = 0)]
    /// Attempts to find the sidebar before giving up; 0 keeps trying.
    pub max_attempts: u32,
    #[facet(default = 200)]
    /// Interval between location checks.
    pub poll_interval_ms: u32,
    #[facet(default = 100)]
    /// Wait after a location change before resolving the active section.
    pub settle_delay_ms: u32,
    #[facet(default = strings(&["md", "qmd"]))]
    /// Book source suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sidebar_selectors: strings(&[".sidebar-navigation", ".quarto-sidebar", ".sidebar"]),
            item_selector: ".sidebar-item".to_string(),
            active_selectors: strings(&[
                ".sidebar-item.active",
                ".sidebar-item-text.active",
                "[aria-current=\"page\"]",
            ]),
            index_document: "index.html".to_string(),
            retry_delay_ms: 500,
            max_attempts: 0,
            poll_interval_ms: 200,
            settle_delay_ms: 100,
            file_extensions: strings(&["md", "qmd"]),
        }
    }
}

impl Config {
    /// Parse configuration from TOML, with absent keys taking their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this configuration.
    pub fn parse(text: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(text).map_err(|e| Error::Config(e.to_string()))
    }

    #[must_use]
    /// Load configuration from sidefold.toml if present.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("ignoring {CONFIG_FILE}: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    /// All active-page selectors as one selector list.
    pub fn active_selector(&self) -> String {
        self.active_selectors.join(", ")
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
