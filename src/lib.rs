//! Sidefold folds a flat documentation sidebar into collapsible sections.
//!
//! Chapter entries become section headers and the entries after them their members. Only the
//! section holding the current page starts expanded. The grouping core is written against
//! [`dom::NavDom`], so the same code runs in the browser (the `web` feature) and in the
//! terminal preview (the `cli` feature).
#![allow(clippy::multiple_crate_versions)]

pub mod accordion;
pub mod active;
pub mod config;
pub mod dom;
pub mod entry;
pub mod error;
pub mod grouping;
pub mod matchers;
pub mod outline;
pub mod section;
pub mod watch;

#[cfg(feature = "cli")]
pub mod formats;
#[cfg(feature = "cli")]
pub mod input;
#[cfg(feature = "cli")]
pub mod preview;
#[cfg(feature = "cli")]
pub mod ui;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[allow(unsafe_code)]
pub mod web;

pub use error::{Error, Result};
