//! Navigation entry representation for rendered sidebars.
//!
//! An entry is one row of the navigation list that the site generator renders: the text shown
//! to the reader and the page it links to. Entries are owned by the host document; grouping
//! only reclassifies and re-parents them, it never creates or destroys one.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One row of the navigation list, in document order.
pub struct NavEntry {
    /// Display text of the entry's link.
    pub text: String,
    /// Link target, as written in the `href` attribute.
    #[serde(default)]
    pub href: Option<String>,
    /// Whether the host already marked this entry as the current page.
    #[serde(default)]
    pub active: bool,
}

impl NavEntry {
    #[must_use]
    /// Entry linking `text` to `href`.
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
            active: false,
        }
    }

    #[must_use]
    /// Marks the entry as the page the host is currently showing.
    pub fn marked_active(mut self) -> Self {
        self.active = true;
        self
    }

    #[must_use]
    /// View of the entry as the link the host would render.
    pub fn link(&self) -> Link {
        Link {
            text: self.text.clone(),
            href: self.href.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// First anchor found inside a rendered entry.
pub struct Link {
    /// Text content of the anchor.
    pub text: String,
    /// Value of the anchor's `href` attribute, if any.
    pub href: Option<String>,
}
