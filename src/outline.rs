//! Serialisable snapshot of a grouped sidebar.
//!
//! The preview tool prints this as JSON so the grouping a book would get can be checked or
//! diffed without a browser.

use crate::accordion::Accordion;
use crate::dom::{class, NavDom};
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
/// A rendered entry as the reader sees it.
pub struct OutlineEntry {
    /// Link text, trimmed.
    pub text: String,
    /// Link target.
    pub href: Option<String>,
    /// Whether this is the current page.
    pub active: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
/// A section with its header, state and members.
pub struct OutlineSection {
    /// Header text.
    pub title: String,
    /// Header link target.
    pub href: Option<String>,
    /// Whether the section is open.
    pub expanded: bool,
    /// Entries grouped under the header.
    pub members: Vec<OutlineEntry>,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
/// Every entry of the sidebar, by the role grouping gave it.
pub struct Outline {
    /// Entries outside any section.
    pub ungrouped: Vec<OutlineEntry>,
    /// Sections in document order.
    pub sections: Vec<OutlineSection>,
}

fn entry<D: NavDom>(dom: &D, node: &D::Node) -> OutlineEntry {
    let link = dom.link(node);
    OutlineEntry {
        text: link
            .as_ref()
            .map(|l| l.text.trim().to_string())
            .unwrap_or_default(),
        href: link.and_then(|l| l.href),
        active: dom.is_marked_active(node),
    }
}

impl Outline {
    #[must_use]
    /// Snapshot of the accordion's current grouping and state.
    pub fn capture<D: NavDom>(accordion: &Accordion<D>) -> Self {
        let dom = accordion.dom();
        let ungrouped = dom
            .entries()
            .iter()
            .filter(|e| !dom.has_class(e, class::MEMBER) && accordion.section_of(e).is_none())
            .map(|e| entry(dom, e))
            .collect();
        let sections = accordion
            .sections()
            .iter()
            .map(|s| OutlineSection {
                title: s.title.clone(),
                href: s.href.clone(),
                expanded: s.is_expanded(),
                members: s.members.iter().map(|m| entry(dom, m)).collect(),
            })
            .collect();
        Self {
            ungrouped,
            sections,
        }
    }
}
