//! Classification and grouping over plain entry lists.
//!
//! These are the pure forms of the sidebar pass: they take entries in document order and say
//! which are headers and which entries each header owns. [`crate::accordion::Accordion`]
//! applies the same grouping to a live navigation tree.

use crate::entry::NavEntry;
use crate::matchers::HeaderRules;
use serde::Serialize;

#[derive(Debug, Default, PartialEq, Eq)]
/// Positions of entries by role.
pub struct Classification {
    /// Entries that start a section.
    pub headers: Vec<usize>,
    /// Entries following some header.
    pub members: Vec<usize>,
    /// Entries before the first header.
    pub ungrouped: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A header position and the positions of the entries it owns.
pub struct SectionPlan {
    /// Position of the header entry.
    pub header: usize,
    /// Positions of the entries up to the next header.
    pub members: Vec<usize>,
}

#[must_use]
/// Splits entries into headers, members and the ungrouped entries before the first header.
pub fn classify_entries(entries: &[NavEntry], rules: &HeaderRules) -> Classification {
    let mut out = Classification::default();
    for (i, entry) in entries.iter().enumerate() {
        if rules.is_header(&entry.link()) {
            out.headers.push(i);
        } else if out.headers.is_empty() {
            out.ungrouped.push(i);
        } else {
            out.members.push(i);
        }
    }
    out
}

#[must_use]
/// Groups each header with the entries up to the next header.
pub fn build_sections(entries: &[NavEntry], rules: &HeaderRules) -> Vec<SectionPlan> {
    let mut sections: Vec<SectionPlan> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if rules.is_header(&entry.link()) {
            sections.push(SectionPlan {
                header: i,
                members: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.members.push(i);
        }
    }
    sections
}

#[cfg(test)]
#[path = "tests/grouping.rs"]
mod tests;
