//! Session state for the terminal preview.
//!
//! The preview runs the same accordion the browser runs, over an in-memory sidebar, and lets
//! the user click through sections with the keyboard.

use crate::accordion::Accordion;
use crate::dom::{class, MemoryDom, NavDom, NodeId};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One visible line of the sidebar.
pub enum Row {
    /// A section header.
    Header {
        /// Index of the section.
        section: usize,
        /// Header text.
        title: String,
        /// Whether the section is open.
        expanded: bool,
        /// Whether the header is the current page.
        active: bool,
    },
    /// An entry outside every section.
    Entry {
        /// Entry text.
        text: String,
        /// Whether the entry is the current page.
        active: bool,
    },
    /// An entry of the expanded section.
    Member {
        /// Entry text.
        text: String,
        /// Whether the entry is the current page.
        active: bool,
    },
}

/// Sidebar preview with a cursor over section headers.
pub struct Preview {
    /// Accordion over the in-memory sidebar.
    pub accordion: Accordion<MemoryDom>,
    /// Path the active section is resolved against.
    pub current_path: String,
    /// Selected section.
    pub cursor: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl Preview {
    #[must_use]
    /// Groups the sidebar and opens on the section of `current_path`.
    pub fn new(mut accordion: Accordion<MemoryDom>, current_path: String) -> Self {
        let cursor = accordion.initialize(&current_path).unwrap_or(0);
        Self {
            accordion,
            current_path,
            cursor,
            message: None,
        }
    }

    #[must_use]
    /// Lines the sidebar shows, members only for expanded sections.
    pub fn rows(&self) -> Vec<Row> {
        let dom = self.accordion.dom();
        let text = |node: &NodeId| dom.text(*node).trim().to_string();
        let mut rows = Vec::new();
        for entry in dom.entries() {
            let active = dom.is_marked_active(&entry);
            match self.accordion.section_of(&entry) {
                Some(index) => {
                    let section = &self.accordion.sections()[index];
                    if section.header == entry {
                        rows.push(Row::Header {
                            section: index,
                            title: section.title.clone(),
                            expanded: section.is_expanded(),
                            active,
                        });
                    } else if section.is_expanded() {
                        rows.push(Row::Member {
                            text: text(&entry),
                            active,
                        });
                    }
                }
                None if !dom.has_class(&entry, class::MEMBER) => rows.push(Row::Entry {
                    text: text(&entry),
                    active,
                }),
                None => {}
            }
        }
        rows
    }

    /// Selects the previous section.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Selects the next section.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.accordion.sections().len() {
            self.cursor += 1;
        }
    }

    /// Toggles the selected section.
    pub fn toggle(&mut self) {
        self.accordion.toggle(self.cursor);
        self.message = None;
    }

    /// Expands the section of the current page and selects it.
    pub fn expand_active(&mut self) {
        match self.accordion.resolve_active(&self.current_path) {
            Some(index) => {
                self.cursor = index;
                self.message = None;
            }
            None => {
                self.message = Some(format!("No section holds {}", self.current_path));
            }
        }
    }

    /// Closes every section.
    pub fn collapse_all(&mut self) {
        self.accordion.collapse_all();
        self.message = None;
    }

    /// Runs the grouping pass again.
    pub fn rescan(&mut self) {
        self.accordion.rescan();
        self.message = Some(format!("{} sections", self.accordion.sections().len()));
    }
}

#[cfg(test)]
#[path = "tests/preview.rs"]
mod tests;
