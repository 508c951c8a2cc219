//! The accordion state machine over a live navigation tree.
//!
//! One [`Accordion`] is created per page load and owns the host tree handle. It turns header
//! entries into collapsible sections, keeps at most one of them expanded and follows the page
//! the reader is on. Every pass is safe to repeat: entries carry markers once grouped, so a
//! burst of change notifications never wraps anything twice.

use crate::active;
use crate::dom::{class, NavDom};
use crate::entry::Link;
use crate::matchers::HeaderRules;
use crate::section::{Section, SectionState};
use std::mem;

enum Slot<N> {
    Existing(usize),
    New(N, Link),
}

/// A header met during a pass with the ungrouped siblings that follow it.
struct Pending<N> {
    slot: Slot<N>,
    parent: Option<N>,
    members: Vec<N>,
}

/// Sidebar section grouper with accordion discipline.
///
/// Sections move between two states:
///
/// ```text
/// Collapsed --toggle / resolve_active--> Expanded
/// Expanded  --toggle / collapse_all / another section expanding--> Collapsed
/// ```
pub struct Accordion<D: NavDom> {
    dom: D,
    rules: HeaderRules,
    sections: Vec<Section<D::Node>>,
    /// Entry given the active class by path matching, cleared on the next resolution.
    marked: Option<D::Node>,
    next_content_id: usize,
}

impl<D: NavDom> Accordion<D> {
    #[must_use]
    /// Accordion over `dom`; nothing is grouped until [`Accordion::rescan`].
    pub fn new(dom: D, rules: HeaderRules) -> Self {
        Self {
            dom,
            rules,
            sections: Vec::new(),
            marked: None,
            next_content_id: 0,
        }
    }

    #[must_use]
    /// The host tree.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The host tree, for renderers that keep adding entries while the accordion is live.
    ///
    /// Changes made here are picked up by the next [`Accordion::rescan`].
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    #[must_use]
    /// Releases the host tree, keeping every change made to it.
    pub fn into_dom(self) -> D {
        self.dom
    }

    #[must_use]
    /// Rules deciding which entries are headers.
    pub fn rules(&self) -> &HeaderRules {
        &self.rules
    }

    #[must_use]
    /// Sections in document order.
    pub fn sections(&self) -> &[Section<D::Node>] {
        &self.sections
    }

    #[must_use]
    /// Index of the expanded section, if one is.
    pub fn expanded(&self) -> Option<usize> {
        self.sections.iter().position(Section::is_expanded)
    }

    #[must_use]
    /// Index of the section holding `entry` as its header, a member, or a descendant of a
    /// member.
    pub fn section_of(&self, entry: &D::Node) -> Option<usize> {
        let mut node = Some(entry.clone());
        while let Some(current) = node {
            if let Some(index) = self.sections.iter().position(|s| s.contains(&current)) {
                return Some(index);
            }
            node = self.dom.parent(&current);
        }
        None
    }

    fn header_index(&self, header: &D::Node) -> Option<usize> {
        self.sections.iter().position(|s| s.header == *header)
    }

    /// Groups the tree and expands the section of the current page.
    pub fn initialize(&mut self, current_path: &str) -> Option<usize> {
        self.rescan();
        self.resolve_active(current_path)
    }

    /// Runs the classification and grouping pass over entries not grouped yet.
    ///
    /// New headers become sections whose following siblings move into a content container
    /// inserted right after the header. Late siblings of an existing section join it in
    /// document order. Returns the headers that gained a content container during this pass,
    /// which are the ones that became clickable.
    pub fn rescan(&mut self) -> Vec<D::Node> {
        let mut pending: Vec<Pending<D::Node>> = Vec::new();

        for entry in self.dom.entries() {
            if self.dom.has_class(&entry, class::MEMBER) {
                continue;
            }
            let parent = self.dom.parent(&entry);

            if self.dom.has_class(&entry, class::PROCESSED) {
                let index = match self.header_index(&entry) {
                    Some(index) => index,
                    None => {
                        let section = self.recover(&entry);
                        self.sections.push(section);
                        self.sections.len() - 1
                    }
                };
                pending.push(Pending {
                    slot: Slot::Existing(index),
                    parent,
                    members: Vec::new(),
                });
                continue;
            }

            let Some(link) = self.dom.link(&entry) else {
                continue;
            };
            if self.rules.is_header(&link) {
                pending.push(Pending {
                    slot: Slot::New(entry, link),
                    parent,
                    members: Vec::new(),
                });
            } else if let Some(owner) = pending.iter_mut().rev().find(|p| p.parent == parent) {
                owner.members.push(entry);
            }
        }

        let mut created = Vec::new();
        let mut order = Vec::with_capacity(pending.len());
        let mut opened = 0;
        for Pending { slot, members, .. } in pending {
            let index = match slot {
                Slot::Existing(index) => index,
                Slot::New(header, link) => {
                    let section = self.open_section(header, link);
                    self.sections.push(section);
                    opened += 1;
                    self.sections.len() - 1
                }
            };
            if !members.is_empty() {
                let had_content = self.sections[index].content.is_some();
                self.adopt(index, members);
                if !had_content && self.sections[index].content.is_some() {
                    created.push(self.sections[index].header.clone());
                }
            }
            order.push(index);
        }

        // Document order; sections whose header left the tree are dropped.
        let mut previous: Vec<Option<Section<D::Node>>> = mem::take(&mut self.sections)
            .into_iter()
            .map(Some)
            .collect();
        self.sections = order
            .into_iter()
            .filter_map(|index| previous[index].take())
            .collect();

        if opened > 0 || !created.is_empty() {
            log::debug!(
                "grouped sidebar: {opened} new sections, {} clickable, {} total",
                created.len(),
                self.sections.len()
            );
        }
        created
    }

    fn open_section(&mut self, header: D::Node, link: Link) -> Section<D::Node> {
        self.dom.add_class(&header, class::PROCESSED);
        self.dom.add_class(&header, class::HEADER);
        self.dom.add_class(&header, class::COLLAPSED);
        self.dom.add_indicator(&header);
        Section {
            title: link.text.trim().to_string(),
            href: link.href,
            header,
            content: None,
            members: Vec::new(),
            state: SectionState::Collapsed,
        }
    }

    /// Rebuilds a section from a header another pass already processed.
    fn recover(&mut self, header: &D::Node) -> Section<D::Node> {
        let content = self.find_content(header);
        let mut members = Vec::new();
        let mut child = content.as_ref().and_then(|c| self.dom.first_child(c));
        while let Some(node) = child {
            child = self.dom.next_sibling(&node);
            members.push(node);
        }
        let link = self.dom.link(header);
        let state = if self.dom.has_class(header, class::COLLAPSED) {
            SectionState::Collapsed
        } else {
            SectionState::Expanded
        };
        self.next_content_id += 1;
        Section {
            title: link
                .as_ref()
                .map(|l| l.text.trim().to_string())
                .unwrap_or_default(),
            href: link.and_then(|l| l.href),
            header: header.clone(),
            content,
            members,
            state,
        }
    }

    /// First container among the siblings after `header`, stopping at the next header.
    ///
    /// The host may have rendered new entries between a header and its container.
    fn find_content(&self, header: &D::Node) -> Option<D::Node> {
        let mut next = self.dom.next_sibling(header);
        while let Some(node) = next {
            if self.dom.has_class(&node, class::CONTENT) {
                return Some(node);
            }
            if self.dom.has_class(&node, class::HEADER) {
                return None;
            }
            next = self.dom.next_sibling(&node);
        }
        None
    }

    /// Moves `members` into the section's container, creating it if needed.
    fn adopt(&mut self, index: usize, members: Vec<D::Node>) {
        let content = match self.sections[index].content.clone() {
            Some(content) => content,
            None => {
                let id = format!("section-content-{}", self.next_content_id);
                let header = self.sections[index].header.clone();
                let Some(content) = self.dom.create_content(&header, &id) else {
                    log::warn!("could not create a container for {:?}", self.sections[index].title);
                    return;
                };
                self.next_content_id += 1;
                self.dom.add_class(&content, class::CONTENT);
                self.sections[index].content = Some(content.clone());
                content
            }
        };

        // Entries rendered between the header and its container go before the old members.
        let anchor = self.sections[index].members.first().cloned();
        let mut front = 0;
        for member in members {
            self.dom.add_class(&member, class::MEMBER);
            if anchor.is_some() && self.precedes(&member, &content) {
                self.dom.insert_before(&content, &member, anchor.as_ref());
                self.sections[index].members.insert(front, member);
                front += 1;
            } else {
                self.dom.insert_before(&content, &member, None);
                self.sections[index].members.push(member);
            }
        }
        self.apply_state(index);
    }

    fn precedes(&self, node: &D::Node, target: &D::Node) -> bool {
        let mut next = self.dom.next_sibling(node);
        while let Some(sibling) = next {
            if sibling == *target {
                return true;
            }
            next = self.dom.next_sibling(&sibling);
        }
        false
    }

    /// Writes a section's state onto its header and container.
    fn apply_state(&mut self, index: usize) {
        let section = &self.sections[index];
        let header = section.header.clone();
        let content = section.content.clone();
        let expanded = section.is_expanded();

        if expanded {
            self.dom.remove_class(&header, class::COLLAPSED);
        } else {
            self.dom.add_class(&header, class::COLLAPSED);
        }
        let Some(content) = content else {
            return;
        };
        if expanded {
            self.dom.remove_class(&content, class::COLLAPSED);
            self.dom.add_class(&content, class::EXPANDED);
            let height = self.dom.content_height(&content);
            self.dom.set_max_height(&content, height);
        } else {
            self.dom.remove_class(&content, class::EXPANDED);
            self.dom.add_class(&content, class::COLLAPSED);
            self.dom.set_max_height(&content, 0);
        }
    }

    fn set_state(&mut self, index: usize, state: SectionState) {
        self.sections[index].state = state;
        self.apply_state(index);
    }

    /// Expands a collapsed section and collapses the others; collapses an expanded one.
    ///
    /// Indices past the last section are ignored.
    pub fn toggle(&mut self, index: usize) {
        let Some(section) = self.sections.get(index) else {
            return;
        };
        if section.is_expanded() {
            self.set_state(index, SectionState::Collapsed);
            return;
        }
        self.set_state(index, SectionState::Expanded);
        for other in 0..self.sections.len() {
            if other != index && self.sections[other].is_expanded() {
                self.set_state(other, SectionState::Collapsed);
            }
        }
    }

    /// Toggles the section headed by `header`, returning whether there is one.
    pub fn toggle_header(&mut self, header: &D::Node) -> bool {
        match self.header_index(header) {
            Some(index) => {
                self.toggle(index);
                true
            }
            None => false,
        }
    }

    /// Collapses every section.
    pub fn collapse_all(&mut self) {
        for index in 0..self.sections.len() {
            self.set_state(index, SectionState::Collapsed);
        }
    }

    /// Expands only the section holding the entry for the current page.
    ///
    /// An entry the host marked as current wins; otherwise the best link match for
    /// `current_path` is used and given the active class. Returns the expanded section.
    pub fn resolve_active(&mut self, current_path: &str) -> Option<usize> {
        if let Some(previous) = self.marked.take() {
            self.dom.remove_class(&previous, class::ACTIVE);
        }

        let entries = self.dom.entries();
        let mut active = entries
            .iter()
            .find(|e| self.dom.is_marked_active(e))
            .cloned();
        if active.is_none() {
            let hrefs: Vec<Option<String>> = entries
                .iter()
                .map(|e| self.dom.link(e).and_then(|l| l.href))
                .collect();
            let found = active::best_match(
                hrefs.iter().map(Option::as_deref),
                current_path,
                self.rules.index_document(),
            );
            if let Some(entry) = found.map(|i| entries[i].clone()) {
                self.dom.add_class(&entry, class::ACTIVE);
                self.marked = Some(entry.clone());
                active = Some(entry);
            }
        }

        self.collapse_all();
        let index = active.and_then(|entry| self.section_of(&entry));
        if let Some(index) = index {
            self.set_state(index, SectionState::Expanded);
        }
        log::debug!("resolved {current_path:?} to section {index:?}");
        index
    }
}

#[cfg(test)]
#[path = "tests/accordion.rs"]
mod tests;
