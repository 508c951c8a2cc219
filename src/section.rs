//! Section representation for grouped sidebars.
//!
//! A section is a header entry plus the entries that follow it up to the next header. It keeps
//! handles into the host tree so the accordion can resize and restyle it without searching.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether a section's members are showing.
pub enum SectionState {
    /// Members hidden, container height zero.
    Collapsed,
    /// Members shown at their natural height.
    Expanded,
}

#[derive(Clone, Debug)]
/// Header entry and the entries grouped under it.
pub struct Section<N> {
    /// Header text as rendered.
    pub title: String,
    /// Header link target.
    pub href: Option<String>,
    /// Header entry.
    pub header: N,
    /// Container holding the members; absent while the section has none.
    pub content: Option<N>,
    /// Member entries in document order.
    pub members: Vec<N>,
    /// Whether the members are showing.
    pub state: SectionState,
}

impl<N: PartialEq> Section<N> {
    #[must_use]
    /// Whether the section is open.
    pub fn is_expanded(&self) -> bool {
        self.state == SectionState::Expanded
    }

    #[must_use]
    /// Whether `entry` is this section's header or one of its members.
    pub fn contains(&self, entry: &N) -> bool {
        self.header == *entry || self.members.contains(entry)
    }
}
