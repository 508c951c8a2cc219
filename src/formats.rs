//! Book source formats the preview reads page titles from.
//!
//! The sidebar text of a page is its declared title when the source has one, otherwise its
//! first heading. A format supplies both halves: the metadata lookup and the tree-sitter
//! grammar and query for headings.

pub mod markdown;

/// A source markup language the preview can read titles from.
pub trait Format {
    /// Grammar used to parse the sources.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing heading text; the first capture becomes the page title.
    fn title_query(&self) -> &str;
    /// Title declared in the document's metadata block, if the format has one.
    fn declared_title(&self, _source: &str) -> Option<String> {
        None
    }
}
