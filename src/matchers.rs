//! Header detection for navigation entries.
//!
//! A header starts a new collapsible section. An entry is a header when it links to the
//! index document of a directory, or when its text looks like a chapter title. The text
//! checks are an ordered list of small predicates so each can be exercised on its own.

use crate::config::Config;
use crate::entry::Link;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Text shapes that mark a chapter title.
pub enum HeaderMatcher {
    /// `第 N 章` anywhere in the text.
    ChapterPhrase,
    /// Text starting with `Chapter N`, in any case.
    LeadingChapter,
    /// Text starting with `N.` or `N、`, but not a dotted sub-number like `3.1`.
    EnumeratedPrefix,
    /// Text made of digits only.
    PureDigits,
}

impl HeaderMatcher {
    /// Matchers in the order they are tried.
    pub const ALL: [Self; 4] = [
        Self::ChapterPhrase,
        Self::LeadingChapter,
        Self::EnumeratedPrefix,
        Self::PureDigits,
    ];

    #[must_use]
    /// Tests the matcher against already-trimmed text.
    pub fn matches(self, text: &str) -> bool {
        match self {
            Self::ChapterPhrase => chapter_phrase(text),
            Self::LeadingChapter => leading_chapter(text),
            Self::EnumeratedPrefix => enumerated_prefix(text),
            Self::PureDigits => !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()),
        }
    }

    #[must_use]
    /// First matcher accepting `text`, trimming surrounding whitespace first.
    pub fn find(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|m| m.matches(text))
    }
}

/// Splits leading ASCII digits off `text`, returning `None` when there are none.
fn split_digits(text: &str) -> Option<(&str, &str)> {
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(i, _)| i);
    (end > 0).then(|| text.split_at(end))
}

fn chapter_phrase(text: &str) -> bool {
    text.match_indices('第').any(|(i, marker)| {
        let rest = text[i + marker.len()..].trim_start();
        split_digits(rest).is_some_and(|(_, tail)| tail.trim_start().starts_with('章'))
    })
}

fn leading_chapter(text: &str) -> bool {
    const WORD: &str = "chapter";
    text.get(..WORD.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(WORD))
        && split_digits(text[WORD.len()..].trim_start()).is_some()
}

fn enumerated_prefix(text: &str) -> bool {
    let Some((_, rest)) = split_digits(text) else {
        return false;
    };
    let mut rest = rest.trim_start().chars();
    matches!(rest.next(), Some('.' | '、')) && !rest.next().is_some_and(|c| c.is_ascii_digit())
}

#[derive(Clone, Debug)]
/// Decides which navigation links start a section.
///
/// Index-page detection and the text matchers are combined with a plain OR: an index page
/// titled "Introduction" is still a header.
pub struct HeaderRules {
    index_document: String,
    matchers: Vec<HeaderMatcher>,
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self::new("index.html")
    }
}

impl HeaderRules {
    #[must_use]
    /// Rules using every matcher and the given index document name.
    pub fn new(index_document: impl Into<String>) -> Self {
        Self {
            index_document: index_document.into(),
            matchers: HeaderMatcher::ALL.to_vec(),
        }
    }

    #[must_use]
    /// Rules for the index document named in the configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.index_document.clone())
    }

    #[must_use]
    /// Restricts text detection to the given matchers, tried in order.
    pub fn with_matchers(mut self, matchers: &[HeaderMatcher]) -> Self {
        self.matchers = matchers.to_vec();
        self
    }

    #[must_use]
    /// Document name that marks a directory's landing page.
    pub fn index_document(&self) -> &str {
        &self.index_document
    }

    #[must_use]
    /// Whether `href` points at the index document of its directory.
    pub fn is_index(&self, href: &str) -> bool {
        let path = href.split(['?', '#']).next().unwrap_or_default();
        path == self.index_document
            || path
                .strip_suffix(self.index_document.as_str())
                .is_some_and(|dir| dir.ends_with('/'))
    }

    #[must_use]
    /// First configured matcher accepting the text.
    pub fn matched_by(&self, text: &str) -> Option<HeaderMatcher> {
        let text = text.trim();
        self.matchers.iter().copied().find(|m| m.matches(text))
    }

    #[must_use]
    /// Whether the link starts a section. Anchors without a target never do.
    pub fn is_header(&self, link: &Link) -> bool {
        link.href
            .as_deref()
            .is_some_and(|href| self.is_index(href) || self.matched_by(&link.text).is_some())
    }
}

#[cfg(test)]
#[path = "tests/matchers.rs"]
mod tests;
