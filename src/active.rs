//! Matching navigation links against the page the browser is showing.
//!
//! Sidebar links are usually relative (`../ch02/svm.html`) while the browser reports an
//! absolute path (`/book/ch02/svm.html`, sometimes without the extension). Both sides are
//! reduced to their meaningful path segments before comparing.

use crate::entry::NavEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
/// How well a link matched the current path; later variants are stronger.
pub enum PathMatch {
    /// An absolute link to a directory containing the current page.
    Prefix,
    /// The link's segments end the current path.
    Suffix,
    /// Same segments.
    Exact,
}

/// Path segments of `path` with scheme, host, query, fragment, dot segments, the page
/// extension and a trailing index document removed.
#[must_use]
pub fn segments<'a>(path: &'a str, index_document: &str) -> Vec<&'a str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = match path.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |slash| &rest[slash..]),
        None => path,
    };
    let mut parts: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();

    let index_stem = strip_extension(index_document);
    if let Some(last) = parts.last_mut() {
        *last = strip_extension(*last);
    }
    if parts.last().is_some_and(|last| *last == index_stem) {
        parts.pop();
    }
    parts
}

fn strip_extension(segment: &str) -> &str {
    segment
        .strip_suffix(".html")
        .or_else(|| segment.strip_suffix(".htm"))
        .unwrap_or(segment)
}

#[must_use]
/// Compares a link target with the current location.
pub fn match_path(href: &str, current: &str, index_document: &str) -> Option<PathMatch> {
    let link = segments(href, index_document);
    if link.is_empty() {
        return None;
    }
    let here = segments(current, index_document);
    if link == here {
        Some(PathMatch::Exact)
    } else if here.ends_with(&link) {
        Some(PathMatch::Suffix)
    } else if href.starts_with('/') && here.starts_with(&link) {
        Some(PathMatch::Prefix)
    } else {
        None
    }
}

#[must_use]
/// Picks the best match among candidate links, the first in document order on ties.
pub fn best_match<'a, I>(hrefs: I, current: &str, index_document: &str) -> Option<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut best: Option<(PathMatch, usize)> = None;
    for (i, href) in hrefs.into_iter().enumerate() {
        let Some(found) = href.and_then(|h| match_path(h, current, index_document)) else {
            continue;
        };
        if best.is_none_or(|(score, _)| found > score) {
            best = Some((found, i));
        }
    }
    best.map(|(_, i)| i)
}

#[must_use]
/// The entry for the current page: one the host marked, otherwise the best path match.
pub fn find_active(entries: &[NavEntry], current: &str, index_document: &str) -> Option<usize> {
    entries.iter().position(|e| e.active).or_else(|| {
        best_match(
            entries.iter().map(|e| e.href.as_deref()),
            current,
            index_document,
        )
    })
}

#[cfg(test)]
#[path = "tests/active.rs"]
mod tests;
