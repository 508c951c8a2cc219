//! Reading the navigation list a preview is built from.
//!
//! A list comes either from a JSON outline (an array of entries, as a site generator would
//! render them) or from the book sources themselves: one entry per page, titled the way the
//! generator titles it and linked to the page it renders to.

use crate::entry::NavEntry;
use crate::error::{Error, Result};
use crate::formats::Format;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Collects source files from the given paths, recursing into directories.
///
/// Files named explicitly are kept whatever their extension. Hidden directories and
/// generator directories (leading `_`, such as `_site` or `_freeze`) are skipped.
///
/// # Errors
///
/// Returns an error if a path or directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect(&path, extensions, &mut documents)?;
        } else if path.is_file() {
            documents.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
    }
    Ok(documents)
}

fn collect(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if path.is_dir() {
            if !name.starts_with(['.', '_']) {
                collect(&path, extensions, out)?;
            }
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| x == e))
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Sorts sources the way a book sidebar lists them: directory by directory, each
/// directory's index page first, then the other pages by name.
pub fn book_order(documents: &mut [PathBuf], index_stem: &str) {
    let is_index = |p: &Path| p.file_stem().is_some_and(|s| s == index_stem);
    documents.sort_by(|a, b| {
        a.parent()
            .cmp(&b.parent())
            .then_with(|| match (is_index(a), is_index(b)) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.file_name().cmp(&b.file_name()),
            })
    });
}

#[must_use]
/// Directory the sidebar links are relative to.
pub fn book_root(paths: &[PathBuf]) -> PathBuf {
    match paths.first() {
        Some(path) if path.is_dir() => path.clone(),
        Some(path) => path.parent().map(Path::to_path_buf).unwrap_or_default(),
        None => PathBuf::from("."),
    }
}

/// Title of a page: the title its metadata declares, else its first heading.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the format's grammar or query is invalid.
pub fn document_title<F: Format>(path: &Path, format: &F) -> Result<Option<String>> {
    let source = fs::read_to_string(path)?;
    if let Some(title) = format.declared_title(&source) {
        return Ok(Some(title));
    }

    let parse_error = |reason: String| Error::Parse {
        path: path.display().to_string(),
        reason,
    };
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| parse_error(e.to_string()))?;
    let Some(tree) = parser.parse(&source, None) else {
        return Ok(None);
    };
    let query =
        Query::new(&language, format.title_query()).map_err(|e| parse_error(e.to_string()))?;

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    while let Some(found) = matches.next() {
        for capture in found.captures {
            let text = capture
                .node
                .utf8_text(source.as_bytes())
                .map_err(|e| parse_error(e.to_string()))?
                .trim();
            if !text.is_empty() {
                return Ok(Some(text.to_string()));
            }
        }
    }
    Ok(None)
}

#[must_use]
/// Link to the rendered page of `document`, relative to `root`.
pub fn page_href(document: &Path, root: &Path) -> String {
    let relative = document
        .strip_prefix(root)
        .ok()
        .map(Path::to_path_buf)
        .or_else(|| document.file_name().map(PathBuf::from))
        .unwrap_or_default()
        .with_extension("html");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// One entry per source document, in the order given.
///
/// # Errors
///
/// Returns an error if a document cannot be read or parsed.
pub fn entries_from_documents<F: Format>(
    documents: &[PathBuf],
    root: &Path,
    format: &F,
) -> Result<Vec<NavEntry>> {
    documents
        .iter()
        .map(|doc| {
            let title = match document_title(doc, format)? {
                Some(title) => title,
                None => doc
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            };
            Ok(NavEntry::new(title, page_href(doc, root)))
        })
        .collect()
}

/// Reads a JSON array of entries.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a list of entries.
pub fn load_outline(path: &Path) -> Result<Vec<NavEntry>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
