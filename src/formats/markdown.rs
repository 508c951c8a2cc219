//! Markdown and Quarto sources.
//!
//! A page may declare `title:` in YAML front matter; the site generator shows that in the
//! sidebar. Without one, the first ATX heading (`#` syntax) is used.

use crate::formats::Format;

/// Front matter delimiter line.
const FENCE: &str = "---";

/// Markdown sources, parsed with tree-sitter-md.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn title_query(&self) -> &'static str {
        "(atx_heading (atx_h1_marker)? (atx_h2_marker)? (atx_h3_marker)? (atx_h4_marker)? (atx_h5_marker)? (atx_h6_marker)? (inline) @title)"
    }

    fn declared_title(&self, source: &str) -> Option<String> {
        let mut lines = source.lines();
        if lines.next()?.trim_end() != FENCE {
            return None;
        }
        lines
            .take_while(|line| line.trim_end() != FENCE)
            .find_map(|line| line.strip_prefix("title:"))
            .map(|value| value.trim().trim_matches(['"', '\'']).to_string())
            .filter(|title| !title.is_empty())
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
