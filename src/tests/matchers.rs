use super::{HeaderMatcher, HeaderRules};
use crate::entry::Link;

fn link(text: &str, href: &str) -> Link {
    Link {
        text: text.to_string(),
        href: Some(href.to_string()),
    }
}

#[test]
fn test_chapter_phrase() {
    let m = HeaderMatcher::ChapterPhrase;
    assert!(m.matches("第3章"));
    assert!(m.matches("第 12 章 神经网络"));
    assert!(m.matches("附录 第2章"));
    assert!(!m.matches("第章"));
    assert!(!m.matches("第三章"));
    assert!(!m.matches("Introduction"));
}

#[test]
fn test_leading_chapter() {
    let m = HeaderMatcher::LeadingChapter;
    assert!(m.matches("Chapter 1"));
    assert!(m.matches("chapter2: Optimisation"));
    assert!(m.matches("CHAPTER 10 Kernels"));
    assert!(!m.matches("Chapters 3"));
    assert!(!m.matches("Notes on Chapter 3"));
    assert!(!m.matches("Chapter"));
}

#[test]
fn test_enumerated_prefix() {
    let m = HeaderMatcher::EnumeratedPrefix;
    assert!(m.matches("1. Linear models"));
    assert!(m.matches("1、引言"));
    assert!(m.matches("12 . Trees"));
    assert!(m.matches("7."));
    assert!(!m.matches("3.1 overview"));
    assert!(!m.matches("2024年"));
    assert!(!m.matches("Intro 1."));
}

#[test]
fn test_pure_digits() {
    let m = HeaderMatcher::PureDigits;
    assert!(m.matches("3"));
    assert!(m.matches("042"));
    assert!(!m.matches(""));
    assert!(!m.matches("3a"));
    assert!(!m.matches("3.1"));
}

#[test]
fn test_find_trims_and_reports_first_matcher() {
    assert_eq!(
        HeaderMatcher::find("  第3章 "),
        Some(HeaderMatcher::ChapterPhrase)
    );
    assert_eq!(HeaderMatcher::find("3"), Some(HeaderMatcher::PureDigits));
    assert_eq!(
        HeaderMatcher::find("1. Chapter 1"),
        Some(HeaderMatcher::EnumeratedPrefix)
    );
    assert_eq!(HeaderMatcher::find("Introduction"), None);
}

#[test]
fn test_dotted_subsection_is_not_a_header() {
    // Both digit-based matchers reject sub-numbered entries, so they group under chapter 3.
    assert_eq!(HeaderMatcher::find("3.1 overview"), None);
    assert!(!HeaderRules::default().is_header(&link("3.1 overview", "ch03/overview.html")));
}

#[test]
fn test_index_detection() {
    let rules = HeaderRules::default();
    assert!(rules.is_index("index.html"));
    assert!(rules.is_index("./ch01/index.html"));
    assert!(rules.is_index("/book/ch01/index.html#top"));
    assert!(rules.is_index("ch01/index.html?v=2"));
    assert!(!rules.is_index("ch01/reindex.html"));
    assert!(!rules.is_index("ch01/intro.html"));
}

#[test]
fn test_index_or_text_semantics() {
    let rules = HeaderRules::default();
    // An index page with plain text is still a header.
    assert!(rules.is_header(&link("Introduction", "intro/index.html")));
    // Chapter text without an index link is a header.
    assert!(rules.is_header(&link("Chapter 4", "ch04/svm.html")));
    assert!(!rules.is_header(&link("Introduction", "intro/welcome.html")));
    assert!(!rules.is_header(&Link {
        text: "Introduction".to_string(),
        href: None,
    }));
}

#[test]
fn test_chapter_text_without_target_is_not_a_header() {
    let rules = HeaderRules::default();
    assert!(!rules.is_header(&Link {
        text: "Chapter 2".to_string(),
        href: None,
    }));
    assert!(!rules.is_header(&Link {
        text: "3".to_string(),
        href: None,
    }));
    assert!(rules.is_header(&link("Chapter 2", "ch02/intro.html")));
}

#[test]
fn test_custom_index_document_and_matchers() {
    let rules = HeaderRules::new("README.html").with_matchers(&[HeaderMatcher::PureDigits]);
    assert!(rules.is_header(&link("Overview", "guide/README.html")));
    assert!(!rules.is_header(&link("Overview", "guide/index.html")));
    assert!(!rules.is_header(&link("Chapter 1", "ch01.html")));
    assert!(rules.is_header(&link("1", "ch01.html")));
    assert_eq!(rules.index_document(), "README.html");
}
