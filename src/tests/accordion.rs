use super::Accordion;
use crate::dom::{class, MemoryDom, NavDom, NodeKind, ITEM_HEIGHT};
use crate::entry::NavEntry;
use crate::grouping::build_sections;
use crate::matchers::HeaderRules;
use crate::section::SectionState;

fn book() -> Vec<NavEntry> {
    vec![
        NavEntry::new("Chapter 1", "ch01/intro.html"),
        NavEntry::new("A", "ch01/a.html"),
        NavEntry::new("B", "ch01/b.html"),
        NavEntry::new("Chapter 2", "ch02/intro.html"),
        NavEntry::new("C", "ch02/c.html"),
    ]
}

fn grouped(entries: &[NavEntry]) -> Accordion<MemoryDom> {
    let mut accordion = Accordion::new(MemoryDom::from_entries(entries), HeaderRules::default());
    accordion.rescan();
    accordion
}

/// Sections as (header text, member texts).
fn outline(accordion: &Accordion<MemoryDom>) -> Vec<(String, Vec<String>)> {
    let dom = accordion.dom();
    accordion
        .sections()
        .iter()
        .map(|s| {
            (
                dom.text(s.header).to_string(),
                s.members.iter().map(|m| dom.text(*m).to_string()).collect(),
            )
        })
        .collect()
}

fn expanded_count(accordion: &Accordion<MemoryDom>) -> usize {
    accordion
        .sections()
        .iter()
        .filter(|s| s.is_expanded())
        .count()
}

#[test]
fn test_two_chapters_become_two_sections() {
    let accordion = grouped(&book());
    assert_eq!(
        outline(&accordion),
        vec![
            ("Chapter 1".to_string(), vec!["A".to_string(), "B".to_string()]),
            ("Chapter 2".to_string(), vec!["C".to_string()]),
        ]
    );

    let dom = accordion.dom();
    let root_children = dom.children(dom.root());
    assert_eq!(root_children.len(), 4, "header, container, header, container");
    let first = &accordion.sections()[0];
    let content = first.content.unwrap();
    assert_eq!(root_children[1], content);
    assert_eq!(
        dom.kind(content),
        &NodeKind::Wrapper("section-content-0".to_string())
    );
    assert_eq!(dom.children(content), first.members.as_slice());
    assert!(dom.has_class(&first.header, class::PROCESSED));
    assert!(dom.has_class(&first.header, class::HEADER));
    assert!(dom.has_class(&content, class::CONTENT));
    assert!(first.members.iter().all(|m| dom.has_class(m, class::MEMBER)));
}

#[test]
fn test_live_grouping_matches_plain_grouping() {
    let entries = vec![
        NavEntry::new("Preface", "index.html"),
        NavEntry::new("Welcome", "welcome.html"),
        NavEntry::new("第1章", "ch01.html"),
        NavEntry::new("Setup", "ch01/setup.html"),
        NavEntry::new("1.1 Tools", "ch01/tools.html"),
        NavEntry::new("2", "ch02.html"),
        NavEntry::new("Appendix", "appendix/index.html"),
        NavEntry::new("Tables", "appendix/tables.html"),
    ];
    let accordion = grouped(&entries);
    let plans = build_sections(&entries, &HeaderRules::default());
    let expected: Vec<(String, Vec<String>)> = plans
        .iter()
        .map(|p| {
            (
                entries[p.header].text.clone(),
                p.members.iter().map(|&m| entries[m].text.clone()).collect(),
            )
        })
        .collect();
    assert_eq!(outline(&accordion), expected);
}

#[test]
fn test_leading_entries_are_left_alone() {
    let mut entries = vec![NavEntry::new("About", "about.html")];
    entries.extend(book());
    let accordion = grouped(&entries);
    let dom = accordion.dom();
    let about = dom.entries()[0];
    assert!(dom.classes(about).is_empty());
    assert_eq!(dom.parent(&about), Some(dom.root()));
    assert_eq!(accordion.section_of(&about), None);
}

#[test]
fn test_rescan_is_idempotent() {
    let mut accordion = grouped(&book());
    let snapshot = accordion.dom().clone();
    let created = accordion.rescan();
    assert!(created.is_empty());
    assert_eq!(accordion.dom(), &snapshot);
    assert_eq!(accordion.sections().len(), 2);
}

#[test]
fn test_second_instance_recovers_instead_of_rewrapping() {
    let mut first = grouped(&book());
    first.toggle(1);
    let dom = first.into_dom();
    let snapshot = dom.clone();

    let mut second = Accordion::new(dom, HeaderRules::default());
    assert!(second.rescan().is_empty());
    assert_eq!(second.dom(), &snapshot);
    assert_eq!(outline(&second).len(), 2);
    assert_eq!(second.expanded(), Some(1));
    assert_eq!(second.sections()[0].members.len(), 2);
}

#[test]
fn test_toggle_keeps_at_most_one_expanded() {
    let mut entries = book();
    entries.push(NavEntry::new("Chapter 3", "ch03/intro.html"));
    entries.push(NavEntry::new("D", "ch03/d.html"));
    let mut accordion = grouped(&entries);

    for index in [0, 1, 1, 2, 0, 0, 2, 1, 7] {
        accordion.toggle(index);
        assert!(expanded_count(&accordion) <= 1, "after toggling {index}");
    }

    accordion.toggle(0);
    assert_eq!(accordion.expanded(), Some(0));
    accordion.toggle(2);
    assert_eq!(accordion.expanded(), Some(2));
    assert_eq!(accordion.sections()[0].state, SectionState::Collapsed);

    // Collapsing does not open anything else.
    accordion.toggle(2);
    assert_eq!(accordion.expanded(), None);
}

#[test]
fn test_toggle_sizes_container() {
    let mut accordion = grouped(&book());
    let content = accordion.sections()[0].content.unwrap();
    let header = accordion.sections()[0].header;

    accordion.toggle(0);
    let dom = accordion.dom();
    assert_eq!(dom.max_height(content), Some(2 * ITEM_HEIGHT));
    assert!(dom.has_class(&content, class::EXPANDED));
    assert!(!dom.has_class(&content, class::COLLAPSED));
    assert!(!dom.has_class(&header, class::COLLAPSED));

    assert!(accordion.toggle_header(&header));
    let dom = accordion.dom();
    assert_eq!(dom.max_height(content), Some(0));
    assert!(dom.has_class(&content, class::COLLAPSED));
    assert!(dom.has_class(&header, class::COLLAPSED));

    let plain = accordion.sections()[0].members[0];
    assert!(!accordion.toggle_header(&plain));
}

#[test]
fn test_resolve_active_expands_only_the_matching_section() {
    let mut accordion = grouped(&book());
    accordion.toggle(1);

    let index = accordion.resolve_active("/book/ch01/b.html");
    assert_eq!(index, Some(0));
    assert_eq!(accordion.expanded(), Some(0));
    assert_eq!(expanded_count(&accordion), 1);

    let b = accordion.sections()[0].members[1];
    assert!(accordion.dom().has_class(&b, class::ACTIVE));
}

#[test]
fn test_resolve_active_follows_navigation() {
    let mut accordion = grouped(&book());
    accordion.initialize("/book/ch01/a.html");
    let a = accordion.sections()[0].members[0];

    assert_eq!(accordion.resolve_active("/book/ch02/c"), Some(1));
    let dom = accordion.dom();
    assert!(!dom.has_class(&a, class::ACTIVE), "old mark is cleared");
    assert_eq!(accordion.expanded(), Some(1));

    assert_eq!(accordion.resolve_active("/book/ch02/intro.html"), Some(1));
    assert_eq!(accordion.resolve_active("/elsewhere"), None);
    assert_eq!(accordion.expanded(), None);
}

#[test]
fn test_host_mark_beats_path() {
    let mut entries = book();
    entries[4] = entries[4].clone().marked_active();
    let mut accordion = grouped(&entries);
    assert_eq!(accordion.resolve_active("/book/ch01/a.html"), Some(1));
}

#[test]
fn test_initialize_starts_collapsed_except_active() {
    let mut accordion = Accordion::new(MemoryDom::from_entries(&book()), HeaderRules::default());
    assert_eq!(accordion.initialize("/index.html"), None);
    assert!(accordion
        .sections()
        .iter()
        .all(|s| s.state == SectionState::Collapsed));
    let dom = accordion.dom();
    for section in accordion.sections() {
        assert_eq!(dom.max_height(section.content.unwrap()), Some(0));
    }
}

#[test]
fn test_late_entries_join_sections() {
    let mut accordion = grouped(&book()[..2]);
    assert_eq!(accordion.sections()[0].members.len(), 1);

    accordion.dom_mut().push_entry(&NavEntry::new("B", "ch01/b.html"));
    accordion
        .dom_mut()
        .push_entry(&NavEntry::new("Chapter 2", "ch02/intro.html"));
    let created = accordion.rescan();
    assert!(created.is_empty(), "chapter 1 already had a container");
    assert_eq!(
        outline(&accordion),
        vec![
            ("Chapter 1".to_string(), vec!["A".to_string(), "B".to_string()]),
            ("Chapter 2".to_string(), vec![]),
        ]
    );

    accordion.dom_mut().push_entry(&NavEntry::new("C", "ch02/c.html"));
    let created = accordion.rescan();
    assert_eq!(created, vec![accordion.sections()[1].header]);
    let dom = accordion.dom();
    let wrappers = dom
        .children(dom.root())
        .iter()
        .filter(|n| matches!(dom.kind(**n), NodeKind::Wrapper(_)))
        .count();
    assert_eq!(wrappers, 2, "one container per section");
}

#[test]
fn test_empty_header_becomes_clickable_once_filled() {
    let mut accordion = grouped(&[NavEntry::new("Chapter 1", "ch01/intro.html")]);
    assert!(accordion.sections()[0].content.is_none());

    accordion.dom_mut().push_entry(&NavEntry::new("A", "ch01/a.html"));
    let created = accordion.rescan();
    assert_eq!(created, vec![accordion.sections()[0].header]);
    assert_eq!(accordion.sections()[0].members.len(), 1);
    assert!(accordion.rescan().is_empty());
}

#[test]
fn test_live_entries_rendered_before_container_keep_order() {
    let mut accordion = grouped(&book());
    accordion.toggle(0);
    accordion
        .dom_mut()
        .insert_entry(1, &NavEntry::new("A0", "ch01/a0.html"));
    accordion.rescan();

    let content = accordion.sections()[0].content.unwrap();
    assert_eq!(
        outline(&accordion)[0].1,
        vec!["A0".to_string(), "A".to_string(), "B".to_string()]
    );
    assert_eq!(
        accordion.dom().children(content),
        accordion.sections()[0].members.as_slice()
    );
    assert_eq!(accordion.dom().max_height(content), Some(3 * ITEM_HEIGHT));
}

#[test]
fn test_entries_rendered_before_container_keep_order() {
    let mut accordion = grouped(&book());
    accordion.toggle(0);
    let mut dom = accordion.into_dom();
    // Host renders a new entry between the first header and its container.
    dom.insert_entry(1, &NavEntry::new("A0", "ch01/a0.html"));
    dom.push_entry(&NavEntry::new("D", "ch02/d.html"));

    // A second instance finds the container past the newcomer.
    let mut accordion = Accordion::new(dom, HeaderRules::default());
    accordion.rescan();
    assert_eq!(
        outline(&accordion),
        vec![
            (
                "Chapter 1".to_string(),
                vec!["A0".to_string(), "A".to_string(), "B".to_string()]
            ),
            ("Chapter 2".to_string(), vec!["C".to_string(), "D".to_string()]),
        ]
    );
    let dom = accordion.dom();
    let content = accordion.sections()[0].content.unwrap();
    assert_eq!(dom.children(content), accordion.sections()[0].members.as_slice());
    // The expanded section is resized to fit the newcomer.
    assert_eq!(dom.max_height(content), Some(3 * ITEM_HEIGHT));
    let wrappers = dom
        .children(dom.root())
        .iter()
        .filter(|n| matches!(dom.kind(**n), NodeKind::Wrapper(_)))
        .count();
    assert_eq!(wrappers, 2, "no second container for chapter 1");
}

#[test]
fn test_nested_entries_stay_with_their_parent() {
    let mut dom = MemoryDom::default();
    dom.push_entry(&NavEntry::new("Chapter 1", "ch01/intro.html"));
    let a = dom.push_entry(&NavEntry::new("A", "ch01/a.html"));
    let nested = dom.append_entry(a, &NavEntry::new("A.1", "ch01/a1.html"));
    dom.push_entry(&NavEntry::new("B", "ch01/b.html"));

    let mut accordion = Accordion::new(dom, HeaderRules::default());
    accordion.rescan();
    assert_eq!(
        outline(&accordion),
        vec![(
            "Chapter 1".to_string(),
            vec!["A".to_string(), "B".to_string()]
        )]
    );
    assert_eq!(accordion.dom().parent(&nested), Some(a));
    assert_eq!(accordion.section_of(&nested), Some(0));
}

#[test]
fn test_nested_active_entry_expands_enclosing_section() {
    let mut dom = MemoryDom::default();
    dom.push_entry(&NavEntry::new("Chapter 1", "ch01/intro.html"));
    let a = dom.push_entry(&NavEntry::new("A", "ch01/a.html"));
    let nested = dom.append_entry(a, &NavEntry::new("A.1", "ch01/a1.html"));
    dom.push_entry(&NavEntry::new("Chapter 2", "ch02/intro.html"));
    dom.push_entry(&NavEntry::new("C", "ch02/c.html"));

    let mut accordion = Accordion::new(dom, HeaderRules::default());
    assert_eq!(accordion.initialize("/book/ch01/a1.html"), Some(0));
    assert_eq!(accordion.expanded(), Some(0));
    assert!(accordion.dom().has_class(&nested, class::ACTIVE));

    // Same when the host marks the nested entry itself.
    accordion.dom_mut().set_current(nested, true);
    assert_eq!(accordion.resolve_active("/elsewhere.html"), Some(0));
}

#[test]
fn test_collapse_all() {
    let mut accordion = grouped(&book());
    accordion.toggle(1);
    accordion.collapse_all();
    assert_eq!(accordion.expanded(), None);
    let dom = accordion.dom();
    assert!(accordion
        .sections()
        .iter()
        .all(|s| dom.has_class(&s.header, class::COLLAPSED)));
}

#[test]
fn test_every_header_gets_one_indicator() {
    let mut entries = book();
    entries.push(NavEntry::new("Chapter 3", "ch03/index.html"));
    let mut accordion = grouped(&entries);
    let before = accordion.dom().clone();
    accordion.rescan();
    assert_eq!(accordion.dom(), &before, "indicators are added once");

    let dom = accordion.dom();
    for section in accordion.sections() {
        assert!(dom.has_indicator(section.header));
        assert!(section.members.iter().all(|m| !dom.has_indicator(*m)));
    }
    // A header with no members yet is still decorated.
    assert!(accordion.sections()[2].content.is_none());
}
