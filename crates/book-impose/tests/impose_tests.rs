use book_impose::*;
use book_paginate::{Book, PageSetup, RuleSet, TextFlow, paginate};

/// A book with exactly `pages` pages: one 344pt line fills the default content box
fn book_with_pages(pages: usize) -> Book {
    paginate(
        TextFlow::new(&"x\n".repeat(pages), 344.0),
        RuleSet::new(),
        PageSetup::default(),
    )
    .unwrap()
}

fn booklet() -> ArrangementConfig {
    ArrangementConfig::new(Arrangement::Booklet)
}

fn spread(left: usize, right: usize) -> Face {
    let slot = |n: usize| {
        if n == 0 {
            Slot::Blank
        } else {
            Slot::Page(PageRef::from_number(n))
        }
    };
    Face::Spread {
        left: slot(left),
        right: slot(right),
    }
}

#[test]
fn test_booklet_four_pages() {
    let book = book_with_pages(4);
    let plan = impose(&book, &booklet()).unwrap();

    assert_eq!(plan.sheet_count(), 1);
    assert_eq!(plan.sheets[0].front, spread(1, 4));
    assert_eq!(plan.sheets[0].back, Some(spread(2, 3)));
}

#[test]
fn test_booklet_six_pages_pads_to_eight() {
    let book = book_with_pages(6);
    let plan = impose(&book, &booklet()).unwrap();

    assert_eq!(plan.padded_pages, 8);
    assert_eq!(plan.sheet_count(), 2);
    // Pages 7 and 8 are blank
    assert_eq!(plan.sheets[0].front, spread(1, 0));
    assert_eq!(plan.sheets[0].back, Some(spread(2, 0)));
    assert_eq!(plan.sheets[1].front, spread(3, 6));
    assert_eq!(plan.sheets[1].back, Some(spread(4, 5)));
}

#[test]
fn test_booklet_padding_invariant() {
    for pages in 1..=13 {
        let book = book_with_pages(pages);
        let plan = impose(&book, &booklet()).unwrap();

        let padded = pages.div_ceil(4) * 4;
        assert_eq!(plan.padded_pages, padded);
        assert_eq!(plan.sheet_count(), padded / 4);
        assert_eq!(plan.slots().count(), padded);
        assert_eq!(plan.blank_count(), padded - pages);

        let mut seen: Vec<usize> = plan.page_refs().map(|p| p.number()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=pages).collect::<Vec<_>>(), "P = {}", pages);
    }
}

#[test]
fn test_one_up_is_identity() {
    let book = book_with_pages(3);
    let plan = impose(&book, &ArrangementConfig::new(Arrangement::One)).unwrap();

    assert_eq!(plan.sheet_count(), 3);
    assert_eq!(plan.face_count(), 3);
    let order: Vec<_> = plan.page_refs().map(|p| p.index()).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert!(plan.sheets.iter().all(|s| s.back.is_none()));
}

#[test]
fn test_two_up_pairs_in_order() {
    let book = book_with_pages(5);
    let plan = impose(&book, &ArrangementConfig::new(Arrangement::Two)).unwrap();

    assert_eq!(plan.sheet_count(), 3);
    assert_eq!(plan.sheets[0].front, spread(1, 2));
    assert_eq!(plan.sheets[2].front, spread(5, 0));
    assert_eq!(plan.padded_pages, 6);
}

#[test]
fn test_page_refs_resolve_into_book() {
    let book = book_with_pages(6);
    let plan = impose(&book, &booklet()).unwrap();

    for page_ref in plan.page_refs() {
        let page = page_ref.resolve(&book).unwrap();
        assert_eq!(page.index(), page_ref.index());
    }
}

#[test]
fn test_empty_book_has_no_pages() {
    let book = paginate(TextFlow::new("", 10.0), RuleSet::new(), PageSetup::default()).unwrap();
    assert!(book.is_empty());
    assert!(matches!(impose(&book, &booklet()), Err(ImposeError::NoPages)));
}

#[test]
fn test_reimpose_recomputes_from_scratch() {
    let book = book_with_pages(4);
    let first = impose(&book, &booklet()).unwrap();
    let _other = impose(&book, &ArrangementConfig::new(Arrangement::One)).unwrap();
    let again = impose(&book, &booklet()).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_marks_do_not_change_page_assignment() {
    let book = book_with_pages(6);
    let plain = impose(&book, &booklet()).unwrap();

    let mut config = booklet();
    config.marks = MarksPolicy::Both;
    let marked = impose(&book, &config).unwrap();

    assert_eq!(plain.sheets, marked.sheets);
    assert!(!marked.geometry.marks.is_empty());
    assert!(marked.geometry.sheet_width > plain.geometry.sheet_width);
}

#[test]
fn test_invalid_custom_paper_is_rejected() {
    let book = book_with_pages(2);
    let config = ArrangementConfig {
        arrangement: Arrangement::Two,
        sheet_size: SheetSize::Fixed {
            paper: PaperSize::Custom {
                width_mm: 0.0,
                height_mm: 100.0,
            },
            orientation: Orientation::Portrait,
        },
        marks: MarksPolicy::None,
    };
    assert!(matches!(impose(&book, &config), Err(ImposeError::Config(_))));
}
