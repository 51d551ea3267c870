//! Incremental repair equivalence tests.
//!
//! For every (old source, edit, new source) case, the incrementally
//! repaired document must be structurally equal to a fresh full parse of
//! the new source, and serialize back to it byte-for-byte.

use markdown_mirror_engine::{
    parse, parse_incremental, serialize, snapshot, Block, EditInfo, ParseOptions,
    SerializeOptions, Span,
};
use pretty_assertions::assert_eq;

fn check(old_source: &str, edit: EditInfo, new_source: &str) -> markdown_mirror_engine::Document {
    let opts = ParseOptions::default();
    let old_doc = parse(old_source, opts);
    let repaired =
        parse_incremental(&old_doc, old_source, new_source, edit, opts).expect("edit is valid");
    snapshot::check(&repaired);

    let full = parse(new_source, opts);
    assert_eq!(
        snapshot::normalize(&repaired),
        snapshot::normalize(&full),
        "repaired structure differs from full parse"
    );
    assert_eq!(repaired, full);
    assert_eq!(
        serialize(&repaired, &SerializeOptions::default()),
        new_source
    );
    repaired
}

#[test]
fn insert_inside_paragraph_touches_only_that_block() {
    // "# T\n\npara\n" with "XX" inserted after "pa"
    let doc = check("# T\n\npara\n", EditInfo::insert(8, 2), "# T\n\npaXXra\n");
    assert_eq!(doc.blocks[0].span(), Span::new(0, 3));
    assert!(matches!(doc.blocks[2], Block::Paragraph { .. }));
    assert_eq!(doc.blocks[2].span(), Span::new(5, 11));
}

#[test]
fn replacing_a_gap_introduces_a_heading_between_paragraphs() {
    let doc = check("A\n\nB\n", EditInfo::replace(1, 3, 7), "A\n\n# H\n\nB\n");
    let non_blank: Vec<&Block> = doc
        .blocks
        .iter()
        .filter(|b| !matches!(b, Block::BlankLines { .. }))
        .collect();
    assert_eq!(non_blank.len(), 3);
    assert!(matches!(non_blank[0], Block::Paragraph { .. }));
    assert!(matches!(non_blank[1], Block::Heading { level: 1, .. }));
    assert!(matches!(non_blank[2], Block::Paragraph { .. }));
}

#[test]
fn edits_across_many_constructs_match_full_parse() {
    let cases: &[(&str, EditInfo, &str)] = &[
        // grow and shrink a paragraph
        ("a\n\nbb\n\nc\n", EditInfo::insert(3, 1), "a\n\nXbb\n\nc\n"),
        ("a\n\nbb\n\nc\n", EditInfo::delete(3, 4), "a\n\nb\n\nc\n"),
        // split a paragraph in two
        ("a\n\nbb\n\nc\n", EditInfo::insert(4, 2), "a\n\nb\n\nb\n\nc\n"),
        // join two paragraphs
        ("a\n\nb\n\nc\n", EditInfo::delete(1, 2), "a\nb\n\nc\n"),
        // touch a heading
        ("# h\n\np\n", EditInfo::insert(3, 2), "# hxx\n\np\n"),
        // demote a heading into a paragraph
        ("# h\n\np\n", EditInfo::delete(0, 2), "h\n\np\n"),
        // edit fenced code body
        (
            "p\n\n```\nbody\n```\n",
            EditInfo::replace(7, 11, 2),
            "p\n\n```\nxy\n```\n",
        ),
        // appending at the very end
        ("# h\n\ntail\n", EditInfo::insert(10, 4), "# h\n\ntail\nmore"),
        // blank-run growth
        ("a\n\nb\n", EditInfo::insert(2, 1), "a\n\n\nb\n"),
        // blank-run shrink
        ("a\n\n\n\nb\n", EditInfo::delete(2, 4), "a\n\nb\n"),
        // a table gains a row
        (
            "x\n\na | b\n--- | ---\n1 | 2\n",
            EditInfo::insert(25, 6),
            "x\n\na | b\n--- | ---\n1 | 2\n3 | 4\n",
        ),
        // an html block is edited
        (
            "p\n\n<div>\nx\n</div>\n",
            EditInfo::insert(8, 1),
            "p\n\n<div>y\nx\n</div>\n",
        ),
    ];
    for (old_source, edit, new_source) in cases {
        check(old_source, *edit, new_source);
    }
}

#[test]
fn container_edits_stay_correct_via_fallback() {
    let cases: &[(&str, EditInfo, &str)] = &[
        // blockquote content
        ("> a\n> b\n", EditInfo::insert(6, 1), "> a\n> xb\n"),
        // list item content
        ("- a\n- b\n", EditInfo::insert(3, 1), "- ax\n- b\n"),
        // removing a quote marker merges into a paragraph above
        ("p\n\n> q\n", EditInfo::delete(3, 5), "p\n\nq\n"),
        // footnote definition body
        (
            "t[^1]\n\n[^1]: body\n",
            EditInfo::insert(17, 1),
            "t[^1]\n\n[^1]: bodyX\n",
        ),
    ];
    for (old_source, edit, new_source) in cases {
        check(old_source, *edit, new_source);
    }
}

#[test]
fn suffix_blocks_are_rebased_not_reparsed() {
    let old_source = "one\n\n*two*\n\n[l](u)\n\nlast\n";
    let opts = ParseOptions::default();
    let old_doc = parse(old_source, opts);
    let old_spans: Vec<Span> = old_doc.blocks.iter().map(Block::span).collect();

    // insert into the first paragraph: everything after shifts by 3
    let new_source = "oneXXX\n\n*two*\n\n[l](u)\n\nlast\n";
    let repaired =
        parse_incremental(&old_doc, old_source, new_source, EditInfo::insert(3, 3), opts)
            .expect("edit is valid");

    assert_eq!(repaired.blocks.len(), old_doc.blocks.len());
    for (idx, block) in repaired.blocks.iter().enumerate().skip(1) {
        assert_eq!(
            block.span(),
            old_spans[idx].shifted(3),
            "block {idx} was not rebased by the edit delta"
        );
    }
    assert_eq!(
        serialize(&repaired, &SerializeOptions::default()),
        new_source
    );
}

#[test]
fn strict_mode_carries_through_incremental_parses() {
    let opts = ParseOptions {
        strict: true,
        ..Default::default()
    };
    let old_source = "# t\n\n*foo**bar**baz*\n";
    let new_source = "# t\n\n*foo**barx**baz*\n";
    let old_doc = parse(old_source, opts);
    let repaired =
        parse_incremental(&old_doc, old_source, new_source, EditInfo::insert(14, 1), opts)
            .expect("edit is valid");
    assert_eq!(repaired, parse(new_source, opts));
}

#[test]
fn repaired_document_span_covers_new_source() {
    let doc = check("a\n\nb\n", EditInfo::insert(4, 3), "a\n\nbxxx\n");
    assert_eq!(doc.span, Span::new(0, 8));
    assert!(doc.trailing_newline);
}
