//! Integration tests for the segment tokenizer.

use webr_html::{ParseError, Segment, SegmentTokenizer, tokenize};

const SAMPLE: &str =
    r#"<!DOCTYPE html><html><head><title>Hi</title></head><body><input type="text" /></body></html>"#;

/// Helper to tokenize and panic on error
fn segments(input: &str, strict: bool) -> Vec<Segment> {
    tokenize(input, strict).expect("tokenize failed")
}

/// Helper to render segments for compact comparisons
fn rendered(input: &str, strict: bool) -> Vec<String> {
    segments(input, strict).iter().map(ToString::to_string).collect()
}

#[test]
fn test_sample_document_segments() {
    assert_eq!(
        rendered(SAMPLE, true),
        vec![
            r#"<!doctype html="true">"#,
            "<html>",
            "<head>",
            "<title>",
            "Text(Hi)",
            "</title>",
            "</head>",
            "<body>",
            r#"<input type="text" />"#,
            "</body>",
            "</html>",
        ]
    );
}

#[test]
fn test_self_closing_tag_sets_both_flags() {
    let segs = segments(SAMPLE, true);
    let input = segs[8].as_element().unwrap();
    assert_eq!(input.name, "input");
    assert!(input.is_open);
    assert!(input.is_close);
    assert!(input.is_self_closing());
    assert_eq!(input.attributes.get("type").map(String::as_str), Some("text"));

    let body = segs[7].as_element().unwrap();
    assert!(body.is_open && !body.is_close);

    let close = segs[9].as_element().unwrap();
    assert!(!close.is_open && close.is_close);
}

#[test]
fn test_offsets_cover_source_exactly() {
    let input = "<a href='x'>link</a><!-- note -->";
    let segs = segments(input, true);
    let sources: Vec<_> = segs.iter().map(|s| s.source(input)).collect();
    assert_eq!(sources, vec!["<a href='x'>", "link", "</a>", "<!-- note -->"]);
    assert_eq!(segs[1].span(), 12..16);

    for pair in segs.windows(2) {
        assert!(pair[0].start() < pair[0].end());
        assert!(pair[0].end() <= pair[1].start());
    }
}

#[test]
fn test_names_and_attribute_keys_are_lowercased() {
    let segs = segments(r#"<DIV CLASS="Big" Data-X='1'></div>"#, true);
    let div = segs[0].as_element().unwrap();
    assert_eq!(div.name, "div");
    let attrs: Vec<_> = div
        .attributes
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(attrs, vec![("class", "Big"), ("data-x", "1")]);
}

#[test]
fn test_bare_attribute_is_true() {
    let segs = segments("<input disabled checked>", true);
    let input = segs[0].as_element().unwrap();
    assert_eq!(input.attributes.get("disabled").map(String::as_str), Some("true"));
    assert_eq!(input.attributes.get("checked").map(String::as_str), Some("true"));
}

#[test]
fn test_escaped_quote_kept_verbatim() {
    let segs = segments(r#"<p title="say \"hi\"">x</p>"#, true);
    let p = segs[0].as_element().unwrap();
    assert_eq!(
        p.attributes.get("title").map(String::as_str),
        Some(r#"say \"hi\""#)
    );
}

#[test]
fn test_doctype_any_case() {
    for input in ["<!DOCTYPE html>", "<!doctype html>", "<!DocType html>"] {
        let segs = segments(input, true);
        assert_eq!(segs[0].as_element().unwrap().name, "!doctype");
    }
}

#[test]
fn test_comment_is_trimmed() {
    let segs = segments("<!--   hello there  -->", true);
    match &segs[0] {
        Segment::Comment(comment) => {
            assert_eq!(comment.text, "hello there");
            assert_eq!((comment.start, comment.end), (0, 23));
        }
        other => panic!("expected comment, got {other:?}"),
    }
}

#[test]
fn test_text_runs_are_trimmed() {
    let segs = segments("<p>   Hello world   </p>", true);
    match &segs[1] {
        Segment::Text(text) => assert_eq!(text.text, "Hello world"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_less_than_without_name_is_text() {
    assert_eq!(rendered("<p>a < b</p>", true), vec!["<p>", "Text(a < b)", "</p>"]);
    assert_eq!(rendered("x <1> y", false), vec!["Text(x <1> y)"]);
}

#[test]
fn test_raw_text_is_not_tokenized() {
    let input = r#"<script>if (a < b) { x = "<p>"; }</script><p>after</p>"#;
    for strict in [true, false] {
        assert_eq!(
            rendered(input, strict),
            vec![
                "<script>",
                r#"Text(if (a < b) { x = "<p>"; })"#,
                "</script>",
                "<p>",
                "Text(after)",
                "</p>",
            ]
        );
    }
}

#[test]
fn test_raw_text_malformed_markup_is_not_an_error() {
    let input = r#"<style>a[x="</b c=d"] { }</style>"#;
    let segs = segments(input, true);
    assert_eq!(segs.len(), 3);
    match &segs[1] {
        Segment::Text(text) => assert_eq!(text.text, r#"a[x="</b c=d"] { }"#),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_empty_raw_text_element() {
    assert_eq!(rendered("<script></script>", true), vec!["<script>", "</script>"]);
    assert_eq!(rendered("<script />x", false), vec!["<script />", "Text(x)"]);
}

#[test]
fn test_unclosed_raw_text() {
    assert_eq!(
        tokenize("<script>x < y", true),
        Err(ParseError::UnclosedElement {
            name: "script".to_string(),
            offset: 0,
        })
    );
    assert_eq!(rendered("<script>x < y", false), vec!["<script>", "Text(x < y)"]);
}

#[test]
fn test_current_tracks_last_segment() {
    let mut tokenizer = SegmentTokenizer::new("<p>hi</p>", true);
    assert!(tokenizer.current().is_none());

    let first = tokenizer.next_segment().unwrap().unwrap();
    assert_eq!(tokenizer.current(), Some(&first));

    let second = tokenizer.next_segment().unwrap().unwrap();
    assert_eq!(tokenizer.current(), Some(&second));
    assert_eq!(tokenizer.position(), 5);

    let _ = tokenizer.next_segment().unwrap();
    assert!(tokenizer.next_segment().unwrap().is_none());
}

#[test]
fn test_whitespace_only_input_is_empty() {
    assert!(segments("  \n\t ", true).is_empty());
    assert!(segments("", false).is_empty());
}

// -----------------------------------------------------------------------------
// Strict grammar
// -----------------------------------------------------------------------------

#[test]
fn test_strict_trailing_text_is_unparsable() {
    assert_eq!(
        tokenize("<p>x</p>  tail", true),
        Err(ParseError::UnparsableSegment { offset: 10 })
    );
    assert_eq!(
        rendered("<p>x</p>  tail", false),
        vec!["<p>", "Text(x)", "</p>", "Text(tail)"]
    );
}

#[test]
fn test_strict_rejects_unquoted_value() {
    assert_eq!(
        tokenize("<p a=b>x</p>", true),
        Err(ParseError::MalformedTag {
            offset: 0,
            reason: "unquoted attribute value",
        })
    );
}

#[test]
fn test_strict_rejects_quoted_name() {
    let err = tokenize(r#"<p "a"="1">x</p>"#, true).unwrap_err();
    assert!(matches!(err, ParseError::MalformedTag { offset: 0, .. }));
}

#[test]
fn test_strict_rejects_duplicate_attribute() {
    assert_eq!(
        tokenize(r#"<p a="1" a="2">x</p>"#, true),
        Err(ParseError::DuplicateAttribute {
            name: "a".to_string(),
            offset: 0,
        })
    );
}

#[test]
fn test_strict_rejects_close_tag_attributes() {
    let err = tokenize(r#"<p>x</p class="y">"#, true).unwrap_err();
    assert_eq!(err, ParseError::MalformedTag {
        offset: 4,
        reason: "close tag carries attributes",
    });
}

#[test]
fn test_strict_rejects_space_around_equals() {
    let err = tokenize(r#"<p a= "1">x</p>"#, true).unwrap_err();
    assert!(matches!(err, ParseError::MalformedTag { .. }));
}

#[test]
fn test_strict_space_after_open_bracket_is_not_a_tag() {
    assert_eq!(rendered("< p>x</p>", true), vec!["Text(< p>x)", "</p>"]);
}

// -----------------------------------------------------------------------------
// Lenient grammar
// -----------------------------------------------------------------------------

#[test]
fn test_lenient_accepts_loose_attributes() {
    let segs = segments(r#"<p a=b c = "d" 'e'=f>x</p>"#, false);
    let p = segs[0].as_element().unwrap();
    let attrs: Vec<_> = p
        .attributes
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(attrs, vec![("a", "b"), ("c", "d"), ("e", "f")]);
}

#[test]
fn test_lenient_duplicate_overwrites_in_place() {
    let segs = segments(r#"<p a="1" b="2" a="3">x</p>"#, false);
    let p = segs[0].as_element().unwrap();
    let attrs: Vec<_> = p
        .attributes
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(attrs, vec![("a", "3"), ("b", "2")]);
}

#[test]
fn test_lenient_space_after_open_bracket() {
    assert_eq!(rendered("< p>x</ p>", false), vec!["<p>", "Text(x)", "</p>"]);
}

#[test]
fn test_lenient_malformed_tag_falls_through_to_text() {
    assert_eq!(rendered("<p a=b", false), vec!["Text(<p a=b)"]);
    assert_eq!(
        rendered(r#"<div><p title="x>y</div>"#, false),
        vec!["<div>", r#"Text(<p title="x>y)"#, "</div>"]
    );
}

#[test]
fn test_iterator_stops_after_error() {
    let mut tokenizer = SegmentTokenizer::new("<p>x", true);
    assert!(matches!(tokenizer.next(), Some(Ok(Segment::Element(_)))));
    assert_eq!(
        tokenizer.next(),
        Some(Err(ParseError::UnparsableSegment { offset: 3 }))
    );
    assert_eq!(tokenizer.next(), None);
}
