//! End-to-end rendering of DocC documents through the public API.

use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use docc_renderer::model::{Aside, ContentSection, LinkSection};
use docc_renderer::{
    BLOCK_DEPTH_SENTINEL, BlockNode, DEFAULT_ATTRIBUTION, DEFAULT_DISCLAIMER, Document,
    DocumentError, DocumentRenderer, INLINE_DEPTH_SENTINEL, InlineNode,
};
use pretty_assertions::assert_eq;

const ARRAY_APPEND: &str = include_str!("fixtures/array_append.json");
const SWIFTUI_INDEX: &str = include_str!("fixtures/swiftui_index.json");

fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()
}

fn render(doc: &Document, url: &str) -> String {
    DocumentRenderer::new().render_at(doc, url, timestamp())
}

fn footer() -> String {
    format!("---\n\n{DEFAULT_ATTRIBUTION}\n{DEFAULT_DISCLAIMER}\n")
}

fn content_document(content: Vec<BlockNode>) -> Document {
    Document {
        primary_content_sections: vec![ContentSection::Content(content)],
        ..Document::default()
    }
}

#[test]
fn test_end_to_end_minimal_document() {
    let doc = Document::from_json(
        r#"{"metadata":{"title":"Foo"},"abstract":[{"type":"text","text":"Bar."}]}"#,
    )
    .unwrap();
    let result = render(&doc, "https://developer.apple.com/documentation");

    assert!(result.starts_with("---\ntitle: Foo\ndescription: Bar.\n"));
    assert!(!result.contains("**Navigation:**"));
    assert!(result.contains("\n> Bar.\n"));
    assert!(result.ends_with(&footer()));
}

#[test]
fn test_symbol_page() {
    let doc = Document::from_json(ARRAY_APPEND).unwrap();
    let result = render(
        &doc,
        "https://developer.apple.com/documentation/swift/array/append(_:)",
    );

    let expected = format!(
        "---\n\
         title: append(_:)\n\
         description: Adds a new element at the end of the Array.\n\
         source: https://developer.apple.com/documentation/swift/array/append(_:)\n\
         timestamp: 2026-10-18T08:00:00Z\n\
         ---\n\
         \n\
         **Navigation:** [Swift](/documentation/swift) › [array](/documentation/swift/array)\n\
         \n\
         **Instance Method**\n\
         \n\
         # append(_:)\n\
         \n\
         **Available on:** iOS 8.0+, macOS 10.10+, visionOS 1.0+ Beta\n\
         \n\
         > Adds a new element at the end of the [Array](/documentation/swift/array).\n\
         \n\
         ```swift\n\
         @inlinable mutating func append(_ newElement: Element)\n\
         ```\n\
         \n\
         ## Parameters\n\
         \n\
         **newElement**: The element to append to the array.\n\
         \n\
         ## Discussion\n\
         \n\
         Because arrays increase their allocated capacity using an exponential strategy, \
         appending a single element to an array is an *O(1)* operation when averaged over many calls.\n\
         \n\
         ```swift\n\
         var numbers = [1, 2, 3, 4, 5]\n\
         numbers.append(100)\n\
         print(numbers)\n\
         // Prints \"[1, 2, 3, 4, 5, 100]\"\n\
         ```\n\
         \n\
         > [!NOTE]\n\
         > **Complexity**\n\
         > O(1) on average.\n\
         \n\
         - `append(_:)`\n\
         - [insert(_:at:)](/documentation/swift/array/insert(_:at:)-3erb3)\n\
         \n\
         ## Adding Elements\n\
         \n\
         - [insert(_:at:)](/documentation/swift/array/insert(_:at:)-3erb3) - Inserts a new element at the specified position.\n\
         - [append(contentsOf:)](/documentation/swift/array/append(contentsof:)-8e2zk)\n\
         - [reserveCapacity(_:)](/documentation/Swift/Array/reserveCapacity(_:))\n\
         \n\
         {}",
        footer()
    );
    assert_eq!(result, expected);
}

#[test]
fn test_framework_index_page() {
    let doc = Document::from_json(SWIFTUI_INDEX).unwrap();
    let result = render(&doc, "https://developer.apple.com/documentation/swiftui");

    let expected = format!(
        "---\n\
         title: SwiftUI\n\
         source: https://developer.apple.com/documentation/swiftui\n\
         timestamp: 2026-10-18T08:00:00Z\n\
         ---\n\
         \n\
         # SwiftUI\n\
         \n\
         - [SwiftUI](/documentation/swiftui)\n\
         \n\
         ### Essentials\n\
         \n\
         - [Adopting Liquid Glass](/documentation/swiftui/adopting-liquid-glass) **Beta**\n\
         \n\
         ### App organization\n\
         \n\
         - [App](/documentation/swiftui/app)\n\
         \n\
         #### Creating an app\n\
         \n\
         - [body](/documentation/swiftui/app/body-swift.property)\n\
         \n\
         {}",
        footer()
    );
    assert_eq!(result, expected);
}

#[test]
fn test_deeply_nested_asides_terminate_with_sentinel() {
    let mut node = BlockNode::paragraph(vec![InlineNode::text("innermost")]);
    for _ in 0..200 {
        node = BlockNode::aside(Some("warning"), vec![node]);
    }
    let doc = content_document(vec![
        BlockNode::paragraph(vec![InlineNode::text("Shallow sibling.")]),
        node,
    ]);

    let start = Instant::now();
    let result = render(&doc, "https://example.com/a");
    assert!(start.elapsed() < Duration::from_secs(1));

    assert!(result.contains(BLOCK_DEPTH_SENTINEL));
    assert!(result.contains("Shallow sibling."));
    assert!(!result.contains("innermost"));
    assert!(result.ends_with(&footer()));
}

#[test]
fn test_deeply_nested_lists_terminate_with_sentinel() {
    let mut node = BlockNode::paragraph(vec![InlineNode::text("innermost")]);
    for level in 0..150 {
        node = if level % 2 == 0 {
            BlockNode::ordered_list(vec![vec![node]])
        } else {
            BlockNode::unordered_list(vec![vec![node]])
        };
    }
    let result = render(&content_document(vec![node]), "https://example.com/a");
    assert!(result.contains(BLOCK_DEPTH_SENTINEL));
}

#[test]
fn test_deeply_nested_inline_spans_terminate_with_sentinel() {
    let mut span = InlineNode::text("innermost");
    for level in 0..100 {
        span = if level % 2 == 0 {
            InlineNode::Strong(vec![span])
        } else {
            InlineNode::Emphasis(vec![span])
        };
    }
    let doc = content_document(vec![BlockNode::paragraph(vec![
        InlineNode::text("lead "),
        span,
    ])]);
    let result = render(&doc, "https://example.com/a");

    assert!(result.contains(INLINE_DEPTH_SENTINEL));
    assert!(result.contains("lead "));
    assert!(!result.contains("innermost"));
}

#[test]
fn test_inline_depth_resets_per_paragraph() {
    let mut span = InlineNode::text("fine");
    for _ in 0..10 {
        span = InlineNode::Emphasis(vec![span]);
    }
    let mut node = BlockNode::paragraph(vec![span]);
    for _ in 0..10 {
        node = BlockNode::Aside(Aside {
            content: vec![node],
            ..Aside::default()
        });
    }
    let result = render(&content_document(vec![node]), "https://example.com/a");
    assert!(result.contains("fine"));
    assert!(!result.contains(INLINE_DEPTH_SENTINEL));
    assert!(!result.contains(BLOCK_DEPTH_SENTINEL));
}

#[test]
fn test_cyclic_reference_identifiers() {
    let doc = Document::from_json(
        r#"{
            "topicSections": [{"title": "Cycle", "identifiers": ["doc://x/documentation/a/one", "doc://x/documentation/a/two"]}],
            "references": {
                "doc://x/documentation/a/one": {
                    "title": "One",
                    "abstract": [{"type": "reference", "identifier": "doc://x/documentation/a/two"}]
                },
                "doc://x/documentation/a/two": {
                    "title": "Two",
                    "abstract": [{"type": "reference", "identifier": "doc://x/documentation/a/one"}]
                }
            }
        }"#,
    )
    .unwrap();
    let result = render(&doc, "https://example.com/a");
    assert!(result.contains(
        "## Cycle\n\n\
         - [One](/documentation/a/one) - two\n\
         - [Two](/documentation/a/two) - one\n"
    ));
}

#[test]
fn test_duplicate_identifiers_are_kept() {
    let doc = Document {
        see_also_sections: vec![LinkSection {
            title: Some("See Also".to_owned()),
            identifiers: vec!["x".to_owned(), "x".to_owned()],
        }],
        ..Document::default()
    };
    let result = render(&doc, "https://example.com/a");
    assert!(result.contains("## See Also\n\n- [x](x)\n- [x](x)\n"));
}

#[test]
fn test_malformed_fields_are_omitted() {
    let doc = Document::from_json(
        r#"{
            "metadata": {"title": ["not", "a", "string"], "platforms": [{"name": 3}, "iOS"]},
            "abstract": {"type": "text"},
            "primaryContentSections": [{"kind": "content", "content": [
                {"type": "paragraph", "inlineContent": "oops"},
                {"type": "codeListing", "code": [1, 2, 3]},
                {"type": "unorderedList", "items": [{"content": 5}]},
                {"type": "aside", "style": 9, "content": [{"type": "paragraph", "inlineContent": [{"type": "text", "text": "kept"}]}]}
            ]}],
            "topicSections": "nope"
        }"#,
    )
    .unwrap();
    let result = render(&doc, "https://example.com/a");

    assert!(!result.contains("title:"));
    assert!(!result.contains("description:"));
    assert!(!result.contains("**Available on:**"));
    assert!(result.contains("```swift\n\n```"));
    assert!(result.contains("> [!NOTE]\n> kept\n"));
    assert!(result.ends_with(&footer()));
}

fn content_json(block: &str) -> String {
    format!(r#"{{"primaryContentSections":[{{"kind":"content","content":[{block}]}}]}}"#)
}

fn innermost_paragraph_json() -> String {
    r#"{"type":"paragraph","inlineContent":[{"type":"text","text":"innermost"}]}"#.to_owned()
}

#[test]
fn test_deeply_nested_asides_from_json_render_sentinel() {
    let mut block = innermost_paragraph_json();
    for _ in 0..100 {
        block = format!(r#"{{"type":"aside","style":"note","content":[{block}]}}"#);
    }
    let doc = Document::from_json(&content_json(&block)).unwrap();
    let result = render(&doc, "https://example.com/a");

    assert!(result.contains(BLOCK_DEPTH_SENTINEL));
    assert!(!result.contains("innermost"));
    assert!(result.ends_with(&footer()));
}

#[test]
fn test_deeply_nested_lists_from_json_render_sentinel() {
    let mut block = innermost_paragraph_json();
    for _ in 0..100 {
        block = format!(r#"{{"type":"unorderedList","items":[{{"content":[{block}]}}]}}"#);
    }
    let doc = Document::from_json(&content_json(&block)).unwrap();
    let result = render(&doc, "https://example.com/a");

    assert!(result.contains(BLOCK_DEPTH_SENTINEL));
    assert!(!result.contains("innermost"));
}

#[test]
fn test_pathologically_deep_json_still_renders() {
    let block = format!(
        "{}{}{}",
        r#"{"type":"aside","content":["#.repeat(5_000),
        innermost_paragraph_json(),
        "]}".repeat(5_000),
    );
    let json = format!(
        r#"{{"metadata":{{"title":"Deep","extra":{}{}}},"primaryContentSections":[{{"kind":"content","content":[{block}]}}]}}"#,
        "[".repeat(10_000),
        "]".repeat(10_000),
    );

    let start = Instant::now();
    let doc = Document::from_json(&json).unwrap();
    let result = render(&doc, "https://example.com/a");
    assert!(start.elapsed() < Duration::from_secs(5));

    assert!(result.starts_with("---\ntitle: Deep\n"));
    assert!(result.contains(BLOCK_DEPTH_SENTINEL));
}

#[test]
fn test_non_object_json_is_rejected() {
    assert!(matches!(
        Document::from_json("[1, 2]"),
        Err(DocumentError::NotAnObject("array"))
    ));
}

#[test]
fn test_concurrent_renders_share_one_renderer() {
    let doc = Document::from_json(ARRAY_APPEND).unwrap();
    let renderer = DocumentRenderer::new();
    let url = "https://developer.apple.com/documentation/swift/array/append(_:)";
    let expected = renderer.render_at(&doc, url, timestamp());

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| renderer.render_at(&doc, url, timestamp())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
