//! Block Extractor — pulls the nine canvas blocks out of generated HTML.
//!
//! The generator is asked to return the canvas as HTML with one heading per
//! block. The markup is untrusted and semi-structured: headings may carry a
//! leading ordinal ("1. Partenaires clés"), casing drifts, and the content
//! between headings is whatever the model produced. Extraction is a single
//! pass over the parsed tree: locate each label's heading, then collect the
//! text of every following sibling up to the next heading of any level.
//!
//! A missing heading is not an error — the block simply renders empty.

use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Node, Selector};

use crate::canvas::{CanvasBlock, CanvasBlocks};

/// Extracts all nine blocks from the generated markup. Pure function:
/// (markup, fixed label set) → label → newline-joined lines, where list
/// items are dash-prefixed and paragraphs are one line each.
pub fn extract_blocks(markup: &str) -> CanvasBlocks {
    let document = Html::parse_document(markup);
    let heading_selector =
        Selector::parse("h1, h2, h3, h4, h5, h6").expect("static selector is valid");
    let item_selector = Selector::parse("li").expect("static selector is valid");

    let mut blocks = CanvasBlocks::default();
    for block in CanvasBlock::ALL {
        // One compiled pattern per label, reused across every heading.
        let pattern = label_pattern(block.label());
        let content = document
            .select(&heading_selector)
            .find(|heading| pattern.is_match(&element_text(*heading)))
            .map(|heading| collect_siblings(heading, &item_selector))
            .unwrap_or_default();
        blocks.insert(block, content);
    }
    blocks
}

/// Pattern matching the label case-insensitively, tolerating an optional
/// leading ordinal prefix ("1. ", "2. ", …).
fn label_pattern(label: &str) -> Regex {
    let pattern = format!(r"^(?:\d+\.\s*)?{}$", regex::escape(label));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("escaped label pattern is valid")
}

/// Walks the heading's following siblings until the next heading of any
/// level, flattening lists into dash-prefixed lines and paragraphs into one
/// line each. Unexpected element types are ignored.
fn collect_siblings(heading: ElementRef, item_selector: &Selector) -> String {
    let mut lines: Vec<String> = Vec::new();

    for sibling in heading.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            let name = element.value().name();
            if is_heading(name) {
                break;
            }
            match name {
                "ul" | "ol" => {
                    for item in element.select(item_selector) {
                        lines.push(format!("- {}", element_text(item)));
                    }
                }
                "p" => {
                    let text = element_text(element);
                    if !text.is_empty() {
                        lines.push(text);
                    }
                }
                _ => {}
            }
        } else if let Node::Text(text) = sibling.value() {
            let text = collapse_whitespace(text);
            if !text.is_empty() {
                lines.push(text);
            }
        }
    }

    lines.join("\n")
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Concatenated descendant text with whitespace collapsed, so inline markup
/// (`<strong>`, `<em>`) inside headings or items does not split the text.
fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
