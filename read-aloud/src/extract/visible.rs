//! Fallback extraction: every legible text node on the page, as one line.

use super::dom::{Document, Element, Node};
use super::normalize::collapse_whitespace;
use super::style::ComputedStyle;

/// Text of every text node whose parent is rendered at a legible size,
/// joined with spaces and collapsed to a single line.
pub fn visible_text(document: &Document, min_font_size_px: f32) -> String {
    let body = document.body();
    let mut text = String::new();
    collect(body, ComputedStyle::default().for_child(body), min_font_size_px, &mut text);
    collapse_whitespace(&text)
}

fn collect(element: &Element, style: ComputedStyle, min_font_size_px: f32, out: &mut String) {
    let accepts_text =
        !element.is("script") && !element.is("style") && style.is_legible(min_font_size_px);

    for child in &element.children {
        match child {
            Node::Text(text) if accepts_text => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Text(_) => {}
            Node::Element(child) => {
                let child_style = style.for_child(child);
                // Nothing under display:none renders; hidden visibility can be undone below
                if !child_style.display_none {
                    collect(child, child_style, min_font_size_px, out);
                }
            }
        }
    }
}
