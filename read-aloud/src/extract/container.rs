//! Paragraph-preserving text of a primary content container.
//!
//! Two adjacent `<br>` elements mark a paragraph boundary. The container is
//! walked once, front to back, recording the byte offset of every boundary in
//! the flattened text; the paragraph breaks are spliced in afterwards. The
//! tree itself is only borrowed.

use super::dom::{Element, Node};
use super::normalize::{PARAGRAPH_BREAK, normalize_paragraph_text};

/// Normalized text of `container`, with a blank line for every `<br><br>`.
pub fn container_text(container: &Element) -> String {
    let mut flat = FlatText::default();
    flat.push_children(container);
    normalize_paragraph_text(&flat.splice())
}

/// Flattened text content plus the offsets where paragraph breaks belong.
#[derive(Debug, Default)]
struct FlatText {
    text: String,
    boundaries: Vec<usize>,
}

impl FlatText {
    fn push_children(&mut self, element: &Element) {
        let children = &element.children;
        let mut index = 0;

        while index < children.len() {
            match &children[index] {
                Node::Text(text) => self.text.push_str(text),
                Node::Element(child) if child.is("br") => {
                    // A lone break has no text content
                    if let Some(partner) = break_partner(children, index) {
                        self.boundaries.push(self.text.len());
                        index = partner;
                    }
                }
                Node::Element(child) => self.push_children(child),
            }
            index += 1;
        }
    }

    fn splice(self) -> String {
        let mut out =
            String::with_capacity(self.text.len() + self.boundaries.len() * PARAGRAPH_BREAK.len());
        let mut start = 0;

        for offset in self.boundaries {
            out.push_str(&self.text[start..offset]);
            out.push_str(PARAGRAPH_BREAK);
            start = offset;
        }
        out.push_str(&self.text[start..]);
        out
    }
}

/// Index of the `<br>` that pairs with the one at `index`. Only the very next
/// sibling counts; any node in between, whitespace text included, breaks the pair.
fn break_partner(siblings: &[Node], index: usize) -> Option<usize> {
    match siblings.get(index + 1) {
        Some(Node::Element(element)) if element.is("br") => Some(index + 1),
        _ => None,
    }
}
