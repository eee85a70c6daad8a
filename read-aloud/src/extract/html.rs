//! HTML parsing into the owned document tree.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::dom::{Document, Element, Node};

/// Parse an HTML document. Parsing is error-tolerant and never fails.
pub fn parse_html(html: &str) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let root = dom
        .document
        .children
        .borrow()
        .iter()
        .find_map(|child| match convert(child) {
            Some(Node::Element(element)) => Some(element),
            _ => None,
        })
        .unwrap_or_else(|| Element::new("html"));

    Document::new(root)
}

/// Comments, doctypes and processing instructions are dropped.
fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            let children = handle.children.borrow().iter().filter_map(convert).collect();

            Some(Node::Element(Element {
                tag: name.local.to_string(),
                attrs,
                children,
            }))
        }
        NodeData::Text { contents } => {
            let contents = contents.borrow();
            Some(Node::Text(contents.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::dom::Selector;

    #[test]
    fn test_parse_fragment_gets_body() {
        let doc = parse_html("<p>Hello <b>world</b></p>");
        assert!(doc.query(&Selector::Tag("html".to_string())).is_some());
        assert_eq!(doc.body().text_content(), "Hello world");
    }

    #[test]
    fn test_parse_keeps_attributes() {
        let doc = parse_html(r#"<div class="mbh-content" style="color: red">x</div>"#);
        let div = doc
            .query(&Selector::Class("mbh-content".to_string()))
            .unwrap();
        assert_eq!(div.attr("style"), Some("color: red"));
    }

    #[test]
    fn test_comments_are_dropped() {
        let doc = parse_html("<body>a<!-- hidden -->b</body>");
        assert_eq!(doc.body().text_content(), "ab");
    }

    #[test]
    fn test_breaks_are_elements() {
        let doc = parse_html("<body>a<br><br>b</body>");
        let body = doc.body();
        assert_eq!(body.children.len(), 4);
        assert!(matches!(&body.children[1], Node::Element(e) if e.is("br")));
    }
}
