//! Owned, read-only document tree.

use std::fmt;
use std::str::FromStr;

use crate::error::ReadAloudError;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with a lowercase tag name, its attributes and its children in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// First element matching `selector`, this one included, in document order.
    pub fn find(&self, selector: &Selector) -> Option<&Element> {
        if selector.matches(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => element.find(selector),
            Node::Text(_) => None,
        })
    }
}

// Builders and inspection for hand-made test trees
#[cfg(test)]
impl Element {
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }
}

#[cfg(test)]
impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[cfg(test)]
impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// A parsed HTML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The body element, or the root when the tree has none.
    pub fn body(&self) -> &Element {
        self.root
            .find(&Selector::Tag("body".to_string()))
            .unwrap_or(&self.root)
    }

    pub fn query(&self, selector: &Selector) -> Option<&Element> {
        self.root.find(selector)
    }
}

/// The subset of CSS selectors used to locate a content container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Class(String),
    Id(String),
    Tag(String),
}

impl Selector {
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.attr("id") == Some(id.as_str()),
            Self::Tag(tag) => element.is(tag),
        }
    }
}

impl FromStr for Selector {
    type Err = ReadAloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        };

        let selector = if let Some(class) = s.strip_prefix('.') {
            valid(class).then(|| Self::Class(class.to_string()))
        } else if let Some(id) = s.strip_prefix('#') {
            valid(id).then(|| Self::Id(id.to_string()))
        } else {
            valid(s).then(|| Self::Tag(s.to_ascii_lowercase()))
        };

        selector.ok_or_else(|| {
            ReadAloudError::Config(format!(
                "Unsupported selector '{}': use .class, #id or tag",
                s
            ))
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, ".{}", class),
            Self::Id(id) => write!(f, "#{}", id),
            Self::Tag(tag) => write!(f, "{}", tag),
        }
    }
}
