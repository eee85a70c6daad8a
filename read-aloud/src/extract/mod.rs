//! Text extraction from a page: the user's selection, or the whole page with
//! paragraph structure where the page marks it.

mod container;
pub mod dom;
pub mod html;
pub mod normalize;
mod style;
mod visible;

use std::fmt;

use log::debug;

use crate::page::Page;
use dom::Selector;

/// Selector of the primary content container when none is configured.
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".mbh-content";

/// Text rendered smaller than this is not read.
pub const DEFAULT_MIN_FONT_SIZE_PX: f32 = 8.0;

/// What part of the page to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    Selection,
    FullPage,
}

/// Non-empty extracted text; paragraphs are separated by blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
}

impl ExtractedText {
    /// Wrap `text`, trimmed. None when nothing but whitespace is left.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Paragraphs in document order, each non-empty.
    pub fn paragraphs(&self) -> Vec<&str> {
        normalize::split_paragraphs(&self.text)
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().len()
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Turns a page into speakable text.
#[derive(Debug, Clone)]
pub struct Extractor {
    container: Selector,
    min_font_size_px: f32,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            container: Selector::Class("mbh-content".to_string()),
            min_font_size_px: DEFAULT_MIN_FONT_SIZE_PX,
        }
    }
}

impl Extractor {
    pub fn new(container: Selector, min_font_size_px: f32) -> Self {
        Self {
            container,
            min_font_size_px,
        }
    }

    /// Extract text for `mode`. None when there is nothing to read; never fails.
    pub fn extract(&self, page: &Page, mode: ExtractionMode) -> Option<ExtractedText> {
        match mode {
            ExtractionMode::Selection => page.selection().and_then(ExtractedText::new),
            ExtractionMode::FullPage => {
                let text = match page.document().query(&self.container) {
                    Some(container) => {
                        debug!("Reading content container {}", self.container);
                        container::container_text(container)
                    }
                    None => {
                        debug!(
                            "No {} container, reading all visible text",
                            self.container
                        );
                        visible::visible_text(page.document(), self.min_font_size_px)
                    }
                };
                ExtractedText::new(&text)
            }
        }
    }
}
