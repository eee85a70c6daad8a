//! Pages to read: a parsed document plus the user's selection, if any.

use std::path::PathBuf;

use log::debug;
use tokio::io::AsyncReadExt;

use crate::error::{ReadAloudError, Result};
use crate::extract::dom::Document;
use crate::extract::html::parse_html;

/// The page state the extractor works on.
#[derive(Debug, Clone)]
pub struct Page {
    document: Document,
    selection: Option<String>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
        }
    }

    pub fn from_html(html: &str) -> Self {
        Self::new(parse_html(html))
    }

    /// Attach the text the user has selected on the page.
    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }
}

/// Where a page's HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    File(PathBuf),
    Url(String),
    Stdin,
}

impl PageSource {
    /// `-` is stdin, `http(s)://` is a URL, anything else a file path.
    pub fn parse(source: &str) -> Self {
        if source == "-" {
            Self::Stdin
        } else if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::File(PathBuf::from(source))
        }
    }

    /// Read the raw HTML.
    pub async fn read_html(&self) -> Result<String> {
        match self {
            Self::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                ReadAloudError::PageLoad(format!("Failed to read {}: {}", path.display(), e))
            }),
            Self::Url(url) => fetch(url).await,
            Self::Stdin => {
                let mut html = String::new();
                tokio::io::stdin().read_to_string(&mut html).await?;
                Ok(html)
            }
        }
    }

    /// Read and parse the page.
    pub async fn load(&self) -> Result<Page> {
        let html = self.read_html().await?;
        debug!("Loaded {} bytes of HTML", html.len());
        Ok(Page::from_html(&html))
    }
}

async fn fetch(url: &str) -> Result<String> {
    debug!("GET {}", url);
    let response = reqwest::get(url)
        .await
        .map_err(|e| ReadAloudError::PageLoad(format!("Request to {} failed: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReadAloudError::PageLoad(format!(
            "{} answered HTTP {}",
            url,
            status.as_u16()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| ReadAloudError::PageLoad(format!("Failed to read {}: {}", url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_sources() {
        assert_eq!(PageSource::parse("-"), PageSource::Stdin);
        assert_eq!(
            PageSource::parse("https://example.com/a"),
            PageSource::Url("https://example.com/a".to_string())
        );
        assert_eq!(
            PageSource::parse("saved/page.html"),
            PageSource::File(PathBuf::from("saved/page.html"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<div class=\"mbh-content\">Saved page</div>").unwrap();

        let source = PageSource::File(file.path().to_path_buf());
        let page = source.load().await.unwrap();
        assert_eq!(page.document().body().text_content(), "Saved page");
        assert!(page.selection().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_page_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = PageSource::File(dir.path().join("nope.html"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, ReadAloudError::PageLoad(_)));
    }

    #[test]
    fn test_selection_is_kept_verbatim() {
        let page = Page::from_html("<p>x</p>").with_selection("  a b ");
        assert_eq!(page.selection(), Some("  a b "));
    }
}
