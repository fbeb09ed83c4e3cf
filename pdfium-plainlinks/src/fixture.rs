//! JSON page fixtures for the in-memory engine.
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "lines": [ { "text": "visit http://x.io today", "x": 72, "y": 700 } ],
//!       "chars": [ { "units": [55357], "box": { "left": 0, "right": 6, "bottom": 0, "top": 10 } } ],
//!       "annotations": [ { "subtype": "underline", "quads": [ { "x1": 72, "y1": 700, "x3": 200, "y3": 710 } ] } ],
//!       "links": [ { "uri": "https://example.com", "rect": { "left": 0, "top": 20, "right": 50, "bottom": 0 } } ]
//!     }
//!   ]
//! }
//! ```
//!
//! Lines are laid out before explicit chars, in the order given.

use crate::engine::AnnotationSubtype;
use crate::error::{PdfError, Result};
use crate::geometry::{CharBox, LinkRect, QuadPoints};
use crate::memory::{
    MemoryAnnotation, MemoryChar, MemoryDocument, MemoryPage, DEFAULT_ADVANCE,
    DEFAULT_CHAR_HEIGHT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A whole document fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFixture {
    pub pages: Vec<PageFixture>,
}

/// One page of a fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub lines: Vec<LineFixture>,
    pub chars: Vec<CharFixture>,
    pub annotations: Vec<AnnotationFixture>,
    pub links: Vec<LinkFixture>,
}

/// A line of text laid out left to right with a fixed advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFixture {
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_advance")]
    pub advance: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_advance() -> f64 {
    DEFAULT_ADVANCE
}

fn default_height() -> f64 {
    DEFAULT_CHAR_HEIGHT
}

/// A single character with an explicit box. Exactly one of `text` and
/// `units` must be set; `units` may hold malformed UTF-16.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharFixture {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub units: Option<Vec<u16>>,
    #[serde(rename = "box")]
    pub char_box: CharBox,
}

/// An annotation on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationFixture {
    pub subtype: AnnotationSubtype,
    #[serde(default)]
    pub rect: Option<LinkRect>,
    #[serde(default)]
    pub quads: Vec<QuadPoints>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// A link already present in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkFixture {
    pub uri: String,
    pub rect: LinkRect,
}

impl DocumentFixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a fixture file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the in-memory document.
    pub fn into_document(self) -> Result<MemoryDocument> {
        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| {
                page.into_page().map_err(|e| PdfError::Fixture {
                    reason: format!("page {}: {}", index, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(MemoryDocument::new(pages))
    }
}

impl PageFixture {
    /// Build the in-memory page.
    pub fn into_page(self) -> Result<MemoryPage> {
        let mut page = MemoryPage::new();

        for line in &self.lines {
            page.push_line_with(&line.text, line.x, line.y, line.advance, line.height);
        }

        for (index, ch) in self.chars.into_iter().enumerate() {
            let units = match (ch.text, ch.units) {
                (Some(text), None) => {
                    if text.chars().count() != 1 {
                        return Err(PdfError::Fixture {
                            reason: format!(
                                "char {} text must be one character, got {:?}",
                                index, text
                            ),
                        });
                    }
                    text.encode_utf16().collect()
                }
                (None, Some(units)) => units,
                _ => {
                    return Err(PdfError::Fixture {
                        reason: format!("char {} needs exactly one of `text` or `units`", index),
                    })
                }
            };
            page.push_char(MemoryChar::from_units(units, ch.char_box));
        }

        for annot in self.annotations {
            page.add_annotation(MemoryAnnotation {
                subtype: annot.subtype,
                rect: annot.rect,
                quads: annot.quads,
                uri: annot.uri,
            });
        }

        for link in self.links {
            page.add_native_link(&link.uri, link.rect);
        }

        Ok(page)
    }
}

/// Load an in-memory document from a JSON fixture file.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<MemoryDocument> {
    DocumentFixture::from_file(path)?.into_document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Page, TextPage};

    #[test]
    fn test_lines_and_links() {
        let json = r#"{
            "pages": [{
                "lines": [{ "text": "go http://x", "x": 10, "y": 700 }],
                "links": [{ "uri": "https://e.com", "rect": { "left": 0, "top": 1, "right": 1, "bottom": 0 } }]
            }]
        }"#;
        let doc = DocumentFixture::from_json(json)
            .unwrap()
            .into_document()
            .unwrap();
        let page = doc.page(0).unwrap();
        assert_eq!(page.load_text().unwrap().char_count(), 11);
        assert_eq!(page.enumerate_links().len(), 1);
    }

    #[test]
    fn test_raw_units() {
        let json = r#"{
            "pages": [{
                "chars": [{ "units": [55357], "box": { "left": 0, "right": 6, "bottom": 0, "top": 10 } }]
            }]
        }"#;
        let doc = DocumentFixture::from_json(json)
            .unwrap()
            .into_document()
            .unwrap();
        let text = doc.page(0).unwrap().load_text().unwrap();
        assert_eq!(text.text_units(0, 1), vec![55357, 0]);
    }

    #[test]
    fn test_char_needs_one_source() {
        let json = r#"{
            "pages": [{
                "chars": [{ "box": { "left": 0, "right": 6, "bottom": 0, "top": 10 } }]
            }]
        }"#;
        let err = DocumentFixture::from_json(json)
            .unwrap()
            .into_document()
            .unwrap_err();
        assert!(matches!(err, PdfError::Fixture { .. }));
    }

    #[test]
    fn test_underline_annotation() {
        let json = r#"{
            "pages": [{
                "annotations": [{
                    "subtype": "underline",
                    "quads": [{ "x1": 0, "y1": 0, "x2": 5, "y2": 0, "x3": 5, "y3": 5, "x4": 0, "y4": 5 }]
                }]
            }]
        }"#;
        let doc = DocumentFixture::from_json(json)
            .unwrap()
            .into_document()
            .unwrap();
        let page = doc.page(0).unwrap();
        assert_eq!(page.annotation_subtype(0), Some(AnnotationSubtype::Underline));
        assert_eq!(page.attachment_point_count(0), 1);
    }
}
