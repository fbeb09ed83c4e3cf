//! In-memory document engine
//!
//! Implements the engine contracts over plain data so that pages can be
//! described in tests and JSON fixtures without a PDFium build. Behaviour
//! mirrors PDFium where the link scanner can observe it:
//!
//! - text buffers come back NUL-terminated;
//! - a character with no text units makes any extraction covering it fail;
//! - link enumeration walks every `Link` annotation, native or created.

use crate::engine::{AnnotationSubtype, LinkHandle, Page, TextPage};
use crate::error::{PdfError, Result};
use crate::geometry::{CharBox, LinkRect, QuadPoints};
use crate::session::EngineLibrary;
use std::cell::Cell;
use std::sync::Arc;
use tracing::debug;

/// Horizontal advance of each laid-out character.
pub const DEFAULT_ADVANCE: f64 = 6.0;
/// Height of each laid-out character.
pub const DEFAULT_CHAR_HEIGHT: f64 = 10.0;

/// One character of an in-memory page.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryChar {
    /// UTF-16 units the engine reports for this character.
    pub units: Vec<u16>,
    /// Bounding box, or `None` if the engine cannot report one.
    pub char_box: Option<CharBox>,
}

impl MemoryChar {
    /// A character with a known box.
    pub fn new(ch: char, char_box: CharBox) -> Self {
        let mut buf = [0u16; 2];
        Self {
            units: ch.encode_utf16(&mut buf).to_vec(),
            char_box: Some(char_box),
        }
    }

    /// A character given as raw, possibly malformed, UTF-16.
    pub fn from_units(units: Vec<u16>, char_box: CharBox) -> Self {
        Self {
            units,
            char_box: Some(char_box),
        }
    }
}

/// An annotation on an in-memory page.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryAnnotation {
    pub subtype: AnnotationSubtype,
    pub rect: Option<LinkRect>,
    pub quads: Vec<QuadPoints>,
    pub uri: Option<String>,
}

impl MemoryAnnotation {
    /// An empty annotation of `subtype`.
    pub fn new(subtype: AnnotationSubtype) -> Self {
        Self {
            subtype,
            rect: None,
            quads: Vec::new(),
            uri: None,
        }
    }

    /// Append an attachment quad.
    pub fn with_quad(mut self, quad: QuadPoints) -> Self {
        self.quads.push(quad);
        self
    }
}

/// Text page over shared character data.
#[derive(Debug, Clone)]
pub struct MemoryTextPage {
    chars: Arc<[MemoryChar]>,
}

impl TextPage for MemoryTextPage {
    fn char_count(&self) -> usize {
        self.chars.len()
    }

    fn text_units(&self, start: usize, count: usize) -> Vec<u16> {
        let Some(range) = self.chars.get(start..start.saturating_add(count)) else {
            return Vec::new();
        };
        if range.iter().any(|c| c.units.is_empty()) {
            return Vec::new();
        }
        let mut units: Vec<u16> = range.iter().flat_map(|c| c.units.iter().copied()).collect();
        units.push(0);
        units
    }

    fn char_box(&self, index: usize) -> Option<CharBox> {
        self.chars.get(index).and_then(|c| c.char_box)
    }
}

/// A page held entirely in memory.
///
/// # Example
///
/// ```
/// use pdfium_plainlinks::{is_character_underlined, MemoryPage};
///
/// let mut page = MemoryPage::from_line("first line", 72.0, 720.0);
/// page.push_line("second line", 72.0, 700.0);
/// assert!(!is_character_underlined(&page, 0)?);
/// # Ok::<(), pdfium_plainlinks::PdfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    chars: Vec<MemoryChar>,
    annotations: Vec<MemoryAnnotation>,
}

impl MemoryPage {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page holding one line of text laid out from `(x, y)`.
    pub fn from_line(text: &str, x: f64, y: f64) -> Self {
        let mut page = Self::new();
        page.push_line(text, x, y);
        page
    }

    /// Append a line of text starting at `(x, y)` with the default advance
    /// and height.
    pub fn push_line(&mut self, text: &str, x: f64, y: f64) {
        self.push_line_with(text, x, y, DEFAULT_ADVANCE, DEFAULT_CHAR_HEIGHT);
    }

    /// Append a line of text, one box per character, left to right.
    pub fn push_line_with(&mut self, text: &str, x: f64, y: f64, advance: f64, height: f64) {
        for (i, ch) in text.chars().enumerate() {
            let left = x + i as f64 * advance;
            let char_box = CharBox::new(left, left + advance, y, y + height);
            self.chars.push(MemoryChar::new(ch, char_box));
        }
    }

    /// Append a single character.
    pub fn push_char(&mut self, ch: MemoryChar) {
        self.chars.push(ch);
    }

    /// Append an annotation, returning its index.
    pub fn add_annotation(&mut self, annotation: MemoryAnnotation) -> usize {
        self.annotations.push(annotation);
        self.annotations.len() - 1
    }

    /// Add a link that exists in the document independently of synthesis.
    pub fn add_native_link(&mut self, uri: &str, rect: LinkRect) -> LinkHandle {
        let mut annotation = MemoryAnnotation::new(AnnotationSubtype::Link);
        annotation.rect = Some(rect);
        annotation.uri = Some(uri.to_string());
        LinkHandle(self.add_annotation(annotation))
    }

    fn annotation_mut(&mut self, index: usize) -> Result<&mut MemoryAnnotation> {
        let count = self.annotations.len();
        self.annotations
            .get_mut(index)
            .ok_or(PdfError::AnnotationIndexOutOfBounds { index, count })
    }
}

impl Page for MemoryPage {
    type Text = MemoryTextPage;

    fn load_text(&self) -> Result<MemoryTextPage> {
        Ok(MemoryTextPage {
            chars: self.chars.as_slice().into(),
        })
    }

    fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    fn annotation_subtype(&self, index: usize) -> Option<AnnotationSubtype> {
        self.annotations.get(index).map(|a| a.subtype)
    }

    fn attachment_point_count(&self, index: usize) -> usize {
        self.annotations.get(index).map_or(0, |a| a.quads.len())
    }

    fn attachment_points(&self, index: usize, quad_index: usize) -> Option<QuadPoints> {
        self.annotations.get(index)?.quads.get(quad_index).copied()
    }

    fn create_annotation(&mut self, subtype: AnnotationSubtype) -> Result<usize> {
        if subtype == AnnotationSubtype::Unknown {
            return Err(PdfError::AnnotationCreationFailed {
                reason: "cannot create annotation of unknown subtype".to_string(),
            });
        }
        Ok(self.add_annotation(MemoryAnnotation::new(subtype)))
    }

    fn set_annotation_rect(&mut self, index: usize, rect: &LinkRect) -> Result<()> {
        self.annotation_mut(index)?.rect = Some(*rect);
        Ok(())
    }

    fn set_annotation_uri(&mut self, index: usize, uri: &str) -> Result<()> {
        let annotation = self.annotation_mut(index)?;
        if annotation.subtype != AnnotationSubtype::Link {
            return Err(PdfError::AnnotationCreationFailed {
                reason: format!("annotation {} is not a link", index),
            });
        }
        annotation.uri = Some(uri.to_string());
        Ok(())
    }

    fn enumerate_links(&self) -> Vec<LinkHandle> {
        self.annotations
            .iter()
            .enumerate()
            .filter(|(_, a)| a.subtype == AnnotationSubtype::Link)
            .map(|(i, _)| LinkHandle(i))
            .collect()
    }

    fn link_uri(&self, link: LinkHandle) -> Option<String> {
        self.annotations
            .get(link.0)
            .filter(|a| a.subtype == AnnotationSubtype::Link)
            .and_then(|a| a.uri.clone())
    }

    fn link_rect(&self, link: LinkHandle) -> Option<LinkRect> {
        self.annotations
            .get(link.0)
            .filter(|a| a.subtype == AnnotationSubtype::Link)
            .and_then(|a| a.rect)
    }
}

/// A document made of in-memory pages.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<MemoryPage>,
}

impl MemoryDocument {
    /// Create a document from its pages.
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self { pages }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by index.
    ///
    /// # Errors
    ///
    /// [`PdfError::PageNotFound`] if `index` is past the last page.
    pub fn page(&self, index: usize) -> Result<&MemoryPage> {
        let count = self.pages.len();
        self.pages
            .get(index)
            .ok_or(PdfError::PageNotFound { index, count })
    }

    /// Consume the document, returning its pages.
    pub fn into_pages(self) -> Vec<MemoryPage> {
        self.pages
    }
}

/// Engine library stand-in for in-memory documents.
///
/// Holds no resources; it only counts transitions so sessions can be
/// observed.
#[derive(Debug, Default)]
pub struct MemoryLibrary {
    inits: Cell<usize>,
    destroys: Cell<usize>,
}

impl MemoryLibrary {
    /// Number of times the library was initialized.
    pub fn init_count(&self) -> usize {
        self.inits.get()
    }

    /// Number of times the library was destroyed.
    pub fn destroy_count(&self) -> usize {
        self.destroys.get()
    }
}

impl EngineLibrary for MemoryLibrary {
    fn init(&self) {
        debug!("Init in-memory engine");
        self.inits.set(self.inits.get() + 1);
    }

    fn destroy(&self) {
        debug!("Destroy in-memory engine");
        self.destroys.set(self.destroys.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_layout() {
        let page = MemoryPage::from_line("ab", 10.0, 700.0);
        let text = page.load_text().unwrap();
        assert_eq!(text.char_count(), 2);
        assert_eq!(text.char_box(1), Some(CharBox::new(16.0, 22.0, 700.0, 710.0)));
        assert_eq!(text.char_box(2), None);
    }

    #[test]
    fn test_text_units_nul_terminated() {
        let page = MemoryPage::from_line("ab", 10.0, 700.0);
        let text = page.load_text().unwrap();
        assert_eq!(text.text_units(0, 2), vec![0x61, 0x62, 0]);
        assert!(text.text_units(1, 5).is_empty());
    }

    #[test]
    fn test_astral_char_units() {
        let mut page = MemoryPage::new();
        page.push_char(MemoryChar::new('\u{1F600}', CharBox::new(0.0, 1.0, 0.0, 1.0)));
        let text = page.load_text().unwrap();
        assert_eq!(text.text_units(0, 1), vec![0xD83D, 0xDE00, 0]);
    }

    #[test]
    fn test_link_enumeration_covers_created_links() {
        let mut page = MemoryPage::new();
        page.add_annotation(MemoryAnnotation::new(AnnotationSubtype::Underline));
        let native = page.add_native_link(
            "https://a",
            LinkRect {
                left: 0.0,
                top: 1.0,
                right: 1.0,
                bottom: 0.0,
            },
        );
        let created = page.create_annotation(AnnotationSubtype::Link).unwrap();
        page.set_annotation_uri(created, "http://b").unwrap();
        assert_eq!(page.enumerate_links(), vec![native, LinkHandle(created)]);
        assert_eq!(page.link_uri(LinkHandle(created)).as_deref(), Some("http://b"));
        assert_eq!(page.link_uri(LinkHandle(0)), None);
    }

    #[test]
    fn test_document_page_not_found() {
        let doc = MemoryDocument::new(vec![MemoryPage::new()]);
        assert!(doc.page(0).is_ok());
        assert!(matches!(
            doc.page(1),
            Err(PdfError::PageNotFound { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_set_uri_on_non_link_fails() {
        let mut page = MemoryPage::new();
        let index = page.create_annotation(AnnotationSubtype::Highlight).unwrap();
        assert!(page.set_annotation_uri(index, "http://x").is_err());
        let rect = LinkRect {
            left: 0.0,
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
        };
        assert!(page.set_annotation_rect(5, &rect).is_err());
    }
}
