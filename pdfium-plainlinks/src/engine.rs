//! Contracts with the underlying document engine.
//!
//! The link synthesizer and underline matcher only ever talk to the engine
//! through these traits. A PDFium-backed page implements them over
//! `FPDF_TEXTPAGE` / `FPDF_PAGE` handles; [`crate::MemoryPage`] implements
//! them over plain data.

use crate::error::Result;
use crate::geometry::{CharBox, LinkRect, QuadPoints};
use serde::{Deserialize, Serialize};

/// Types of PDF annotations the synthesizer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationSubtype {
    /// Unknown annotation type
    Unknown,
    /// Text note annotation (sticky note)
    Text,
    /// Link annotation
    Link,
    /// Free text annotation (text box)
    FreeText,
    /// Square/rectangle annotation
    Square,
    /// Highlight annotation
    Highlight,
    /// Underline annotation
    Underline,
    /// Squiggly underline annotation
    Squiggly,
    /// Strikeout annotation
    Strikeout,
    /// Popup annotation
    Popup,
    /// Widget annotation (form field)
    Widget,
}

/// Opaque handle to a link object on a page.
///
/// Covers both links already present in the document and links created by
/// [`crate::synthesize_and_enumerate_links`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkHandle(pub usize);

/// Character stream of one page (`FPDF_TEXTPAGE`).
///
/// Indices are 0-based and only valid below [`TextPage::char_count`].
/// Callers must never pass an index at or past the end; [`crate::PageText`]
/// enforces that before calling in.
pub trait TextPage {
    /// Number of characters on the page.
    fn char_count(&self) -> usize;

    /// UTF-16 units for `count` characters starting at `start`
    /// (`FPDFText_GetText`). The buffer may carry a trailing NUL. An empty
    /// buffer means the engine retrieved nothing.
    fn text_units(&self, start: usize, count: usize) -> Vec<u16>;

    /// Bounding box of one character (`FPDFText_GetCharBox`).
    fn char_box(&self, index: usize) -> Option<CharBox>;
}

/// A loaded page with its annotation list (`FPDF_PAGE`).
pub trait Page {
    /// Text page type produced by [`Page::load_text`].
    type Text: TextPage;

    /// Load the page's character stream.
    fn load_text(&self) -> Result<Self::Text>;

    /// Number of annotations on the page.
    fn annotation_count(&self) -> usize;

    /// Subtype of the annotation at `index`, or `None` if the engine could
    /// not open it.
    fn annotation_subtype(&self, index: usize) -> Option<AnnotationSubtype>;

    /// Number of attachment quads on the annotation at `index`.
    fn attachment_point_count(&self, index: usize) -> usize;

    /// Check if the annotation at `index` has attachment points.
    fn has_attachment_points(&self, index: usize) -> bool {
        self.attachment_point_count(index) > 0
    }

    /// Attachment quad `quad_index` of the annotation at `index`.
    fn attachment_points(&self, index: usize, quad_index: usize) -> Option<QuadPoints>;

    /// Append a new annotation of `subtype`, returning its index.
    fn create_annotation(&mut self, subtype: AnnotationSubtype) -> Result<usize>;

    /// Set the rectangle of the annotation at `index`.
    fn set_annotation_rect(&mut self, index: usize, rect: &LinkRect) -> Result<()>;

    /// Attach a URI action to the annotation at `index`.
    fn set_annotation_uri(&mut self, index: usize, uri: &str) -> Result<()>;

    /// All link objects on the page, in document order (`FPDFLink_Enumerate`).
    fn enumerate_links(&self) -> Vec<LinkHandle>;

    /// URI target of a link, if it has one.
    fn link_uri(&self, link: LinkHandle) -> Option<String>;

    /// Annotation rectangle of a link.
    fn link_rect(&self, link: LinkHandle) -> Option<LinkRect>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_subtype_names() {
        let subtype: AnnotationSubtype = serde_json::from_str(r#""underline""#).unwrap();
        assert_eq!(subtype, AnnotationSubtype::Underline);
        assert_eq!(
            serde_json::to_string(&AnnotationSubtype::FreeText).unwrap(),
            r#""freetext""#
        );
    }
}
