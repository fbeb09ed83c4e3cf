//! Bounds-checked access to a page's characters

use crate::codec::decode_utf16_until_nul;
use crate::engine::TextPage;
use crate::error::{PdfError, Result};
use crate::geometry::CharBox;

/// Text content of a PDF page, as seen by the link scanner.
///
/// Wraps a [`TextPage`] and rejects every out-of-range index before the
/// engine sees it. The character count is read once and held for the
/// lifetime of the wrapper, so the page must not change during a scan.
pub struct PageText<'a, T: TextPage + ?Sized> {
    page: &'a T,
    count: usize,
}

impl<'a, T: TextPage + ?Sized> PageText<'a, T> {
    /// Wrap a text page.
    pub fn new(page: &'a T) -> Self {
        Self {
            page,
            count: page.char_count(),
        }
    }

    /// Get the number of characters on the page.
    pub fn char_count(&self) -> usize {
        self.count
    }

    /// Get text from a specific range of character indices.
    ///
    /// # Arguments
    ///
    /// * `start` - Starting character index (inclusive)
    /// * `count` - Number of characters to extract
    ///
    /// # Errors
    ///
    /// - [`PdfError::CharIndexOutOfBounds`] if the range runs past the page
    /// - [`PdfError::TextExtractionFailed`] if the engine returns nothing
    /// - [`PdfError::Decode`] if the engine returns malformed UTF-16
    pub fn extract(&self, start: usize, count: usize) -> Result<String> {
        if count == 0 {
            return Ok(String::new());
        }
        let end = start.checked_add(count).ok_or(PdfError::CharIndexOutOfBounds {
            index: start,
            count: self.count,
        })?;
        if end > self.count {
            return Err(PdfError::CharIndexOutOfBounds {
                index: end - 1,
                count: self.count,
            });
        }

        let units = self.page.text_units(start, count);
        if units.is_empty() {
            return Err(PdfError::TextExtractionFailed { start, count });
        }

        Ok(decode_utf16_until_nul(&units)?)
    }

    /// Get the bounding box of the character at `index`.
    pub fn char_box(&self, index: usize) -> Result<CharBox> {
        if index >= self.count {
            return Err(PdfError::CharIndexOutOfBounds {
                index,
                count: self.count,
            });
        }
        self.page
            .char_box(index)
            .ok_or(PdfError::CharBoxUnavailable { index })
    }

    /// Check whether the character at `index` is a single ASCII space.
    ///
    /// An empty decode (e.g. a bare NUL from the engine) is not a space.
    pub fn is_space(&self, index: usize) -> Result<bool> {
        Ok(self.extract(index, 1)? == " ")
    }
}
