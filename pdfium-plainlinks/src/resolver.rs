//! Link span resolution
//!
//! Finds the next occurrence of a target prefix (e.g. `"http"`) in a page's
//! character stream and decides where the link that starts there ends:
//!
//! 1. Scan forward from the cursor for an exact match of the target.
//! 2. Walk forward from the match to the first geometric jump (or the last
//!    character of the page); that is the end of the visual run.
//! 3. If the run contains a space after the match start, the link stops just
//!    before the first one; otherwise it runs to the end of the visual run.
//! 4. The link rectangle is the merge of the first and last character boxes.

use crate::boundary::{is_discontinuous, DEFAULT_DISCONTINUITY_THRESHOLD};
use crate::engine::TextPage;
use crate::error::{PdfError, Result};
use crate::geometry::LinkRect;
use crate::text::PageText;
use serde::Serialize;
use tracing::{debug, trace};

/// A resolved region of text believed to be one link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkSpan {
    /// Index of the first character (the start of the target match).
    pub start: usize,
    /// Index of the last character of the link (inclusive).
    pub end: usize,
    /// Merge of the start and end character boxes.
    pub rect: LinkRect,
}

impl LinkSpan {
    /// Number of characters in the span. A span whose `end` lies before its
    /// `start` counts as one character.
    pub fn char_count(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// Whether the span is long enough to become a link annotation.
    pub fn is_link(&self) -> bool {
        self.end > self.start
    }
}

/// Resolves link spans for one target over one page.
pub struct LinkSpanResolver<'t, 'p, T: TextPage + ?Sized> {
    text: &'t PageText<'p, T>,
    target: &'t str,
    target_len: usize,
    threshold: f64,
}

impl<'t, 'p, T: TextPage + ?Sized> LinkSpanResolver<'t, 'p, T> {
    /// Create a resolver using the default discontinuity threshold.
    ///
    /// # Errors
    ///
    /// [`PdfError::InvalidParameter`] if `target` is empty.
    pub fn new(text: &'t PageText<'p, T>, target: &'t str) -> Result<Self> {
        Self::with_threshold(text, target, DEFAULT_DISCONTINUITY_THRESHOLD)
    }

    /// Create a resolver with an explicit discontinuity threshold.
    pub fn with_threshold(
        text: &'t PageText<'p, T>,
        target: &'t str,
        threshold: f64,
    ) -> Result<Self> {
        if target.is_empty() {
            return Err(PdfError::InvalidParameter(
                "link target must not be empty".to_string(),
            ));
        }
        Ok(Self {
            text,
            target,
            target_len: target.chars().count(),
            threshold,
        })
    }

    /// Resolve the first link span starting at or after `cursor`.
    ///
    /// Returns `Ok(None)` once no further match exists; this is the
    /// "`(N, N)`" end-of-scan signal. Identical inputs always give identical
    /// results.
    pub fn resolve(&self, cursor: usize) -> Result<Option<LinkSpan>> {
        let count = self.text.char_count();
        let Some(last_start) = count.checked_sub(self.target_len) else {
            return Ok(None);
        };

        for start in cursor..=last_start {
            if self.text.extract(start, self.target_len)? == self.target {
                debug!(start, target = self.target, "Plain text link found");
                return self.span_from(start).map(Some);
            }
        }

        debug!(cursor, "No more plain text links found");
        Ok(None)
    }

    fn span_from(&self, start: usize) -> Result<LinkSpan> {
        let start_box = self.text.char_box(start)?;
        let run_end = self.run_end(start)?;
        let end = self.trim_at_space(start, run_end)?;
        let end_box = self.text.char_box(end)?;
        let rect = start_box.merge(&end_box);

        debug!(
            start,
            end,
            left = rect.left,
            top = rect.top,
            right = rect.right,
            bottom = rect.bottom,
            "Resolved link span"
        );
        Ok(LinkSpan { start, end, rect })
    }

    /// Last index of the visual run containing `start`.
    fn run_end(&self, start: usize) -> Result<usize> {
        // `start < count` holds because a full target match begins there.
        let last = self.text.char_count() - 1;
        for index in start..last {
            if is_discontinuous(self.text, index, self.threshold)? {
                debug!(index, "Character place jump");
                return Ok(index);
            }
            trace!(index, "Index is near previous character");
        }
        Ok(last)
    }

    /// Stop the link before the first space after `start`, if any.
    ///
    /// `run_end` itself is checked too, so a space that ends a visual run
    /// never becomes part of the link.
    fn trim_at_space(&self, start: usize, run_end: usize) -> Result<usize> {
        for index in start + 1..=run_end {
            if self.text.is_space(index)? {
                debug!(index, "Space character found, ending link before it");
                return Ok(index - 1);
            }
        }
        Ok(run_end)
    }
}
