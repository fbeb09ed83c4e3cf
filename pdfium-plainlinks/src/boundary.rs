//! Run-boundary detection between adjacent characters.
//!
//! A "jump" between characters `i` and `i + 1` is any edge of their boxes
//! moving by more than a tolerance. It fires on line ends, column breaks and
//! unrelated text blocks, and is deliberately coarse: it can both miss a
//! break (short lines) and fire inside one run (large glyphs).

use crate::engine::TextPage;
use crate::error::Result;
use crate::text::PageText;

/// Default tolerance in page-coordinate units.
pub const DEFAULT_DISCONTINUITY_THRESHOLD: f64 = 50.0;

/// Check whether the boxes of characters `index` and `index + 1` differ by
/// more than `threshold` on any edge.
///
/// Both indices must be on the page; asking about the last character is an
/// out-of-range error, not `false`.
pub fn is_discontinuous<T: TextPage + ?Sized>(
    text: &PageText<'_, T>,
    index: usize,
    threshold: f64,
) -> Result<bool> {
    let current = text.char_box(index)?;
    let next = text.char_box(index + 1)?;
    Ok(current.jumps_to(&next, threshold))
}
