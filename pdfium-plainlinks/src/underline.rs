//! Underline detection for individual characters

use crate::config::DEFAULT_MAX_QUADS_PER_ANNOTATION;
use crate::engine::{AnnotationSubtype, Page};
use crate::error::Result;
use crate::geometry::CharBox;
use crate::text::PageText;
use tracing::{debug, trace};

/// Check whether the character at `char_index` sits inside an underline
/// annotation's attachment quads.
///
/// Looks at up to 8 quads per annotation. See
/// [`is_character_underlined_with_limit`].
pub fn is_character_underlined<P: Page>(page: &P, char_index: usize) -> Result<bool> {
    is_character_underlined_with_limit(page, char_index, DEFAULT_MAX_QUADS_PER_ANNOTATION)
}

/// Check whether the character at `char_index` sits inside an underline
/// annotation, examining at most `max_quads` quads per annotation.
///
/// Annotations that cannot be opened, are not underlines, or carry no
/// attachment points are skipped. Containment is boundary-inclusive.
///
/// # Errors
///
/// [`crate::PdfError::CharIndexOutOfBounds`] if `char_index` is not on the
/// page. The index is checked only once an underline candidate is found,
/// matching the point where the character box is first needed.
pub fn is_character_underlined_with_limit<P: Page>(
    page: &P,
    char_index: usize,
    max_quads: usize,
) -> Result<bool> {
    let annotation_count = page.annotation_count();
    debug!(annotation_count, char_index, "Checking underline annotations");

    let mut cached_box: Option<CharBox> = None;
    for index in 0..annotation_count {
        if page.annotation_subtype(index) != Some(AnnotationSubtype::Underline) {
            continue;
        }
        if !page.has_attachment_points(index) {
            continue;
        }

        let char_box = match cached_box {
            Some(b) => b,
            None => {
                let text_page = page.load_text()?;
                let b = PageText::new(&text_page).char_box(char_index)?;
                cached_box = Some(b);
                b
            }
        };

        let quad_count = page.attachment_point_count(index).min(max_quads);
        for quad_index in 0..quad_count {
            let Some(quad) = page.attachment_points(index, quad_index) else {
                continue;
            };
            trace!(
                x1 = quad.x1,
                x3 = quad.x3,
                y1 = quad.y1,
                y3 = quad.y3,
                left = char_box.left,
                right = char_box.right,
                bottom = char_box.bottom,
                top = char_box.top,
                "Comparing char box with quad"
            );
            if quad.contains(&char_box) {
                debug!(char_index, annotation = index, "Underlined character found");
                return Ok(true);
            }
        }
    }

    Ok(false)
}
