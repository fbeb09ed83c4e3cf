//! Page-coordinate geometry: character boxes, link rectangles and
//! annotation quads.

use serde::{Deserialize, Serialize};

/// Bounding box of one character in page coordinates.
///
/// PDF convention: `top > bottom` and `right > left` for a single glyph, but
/// nothing is monotonic across characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharBox {
    /// Left edge in page coordinates.
    pub left: f64,
    /// Right edge in page coordinates.
    pub right: f64,
    /// Bottom edge in page coordinates.
    pub bottom: f64,
    /// Top edge in page coordinates.
    pub top: f64,
}

impl CharBox {
    /// Create a box from its four edges.
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// True if any edge moved by more than `threshold` between this box and
    /// `next`.
    pub fn jumps_to(&self, next: &CharBox, threshold: f64) -> bool {
        (self.left - next.left).abs() > threshold
            || (self.right - next.right).abs() > threshold
            || (self.bottom - next.bottom).abs() > threshold
            || (self.top - next.top).abs() > threshold
    }

    /// Rectangle spanning this box and `other`.
    ///
    /// Only the two boxes are considered; characters in between are not.
    pub fn merge(&self, other: &CharBox) -> LinkRect {
        LinkRect {
            left: self.left.min(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }
}

/// A bounding rectangle for a link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkRect {
    /// Left edge in page coordinates.
    pub left: f64,
    /// Top edge in page coordinates.
    pub top: f64,
    /// Right edge in page coordinates.
    pub right: f64,
    /// Bottom edge in page coordinates.
    pub bottom: f64,
}

/// Attachment quadrilateral of a markup annotation.
///
/// Corner order follows the engine: `(x1, y1)`..`(x4, y4)`, with `x1`/`y1`
/// the lower bound and `x3`/`y3` the upper bound used for containment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadPoints {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub x3: f32,
    pub y3: f32,
    pub x4: f32,
    pub y4: f32,
}

impl QuadPoints {
    /// Axis-aligned quad covering `left..right` by `bottom..top`.
    pub fn from_bounds(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            x1: left,
            y1: bottom,
            x2: right,
            y2: bottom,
            x3: right,
            y3: top,
            x4: left,
            y4: top,
        }
    }

    /// Whether `char_box` lies inside the quad's horizontal and vertical
    /// span. Boundaries count as inside.
    pub fn contains(&self, char_box: &CharBox) -> bool {
        char_box.left >= f64::from(self.x1)
            && char_box.right <= f64::from(self.x3)
            && char_box.bottom >= f64::from(self.y1)
            && char_box.top <= f64::from(self.y3)
    }
}
