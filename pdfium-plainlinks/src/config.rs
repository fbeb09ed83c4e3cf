//! Link synthesis configuration

use crate::boundary::DEFAULT_DISCONTINUITY_THRESHOLD;
use crate::error::{PdfError, Result};
use serde::{Deserialize, Serialize};

/// Default link prefix searched for in page text.
pub const DEFAULT_LINK_TARGET: &str = "http";

/// Default number of attachment quads examined per underline annotation.
pub const DEFAULT_MAX_QUADS_PER_ANNOTATION: usize = 8;

/// Configuration for plain-text link synthesis.
///
/// # Example
///
/// ```
/// use pdfium_plainlinks::LinkSynthesisConfig;
///
/// let config = LinkSynthesisConfig::new()
///     .set_target("www.")
///     .set_discontinuity_threshold(30.0);
/// assert_eq!(config.target(), "www.");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSynthesisConfig {
    target: String,
    discontinuity_threshold: f64,
    max_quads_per_annotation: usize,
}

impl Default for LinkSynthesisConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_LINK_TARGET.to_string(),
            discontinuity_threshold: DEFAULT_DISCONTINUITY_THRESHOLD,
            max_quads_per_annotation: DEFAULT_MAX_QUADS_PER_ANNOTATION,
        }
    }
}

impl LinkSynthesisConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the substring that marks the start of a link.
    ///
    /// Default: `"http"`
    pub fn set_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the box-edge tolerance used to detect run boundaries.
    ///
    /// Default: 50 page-coordinate units
    pub fn set_discontinuity_threshold(mut self, threshold: f64) -> Self {
        self.discontinuity_threshold = threshold;
        self
    }

    /// Set how many attachment quads are checked per underline annotation.
    ///
    /// Default: 8
    pub fn set_max_quads_per_annotation(mut self, max_quads: usize) -> Self {
        self.max_quads_per_annotation = max_quads;
        self
    }

    /// Get the link target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the discontinuity threshold.
    pub fn discontinuity_threshold(&self) -> f64 {
        self.discontinuity_threshold
    }

    /// Get the per-annotation quad limit.
    pub fn max_quads_per_annotation(&self) -> usize {
        self.max_quads_per_annotation
    }

    /// Check the configuration before a scan.
    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(PdfError::InvalidParameter(
                "link target must not be empty".to_string(),
            ));
        }
        if self.discontinuity_threshold.is_nan() || self.discontinuity_threshold < 0.0 {
            return Err(PdfError::InvalidParameter(format!(
                "discontinuity threshold must be non-negative, got {}",
                self.discontinuity_threshold
            )));
        }
        Ok(())
    }
}
