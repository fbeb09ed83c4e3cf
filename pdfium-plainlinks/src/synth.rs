//! Page link synthesis
//!
//! Turns plain-text URLs into link annotations, then enumerates every link
//! on the page (native and synthesized) for the caller.

use crate::config::LinkSynthesisConfig;
use crate::engine::{AnnotationSubtype, LinkHandle, Page};
use crate::error::{PdfError, Result};
use crate::resolver::{LinkSpan, LinkSpanResolver};
use crate::text::PageText;
use serde::Serialize;
use tracing::{debug, warn};

/// A link annotation created from plain text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticLink {
    /// The character span the link covers.
    pub span: LinkSpan,
    /// The span's text, used as the link URI.
    pub uri: String,
    /// Index of the created annotation on the page.
    pub annotation_index: usize,
}

/// Outcome of [`synthesize_and_enumerate_links`].
#[derive(Debug)]
pub struct LinkSynthesis {
    /// Links created during this call, in page order.
    pub created: Vec<SyntheticLink>,
    /// Every link on the page after synthesis, native ones included.
    pub links: Vec<LinkHandle>,
    /// The error that cut the scan short, if any. Links created before it
    /// are kept.
    pub diagnostic: Option<PdfError>,
}

impl LinkSynthesis {
    /// Whether the whole page was scanned without error.
    pub fn is_complete(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Create link annotations for every plain-text occurrence of the configured
/// target on `page`, then return all links on the page.
///
/// A failure while scanning (malformed text, engine extraction failure)
/// stops the scan and is reported in [`LinkSynthesis::diagnostic`]; links
/// found before it and the page's native links are still returned.
///
/// # Errors
///
/// Only an invalid `config` fails the call.
///
/// # Example
///
/// ```
/// use pdfium_plainlinks::{synthesize_and_enumerate_links, LinkSynthesisConfig, MemoryPage};
///
/// let mut page = MemoryPage::from_line("visit http://x.io today", 72.0, 700.0);
/// let result = synthesize_and_enumerate_links(&mut page, &LinkSynthesisConfig::default())?;
/// assert_eq!(result.created[0].uri, "http://x.io");
/// assert_eq!(result.links.len(), 1);
/// # Ok::<(), pdfium_plainlinks::PdfError>(())
/// ```
pub fn synthesize_and_enumerate_links<P: Page>(
    page: &mut P,
    config: &LinkSynthesisConfig,
) -> Result<LinkSynthesis> {
    config.validate()?;

    let mut created = Vec::new();
    let diagnostic = match synthesize_links(page, config, &mut created) {
        Ok(()) => None,
        Err(e) => {
            warn!(
                error = %e,
                created = created.len(),
                "Plain text link scan stopped early"
            );
            Some(e)
        }
    };

    let links = page.enumerate_links();
    debug!(
        created = created.len(),
        total = links.len(),
        "Enumerated page links"
    );

    Ok(LinkSynthesis {
        created,
        links,
        diagnostic,
    })
}

fn synthesize_links<P: Page>(
    page: &mut P,
    config: &LinkSynthesisConfig,
    created: &mut Vec<SyntheticLink>,
) -> Result<()> {
    let text_page = page.load_text()?;
    let text = PageText::new(&text_page);
    let resolver =
        LinkSpanResolver::with_threshold(&text, config.target(), config.discontinuity_threshold())?;

    let count = text.char_count();
    let mut cursor = 0;
    while cursor < count {
        let Some(span) = resolver.resolve(cursor)? else {
            break;
        };

        if span.is_link() {
            let uri = text.extract(span.start, span.char_count())?;
            let annotation_index = page.create_annotation(AnnotationSubtype::Link)?;
            page.set_annotation_rect(annotation_index, &span.rect)?;
            page.set_annotation_uri(annotation_index, &uri)?;
            debug!(%uri, annotation_index, "Created plain text link");
            created.push(SyntheticLink {
                span,
                uri,
                annotation_index,
            });
        }

        // The next search starts after this span, so the cursor strictly
        // increases and the loop ends within `count` iterations.
        cursor = span.end + 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPage;

    #[test]
    fn test_two_links_on_one_line() {
        let mut page = MemoryPage::from_line("a http://b.c and http://d.e end", 10.0, 700.0);
        let result = synthesize_and_enumerate_links(&mut page, &LinkSynthesisConfig::default())
            .unwrap();
        let uris: Vec<_> = result.created.iter().map(|l| l.uri.as_str()).collect();
        assert_eq!(uris, vec!["http://b.c", "http://d.e"]);
        assert_eq!(result.links.len(), 2);
        assert!(result.is_complete());
    }

    #[test]
    fn test_no_match_keeps_native_links() {
        let mut page = MemoryPage::from_line("nothing to see", 10.0, 700.0);
        page.add_native_link(
            "https://example.com",
            crate::LinkRect {
                left: 0.0,
                top: 20.0,
                right: 50.0,
                bottom: 0.0,
            },
        );
        let result = synthesize_and_enumerate_links(&mut page, &LinkSynthesisConfig::default())
            .unwrap();
        assert!(result.created.is_empty());
        assert_eq!(result.links.len(), 1);
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut page = MemoryPage::from_line("http://x", 10.0, 700.0);
        let config = LinkSynthesisConfig::new().set_target("");
        assert!(synthesize_and_enumerate_links(&mut page, &config).is_err());
    }

    #[test]
    fn test_created_annotation_carries_rect_and_uri() {
        let mut page = MemoryPage::from_line("http://x.io", 10.0, 700.0);
        let result = synthesize_and_enumerate_links(&mut page, &LinkSynthesisConfig::default())
            .unwrap();
        let link = result.links[0];
        assert_eq!(page.link_uri(link).as_deref(), Some("http://x.io"));
        assert_eq!(page.link_rect(link), Some(result.created[0].span.rect));
    }
}
