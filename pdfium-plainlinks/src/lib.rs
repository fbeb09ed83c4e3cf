//! # pdfium-plainlinks
//!
//! Plain-text hyperlink synthesis and underline matching over PDFium text
//! pages.
//!
//! Many PDFs print URLs as ordinary text with no link annotation behind
//! them. This crate scans a page's character stream for a link prefix
//! (`"http"` by default), uses character geometry to decide where each link
//! ends, and writes a link annotation over it so viewers can treat it like
//! any other link. It also answers whether a character sits under an
//! underline annotation.
//!
//! The document engine is reached through the [`Page`] and [`TextPage`]
//! traits. [`MemoryPage`] implements them over plain data for tests and
//! fixtures.
//!
//! ## Quick Start
//!
//! ```
//! use pdfium_plainlinks::{
//!     is_character_underlined, synthesize_and_enumerate_links, LinkSynthesisConfig, MemoryPage,
//!     Page,
//! };
//!
//! let mut page = MemoryPage::from_line("docs at http://x.io today", 72.0, 700.0);
//!
//! let result = synthesize_and_enumerate_links(&mut page, &LinkSynthesisConfig::default())?;
//! for link in &result.links {
//!     println!("{:?} -> {:?}", page.link_uri(*link), page.link_rect(*link));
//! }
//!
//! assert!(!is_character_underlined(&page, 0)?);
//! # Ok::<(), pdfium_plainlinks::PdfError>(())
//! ```

mod boundary;
mod codec;
mod config;
mod engine;
mod error;
mod fixture;
mod geometry;
mod memory;
mod resolver;
mod session;
mod synth;
mod text;
mod underline;

pub use boundary::{is_discontinuous, DEFAULT_DISCONTINUITY_THRESHOLD};
pub use codec::{decode_utf16, decode_utf16_until_nul, DecodeError};
pub use config::{LinkSynthesisConfig, DEFAULT_LINK_TARGET, DEFAULT_MAX_QUADS_PER_ANNOTATION};
pub use engine::{AnnotationSubtype, LinkHandle, Page, TextPage};
pub use error::{PdfError, Result};
pub use fixture::{
    load_document, AnnotationFixture, CharFixture, DocumentFixture, LineFixture, LinkFixture,
    PageFixture,
};
pub use geometry::{CharBox, LinkRect, QuadPoints};
pub use memory::{
    MemoryAnnotation, MemoryChar, MemoryDocument, MemoryLibrary, MemoryPage, MemoryTextPage,
    DEFAULT_ADVANCE, DEFAULT_CHAR_HEIGHT,
};
pub use resolver::{LinkSpan, LinkSpanResolver};
pub use session::{EngineLibrary, EngineSession};
pub use synth::{synthesize_and_enumerate_links, LinkSynthesis, SyntheticLink};
pub use text::PageText;
pub use underline::{is_character_underlined, is_character_underlined_with_limit};
