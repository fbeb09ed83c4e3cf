//! Engine library lifecycle
//!
//! PDFium must be initialized before any document is opened and torn down
//! after the last one closes. An [`EngineSession`] owns that reference count
//! for its documents instead of sharing a process-wide counter.

use crate::error::{PdfError, Result};
use tracing::{debug, warn};

/// Library-level init/teardown of a document engine
/// (`FPDF_InitLibrary` / `FPDF_DestroyLibrary`).
pub trait EngineLibrary {
    /// Initialize the library.
    fn init(&self);

    /// Release all library resources.
    fn destroy(&self);
}

/// Reference-counted ownership of an initialized engine library.
///
/// # Example
///
/// ```
/// use pdfium_plainlinks::{EngineSession, MemoryLibrary};
///
/// let mut session = EngineSession::new(MemoryLibrary::default());
/// session.acquire();           // initializes the library
/// session.acquire();           // second document, no re-init
/// session.release()?;
/// session.release()?;          // tears the library down
/// assert!(!session.is_initialized());
/// # Ok::<(), pdfium_plainlinks::PdfError>(())
/// ```
pub struct EngineSession<L: EngineLibrary> {
    library: L,
    references: usize,
}

impl<L: EngineLibrary> EngineSession<L> {
    /// Create a session; the library is not initialized until the first
    /// [`acquire`](Self::acquire).
    pub fn new(library: L) -> Self {
        Self {
            library,
            references: 0,
        }
    }

    /// Take a reference, initializing the library on the first one.
    ///
    /// Returns the new reference count.
    pub fn acquire(&mut self) -> usize {
        if self.references == 0 {
            debug!("Init engine library");
            self.library.init();
        }
        self.references += 1;
        self.references
    }

    /// Drop a reference, destroying the library when the last one goes.
    ///
    /// Returns the remaining reference count.
    pub fn release(&mut self) -> Result<usize> {
        if self.references == 0 {
            return Err(PdfError::SessionNotAcquired);
        }
        self.references -= 1;
        if self.references == 0 {
            debug!("Destroy engine library");
            self.library.destroy();
        }
        Ok(self.references)
    }

    /// Current reference count.
    pub fn references(&self) -> usize {
        self.references
    }

    /// Whether the library is currently initialized.
    pub fn is_initialized(&self) -> bool {
        self.references > 0
    }

    /// Get the underlying library.
    pub fn library(&self) -> &L {
        &self.library
    }
}

impl<L: EngineLibrary> Drop for EngineSession<L> {
    fn drop(&mut self) {
        if self.references > 0 {
            warn!(
                references = self.references,
                "Engine session dropped with live references; destroying library"
            );
            self.library.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct CountingLibrary {
        inits: Rc<Cell<usize>>,
        destroys: Rc<Cell<usize>>,
    }

    impl EngineLibrary for CountingLibrary {
        fn init(&self) {
            self.inits.set(self.inits.get() + 1);
        }

        fn destroy(&self) {
            self.destroys.set(self.destroys.get() + 1);
        }
    }

    #[test]
    fn test_init_once_destroy_once() {
        let library = CountingLibrary::default();
        let mut session = EngineSession::new(library.clone());
        assert_eq!(session.acquire(), 1);
        assert_eq!(session.acquire(), 2);
        assert_eq!(library.inits.get(), 1);
        assert_eq!(session.release().unwrap(), 1);
        assert_eq!(library.destroys.get(), 0);
        assert_eq!(session.release().unwrap(), 0);
        assert_eq!(library.destroys.get(), 1);
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_release_without_acquire() {
        let mut session = EngineSession::new(CountingLibrary::default());
        assert!(matches!(
            session.release(),
            Err(PdfError::SessionNotAcquired)
        ));
    }

    #[test]
    fn test_reinit_after_teardown() {
        let library = CountingLibrary::default();
        let mut session = EngineSession::new(library.clone());
        session.acquire();
        session.release().unwrap();
        session.acquire();
        assert_eq!(library.inits.get(), 2);
    }

    #[test]
    fn test_drop_with_live_references_destroys() {
        let library = CountingLibrary::default();
        {
            let mut session = EngineSession::new(library.clone());
            session.acquire();
        }
        assert_eq!(library.destroys.get(), 1);
    }
}
