//! Clipboard used by the share prompt.
//!
//! Copied text is always kept in an internal buffer. With the
//! `system-clipboard` feature it is also pushed to the OS clipboard
//! through arboard.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::debug;

/// Clipboard errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The system clipboard rejected the operation.
    #[error("System clipboard unavailable")]
    SystemUnavailable,
    /// The internal buffer lock was poisoned.
    #[error("Failed to acquire clipboard lock")]
    LockFailed,
}

/// Clipboard handle. Clones share the same internal buffer.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    internal: Arc<Mutex<String>>,
}

impl Clipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies text to the clipboard.
    ///
    /// The internal buffer is updated even when the system clipboard fails.
    ///
    /// # Errors
    /// Returns `LockFailed` if the internal buffer is poisoned, or
    /// `SystemUnavailable` if the system clipboard could not be written.
    pub fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        {
            let mut internal = self.internal.lock().map_err(|_| ClipboardError::LockFailed)?;
            text.clone_into(&mut internal);
        }
        debug!("[CLIPBOARD] Copied {} bytes", text.len());

        #[cfg(feature = "system-clipboard")]
        {
            let mut system =
                arboard::Clipboard::new().map_err(|_| ClipboardError::SystemUnavailable)?;
            system
                .set_text(text.to_string())
                .map_err(|_| ClipboardError::SystemUnavailable)?;
        }

        Ok(())
    }

    /// Returns the clipboard text, preferring the system clipboard.
    ///
    /// # Errors
    /// Returns `LockFailed` if the internal buffer is poisoned.
    pub fn paste(&self) -> Result<String, ClipboardError> {
        #[cfg(feature = "system-clipboard")]
        {
            if let Ok(text) = arboard::Clipboard::new().and_then(|mut c| c.get_text()) {
                return Ok(text);
            }
        }

        self.internal
            .lock()
            .map(|internal| internal.clone())
            .map_err(|_| ClipboardError::LockFailed)
    }

    /// Checks if the internal buffer has content.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.internal.lock().is_ok_and(|internal| !internal.is_empty())
    }
}
