//! Rendering errors.

use regio_layout::LayoutError;
use thiserror::Error;

/// Errors that can occur while rendering output files.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Layout resolution failed for the peripheral being rendered.
    #[error("peripheral '{peripheral}': {source}")]
    Layout {
        peripheral: String,
        #[source]
        source: LayoutError,
    },

    /// Two interrupts with different names claim the same vector slot.
    #[error("interrupts '{first}' and '{second}' both claim vector {vector}")]
    VectorConflict {
        vector: u32,
        first: String,
        second: String,
    },
}
