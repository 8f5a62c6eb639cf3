//! Layout resolution errors.
//!
//! Every variant is terminal for the affected peripheral: the resolver stops
//! at the first contradiction and hands nothing to the renderer. Messages
//! carry the register name and the computed positions so the offending entry
//! can be located in the source description.

use thiserror::Error;

/// Errors that can occur while resolving a register or peripheral layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Two fields in a register claim overlapping bit ranges.
    #[error("register '{register}': field '{field}' starts at bit {offset} but bits up to {cursor} are already occupied")]
    FieldOverlap {
        register: String,
        field: String,
        offset: u32,
        cursor: u32,
    },

    /// A register's fields extend past bit 32.
    #[error("register '{register}': fields occupy {bits} bits, more than the 32 available")]
    RegisterOverflow { register: String, bits: u32 },

    /// A register's offset is not a whole number of words from the cursor.
    #[error("register '{register}' at offset {offset:#x} is not word-aligned relative to offset {cursor:#x}")]
    Misaligned {
        register: String,
        offset: u32,
        cursor: u32,
    },

    /// A register's offset lands on address space already consumed by a
    /// reserved gap or an earlier register.
    #[error("register '{register}' at offset {offset:#x} falls inside address space already laid out (cursor {cursor:#x})")]
    InconsistentBlock {
        register: String,
        offset: u32,
        cursor: u32,
    },
}
