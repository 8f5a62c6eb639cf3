//! Bitfields: named, contiguous bit runs within a 32-bit register.

use serde::{Deserialize, Serialize};

/// A named constant value a field may hold.
///
/// Enumerated values are documentation only: they annotate the rendered
/// output and never influence the computed layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratedValue {
    /// Constant name (e.g., "DIV4").
    pub name: String,
    /// The constant's integer value.
    pub value: u64,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A named, contiguous run of bits within a 32-bit register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within its register.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Bit position of the field's least significant bit (0..=31).
    pub offset: u32,
    /// Width in bits (1..=32). Invariant: `offset + width <= 32`.
    pub width: u32,
    /// Whether software may read the field.
    pub allow_read: bool,
    /// Whether software may write the field.
    pub allow_write: bool,
    /// Documentation-only named constants.
    #[serde(default)]
    pub enumerated_values: Vec<EnumeratedValue>,
}

impl Field {
    /// One past the field's most significant bit.
    pub fn bit_end(&self) -> u32 {
        self.offset + self.width
    }

    /// A field is read-only when it may be read but never written.
    pub fn is_read_only(&self) -> bool {
        self.allow_read && !self.allow_write
    }
}
