//! Registers: 4-byte addressable units containing bitfields.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::REGISTER_BYTES;

/// A named 4-byte addressable unit within a peripheral.
///
/// `fields` are ordered by ascending bit offset and are pairwise
/// non-overlapping; the description reader establishes this ordering and
/// [`crate::validate::validate_peripheral`] re-checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Register name, unique within its peripheral.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Byte offset within the peripheral block, a multiple of 4.
    pub offset: u32,
    /// Bitfields, ordered by ascending bit offset.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Register {
    /// Byte offset one past the register's storage.
    pub fn byte_end(&self) -> u32 {
        self.offset + REGISTER_BYTES
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
