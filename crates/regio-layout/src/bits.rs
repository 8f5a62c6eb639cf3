//! Bitfield layout resolution: packing one register's fields into 32 bits.

use regio_model::{Field, Register, REGISTER_BITS};

use crate::error::LayoutError;

/// One segment of a register's packed bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitSegment<'a> {
    /// Anonymous padding covering bits no field claims.
    Pad {
        /// Width of the padding run in bits, always non-zero.
        width: u32,
    },
    /// A declared field at its position in the packing order.
    Field(&'a Field),
}

impl BitSegment<'_> {
    /// Width of the segment in bits.
    pub fn width(&self) -> u32 {
        match self {
            BitSegment::Pad { width } => *width,
            BitSegment::Field(field) => field.width,
        }
    }
}

/// Pack a register's fields into a fully padded 32-bit layout.
///
/// Walks the fields in ascending bit order with a running cursor, emitting a
/// [`BitSegment::Pad`] for every gap between fields and a trailing pad up to
/// bit 32. The output always covers exactly 32 bits; pads are emitted only
/// with non-zero width.
///
/// Fails with [`LayoutError::FieldOverlap`] when a field starts below the
/// cursor (the description declares overlapping bit ranges) and with
/// [`LayoutError::RegisterOverflow`] when the fields extend past bit 32.
pub fn resolve_bits(register: &Register) -> Result<Vec<BitSegment<'_>>, LayoutError> {
    let mut segments = Vec::with_capacity(register.fields.len() + 1);
    let mut cursor: u32 = 0;

    for field in &register.fields {
        if field.offset > cursor {
            segments.push(BitSegment::Pad {
                width: field.offset - cursor,
            });
        } else if field.offset < cursor {
            return Err(LayoutError::FieldOverlap {
                register: register.name.clone(),
                field: field.name.clone(),
                offset: field.offset,
                cursor,
            });
        }
        segments.push(BitSegment::Field(field));
        cursor = field.bit_end();
    }

    if cursor > REGISTER_BITS {
        return Err(LayoutError::RegisterOverflow {
            register: register.name.clone(),
            bits: cursor,
        });
    }
    if cursor < REGISTER_BITS {
        segments.push(BitSegment::Pad {
            width: REGISTER_BITS - cursor,
        });
    }

    Ok(segments)
}
