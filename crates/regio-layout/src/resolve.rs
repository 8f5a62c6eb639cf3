//! Whole-peripheral resolution: slots plus per-register bit layouts.

use regio_model::Peripheral;

use crate::bits::{resolve_bits, BitSegment};
use crate::block::{resolve_block, Slot};
use crate::error::LayoutError;

/// One register's resolved bit packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterLayout<'a> {
    /// The register the segments describe.
    pub register: &'a regio_model::Register,
    /// Packed segments covering exactly 32 bits.
    pub segments: Vec<BitSegment<'a>>,
}

/// A peripheral's complete resolved layout, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeripheralLayout<'a> {
    /// The peripheral the layout describes.
    pub peripheral: &'a Peripheral,
    /// Byte-level slot sequence from the first register to the last.
    pub slots: Vec<Slot<'a>>,
    /// Bit layouts, one per register, in declaration order.
    pub registers: Vec<RegisterLayout<'a>>,
}

impl<'a> PeripheralLayout<'a> {
    /// The resolved bit segments of a register, by name.
    pub fn bits(&self, register_name: &str) -> Option<&[BitSegment<'a>]> {
        self.registers
            .iter()
            .find(|r| r.register.name == register_name)
            .map(|r| r.segments.as_slice())
    }
}

/// Resolve one peripheral completely, or fail without partial output.
///
/// Both the block placement and every register's bit packing must succeed;
/// the first failure aborts the whole peripheral so the renderer never sees
/// a half-resolved layout.
pub fn resolve_peripheral(peripheral: &Peripheral) -> Result<PeripheralLayout<'_>, LayoutError> {
    let slots = resolve_block(&peripheral.registers)?;
    let registers = peripheral
        .registers
        .iter()
        .map(|register| {
            Ok(RegisterLayout {
                register,
                segments: resolve_bits(register)?,
            })
        })
        .collect::<Result<Vec<_>, LayoutError>>()?;

    Ok(PeripheralLayout {
        peripheral,
        slots,
        registers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use regio_model::{Field, Register};

    fn field(name: &str, offset: u32, width: u32) -> Field {
        Field {
            name: name.into(),
            description: String::new(),
            offset,
            width,
            allow_read: true,
            allow_write: true,
            enumerated_values: Vec::new(),
        }
    }

    fn register(name: &str, offset: u32, fields: Vec<Field>) -> Register {
        Register {
            name: name.into(),
            description: String::new(),
            offset,
            fields,
        }
    }

    fn peripheral(registers: Vec<Register>) -> Peripheral {
        Peripheral {
            name: "UART".into(),
            description: "Test block".into(),
            base_address: 0x4000_0000,
            registers,
            interrupts: Vec::new(),
        }
    }

    #[test]
    fn resolves_slots_and_bits_together() {
        let p = peripheral(vec![
            register("CR", 0x0, vec![field("EN", 0, 1)]),
            register("SR", 0x8, vec![field("BUSY", 0, 1)]),
        ]);
        let layout = resolve_peripheral(&p).unwrap();
        assert_eq!(layout.slots.len(), 3); // CR, reserved, SR
        assert_eq!(layout.registers.len(), 2);
        let cr_bits = layout.bits("CR").unwrap();
        assert_eq!(cr_bits.iter().map(|s| s.width()).sum::<u32>(), 32);
        assert!(layout.bits("DR").is_none());
    }

    #[test]
    fn bad_register_aborts_whole_peripheral() {
        let p = peripheral(vec![
            register("CR", 0x0, vec![field("EN", 0, 1)]),
            register("BAD", 0x4, vec![field("A", 0, 20), field("B", 20, 20)]),
        ]);
        let err = resolve_peripheral(&p).unwrap_err();
        assert_eq!(
            err,
            LayoutError::RegisterOverflow {
                register: "BAD".into(),
                bits: 40,
            }
        );
    }

    #[test]
    fn sibling_peripherals_are_independent() {
        let good = peripheral(vec![register("CR", 0x0, Vec::new())]);
        let bad = peripheral(vec![register("CR", 0x0, Vec::new()), register("X", 0x6, Vec::new())]);
        assert!(resolve_peripheral(&bad).is_err());
        assert!(resolve_peripheral(&good).is_ok());
    }
}
