//! Register block resolution: placing registers within a peripheral.

use regio_model::{Register, REGISTER_BYTES};

use crate::error::LayoutError;

/// One 4-byte-granular slot in a peripheral's memory layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<'a> {
    /// `count` consecutive words of address space with no backing register.
    Reserved(u32),
    /// A single register at its offset.
    Occupied(&'a Register),
    /// Two or more registers sharing one offset: mutually exclusive aliased
    /// views of the same 4 bytes.
    Union(Vec<&'a Register>),
}

/// Place a peripheral's registers into a contiguous slot sequence.
///
/// Registers must arrive sorted by ascending byte offset, with aliased
/// registers (equal offsets) adjacent; the description reader establishes
/// this order and the resolver re-checks it rather than re-sorting. A running
/// cursor starts at the first register's offset and advances one word per
/// register; the word gap between cursor and each register's offset decides
/// the slot:
///
/// - a positive gap inserts a [`Slot::Reserved`] run before the register,
/// - a zero gap appends the register contiguously,
/// - a gap of exactly one word backwards means the register aliases the
///   previous one, so the last slot is replaced by (or extended as) a
///   [`Slot::Union`],
/// - anything further backwards lands on address space already laid out and
///   fails with [`LayoutError::InconsistentBlock`].
///
/// Offsets not reachable by a whole number of words fail with
/// [`LayoutError::Misaligned`].
pub fn resolve_block(registers: &[Register]) -> Result<Vec<Slot<'_>>, LayoutError> {
    let mut slots: Vec<Slot<'_>> = Vec::with_capacity(registers.len());
    let Some(first) = registers.first() else {
        return Ok(slots);
    };

    let mut cursor: u32 = first.offset;
    for register in registers {
        let delta = i64::from(register.offset) - i64::from(cursor);
        if delta % i64::from(REGISTER_BYTES) != 0 {
            return Err(LayoutError::Misaligned {
                register: register.name.clone(),
                offset: register.offset,
                cursor,
            });
        }

        let gap = delta / i64::from(REGISTER_BYTES);
        if gap > 0 {
            slots.push(Slot::Reserved(gap as u32));
            slots.push(Slot::Occupied(register));
        } else if gap == 0 {
            slots.push(Slot::Occupied(register));
        } else if gap == -1 {
            // Same offset as the previous register: replace the last slot
            // with a union holding both views.
            match slots.pop() {
                Some(Slot::Occupied(previous)) => {
                    slots.push(Slot::Union(vec![previous, register]));
                }
                Some(Slot::Union(mut members)) => {
                    members.push(register);
                    slots.push(Slot::Union(members));
                }
                Some(Slot::Reserved(_)) | None => {
                    // A register cannot coincide with padding.
                    return Err(LayoutError::InconsistentBlock {
                        register: register.name.clone(),
                        offset: register.offset,
                        cursor,
                    });
                }
            }
        } else {
            // Offset reaches back past the previous register, into a
            // reserved gap or an older slot: contradictory input.
            return Err(LayoutError::InconsistentBlock {
                register: register.name.clone(),
                offset: register.offset,
                cursor,
            });
        }

        cursor = register.offset + REGISTER_BYTES;
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, offset: u32) -> Register {
        Register {
            name: name.into(),
            description: String::new(),
            offset,
            fields: Vec::new(),
        }
    }

    #[test]
    fn empty_block_resolves_to_nothing() {
        assert_eq!(resolve_block(&[]).unwrap(), Vec::new());
    }

    #[test]
    fn contiguous_registers_occupy_in_order() {
        let regs = vec![register("A", 0x0), register("B", 0x4)];
        let slots = resolve_block(&regs).unwrap();
        assert_eq!(
            slots,
            vec![Slot::Occupied(&regs[0]), Slot::Occupied(&regs[1])]
        );
    }

    #[test]
    fn gap_becomes_reserved_run() {
        let regs = vec![register("A", 0x0), register("B", 0x4), register("C", 0x10)];
        let slots = resolve_block(&regs).unwrap();
        assert_eq!(
            slots,
            vec![
                Slot::Occupied(&regs[0]),
                Slot::Occupied(&regs[1]),
                Slot::Reserved(3),
                Slot::Occupied(&regs[2]),
            ]
        );
    }

    #[test]
    fn block_need_not_start_at_zero() {
        let regs = vec![register("A", 0x20), register("B", 0x28)];
        let slots = resolve_block(&regs).unwrap();
        assert_eq!(
            slots,
            vec![
                Slot::Occupied(&regs[0]),
                Slot::Reserved(1),
                Slot::Occupied(&regs[1]),
            ]
        );
    }

    #[test]
    fn shared_offset_forms_union() {
        let regs = vec![register("CTRL_A", 0x0), register("CTRL_B", 0x0)];
        let slots = resolve_block(&regs).unwrap();
        assert_eq!(slots, vec![Slot::Union(vec![&regs[0], &regs[1]])]);
    }

    #[test]
    fn three_way_union_extends_the_group() {
        let regs = vec![
            register("TX", 0x8),
            register("RX", 0x8),
            register("DR", 0x8),
            register("SR", 0xc),
        ];
        let slots = resolve_block(&regs).unwrap();
        assert_eq!(
            slots,
            vec![
                Slot::Union(vec![&regs[0], &regs[1], &regs[2]]),
                Slot::Occupied(&regs[3]),
            ]
        );
    }

    #[test]
    fn misaligned_offset_fails() {
        let regs = vec![register("A", 0x0), register("B", 0x6)];
        let err = resolve_block(&regs).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Misaligned {
                register: "B".into(),
                offset: 0x6,
                cursor: 0x4,
            }
        );
    }

    #[test]
    fn offset_inside_reserved_gap_fails() {
        let regs = vec![register("A", 0x0), register("B", 0x10), register("C", 0x8)];
        let err = resolve_block(&regs).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InconsistentBlock {
                register: "C".into(),
                offset: 0x8,
                cursor: 0x14,
            }
        );
    }

    #[test]
    fn aliasing_a_non_adjacent_register_fails() {
        let regs = vec![register("A", 0x0), register("B", 0x4), register("C", 0x0)];
        assert!(matches!(
            resolve_block(&regs).unwrap_err(),
            LayoutError::InconsistentBlock { .. }
        ));
    }

    #[test]
    fn resolution_is_deterministic() {
        let regs = vec![register("A", 0x0), register("B", 0x0), register("C", 0xc)];
        assert_eq!(resolve_block(&regs).unwrap(), resolve_block(&regs).unwrap());
    }
}
