//! Structural validation of device descriptions.
//!
//! The description reader is expected to hand over well-formed entities; the
//! checks here re-verify the structural preconditions the layout resolver
//! relies on and surface everything suspicious in one pass, so a user can fix
//! a broken description without replaying it error by error.

use std::collections::HashSet;

use crate::device::Device;
use crate::peripheral::Peripheral;
use crate::{REGISTER_BITS, REGISTER_BYTES};

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The description violates a layout precondition; generation will fail.
    Error,
    /// Questionable but generable.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A validation finding.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity of the finding.
    pub severity: Severity,
    /// Human-readable description locating the offending entry.
    pub message: String,
}

impl ValidationIssue {
    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }
}

/// Validate one peripheral's registers and fields.
///
/// Returns `Ok(())` if structurally sound, or `Err(issues)` with every
/// problem found.
pub fn validate_peripheral(peripheral: &Peripheral) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    check_peripheral(peripheral, &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate an entire device.
pub fn validate_device(device: &Device) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let mut peripheral_names = HashSet::new();
    for peripheral in &device.peripherals {
        if !peripheral_names.insert(peripheral.name.as_str()) {
            issues.push(ValidationIssue::error(format!(
                "duplicate peripheral name '{}'",
                peripheral.name
            )));
        }
        check_peripheral(peripheral, &mut issues);
    }

    // Interrupt vectors must be unique across the device.
    let irqs = device.interrupts();
    for pair in irqs.windows(2) {
        if pair[0].vector == pair[1].vector {
            issues.push(ValidationIssue::error(format!(
                "interrupts '{}' and '{}' both claim vector {}",
                pair[0].name, pair[1].name, pair[0].vector
            )));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_peripheral(peripheral: &Peripheral, issues: &mut Vec<ValidationIssue>) {
    let mut register_names = HashSet::new();
    let mut previous_offset: Option<u32> = None;

    for register in &peripheral.registers {
        let location = format!("{}.{}", peripheral.name, register.name);

        if !register_names.insert(register.name.as_str()) {
            issues.push(ValidationIssue::error(format!(
                "duplicate register name '{location}'"
            )));
        }

        if register.offset % REGISTER_BYTES != 0 {
            issues.push(ValidationIssue::error(format!(
                "register '{location}' offset 0x{:x} is not word-aligned",
                register.offset
            )));
        }

        // Equal offsets are allowed: aliased views of the same storage.
        if let Some(prev) = previous_offset {
            if register.offset < prev {
                issues.push(ValidationIssue::error(format!(
                    "register '{location}' at 0x{:x} is out of order (previous register at 0x{prev:x})",
                    register.offset
                )));
            }
        }
        previous_offset = Some(register.offset);

        check_fields(&location, register, issues);
    }

    if peripheral.registers.is_empty() {
        issues.push(ValidationIssue::warning(format!(
            "peripheral '{}' has no registers",
            peripheral.name
        )));
    }
}

fn check_fields(
    location: &str,
    register: &crate::register::Register,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut field_names = HashSet::new();
    let mut previous_end: u32 = 0;

    for field in &register.fields {
        if !field_names.insert(field.name.as_str()) {
            issues.push(ValidationIssue::error(format!(
                "duplicate field name '{location}.{}'",
                field.name
            )));
        }

        if field.width == 0 {
            issues.push(ValidationIssue::error(format!(
                "field '{location}.{}' has zero width",
                field.name
            )));
        }

        if field.bit_end() > REGISTER_BITS {
            issues.push(ValidationIssue::error(format!(
                "field '{location}.{}' spans bits {}..{} beyond the 32-bit register",
                field.name,
                field.offset,
                field.bit_end()
            )));
        }

        if field.offset < previous_end {
            issues.push(ValidationIssue::error(format!(
                "field '{location}.{}' at bit {} overlaps the preceding field ending at bit {previous_end}",
                field.name, field.offset
            )));
        }
        previous_end = previous_end.max(field.bit_end());

        if !field.allow_read && !field.allow_write {
            issues.push(ValidationIssue::warning(format!(
                "field '{location}.{}' is neither readable nor writable",
                field.name
            )));
        }
    }
}
