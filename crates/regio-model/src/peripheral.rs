//! Peripherals: base-addressed register blocks, plus their interrupts.

use serde::{Deserialize, Serialize};

use crate::register::Register;

/// An interrupt line owned by a peripheral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interrupt {
    /// Interrupt name (e.g., "TIM2").
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Position in the device's vector table.
    pub vector: u32,
}

/// A named hardware block's memory-mapped interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peripheral {
    /// Peripheral name (e.g., "GPIOA").
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Absolute base address of the block.
    pub base_address: u64,
    /// Registers, ordered by ascending byte offset. Registers sharing an
    /// offset (aliased views of the same storage) appear adjacently.
    #[serde(default)]
    pub registers: Vec<Register>,
    /// Interrupt lines raised by this peripheral.
    #[serde(default)]
    pub interrupts: Vec<Interrupt>,
}

impl Peripheral {
    /// Look up a register by name.
    pub fn register(&self, name: &str) -> Option<&Register> {
        self.registers.iter().find(|r| r.name == name)
    }
}
