//! The device root: every peripheral of one chip.

use serde::{Deserialize, Serialize};

use crate::peripheral::{Interrupt, Peripheral};

/// A complete chip description: all peripherals of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device name (e.g., "STM32F0xx").
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Peripherals belonging to the device.
    #[serde(default)]
    pub peripherals: Vec<Peripheral>,
}

impl Device {
    /// Look up a peripheral by name.
    pub fn peripheral(&self, name: &str) -> Option<&Peripheral> {
        self.peripherals.iter().find(|p| p.name == name)
    }

    /// All interrupt lines of the device, sorted by ascending vector number
    /// and de-duplicated.
    ///
    /// Several peripherals may declare the same (name, vector) pair when a
    /// line is shared; such exact duplicates collapse to one entry. Two
    /// different names on one vector are both returned, adjacently, so the
    /// vector-table renderer can reject the conflict with context.
    pub fn interrupts(&self) -> Vec<Interrupt> {
        let mut all: Vec<Interrupt> = self
            .peripherals
            .iter()
            .flat_map(|p| p.interrupts.iter().cloned())
            .collect();
        all.sort_by(|a, b| a.vector.cmp(&b.vector).then_with(|| a.name.cmp(&b.name)));
        all.dedup_by(|a, b| a.vector == b.vector && a.name == b.name);
        all
    }
}
