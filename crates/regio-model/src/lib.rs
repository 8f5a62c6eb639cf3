//! Entity model for hardware register maps.
//!
//! A [`Device`] is a tree of memory-mapped [`Peripheral`]s, each a
//! base-addressed collection of 32-bit [`Register`]s, each a packed set of
//! [`Field`]s. The model is produced once by a description reader (see the
//! `regio-svd` crate), is immutable from then on, and is consumed by the
//! layout resolver and the renderers.

pub mod device;
pub mod field;
pub mod peripheral;
pub mod register;
pub mod validate;

pub use device::Device;
pub use field::{EnumeratedValue, Field};
pub use peripheral::{Interrupt, Peripheral};
pub use register::Register;
pub use validate::{validate_device, validate_peripheral, Severity, ValidationIssue};

/// Width of every register, in bits.
pub const REGISTER_BITS: u32 = 32;

/// Width of every register, in bytes.
pub const REGISTER_BYTES: u32 = 4;
