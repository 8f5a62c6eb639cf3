//! CMSIS-SVD reader.
//!
//! Parses the XML hardware description format published by silicon vendors
//! into the `regio-model` entity tree. The reader is the component that
//! guarantees the ordering preconditions of the layout resolver: registers
//! leave here sorted by ascending offset (stable, so aliased registers keep
//! document order) and fields by ascending bit offset.

pub mod error;
pub mod reader;

pub use error::SvdError;
pub use reader::{load_device, parse_device};
