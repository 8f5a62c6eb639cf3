//! Layout resolution for register maps.
//!
//! Two pure functions form the core of header generation:
//!
//! - [`resolve_bits`] packs one register's fields into a gap-padded bit
//!   layout spanning exactly 32 bits.
//! - [`resolve_block`] places a peripheral's registers into a byte-contiguous
//!   slot sequence, inserting reserved padding for address gaps and grouping
//!   registers that share an offset into aliased unions.
//!
//! [`resolve_peripheral`] bundles both per peripheral. Resolution either
//! completes deterministically or fails fast with a classified
//! [`LayoutError`]; no partial layout is ever produced, and a failure in one
//! peripheral never affects siblings (nothing is shared between invocations).

pub mod bits;
pub mod block;
pub mod error;
pub mod naming;
pub mod resolve;

pub use bits::{resolve_bits, BitSegment};
pub use block::{resolve_block, Slot};
pub use error::LayoutError;
pub use naming::{common_prefix_len, union_naming, UnionNaming};
pub use resolve::{resolve_peripheral, PeripheralLayout, RegisterLayout};
