//! Renderers turning resolved layouts into C++ source text.
//!
//! The layout crate decides *where* everything goes; this crate only prints.
//! [`render_peripheral`] produces a memory-mapped peripheral definition
//! header and [`render_handlers`] the interrupt vector-table setup file. A
//! layout failure aborts rendering of the affected peripheral; no partial
//! text is ever returned.

pub mod error;
pub mod handlers;
pub mod header;

pub use error::EmitError;
pub use handlers::render_handlers;
pub use header::{render_peripheral, RenderedHeader};
