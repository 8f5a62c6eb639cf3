//! CLI command implementations.

pub mod batch;
pub mod check;
pub mod generate;
pub mod handlers;
pub mod list;
