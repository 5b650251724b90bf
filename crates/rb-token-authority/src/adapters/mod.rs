//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.

pub mod memory_store;
pub mod popularity;

pub use memory_store::*;
pub use popularity::*;
