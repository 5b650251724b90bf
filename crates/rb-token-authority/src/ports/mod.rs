//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `TokenAuthorityApi`
//! - **Driven Ports (Outbound)**: `AssetStore`, `PopularitySource`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
