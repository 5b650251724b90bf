//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the token authority.
//! NO I/O, NO async. Storage is reached only through the `AssetStore` port,
//! which callers pass in explicitly.

pub mod changeset;
pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod validator;
pub mod value_objects;

pub use changeset::*;
pub use entities::*;
pub use invariants::*;
pub use ledger::*;
pub use validator::*;
pub use value_objects::*;
