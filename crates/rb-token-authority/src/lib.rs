//! # RB Token Authority - Band Composition Engine
//!
//! ## Purpose
//!
//! Owns every Rockburg asset (artists, venues, studios, bands) and the two
//! composite operations over them: forming a band escrows five role-matched
//! artists, disbanding it burns the band and releases the five artists.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Live band ⇔ its five members are escrowed under it | `domain/invariants.rs` - `check_escrow_invariant()` |
//! | Escrowed assets authorize nobody | `domain/ledger.rs` - `is_authorized_for()` |
//! | Slot order: vocalist, lead, rhythm, bass, drums | `domain/validator.rs` - `validate_lineup()` |
//! | Rejected operations change nothing | `domain/changeset.rs` - `ChangeSet::apply()` |
//! | Asset ids are never reused | `ports/outbound.rs` - `AssetStore::remove()` |
//! | One mutation at a time | `service.rs` - `TokenAuthorityService` write guard |
//!
//! ## Check Order
//!
//! | Step | Failure |
//! |------|---------|
//! | 1. Slot kinds and roles, in slot order | `WrongKind`, `WrongRole` |
//! | 2. Authorization per id, in slot order | `AssetNotFound`, `NotApproved` |
//! | 3. Staged escrow and band mint | nothing is written on any failure |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose | Default Adapter |
//! |-------|---------|-----------------|
//! | `AssetStore` | Asset records and id counter | `InMemoryAssetStore` |
//! | `PopularitySource` | `fan_count` / `buzz_points` draws | `SeededPopularity` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use rb_token_authority::prelude::*;
//!
//! let authority = TokenAuthorityService::new(AuthorityConfig::from_env());
//! let band = authority
//!     .form_band(caller, "Amazing band", "Blues", Lineup::new(1, 2, 3, 4, 5))
//!     .await?;
//! authority.disband_band(caller, band).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{Asset, AssetDetails, BandProfile, BandView, Holder};

    // Value objects
    pub use crate::domain::value_objects::{
        Address, ArtistRole, AssetId, AssetKind, Lineup, Popularity, Slot,
    };

    // Domain logic
    pub use crate::domain::changeset::{ChangeSet, StateChange};
    pub use crate::domain::invariants::{
        check_escrow_invariant, InvariantCheckResult, InvariantViolation,
    };
    pub use crate::domain::ledger::Approvals;
    pub use crate::domain::validator::{validate_lineup, validate_slot, UnmintedSlotPolicy};

    // Ports
    pub use crate::ports::inbound::TokenAuthorityApi;
    pub use crate::ports::outbound::{AssetStore, PopularitySource};

    // Adapters
    pub use crate::adapters::{FixedPopularity, InMemoryAssetStore, SeededPopularity};

    // Service
    pub use crate::config::{AuthorityConfig, ConfigError};
    pub use crate::events::AuthorityEvent;
    pub use crate::service::{create_test_service, ServiceStats, TokenAuthorityService};

    // Errors
    pub use crate::errors::{AuthorityError, ErrorKind, StoreError};
}

// =============================================================================
// CRATE METADATA
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
