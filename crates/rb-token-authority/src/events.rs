//! # Event Schema
//!
//! Events describing committed state transitions. An operation's events are
//! appended to the log only after its change set has been applied, so a
//! rejected operation never leaves events behind.

use crate::domain::changeset::StateChange;
use crate::domain::entities::Holder;
use crate::domain::value_objects::{Address, AssetId, Lineup};
use serde::{Deserialize, Serialize};

/// A committed state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthorityEvent {
    /// Custody changed. `from: None` is a mint, `to: None` is a burn.
    Transfer {
        /// Previous holder.
        from: Option<Holder>,
        /// New holder.
        to: Option<Holder>,
        /// Asset moved.
        asset: AssetId,
    },
    /// A delegate was set or cleared.
    Approval {
        /// Holding account.
        owner: Address,
        /// New delegate.
        approved: Option<Address>,
        /// Asset concerned.
        asset: AssetId,
    },
    /// Operator rights changed.
    ApprovalForAll {
        /// Account granting rights.
        owner: Address,
        /// Account receiving rights.
        operator: Address,
        /// Granted or revoked.
        approved: bool,
    },
    /// A band was formed.
    BandFormed {
        /// New band id.
        band: AssetId,
        /// Forming account.
        owner: Address,
        /// Escrowed members.
        lineup: Lineup,
    },
    /// A band was disbanded.
    BandDisbanded {
        /// Retired band id.
        band: AssetId,
        /// Account receiving the members.
        owner: Address,
    },
}

impl AuthorityEvent {
    /// Transfer event for an applied change.
    ///
    /// `destroyed_holder` supplies the last holder of a destroyed asset.
    #[must_use]
    pub fn from_change(change: &StateChange, destroyed_holder: Option<Holder>) -> Self {
        match change {
            StateChange::Transfer { asset, from, to } => Self::Transfer {
                from: Some(*from),
                to: Some(*to),
                asset: *asset,
            },
            StateChange::Create(asset) => Self::Transfer {
                from: None,
                to: Some(asset.holder),
                asset: asset.id,
            },
            StateChange::Destroy(asset) => Self::Transfer {
                from: destroyed_holder,
                to: None,
                asset: *asset,
            },
        }
    }

    /// Returns true for mint/burn/transfer events.
    #[must_use]
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer { .. })
    }
}
