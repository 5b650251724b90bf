//! # Role Validator
//!
//! Pure, read-only checks of an asset's kind and role against a band slot.
//! Slots are always evaluated in [`Slot::ALL`] order and the first failure
//! is the one reported.

use crate::domain::value_objects::{ArtistRole, AssetId, AssetKind, Lineup, Slot};
use crate::errors::AuthorityError;
use crate::ports::outbound::AssetStore;
use serde::{Deserialize, Serialize};

/// How a slot referencing an unminted id is judged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmintedSlotPolicy {
    /// Read the id as the zero record: an artist with role `Vocalist`.
    ///
    /// The vocalist slot then passes validation and the missing asset is
    /// reported by authorization; any other slot fails its role check.
    #[default]
    ZeroRecord,
    /// Fail with `AssetNotFound` immediately.
    Reject,
}

/// Kind and role of the zero record.
const ZERO_RECORD: (AssetKind, Option<ArtistRole>) = (AssetKind::Artist, Some(ArtistRole::Vocalist));

/// Check that `asset_id` can fill `slot`.
///
/// # Errors
///
/// - `AssetNotFound` if the id is unminted and the policy is `Reject`
/// - `WrongKind` if the asset is not an artist
/// - `WrongRole` if the artist's role differs from the slot's
pub fn validate_slot<S: AssetStore + ?Sized>(
    store: &S,
    asset_id: AssetId,
    slot: Slot,
    unminted: UnmintedSlotPolicy,
) -> Result<(), AuthorityError> {
    let (kind, role) = match (store.get(asset_id), unminted) {
        (Some(asset), _) => (asset.kind(), asset.role()),
        (None, UnmintedSlotPolicy::ZeroRecord) => ZERO_RECORD,
        (None, UnmintedSlotPolicy::Reject) => return Err(AuthorityError::AssetNotFound(asset_id)),
    };

    if kind != AssetKind::Artist {
        return Err(AuthorityError::WrongKind { slot });
    }
    if role != Some(slot.role()) {
        return Err(AuthorityError::WrongRole {
            slot,
            expected: slot.role(),
        });
    }
    Ok(())
}

/// Validate all five slots of `lineup`, stopping at the first failure.
///
/// # Errors
///
/// The first error [`validate_slot`] returns, in slot order.
pub fn validate_lineup<S: AssetStore + ?Sized>(
    store: &S,
    lineup: &Lineup,
    unminted: UnmintedSlotPolicy,
) -> Result<(), AuthorityError> {
    lineup
        .slots()
        .try_for_each(|(slot, id)| validate_slot(store, id, slot, unminted))
}

// =============================================================================
// TESTS
// =============================================================================
