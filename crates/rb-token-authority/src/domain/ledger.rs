//! # Ownership Ledger
//!
//! Who may move an asset, and whether a given move is consistent with the
//! current holder. Holder changes themselves are only ever applied through a
//! [`ChangeSet`](crate::domain::changeset::ChangeSet).
//!
//! An account is authorized for an asset when it is the holding account, the
//! asset's approved delegate, or an operator of the holding account. Escrowed
//! assets authorize nobody.

use crate::domain::entities::{Asset, Holder};
use crate::domain::value_objects::{Address, AssetId};
use crate::errors::AuthorityError;
use crate::ports::outbound::AssetStore;
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// APPROVALS
// =============================================================================

/// Per-asset delegates and per-account operators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Approvals {
    delegates: HashMap<AssetId, Address>,
    operators: HashMap<Address, BTreeSet<Address>>,
}

impl Approvals {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The delegate approved for `asset`, if any.
    #[must_use]
    pub fn delegate(&self, asset: AssetId) -> Option<Address> {
        self.delegates.get(&asset).copied()
    }

    /// Set or clear the delegate of `asset`, returning the previous one.
    pub fn set_delegate(&mut self, asset: AssetId, delegate: Option<Address>) -> Option<Address> {
        match delegate {
            Some(addr) => self.delegates.insert(asset, addr),
            None => self.delegates.remove(&asset),
        }
    }

    /// Returns true if `operator` may act for all of `owner`'s assets.
    #[must_use]
    pub fn is_operator(&self, owner: Address, operator: Address) -> bool {
        self.operators
            .get(&owner)
            .is_some_and(|ops| ops.contains(&operator))
    }

    /// Grant or revoke operator rights.
    pub fn set_operator(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.entry(owner).or_default().insert(operator);
        } else if let Some(ops) = self.operators.get_mut(&owner) {
            ops.remove(&operator);
            if ops.is_empty() {
                self.operators.remove(&owner);
            }
        }
    }
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

/// Returns true if `caller` may act on `asset`.
#[must_use]
pub fn is_authorized_for(approvals: &Approvals, caller: Address, asset: &Asset) -> bool {
    match asset.holder {
        Holder::Account(owner) => {
            owner == caller
                || approvals.delegate(asset.id) == Some(caller)
                || approvals.is_operator(owner, caller)
        }
        Holder::Escrowed { .. } => false,
    }
}

/// Returns true if `caller` may act on the asset with id `asset_id`.
/// Unknown ids authorize nobody.
#[must_use]
pub fn is_authorized<S: AssetStore + ?Sized>(
    store: &S,
    approvals: &Approvals,
    caller: Address,
    asset_id: AssetId,
) -> bool {
    store
        .get(asset_id)
        .is_some_and(|asset| is_authorized_for(approvals, caller, asset))
}

/// Require that `caller` may act on `asset_id`, returning the asset.
///
/// # Errors
///
/// - `AssetNotFound` if the asset does not exist
/// - `NotApproved` if the caller is not authorized
pub fn authorize<'a, S: AssetStore + ?Sized>(
    store: &'a S,
    approvals: &Approvals,
    caller: Address,
    asset_id: AssetId,
) -> Result<&'a Asset, AuthorityError> {
    let asset = store
        .get(asset_id)
        .ok_or(AuthorityError::AssetNotFound(asset_id))?;
    if is_authorized_for(approvals, caller, asset) {
        Ok(asset)
    } else {
        Err(AuthorityError::NotApproved { asset: asset_id })
    }
}

/// Require that `from` is the current holder of `asset`.
///
/// # Errors
///
/// `NotOwner` if the holder differs.
pub fn check_transfer(asset: &Asset, from: Holder) -> Result<(), AuthorityError> {
    if asset.holder == from {
        Ok(())
    } else {
        Err(AuthorityError::NotOwner {
            asset: asset.id,
            kind: asset.kind(),
        })
    }
}

/// Number of live assets held by `owner`. Escrowed assets count for nobody.
#[must_use]
pub fn balance_of<S: AssetStore + ?Sized>(store: &S, owner: Address) -> u64 {
    store
        .assets()
        .filter(|asset| asset.holder.is_account(owner))
        .count() as u64
}

// =============================================================================
// TESTS
// =============================================================================
