//! # Change Sets
//!
//! Multi-asset operations are staged as an ordered list of [`StateChange`]s
//! and applied together. Application keeps an undo journal; if any change
//! fails, everything already applied is reverted before the error is returned,
//! so the store and approvals end up exactly as they started.

use crate::domain::entities::{Asset, Holder};
use crate::domain::ledger::{check_transfer, Approvals};
use crate::domain::value_objects::{Address, AssetId};
use crate::errors::AuthorityError;
use crate::ports::outbound::AssetStore;
use serde::{Deserialize, Serialize};
use tracing::error;

/// One staged mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// Move `asset` from `from` to `to`. Clears the asset's delegate.
    Transfer {
        /// Asset to move.
        asset: AssetId,
        /// Expected current holder.
        from: Holder,
        /// New holder.
        to: Holder,
    },
    /// Insert a new asset.
    Create(Asset),
    /// Remove an asset. Clears its delegate.
    Destroy(AssetId),
}

/// Journal entry to revert one applied change.
#[derive(Debug)]
enum Undo {
    Transfer {
        asset: AssetId,
        previous: Holder,
        delegate: Option<Address>,
    },
    Create(AssetId),
    Destroy {
        asset: Asset,
        delegate: Option<Address>,
    },
}

/// An ordered batch of mutations applied all-or-nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<StateChange>,
}

impl ChangeSet {
    /// Empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a transfer.
    pub fn transfer(&mut self, asset: AssetId, from: Holder, to: Holder) -> &mut Self {
        self.changes.push(StateChange::Transfer { asset, from, to });
        self
    }

    /// Stage a creation.
    pub fn create(&mut self, asset: Asset) -> &mut Self {
        self.changes.push(StateChange::Create(asset));
        self
    }

    /// Stage a destruction.
    pub fn destroy(&mut self, asset: AssetId) -> &mut Self {
        self.changes.push(StateChange::Destroy(asset));
        self
    }

    /// Staged changes in order.
    #[must_use]
    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    /// Number of staged changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Apply every change in order, or none of them.
    ///
    /// On success returns the applied changes.
    ///
    /// # Errors
    ///
    /// The first failure, after all earlier changes have been reverted:
    /// - `AssetNotFound` if a transfer or destroy names a missing asset
    /// - `NotOwner` if a transfer's `from` is not the current holder
    /// - `Store` if the store rejects a creation
    pub fn apply<S: AssetStore + ?Sized>(
        self,
        store: &mut S,
        approvals: &mut Approvals,
    ) -> Result<Vec<StateChange>, AuthorityError> {
        let mut journal = Vec::with_capacity(self.changes.len());

        for change in &self.changes {
            match apply_one(change, store, approvals) {
                Ok(undo) => journal.push(undo),
                Err(err) => {
                    rollback(journal, store, approvals);
                    return Err(err);
                }
            }
        }

        Ok(self.changes)
    }
}

fn apply_one<S: AssetStore + ?Sized>(
    change: &StateChange,
    store: &mut S,
    approvals: &mut Approvals,
) -> Result<Undo, AuthorityError> {
    match change {
        StateChange::Transfer { asset, from, to } => {
            let current = store
                .get(*asset)
                .ok_or(AuthorityError::AssetNotFound(*asset))?;
            check_transfer(current, *from)?;
            let previous = store.set_holder(*asset, *to)?;
            let delegate = approvals.set_delegate(*asset, None);
            Ok(Undo::Transfer {
                asset: *asset,
                previous,
                delegate,
            })
        }
        StateChange::Create(asset) => {
            store.insert(asset.clone())?;
            Ok(Undo::Create(asset.id))
        }
        StateChange::Destroy(id) => {
            if !store.contains(*id) {
                return Err(AuthorityError::AssetNotFound(*id));
            }
            let asset = store.remove(*id)?;
            let delegate = approvals.set_delegate(*id, None);
            Ok(Undo::Destroy { asset, delegate })
        }
    }
}

fn rollback<S: AssetStore + ?Sized>(journal: Vec<Undo>, store: &mut S, approvals: &mut Approvals) {
    for undo in journal.into_iter().rev() {
        let restored = match undo {
            Undo::Transfer {
                asset,
                previous,
                delegate,
            } => {
                approvals.set_delegate(asset, delegate);
                store.set_holder(asset, previous).map(drop)
            }
            Undo::Create(id) => store.rollback_insert(id).map(drop),
            Undo::Destroy { asset, delegate } => {
                approvals.set_delegate(asset.id, delegate);
                store.restore(asset)
            }
        };
        if let Err(err) = restored {
            error!(error = %err, "change set rollback step failed");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
