//! # Error Types
//!
//! Every rejection is synchronous and aborts the whole operation with no
//! partial effect. `Display` strings are part of the caller contract.

use crate::domain::value_objects::{ArtistRole, AssetId, AssetKind, Slot};
use thiserror::Error;

// =============================================================================
// AUTHORITY ERRORS
// =============================================================================

/// Errors returned by the token authority.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// No asset exists with this id.
    #[error("token does not exist: {0}")]
    AssetNotFound(AssetId),

    /// A slot references an asset that is not an artist.
    #[error("{slot} is not an artist")]
    WrongKind {
        /// Offending slot.
        slot: Slot,
    },

    /// A slot references an artist with the wrong role.
    #[error("{slot} is not a {expected}")]
    WrongRole {
        /// Offending slot.
        slot: Slot,
        /// Role the slot requires.
        expected: ArtistRole,
    },

    /// `from` is not the current holder of the asset.
    #[error("{}", not_owner_message(.kind))]
    NotOwner {
        /// Asset being moved or dissolved.
        asset: AssetId,
        /// Kind of that asset.
        kind: AssetKind,
    },

    /// Caller is neither holder, approved delegate, nor operator.
    #[error("transfer caller is not owner nor approved")]
    NotApproved {
        /// Asset the caller tried to act on.
        asset: AssetId,
    },

    /// The asset exists but is not a band.
    #[error("token is not a band")]
    NotABand(AssetId),

    /// An account tried to make itself its own operator.
    #[error("approve to caller")]
    ApproveToCaller,

    /// An approval named the asset's current holder.
    #[error("approval to current owner")]
    ApprovalToCurrentOwner(AssetId),

    /// Storage adapter failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

fn not_owner_message(kind: &AssetKind) -> &'static str {
    match kind {
        AssetKind::Band => "You don't own the band",
        _ => "transfer of token that is not own",
    }
}

/// Class of an [`AuthorityError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`AuthorityError::AssetNotFound`].
    AssetNotFound,
    /// See [`AuthorityError::WrongKind`].
    WrongKind,
    /// See [`AuthorityError::WrongRole`].
    WrongRole,
    /// See [`AuthorityError::NotOwner`].
    NotOwner,
    /// See [`AuthorityError::NotApproved`].
    NotApproved,
    /// See [`AuthorityError::NotABand`].
    NotABand,
    /// Approval misuse.
    InvalidApproval,
    /// See [`AuthorityError::Store`].
    Store,
}

impl AuthorityError {
    /// The class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AssetNotFound(_) => ErrorKind::AssetNotFound,
            Self::WrongKind { .. } => ErrorKind::WrongKind,
            Self::WrongRole { .. } => ErrorKind::WrongRole,
            Self::NotOwner { .. } => ErrorKind::NotOwner,
            Self::NotApproved { .. } => ErrorKind::NotApproved,
            Self::NotABand(_) => ErrorKind::NotABand,
            Self::ApproveToCaller | Self::ApprovalToCurrentOwner(_) => ErrorKind::InvalidApproval,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    /// The slot this error is about, for validation failures.
    #[must_use]
    pub fn slot(&self) -> Option<Slot> {
        match self {
            Self::WrongKind { slot } | Self::WrongRole { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    /// Returns true for authorization failures (as opposed to malformed input).
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotOwner { .. } | Self::NotApproved { .. })
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from an [`AssetStore`](crate::ports::outbound::AssetStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The id is not present.
    #[error("asset {0} missing from store")]
    Missing(AssetId),

    /// The id is already present or was not the next to assign.
    #[error("asset {0} cannot be inserted: id taken or out of sequence")]
    Duplicate(AssetId),

    /// The id space is used up.
    #[error("asset id space exhausted")]
    IdsExhausted,
}

// =============================================================================
// TESTS
// =============================================================================
