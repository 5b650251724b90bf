//! # Domain Invariants
//!
//! Whole-store consistency checks for escrow and band composition. The
//! service runs them after each commit when `verify_invariants` is set;
//! tests run them after every scenario.
//!
//! - Every band is held by an account, never by escrow.
//! - Every band member exists, is an artist with its slot's role, and is
//!   escrowed for exactly that band.
//! - Every escrowed asset points at a live band that lists it.

use crate::domain::entities::Holder;
use crate::domain::value_objects::{AssetId, Slot};
use crate::ports::outbound::AssetStore;
use std::fmt;

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A band is held by escrow.
    BandInEscrow { band: AssetId },
    /// A band member is missing from the store.
    MemberMissing { band: AssetId, slot: Slot, member: AssetId },
    /// A band member is not an artist of the slot's role.
    MemberMismatch { band: AssetId, slot: Slot, member: AssetId },
    /// A band member is not escrowed for that band.
    MemberNotEscrowed { band: AssetId, member: AssetId },
    /// An escrowed asset names a band that does not list it.
    OrphanedEscrow { asset: AssetId, band: AssetId },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BandInEscrow { band } => write!(f, "band {band} is held by escrow"),
            Self::MemberMissing { band, slot, member } => {
                write!(f, "band {band}: {slot} member {member} does not exist")
            }
            Self::MemberMismatch { band, slot, member } => {
                write!(f, "band {band}: {slot} member {member} cannot fill the slot")
            }
            Self::MemberNotEscrowed { band, member } => {
                write!(f, "band {band}: member {member} is not escrowed for it")
            }
            Self::OrphanedEscrow { asset, band } => {
                write!(f, "asset {asset} is escrowed for {band}, which does not list it")
            }
        }
    }
}

/// Check every escrow and composition invariant over the whole store.
#[must_use]
pub fn check_escrow_invariant<S: AssetStore + ?Sized>(store: &S) -> InvariantCheckResult {
    let mut violations = Vec::new();

    for asset in store.assets() {
        if let Some(profile) = asset.band() {
            if asset.holder.is_escrowed() {
                violations.push(InvariantViolation::BandInEscrow { band: asset.id });
            }
            for (slot, member_id) in profile.lineup.slots() {
                let Some(member) = store.get(member_id) else {
                    violations.push(InvariantViolation::MemberMissing {
                        band: asset.id,
                        slot,
                        member: member_id,
                    });
                    continue;
                };
                if member.role() != Some(slot.role()) {
                    violations.push(InvariantViolation::MemberMismatch {
                        band: asset.id,
                        slot,
                        member: member_id,
                    });
                }
                if member.holder != (Holder::Escrowed { band: asset.id }) {
                    violations.push(InvariantViolation::MemberNotEscrowed {
                        band: asset.id,
                        member: member_id,
                    });
                }
            }
        }

        if let Holder::Escrowed { band } = asset.holder {
            let listed = store
                .get(band)
                .and_then(|b| b.band())
                .is_some_and(|profile| profile.lineup.contains(asset.id));
            if !listed {
                violations.push(InvariantViolation::OrphanedEscrow {
                    asset: asset.id,
                    band,
                });
            }
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// TESTS
// =============================================================================
