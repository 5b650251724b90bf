//! # Core Domain Entities
//!
//! Asset records and the holder model. A band is an asset whose details carry
//! its frozen lineup; everything else about it is an ordinary asset.

use crate::domain::value_objects::{Address, ArtistRole, AssetId, AssetKind, Lineup, Popularity};
use serde::{Deserialize, Serialize};

// =============================================================================
// HOLDER
// =============================================================================

/// Current custodian of an asset.
///
/// Escrow is its own variant rather than a reserved `Address`, so an escrowed
/// artist can never be mistaken for one held by an account.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Holder {
    /// Held by an external account.
    Account(Address),
    /// Locked by the authority for the lifetime of `band`.
    Escrowed {
        /// The band whose formation escrowed this asset.
        band: AssetId,
    },
}

impl Holder {
    /// The holding account, if not escrowed.
    #[must_use]
    pub const fn account(&self) -> Option<Address> {
        match self {
            Self::Account(addr) => Some(*addr),
            Self::Escrowed { .. } => None,
        }
    }

    /// Returns true if held by `addr`.
    #[must_use]
    pub fn is_account(&self, addr: Address) -> bool {
        self.account() == Some(addr)
    }

    /// Returns true if escrowed.
    #[must_use]
    pub const fn is_escrowed(&self) -> bool {
        matches!(self, Self::Escrowed { .. })
    }
}

// =============================================================================
// ASSET
// =============================================================================

/// Kind-specific attributes. All immutable once the asset exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetDetails {
    /// Musician.
    Artist {
        /// Slot this artist can fill.
        role: ArtistRole,
    },
    /// Venue.
    Venue {
        /// Free-text location.
        location: String,
    },
    /// Studio.
    Studio,
    /// Composite asset.
    Band(BandProfile),
}

/// Attributes frozen into a band at formation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandProfile {
    /// Free-text genre label.
    pub band_type: String,
    /// Cosmetic score fixed at creation.
    pub fan_count: Popularity,
    /// Cosmetic score fixed at creation.
    pub buzz_points: Popularity,
    /// The five escrowed members.
    pub lineup: Lineup,
}

/// A record in the asset registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique, never reused.
    pub id: AssetId,
    /// Free-text name.
    pub name: String,
    /// Current custodian. Mutated only by applying a change set.
    pub holder: Holder,
    /// Kind-specific attributes.
    pub details: AssetDetails,
}

impl Asset {
    /// Type tag derived from the details.
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        match self.details {
            AssetDetails::Artist { .. } => AssetKind::Artist,
            AssetDetails::Venue { .. } => AssetKind::Venue,
            AssetDetails::Studio => AssetKind::Studio,
            AssetDetails::Band(_) => AssetKind::Band,
        }
    }

    /// Artist role, if this is an artist.
    #[must_use]
    pub fn role(&self) -> Option<ArtistRole> {
        match self.details {
            AssetDetails::Artist { role } => Some(role),
            _ => None,
        }
    }

    /// Band attributes, if this is a band.
    #[must_use]
    pub fn band(&self) -> Option<&BandProfile> {
        match &self.details {
            AssetDetails::Band(profile) => Some(profile),
            _ => None,
        }
    }
}

// =============================================================================
// BAND VIEW
// =============================================================================

/// Read model returned by `get_band`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandView {
    /// Band name.
    pub name: String,
    /// Genre label.
    pub band_type: String,
    /// Fan count in `[0, 100]`.
    pub fan_count: u8,
    /// Buzz points in `[0, 100]`.
    pub buzz_points: u8,
    /// Vocalist member id.
    pub vocalist_id: AssetId,
    /// Lead guitar member id.
    pub lead_guitar_id: AssetId,
    /// Rhythm guitar member id.
    pub rhythm_guitar_id: AssetId,
    /// Bass member id.
    pub bass_id: AssetId,
    /// Drums member id.
    pub drums_id: AssetId,
}

impl BandView {
    /// Builds the view from a band record, or `None` if `asset` is not a band.
    #[must_use]
    pub fn from_asset(asset: &Asset) -> Option<Self> {
        let profile = asset.band()?;
        let lineup = profile.lineup;
        Some(Self {
            name: asset.name.clone(),
            band_type: profile.band_type.clone(),
            fan_count: profile.fan_count.value(),
            buzz_points: profile.buzz_points.value(),
            vocalist_id: lineup.vocalist_id,
            lead_guitar_id: lineup.lead_guitar_id,
            rhythm_guitar_id: lineup.rhythm_guitar_id,
            bass_id: lineup.bass_id,
            drums_id: lineup.drums_id,
        })
    }

    /// The members as a lineup.
    #[must_use]
    pub fn lineup(&self) -> Lineup {
        Lineup {
            vocalist_id: self.vocalist_id,
            lead_guitar_id: self.lead_guitar_id,
            rhythm_guitar_id: self.rhythm_guitar_id,
            bass_id: self.bass_id,
            drums_id: self.drums_id,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
