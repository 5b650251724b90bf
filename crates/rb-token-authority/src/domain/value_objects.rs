//! # Value Objects
//!
//! Immutable domain primitives for the token authority.
//! These types are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account identity.
///
/// Always the authenticated principal of a call. The authority itself never
/// holds an `Address`; custody by the authority is `Holder::Escrowed`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}...{}", hex::encode(&self.0[..4]), hex::encode(&self.0[18..]))
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// ASSET ID
// =============================================================================

/// Identifier of an asset. Assigned monotonically from 1 and never reused.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AssetId(pub u64);

impl AssetId {
    /// The first id handed out by an empty store.
    pub const FIRST: Self = Self(1);

    /// Returns the id that follows this one, or `None` on overflow.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for AssetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// =============================================================================
// ASSET KIND / ARTIST ROLE
// =============================================================================

/// Type tag of an asset. Immutable after creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AssetKind {
    /// A musician with a role.
    Artist,
    /// A place to play.
    Venue,
    /// A place to record.
    Studio,
    /// A composite of five escrowed artists.
    Band,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Artist => "artist",
            Self::Venue => "venue",
            Self::Studio => "studio",
            Self::Band => "band",
        };
        f.write_str(name)
    }
}

/// Role of an artist. Immutable after minting.
///
/// Discriminants follow the wire encoding used by `mintArtist(name, role)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ArtistRole {
    /// Role 0.
    Vocalist = 0,
    /// Role 1.
    LeadGuitar = 1,
    /// Role 2.
    RhythmGuitar = 2,
    /// Role 3.
    Bass = 3,
    /// Role 4.
    Drums = 4,
}

impl ArtistRole {
    /// Decodes a role from its numeric encoding.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Vocalist),
            1 => Some(Self::LeadGuitar),
            2 => Some(Self::RhythmGuitar),
            3 => Some(Self::Bass),
            4 => Some(Self::Drums),
            _ => None,
        }
    }

    /// Human-readable name used in rejection messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Vocalist => "Vocalist",
            Self::LeadGuitar => "Lead Guitar",
            Self::RhythmGuitar => "Rhythm Guitar",
            Self::Bass => "Bass",
            Self::Drums => "Drums",
        }
    }
}

impl fmt::Display for ArtistRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// SLOT
// =============================================================================

/// One of the five composition positions of a band.
///
/// `Slot::ALL` is the evaluation order for validation and authorization.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Slot {
    /// Needs a `Vocalist`.
    Vocalist,
    /// Needs a `LeadGuitar`.
    LeadGuitar,
    /// Needs a `RhythmGuitar`.
    RhythmGuitar,
    /// Needs a `Bass`.
    Bass,
    /// Needs a `Drums`.
    Drums,
}

impl Slot {
    /// All slots in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::Vocalist,
        Self::LeadGuitar,
        Self::RhythmGuitar,
        Self::Bass,
        Self::Drums,
    ];

    /// The role an artist must have to fill this slot.
    #[must_use]
    pub const fn role(self) -> ArtistRole {
        match self {
            Self::Vocalist => ArtistRole::Vocalist,
            Self::LeadGuitar => ArtistRole::LeadGuitar,
            Self::RhythmGuitar => ArtistRole::RhythmGuitar,
            Self::Bass => ArtistRole::Bass,
            Self::Drums => ArtistRole::Drums,
        }
    }

    /// Parameter name of the slot, as callers know it.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Vocalist => "vocalistId",
            Self::LeadGuitar => "leadGuitarId",
            Self::RhythmGuitar => "rhythmGuitarId",
            Self::Bass => "bassId",
            Self::Drums => "drumsId",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

// =============================================================================
// POPULARITY (bounded 0..=100)
// =============================================================================

/// A cosmetic score bounded to `[0, 100]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Popularity(u8);

impl Popularity {
    /// Upper bound (inclusive).
    pub const MAX: u8 = 100;

    /// Creates a score, or `None` if it exceeds [`Popularity::MAX`].
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Creates a score, saturating at [`Popularity::MAX`].
    #[must_use]
    pub fn saturating(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// The raw score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Popularity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("popularity {value} exceeds {}", Self::MAX))
    }
}

impl From<Popularity> for u8 {
    fn from(p: Popularity) -> Self {
        p.0
    }
}

// =============================================================================
// LINEUP
// =============================================================================

/// The five member ids of a band, one per slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Lineup {
    /// Vocalist slot.
    pub vocalist_id: AssetId,
    /// Lead guitar slot.
    pub lead_guitar_id: AssetId,
    /// Rhythm guitar slot.
    pub rhythm_guitar_id: AssetId,
    /// Bass slot.
    pub bass_id: AssetId,
    /// Drums slot.
    pub drums_id: AssetId,
}

impl Lineup {
    /// Number of members in a band.
    pub const SIZE: usize = 5;

    /// Builds a lineup from raw ids given in slot order.
    #[must_use]
    pub const fn new(
        vocalist_id: u64,
        lead_guitar_id: u64,
        rhythm_guitar_id: u64,
        bass_id: u64,
        drums_id: u64,
    ) -> Self {
        Self {
            vocalist_id: AssetId(vocalist_id),
            lead_guitar_id: AssetId(lead_guitar_id),
            rhythm_guitar_id: AssetId(rhythm_guitar_id),
            bass_id: AssetId(bass_id),
            drums_id: AssetId(drums_id),
        }
    }

    /// The id occupying `slot`.
    #[must_use]
    pub const fn get(&self, slot: Slot) -> AssetId {
        match slot {
            Slot::Vocalist => self.vocalist_id,
            Slot::LeadGuitar => self.lead_guitar_id,
            Slot::RhythmGuitar => self.rhythm_guitar_id,
            Slot::Bass => self.bass_id,
            Slot::Drums => self.drums_id,
        }
    }

    /// `(slot, id)` pairs in evaluation order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, AssetId)> + '_ {
        Slot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    /// Member ids in slot order.
    #[must_use]
    pub fn members(&self) -> [AssetId; Self::SIZE] {
        Slot::ALL.map(|slot| self.get(slot))
    }

    /// Returns true if `id` is one of the members.
    #[must_use]
    pub fn contains(&self, id: AssetId) -> bool {
        self.members().contains(&id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
