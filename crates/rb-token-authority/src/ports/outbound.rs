//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the authority depends on:
//! - Asset storage (create/read/transfer/destroy primitives)
//! - A source of bounded popularity scores for new bands
//!
//! Both are synchronous. They are only ever touched while the service holds
//! its write guard (mutations) or read guard (lookups).

use crate::domain::entities::{Asset, Holder};
use crate::domain::value_objects::{AssetId, Popularity};
use crate::errors::StoreError;

// =============================================================================
// ASSET STORE
// =============================================================================

/// Canonical table of assets.
///
/// ## Id discipline
///
/// Ids are assigned in sequence by [`insert`](AssetStore::insert) and are
/// never handed out twice. [`remove`](AssetStore::remove) retires an id for
/// good. The two `rollback_*`/`restore` methods exist only to undo a change
/// set that failed part-way.
pub trait AssetStore: Send + Sync {
    /// Look up an asset.
    fn get(&self, id: AssetId) -> Option<&Asset>;

    /// The id the next [`insert`](AssetStore::insert) must carry.
    ///
    /// # Errors
    ///
    /// `IdsExhausted` once the id space is used up.
    fn peek_next_id(&self) -> Result<AssetId, StoreError>;

    /// Add a new asset. `asset.id` must equal [`peek_next_id`](AssetStore::peek_next_id).
    ///
    /// # Errors
    ///
    /// `Duplicate` if the id is out of sequence, `IdsExhausted` if none are left.
    fn insert(&mut self, asset: Asset) -> Result<(), StoreError>;

    /// Replace the holder of an asset, returning the previous one.
    ///
    /// # Errors
    ///
    /// `Missing` if the asset does not exist.
    fn set_holder(&mut self, id: AssetId, holder: Holder) -> Result<Holder, StoreError>;

    /// Destroy an asset. Its id stays retired.
    ///
    /// # Errors
    ///
    /// `Missing` if the asset does not exist.
    fn remove(&mut self, id: AssetId) -> Result<Asset, StoreError>;

    /// Undo the most recent [`insert`](AssetStore::insert), rewinding the id counter.
    ///
    /// # Errors
    ///
    /// `Missing` if `id` is not the most recently inserted asset.
    fn rollback_insert(&mut self, id: AssetId) -> Result<Asset, StoreError>;

    /// Put back an asset removed by [`remove`](AssetStore::remove).
    ///
    /// # Errors
    ///
    /// `Duplicate` if the id is live or was never assigned.
    fn restore(&mut self, asset: Asset) -> Result<(), StoreError>;

    /// All live assets in id order.
    fn assets(&self) -> Box<dyn Iterator<Item = &Asset> + '_>;

    /// Number of live assets.
    fn len(&self) -> usize {
        self.assets().count()
    }

    /// Returns true if no asset is live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the asset exists.
    fn contains(&self, id: AssetId) -> bool {
        self.get(id).is_some()
    }
}

// =============================================================================
// POPULARITY SOURCE
// =============================================================================

/// Supplies the cosmetic `fan_count` / `buzz_points` of a new band.
///
/// Only the bound is contractual; the distribution is up to the implementor.
pub trait PopularitySource: Send + Sync {
    /// Draw a score in `[0, max]`. `max` never exceeds [`Popularity::MAX`].
    fn draw(&mut self, max: u8) -> Popularity;
}
