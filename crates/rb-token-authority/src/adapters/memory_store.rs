//! # In-Memory Asset Store
//!
//! Default [`AssetStore`] backing. Durable storage lives behind the same port.

use crate::domain::entities::{Asset, Holder};
use crate::domain::value_objects::AssetId;
use crate::errors::StoreError;
use crate::ports::outbound::AssetStore;
use std::collections::BTreeMap;

/// Asset table keyed by id, with a monotonic id counter.
#[derive(Debug, Clone)]
pub struct InMemoryAssetStore {
    assets: BTreeMap<AssetId, Asset>,
    /// Next id to assign; `None` once exhausted.
    next_id: Option<AssetId>,
}

impl InMemoryAssetStore {
    /// Create an empty store whose first id is [`AssetId::FIRST`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: BTreeMap::new(),
            next_id: Some(AssetId::FIRST),
        }
    }

    /// Create an empty store that starts assigning at `first`.
    #[must_use]
    pub fn starting_at(first: AssetId) -> Self {
        Self {
            assets: BTreeMap::new(),
            next_id: Some(first),
        }
    }
}

impl Default for InMemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore for InMemoryAssetStore {
    fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    fn peek_next_id(&self) -> Result<AssetId, StoreError> {
        self.next_id.ok_or(StoreError::IdsExhausted)
    }

    fn insert(&mut self, asset: Asset) -> Result<(), StoreError> {
        let expected = self.peek_next_id()?;
        if asset.id != expected {
            return Err(StoreError::Duplicate(asset.id));
        }
        self.next_id = expected.next();
        self.assets.insert(asset.id, asset);
        Ok(())
    }

    fn set_holder(&mut self, id: AssetId, holder: Holder) -> Result<Holder, StoreError> {
        let asset = self.assets.get_mut(&id).ok_or(StoreError::Missing(id))?;
        Ok(std::mem::replace(&mut asset.holder, holder))
    }

    fn remove(&mut self, id: AssetId) -> Result<Asset, StoreError> {
        self.assets.remove(&id).ok_or(StoreError::Missing(id))
    }

    fn rollback_insert(&mut self, id: AssetId) -> Result<Asset, StoreError> {
        let latest = match self.next_id {
            Some(next) => next.0.checked_sub(1).map(AssetId),
            None => Some(AssetId(u64::MAX)),
        };
        if latest != Some(id) {
            return Err(StoreError::Missing(id));
        }
        let asset = self.assets.remove(&id).ok_or(StoreError::Missing(id))?;
        self.next_id = Some(id);
        Ok(asset)
    }

    fn restore(&mut self, asset: Asset) -> Result<(), StoreError> {
        let assigned = self.next_id.map_or(true, |next| asset.id < next);
        if !assigned || self.assets.contains_key(&asset.id) {
            return Err(StoreError::Duplicate(asset.id));
        }
        self.assets.insert(asset.id, asset);
        Ok(())
    }

    fn assets(&self) -> Box<dyn Iterator<Item = &Asset> + '_> {
        Box::new(self.assets.values())
    }

    fn len(&self) -> usize {
        self.assets.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
