//! # Token Authority Service
//!
//! The composition engine. Owns the asset store, approvals, popularity source
//! and event log behind one `RwLock`:
//!
//! - every mutating operation holds the write guard for its whole
//!   validate → stage → apply sequence, so mutations never interleave
//! - queries hold the read guard and only ever see committed state
//!
//! ## Band formation
//!
//! ```text
//! validate 5 slots ──→ authorize 5 ids ──→ stage 5 escrow transfers + band
//!   (first error)        (first error)              │
//!                                                   ↓
//!                                      ChangeSet::apply (all or nothing)
//! ```
//!
//! Disbandment stages the exact reverse: five releases to the band owner and
//! the destruction of the band.

use crate::adapters::{InMemoryAssetStore, SeededPopularity};
use crate::config::AuthorityConfig;
use crate::domain::changeset::{ChangeSet, StateChange};
use crate::domain::entities::{Asset, AssetDetails, BandProfile, BandView, Holder};
use crate::domain::invariants::{check_escrow_invariant, InvariantCheckResult};
use crate::domain::ledger::{self, authorize, check_transfer, Approvals};
use crate::domain::validator::validate_lineup;
use crate::domain::value_objects::{Address, ArtistRole, AssetId, AssetKind, Lineup};
use crate::errors::AuthorityError;
use crate::events::AuthorityEvent;
use crate::ports::inbound::TokenAuthorityApi;
use crate::ports::outbound::{AssetStore, PopularitySource};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Statistics for the token authority.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Artists, venues and studios minted.
    pub assets_minted: u64,
    /// Bands formed.
    pub bands_formed: u64,
    /// Bands disbanded.
    pub bands_disbanded: u64,
    /// Single-asset transfers via `transfer_from`.
    pub transfers: u64,
    /// Operations rejected with an error.
    pub rejected_operations: u64,
}

/// Everything guarded by the service lock.
struct AuthorityState<S, P> {
    store: S,
    approvals: Approvals,
    popularity: P,
    events: Vec<AuthorityEvent>,
    stats: ServiceStats,
}

/// The single-writer token authority.
pub struct TokenAuthorityService<S = InMemoryAssetStore, P = SeededPopularity> {
    config: AuthorityConfig,
    state: RwLock<AuthorityState<S, P>>,
}

impl TokenAuthorityService {
    /// In-memory authority with popularity seeded per `config`.
    #[must_use]
    pub fn new(config: AuthorityConfig) -> Self {
        let popularity = SeededPopularity::new(config.popularity_seed);
        Self::with_parts(InMemoryAssetStore::new(), popularity, config)
    }
}

impl<S: AssetStore, P: PopularitySource> TokenAuthorityService<S, P> {
    /// Authority over an existing store and popularity source.
    pub fn with_parts(store: S, popularity: P, config: AuthorityConfig) -> Self {
        info!(
            popularity_max = config.popularity_max,
            unminted_slots = ?config.unminted_slots,
            verify_invariants = config.verify_invariants,
            "Creating token authority"
        );
        Self {
            config,
            state: RwLock::new(AuthorityState {
                store,
                approvals: Approvals::new(),
                popularity,
                events: Vec::new(),
                stats: ServiceStats::default(),
            }),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    /// Current statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.state.read().await.stats.clone()
    }

    /// Committed events, oldest first.
    pub async fn events(&self) -> Vec<AuthorityEvent> {
        self.state.read().await.events.clone()
    }

    /// All live assets in id order.
    pub async fn snapshot(&self) -> Vec<Asset> {
        self.state.read().await.store.assets().cloned().collect()
    }

    /// Run the escrow invariant check against committed state.
    pub async fn check_invariants(&self) -> InvariantCheckResult {
        check_escrow_invariant(&self.state.read().await.store)
    }

    /// Run `op` under the write guard, counting and logging rejections.
    async fn mutate<T>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&mut AuthorityState<S, P>, &AuthorityConfig) -> Result<T, AuthorityError> + Send,
    ) -> Result<T, AuthorityError> {
        let mut state = self.state.write().await;
        let result = op(&mut state, &self.config);
        if let Err(err) = &result {
            state.stats.rejected_operations += 1;
            warn!(operation, error = %err, "Operation rejected");
        }
        result
    }

    async fn read<T>(&self, op: impl FnOnce(&AuthorityState<S, P>) -> T + Send) -> T {
        let state = self.state.read().await;
        op(&state)
    }
}

impl<S: AssetStore, P: PopularitySource> AuthorityState<S, P> {
    fn mint(
        &mut self,
        config: &AuthorityConfig,
        caller: Address,
        name: &str,
        details: AssetDetails,
    ) -> Result<AssetId, AuthorityError> {
        let id = self.store.peek_next_id()?;
        let mut changes = ChangeSet::new();
        changes.create(Asset {
            id,
            name: name.to_string(),
            holder: Holder::Account(caller),
            details,
        });
        self.commit(config, changes, Vec::new())?;
        self.stats.assets_minted += 1;
        Ok(id)
    }

    fn form_band(
        &mut self,
        config: &AuthorityConfig,
        caller: Address,
        band_name: &str,
        band_type: &str,
        lineup: Lineup,
    ) -> Result<AssetId, AuthorityError> {
        validate_lineup(&self.store, &lineup, config.unminted_slots)?;

        let mut holders = Vec::with_capacity(Lineup::SIZE);
        for (_, member) in lineup.slots() {
            let asset = authorize(&self.store, &self.approvals, caller, member)?;
            holders.push((member, asset.holder));
        }

        let band_id = self.store.peek_next_id()?;
        let escrow = Holder::Escrowed { band: band_id };
        let mut changes = ChangeSet::new();
        for (member, holder) in holders {
            changes.transfer(member, holder, escrow);
        }
        changes.create(Asset {
            id: band_id,
            name: band_name.to_string(),
            holder: Holder::Account(caller),
            details: AssetDetails::Band(BandProfile {
                band_type: band_type.to_string(),
                fan_count: self.popularity.draw(config.popularity_max),
                buzz_points: self.popularity.draw(config.popularity_max),
                lineup,
            }),
        });

        let formed = AuthorityEvent::BandFormed {
            band: band_id,
            owner: caller,
            lineup,
        };
        self.commit(config, changes, vec![formed])?;
        self.stats.bands_formed += 1;
        Ok(band_id)
    }

    fn disband_band(
        &mut self,
        config: &AuthorityConfig,
        caller: Address,
        band_id: AssetId,
    ) -> Result<(), AuthorityError> {
        let band = self
            .store
            .get(band_id)
            .ok_or(AuthorityError::AssetNotFound(band_id))?;
        let lineup = band
            .band()
            .map(|profile| profile.lineup)
            .ok_or(AuthorityError::NotABand(band_id))?;
        if !band.holder.is_account(caller) {
            return Err(AuthorityError::NotOwner {
                asset: band_id,
                kind: AssetKind::Band,
            });
        }

        let escrow = Holder::Escrowed { band: band_id };
        let mut changes = ChangeSet::new();
        for member in lineup.members() {
            changes.transfer(member, escrow, Holder::Account(caller));
        }
        changes.destroy(band_id);

        let disbanded = AuthorityEvent::BandDisbanded {
            band: band_id,
            owner: caller,
        };
        self.commit(config, changes, vec![disbanded])?;
        self.stats.bands_disbanded += 1;
        Ok(())
    }

    fn transfer_from(
        &mut self,
        config: &AuthorityConfig,
        caller: Address,
        from: Address,
        to: Address,
        asset_id: AssetId,
    ) -> Result<(), AuthorityError> {
        let asset = authorize(&self.store, &self.approvals, caller, asset_id)?;
        check_transfer(asset, Holder::Account(from))?;

        let mut changes = ChangeSet::new();
        changes.transfer(asset_id, Holder::Account(from), Holder::Account(to));
        self.commit(config, changes, Vec::new())?;
        self.stats.transfers += 1;
        Ok(())
    }

    fn approve(
        &mut self,
        config: &AuthorityConfig,
        caller: Address,
        approved: Option<Address>,
        asset_id: AssetId,
    ) -> Result<(), AuthorityError> {
        let asset = self
            .store
            .get(asset_id)
            .ok_or(AuthorityError::AssetNotFound(asset_id))?;
        let owner = asset
            .holder
            .account()
            .ok_or(AuthorityError::NotApproved { asset: asset_id })?;
        if approved == Some(owner) {
            return Err(AuthorityError::ApprovalToCurrentOwner(asset_id));
        }
        if caller != owner && !self.approvals.is_operator(owner, caller) {
            return Err(AuthorityError::NotApproved { asset: asset_id });
        }

        self.approvals.set_delegate(asset_id, approved);
        self.record(
            config,
            AuthorityEvent::Approval {
                owner,
                approved,
                asset: asset_id,
            },
        );
        Ok(())
    }

    fn set_approval_for_all(
        &mut self,
        config: &AuthorityConfig,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), AuthorityError> {
        if operator == caller {
            return Err(AuthorityError::ApproveToCaller);
        }
        self.approvals.set_operator(caller, operator, approved);
        self.record(
            config,
            AuthorityEvent::ApprovalForAll {
                owner: caller,
                operator,
                approved,
            },
        );
        Ok(())
    }

    /// Apply `changes` atomically, then log their events followed by `extra`.
    fn commit(
        &mut self,
        config: &AuthorityConfig,
        changes: ChangeSet,
        extra: Vec<AuthorityEvent>,
    ) -> Result<(), AuthorityError> {
        let burned: Vec<Option<Holder>> = changes
            .changes()
            .iter()
            .map(|change| match change {
                StateChange::Destroy(id) => self.store.get(*id).map(|asset| asset.holder),
                _ => None,
            })
            .collect();

        let applied = changes.apply(&mut self.store, &mut self.approvals)?;
        debug!(changes = applied.len(), "Change set committed");

        if config.record_events {
            let transfers = applied
                .iter()
                .zip(burned)
                .map(|(change, holder)| AuthorityEvent::from_change(change, holder));
            self.events.extend(transfers);
            self.events.extend(extra);
        }

        if config.verify_invariants {
            if let InvariantCheckResult::Invalid(violations) = check_escrow_invariant(&self.store) {
                for violation in &violations {
                    error!(%violation, "Escrow invariant violated after commit");
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, config: &AuthorityConfig, event: AuthorityEvent) {
        if config.record_events {
            self.events.push(event);
        }
    }
}

// =============================================================================
// API IMPLEMENTATION
// =============================================================================

#[async_trait]
impl<S: AssetStore, P: PopularitySource> TokenAuthorityApi for TokenAuthorityService<S, P> {
    #[instrument(skip(self))]
    async fn mint_artist(
        &self,
        caller: Address,
        name: &str,
        role: ArtistRole,
    ) -> Result<AssetId, AuthorityError> {
        let id = self
            .mutate("mint_artist", |state, config| {
                state.mint(config, caller, name, AssetDetails::Artist { role })
            })
            .await?;
        info!(asset = %id, %role, "Artist minted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn mint_venue(
        &self,
        caller: Address,
        name: &str,
        location: &str,
    ) -> Result<AssetId, AuthorityError> {
        let details = AssetDetails::Venue {
            location: location.to_string(),
        };
        let id = self
            .mutate("mint_venue", |state, config| {
                state.mint(config, caller, name, details)
            })
            .await?;
        info!(asset = %id, "Venue minted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn mint_studio(&self, caller: Address, name: &str) -> Result<AssetId, AuthorityError> {
        let id = self
            .mutate("mint_studio", |state, config| {
                state.mint(config, caller, name, AssetDetails::Studio)
            })
            .await?;
        info!(asset = %id, "Studio minted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn form_band(
        &self,
        caller: Address,
        band_name: &str,
        band_type: &str,
        lineup: Lineup,
    ) -> Result<AssetId, AuthorityError> {
        let band = self
            .mutate("form_band", |state, config| {
                state.form_band(config, caller, band_name, band_type, lineup)
            })
            .await?;
        info!(band = %band, "Band formed, members escrowed");
        Ok(band)
    }

    #[instrument(skip(self))]
    async fn disband_band(&self, caller: Address, band_id: AssetId) -> Result<(), AuthorityError> {
        self.mutate("disband_band", |state, config| {
            state.disband_band(config, caller, band_id)
        })
        .await?;
        info!(band = %band_id, "Band disbanded, members released");
        Ok(())
    }

    async fn get_band(&self, band_id: AssetId) -> Result<BandView, AuthorityError> {
        self.read(|state| {
            state
                .store
                .get(band_id)
                .and_then(BandView::from_asset)
                .ok_or(AuthorityError::AssetNotFound(band_id))
        })
        .await
    }

    async fn owner_of(&self, asset_id: AssetId) -> Result<Holder, AuthorityError> {
        self.read(|state| {
            state
                .store
                .get(asset_id)
                .map(|asset| asset.holder)
                .ok_or(AuthorityError::AssetNotFound(asset_id))
        })
        .await
    }

    async fn asset(&self, asset_id: AssetId) -> Result<Asset, AuthorityError> {
        self.read(|state| {
            state
                .store
                .get(asset_id)
                .cloned()
                .ok_or(AuthorityError::AssetNotFound(asset_id))
        })
        .await
    }

    async fn balance_of(&self, owner: Address) -> u64 {
        self.read(|state| ledger::balance_of(&state.store, owner))
            .await
    }

    #[instrument(skip(self))]
    async fn approve(
        &self,
        caller: Address,
        approved: Option<Address>,
        asset_id: AssetId,
    ) -> Result<(), AuthorityError> {
        self.mutate("approve", |state, config| {
            state.approve(config, caller, approved, asset_id)
        })
        .await
    }

    async fn get_approved(&self, asset_id: AssetId) -> Result<Option<Address>, AuthorityError> {
        self.read(|state| {
            if state.store.contains(asset_id) {
                Ok(state.approvals.delegate(asset_id))
            } else {
                Err(AuthorityError::AssetNotFound(asset_id))
            }
        })
        .await
    }

    #[instrument(skip(self))]
    async fn set_approval_for_all(
        &self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), AuthorityError> {
        self.mutate("set_approval_for_all", |state, config| {
            state.set_approval_for_all(config, caller, operator, approved)
        })
        .await
    }

    async fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.read(|state| state.approvals.is_operator(owner, operator))
            .await
    }

    async fn is_authorized(&self, caller: Address, asset_id: AssetId) -> bool {
        self.read(|state| ledger::is_authorized(&state.store, &state.approvals, caller, asset_id))
            .await
    }

    #[instrument(skip(self))]
    async fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        asset_id: AssetId,
    ) -> Result<(), AuthorityError> {
        self.mutate("transfer_from", |state, config| {
            state.transfer_from(config, caller, from, to, asset_id)
        })
        .await?;
        info!(asset = %asset_id, "Asset transferred");
        Ok(())
    }
}

/// Authority with a fixed popularity seed and invariant checking on.
#[must_use]
pub fn create_test_service() -> TokenAuthorityService {
    TokenAuthorityService::new(AuthorityConfig {
        popularity_seed: Some(0x5eed),
        verify_invariants: true,
        ..AuthorityConfig::default()
    })
}

// =============================================================================
// TESTS
// =============================================================================
