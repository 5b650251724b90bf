//! # Driving Ports (API - Inbound)
//!
//! The public surface of the token authority. `caller` is always the
//! authenticated principal of the call and never travels inside a payload.

use crate::domain::entities::{Asset, BandView, Holder};
use crate::domain::value_objects::{Address, ArtistRole, AssetId, Lineup};
use crate::errors::AuthorityError;
use async_trait::async_trait;

/// Primary API of the token authority.
///
/// ## Usage
///
/// ```ignore
/// let band = api.form_band(caller, "Amazing band", "Blues", Lineup::new(1, 2, 3, 4, 5)).await?;
/// api.disband_band(caller, band).await?;
/// ```
#[async_trait]
pub trait TokenAuthorityApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Minting
    // -------------------------------------------------------------------------

    /// Mint an artist owned by `caller`.
    async fn mint_artist(
        &self,
        caller: Address,
        name: &str,
        role: ArtistRole,
    ) -> Result<AssetId, AuthorityError>;

    /// Mint a venue owned by `caller`.
    async fn mint_venue(
        &self,
        caller: Address,
        name: &str,
        location: &str,
    ) -> Result<AssetId, AuthorityError>;

    /// Mint a studio owned by `caller`.
    async fn mint_studio(&self, caller: Address, name: &str) -> Result<AssetId, AuthorityError>;

    // -------------------------------------------------------------------------
    // Composition
    // -------------------------------------------------------------------------

    /// Escrow five artists and mint a band owned by `caller`.
    ///
    /// Checks run in a fixed order: all five slot roles first, then
    /// authorization for all five ids. The first failure is returned and
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// `WrongKind`, `WrongRole`, `AssetNotFound`, `NotApproved`.
    async fn form_band(
        &self,
        caller: Address,
        band_name: &str,
        band_type: &str,
        lineup: Lineup,
    ) -> Result<AssetId, AuthorityError>;

    /// Destroy a band and return its five members to `caller`.
    ///
    /// # Errors
    ///
    /// `AssetNotFound`, `NotABand`, `NotOwner`.
    async fn disband_band(&self, caller: Address, band_id: AssetId) -> Result<(), AuthorityError>;

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Band attributes and members.
    ///
    /// # Errors
    ///
    /// `AssetNotFound` if absent or not a band.
    async fn get_band(&self, band_id: AssetId) -> Result<BandView, AuthorityError>;

    /// Current holder.
    ///
    /// # Errors
    ///
    /// `AssetNotFound` if absent.
    async fn owner_of(&self, asset_id: AssetId) -> Result<Holder, AuthorityError>;

    /// Full asset record.
    ///
    /// # Errors
    ///
    /// `AssetNotFound` if absent.
    async fn asset(&self, asset_id: AssetId) -> Result<Asset, AuthorityError>;

    /// Number of assets held by `owner`.
    async fn balance_of(&self, owner: Address) -> u64;

    // -------------------------------------------------------------------------
    // Approvals & transfer
    // -------------------------------------------------------------------------

    /// Set or clear the delegate of `asset_id`. Caller must be holder or operator.
    ///
    /// # Errors
    ///
    /// `AssetNotFound`, `NotApproved`, `ApprovalToCurrentOwner`.
    async fn approve(
        &self,
        caller: Address,
        approved: Option<Address>,
        asset_id: AssetId,
    ) -> Result<(), AuthorityError>;

    /// Delegate of `asset_id`.
    ///
    /// # Errors
    ///
    /// `AssetNotFound` if absent.
    async fn get_approved(&self, asset_id: AssetId) -> Result<Option<Address>, AuthorityError>;

    /// Grant or revoke `operator` rights over all of `caller`'s assets.
    ///
    /// # Errors
    ///
    /// `ApproveToCaller` if `operator == caller`.
    async fn set_approval_for_all(
        &self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), AuthorityError>;

    /// Returns true if `operator` acts for all of `owner`'s assets.
    async fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;

    /// Returns true if `caller` may move `asset_id`.
    async fn is_authorized(&self, caller: Address, asset_id: AssetId) -> bool;

    /// Move an asset between accounts.
    ///
    /// # Errors
    ///
    /// `AssetNotFound`, `NotApproved`, `NotOwner`.
    async fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        asset_id: AssetId,
    ) -> Result<(), AuthorityError>;
}
