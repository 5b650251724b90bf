//! # Integration Tests
//!
//! Drive `TokenAuthorityService` through `TokenAuthorityApi` only, the way an
//! external caller would.

pub mod band_flows;
pub mod properties;

use rb_token_authority::prelude::*;
use std::sync::Once;

// =============================================================================
// SHARED FIXTURES
// =============================================================================

/// First test account.
pub const ADDR1: Address = Address::new([0x11; 20]);
/// Second test account.
pub const ADDR2: Address = Address::new([0x22; 20]);
/// Third test account.
pub const ADDR3: Address = Address::new([0x33; 20]);

static TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Fresh authority with deterministic popularity and invariant checks on.
pub fn authority() -> TokenAuthorityService {
    init_tracing();
    create_test_service()
}

/// Mint one artist per role, in slot order, named like "Vocalist 1".
pub async fn mint_full_lineup(
    api: &dyn TokenAuthorityApi,
    owner: Address,
    n: usize,
) -> Result<Lineup, AuthorityError> {
    let mut ids = [AssetId::FIRST; Lineup::SIZE];
    for (id, slot) in ids.iter_mut().zip(Slot::ALL) {
        let name = format!("{} {n}", slot.role());
        *id = api.mint_artist(owner, &name, slot.role()).await?;
    }
    Ok(Lineup {
        vocalist_id: ids[0],
        lead_guitar_id: ids[1],
        rhythm_guitar_id: ids[2],
        bass_id: ids[3],
        drums_id: ids[4],
    })
}
