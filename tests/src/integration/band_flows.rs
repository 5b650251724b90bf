//! # Band Flow Tests
//!
//! Form and disband bands end to end, checking custody and the exact
//! rejection reported for each malformed lineup.
//!
//! ## Flows Tested:
//!
//! 1. **Formation**: five owned artists → escrow + new band owned by caller
//! 2. **Slot validation**: first bad slot in vocalist → drums order wins
//! 3. **Disbandment**: band burned, members back with the band owner

#[cfg(test)]
mod tests {
    use super::super::{authority, mint_full_lineup, ADDR1, ADDR2};
    use rb_token_authority::prelude::*;

    async fn assert_rejected(
        api: &dyn TokenAuthorityApi,
        caller: Address,
        lineup: Lineup,
        message: &str,
    ) {
        let err = api
            .form_band(caller, "Amazing band", "Blues", lineup)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    // =============================================================================
    // FORMATION
    // =============================================================================

    #[tokio::test]
    async fn test_form_band_successfully() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        assert_eq!(lineup, Lineup::new(1, 2, 3, 4, 5));

        for id in lineup.members() {
            assert_eq!(service.owner_of(id).await.unwrap(), Holder::Account(ADDR1));
        }

        let band = service
            .form_band(ADDR1, "Amazing band", "Blues", lineup)
            .await
            .unwrap();
        assert_eq!(band, AssetId(6));

        let view = service.get_band(band).await.unwrap();
        assert_eq!(view.name, "Amazing band");
        assert_eq!(view.band_type, "Blues");
        assert!(view.fan_count <= 100);
        assert!(view.buzz_points <= 100);
        assert_eq!(view.vocalist_id, AssetId(1));
        assert_eq!(view.lead_guitar_id, AssetId(2));
        assert_eq!(view.rhythm_guitar_id, AssetId(3));
        assert_eq!(view.bass_id, AssetId(4));
        assert_eq!(view.drums_id, AssetId(5));

        // The band is held by the caller, the members by the authority
        assert_eq!(service.owner_of(band).await.unwrap(), Holder::Account(ADDR1));
        for id in lineup.members() {
            assert_eq!(
                service.owner_of(id).await.unwrap(),
                Holder::Escrowed { band }
            );
        }
        assert_eq!(service.balance_of(ADDR1).await, 1);
        assert!(service.check_invariants().await.is_valid());
    }

    #[tokio::test]
    async fn test_band_view_serializes_like_the_contract() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let band = service
            .form_band(ADDR1, "Amazing band", "Blues", lineup)
            .await
            .unwrap();

        let json = serde_json::to_value(service.get_band(band).await.unwrap()).unwrap();
        assert_eq!(json["name"], "Amazing band");
        assert_eq!(json["bandType"], "Blues");
        assert_eq!(json["vocalistId"], 1);
        assert_eq!(json["leadGuitarId"], 2);
        assert_eq!(json["rhythmGuitarId"], 3);
        assert_eq!(json["bassId"], 4);
        assert_eq!(json["drumsId"], 5);
    }

    #[tokio::test]
    async fn test_form_band_with_tokens_that_do_not_exist() {
        let service = authority();
        assert_rejected(
            &service,
            ADDR1,
            Lineup::new(7, 8, 9, 10, 11),
            "leadGuitarId is not a Lead Guitar",
        )
        .await;
        assert!(service.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_form_band_with_unminted_vocalist_only() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let lineup = Lineup {
            vocalist_id: AssetId(99),
            ..lineup
        };

        let err = service
            .form_band(ADDR1, "Amazing band", "Blues", lineup)
            .await
            .unwrap_err();
        assert_eq!(err, AuthorityError::AssetNotFound(AssetId(99)));
    }

    #[tokio::test]
    async fn test_form_band_with_tokens_that_are_not_artists() {
        let service = authority();
        mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let venue = service.mint_venue(ADDR1, "Venue 1", "Italy").await.unwrap();
        assert_eq!(venue, AssetId(6));

        let cases = [
            (Lineup::new(6, 2, 3, 4, 5), "vocalistId is not an artist"),
            (Lineup::new(1, 6, 3, 4, 5), "leadGuitarId is not an artist"),
            (Lineup::new(1, 2, 6, 4, 5), "rhythmGuitarId is not an artist"),
            (Lineup::new(1, 2, 3, 6, 5), "bassId is not an artist"),
            (Lineup::new(1, 2, 3, 4, 6), "drumsId is not an artist"),
        ];
        for (lineup, message) in cases {
            assert_rejected(&service, ADDR1, lineup, message).await;
        }
    }

    #[tokio::test]
    async fn test_form_band_with_artists_in_wrong_roles() {
        let service = authority();
        mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        service
            .mint_artist(ADDR1, "Vocalist 2", ArtistRole::Vocalist)
            .await
            .unwrap();
        service.mint_venue(ADDR1, "Venue 1", "Italy").await.unwrap();

        let cases = [
            (Lineup::new(2, 1, 3, 4, 5), "vocalistId is not a Vocalist"),
            (Lineup::new(1, 3, 2, 4, 5), "leadGuitarId is not a Lead Guitar"),
            (Lineup::new(1, 2, 4, 3, 5), "rhythmGuitarId is not a Rhythm Guitar"),
            (Lineup::new(1, 2, 3, 5, 4), "bassId is not a Bass"),
            (Lineup::new(1, 2, 3, 4, 6), "drumsId is not a Drums"),
        ];
        for (lineup, message) in cases {
            assert_rejected(&service, ADDR1, lineup, message).await;
        }
    }

    #[tokio::test]
    async fn test_validation_runs_before_authorization() {
        let service = authority();
        mint_full_lineup(&service, ADDR1, 1).await.unwrap();

        // ADDR2 owns nothing, yet the role error is what gets reported
        let err = service
            .form_band(ADDR2, "Amazing band", "Blues", Lineup::new(1, 2, 3, 5, 4))
            .await
            .unwrap_err();
        assert_eq!(err.slot(), Some(Slot::Bass));
        assert_eq!(err.kind(), ErrorKind::WrongRole);
    }

    #[tokio::test]
    async fn test_form_band_with_artists_you_do_not_own() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        service
            .mint_artist(ADDR1, "Vocalist 2", ArtistRole::Vocalist)
            .await
            .unwrap();
        let before = service.snapshot().await;

        assert_rejected(
            &service,
            ADDR2,
            lineup,
            "transfer caller is not owner nor approved",
        )
        .await;
        assert_eq!(service.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_form_band_with_mixed_ownership_changes_nothing() {
        let service = authority();
        let mine = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let theirs = mint_full_lineup(&service, ADDR2, 2).await.unwrap();
        let before = service.snapshot().await;

        let mixed = Lineup {
            drums_id: theirs.drums_id,
            ..mine
        };
        let err = service
            .form_band(ADDR1, "Amazing band", "Blues", mixed)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthorityError::NotApproved {
                asset: theirs.drums_id
            }
        );
        assert_eq!(service.snapshot().await, before);
    }

    // =============================================================================
    // DISBANDMENT
    // =============================================================================

    #[tokio::test]
    async fn test_disband_band_successfully() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let band = service
            .form_band(ADDR1, "Amazing band", "Blues", lineup)
            .await
            .unwrap();

        service.disband_band(ADDR1, band).await.unwrap();

        for id in lineup.members() {
            assert_eq!(service.owner_of(id).await.unwrap(), Holder::Account(ADDR1));
        }
        let err = service.owner_of(band).await.unwrap_err();
        assert_eq!(err, AuthorityError::AssetNotFound(band));
        let err = service.get_band(band).await.unwrap_err();
        assert_eq!(err.to_string(), "token does not exist: #6");
        assert_eq!(service.balance_of(ADDR1).await, 5);
        assert!(service.check_invariants().await.is_valid());
    }

    #[tokio::test]
    async fn test_disband_band_that_does_not_exist() {
        let service = authority();
        let err = service.disband_band(ADDR1, AssetId(6)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AssetNotFound);
    }

    #[tokio::test]
    async fn test_disband_token_that_is_not_a_band() {
        let service = authority();
        service
            .mint_artist(ADDR1, "Vocalist 1", ArtistRole::Vocalist)
            .await
            .unwrap();

        let err = service.disband_band(ADDR1, AssetId(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "token is not a band");
        assert_eq!(service.owner_of(AssetId(1)).await.unwrap(), Holder::Account(ADDR1));
    }

    #[tokio::test]
    async fn test_disband_band_you_do_not_own() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let band = service
            .form_band(ADDR1, "Amazing band", "Blues", lineup)
            .await
            .unwrap();
        let before = service.snapshot().await;

        let err = service.disband_band(ADDR2, band).await.unwrap_err();
        assert_eq!(err.to_string(), "You don't own the band");
        assert_eq!(service.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_band_ids_are_not_reused_after_disband() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let first = service.form_band(ADDR1, "A", "Rock", lineup).await.unwrap();
        service.disband_band(ADDR1, first).await.unwrap();

        let second = service.form_band(ADDR1, "B", "Jazz", lineup).await.unwrap();
        assert_eq!(second, AssetId(7));
        assert_eq!(service.get_band(second).await.unwrap().name, "B");

        let stats = service.stats().await;
        assert_eq!(stats.assets_minted, 5);
        assert_eq!(stats.bands_formed, 2);
        assert_eq!(stats.bands_disbanded, 1);
        assert_eq!(stats.rejected_operations, 0);
    }

    #[tokio::test]
    async fn test_bands_from_separate_owners_coexist() -> anyhow::Result<()> {
        let service = authority();
        let first = mint_full_lineup(&service, ADDR1, 1).await?;
        let second = mint_full_lineup(&service, ADDR2, 2).await?;

        let band1 = service.form_band(ADDR1, "One", "Rock", first).await?;
        let band2 = service.form_band(ADDR2, "Two", "Soul", second).await?;
        anyhow::ensure!(service.check_invariants().await.is_valid());

        service.disband_band(ADDR1, band1).await?;
        assert_eq!(service.get_band(band2).await?.lineup(), second);
        assert_eq!(service.balance_of(ADDR1).await, 5);
        assert_eq!(service.balance_of(ADDR2).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_band_owner_can_trade_the_band() {
        let service = authority();
        let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
        let band = service.form_band(ADDR1, "A", "Rock", lineup).await.unwrap();

        service.transfer_from(ADDR1, ADDR1, ADDR2, band).await.unwrap();
        let err = service.disband_band(ADDR1, band).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOwner);

        service.disband_band(ADDR2, band).await.unwrap();
        for id in lineup.members() {
            assert_eq!(service.owner_of(id).await.unwrap(), Holder::Account(ADDR2));
        }
    }
}
