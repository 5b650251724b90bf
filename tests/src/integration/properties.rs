//! # Property Tests
//!
//! Round trips restore custody exactly, rejected operations never accumulate
//! effects, and a change set that fails part-way leaves the store untouched.

#[cfg(test)]
mod tests {
    use super::super::{init_tracing, mint_full_lineup, ADDR1, ADDR2, ADDR3};
    use proptest::prelude::*;
    use rb_token_authority::prelude::*;

    const ACCOUNTS: [Address; 3] = [ADDR1, ADDR2, ADDR3];

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    fn service_with_seed(seed: u64) -> TokenAuthorityService {
        init_tracing();
        TokenAuthorityService::new(AuthorityConfig {
            popularity_seed: Some(seed),
            verify_invariants: true,
            ..AuthorityConfig::default()
        })
    }

    /// Mint one lineup per entry of `owners`, returning them in order.
    async fn mint_lineups(service: &TokenAuthorityService, owners: &[usize]) -> Vec<Lineup> {
        let mut lineups = Vec::new();
        for (n, owner) in owners.iter().enumerate() {
            let lineup = mint_full_lineup(service, ACCOUNTS[*owner], n + 1)
                .await
                .unwrap();
            lineups.push(lineup);
        }
        lineups
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_form_then_disband_restores_custody(
            owners in prop::collection::vec(0usize..3, 1..4),
            pick in any::<prop::sample::Index>(),
            seed in any::<u64>(),
        ) {
            let (before, after, invariants_hold) = block_on(async {
                let service = service_with_seed(seed);
                let lineups = mint_lineups(&service, &owners).await;
                let chosen = pick.index(lineups.len());
                let owner = ACCOUNTS[owners[chosen]];

                let before = service.snapshot().await;
                let band = service
                    .form_band(owner, "Round trip", "Rock", lineups[chosen])
                    .await
                    .unwrap();
                let formed = service.check_invariants().await.is_valid();
                service.disband_band(owner, band).await.unwrap();
                let after = service.snapshot().await;
                (before, after, formed && service.check_invariants().await.is_valid())
            });

            prop_assert_eq!(before, after);
            prop_assert!(invariants_hold);
        }

        #[test]
        fn test_rejected_formation_is_idempotent(
            owner in 0usize..3,
            intruder_offset in 1usize..3,
            attempts in 1u64..5,
        ) {
            let intruder = ACCOUNTS[(owner + intruder_offset) % 3];
            let (before, after, rejected) = block_on(async {
                let service = service_with_seed(7);
                let lineups = mint_lineups(&service, &[owner]).await;
                let before = service.snapshot().await;

                for _ in 0..attempts {
                    let err = service
                        .form_band(intruder, "Stolen", "Punk", lineups[0])
                        .await
                        .unwrap_err();
                    assert!(err.is_authorization());
                }
                (before, service.snapshot().await, service.stats().await.rejected_operations)
            });

            prop_assert_eq!(before, after);
            prop_assert_eq!(rejected, attempts);
        }

        #[test]
        fn test_first_misplaced_slot_is_reported(
            order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle(),
        ) {
            let result = block_on(async {
                let service = service_with_seed(1);
                let lineup = mint_full_lineup(&service, ADDR1, 1).await.unwrap();
                let members = lineup.members();
                let shuffled = Lineup {
                    vocalist_id: members[order[0]],
                    lead_guitar_id: members[order[1]],
                    rhythm_guitar_id: members[order[2]],
                    bass_id: members[order[3]],
                    drums_id: members[order[4]],
                };
                service.form_band(ADDR1, "Shuffle", "Jazz", shuffled).await
            });

            match order.iter().enumerate().find(|(slot, role)| *slot != **role) {
                Some((slot, _)) => {
                    let err = result.unwrap_err();
                    prop_assert_eq!(err.slot(), Some(Slot::ALL[slot]));
                    prop_assert_eq!(err.kind(), ErrorKind::WrongRole);
                }
                None => prop_assert!(result.is_ok()),
            }
        }

        #[test]
        fn test_failing_change_set_leaves_store_untouched(
            artists in 2u64..8,
            fail_at in any::<prop::sample::Index>(),
            with_create in any::<bool>(),
        ) {
            let mut store = InMemoryAssetStore::new();
            let mut approvals = Approvals::new();
            for id in 1..=artists {
                store
                    .insert(Asset {
                        id: AssetId(id),
                        name: format!("Artist {id}"),
                        holder: Holder::Account(ADDR1),
                        details: AssetDetails::Artist { role: ArtistRole::Bass },
                    })
                    .unwrap();
                approvals.set_delegate(AssetId(id), Some(ADDR3));
            }
            let before: Vec<Asset> = store.assets().cloned().collect();
            let approvals_before = approvals.clone();
            let next_before = store.peek_next_id().unwrap();

            let bad = AssetId(fail_at.index(artists as usize) as u64 + 1);
            let mut changes = ChangeSet::new();
            if with_create {
                changes.create(Asset {
                    id: next_before,
                    name: "Studio".into(),
                    holder: Holder::Account(ADDR2),
                    details: AssetDetails::Studio,
                });
            }
            for id in 1..=artists {
                let id = AssetId(id);
                // the staged holder for `bad` is wrong, so its transfer fails
                let from = if id == bad { ADDR2 } else { ADDR1 };
                changes.transfer(id, Holder::Account(from), Holder::Account(ADDR2));
            }

            let err = changes.apply(&mut store, &mut approvals).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::NotOwner);

            let after: Vec<Asset> = store.assets().cloned().collect();
            prop_assert_eq!(before, after);
            prop_assert_eq!(approvals, approvals_before);
            prop_assert_eq!(store.peek_next_id().unwrap(), next_before);
        }
    }
}
