//! # Verifier Flows
//!
//! End-to-end runs of the static, dynamic and inquiring verifiers against
//! generated validator sets.
//!
//! ## Flows Tested:
//!
//! 1. **Static**: fixed set, power thresholds, foreign sets
//! 2. **Dynamic**: roll-forward and rejection of past heights
//! 3. **Inquiring**: valid path, minimal path, historical realignment
//! 4. **Proxy**: header and block checks against a certified commit

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lite_client::domain::Data;
    use lite_client::test_utils::{init_test_logging, ValKeys};
    use lite_client::{
        validate_block, validate_header, Block, Certifier, DynamicVerifier, FullCommit,
        InquiringVerifier, LiteError, MemoryProvider, Provider, StaticVerifier,
    };

    const CHAIN_ID: &str = "lite-test-chain";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Commits where every step adds one validator (heights 20, 30, ...).
    fn growing_by_one(count: usize) -> Vec<FullCommit> {
        let mut keys = ValKeys::gen(5);
        let mut commits = Vec::with_capacity(count);
        for i in 0..count {
            let vals = keys.to_validators(10, 0);
            let h = 20 + 10 * i as u64;
            commits.push(keys.gen_full_commit(CHAIN_ID, h, &[], &vals, b"app", 0, keys.len()));
            keys = keys.extend(1);
        }
        commits
    }

    /// Commits where every step grows the set by `len / 2 - 1`, so any two
    /// steps together fall just short of 2/3 overlap (heights 5, 15, ...).
    fn growing_by_half(count: usize) -> Vec<FullCommit> {
        let mut keys = ValKeys::gen(5);
        let mut commits = Vec::with_capacity(count);
        for i in 0..count {
            keys = keys.extend(keys.len() / 2 - 1);
            let vals = keys.to_validators(10, 0);
            let h = 5 + 10 * i as u64;
            let app_hash = format!("h={}", h);
            commits.push(keys.gen_full_commit(
                CHAIN_ID,
                h,
                &[],
                &vals,
                app_hash.as_bytes(),
                0,
                keys.len(),
            ));
        }
        commits
    }

    async fn inquiring(
        seed: &FullCommit,
    ) -> (Arc<MemoryProvider>, Arc<MemoryProvider>, InquiringVerifier) {
        let trusted = Arc::new(MemoryProvider::new());
        let source = Arc::new(MemoryProvider::new());
        let cert = InquiringVerifier::new(CHAIN_ID, seed.clone(), trusted.clone(), source.clone())
            .await
            .expect("seed is valid");
        (trusted, source, cert)
    }

    // =============================================================================
    // STATIC AND DYNAMIC VERIFIERS
    // =============================================================================

    #[test]
    fn test_static_happy_path() {
        init_test_logging();
        let keys = ValKeys::gen(4);
        let vals = keys.to_validators(20, 10);
        let mut cert = StaticVerifier::new(CHAIN_ID, vals.clone());

        let all = keys.gen_commit(CHAIN_ID, 1, &[], &vals, b"app", 0, 4);
        assert!(cert.certify(&all).is_ok());

        let top_three = keys.gen_commit(CHAIN_ID, 1, &[], &vals, b"app", 1, 4);
        assert!(cert.certify(&top_three).is_ok());

        let bottom_three = keys.gen_commit(CHAIN_ID, 1, &[], &vals, b"app", 0, 3);
        let err = cert.certify(&bottom_three).unwrap_err();
        assert!(!err.is_validators_changed());
        assert!(matches!(err, LiteError::InvalidCommit(_)));

        let changed = keys.to_validators(20, 11);
        let foreign = keys.gen_commit(CHAIN_ID, 1, &[], &changed, b"app", 0, 4);
        assert!(cert.certify(&foreign).unwrap_err().is_validators_changed());
    }

    #[test]
    fn test_dynamic_roll_forward() {
        init_test_logging();
        let keys = ValKeys::gen(4);
        let vals = keys.to_validators(10, 0);
        let mut cert = DynamicVerifier::new(CHAIN_ID, vals.clone(), 40);

        let forward = keys.gen_full_commit(CHAIN_ID, 100, &[], &vals, b"app", 0, 3);
        cert.update(&forward).unwrap();
        assert_eq!(cert.last_height(), 100);

        let back = keys.gen_full_commit(CHAIN_ID, 30, &[], &vals, b"app", 0, 4);
        assert!(cert.update(&back).unwrap_err().is_past_time());
        assert_eq!(cert.last_height(), 100);
        assert_eq!(cert.validators_hash(), vals.hash());
    }

    // =============================================================================
    // INQUIRING VERIFIER
    // =============================================================================

    #[tokio::test]
    async fn test_inquiring_valid_path() {
        init_test_logging();
        let commits = growing_by_one(50);
        let (trusted, source, mut cert) = inquiring(&commits[0]).await;
        let target = &commits[49];

        assert!(cert.certify(&target.commit).await.is_err());

        for fc in &commits[10..13] {
            source.store_commit(fc).await.unwrap();
        }
        assert!(cert.certify(&target.commit).await.is_err());
        assert_eq!(cert.last_height(), commits[0].height());

        for fc in &commits {
            source.store_commit(fc).await.unwrap();
        }
        cert.certify(&target.commit).await.unwrap();

        assert_eq!(cert.validators_hash(), target.validators_hash());
        assert_eq!(cert.last_height(), target.height());
        assert_eq!(trusted.latest_commit().await.unwrap(), *target);

        // Seed plus one entry per successful step, bounded by the bisection depth.
        let span = (target.height() - commits[0].height()) as f64;
        let max_steps = span.log2().ceil() as usize + 1;
        assert!(trusted.len() - 1 <= max_steps);
    }

    #[tokio::test]
    async fn test_inquiring_minimal_path() {
        init_test_logging();
        let commits = growing_by_half(12);
        let (_, source, mut cert) = inquiring(&commits[0]).await;
        let target = &commits[11].commit;

        assert!(cert.certify(target).await.is_err());

        for fc in &commits[5..8] {
            source.store_commit(fc).await.unwrap();
        }
        assert!(cert.certify(target).await.is_err());

        for fc in &commits {
            source.store_commit(fc).await.unwrap();
        }
        cert.certify(target).await.unwrap();
        assert_eq!(cert.validators_hash(), target.validators_hash());
    }

    #[tokio::test]
    async fn test_inquiring_historical_commit() {
        init_test_logging();
        let commits = growing_by_one(50);
        let (_, source, mut cert) = inquiring(&commits[0]).await;
        for fc in &commits {
            source.store_commit(fc).await.unwrap();
        }
        cert.certify(&commits[49].commit).await.unwrap();

        // An older commit realigns to the closest trusted height below it.
        let old = &commits[5];
        cert.certify(&old.commit).await.unwrap();
        assert_eq!(cert.validators_hash(), old.validators_hash());
        assert_eq!(cert.last_height(), old.height());
    }

    #[tokio::test]
    async fn test_inquiring_update_direct() {
        init_test_logging();
        let commits = growing_by_one(5);
        let (trusted, _, mut cert) = inquiring(&commits[0]).await;

        cert.update(&commits[1]).await.unwrap();
        assert_eq!(trusted.latest_commit().await.unwrap(), commits[1]);

        let err = cert.update(&commits[1]).await.unwrap_err();
        assert!(err.is_past_time());
    }

    // =============================================================================
    // PROXY VALIDATION
    // =============================================================================

    #[tokio::test]
    async fn test_block_matches_certified_commit() {
        init_test_logging();
        let keys = ValKeys::gen(4);
        let vals = keys.to_validators(10, 0);
        let txs = vec![b"alice->bob".to_vec(), b"bob->carol".to_vec()];
        let seed = keys.gen_full_commit(CHAIN_ID, 10, &[], &vals, b"app", 0, 4);
        let (_, _, mut cert) = inquiring(&seed).await;

        let commit = keys.gen_commit(CHAIN_ID, 20, &txs, &vals, b"app", 0, 4);
        cert.certify(&commit).await.unwrap();

        let block = Block {
            header: commit.header.clone(),
            data: Data::new(txs.clone()),
        };
        validate_header(Some(&block.header), &commit).unwrap();
        validate_block(Some(&block), &commit).unwrap();

        let tampered = Block {
            header: commit.header.clone(),
            data: Data::new(vec![b"mallory->mallory".to_vec()]),
        };
        assert!(matches!(
            validate_block(Some(&tampered), &commit).unwrap_err(),
            LiteError::InvalidBlock(_)
        ));
        assert!(validate_block(None, &commit).is_err());
    }
}
