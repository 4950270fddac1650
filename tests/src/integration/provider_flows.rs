//! # Provider Flows
//!
//! Providers exercised on their own and stacked under an inquiring verifier.
//!
//! ## Flows Tested:
//!
//! 1. **Memory**: linear and binary search agree
//! 2. **File**: missing-then-present, floor lookups across reopen
//! 3. **Cache**: best height wins and is written through
//! 4. **RPC**: inquiring verifier fed by a node, trust kept in memory + disk

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lite_client::test_utils::{init_test_logging, ValKeys};
    use lite_client::{
        CacheProvider, FileProvider, FullCommit, InquiringVerifier, LiteClientConfig,
        MemoryProvider, MockNode, Provider, RpcProvider,
    };
    use tempfile::TempDir;

    const CHAIN_ID: &str = "lite-provider-chain";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// One commit per height, all signed by the same set.
    fn same_set(heights: impl IntoIterator<Item = u64>) -> Vec<FullCommit> {
        let keys = ValKeys::gen(4);
        let vals = keys.to_validators(10, 0);
        heights
            .into_iter()
            .map(|h| keys.gen_full_commit(CHAIN_ID, h, &[], &vals, b"app", 0, keys.len()))
            .collect()
    }

    /// Consecutive heights `1..=count`, one new validator per height.
    fn growing_chain(count: u64) -> Vec<FullCommit> {
        let mut keys = ValKeys::gen(4);
        let mut commits = Vec::new();
        for h in 1..=count {
            let vals = keys.to_validators(10, 0);
            commits.push(keys.gen_full_commit(CHAIN_ID, h, &[], &vals, b"app", 0, keys.len()));
            keys = keys.extend(1);
        }
        commits
    }

    // =============================================================================
    // SINGLE PROVIDERS
    // =============================================================================

    #[tokio::test]
    async fn test_memory_search_equivalence() {
        init_test_logging();
        let provider = MemoryProvider::new();
        let heights = [7, 9, 12, 13, 18, 23, 44, 100, 199, 1024, 1_000_000_000];
        for fc in same_set(heights) {
            provider.store_commit(&fc).await.unwrap();
        }

        for h in [0, 1, 5, 7, 10, 14, 19, 43, 45, 1025, 1_000, 10_000, 1_000_000_001] {
            let linear = provider.get_by_height_linear_search(h).ok().map(|fc| fc.height());
            let binary = provider.get_by_height_binary_search(h).ok().map(|fc| fc.height());
            assert_eq!(linear, binary, "searches disagree at height {}", h);
        }
        assert_eq!(provider.get_by_height(45).await.unwrap().height(), 44);
    }

    #[tokio::test]
    async fn test_file_missing_then_present() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let provider = FileProvider::new(dir.path()).await.unwrap();

        assert!(provider.get_by_height(20).await.unwrap_err().is_commit_not_found());

        for fc in same_set((2..=11).map(|i| i * 10)) {
            provider.store_commit(&fc).await.unwrap();
        }

        assert_eq!(provider.get_by_height(47).await.unwrap().height(), 40);
        assert_eq!(provider.get_by_height(5000).await.unwrap().height(), 110);
        assert!(provider.get_by_height(5).await.unwrap_err().is_commit_not_found());

        let reopened = FileProvider::new(dir.path()).await.unwrap();
        assert_eq!(reopened.latest_commit().await.unwrap().height(), 110);
    }

    #[tokio::test]
    async fn test_store_is_idempotent_everywhere() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let memory: Arc<dyn Provider> = Arc::new(MemoryProvider::new());
        let files: Arc<dyn Provider> = Arc::new(FileProvider::new(dir.path()).await.unwrap());
        let fc = same_set([33]).remove(0);

        for provider in [memory, files] {
            provider.store_commit(&fc).await.unwrap();
            provider.store_commit(&fc).await.unwrap();
            assert_eq!(provider.get_by_height(33).await.unwrap(), fc);
            assert_eq!(provider.get_by_hash(&fc.validators_hash()).await.unwrap(), fc);
            assert_eq!(provider.latest_commit().await.unwrap(), fc);
        }
    }

    // =============================================================================
    // CACHE
    // =============================================================================

    #[tokio::test]
    async fn test_cache_best_height() {
        init_test_logging();
        let p1 = Arc::new(MemoryProvider::new());
        let p2 = Arc::new(MemoryProvider::new());
        for fc in same_set((1..=10).map(|i| i * 10)) {
            p2.store_commit(&fc).await.unwrap();
        }
        let cache = CacheProvider::new(vec![p1.clone() as Arc<dyn Provider>, p2.clone()]);

        assert_eq!(cache.get_by_height(57).await.unwrap().height(), 50);
        assert_eq!(p1.get_by_height(57).await.unwrap().height(), 50);

        assert_eq!(cache.get_by_height(99).await.unwrap().height(), 90);
    }

    #[tokio::test]
    async fn test_cache_never_below_any_layer() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let memory = Arc::new(MemoryProvider::new());
        let files = Arc::new(FileProvider::new(dir.path()).await.unwrap());
        let commits = same_set([10, 25, 40, 70]);
        memory.store_commit(&commits[0]).await.unwrap();
        memory.store_commit(&commits[2]).await.unwrap();
        files.store_commit(&commits[1]).await.unwrap();
        files.store_commit(&commits[3]).await.unwrap();

        let cache = CacheProvider::new(vec![memory.clone() as Arc<dyn Provider>, files.clone()]);
        for h in [10, 24, 30, 45, 69, 100] {
            let best = cache.get_by_height(h).await.unwrap().height();
            for layer in [memory.get_by_height(h).await, files.get_by_height(h).await] {
                if let Ok(fc) = layer {
                    assert!(best >= fc.height(), "cache {} below layer {}", best, fc.height());
                }
            }
        }
        assert_eq!(cache.latest_commit().await.unwrap().height(), 70);
    }

    // =============================================================================
    // FULL STACK
    // =============================================================================

    #[tokio::test]
    async fn test_inquiring_over_rpc_with_persistent_trust() {
        init_test_logging();
        let dir = TempDir::new().unwrap();
        let commits = growing_chain(16);

        let memory = Arc::new(MemoryProvider::new());
        let files = Arc::new(
            FileProvider::with_config(dir.path(), &LiteClientConfig::for_testing())
                .await
                .unwrap(),
        );
        let trusted: Arc<dyn Provider> = Arc::new(CacheProvider::new(vec![
            memory.clone() as Arc<dyn Provider>,
            files.clone(),
        ]));

        let node = Arc::new(MockNode::with_commits(commits.clone()));
        let rpc = Arc::new(RpcProvider::new(node));
        let source: Arc<dyn Provider> = rpc.clone();

        let mut cert = InquiringVerifier::new(CHAIN_ID, commits[0].clone(), trusted, source)
            .await
            .unwrap();

        let latest = rpc.latest_commit().await.unwrap();
        assert_eq!(latest.height(), 16);

        cert.certify(&latest.commit).await.unwrap();
        assert_eq!(cert.validators_hash(), latest.validators_hash());
        assert_eq!(rpc.last_height(), 16);

        // Trust survives on disk.
        let reopened = FileProvider::with_config(dir.path(), &LiteClientConfig::for_testing())
            .await
            .unwrap();
        assert_eq!(reopened.latest_commit().await.unwrap(), latest);
        assert_eq!(memory.latest_commit().await.unwrap(), latest);
    }

    #[tokio::test]
    async fn test_inquiring_over_failed_node() {
        init_test_logging();
        let commits = growing_chain(3);
        let node = Arc::new(MockNode::failing());

        let mut cert = InquiringVerifier::new(
            CHAIN_ID,
            commits[0].clone(),
            Arc::new(MemoryProvider::new()),
            Arc::new(RpcProvider::new(node)),
        )
        .await
        .unwrap();

        let err = cert.certify(&commits[2].commit).await.unwrap_err();
        assert!(!err.is_commit_not_found());
        assert_eq!(cert.last_height(), 1);
    }
}
