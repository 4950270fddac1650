//! Test helpers: validator key sets and signed commits.
//!
//! Available to this crate's tests and, behind the `test-utils` feature, to
//! other crates in the workspace.

use lite_crypto::{sha256, Ed25519KeyPair};

use crate::domain::{
    canonical_sign_bytes, BlockId, Commit, CommitSignatures, Data, FullCommit, Header, Validator,
    ValidatorSet, Vote,
};

/// Ordered list of validator signing keys.
#[derive(Clone, Debug)]
pub struct ValKeys(Vec<Ed25519KeyPair>);

impl ValKeys {
    /// Generate `n` random keys.
    pub fn gen(n: usize) -> Self {
        Self((0..n).map(|_| Ed25519KeyPair::generate()).collect())
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy with the key at `i` replaced by a fresh one.
    pub fn change(&self, i: usize) -> Self {
        let mut keys = self.0.clone();
        keys[i] = Ed25519KeyPair::generate();
        Self(keys)
    }

    /// Copy with `n` fresh keys appended.
    pub fn extend(&self, n: usize) -> Self {
        let mut keys = self.0.clone();
        keys.extend(Self::gen(n).0);
        Self(keys)
    }

    /// Validator set where key `i` has power `init + i * inc`.
    pub fn to_validators(&self, init: u64, inc: u64) -> ValidatorSet {
        let validators = self
            .0
            .iter()
            .enumerate()
            .map(|(i, k)| Validator::new(k.public_key(), init + i as u64 * inc))
            .collect();
        ValidatorSet::new(validators)
    }

    /// Precommits for `header` from keys `first..last`, placed at each
    /// signer's index in the address-sorted set.
    pub fn sign_header(&self, header: &Header, first: usize, last: usize) -> CommitSignatures {
        let vset = self.to_validators(1, 0);
        let block_id = BlockId::new(header.hash());
        let sign_bytes = canonical_sign_bytes(&header.chain_id, header.height, 0, &block_id);

        let mut precommits: Vec<Option<Vote>> = vec![None; self.len()];
        for key in self.0.iter().take(last).skip(first) {
            let address = key.public_key().address();
            let (idx, _) = vset
                .get_by_address(&address)
                .expect("key is part of its own validator set");
            precommits[idx] = Some(Vote {
                validator_address: address,
                validator_index: idx as u32,
                height: header.height,
                round: 0,
                block_id,
                signature: key.sign(&sign_bytes),
            });
        }

        CommitSignatures {
            block_id,
            precommits,
        }
    }

    /// Commit at `height` for `vals`, signed by keys `first..last`.
    #[allow(clippy::too_many_arguments)]
    pub fn gen_commit(
        &self,
        chain_id: &str,
        height: u64,
        txs: &[Vec<u8>],
        vals: &ValidatorSet,
        app_hash: &[u8],
        first: usize,
        last: usize,
    ) -> Commit {
        let header = gen_header(chain_id, height, txs, vals, app_hash);
        let signatures = self.sign_header(&header, first, last);
        Commit::new(header, signatures)
    }

    /// Same as [`ValKeys::gen_commit`], paired with `vals`.
    #[allow(clippy::too_many_arguments)]
    pub fn gen_full_commit(
        &self,
        chain_id: &str,
        height: u64,
        txs: &[Vec<u8>],
        vals: &ValidatorSet,
        app_hash: &[u8],
        first: usize,
        last: usize,
    ) -> FullCommit {
        let commit = self.gen_commit(chain_id, height, txs, vals, app_hash, first, last);
        FullCommit::new(commit, vals.clone())
    }
}

/// Header at `height` referencing `vals` and carrying `txs`.
pub fn gen_header(
    chain_id: &str,
    height: u64,
    txs: &[Vec<u8>],
    vals: &ValidatorSet,
    app_hash: &[u8],
) -> Header {
    Header {
        chain_id: chain_id.to_string(),
        height,
        time: 1_700_000_000 + height,
        num_txs: txs.len() as u64,
        last_block_id: BlockId::default(),
        validators_hash: vals.hash(),
        data_hash: Data::new(txs.to_vec()).hash(),
        app_hash: sha256(app_hash),
        consensus_hash: sha256(b"cons-hash"),
        results_hash: sha256(b"res-hash"),
    }
}

/// Install a test-friendly tracing subscriber (honours `RUST_LOG`). Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
