use nullset_hasher::{hash_to_field_size::hash_to_bn254_field_size_be, Hasher};
use nullset_indexed_merkle_tree::IndexedMerkleTree;
use num_bigint::BigUint;
use tracing::{info, warn};

use crate::{
    config::AccumulatorConfig,
    errors::ProverClientError,
    proof_system::{Attestation, NativeProofSystem, ProofSystem},
    proof_types::TransitionClaim,
};

/// Single writer of an indexed nullifier tree and of its attestation chain.
///
/// Every insertion is attested as an extension of the current head
/// attestation. The tree never runs ahead of the chain: when an insertion
/// cannot be attested, it is reverted.
#[derive(Debug)]
pub struct NullifierAccumulator<H, P = NativeProofSystem<H>>
where
    H: Hasher,
    P: ProofSystem,
{
    tree: IndexedMerkleTree<H, usize>,
    prover: P,
    head: Attestation,
}

impl<H, P> NullifierAccumulator<H, P>
where
    H: Hasher,
    P: ProofSystem,
{
    /// Creates an empty tree and attests its initial root.
    pub fn new(config: &AccumulatorConfig, prover: P) -> Result<Self, ProverClientError> {
        config.validate()?;
        let tree = IndexedMerkleTree::<H, usize>::new(config.height)?;
        let claim = TransitionClaim::init(config.height, tree.root());
        let head = prover.prove(&claim, None)?;
        info!(
            "nullifier accumulator initialized, height {}, root {:?}",
            config.height,
            &head.root[..4]
        );
        Ok(Self { tree, prover, head })
    }

    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Attestation of the current root.
    pub fn head(&self) -> &Attestation {
        &self.head
    }

    pub fn tree(&self) -> &IndexedMerkleTree<H, usize> {
        &self.tree
    }

    pub fn prover(&self) -> &P {
        &self.prover
    }

    /// Inserts `value` and extends the chain with the attestation of the
    /// insertion.
    pub fn insert(&mut self, value: &BigUint) -> Result<Attestation, ProverClientError> {
        let insertion = self.tree.insert(value)?;
        let attestation = TransitionClaim::from_insertion::<H>(self.tree.height(), &insertion)
            .map_err(ProverClientError::from)
            .and_then(|claim| self.prover.prove(&claim, Some(&self.head)));

        match attestation {
            Ok(attestation) => {
                info!(
                    "{} attested, {} leaves, root {:?}",
                    attestation.circuit_type,
                    self.tree.len(),
                    &attestation.root[..4]
                );
                self.head = attestation.clone();
                Ok(attestation)
            }
            Err(e) => {
                warn!("insertion of {} failed, reverting: {}", value, e);
                self.tree.revert_insert(&insertion)?;
                Err(e)
            }
        }
    }

    /// Derives a nullifier from arbitrary `data` and inserts it. Returns the
    /// nullifier together with the attestation of its insertion.
    pub fn insert_bytes(
        &mut self,
        data: &[u8],
    ) -> Result<(BigUint, Attestation), ProverClientError> {
        let value = BigUint::from_bytes_be(&hash_to_bn254_field_size_be(data)?);
        let attestation = self.insert(&value)?;
        Ok((value, attestation))
    }

    /// Attests that `value` is not yet part of the set under the current
    /// root.
    pub fn prove_non_membership(
        &self,
        value: &BigUint,
    ) -> Result<Attestation, ProverClientError> {
        let proof = self.tree.non_inclusion_proof(value)?;
        let claim = TransitionClaim::from_non_inclusion_proof(self.tree.height(), &proof);
        self.prover.prove(&claim, None)
    }
}
