use std::marker::PhantomData;

use dashmap::DashSet;
use nullset_hasher::{bigint::bigint_to_be_bytes_array, errors::HasherError, Hasher};
use num_bigint::BigUint;
use tracing::{debug, warn};

use crate::{
    errors::ProverClientError,
    proof_types::{circuit_type::CircuitType, TransitionClaim},
};

/// Proof that a claim was verified. Attestations of chained circuits are
/// bound to the attestation they extend through `prior_seal`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attestation {
    pub circuit_type: CircuitType,
    pub height: usize,
    pub root: [u8; 32],
    pub value: Option<BigUint>,
    pub prior_seal: Option<[u8; 32]>,
    pub seal: [u8; 32],
}

pub trait ProofSystem {
    /// Verifies `claim`, and `prior` for insertion claims, and issues an
    /// attestation bound to the root of the claim.
    fn prove(
        &self,
        claim: &TransitionClaim,
        prior: Option<&Attestation>,
    ) -> Result<Attestation, ProverClientError>;

    fn verify(&self, attestation: &Attestation) -> bool;
}

/// In-process proof system which evaluates claim predicates directly.
///
/// Seals commit to every field of an attestation and are recorded when
/// issued; only attestations issued by the same instance verify.
#[derive(Debug)]
pub struct NativeProofSystem<H>
where
    H: Hasher,
{
    issued: DashSet<[u8; 32]>,
    _hasher: PhantomData<H>,
}

impl<H> Default for NativeProofSystem<H>
where
    H: Hasher,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> NativeProofSystem<H>
where
    H: Hasher,
{
    pub fn new() -> Self {
        Self {
            issued: DashSet::new(),
            _hasher: PhantomData,
        }
    }

    /// Number of attestations issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    fn seal(
        circuit_type: CircuitType,
        height: usize,
        root: &[u8; 32],
        value: Option<&BigUint>,
        prior_seal: Option<&[u8; 32]>,
    ) -> Result<[u8; 32], HasherError> {
        let value = match value {
            Some(value) => bigint_to_be_bytes_array::<32>(value)?,
            None => [0u8; 32],
        };
        let prior_seal = prior_seal.copied().unwrap_or([0u8; 32]);
        H::hashv(&[
            &[circuit_type.tag()],
            &(height as u64).to_be_bytes(),
            root,
            &value,
            &prior_seal,
        ])
    }

    /// Checks that `prior` verifies, extends the chain and ends in the old
    /// root of `claim`.
    fn check_prior(
        &self,
        claim: &TransitionClaim,
        prior: Option<&Attestation>,
    ) -> Result<(), ProverClientError> {
        let circuit_type = claim.circuit_type();
        match (claim.old_root(), prior) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(ProverClientError::UnexpectedPriorAttestation(circuit_type)),
            (Some(_), None) => Err(ProverClientError::PriorAttestationMissing(circuit_type)),
            (Some(old_root), Some(prior)) => {
                if !self.verify(prior) || !prior.circuit_type.is_chained() {
                    return Err(ProverClientError::PriorAttestationInvalid);
                }
                if prior.root != old_root || prior.height != claim.height() {
                    return Err(ProverClientError::PriorAttestationMismatch);
                }
                Ok(())
            }
        }
    }
}

impl<H> ProofSystem for NativeProofSystem<H>
where
    H: Hasher,
{
    fn prove(
        &self,
        claim: &TransitionClaim,
        prior: Option<&Attestation>,
    ) -> Result<Attestation, ProverClientError> {
        let circuit_type = claim.circuit_type();
        if let Err(e) = self
            .check_prior(claim, prior)
            .and_then(|_| claim.verify::<H>().map_err(ProverClientError::from))
        {
            warn!("{} claim rejected: {}", circuit_type, e);
            return Err(e);
        }

        let prior_seal = prior.map(|prior| prior.seal);
        let root = claim.root();
        let value = claim.value().cloned();
        let seal = Self::seal(
            circuit_type,
            claim.height(),
            &root,
            value.as_ref(),
            prior_seal.as_ref(),
        )?;
        self.issued.insert(seal);
        debug!("{} attestation issued for root {:?}", circuit_type, &root[..4]);

        Ok(Attestation {
            circuit_type,
            height: claim.height(),
            root,
            value,
            prior_seal,
            seal,
        })
    }

    fn verify(&self, attestation: &Attestation) -> bool {
        match Self::seal(
            attestation.circuit_type,
            attestation.height,
            &attestation.root,
            attestation.value.as_ref(),
            attestation.prior_seal.as_ref(),
        ) {
            Ok(seal) => seal == attestation.seal && self.issued.contains(&seal),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use nullset_hasher::{Poseidon, Sha256};

    use super::*;
    use crate::helpers::empty_indexed_tree_root;

    #[test]
    fn test_init_attestation() {
        let prover = NativeProofSystem::<Poseidon>::new();
        let root = empty_indexed_tree_root::<Poseidon>(8).unwrap();
        let attestation = prover
            .prove(&TransitionClaim::init(8, root), None)
            .unwrap();
        assert!(prover.verify(&attestation));
        assert_eq!(attestation.root, root);
        assert_eq!(attestation.prior_seal, None);
        assert_eq!(prover.issued(), 1);

        // Same claim, different proof system.
        let other = NativeProofSystem::<Poseidon>::new();
        assert!(!other.verify(&attestation));
    }

    #[test]
    fn test_init_rejects_wrong_root() {
        let prover = NativeProofSystem::<Sha256>::new();
        let root = empty_indexed_tree_root::<Sha256>(8).unwrap();
        let wrong_height = empty_indexed_tree_root::<Sha256>(9).unwrap();

        assert!(matches!(
            prover.prove(&TransitionClaim::init(8, wrong_height), None),
            Err(ProverClientError::Claim(_))
        ));
        assert!(matches!(
            prover.prove(&TransitionClaim::init(8, [1; 32]), None),
            Err(ProverClientError::Claim(_))
        ));
        assert_eq!(prover.issued(), 0);

        let attestation = prover
            .prove(&TransitionClaim::init(8, root), None)
            .unwrap();
        assert!(matches!(
            prover.prove(&TransitionClaim::init(8, root), Some(&attestation)),
            Err(ProverClientError::UnexpectedPriorAttestation(CircuitType::Init))
        ));
    }

    #[test]
    fn test_tampered_attestation_does_not_verify() {
        let prover = NativeProofSystem::<Sha256>::new();
        let root = empty_indexed_tree_root::<Sha256>(4).unwrap();
        let attestation = prover
            .prove(&TransitionClaim::init(4, root), None)
            .unwrap();

        let mut tampered = attestation.clone();
        tampered.root = [7; 32];
        assert!(!prover.verify(&tampered));

        let mut tampered = attestation.clone();
        tampered.circuit_type = CircuitType::InsertGreatest;
        assert!(!prover.verify(&tampered));

        let mut tampered = attestation.clone();
        tampered.seal = [0; 32];
        assert!(!prover.verify(&tampered));

        assert!(prover.verify(&attestation));
    }
}
