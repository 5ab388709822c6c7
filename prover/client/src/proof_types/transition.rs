use nullset_hasher::Hasher;
use nullset_indexed_merkle_tree::{IndexedInsertion, NonInclusionProof};
use num_bigint::BigUint;

use crate::{
    errors::{ClaimError, ProverClientError},
    proof_types::{
        circuit_type::CircuitType,
        init::{InitInputs, InitJsonStruct},
        insert_greatest::InsertGreatestInputs,
        insert_within::InsertWithinInputs,
        insertion::InsertionInputs,
        valid_nullifier::{ValidNullifierInputs, ValidNullifierJsonStruct},
    },
};

/// A claim about the transition between two roots, or about a single root
/// in case of `init` and `valid-nullifier`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionClaim {
    Init(InitInputs),
    InsertGreatest(InsertGreatestInputs),
    InsertWithin(InsertWithinInputs),
    ValidNullifier(ValidNullifierInputs),
}

impl TransitionClaim {
    pub fn init(height: usize, root: [u8; 32]) -> Self {
        TransitionClaim::Init(InitInputs { height, root })
    }

    /// Builds the insertion claim matching the low leaf: `insert-greatest`
    /// when it was the greatest leaf, `insert-within` otherwise.
    pub fn from_insertion<H>(
        height: usize,
        insertion: &IndexedInsertion<usize>,
    ) -> Result<Self, ClaimError>
    where
        H: Hasher,
    {
        let inputs = InsertionInputs::from_insertion::<H>(height, insertion)?;
        if insertion.old_low_entry.leaf.is_greatest() {
            Ok(TransitionClaim::InsertGreatest(InsertGreatestInputs(inputs)))
        } else {
            Ok(TransitionClaim::InsertWithin(InsertWithinInputs(inputs)))
        }
    }

    pub fn from_non_inclusion_proof(height: usize, proof: &NonInclusionProof<usize>) -> Self {
        TransitionClaim::ValidNullifier(ValidNullifierInputs::from_non_inclusion_proof(
            height, proof,
        ))
    }

    pub fn circuit_type(&self) -> CircuitType {
        match self {
            TransitionClaim::Init(_) => CircuitType::Init,
            TransitionClaim::InsertGreatest(_) => CircuitType::InsertGreatest,
            TransitionClaim::InsertWithin(_) => CircuitType::InsertWithin,
            TransitionClaim::ValidNullifier(_) => CircuitType::ValidNullifier,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            TransitionClaim::Init(inputs) => inputs.height,
            TransitionClaim::InsertGreatest(inputs) => inputs.0.height,
            TransitionClaim::InsertWithin(inputs) => inputs.0.height,
            TransitionClaim::ValidNullifier(inputs) => inputs.height,
        }
    }

    /// Root which the prior attestation has to be bound to.
    pub fn old_root(&self) -> Option<[u8; 32]> {
        match self {
            TransitionClaim::InsertGreatest(inputs) => Some(inputs.0.old_root),
            TransitionClaim::InsertWithin(inputs) => Some(inputs.0.old_root),
            TransitionClaim::Init(_) | TransitionClaim::ValidNullifier(_) => None,
        }
    }

    /// Root which the attestation of this claim is bound to.
    pub fn root(&self) -> [u8; 32] {
        match self {
            TransitionClaim::Init(inputs) => inputs.root,
            TransitionClaim::InsertGreatest(inputs) => inputs.0.new_root,
            TransitionClaim::InsertWithin(inputs) => inputs.0.new_root,
            TransitionClaim::ValidNullifier(inputs) => inputs.root,
        }
    }

    pub fn value(&self) -> Option<&BigUint> {
        match self {
            TransitionClaim::Init(_) => None,
            TransitionClaim::InsertGreatest(inputs) => Some(&inputs.0.value),
            TransitionClaim::InsertWithin(inputs) => Some(&inputs.0.value),
            TransitionClaim::ValidNullifier(inputs) => Some(&inputs.value),
        }
    }

    /// Evaluates the predicate of the claim, without looking at any prior
    /// attestation.
    pub fn verify<H>(&self) -> Result<(), ClaimError>
    where
        H: Hasher,
    {
        match self {
            TransitionClaim::Init(inputs) => inputs.verify::<H>(),
            TransitionClaim::InsertGreatest(inputs) => inputs.verify::<H>(),
            TransitionClaim::InsertWithin(inputs) => inputs.verify::<H>(),
            TransitionClaim::ValidNullifier(inputs) => inputs.verify::<H>(),
        }
    }

    /// Renders the claim as JSON inputs of an external circuit prover.
    pub fn to_json(&self) -> Result<String, ProverClientError> {
        let json = match self {
            TransitionClaim::Init(inputs) => InitJsonStruct::from_init_inputs(inputs).to_string(),
            TransitionClaim::InsertGreatest(inputs) => inputs.to_json().to_string(),
            TransitionClaim::InsertWithin(inputs) => inputs.to_json().to_string(),
            TransitionClaim::ValidNullifier(inputs) => {
                ValidNullifierJsonStruct::from_valid_nullifier_inputs(inputs).to_string()
            }
        }?;
        Ok(json)
    }
}
