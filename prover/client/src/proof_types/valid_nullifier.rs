use nullset_hasher::Hasher;
use nullset_indexed_array::array::LeafEntry;
use nullset_indexed_merkle_tree::NonInclusionProof;
use nullset_merkle_tree_reference::MerkleWitness;
use num_bigint::BigUint;
use serde::Serialize;

use crate::{
    errors::ClaimError,
    helpers::{
        big_uint_to_string, bytes_to_string, check_height, create_json_from_struct,
        path_to_strings,
    },
    proof_types::circuit_type::CircuitType,
};

/// Claims that `value` lies strictly between the value and the next value of
/// a leaf included under `root`, so no leaf holds `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidNullifierInputs {
    pub height: usize,
    pub root: [u8; 32],
    pub value: BigUint,
    pub low_entry: LeafEntry<usize>,
    pub witness: MerkleWitness,
}

impl ValidNullifierInputs {
    pub fn from_non_inclusion_proof(height: usize, proof: &NonInclusionProof<usize>) -> Self {
        Self {
            height,
            root: proof.root,
            value: proof.value.clone(),
            low_entry: proof.low_entry.clone(),
            witness: proof.witness.clone(),
        }
    }

    pub fn verify<H>(&self) -> Result<(), ClaimError>
    where
        H: Hasher,
    {
        check_height(self.height)?;
        if self.witness.leaf_index != self.low_entry.index() {
            return Err(ClaimError::WitnessIndexMismatch {
                expected: self.low_entry.index(),
                actual: self.witness.leaf_index,
            });
        }
        let leaf = self.low_entry.hash::<H>()?;
        if !self.witness.verify::<H>(&leaf, &self.root, self.height) {
            return Err(ClaimError::WitnessMismatch);
        }
        if self.low_entry.leaf.value >= self.value {
            return Err(ClaimError::ValueNotGreaterThanLowLeaf);
        }
        if self.value >= self.low_entry.leaf.next_value {
            return Err(ClaimError::ValueNotLessThanNextValue);
        }
        Ok(())
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ValidNullifierJsonStruct {
    #[serde(rename = "circuitType")]
    pub circuit_type: String,
    #[serde(rename = "treeHeight")]
    pub tree_height: u32,
    pub root: String,
    pub value: String,

    #[serde(rename(serialize = "pathIndex"))]
    pub path_index: u32,

    #[serde(rename(serialize = "pathElements"))]
    pub path_elements: Vec<String>,

    #[serde(rename(serialize = "leafLowerRangeValue"))]
    pub leaf_lower_range_value: String,

    #[serde(rename(serialize = "leafHigherRangeValue"))]
    pub leaf_higher_range_value: String,

    #[serde(rename(serialize = "nextIndex"))]
    pub next_index: u32,
}

impl ValidNullifierJsonStruct {
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        create_json_from_struct(&self)
    }

    pub fn from_valid_nullifier_inputs(inputs: &ValidNullifierInputs) -> Self {
        Self {
            circuit_type: CircuitType::ValidNullifier.to_string(),
            tree_height: inputs.height as u32,
            root: bytes_to_string(&inputs.root),
            value: big_uint_to_string(&inputs.value),
            path_index: inputs.witness.leaf_index as u32,
            path_elements: path_to_strings(&inputs.witness),
            leaf_lower_range_value: big_uint_to_string(&inputs.low_entry.leaf.value),
            leaf_higher_range_value: big_uint_to_string(&inputs.low_entry.leaf.next_value),
            next_index: inputs.low_entry.leaf.next_index as u32,
        }
    }
}
