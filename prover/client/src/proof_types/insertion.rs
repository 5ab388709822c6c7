use nullset_hasher::Hasher;
use nullset_indexed_array::array::LeafEntry;
use nullset_indexed_merkle_tree::IndexedInsertion;
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

/// Evidence shared by the `insert-greatest` and `insert-within` claims.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertionInputs {
    pub height: usize,
    pub old_root: [u8; 32],
    pub new_root: [u8; 32],
    pub value: BigUint,
    /// Low leaf as stored under `old_root`.
    pub old_low_entry: LeafEntry<usize>,
    pub old_low_witness: MerkleWitness,
    pub new_leaf_hash: [u8; 32],
    pub new_leaf_witness: MerkleWitness,
}

impl InsertionInputs {
    pub fn from_insertion<H>(
        height: usize,
        insertion: &IndexedInsertion<usize>,
    ) -> Result<Self, ClaimError>
    where
        H: Hasher,
    {
        Ok(Self {
            height,
            old_root: insertion.old_root,
            new_root: insertion.new_root,
            value: insertion.value.clone(),
            old_low_entry: insertion.old_low_entry.clone(),
            old_low_witness: insertion.old_low_witness.clone(),
            new_leaf_hash: insertion.new_entry.hash::<H>()?,
            new_leaf_witness: insertion.new_entry_witness.clone(),
        })
    }

    /// Checks both witnesses against their roots.
    pub fn verify_witnesses<H>(&self) -> Result<(), ClaimError>
    where
        H: Hasher,
    {
        check_height(self.height)?;
        if self.old_low_witness.leaf_index != self.old_low_entry.index() {
            return Err(ClaimError::WitnessIndexMismatch {
                expected: self.old_low_entry.index(),
                actual: self.old_low_witness.leaf_index,
            });
        }
        let old_low_leaf = self.old_low_entry.hash::<H>()?;
        if !self
            .old_low_witness
            .verify::<H>(&old_low_leaf, &self.old_root, self.height)
        {
            return Err(ClaimError::OldWitnessMismatch);
        }
        if !self
            .new_leaf_witness
            .verify::<H>(&self.new_leaf_hash, &self.new_root, self.height)
        {
            return Err(ClaimError::NewWitnessMismatch);
        }
        Ok(())
    }
}

#[derive(Serialize, Debug)]
pub struct InsertionJsonStruct {
    #[serde(rename = "circuitType")]
    pub circuit_type: String,
    #[serde(rename = "treeHeight")]
    pub tree_height: u32,
    #[serde(rename = "oldRoot")]
    pub old_root: String,
    #[serde(rename = "newRoot")]
    pub new_root: String,
    pub value: String,

    #[serde(rename(serialize = "lowElementValue"))]
    pub low_element_value: String,
    #[serde(rename(serialize = "lowElementNextIndex"))]
    pub low_element_next_index: u32,
    #[serde(rename(serialize = "lowElementNextValue"))]
    pub low_element_next_value: String,
    #[serde(rename(serialize = "lowElementPathIndex"))]
    pub low_element_path_index: u32,
    #[serde(rename(serialize = "lowElementPathElements"))]
    pub low_element_path_elements: Vec<String>,

    #[serde(rename(serialize = "newLeafHash"))]
    pub new_leaf_hash: String,
    #[serde(rename(serialize = "newLeafPathIndex"))]
    pub new_leaf_path_index: u32,
    #[serde(rename(serialize = "newLeafPathElements"))]
    pub new_leaf_path_elements: Vec<String>,
}

impl InsertionJsonStruct {
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        create_json_from_struct(&self)
    }

    pub fn from_insertion_inputs(circuit_type: CircuitType, inputs: &InsertionInputs) -> Self {
        let low = &inputs.old_low_entry;
        Self {
            circuit_type: circuit_type.to_string(),
            tree_height: inputs.height as u32,
            old_root: bytes_to_string(&inputs.old_root),
            new_root: bytes_to_string(&inputs.new_root),
            value: big_uint_to_string(&inputs.value),
            low_element_value: big_uint_to_string(&low.leaf.value),
            low_element_next_index: low.leaf.next_index as u32,
            low_element_next_value: big_uint_to_string(&low.leaf.next_value),
            low_element_path_index: inputs.old_low_witness.leaf_index as u32,
            low_element_path_elements: path_to_strings(&inputs.old_low_witness),
            new_leaf_hash: bytes_to_string(&inputs.new_leaf_hash),
            new_leaf_path_index: inputs.new_leaf_witness.leaf_index as u32,
            new_leaf_path_elements: path_to_strings(&inputs.new_leaf_witness),
        }
    }
}
