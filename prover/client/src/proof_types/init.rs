use nullset_hasher::Hasher;
use serde::Serialize;

use crate::{
    errors::ClaimError,
    helpers::{bytes_to_string, create_json_from_struct, empty_indexed_tree_root},
    proof_types::circuit_type::CircuitType,
};

/// Claims that `root` is the root of an indexed tree which holds only the
/// sentinel leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitInputs {
    pub height: usize,
    pub root: [u8; 32],
}

impl InitInputs {
    pub fn verify<H>(&self) -> Result<(), ClaimError>
    where
        H: Hasher,
    {
        if self.root != empty_indexed_tree_root::<H>(self.height)? {
            return Err(ClaimError::InitialRootMismatch);
        }
        Ok(())
    }
}

#[derive(Serialize, Debug)]
pub struct InitJsonStruct {
    #[serde(rename = "circuitType")]
    pub circuit_type: String,
    #[serde(rename = "treeHeight")]
    pub tree_height: u32,
    pub root: String,
}

impl InitJsonStruct {
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        create_json_from_struct(&self)
    }

    pub fn from_init_inputs(inputs: &InitInputs) -> Self {
        Self {
            circuit_type: CircuitType::Init.to_string(),
            tree_height: inputs.height as u32,
            root: bytes_to_string(&inputs.root),
        }
    }
}
