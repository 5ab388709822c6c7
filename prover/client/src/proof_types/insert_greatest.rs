use nullset_hasher::Hasher;

use crate::{
    errors::ClaimError,
    proof_types::{
        circuit_type::CircuitType,
        insertion::{InsertionInputs, InsertionJsonStruct},
    },
};

/// Claims that `value` was appended after the greatest leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertGreatestInputs(pub InsertionInputs);

impl InsertGreatestInputs {
    pub fn verify<H>(&self) -> Result<(), ClaimError>
    where
        H: Hasher,
    {
        let inputs = &self.0;
        inputs.verify_witnesses::<H>()?;

        let low = &inputs.old_low_entry.leaf;
        if !low.is_greatest() {
            return Err(ClaimError::LowLeafNotGreatest);
        }
        if low.value >= inputs.value {
            return Err(ClaimError::ValueNotGreaterThanLowLeaf);
        }
        Ok(())
    }

    pub fn to_json(&self) -> InsertionJsonStruct {
        InsertionJsonStruct::from_insertion_inputs(CircuitType::InsertGreatest, &self.0)
    }
}
