use nullset_hasher::Hasher;

use crate::{
    errors::ClaimError,
    proof_types::{
        circuit_type::CircuitType,
        insertion::{InsertionInputs, InsertionJsonStruct},
    },
};

/// Claims that `value` was inserted between the low leaf and its successor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertWithinInputs(pub InsertionInputs);

impl InsertWithinInputs {
    pub fn verify<H>(&self) -> Result<(), ClaimError>
    where
        H: Hasher,
    {
        let inputs = &self.0;
        inputs.verify_witnesses::<H>()?;

        let low = &inputs.old_low_entry.leaf;
        if low.value >= inputs.value {
            return Err(ClaimError::ValueNotGreaterThanLowLeaf);
        }
        if inputs.value >= low.next_value {
            return Err(ClaimError::ValueNotLessThanNextValue);
        }
        Ok(())
    }

    pub fn to_json(&self) -> InsertionJsonStruct {
        InsertionJsonStruct::from_insertion_inputs(CircuitType::InsertWithin, &self.0)
    }
}
