use nullset_hasher::{zero_bytes::MAX_HEIGHT, Hasher};
use nullset_indexed_array::array::IndexedLeaf;
use nullset_merkle_tree_reference::MerkleWitness;
use num_bigint::BigUint;
use serde::Serialize;

use crate::errors::ClaimError;

pub fn big_uint_to_string(big_uint: &BigUint) -> String {
    format!("0x{}", big_uint.to_str_radix(16))
}

pub fn bytes_to_string(bytes: &[u8; 32]) -> String {
    big_uint_to_string(&BigUint::from_bytes_be(bytes))
}

pub fn path_to_strings(witness: &MerkleWitness) -> Vec<String> {
    witness.path.iter().map(bytes_to_string).collect()
}

pub fn create_json_from_struct<T>(json_struct: &T) -> Result<String, serde_json::Error>
where
    T: Serialize,
{
    serde_json::to_string_pretty(json_struct)
}

pub fn check_height(height: usize) -> Result<(), ClaimError> {
    if height == 0 || height > MAX_HEIGHT {
        return Err(ClaimError::InvalidHeight(height));
    }
    Ok(())
}

/// Root of an indexed tree of the given height which holds only the
/// sentinel leaf.
pub fn empty_indexed_tree_root<H>(height: usize) -> Result<[u8; 32], ClaimError>
where
    H: Hasher,
{
    check_height(height)?;
    let sentinel = IndexedLeaf::<usize>::empty().hash::<H>()?;
    let witness = MerkleWitness {
        leaf_index: 0,
        path: H::zero_bytes()[..height].to_vec(),
    };
    Ok(witness.calculate_root::<H>(&sentinel)?)
}
