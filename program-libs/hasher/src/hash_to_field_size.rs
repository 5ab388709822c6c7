use ark_bn254::Fr;
use ark_ff::PrimeField;
use num_bigint::BigUint;

use crate::{Hasher, HasherError, Sha256};

pub const HASH_TO_FIELD_SIZE_SEED: u8 = u8::MAX;

/// Modulus of the BN254 scalar field. Every value stored in an indexed leaf
/// has to be smaller than it.
pub fn bn254_field_size() -> BigUint {
    Fr::MODULUS.into()
}

pub fn is_smaller_than_bn254_field_size(value: &BigUint) -> bool {
    *value < bn254_field_size()
}

pub fn is_smaller_than_bn254_field_size_be(bytes: &[u8; 32]) -> bool {
    is_smaller_than_bn254_field_size(&BigUint::from_bytes_be(bytes))
}

/// Hashes the provided `bytes` with SHA-256 and truncates the result to 31
/// bytes, so that it fits in the BN254 field. Used to derive nullifiers from
/// arbitrary data.
pub fn hashv_to_bn254_field_size_be(bytes: &[&[u8]]) -> Result<[u8; 32], HasherError> {
    let bump_seed = [HASH_TO_FIELD_SIZE_SEED];
    let mut slices = Vec::with_capacity(bytes.len() + 1);
    slices.extend_from_slice(bytes);
    slices.push(bump_seed.as_slice());
    let mut hashed_value = Sha256::hashv(&slices)?;
    // Truncates to 31 bytes so that value is less than bn254 Fr modulo
    // field size.
    hashed_value[0] = 0;
    Ok(hashed_value)
}

pub fn hash_to_bn254_field_size_be(bytes: &[u8]) -> Result<[u8; 32], HasherError> {
    hashv_to_bn254_field_size_be(&[bytes])
}

#[cfg(test)]
mod test {
    use num_bigint::RandBigInt;
    use rand::thread_rng;

    use super::*;

    #[test]
    fn test_hash_to_field_size_fits() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let input = rng.gen_biguint(512).to_bytes_be();
            let hashed = hash_to_bn254_field_size_be(&input).unwrap();
            assert_eq!(hashed[0], 0);
            assert!(is_smaller_than_bn254_field_size_be(&hashed));
        }
    }

    #[test]
    fn test_field_size_boundary() {
        let modulus = bn254_field_size();
        assert!(!is_smaller_than_bn254_field_size(&modulus));
        assert!(is_smaller_than_bn254_field_size(&(modulus - 1u32)));
    }
}
