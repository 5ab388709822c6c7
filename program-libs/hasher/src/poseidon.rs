use ark_bn254::Fr;
use light_poseidon::{Poseidon as PoseidonHasher, PoseidonBytesHasher};
use once_cell::sync::Lazy;

use crate::{
    errors::HasherError,
    zero_bytes::{compute_zero_bytes, ZeroBytes},
    Hash, Hasher,
};

static ZERO_BYTES: Lazy<ZeroBytes> = Lazy::new(|| {
    // PANICS: every level is the Poseidon digest of two field elements,
    // which are always valid inputs.
    compute_zero_bytes::<Poseidon>().expect("Poseidon zero bytes")
});

/// Poseidon with circom parameters over the BN254 scalar field. Inputs are
/// big-endian and must be smaller than the field modulus.
#[derive(Clone, Copy, Debug)]
pub struct Poseidon;

impl Hasher for Poseidon {
    fn hash(val: &[u8]) -> Result<Hash, HasherError> {
        Self::hashv(&[val])
    }

    fn hashv(vals: &[&[u8]]) -> Result<Hash, HasherError> {
        if vals.is_empty() {
            return Err(HasherError::EmptyInput);
        }
        let mut hasher = PoseidonHasher::<Fr>::new_circom(vals.len())?;
        let res = hasher.hash_bytes_be(vals)?;

        Ok(res)
    }

    fn zero_bytes() -> ZeroBytes {
        *ZERO_BYTES
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_poseidon_zero_bytes() {
        let zero_bytes = Poseidon::zero_bytes();
        assert_eq!(zero_bytes[0], [0u8; 32]);
        for level in 0..zero_bytes.len() - 1 {
            assert_eq!(
                zero_bytes[level + 1],
                Poseidon::hashv(&[&zero_bytes[level], &zero_bytes[level]]).unwrap()
            );
        }
    }

    #[test]
    fn test_poseidon_rejects_input_larger_than_modulus() {
        assert!(Poseidon::hashv(&[&[u8::MAX; 32]]).is_err());
        assert!(Poseidon::hashv(&[]).is_err());
    }

    #[test]
    fn test_poseidon_is_deterministic() {
        let mut value = [0u8; 32];
        value[31] = 10;
        let first = Poseidon::hashv(&[&value, &[0u8; 8], &[0u8; 32]]).unwrap();
        let second = Poseidon::hashv(&[&value, &[0u8; 8], &[0u8; 32]]).unwrap();
        assert_eq!(first, second);
        value[31] = 11;
        assert_ne!(
            first,
            Poseidon::hashv(&[&value, &[0u8; 8], &[0u8; 32]]).unwrap()
        );
    }
}
