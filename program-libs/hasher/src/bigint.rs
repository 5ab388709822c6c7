use num_bigint::BigUint;

use crate::HasherError;

/// Converts the given [`num_bigint::BigUint`](num_bigint::BigUint) into a big-endian
/// byte array.
pub fn bigint_to_be_bytes_array<const BYTES_SIZE: usize>(
    bigint: &BigUint,
) -> Result<[u8; BYTES_SIZE], HasherError> {
    let mut array = [0u8; BYTES_SIZE];
    let bytes = bigint.to_bytes_be();

    if bytes.len() > BYTES_SIZE {
        return Err(HasherError::InvalidInputLength(BYTES_SIZE, bytes.len()));
    }

    let start_pos = BYTES_SIZE - bytes.len();
    array[start_pos..].copy_from_slice(bytes.as_slice());
    Ok(array)
}

#[cfg(test)]
mod test {
    use num_bigint::{RandBigInt, ToBigUint};
    use rand::thread_rng;

    use super::*;

    #[test]
    fn test_bigint_conversion_rand() {
        let mut rng = thread_rng();

        for _ in 0..1000 {
            let bigint = rng.gen_biguint(256);

            let bigint_bytes_be: [u8; 32] = bigint_to_be_bytes_array(&bigint).unwrap();
            assert_eq!(BigUint::from_bytes_be(&bigint_bytes_be), bigint);
        }
    }

    #[test]
    fn test_bigint_conversion_zero() {
        let zero = 0_u32.to_biguint().unwrap();
        assert_eq!(bigint_to_be_bytes_array::<32>(&zero).unwrap(), [0u8; 32]);
        assert_eq!(
            bigint_to_be_bytes_array::<1>(&BigUint::from(7u8)).unwrap(),
            [7u8]
        );
    }

    #[test]
    fn test_bigint_conversion_too_large() {
        let bigint = BigUint::from_bytes_be(&[1u8; 33]);
        assert_eq!(
            bigint_to_be_bytes_array::<32>(&bigint),
            Err(HasherError::InvalidInputLength(32, 33))
        );
    }
}
