use once_cell::sync::Lazy;
use sha2::Digest;

use crate::{
    errors::HasherError,
    zero_bytes::{compute_zero_bytes, ZeroBytes},
    Hash, Hasher,
};

static ZERO_BYTES: Lazy<ZeroBytes> = Lazy::new(|| {
    // PANICS: SHA-256 accepts arbitrary input.
    compute_zero_bytes::<Sha256>().expect("SHA-256 zero bytes")
});

#[derive(Clone, Copy, Debug)]
pub struct Sha256;

impl Hasher for Sha256 {
    fn hash(val: &[u8]) -> Result<Hash, HasherError> {
        Self::hashv(&[val])
    }

    fn hashv(vals: &[&[u8]]) -> Result<Hash, HasherError> {
        let mut hasher = sha2::Sha256::default();
        for val in vals {
            hasher.update(val);
        }
        Ok(hasher.finalize().into())
    }

    fn zero_bytes() -> ZeroBytes {
        *ZERO_BYTES
    }
}
