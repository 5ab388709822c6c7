//! # nullset-hasher
//!
//! Hash function abstraction shared by the indexed leaf set, the reference
//! Merkle tree and the transition claims.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Hasher`] | Trait implemented by every supported hash function |
//! | [`Poseidon`] | Circom-compatible Poseidon over the BN254 scalar field |
//! | [`Sha256`] | SHA-256 |
//! | [`zero_bytes`] | Roots of empty subtrees for every height |
//! | [`bigint`] | `BigUint` to fixed size byte array conversions |
//! | [`hash_to_field_size`] | BN254 field size checks and truncating hashes |

pub mod bigint;
pub mod errors;
pub mod hash_to_field_size;
pub mod poseidon;
pub mod sha256;
pub mod zero_bytes;

pub use poseidon::Poseidon;
pub use sha256::Sha256;

pub use crate::errors::HasherError;
use crate::zero_bytes::ZeroBytes;

pub const HASH_BYTES: usize = 32;

pub type Hash = [u8; HASH_BYTES];

pub trait Hasher {
    fn hash(val: &[u8]) -> Result<Hash, HasherError>;
    fn hashv(vals: &[&[u8]]) -> Result<Hash, HasherError>;
    /// Roots of empty subtrees, `zero_bytes()[0]` being the empty leaf.
    fn zero_bytes() -> ZeroBytes;
}
