use nullset_hasher::errors::HasherError;
use nullset_indexed_array::errors::IndexedArrayError;
use nullset_indexed_merkle_tree::errors::IndexedMerkleTreeError;
use thiserror::Error;

use crate::proof_types::circuit_type::CircuitType;

/// Reasons why a claim cannot be attested.
#[derive(Debug, Error, PartialEq)]
pub enum ClaimError {
    #[error("Invalid tree height {0}")]
    InvalidHeight(usize),
    #[error("Root does not match the root of an empty tree")]
    InitialRootMismatch,
    #[error("Witness of leaf {actual} provided for leaf {expected}")]
    WitnessIndexMismatch { expected: usize, actual: usize },
    #[error("Low leaf witness is not consistent with the old root")]
    OldWitnessMismatch,
    #[error("New leaf witness is not consistent with the new root")]
    NewWitnessMismatch,
    #[error("Leaf witness is not consistent with the root")]
    WitnessMismatch,
    #[error("Low leaf is not the greatest leaf")]
    LowLeafNotGreatest,
    #[error("Value is not greater than the low leaf value")]
    ValueNotGreaterThanLowLeaf,
    #[error("Value is not less than the next value of the low leaf")]
    ValueNotLessThanNextValue,
    #[error("Hasher error: {0}")]
    Hasher(#[from] HasherError),
    #[error("Indexed array error: {0}")]
    IndexedArray(#[from] IndexedArrayError),
}

#[derive(Debug, Error)]
pub enum ProverClientError {
    #[error("Claim cannot be attested: {0}")]
    Claim(#[from] ClaimError),
    #[error("Claim {0} requires a prior attestation")]
    PriorAttestationMissing(CircuitType),
    #[error("Claim {0} does not take a prior attestation")]
    UnexpectedPriorAttestation(CircuitType),
    #[error("Prior attestation does not verify")]
    PriorAttestationInvalid,
    #[error("Prior attestation is bound to a different root or tree height")]
    PriorAttestationMismatch,
    #[error("Invalid tree height {0}, expected 1..={1}")]
    InvalidHeight(usize, usize),
    #[error("Hasher error: {0}")]
    Hasher(#[from] HasherError),
    #[error("Indexed array error: {0}")]
    IndexedArray(#[from] IndexedArrayError),
    #[error("Indexed Merkle tree error: {0}")]
    IndexedMerkleTree(#[from] IndexedMerkleTreeError),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
