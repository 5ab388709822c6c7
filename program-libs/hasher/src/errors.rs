use light_poseidon::PoseidonError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum HasherError {
    #[error("Poseidon hasher error: {0}")]
    Poseidon(#[from] PoseidonError),
    #[error("Allowed input length {0} provided {1}")]
    InvalidInputLength(usize, usize),
    #[error("Empty input")]
    EmptyInput,
}
