pub mod circuit_type;
pub mod init;
pub mod insert_greatest;
pub mod insert_within;
pub mod insertion;
pub mod transition;
pub mod valid_nullifier;

pub use transition::TransitionClaim;
