//! # nullset-prover-client
//!
//! Transition claims of an indexed nullifier tree and the proof system
//! interface that attests them.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`proof_types`] | `init`, `insert-greatest`, `insert-within` and `valid-nullifier` claims |
//! | [`proof_system`] | `ProofSystem` trait, `Attestation` and the in-process `NativeProofSystem` |
//! | [`accumulator`] | `NullifierAccumulator`, which keeps a tree and its attestation chain in sync |
//! | [`config`] | `AccumulatorConfig` loaded from files and `NULLSET_*` variables |
//! | [`telemetry`] | `tracing` subscriber setup |
//! | [`helpers`] | Hex and JSON formatting of prover inputs |

pub mod accumulator;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod proof_system;
pub mod proof_types;
pub mod telemetry;
