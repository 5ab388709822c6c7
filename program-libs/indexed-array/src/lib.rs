//! # nullset-indexed-array
//!
//! Off-chain mirror of the leaves of an indexed Merkle tree. Leaves form a
//! sorted linked list of unique values, each leaf storing the tree index and
//! the value of its successor.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`array::IndexedLeaf`] | Value, next-index and next-value of a single leaf |
//! | [`array::LeafEntry`] | Leaf together with its tree index |
//! | [`array::IndexedLeafSet`] | Leaves sorted by value, with range search and insertion |
//! | [`array::IndexedLeafBundle`] | Low leaf before and after an insertion, plus the new leaf |
//! | [`errors`] | `IndexedArrayError` variants |

pub mod array;
pub mod errors;
