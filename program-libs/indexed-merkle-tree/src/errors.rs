use nullset_hasher::errors::HasherError;
use nullset_indexed_array::errors::IndexedArrayError;
use nullset_merkle_tree_reference::ReferenceMerkleTreeError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IndexedMerkleTreeError {
    #[error("Merkle tree is full, it already holds {0} leaves")]
    TreeFull(usize),
    #[error("Leaf index {0} is not occupied")]
    LeafDoesNotExist(usize),
    #[error("Insertion was not the latest change of the tree")]
    StaleInsertion,
    #[error("Hasher error: {0}")]
    Hasher(#[from] HasherError),
    #[error("Indexed array error: {0}")]
    IndexedArray(#[from] IndexedArrayError),
    #[error("Reference Merkle tree error: {0}")]
    ReferenceMerkleTree(#[from] ReferenceMerkleTreeError),
}
