//! # nullset-merkle-tree-reference
//!
//! Non-sparse, layered Merkle tree used as the digest engine of an indexed
//! Merkle tree, plus the [`DigestTree`] contract that engine implements.

pub mod witness;

use std::marker::PhantomData;

use nullset_hasher::{errors::HasherError, zero_bytes::MAX_HEIGHT, Hasher};
use thiserror::Error;
use tracing::trace;
pub use witness::{DigestTree, MerkleWitness};

#[derive(Debug, Error, PartialEq)]
pub enum ReferenceMerkleTreeError {
    #[error("Leaf {0} does not exist")]
    LeafDoesNotExist(usize),
    #[error("Hasher error: {0}")]
    Hasher(#[from] HasherError),
    #[error("Invalid proof length provided: {0} required {1}")]
    InvalidProofLength(usize, usize),
    #[error("Invalid tree height {0}, expected 1..={1}")]
    InvalidHeight(usize, usize),
    #[error("Leaf index {0} exceeds the tree capacity {1}")]
    IndexOutOfCapacity(usize, usize),
}

#[derive(Debug, Clone)]
pub struct MerkleTree<H>
where
    H: Hasher,
{
    pub height: usize,
    pub capacity: usize,
    pub layers: Vec<Vec<[u8; 32]>>,
    /// Current root. Earlier roots are not retained.
    pub root: [u8; 32],
    pub sequence_number: usize,
    _hasher: PhantomData<H>,
}

impl<H> MerkleTree<H>
where
    H: Hasher,
{
    pub fn new(height: usize) -> Result<Self, ReferenceMerkleTreeError> {
        if height == 0 || height > MAX_HEIGHT {
            return Err(ReferenceMerkleTreeError::InvalidHeight(height, MAX_HEIGHT));
        }
        Ok(Self {
            height,
            capacity: 1 << height,
            layers: vec![Vec::new(); height],
            root: H::zero_bytes()[height],
            sequence_number: 0,
            _hasher: PhantomData,
        })
    }

    /// Writes `node` at position `i` of `level`, filling the gap before it
    /// with empty subtree roots.
    fn set_node(&mut self, level: usize, i: usize, node: [u8; 32]) {
        let layer = &mut self.layers[level];
        if layer.len() > i {
            // A node already exists and we are overwriting it.
            layer[i] = node;
        } else {
            // A node didn't exist before.
            layer.resize(i, H::zero_bytes()[level]);
            layer.push(node);
        }
    }

    fn node(&self, level: usize, i: usize) -> [u8; 32] {
        self.layers[level]
            .get(i)
            .cloned()
            .unwrap_or(H::zero_bytes()[level])
    }

    fn update_upper_layers(&mut self, mut i: usize) -> Result<(), HasherError> {
        for level in 1..self.height {
            i /= 2;

            let left_child = self.node(level - 1, i * 2);
            let right_child = self.node(level - 1, i * 2 + 1);

            let node = H::hashv(&[&left_child[..], &right_child[..]])?;
            self.set_node(level, i, node);
        }

        let left_child = self.node(self.height - 1, 0);
        let right_child = self.node(self.height - 1, 1);
        self.root = H::hashv(&[&left_child[..], &right_child[..]])?;

        Ok(())
    }

    /// Sets the leaf at `leaf_index`, which may be any position below the
    /// capacity. Leaves between the rightmost existing leaf and `leaf_index`
    /// stay empty.
    pub fn update(
        &mut self,
        leaf: &[u8; 32],
        leaf_index: usize,
    ) -> Result<(), ReferenceMerkleTreeError> {
        if leaf_index >= self.capacity {
            return Err(ReferenceMerkleTreeError::IndexOutOfCapacity(
                leaf_index,
                self.capacity,
            ));
        }
        self.set_node(0, leaf_index, *leaf);
        self.update_upper_layers(leaf_index)?;

        self.sequence_number += 1;
        trace!(
            "reference tree leaf {} updated, sequence number {}",
            leaf_index,
            self.sequence_number
        );
        Ok(())
    }

    pub fn append(&mut self, leaf: &[u8; 32]) -> Result<(), ReferenceMerkleTreeError> {
        let next_index = self.layers[0].len();
        self.update(leaf, next_index)
    }

    pub fn root(&self) -> [u8; 32] {
        self.root
    }

    pub fn get_proof_of_leaf(
        &self,
        mut index: usize,
    ) -> Result<Vec<[u8; 32]>, ReferenceMerkleTreeError> {
        if index >= self.capacity {
            return Err(ReferenceMerkleTreeError::LeafDoesNotExist(index));
        }
        let mut proof = Vec::with_capacity(self.height);

        for level in 0..self.height {
            let sibling_index = index ^ 1;
            proof.push(self.node(level, sibling_index));
            index /= 2;
        }

        Ok(proof)
    }

    pub fn leaf(&self, leaf_index: usize) -> [u8; 32] {
        self.node(0, leaf_index)
    }

    pub fn leaves(&self) -> &[[u8; 32]] {
        self.layers[0].as_slice()
    }

    pub fn verify(
        &self,
        leaf: &[u8; 32],
        proof: &[[u8; 32]],
        leaf_index: usize,
    ) -> Result<bool, ReferenceMerkleTreeError> {
        if leaf_index >= self.capacity {
            return Err(ReferenceMerkleTreeError::LeafDoesNotExist(leaf_index));
        }
        if proof.len() != self.height {
            return Err(ReferenceMerkleTreeError::InvalidProofLength(
                proof.len(),
                self.height,
            ));
        }
        let witness = MerkleWitness {
            leaf_index,
            path: proof.to_vec(),
        };
        Ok(witness.calculate_root::<H>(leaf)? == self.root())
    }
}

impl<H> DigestTree for MerkleTree<H>
where
    H: Hasher,
{
    type Error = ReferenceMerkleTreeError;

    fn height(&self) -> usize {
        self.height
    }

    fn set_leaf(&mut self, index: usize, leaf: &[u8; 32]) -> Result<(), Self::Error> {
        self.update(leaf, index)
    }

    fn root(&self) -> [u8; 32] {
        MerkleTree::root(self)
    }

    fn witness(&self, index: usize) -> Result<MerkleWitness, Self::Error> {
        Ok(MerkleWitness {
            leaf_index: index,
            path: self.get_proof_of_leaf(index)?,
        })
    }
}
