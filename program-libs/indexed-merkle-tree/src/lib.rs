//! # nullset-indexed-merkle-tree
//!
//! Indexed Merkle tree: a digest tree whose leaves are the hashes of an
//! [`IndexedLeafSet`], which threads them into a sorted linked list. Proving
//! that a value is absent comes down to a single inclusion proof of its low
//! leaf.

pub mod errors;

use std::{fmt::Debug, marker::PhantomData};

use nullset_hasher::Hasher;
use nullset_indexed_array::array::{IndexedLeaf, IndexedLeafBundle, IndexedLeafSet, LeafEntry};
use nullset_merkle_tree_reference::{DigestTree, MerkleTree, MerkleWitness};
use num_bigint::BigUint;
use num_traits::{CheckedAdd, CheckedSub, ToBytes, Unsigned};
use tracing::debug;

use crate::errors::IndexedMerkleTreeError;

/// Everything a transition claim needs to prove a single insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedInsertion<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    pub value: BigUint,
    pub old_root: [u8; 32],
    pub new_root: [u8; 32],
    /// Low leaf before the insertion and its witness under `old_root`.
    pub old_low_entry: LeafEntry<I>,
    pub old_low_witness: MerkleWitness,
    /// Low leaf pointing to the new leaf and its witness under `new_root`.
    pub new_low_entry: LeafEntry<I>,
    pub new_low_witness: MerkleWitness,
    /// New leaf and its witness under `new_root`.
    pub new_entry: LeafEntry<I>,
    pub new_entry_witness: MerkleWitness,
}

/// Low leaf of an absent value, with its witness under `root`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonInclusionProof<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    pub root: [u8; 32],
    pub value: BigUint,
    pub low_entry: LeafEntry<I>,
    pub witness: MerkleWitness,
}

#[derive(Debug, Clone)]
pub struct IndexedMerkleTree<H, I, T = MerkleTree<H>>
where
    H: Hasher,
    I: CheckedAdd
        + CheckedSub
        + Copy
        + Clone
        + Debug
        + PartialOrd
        + ToBytes
        + TryFrom<usize>
        + Unsigned,
    usize: From<I>,
{
    tree: T,
    leaf_set: IndexedLeafSet<I>,
    _hasher: PhantomData<H>,
}

impl<H, I> IndexedMerkleTree<H, I, MerkleTree<H>>
where
    H: Hasher,
    I: CheckedAdd
        + CheckedSub
        + Copy
        + Clone
        + Debug
        + PartialOrd
        + ToBytes
        + TryFrom<usize>
        + Unsigned,
    usize: From<I>,
{
    /// Creates a tree of the given height backed by the reference Merkle
    /// tree.
    pub fn new(height: usize) -> Result<Self, IndexedMerkleTreeError> {
        Self::with_digest_tree(MerkleTree::new(height)?)
    }
}

impl<H, I, T> IndexedMerkleTree<H, I, T>
where
    H: Hasher,
    I: CheckedAdd
        + CheckedSub
        + Copy
        + Clone
        + Debug
        + PartialOrd
        + ToBytes
        + TryFrom<usize>
        + Unsigned,
    usize: From<I>,
    T: DigestTree,
    IndexedMerkleTreeError: From<T::Error>,
{
    /// Wraps an empty digest tree and stores the sentinel leaf at index `0`.
    pub fn with_digest_tree(mut tree: T) -> Result<Self, IndexedMerkleTreeError> {
        let leaf_set = IndexedLeafSet::new();

        // Append the first low leaf, which has value 0 and does not point
        // to any other leaf yet.
        let sentinel = IndexedLeaf::<I>::empty().hash::<H>()?;
        tree.set_leaf(0, &sentinel)?;

        Ok(Self {
            tree,
            leaf_set,
            _hasher: PhantomData,
        })
    }

    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Number of leaves, including the sentinel.
    pub fn len(&self) -> usize {
        self.leaf_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_set.is_empty()
    }

    pub fn leaf_set(&self) -> &IndexedLeafSet<I> {
        &self.leaf_set
    }

    pub fn digest_tree(&self) -> &T {
        &self.tree
    }

    /// Inclusion witness of an occupied leaf under the current root.
    pub fn witness(&self, index: usize) -> Result<MerkleWitness, IndexedMerkleTreeError> {
        if index >= self.leaf_set.len() {
            return Err(IndexedMerkleTreeError::LeafDoesNotExist(index));
        }
        Ok(self.tree.witness(index)?)
    }

    /// Writes the hashes of the updated low leaf and of the created leaf
    /// into the digest tree.
    ///
    /// Only the digest tree is touched and the leaves are not validated.
    /// Use [`insert`](Self::insert) to keep the leaf set and the digest tree
    /// in sync.
    pub fn apply_insert(
        &mut self,
        lower: &LeafEntry<I>,
        created: &LeafEntry<I>,
    ) -> Result<(), IndexedMerkleTreeError> {
        let low_leaf = lower.hash::<H>()?;
        let new_leaf = created.hash::<H>()?;

        // Update the low element.
        self.tree.set_leaf(lower.index(), &low_leaf)?;
        // Append the new element.
        self.tree.set_leaf(created.index(), &new_leaf)?;

        Ok(())
    }

    /// Inserts `value` and returns the low leaf before and after the
    /// insertion, the new leaf and their witnesses.
    ///
    /// Duplicates, values outside of the field and insertions into a full
    /// tree are rejected before anything is modified. When writing the
    /// digest tree fails, the leaf set insertion is undone.
    pub fn insert(
        &mut self,
        value: &BigUint,
    ) -> Result<IndexedInsertion<I>, IndexedMerkleTreeError> {
        if self.leaf_set.len() >= self.tree.capacity() {
            return Err(IndexedMerkleTreeError::TreeFull(self.leaf_set.len()));
        }

        let low_entry = self.leaf_set.find_low_element_for_nonexistent(value)?;
        let old_root = self.tree.root();
        let old_low_witness = self.tree.witness(low_entry.index())?;

        let bundle = self.leaf_set.insert(value)?;
        if let Err(e) = self.apply_insert(&bundle.new_low_entry, &bundle.new_entry) {
            self.leaf_set.undo_insert(&bundle)?;
            return Err(e);
        }

        let new_root = self.tree.root();
        let new_low_witness = self.tree.witness(bundle.new_low_entry.index())?;
        let new_entry_witness = self.tree.witness(bundle.new_entry.index())?;

        debug!(
            "indexed tree insert: value {} at index {}, low index {}, root {:?} -> {:?}",
            value,
            bundle.new_entry.index(),
            bundle.new_low_entry.index(),
            &old_root[..4],
            &new_root[..4],
        );

        Ok(IndexedInsertion {
            value: value.clone(),
            old_root,
            new_root,
            old_low_entry: bundle.old_low_entry,
            old_low_witness,
            new_low_entry: bundle.new_low_entry,
            new_low_witness,
            new_entry: bundle.new_entry,
            new_entry_witness,
        })
    }

    /// Reverts `insertion`, which has to be the latest change of the tree.
    /// The low leaf is restored and the slot of the new leaf is emptied, so
    /// the root returns to `insertion.old_root`.
    pub fn revert_insert(
        &mut self,
        insertion: &IndexedInsertion<I>,
    ) -> Result<(), IndexedMerkleTreeError> {
        if self.tree.root() != insertion.new_root {
            return Err(IndexedMerkleTreeError::StaleInsertion);
        }
        let old_low_leaf = insertion.old_low_entry.hash::<H>()?;

        self.leaf_set.undo_insert(&IndexedLeafBundle {
            old_low_entry: insertion.old_low_entry.clone(),
            new_low_entry: insertion.new_low_entry.clone(),
            new_entry: insertion.new_entry.clone(),
        })?;
        self.tree
            .set_leaf(insertion.new_entry.index(), &H::zero_bytes()[0])?;
        self.tree
            .set_leaf(insertion.old_low_entry.index(), &old_low_leaf)?;

        debug!(
            "indexed tree insert of {} reverted, root {:?}",
            insertion.value,
            &self.tree.root()[..4]
        );
        Ok(())
    }

    /// Returns the low leaf of an absent `value` with its witness under the
    /// current root.
    pub fn non_inclusion_proof(
        &self,
        value: &BigUint,
    ) -> Result<NonInclusionProof<I>, IndexedMerkleTreeError> {
        let low_entry = self.leaf_set.find_low_element_for_nonexistent(value)?;
        let witness = self.tree.witness(low_entry.index())?;
        Ok(NonInclusionProof {
            root: self.tree.root(),
            value: value.clone(),
            low_entry,
            witness,
        })
    }
}
