use std::fmt::Debug;

use nullset_hasher::{
    bigint::bigint_to_be_bytes_array, hash_to_field_size::bn254_field_size, Hasher,
};
use num_bigint::BigUint;
use num_traits::{CheckedAdd, CheckedSub, ToBytes, Unsigned, Zero};
use tracing::debug;

use crate::errors::IndexedArrayError;

/// A leaf of an indexed Merkle tree.
///
/// Besides its own value, a leaf stores the tree index and the value of the
/// next greater leaf. The greatest leaf points to the index `0` and value
/// `0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedLeaf<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    pub value: BigUint,
    pub next_index: I,
    pub next_value: BigUint,
}

impl<I> IndexedLeaf<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    /// Returns the sentinel-shaped leaf `(0, 0, 0)`.
    pub fn empty() -> Self {
        Self {
            value: BigUint::zero(),
            next_index: I::zero(),
            next_value: BigUint::zero(),
        }
    }

    pub fn next_index(&self) -> usize {
        self.next_index.into()
    }

    /// Whether no leaf with a greater value exists.
    pub fn is_greatest(&self) -> bool {
        self.next_value.is_zero()
    }

    /// Returns the hash of the leaf. That hash consists of:
    ///
    /// * The value of the leaf (32 bytes, big-endian).
    /// * The `next_index` of the leaf (8 bytes, big-endian), independent of
    ///   the width of `I`.
    /// * The value of the leaf pointed by `next_index` (32 bytes, big-endian).
    pub fn hash<H>(&self) -> Result<[u8; 32], IndexedArrayError>
    where
        H: Hasher,
    {
        let hash = H::hashv(&[
            bigint_to_be_bytes_array::<32>(&self.value)?.as_ref(),
            (self.next_index() as u64).to_be_bytes().as_ref(),
            bigint_to_be_bytes_array::<32>(&self.next_value)?.as_ref(),
        ])?;
        Ok(hash)
    }
}

/// A leaf together with its position in the Merkle tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafEntry<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    pub index: I,
    pub leaf: IndexedLeaf<I>,
}

impl<I> LeafEntry<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    pub fn index(&self) -> usize {
        self.index.into()
    }

    pub fn value(&self) -> &BigUint {
        &self.leaf.value
    }

    pub fn hash<H>(&self) -> Result<[u8; 32], IndexedArrayError>
    where
        H: Hasher,
    {
        self.leaf.hash::<H>()
    }
}

/// Result of [`IndexedLeafSet::insert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedLeafBundle<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    /// Low element as it was stored before the insertion.
    pub old_low_entry: LeafEntry<I>,
    /// Low element pointing to the new element.
    pub new_low_entry: LeafEntry<I>,
    pub new_entry: LeafEntry<I>,
}

/// Leaves of an indexed Merkle tree, sorted ascending by value.
///
/// The first entry is always the sentinel leaf with value `0`, stored under
/// tree index `0`. New leaves get the next free tree index, while their
/// position in this set is determined by their value.
#[derive(Clone, Debug)]
pub struct IndexedLeafSet<I>
where
    I: CheckedAdd + CheckedSub + Copy + Clone + PartialOrd + ToBytes + TryFrom<usize> + Unsigned,
    usize: From<I>,
{
    entries: Vec<LeafEntry<I>>,
    field_size: BigUint,
}

impl<I> Default for IndexedLeafSet<I>
where
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
    fn default() -> Self {
        Self::new()
    }
}

impl<I> IndexedLeafSet<I>
where
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
    pub fn new() -> Self {
        Self {
            entries: vec![LeafEntry {
                index: I::zero(),
                leaf: IndexedLeaf::empty(),
            }],
            field_size: bn254_field_size(),
        }
    }

    /// Restores a set from previously persisted entries. The entries may be
    /// provided in any order, but they have to form a valid indexed leaf set.
    pub fn from_entries(mut entries: Vec<LeafEntry<I>>) -> Result<Self, IndexedArrayError> {
        entries.sort_by(|a, b| a.leaf.value.cmp(&b.leaf.value));
        let set = Self {
            entries,
            field_size: bn254_field_size(),
        };
        set.validate()?;
        Ok(set)
    }

    /// Number of leaves, including the sentinel. This is also the tree index
    /// which the next inserted leaf is going to get.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no values besides the sentinel.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Iterates over the entries in ascending value order.
    pub fn iter(&self) -> std::slice::Iter<'_, LeafEntry<I>> {
        self.entries.iter()
    }

    /// Returns the entry with the greatest value.
    pub fn greatest(&self) -> &LeafEntry<I> {
        // PANICS: The sentinel is never removed.
        self.entries.last().unwrap()
    }

    /// Returns the entry stored under the given tree index.
    pub fn get_by_index(&self, index: I) -> Option<&LeafEntry<I>> {
        self.entries.iter().find(|entry| entry.index == index)
    }

    pub fn contains(&self, value: &BigUint) -> bool {
        self.rank_of(value).is_ok()
    }

    fn rank_of(&self, value: &BigUint) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.leaf.value.cmp(value))
    }

    /// Returns the ranks of the low element and, unless `value` is going to
    /// be the greatest, of its successor.
    fn find_range_ranks(&self, value: &BigUint) -> Result<(usize, Option<usize>), IndexedArrayError> {
        if *value >= self.field_size {
            return Err(IndexedArrayError::ValueExceedsFieldSize);
        }
        if self.contains(value) {
            return Err(IndexedArrayError::ElementAlreadyExists);
        }

        let mut low = 0;
        let mut high = self.entries.len() - 1;

        if *value > self.entries[high].leaf.value {
            let greatest = &self.entries[high];
            if !greatest.leaf.is_greatest() {
                return Err(IndexedArrayError::LinkedListInconsistent(greatest.index()));
            }
            return Ok((high, None));
        }

        // Invariant: `entries[low] < value < entries[high]`. The search stops
        // as soon as the low entry points to the high one. Both sides of that
        // comparison are tree indices, never ranks.
        while self.entries[low].leaf.next_index != self.entries[high].index {
            if high - low <= 1 {
                return Err(IndexedArrayError::LinkedListInconsistent(
                    self.entries[low].index(),
                ));
            }
            let mid = low + (high - low) / 2;
            if *value > self.entries[mid].leaf.value {
                low = mid;
            } else {
                high = mid;
            }
        }

        if high != low + 1 || self.entries[low].leaf.next_value != self.entries[high].leaf.value {
            return Err(IndexedArrayError::LinkedListInconsistent(
                self.entries[low].index(),
            ));
        }

        Ok((low, Some(high)))
    }

    /// Returns the low element of `value` and its successor, if there is
    /// one. `value` **must not** be a part of the set.
    ///
    /// Low element is the greatest element which still has lower value than
    /// the provided one. When `value` is greater than every element, only
    /// the current greatest element is returned.
    pub fn find_range(
        &self,
        value: &BigUint,
    ) -> Result<(LeafEntry<I>, Option<LeafEntry<I>>), IndexedArrayError> {
        let (low, high) = self.find_range_ranks(value)?;
        Ok((
            self.entries[low].clone(),
            high.map(|high| self.entries[high].clone()),
        ))
    }

    /// Returns the low element for the given `value`, which **should not** be
    /// the part of the set. Low elements are used in non-membership proofs.
    pub fn find_low_element_for_nonexistent(
        &self,
        value: &BigUint,
    ) -> Result<LeafEntry<I>, IndexedArrayError> {
        let (low, _) = self.find_range_ranks(value)?;
        Ok(self.entries[low].clone())
    }

    /// Inserts `value` into the set.
    ///
    /// The new leaf gets the next free tree index and points to the
    /// successor of its low element. The low element is updated to point to
    /// the new leaf. Nothing is modified when an error is returned.
    pub fn insert(&mut self, value: &BigUint) -> Result<IndexedLeafBundle<I>, IndexedArrayError> {
        let (low, high) = self.find_range_ranks(value)?;

        let new_index =
            I::try_from(self.entries.len()).map_err(|_| IndexedArrayError::IntegerOverflow)?;
        let old_low_entry = self.entries[low].clone();

        let (next_index, next_value) = match high {
            Some(high) => (
                self.entries[high].index,
                self.entries[high].leaf.value.clone(),
            ),
            None => (I::zero(), BigUint::zero()),
        };
        let new_entry = LeafEntry {
            index: new_index,
            leaf: IndexedLeaf {
                value: value.clone(),
                next_index,
                next_value,
            },
        };

        let position = high.unwrap_or(self.entries.len());
        self.entries.insert(position, new_entry.clone());

        let low_entry = &mut self.entries[position - 1];
        low_entry.leaf.next_index = new_index;
        low_entry.leaf.next_value = value.clone();
        let new_low_entry = low_entry.clone();

        debug!(
            "inserted value {} at tree index {:?} (rank {}), low element index {:?}",
            value, new_index, position, new_low_entry.index
        );

        Ok(IndexedLeafBundle {
            old_low_entry,
            new_low_entry,
            new_entry,
        })
    }

    /// Reverts `bundle`, which has to be the result of the latest
    /// [`insert`](Self::insert): removes the new entry and restores the low
    /// element.
    pub fn undo_insert(&mut self, bundle: &IndexedLeafBundle<I>) -> Result<(), IndexedArrayError> {
        if bundle.new_entry.index() + 1 != self.entries.len() {
            return Err(IndexedArrayError::InsertionNotLatest);
        }
        let position = match self.rank_of(bundle.new_entry.value()) {
            Ok(position) if position > 0 => position,
            _ => return Err(IndexedArrayError::InsertionNotLatest),
        };
        if self.entries[position] != bundle.new_entry
            || self.entries[position - 1] != bundle.new_low_entry
        {
            return Err(IndexedArrayError::InsertionNotLatest);
        }

        self.entries.remove(position);
        self.entries[position - 1] = bundle.old_low_entry.clone();

        debug!(
            "reverted insertion of value {} at tree index {:?}",
            bundle.new_entry.value(),
            bundle.new_entry.index
        );
        Ok(())
    }

    /// Checks that the set is sorted, that every leaf points to its
    /// successor in value order and that tree indices are unique and dense.
    pub fn validate(&self) -> Result<(), IndexedArrayError> {
        let sentinel = self
            .entries
            .first()
            .ok_or(IndexedArrayError::LowElementNotFound)?;
        if sentinel.index != I::zero() || !sentinel.leaf.value.is_zero() {
            return Err(IndexedArrayError::LowElementNotFound);
        }

        let mut seen = vec![false; self.entries.len()];
        for entry in self.entries.iter() {
            let index = entry.index();
            match seen.get_mut(index) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(IndexedArrayError::IndexHigherThanMax),
            }
            if entry.leaf.value >= self.field_size {
                return Err(IndexedArrayError::ValueExceedsFieldSize);
            }
        }

        for (rank, pair) in self.entries.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            if current.leaf.value >= next.leaf.value {
                return Err(IndexedArrayError::NotStrictlyAscending(rank + 1));
            }
            if current.leaf.next_index != next.index || current.leaf.next_value != next.leaf.value
            {
                return Err(IndexedArrayError::LinkedListInconsistent(current.index()));
            }
        }

        let greatest = self.greatest();
        if greatest.leaf.next_index != I::zero() || !greatest.leaf.next_value.is_zero() {
            return Err(IndexedArrayError::LinkedListInconsistent(greatest.index()));
        }

        Ok(())
    }
}
