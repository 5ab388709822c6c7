use nullset_hasher::{errors::HasherError, Hasher};

/// Inclusion proof of a single leaf: the sibling of every node on the path
/// from the leaf to the root, leaf level first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleWitness {
    pub leaf_index: usize,
    pub path: Vec<[u8; 32]>,
}

impl MerkleWitness {
    /// Recomputes the root of a tree holding `leaf` at `leaf_index`.
    pub fn calculate_root<H>(&self, leaf: &[u8; 32]) -> Result<[u8; 32], HasherError>
    where
        H: Hasher,
    {
        let mut current_hash = *leaf;
        let mut current_index = self.leaf_index;
        for path_element in self.path.iter() {
            current_hash = if current_index % 2 == 0 {
                H::hashv(&[&current_hash, path_element])?
            } else {
                H::hashv(&[path_element, &current_hash])?
            };
            current_index /= 2;
        }
        Ok(current_hash)
    }

    /// Whether `leaf` at `leaf_index` is consistent with `root`. A witness of
    /// the wrong length never is.
    pub fn verify<H>(&self, leaf: &[u8; 32], root: &[u8; 32], height: usize) -> bool
    where
        H: Hasher,
    {
        self.path.len() == height
            && self.leaf_index.checked_shr(height as u32).unwrap_or(0) == 0
            && matches!(self.calculate_root::<H>(leaf), Ok(computed) if computed == *root)
    }

    pub fn height(&self) -> usize {
        self.path.len()
    }
}

/// Fixed-depth Merkle tree which stores leaf hashes at arbitrary indices and
/// produces inclusion witnesses.
pub trait DigestTree {
    type Error;

    fn height(&self) -> usize;

    fn capacity(&self) -> usize {
        1 << self.height()
    }

    /// Overwrites the leaf at `index` and advances the root.
    fn set_leaf(&mut self, index: usize, leaf: &[u8; 32]) -> Result<(), Self::Error>;

    fn root(&self) -> [u8; 32];

    /// Inclusion witness of the leaf at `index` under the current root.
    fn witness(&self, index: usize) -> Result<MerkleWitness, Self::Error>;
}
