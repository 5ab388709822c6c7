use crate::{Hasher, HasherError};

/// Maximum supported tree height.
pub const MAX_HEIGHT: usize = 32;

pub type ZeroBytes = [[u8; 32]; MAX_HEIGHT + 1];

/// Computes the roots of empty subtrees of every height up to
/// [`MAX_HEIGHT`]. The empty leaf is all zeroes and every level above is the
/// hash of two copies of the level below.
pub fn compute_zero_bytes<H>() -> Result<ZeroBytes, HasherError>
where
    H: Hasher,
{
    let mut zero_bytes = [[0u8; 32]; MAX_HEIGHT + 1];
    for level in 0..MAX_HEIGHT {
        let node = zero_bytes[level];
        zero_bytes[level + 1] = H::hashv(&[&node, &node])?;
    }
    Ok(zero_bytes)
}
