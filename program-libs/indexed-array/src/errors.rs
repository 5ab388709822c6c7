use nullset_hasher::HasherError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IndexedArrayError {
    #[error("Integer overflow")]
    IntegerOverflow,
    #[error("Invalid index, it exceeds the number of elements.")]
    IndexHigherThanMax,
    #[error("Could not find the low element.")]
    LowElementNotFound,
    #[error("The element already exists, but was expected to be absent.")]
    ElementAlreadyExists,
    #[error("Value does not fit in the BN254 scalar field.")]
    ValueExceedsFieldSize,
    #[error("Leaf {0} does not point to its successor in value order.")]
    LinkedListInconsistent(usize),
    #[error("Leaf values are not strictly ascending at rank {0}.")]
    NotStrictlyAscending(usize),
    #[error("Only the latest insertion can be reverted.")]
    InsertionNotLatest,
    #[error("Hasher error: {0}")]
    Hasher(#[from] HasherError),
}
