use std::collections::BTreeSet;

use nullset_hasher::hash_to_field_size::bn254_field_size;
use nullset_indexed_array::{
    array::{IndexedLeafSet, LeafEntry},
    errors::IndexedArrayError,
};
use num_bigint::{BigUint, RandBigInt, ToBigUint};
use num_traits::Zero;
use rand::{rngs::StdRng, Rng, SeedableRng};

const ITERATIONS: usize = 200;

/// Checks every structural property of the set against a plain sorted model.
fn assert_consistent(set: &IndexedLeafSet<usize>, model: &BTreeSet<BigUint>) {
    set.validate().unwrap();

    let values: Vec<BigUint> = set.iter().map(|entry| entry.leaf.value.clone()).collect();
    let mut expected = vec![BigUint::zero()];
    expected.extend(model.iter().cloned());
    assert_eq!(values, expected);

    // Tree indices are a permutation of `0..len`.
    let mut indices: Vec<usize> = set.iter().map(|entry| entry.index).collect();
    indices.sort();
    assert_eq!(indices, (0..set.len()).collect::<Vec<_>>());

    // Following `next_index` from the sentinel visits every leaf in order.
    let mut current = set.get_by_index(0).unwrap();
    let mut visited = 1;
    while !current.leaf.is_greatest() {
        let next = set.get_by_index(current.leaf.next_index).unwrap();
        assert!(next.leaf.value > current.leaf.value);
        assert_eq!(next.leaf.value, current.leaf.next_value);
        current = next;
        visited += 1;
    }
    assert_eq!(visited, set.len());
}

/// Inserts random values and checks the set after each insertion.
#[test]
fn test_insert_random_values() {
    let mut rng = StdRng::seed_from_u64(0x1eaf);
    let mut set = IndexedLeafSet::<usize>::new();
    let mut model = BTreeSet::new();
    let field_size = bn254_field_size();

    for _ in 0..ITERATIONS {
        let value = rng.gen_biguint_range(&1u32.to_biguint().unwrap(), &field_size);
        let (lower, upper) = set.find_range(&value).unwrap();
        assert!(lower.leaf.value < value);
        match upper.as_ref() {
            Some(upper) => {
                assert!(value < upper.leaf.value);
                assert_eq!(lower.leaf.next_index, upper.index);
            }
            None => assert!(lower.leaf.is_greatest()),
        }

        let len_before = set.len();
        let bundle = set.insert(&value).unwrap();
        model.insert(value.clone());

        assert_eq!(bundle.old_low_entry, lower);
        assert_eq!(bundle.new_entry.index, len_before);
        assert_eq!(bundle.new_low_entry.index, lower.index);
        assert_eq!(bundle.new_low_entry.leaf.next_index, bundle.new_entry.index);
        assert_eq!(bundle.new_low_entry.leaf.next_value, value);
        match upper {
            Some(upper) => {
                assert_eq!(bundle.new_entry.leaf.next_index, upper.index);
                assert_eq!(bundle.new_entry.leaf.next_value, upper.leaf.value);
            }
            None => assert!(bundle.new_entry.leaf.is_greatest()),
        }

        assert_consistent(&set, &model);
    }
}

/// Small values collide often, so both fresh and duplicate insertions are
/// exercised.
#[test]
fn test_insert_small_values_with_duplicates() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut set = IndexedLeafSet::<usize>::new();
    let mut model = BTreeSet::new();

    for _ in 0..ITERATIONS {
        let value = rng.gen_range(0u64..64).to_biguint().unwrap();
        let len_before = set.len();
        let result = set.insert(&value);
        if value.is_zero() || model.contains(&value) {
            assert_eq!(result, Err(IndexedArrayError::ElementAlreadyExists));
            assert_eq!(set.len(), len_before);
        } else {
            result.unwrap();
            model.insert(value);
            assert_eq!(set.len(), len_before + 1);
        }
        assert_consistent(&set, &model);
    }
}

/// A set restored from its shuffled entries behaves like the set it was taken from.
#[test]
fn test_from_entries_roundtrip() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut set = IndexedLeafSet::<usize>::new();
    for _ in 0..32 {
        let value = rng.gen_biguint(200);
        let _ = set.insert(&value);
    }

    let mut entries: Vec<LeafEntry<usize>> = set.iter().cloned().collect();
    entries.reverse();
    let mut restored = IndexedLeafSet::from_entries(entries).unwrap();
    assert_eq!(
        restored.iter().collect::<Vec<_>>(),
        set.iter().collect::<Vec<_>>()
    );

    let value = rng.gen_biguint(200);
    assert_eq!(set.insert(&value), restored.insert(&value));
}

#[test]
fn test_greatest_tracks_maximum() {
    let mut set = IndexedLeafSet::<usize>::new();
    assert!(set.is_empty());
    assert_eq!(set.greatest().index, 0);

    for value in [30u64, 10, 50, 40] {
        set.insert(&value.to_biguint().unwrap()).unwrap();
    }
    assert!(!set.is_empty());
    assert_eq!(set.greatest().leaf.value, 50u64.to_biguint().unwrap());
    assert_eq!(set.greatest().index, 3);
    assert!(set.contains(&40u64.to_biguint().unwrap()));
    assert!(!set.contains(&20u64.to_biguint().unwrap()));

    let low = set
        .find_low_element_for_nonexistent(&45u64.to_biguint().unwrap())
        .unwrap();
    assert_eq!(low.leaf.value, 40u64.to_biguint().unwrap());
    assert_eq!(low.leaf.next_value, 50u64.to_biguint().unwrap());
}
