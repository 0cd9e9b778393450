//! Contract tests for the growable array through its public API.

use canopy::{Error, GrowArray, DEFAULT_CAPACITY};

#[test]
fn test_push_n_pop_n_returns_to_empty() {
    let mut array = GrowArray::new();
    for i in 0..1000 {
        array.push(i).unwrap();
    }
    for expected in (0..1000).rev() {
        assert_eq!(array.pop(), Some(expected));
    }
    assert_eq!(array.len(), 0);
    assert!(array.capacity() >= DEFAULT_CAPACITY);
}

#[test]
fn test_get_past_len_is_always_none() {
    let mut array = GrowArray::new();
    for i in 0..10 {
        array.push(i).unwrap();
        for probe in array.len()..array.len() + 50 {
            assert_eq!(array.get(probe), None);
        }
    }
}

#[test]
fn test_interleaved_insert_remove_keeps_relative_order() {
    let mut array = GrowArray::new();
    for i in 0..8 {
        array.push(i).unwrap();
    }
    // [0 1 2 3 4 5 6 7]
    assert_eq!(array.remove(0), Some(0));
    array.insert(3, 99).unwrap();
    assert_eq!(array.remove(6), Some(6));
    array.insert(0, 42).unwrap();
    let collected: Vec<i32> = array.iter().copied().collect();
    assert_eq!(collected, vec![42, 1, 2, 3, 99, 4, 5, 7]);
}

#[test]
fn test_insert_bounds() {
    let mut array = GrowArray::new();
    array.insert(0, 'a').unwrap();
    array.insert(1, 'c').unwrap();
    array.insert(1, 'b').unwrap();
    assert_eq!(
        array.insert(9, 'x').unwrap_err(),
        Error::IndexOutOfBounds { index: 9, len: 3 }
    );
    let collected: Vec<char> = array.iter().copied().collect();
    assert_eq!(collected, vec!['a', 'b', 'c']);
}

#[test]
fn test_pop_on_empty_is_noop() {
    let mut array: GrowArray<String> = GrowArray::new();
    assert_eq!(array.pop(), None);
    assert_eq!(array.remove(0), None);
}

#[test]
fn test_shrink_never_goes_below_default() {
    let mut array = GrowArray::new();
    for i in 0..200 {
        array.push(i).unwrap();
    }
    while array.pop().is_some() {
        assert!(array.capacity() >= DEFAULT_CAPACITY);
        assert!(array.capacity() >= array.len());
    }
    assert_eq!(array.capacity(), DEFAULT_CAPACITY);
}
