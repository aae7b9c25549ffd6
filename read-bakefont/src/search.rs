//! Lookups in sorted record arrays

/// A record in an array sorted by some key.
pub(crate) trait SortedRecord {
    type Key: Ord + Copy;

    fn key(&self) -> Self::Key;
}

/// Binary search `records` for the entry with `key`.
///
/// Returns `None` if no record matches. If the array is not sorted the result
/// is unspecified, but this never panics.
pub(crate) fn find<T: SortedRecord>(records: &[T], key: T::Key) -> Option<&T> {
    records
        .binary_search_by(|rec| rec.key().cmp(&key))
        .ok()
        .map(|idx| &records[idx])
}

/// The index of the first record whose key is not strictly greater than the
/// key of the record before it.
pub(crate) fn first_unsorted<T: SortedRecord>(records: &[T]) -> Option<usize> {
    records
        .windows(2)
        .position(|pair| pair[0].key() >= pair[1].key())
        .map(|idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(u32, u32);

    impl SortedRecord for Pair {
        type Key = (u32, u32);

        fn key(&self) -> (u32, u32) {
            (self.0, self.1)
        }
    }

    #[test]
    fn find_tuple_key() {
        let records = [Pair(10, 5), Pair(10, 20), Pair(30, 1)];
        assert_eq!(find(&records, (10, 20)).map(|p| p.1), Some(20));
        assert_eq!(find(&records, (30, 1)).map(|p| p.0), Some(30));
        assert!(find(&records, (10, 6)).is_none());
        assert!(find(&records, (20, 5)).is_none());
        assert!(find(&records[..0], (10, 5)).is_none());
    }

    #[test]
    fn unsorted_index() {
        assert_eq!(first_unsorted(&[Pair(1, 1), Pair(1, 2), Pair(2, 0)]), None);
        assert_eq!(first_unsorted(&[Pair(1, 1), Pair(1, 1)]), Some(1));
        assert_eq!(first_unsorted(&[Pair(1, 1), Pair(3, 0), Pair(2, 9)]), Some(2));
        assert_eq!(first_unsorted::<Pair>(&[]), None);
    }
}
