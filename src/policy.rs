//! Bucket mutation policies.
//!
//! A policy decides how an entry is threaded into, and pulled out of, the
//! bucket of rank-equal keys it belongs to. The default,
//! [`InsertionOrder`], appends, so ties come out of a traversal in the
//! order they were added. A custom policy can reorder ties, or keep a
//! parallel ordering structure in step with the map, since it sees every
//! structural change together with the bucket position.
//!
//! A policy must leave exactly one copy of an inserted symbol in the
//! bucket, and must take it out again on removal. Breaking that contract
//! breaks the map's invariants, and the map will panic when it notices.

/// Hooks called by [`SortedMap`](crate::map::SortedMap) whenever it
/// changes a bucket. `K` is the key type, `S` the symbol type.
pub trait BucketPolicy<K, S: Eq> {
    /// Thread `symbol` (the identity of `key`) into the bucket at `pos`.
    /// The bucket is empty if it was created for this key.
    fn insert(&mut self, pos: usize, bucket: &mut Vec<S>, symbol: S, key: &K) {
        let _ = (pos, key);
        bucket.push(symbol)
    }

    /// Remove `symbol` from the bucket at `pos`, returning whether it was
    /// found. If the bucket is empty afterwards the map drops it.
    fn remove(&mut self, pos: usize, bucket: &mut Vec<S>, symbol: &S, key: &K) -> bool {
        let _ = (pos, key);
        match bucket.iter().rposition(|s| s == symbol) {
            Some(i) => {
                bucket.remove(i);
                true
            }
            None => false,
        }
    }

    /// The map was cleared.
    fn clear(&mut self) {}
}

/// Keep rank-equal keys in insertion order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertionOrder;

impl<K, S: Eq> BucketPolicy<K, S> for InsertionOrder {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_appends() {
        let mut p = InsertionOrder;
        let mut b = Vec::new();
        BucketPolicy::<i32, i32>::insert(&mut p, 0, &mut b, 2, &2);
        BucketPolicy::<i32, i32>::insert(&mut p, 0, &mut b, 4, &4);
        BucketPolicy::<i32, i32>::insert(&mut p, 0, &mut b, 6, &6);
        assert_eq!(b, vec![2, 4, 6]);
    }

    #[test]
    fn insertion_order_removes_by_symbol() {
        let mut p = InsertionOrder;
        let mut b = vec![2, 4, 6];
        assert!(BucketPolicy::<i32, i32>::remove(&mut p, 0, &mut b, &4, &4));
        assert_eq!(b, vec![2, 6]);
        assert!(!BucketPolicy::<i32, i32>::remove(&mut p, 0, &mut b, &4, &4));
        assert_eq!(b, vec![2, 6]);
    }
}
