//! Construction time configuration of a [`SortedMap`].
use crate::{
    error::{Error, Result},
    map::{Comparator, Numeric, SortedMap, Symbolizer},
    policy::{BucketPolicy, InsertionOrder},
};
use std::{cmp::Ordering, hash::Hash, marker::PhantomData};

/// Builds a [`SortedMap`]. A symbolizer is required, everything else is
/// optional. Without a comparator the map keeps insertion order only.
///
/// # Examples
/// ```
/// use sorted_symbol_map::map::SortedMap;
///
/// let mut m = SortedMap::builder()
///     .symbolize(|k: &(u32, &'static str)| k.0)
///     .comparator(|a: &(u32, &'static str), b: &(u32, &'static str)| a.1.partial_cmp(b.1))
///     .capacity(16)
///     .build()
///     .unwrap();
///
/// m.add((1, "pear"), 1.5).unwrap();
/// m.add((2, "apple"), 0.5).unwrap();
/// assert_eq!(m.get(&(1, "ignored")), Some(&1.5));
/// assert_eq!(m.iter().map(|(k, _)| k.1).collect::<Vec<_>>(), vec!["apple", "pear"]);
/// ```
pub struct Builder<K, V, S: Hash + Eq + Clone> {
    symbolize: Option<Symbolizer<K, S>>,
    compare: Option<Comparator<K>>,
    policy: Option<Box<dyn BucketPolicy<K, S>>>,
    capacity: usize,
    value: PhantomData<fn() -> V>,
}

impl<K, V, S> Default for Builder<K, V, S>
where
    S: Hash + Eq + Clone,
{
    fn default() -> Self {
        Builder {
            symbolize: None,
            compare: None,
            policy: None,
            capacity: 0,
            value: PhantomData,
        }
    }
}

impl<K, V, S> Builder<K, V, S>
where
    S: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a key to its identity symbol. Keys with equal symbols are the
    /// same logical key.
    pub fn symbolize<F>(mut self, f: F) -> Self
    where
        F: Fn(&K) -> S + 'static,
    {
        self.symbolize = Some(Box::new(f));
        self
    }

    /// Three way comparator. Returning `None` is a contract violation and
    /// fails the operation that triggered the comparison.
    pub fn comparator<F>(mut self, f: F) -> Self
    where
        F: Fn(&K, &K) -> Option<Ordering> + 'static,
    {
        self.compare = Some(Box::new(f));
        self
    }

    /// Comparator returning a signed number, negative if `a` sorts before
    /// `b`, positive if after, zero if rank-equal. NaN is a contract
    /// violation.
    pub fn numeric_comparator<F>(mut self, f: F) -> Self
    where
        F: Fn(&K, &K) -> f64 + 'static,
    {
        self.compare = Some(Box::new(Numeric(f)));
        self
    }

    pub fn policy<P>(mut self, p: P) -> Self
    where
        P: BucketPolicy<K, S> + 'static,
    {
        self.policy = Some(Box::new(p));
        self
    }

    /// Pre-size the identity index.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }

    pub fn build(self) -> Result<SortedMap<K, V, S>> {
        let symbolize = self.symbolize.ok_or(Error::MissingSymbolizer)?;
        let policy = self
            .policy
            .unwrap_or_else(|| Box::new(InsertionOrder) as Box<dyn BucketPolicy<K, S>>);
        Ok(SortedMap::from_parts(
            symbolize,
            self.compare,
            policy,
            self.capacity,
        ))
    }
}
