use crate::{error::Result, map::{Iter, SortedMap}};
use std::{
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
    hash::Hash,
    iter::FusedIterator,
};

/// A set of keys identified by symbol and kept in comparator order. It is
/// a [`SortedMap`] with unit values, and shares its semantics: the first
/// key inserted under a symbol wins, rank-equal keys keep insertion order,
/// and a set built without a comparator keeps insertion order only.
///
/// # Examples
/// ```
/// use sorted_symbol_map::set::SortedSet;
///
/// let mut s = SortedSet::with_comparator(
///     |k: &String| k.to_lowercase(),
///     |a: &String, b: &String| a.len().partial_cmp(&b.len()),
/// );
/// s.insert(String::from("three")).unwrap();
/// s.insert(String::from("one")).unwrap();
/// s.insert(String::from("ONE")).unwrap();
/// s.insert(String::from("two")).unwrap();
///
/// assert!(s.contains(&String::from("One")));
/// assert_eq!(s.len(), 3);
/// assert_eq!(s.iter().collect::<Vec<_>>(), vec!["one", "two", "three"]);
/// ```
pub struct SortedSet<K, S: Hash + Eq + Clone>(SortedMap<K, (), S>);

impl<K, S> SortedSet<K, S>
where
    S: Hash + Eq + Clone,
{
    /// Create an empty set that keeps insertion order only.
    pub fn new<F>(symbolize: F) -> Self
    where
        F: Fn(&K) -> S + 'static,
    {
        SortedSet(SortedMap::new(symbolize))
    }

    pub fn with_comparator<F, C>(symbolize: F, compare: C) -> Self
    where
        F: Fn(&K) -> S + 'static,
        C: Fn(&K, &K) -> Option<Ordering> + 'static,
    {
        SortedSet(SortedMap::with_comparator(symbolize, compare))
    }

    /// wrap a unit valued map, e.g. one made with [`SortedMap::builder`]
    pub fn from_map(m: SortedMap<K, (), S>) -> Self {
        SortedSet(m)
    }

    /// insert `k`, returning the position of its bucket. Inserting a key
    /// whose symbol is already present does nothing and returns `Ok(None)`.
    pub fn insert(&mut self, k: K) -> Result<Option<usize>> {
        self.0.add(k, ())
    }

    pub fn contains(&self, k: &K) -> bool {
        self.0.contains_key(k)
    }

    /// return the stored member with the same symbol as `k`
    pub fn get(&self, k: &K) -> Option<&K> {
        self.0.get_key_value(k).map(|(k, ())| k)
    }

    pub fn remove(&mut self, k: &K) -> Result<Option<usize>> {
        self.0.remove(k)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> SetIter<'_, K, S> {
        SetIter(self.0.iter())
    }
}

impl<K, S> Debug for SortedSet<K, S>
where
    K: Debug,
    S: Hash + Eq + Clone,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub struct SetIter<'a, K, S>(Iter<'a, K, (), S>);

impl<'a, K, S> Iterator for SetIter<'a, K, S>
where
    S: Hash + Eq,
{
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, S> ExactSizeIterator for SetIter<'a, K, S> where S: Hash + Eq {}

impl<'a, K, S> FusedIterator for SetIter<'a, K, S> where S: Hash + Eq {}

impl<'a, K, S> IntoIterator for &'a SortedSet<K, S>
where
    S: Hash + Eq + Clone,
{
    type Item = &'a K;
    type IntoIter = SetIter<'a, K, S>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<K, S> serde::Serialize for SortedSet<K, S>
where
    K: serde::Serialize,
    S: Hash + Eq + Clone,
{
    fn serialize<Se>(&self, serializer: Se) -> std::result::Result<Se::Ok, Se::Error>
    where
        Se: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}
