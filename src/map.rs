use crate::{
    bucket::{self, Bucket, Loc},
    config::Builder,
    error::{Error, Result},
    policy::{BucketPolicy, InsertionOrder},
};
use fxhash::FxHashMap;
use std::{
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
    hash::Hash,
    iter::FusedIterator,
    slice,
};
use tracing::{trace, warn};

pub(crate) type Symbolizer<K, S> = Box<dyn Fn(&K) -> S>;
pub(crate) type Comparator<K> = Box<dyn Compare<K>>;

pub(crate) trait Compare<K> {
    fn compare(&self, a: &K, b: &K) -> Option<Ordering>;
}

impl<K, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Option<Ordering>,
{
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        self(a, b)
    }
}

/// adapts a comparator returning a signed number, NaN has no ordering
pub(crate) struct Numeric<F>(pub(crate) F);

impl<K, F> Compare<K> for Numeric<F>
where
    F: Fn(&K, &K) -> f64,
{
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        (self.0)(a, b).partial_cmp(&0.0)
    }
}

pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
}

fn lookup<'a, K, V, S>(index: &'a FxHashMap<S, Entry<K, V>>, sym: &S) -> &'a Entry<K, V>
where
    S: Hash + Eq,
{
    match index.get(sym) {
        Some(e) => e,
        None => panic!("sorted map bucket list holds a key missing from the index"),
    }
}

/// An ordered associative container. Keys are identified by a symbol
/// computed from the key, which gives O(1) lookup, and are kept in the
/// order defined by a three way comparator for traversal.
///
/// Keys the comparator ranks equal share a bucket, within a bucket keys
/// keep the order the [`BucketPolicy`] gives them (insertion order by
/// default). A map built without a comparator keeps insertion order only.
///
/// `add` never overwrites, the first value added under a symbol wins.
///
/// # Examples
/// ```
/// use sorted_symbol_map::map::SortedMap;
///
/// let mut m = SortedMap::with_comparator(|k: &i32| *k, |a: &i32, b: &i32| a.partial_cmp(b));
/// m.add(5, "five").unwrap();
/// m.add(2, "two").unwrap();
/// m.add(8, "eight").unwrap();
///
/// let mut seen = Vec::new();
/// m.for_each(|v, k| seen.push((*v, *k)));
/// assert_eq!(seen, vec![("two", 2), ("five", 5), ("eight", 8)]);
///
/// assert_eq!(m.remove(&5), Ok(Some(1)));
/// assert_eq!(m.get(&5), None);
/// assert_eq!(m.get(&8), Some(&"eight"));
/// ```
pub struct SortedMap<K, V, S: Hash + Eq + Clone> {
    symbolize: Symbolizer<K, S>,
    compare: Option<Comparator<K>>,
    policy: Box<dyn BucketPolicy<K, S>>,
    index: FxHashMap<S, Entry<K, V>>,
    buckets: Vec<Bucket<S>>,
}

impl<K, V, S> SortedMap<K, V, S>
where
    S: Hash + Eq + Clone,
{
    /// Create an empty map that keeps insertion order only.
    pub fn new<F>(symbolize: F) -> Self
    where
        F: Fn(&K) -> S + 'static,
    {
        Self::from_parts(Box::new(symbolize), None, Box::new(InsertionOrder), 0)
    }

    /// Create an empty map ordered by `compare`. A comparator returning
    /// `None` fails the `add` or `remove` that triggered it.
    pub fn with_comparator<F, C>(symbolize: F, compare: C) -> Self
    where
        F: Fn(&K) -> S + 'static,
        C: Fn(&K, &K) -> Option<Ordering> + 'static,
    {
        Self::from_parts(
            Box::new(symbolize),
            Some(Box::new(compare)),
            Box::new(InsertionOrder),
            0,
        )
    }

    /// Create an empty map ordered by a comparator returning a signed
    /// number. A NaN result is a contract violation.
    pub fn with_numeric_comparator<F, C>(symbolize: F, compare: C) -> Self
    where
        F: Fn(&K) -> S + 'static,
        C: Fn(&K, &K) -> f64 + 'static,
    {
        Self::from_parts(
            Box::new(symbolize),
            Some(Box::new(Numeric(compare))),
            Box::new(InsertionOrder),
            0,
        )
    }

    pub fn builder() -> Builder<K, V, S> {
        Builder::new()
    }

    pub(crate) fn from_parts(
        symbolize: Symbolizer<K, S>,
        compare: Option<Comparator<K>>,
        policy: Box<dyn BucketPolicy<K, S>>,
        capacity: usize,
    ) -> Self {
        SortedMap {
            symbolize,
            compare,
            policy,
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: Vec::new(),
        }
    }

    /// lookup the value added under the symbol of `k`. O(1).
    pub fn get(&self, k: &K) -> Option<&V> {
        self.index.get(&(self.symbolize)(k)).map(|e| &e.value)
    }

    /// lookup the stored key and value for the symbol of `k`. The stored
    /// key is the one that was added, not `k`.
    pub fn get_key_value(&self, k: &K) -> Option<(&K, &V)> {
        self.index
            .get(&(self.symbolize)(k))
            .map(|e| (&e.key, &e.value))
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.index.contains_key(&(self.symbolize)(k))
    }

    /// Add a binding for `k`. If a binding for the symbol of `k` already
    /// exists nothing happens, `v` is dropped and `Ok(None)` is returned.
    ///
    /// In an ordered map the position of the bucket the key landed in is
    /// returned. In an insertion order map the key is placed after
    /// everything present and `Ok(None)` is returned.
    ///
    /// Fails with [`Error::ComparatorContract`], without changing the map,
    /// if the comparator gives no ordering while placing `k`.
    pub fn add(&mut self, k: K, v: V) -> Result<Option<usize>> {
        let sym = (self.symbolize)(&k);
        if self.index.contains_key(&sym) {
            return Ok(None);
        }
        let loc = match &self.compare {
            None => None,
            Some(c) => Some(self.locate(&**c, &k)?),
        };
        let pos = match loc {
            Some(Loc::Here(i)) => i,
            Some(Loc::NotPresent(i)) => {
                trace!(pos = i, buckets = self.buckets.len() + 1, "new bucket");
                self.buckets.insert(i, Bucket::empty());
                i
            }
            None => {
                self.buckets.push(Bucket::empty());
                self.buckets.len() - 1
            }
        };
        self.policy
            .insert(pos, self.buckets[pos].elts_mut(), sym.clone(), &k);
        self.index.insert(sym, Entry { key: k, value: v });
        Ok(loc.map(|_| pos))
    }

    /// Remove the binding for the symbol of `k`, returning the position of
    /// the bucket it was removed from. A bucket left empty is dropped.
    /// Removing an absent key is a no-op returning `Ok(None)`.
    ///
    /// An insertion order map has no rank to search by, so an exact match
    /// is never found and removal is always a no-op.
    ///
    /// Fails with [`Error::ComparatorContract`], without changing the map,
    /// if the comparator gives no ordering while locating `k`.
    ///
    /// # Panics
    ///
    /// if the identity index holds the key but its bucket can't be found,
    /// which means the comparator or bucket policy broke their contract.
    pub fn remove(&mut self, k: &K) -> Result<Option<usize>> {
        let sym = (self.symbolize)(k);
        if !self.index.contains_key(&sym) {
            return Ok(None);
        }
        let pos = match &self.compare {
            None => return Ok(None),
            Some(c) => match self.locate(&**c, k)? {
                Loc::Here(i) if self.buckets[i].contains(&sym) => i,
                loc => panic!(
                    "sorted map index holds a key with no exact match in the bucket list (searched {})",
                    loc.pos()
                ),
            },
        };
        if !self.policy.remove(pos, self.buckets[pos].elts_mut(), &sym, k) {
            panic!("bucket policy did not remove the key from bucket {}", pos)
        }
        if self.buckets[pos].is_empty() {
            trace!(pos, buckets = self.buckets.len() - 1, "drop empty bucket");
            self.buckets.remove(pos);
        }
        self.index.remove(&sym);
        Ok(Some(pos))
    }

    /// Call `f(value, key)` for every binding, buckets in ascending rank,
    /// keys within a bucket in bucket order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K),
    {
        for (k, v) in self {
            f(v, k)
        }
    }

    /// iterate over the bindings in the same order as `for_each`
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            index: &self.index,
            buckets: self.buckets.iter(),
            elts: <&[S]>::default().iter(),
            len: self.index.len(),
        }
    }

    /// iterate over the buckets in ascending rank, each yielding its
    /// rank-equal bindings
    pub fn buckets(&self) -> impl Iterator<Item = BucketIter<'_, K, V, S>> + '_ {
        let index = &self.index;
        self.buckets.iter().map(move |b| BucketIter {
            index,
            elts: b.iter(),
        })
    }

    /// remove every binding
    pub fn clear(&mut self) {
        self.index.clear();
        self.buckets.clear();
        self.policy.clear();
    }

    /// get the number of bindings, O(1)
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// get the number of buckets, O(1)
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// true if the map was built with a comparator
    pub fn is_ordered(&self) -> bool {
        self.compare.is_some()
    }

    fn representative(&self, i: usize) -> &K {
        match self.buckets[i].first() {
            Some(s) => &lookup(&self.index, s).key,
            None => panic!("sorted map bucket {} is empty", i),
        }
    }

    fn locate(&self, compare: &dyn Compare<K>, k: &K) -> Result<Loc> {
        bucket::search(self.buckets.len(), |i| {
            compare.compare(k, self.representative(i))
        })
        .map_err(|position| {
            let e = Error::ComparatorContract { position };
            warn!(error = %e, "comparator contract violated");
            e
        })
    }
}

impl<K, V, S> SortedMap<K, V, S>
where
    K: Debug,
    S: Hash + Eq + Clone + Debug,
{
    #[allow(dead_code)]
    pub(crate) fn invariant(&self) {
        let mut total = 0;
        let mut seen = fxhash::FxHashSet::default();
        for (i, b) in self.buckets.iter().enumerate() {
            if b.is_empty() {
                panic!("bucket {} is empty", i)
            }
            total += b.len();
            for s in b.iter() {
                if !seen.insert(s.clone()) {
                    panic!("symbol {:?} found more than once", s)
                }
                let e = lookup(&self.index, s);
                if &(self.symbolize)(&e.key) != s {
                    panic!("key {:?} stored under the wrong symbol {:?}", e.key, s)
                }
            }
        }
        assert_eq!(total, self.index.len(), "index and bucket list disagree");
        match &self.compare {
            None => {
                for b in &self.buckets {
                    assert_eq!(b.len(), 1, "insertion order buckets hold one key")
                }
            }
            Some(c) => {
                for (i, b) in self.buckets.iter().enumerate() {
                    let first = self.representative(i);
                    for s in b.iter() {
                        let k = &lookup(&self.index, s).key;
                        assert_eq!(
                            c.compare(first, k),
                            Some(Ordering::Equal),
                            "{:?} and {:?} share a bucket",
                            first,
                            k
                        );
                    }
                }
                for i in 1..self.buckets.len() {
                    let (a, b) = (self.representative(i - 1), self.representative(i));
                    assert_eq!(
                        c.compare(a, b),
                        Some(Ordering::Less),
                        "buckets out of order {:?} {:?}",
                        a,
                        b
                    );
                }
            }
        }
    }
}

impl<K, V, S> Debug for SortedMap<K, V, S>
where
    K: Debug,
    V: Debug,
    S: Hash + Eq + Clone,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a SortedMap<K, V, S>
where
    S: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for SortedMap<K, V, S>
where
    K: serde::Serialize,
    V: serde::Serialize,
    S: Hash + Eq + Clone,
{
    fn serialize<Se>(&self, serializer: Se) -> std::result::Result<Se::Ok, Se::Error>
    where
        Se: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

/// Iterator over the bindings of a [`SortedMap`] in traversal order.
pub struct Iter<'a, K, V, S> {
    index: &'a FxHashMap<S, Entry<K, V>>,
    buckets: slice::Iter<'a, Bucket<S>>,
    elts: slice::Iter<'a, S>,
    len: usize,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    S: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(s) = self.elts.next() {
                self.len -= 1;
                let e = lookup(self.index, s);
                return Some((&e.key, &e.value));
            }
            self.elts = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V, S> ExactSizeIterator for Iter<'a, K, V, S> where S: Hash + Eq {}

impl<'a, K, V, S> FusedIterator for Iter<'a, K, V, S> where S: Hash + Eq {}

/// The rank-equal bindings of one bucket, in bucket order.
pub struct BucketIter<'a, K, V, S> {
    index: &'a FxHashMap<S, Entry<K, V>>,
    elts: slice::Iter<'a, S>,
}

impl<'a, K, V, S> Iterator for BucketIter<'a, K, V, S>
where
    S: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.elts.next().map(|s| {
            let e = lookup(self.index, s);
            (&e.key, &e.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elts.size_hint()
    }
}

impl<'a, K, V, S> ExactSizeIterator for BucketIter<'a, K, V, S> where S: Hash + Eq {}
