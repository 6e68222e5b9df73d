use crate::map::SortedMap;
use paste::paste;
use rand::Rng;
use std::{fmt::Debug, hash::Hash};

const LEN: usize = 1000;

trait Rand: Sized + Clone + Ord + Hash + Debug + 'static {
    fn rand<R: Rng>(r: &mut R) -> Self;

    // a coarse rank, many keys share one
    fn coarse(&self) -> u8;
}

impl Rand for String {
    fn rand<R: Rng>(r: &mut R) -> Self {
        let len = r.gen_range(1..4);
        (0..len).map(|_| r.gen_range(b'a'..b'f') as char).collect()
    }

    fn coarse(&self) -> u8 {
        self.len() as u8
    }
}

impl Rand for i32 {
    fn rand<R: Rng>(r: &mut R) -> Self {
        r.gen_range(-500..500)
    }

    fn coarse(&self) -> u8 {
        self.rem_euclid(7) as u8
    }
}

fn randvec<T: Rand>(len: usize) -> Vec<T> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| T::rand(&mut rng)).collect()
}

fn build<T: Rand>(coarse: bool) -> SortedMap<T, usize, T> {
    if coarse {
        SortedMap::with_comparator(|k: &T| k.clone(), |a: &T, b: &T| {
            a.coarse().partial_cmp(&b.coarse())
        })
    } else {
        SortedMap::with_comparator(|k: &T| k.clone(), |a: &T, b: &T| a.partial_cmp(b))
    }
}

fn bucket_of<T: Rand>(m: &SortedMap<T, usize, T>, k: &T) -> Option<usize> {
    m.buckets()
        .position(|mut b| b.any(|(bk, _)| bk == k))
}

fn add_remove<T: Rand>(coarse: bool) {
    let mut rng = rand::thread_rng();
    let v = randvec::<T>(LEN);
    let mut m = build::<T>(coarse);
    // live bindings in insertion order
    let mut model: Vec<(T, usize)> = Vec::new();
    for (i, k) in v.iter().enumerate() {
        let present = model.iter().any(|(mk, _)| mk == k);
        let r = m.add(k.clone(), i).unwrap();
        assert_eq!(r.is_some(), !present, "add {:?}", k);
        if let Some(pos) = r {
            assert_eq!(bucket_of(&m, k), Some(pos));
            model.push((k.clone(), i));
        }
        if i % 3 == 0 {
            let victim = &v[rng.gen_range(0..=i)];
            let pos = bucket_of(&m, victim);
            assert_eq!(m.remove(victim).unwrap(), pos);
            assert_eq!(m.remove(victim).unwrap(), None);
            assert_eq!(m.get(victim), None);
            model.retain(|(mk, _)| mk != victim);
        }
        m.invariant();
        assert_eq!(m.len(), model.len());
    }
    for (k, i) in &model {
        assert_eq!(m.get(k), Some(i));
    }
    let mut expected = model.clone();
    if coarse {
        expected.sort_by(|a, b| a.0.coarse().cmp(&b.0.coarse()))
    } else {
        expected.sort_by(|a, b| a.0.cmp(&b.0))
    }
    let got: Vec<(T, usize)> = m.iter().map(|(k, i)| (k.clone(), *i)).collect();
    assert_eq!(got, expected);
    for (k, _) in &expected {
        assert!(m.remove(k).unwrap().is_some());
        m.invariant();
    }
    assert!(m.is_empty());
    assert_eq!(m.bucket_count(), 0);
}

fn insertion_order<T: Rand>() {
    let v = randvec::<T>(LEN);
    let mut m = SortedMap::new(|k: &T| k.clone());
    let mut model: Vec<(T, usize)> = Vec::new();
    for (i, k) in v.iter().enumerate() {
        assert_eq!(m.add(k.clone(), i), Ok(None));
        if !model.iter().any(|(mk, _)| mk == k) {
            model.push((k.clone(), i));
        }
    }
    m.invariant();
    for k in &v {
        assert_eq!(m.remove(k), Ok(None));
    }
    let mut got = Vec::new();
    m.for_each(|i, k| got.push((k.clone(), *i)));
    assert_eq!(got, model);
    assert_eq!(m.bucket_count(), model.len());
}

macro_rules! tests {
    ($name:ident, $t:ty) => {
        paste! {
            #[test]
            fn [<add_remove_ $name _total_order>]() {
                add_remove::<$t>(false)
            }

            #[test]
            fn [<add_remove_ $name _rank_ties>]() {
                add_remove::<$t>(true)
            }

            #[test]
            fn [<insertion_order_ $name>]() {
                insertion_order::<$t>()
            }
        }
    };
}

tests!(int, i32);
tests!(str, String);
