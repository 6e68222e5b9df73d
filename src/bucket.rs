use std::{cmp::Ordering, slice};

/// Result of an ordered placement search over the bucket list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Loc {
    /// the target is rank-equal to the bucket at this position
    Here(usize),
    /// no rank-equal bucket exists, a new one belongs at this position
    NotPresent(usize),
}

impl Loc {
    pub(crate) fn pos(&self) -> usize {
        match self {
            Loc::Here(i) | Loc::NotPresent(i) => *i,
        }
    }
}

/// A bucket is a run of rank-equal keys, stored by symbol, in the order
/// the bucket policy threaded them in. The first symbol stands for the
/// rank of the whole bucket.
#[derive(Clone, Debug)]
pub(crate) struct Bucket<S> {
    syms: Vec<S>,
}

impl<S> Bucket<S> {
    pub(crate) fn empty() -> Self {
        Bucket { syms: Vec::new() }
    }

    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.syms.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.syms.is_empty()
    }

    pub(crate) fn first(&self) -> Option<&S> {
        self.syms.first()
    }

    pub(crate) fn elts_mut(&mut self) -> &mut Vec<S> {
        &mut self.syms
    }

    pub(crate) fn iter(&self) -> slice::Iter<'_, S> {
        self.syms.iter()
    }
}

impl<S: PartialEq> Bucket<S> {
    pub(crate) fn contains(&self, s: &S) -> bool {
        self.syms.iter().any(|e| e == s)
    }
}

/// Binary search over `len` ordered buckets. `rank(i)` compares the target
/// against the representative key of bucket `i`, `None` means the
/// comparator gave no ordering, and the search stops there with `Err(i)`.
///
/// The window never uses `mid +/- 1`, so a target that falls between two
/// adjacent buckets still lands on the slot separating them.
pub(crate) fn search<F>(len: usize, mut rank: F) -> Result<Loc, usize>
where
    F: FnMut(usize) -> Option<Ordering>,
{
    let (mut min, mut max) = (0, len);
    if max <= min {
        return Ok(Loc::NotPresent(min));
    }
    loop {
        let mid = (min + max) / 2;
        let ord = rank(mid).ok_or(mid)?;
        // narrowed down to a choice of two slots
        if max - min <= 1 {
            return Ok(match ord {
                Ordering::Equal => Loc::Here(mid),
                Ordering::Greater => Loc::NotPresent(max),
                Ordering::Less => Loc::NotPresent(min),
            });
        }
        match ord {
            Ordering::Greater => min = mid,
            Ordering::Less => max = mid,
            Ordering::Equal => return Ok(Loc::Here(mid)),
        }
    }
}
