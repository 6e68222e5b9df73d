use thiserror::Error;

/// Errors returned by map construction and ordered mutation.
///
/// Ordinary misses (a `get` of an unknown key, an `add` of a key that is
/// already present, a `remove` of an absent key) are not errors, they are
/// reported as `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The comparator produced no ordering (e.g. a NaN from a numeric
    /// comparator) while ranking a key against the representative key of
    /// the bucket at `position`. Nothing was changed.
    #[error("comparator returned no ordering against bucket {position}")]
    ComparatorContract { position: usize },

    /// A map was built without a symbolizer.
    #[error("a symbolizer is required to build a sorted map")]
    MissingSymbolizer,
}

pub type Result<T> = std::result::Result<T, Error>;
