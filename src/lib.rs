#![forbid(unsafe_code)]
//! An ordered map keyed by caller defined identity symbols. See the map
//! and set modules for details.

pub(crate) mod bucket;
pub mod config;
pub mod error;
pub mod map;
pub mod policy;
pub mod set;

pub use config::Builder;
pub use error::{Error, Result};
pub use map::SortedMap;
pub use policy::{BucketPolicy, InsertionOrder};
pub use set::SortedSet;

#[cfg(test)]
mod tests;
