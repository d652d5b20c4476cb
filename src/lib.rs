#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Bucket count configuration.
///
/// This module provides the non-zero [`BucketCount`] every table is built
/// with, along with the default of [`DEFAULT_BUCKET_COUNT`].
pub mod bucket_count;

pub mod chain_table;

/// An insertion-ordered hash set using separate chaining.
///
/// This module provides an `OrderedHashSet` that wraps the `ChainTable` and
/// provides a standard set interface with configurable hashers.
pub mod hash_set;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder hasher builder for builds without a default hasher.
        ///
        /// It cannot be constructed: supply a hasher builder explicitly with
        /// [`OrderedHashSet::with_hasher`].
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}

pub use bucket_count::BucketCount;
pub use bucket_count::BucketCountError;
pub use bucket_count::DEFAULT_BUCKET_COUNT;
#[cfg(any(test, feature = "stats"))]
pub use chain_table::ChainHistogram;
pub use chain_table::ChainTable;
#[cfg(any(test, feature = "stats"))]
pub use chain_table::DebugStats;
pub use hash_set::OrderedHashSet;
