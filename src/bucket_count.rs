use core::fmt;
use core::num::NonZeroUsize;

/// The number of buckets a table gets when none is requested.
///
/// Chosen to keep chains short for small and medium workloads. The bucket
/// count never changes after construction, so callers expecting many more
/// elements than this should pick a larger count up front.
pub const DEFAULT_BUCKET_COUNT: usize = 100;

/// Error produced when a raw bucket count cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BucketCountError {
    /// A table needs at least one bucket to index into.
    #[error("bucket count must be at least 1")]
    Zero,
}

/// The fixed number of chains in a table.
///
/// Always at least one, so computing `hash % count` can never divide by zero.
///
/// # Examples
///
/// ```rust
/// use chain_hash::BucketCount;
/// use chain_hash::BucketCountError;
///
/// let count = BucketCount::try_from(16).unwrap();
/// assert_eq!(count.get(), 16);
///
/// assert_eq!(BucketCount::try_from(0), Err(BucketCountError::Zero));
/// assert_eq!(BucketCount::default().get(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketCount(NonZeroUsize);

impl BucketCount {
    /// The bucket count used when none is specified.
    pub const DEFAULT: BucketCount = match NonZeroUsize::new(DEFAULT_BUCKET_COUNT) {
        Some(count) => BucketCount(count),
        None => panic!("DEFAULT_BUCKET_COUNT must be non-zero"),
    };

    /// Creates a bucket count, returning `None` if `count` is zero.
    pub const fn new(count: usize) -> Option<Self> {
        match NonZeroUsize::new(count) {
            Some(count) => Some(BucketCount(count)),
            None => None,
        }
    }

    /// Returns the number of buckets.
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Converts a raw count, raising zero to one.
    pub(crate) fn clamped(count: usize) -> Self {
        match Self::new(count) {
            Some(count) => count,
            None => {
                log::warn!("requested a bucket count of 0; using a single bucket instead");
                BucketCount(NonZeroUsize::MIN)
            }
        }
    }

    /// Maps a hash onto a bucket index in `0..self.get()`.
    #[inline(always)]
    pub(crate) fn index(self, hash: u64) -> usize {
        // usize is at most 64 bits wide, and the remainder is below the count.
        (hash % self.0.get() as u64) as usize
    }
}

impl Default for BucketCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<NonZeroUsize> for BucketCount {
    fn from(count: NonZeroUsize) -> Self {
        BucketCount(count)
    }
}

impl From<BucketCount> for usize {
    fn from(count: BucketCount) -> Self {
        count.get()
    }
}

impl TryFrom<usize> for BucketCount {
    type Error = BucketCountError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count).ok_or(BucketCountError::Zero)
    }
}

impl fmt::Display for BucketCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
