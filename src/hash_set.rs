use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;

use crate::DefaultHashBuilder;
use crate::bucket_count::BucketCount;
use crate::chain_table::ChainTable;
use crate::chain_table::Entry;

/// A hash set that iterates in insertion order, implemented using the
/// separately chained [`ChainTable`] as the underlying storage.
///
/// `OrderedHashSet<T, S>` stores values of type `T` where `T` implements
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash values. Each
/// value is stored once, in the chain its hash selects out of a fixed number
/// of buckets, and is linked into a list that remembers the order values were
/// first inserted.
///
/// # Performance Characteristics
///
/// - **Lookup**: proportional to the length of one chain; the insertion order
///   is never scanned.
/// - **No rehashing**: the bucket count is fixed at construction, so the
///   average chain length grows linearly with the number of values. Size the
///   bucket count for the expected population.
/// - **Memory**: one `usize` per bucket, plus the value, its 64-bit hash and
///   three links per element.
///
/// # Examples
///
/// ```rust
/// # #[cfg(any(feature = "std", feature = "foldhash"))]
/// # {
/// use chain_hash::OrderedHashSet;
///
/// let mut set: OrderedHashSet<&str> = OrderedHashSet::new();
/// set.insert("b");
/// set.insert("a");
/// set.insert("c");
/// set.insert("a");
/// set.remove(&"b");
///
/// let values: Vec<_> = set.iter().copied().collect();
/// assert_eq!(values, ["a", "c"]);
/// # }
/// ```
#[derive(Clone)]
pub struct OrderedHashSet<T, S = DefaultHashBuilder> {
    table: ChainTable<T>,
    hash_builder: S,
}

impl<T, S> PartialEq for OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for OrderedHashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> OrderedHashSet<T, S> {
    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets, fixed when the set was created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let set: OrderedHashSet<i32> = OrderedHashSet::with_bucket_count(16);
    /// assert_eq!(set.bucket_count(), 16);
    /// assert_eq!(OrderedHashSet::<i32>::new().bucket_count(), 100);
    /// # }
    /// ```
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Returns the average number of elements per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements from the set.
    ///
    /// The bucket count is preserved, so the set can be reused straight away.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// set.insert(1);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(!set.contains(&1));
    ///
    /// set.insert(2);
    /// assert!(set.contains(&2));
    /// # }
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the values of the set, in the order they were
    /// first inserted.
    ///
    /// The iterator can be restarted by calling `iter` again. The set cannot
    /// be modified while the iterator is alive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// set.insert(3);
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let values: Vec<i32> = set.iter().copied().collect();
    /// assert_eq!(values, [3, 1, 2]);
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Calls `visitor` on every value, in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let set: OrderedHashSet<&str> = ["x", "y", "z"].into();
    /// let mut joined = String::new();
    /// set.for_each(|v| joined.push_str(v));
    /// assert_eq!(joined, "xyz");
    /// # }
    /// ```
    pub fn for_each(&self, visitor: impl FnMut(&T)) {
        self.iter().for_each(visitor);
    }

    /// Returns the oldest value in the set.
    pub fn first(&self) -> Option<&T> {
        self.table.first()
    }

    /// Returns the most recently inserted value in the set.
    pub fn last(&self) -> Option<&T> {
        self.table.last()
    }

    /// Returns an iterator that removes and yields all values from the set,
    /// in insertion order.
    ///
    /// The set is empty once this returns, even if the iterator is dropped
    /// before it is exhausted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let values: Vec<_> = set.drain().collect();
    /// assert!(set.is_empty());
    /// assert_eq!(values, [2, 1]);
    /// # }
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// Elements are visited in insertion order, and the survivors keep their
    /// relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = (1..=6).collect();
    /// set.retain(|&x| x % 2 == 0);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [2, 4, 6]);
    /// # }
    /// ```
    pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
        self.table.retain(f);
    }

    /// Returns the number of buckets for each chain length.
    ///
    /// Only available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> crate::chain_table::ChainHistogram {
        self.table.chain_histogram()
    }

    /// Returns a summary of chain usage and memory.
    ///
    /// Only available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::chain_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<T, S> OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new set with the default bucket count and the given hasher
    /// builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::OrderedHashSet;
    ///
    /// let set: OrderedHashSet<i32, _> = OrderedHashSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// assert_eq!(set.bucket_count(), 100);
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: ChainTable::with_bucket_count(BucketCount::DEFAULT),
            hash_builder,
        }
    }

    /// Creates a new set with `bucket_count` buckets and the given hasher
    /// builder.
    ///
    /// A count of zero is raised to one, with a warning logged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::OrderedHashSet;
    ///
    /// let set: OrderedHashSet<i32, _> =
    ///     OrderedHashSet::with_bucket_count_and_hasher(1024, RandomState::new());
    /// assert_eq!(set.bucket_count(), 1024);
    ///
    /// let set: OrderedHashSet<i32, _> =
    ///     OrderedHashSet::with_bucket_count_and_hasher(0, RandomState::new());
    /// assert_eq!(set.bucket_count(), 1);
    /// # }
    /// ```
    pub fn with_bucket_count_and_hasher(bucket_count: usize, hash_builder: S) -> Self {
        Self {
            table: ChainTable::with_bucket_count(BucketCount::clamped(bucket_count)),
            hash_builder,
        }
    }

    /// Creates a set with the default bucket count holding `values`.
    ///
    /// Equivalent to inserting each value in turn: duplicates collapse to
    /// their first occurrence, which also fixes their place in the order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::OrderedHashSet;
    ///
    /// let set = OrderedHashSet::from_sequence([3, 1, 3, 2, 1], RandomState::new());
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 1, 2]);
    /// # }
    /// ```
    pub fn from_sequence(values: impl IntoIterator<Item = T>, hash_builder: S) -> Self {
        let mut set = Self::with_hasher(hash_builder);
        set.extend(values);
        set
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain this value, `true` is returned
    ///   and the value becomes the last in iteration order.
    /// - If the set already contained this value, `false` is returned and
    ///   nothing changes, including the value's position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// assert_eq!(set.insert(37), true);
    /// assert_eq!(set.insert(37), false);
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Returns `true` if the set contains a value.
    ///
    /// Only the chain for the value's bucket is scanned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// # }
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Removes a value from the set. Returns whether the value was
    /// present in the set.
    ///
    /// The remaining values keep their order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<char> = ['a', 'b', 'c'].into();
    /// assert_eq!(set.remove(&'b'), true);
    /// assert_eq!(set.remove(&'b'), false);
    /// assert_eq!(set.iter().collect::<String>(), "ac");
    /// # }
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Adds a value to the set, replacing the existing value, if any, that is
    /// equal to the given one. Returns the replaced value.
    ///
    /// A replaced value keeps its original position in the iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.replace(1), Some(1));
    /// assert_eq!(set.replace(2), None);
    /// assert_eq!(set.len(), 2);
    /// # }
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(entry) => Some(entry.replace(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Removes and returns the value in the set, if any, that is equal to the
    /// given one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.take(&1), Some(1));
    /// assert_eq!(set.take(&1), None);
    /// # }
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Returns a reference to the value in the set, if any, that is equal to
    /// the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value)
    }

    /// Returns `true` if the set contains no elements in common with `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let a: OrderedHashSet<i32> = [1, 2].into();
    /// let b: OrderedHashSet<i32> = [3, 4].into();
    /// assert!(a.is_disjoint(&b));
    /// # }
    /// ```
    pub fn is_disjoint(&self, other: &OrderedHashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if the set is a subset of another, i.e., `other`
    /// contains at least all the elements in `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let a: OrderedHashSet<i32> = [1, 2].into();
    /// let b: OrderedHashSet<i32> = [3, 2, 1].into();
    /// assert!(a.is_subset(&b));
    /// assert!(!b.is_subset(&a));
    /// # }
    /// ```
    pub fn is_subset(&self, other: &OrderedHashSet<T, S>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if the set is a superset of another, i.e., `self`
    /// contains at least all the elements in `other`.
    pub fn is_superset(&self, other: &OrderedHashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the union of `self` and `other`.
    ///
    /// Yields the values of `self` in their order, then the values only in
    /// `other` in theirs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let a: OrderedHashSet<i32> = [1, 2].into();
    /// let b: OrderedHashSet<i32> = [3, 2].into();
    ///
    /// let union: Vec<_> = a.union(&b).copied().collect();
    /// assert_eq!(union, [1, 2, 3]);
    /// # }
    /// ```
    pub fn union<'a>(&'a self, other: &'a OrderedHashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            first: self,
        }
    }

    /// Returns an iterator over the values in both `self` and `other`, in the
    /// order of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let a: OrderedHashSet<i32> = [4, 1, 2, 3].into();
    /// let b: OrderedHashSet<i32> = [2, 3, 4].into();
    ///
    /// let intersection: Vec<_> = a.intersection(&b).copied().collect();
    /// assert_eq!(intersection, [4, 2, 3]);
    /// # }
    /// ```
    pub fn intersection<'a>(&'a self, other: &'a OrderedHashSet<T, S>) -> Intersection<'a, T, S> {
        Intersection {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over the values in `self` but not in `other`, in
    /// the order of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let a: OrderedHashSet<i32> = [1, 2, 3].into();
    /// let b: OrderedHashSet<i32> = [2].into();
    ///
    /// let difference: Vec<_> = a.difference(&b).copied().collect();
    /// assert_eq!(difference, [1, 3]);
    /// # }
    /// ```
    pub fn difference<'a>(&'a self, other: &'a OrderedHashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over the values in exactly one of the two sets:
    /// first those only in `self`, then those only in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let a: OrderedHashSet<i32> = [1, 2].into();
    /// let b: OrderedHashSet<i32> = [2, 3].into();
    ///
    /// let sym_diff: Vec<_> = a.symmetric_difference(&b).copied().collect();
    /// assert_eq!(sym_diff, [1, 3]);
    /// # }
    /// ```
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a OrderedHashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

impl<T, S> OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new set with the default bucket count and hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::OrderedHashSet;
    ///
    /// let set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// assert!(set.is_empty());
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new set with `bucket_count` buckets and the default hasher
    /// builder.
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        Self::with_bucket_count_and_hasher(bucket_count, S::default())
    }
}

impl<T, S> Default for OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the values of an `OrderedHashSet`, in insertion order.
pub struct Iter<'a, T> {
    inner: crate::chain_table::Iter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A draining iterator over the values of an `OrderedHashSet`.
pub struct Drain<'a, T> {
    inner: crate::chain_table::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

/// A consuming iterator over the values of an `OrderedHashSet`, in
/// insertion order.
pub struct IntoIter<T> {
    inner: crate::chain_table::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for OrderedHashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a OrderedHashSet<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_sequence(iter, S::default())
    }
}

impl<T, S, const N: usize> From<[T; N]> for OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(values: [T; N]) -> Self {
        Self::from_sequence(values, S::default())
    }
}

impl<T, S> Extend<T> for OrderedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, S> Extend<&'a T> for OrderedHashSet<T, S>
where
    T: Hash + Eq + Copy + 'a,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S> {
    iter: Iter<'a, T>,
    other_iter: Iter<'a, T>,
    first: &'a OrderedHashSet<T, S>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.first.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a OrderedHashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a OrderedHashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S> {
    iter: core::iter::Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;
    use core::hash::BuildHasherDefault;
    use core::hash::Hasher;

    use proptest::prelude::*;
    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            Self {
                k1: OsRng.try_next_u64().unwrap_or(0),
                k2: OsRng.try_next_u64().unwrap_or(0),
            }
        }
    }

    /// Sends every value to the same bucket.
    #[derive(Default)]
    struct CollidingHasher;

    impl Hasher for CollidingHasher {
        fn finish(&self) -> u64 {
            7
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    type CollidingBuilder = BuildHasherDefault<CollidingHasher>;

    fn collect<T: Clone, S>(set: &OrderedHashSet<T, S>) -> Vec<T> {
        set.iter().cloned().collect()
    }

    fn assert_consistent<T: Hash + Eq, S: BuildHasher>(set: &OrderedHashSet<T, S>) {
        set.table.assert_consistent();
        for value in set.iter() {
            assert!(set.contains(value));
        }
        let values: Vec<&T> = set.iter().collect();
        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                assert!(a != b, "value stored twice");
            }
        }
    }

    #[test]
    fn test_new_and_with_hasher() {
        let set: OrderedHashSet<i32, SipHashBuilder> = OrderedHashSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.bucket_count(), 100);

        let set2 = OrderedHashSet::<i32, _>::with_hasher(SipHashBuilder::default());
        assert!(set2.is_empty());
        assert_eq!(set2.bucket_count(), 100);
    }

    #[test]
    fn test_with_bucket_count() {
        let set: OrderedHashSet<i32, SipHashBuilder> = OrderedHashSet::with_bucket_count(7);
        assert_eq!(set.bucket_count(), 7);

        let count = BucketCount::try_from(3).unwrap();
        let set2 = OrderedHashSet::<i32, _>::with_bucket_count_and_hasher(
            count.get(),
            SipHashBuilder::default(),
        );
        assert_eq!(set2.bucket_count(), 3);
    }

    #[test]
    fn zero_bucket_count_is_never_reachable() {
        let mut set: OrderedHashSet<i32, SipHashBuilder> = OrderedHashSet::with_bucket_count(0);
        assert_eq!(set.bucket_count(), 1);

        set.insert(1);
        set.clear();
        assert_eq!(set.bucket_count(), 1);
        assert!(set.insert(2));
        assert!(set.contains(&2));
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());

        assert!(set.insert(1));
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(set.contains(&1));

        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&1));

        assert!(set.insert(2));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert!(set.contains(&2));
        assert!(!set.contains(&3));
    }

    #[test]
    fn duplicate_insert_keeps_first_position() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        for v in ["a", "b", "c"] {
            set.insert(v);
        }

        assert!(!set.insert("a"));
        assert!(!set.insert("b"));
        assert_eq!(set.len(), 3);
        assert_eq!(collect(&set), ["a", "b", "c"]);
    }

    #[test]
    fn order_is_independent_of_buckets() {
        let mut set = OrderedHashSet::with_bucket_count_and_hasher(5, SipHashBuilder::default());
        let values: Vec<u64> = (0..50).map(|i| (i * 7919) % 1000).collect();
        for &v in &values {
            assert!(set.insert(v));
        }

        assert_eq!(collect(&set), values);
        assert_consistent(&set);
    }

    #[test]
    fn removal_mid_sequence() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert('a');
        set.insert('b');
        set.insert('c');

        assert!(set.remove(&'b'));
        assert_eq!(collect(&set), ['a', 'c']);
        assert_consistent(&set);
    }

    #[test]
    fn insert_remove_round_trip() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        for v in 0..10 {
            set.insert(v);
        }

        assert!(set.insert(99));
        assert!(set.remove(&99));
        assert!(!set.contains(&99));
        assert_eq!(collect(&set), (0..10).collect::<Vec<_>>());

        assert!(set.remove(&4));
        assert!(set.insert(4));
        assert_eq!(collect(&set), [0, 1, 2, 3, 5, 6, 7, 8, 9, 4]);
    }

    #[test]
    fn test_remove() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert(1);
        set.insert(2);
        set.insert(3);

        assert!(set.remove(&2));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert!(!set.contains(&2));
        assert!(set.contains(&3));

        assert!(!set.remove(&2));
        assert!(!set.remove(&4));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_last_value_in_bucket() {
        // One value per bucket: each removal empties its chain.
        let mut set = OrderedHashSet::with_bucket_count_and_hasher(
            1000,
            BuildHasherDefault::<IdentityHasher>::default(),
        );
        set.insert(10u64);
        set.insert(20u64);
        set.insert(30u64);

        assert!(set.remove(&20));
        assert!(!set.contains(&20));
        assert_eq!(collect(&set), [10, 30]);
        assert_consistent(&set);

        assert!(set.remove(&10));
        assert!(set.remove(&30));
        assert!(set.is_empty());
        assert_eq!(set.iter().next(), None);
        assert_consistent(&set);
    }

    #[derive(Default)]
    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = (self.0 << 8) | b as u64;
            }
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    #[test]
    fn test_take_and_get() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert(1);
        set.insert(2);

        assert_eq!(set.get(&2), Some(&2));
        assert_eq!(set.take(&1), Some(1));
        assert_eq!(set.len(), 1);
        assert!(!set.contains(&1));

        assert_eq!(set.take(&1), None);
        assert_eq!(set.get(&1), None);
    }

    #[test]
    fn replace_keeps_position() {
        #[derive(Debug, Clone)]
        struct Tagged {
            key: u32,
            tag: &'static str,
        }

        impl PartialEq for Tagged {
            fn eq(&self, other: &Self) -> bool {
                self.key == other.key
            }
        }

        impl Eq for Tagged {}

        impl Hash for Tagged {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.key.hash(state);
            }
        }

        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert(Tagged { key: 1, tag: "old" });
        set.insert(Tagged { key: 2, tag: "two" });

        let old = set.replace(Tagged { key: 1, tag: "new" });
        assert_eq!(old.map(|t| t.tag), Some("old"));

        let tags: Vec<&str> = set.iter().map(|t| t.tag).collect();
        assert_eq!(tags, ["new", "two"]);
    }

    #[test]
    fn test_clear() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert(1);
        set.insert(2);
        set.insert(3);

        set.clear();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert!(!set.contains(&1));
        assert!(!set.contains(&2));
        assert!(!set.contains(&3));
        assert_eq!(set.iter().count(), 0);
        assert_eq!(set.bucket_count(), 100);

        assert!(set.insert(2));
        assert!(set.contains(&2));
        assert_eq!(collect(&set), [2]);
        assert_consistent(&set);
    }

    #[test]
    fn test_iter_and_for_each() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert(3);
        set.insert(1);
        set.insert(2);

        let values: Vec<i32> = set.iter().copied().collect();
        assert_eq!(values, [3, 1, 2]);

        // Restartable.
        let again: Vec<i32> = (&set).into_iter().copied().collect();
        assert_eq!(again, values);

        let mut visited = Vec::new();
        set.for_each(|&v| visited.push(v));
        assert_eq!(visited, values);

        let reversed: Vec<i32> = set.iter().rev().copied().collect();
        assert_eq!(reversed, [2, 1, 3]);
        assert_eq!(set.iter().len(), 3);
        assert_eq!(set.first(), Some(&3));
        assert_eq!(set.last(), Some(&2));
    }

    #[test]
    fn test_into_iterator() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert("x".to_string());
        set.insert("y".to_string());
        set.insert("z".to_string());
        set.remove(&"y".to_string());

        let values: Vec<String> = set.into_iter().collect();
        assert_eq!(values, ["x", "z"]);
    }

    #[test]
    fn test_drain() {
        let mut set = OrderedHashSet::with_hasher(SipHashBuilder::default());
        set.insert(1);
        set.insert(2);
        set.insert(3);

        let drained: Vec<i32> = set.drain().collect();
        assert_eq!(drained, [1, 2, 3]);
        assert!(set.is_empty());
        assert_eq!(set.bucket_count(), 100);

        set.insert(4);
        assert_eq!(collect(&set), [4]);
        assert_consistent(&set);
    }

    #[test]
    fn test_retain() {
        let mut set = OrderedHashSet::with_bucket_count_and_hasher(3, SipHashBuilder::default());
        set.extend(0..30);
        set.retain(|&v| v % 4 == 1);

        assert_eq!(collect(&set), [1, 5, 9, 13, 17, 21, 25, 29]);
        assert_consistent(&set);
    }

    #[test]
    fn test_collision_handling() {
        let mut set = OrderedHashSet::with_hasher(CollidingBuilder::default());

        for i in 0..200 {
            assert!(set.insert(i));
        }
        assert_eq!(set.len(), 200);
        assert_eq!(set.debug_stats().longest_chain, 200);

        for i in (0..200).step_by(2) {
            assert!(set.remove(&i));
        }
        assert_eq!(set.len(), 100);

        for i in 0..200 {
            assert_eq!(set.contains(&i), i % 2 == 1);
        }
        assert_eq!(collect(&set), (1..200).step_by(2).collect::<Vec<_>>());
        assert_consistent(&set);
    }

    #[test]
    fn bulk_construction_collapses_duplicates() {
        let set = OrderedHashSet::from_sequence([5, 3, 5, 1, 3, 9], SipHashBuilder::default());
        assert_eq!(collect(&set), [5, 3, 1, 9]);
        assert_eq!(set.bucket_count(), 100);

        let collected: OrderedHashSet<i32, SipHashBuilder> = [2, 2, 1].into_iter().collect();
        assert_eq!(collect(&collected), [2, 1]);

        let from_array: OrderedHashSet<i32, SipHashBuilder> = [7, 8, 7].into();
        assert_eq!(collect(&from_array), [7, 8]);
    }

    #[test]
    fn test_extend_by_reference() {
        let mut set: OrderedHashSet<i32, SipHashBuilder> =
            OrderedHashSet::with_hasher(SipHashBuilder::default());
        let values = vec![4, 4, 2];
        set.extend(&values);
        assert_eq!(collect(&set), [4, 2]);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = OrderedHashSet::with_bucket_count_and_hasher(
            4,
            SipHashBuilder::default(),
        );
        for v in ["one", "two", "three", "four"] {
            original.insert(v.to_string());
        }

        let mut copy = original.clone();
        copy.remove(&"two".to_string());
        copy.insert("five".to_string());
        assert_eq!(collect(&original), ["one", "two", "three", "four"]);
        assert_eq!(collect(&copy), ["one", "three", "four", "five"]);

        original.insert("six".to_string());
        original.remove(&"one".to_string());
        assert_eq!(collect(&copy), ["one", "three", "four", "five"]);
        assert_eq!(collect(&original), ["two", "three", "four", "six"]);

        assert_consistent(&original);
        assert_consistent(&copy);
    }

    #[test]
    fn two_hundred_strings_survive_clone_and_clear() {
        let mut original = OrderedHashSet::with_hasher(SipHashBuilder::default());
        for i in 0..200 {
            original.insert(i.to_string());
        }

        let expected: Vec<String> = (0..200).map(|i| i.to_string()).collect();
        assert_eq!(collect(&original), expected);

        let copy = original.clone();
        original.clear();

        assert!(original.is_empty());
        assert_eq!(original.iter().next(), None);
        assert_eq!(collect(&copy), expected);
        assert_consistent(&copy);
    }

    #[test]
    fn single_bucket_set_survives_emptying_and_reuse() {
        let mut set: OrderedHashSet<i32, SipHashBuilder> =
            OrderedHashSet::with_bucket_count_and_hasher(1, SipHashBuilder::default());
        set.extend(0..6);
        for v in [3, 0, 5, 1, 4, 2] {
            assert!(set.remove(&v));
            assert_consistent(&set);
        }
        assert!(set.is_empty());
        assert_eq!(set.bucket_count(), 1);

        set.extend([9, 7, 8]);
        assert_eq!(collect(&set), [9, 7, 8]);

        let mut drain = set.drain();
        assert_eq!(drain.next(), Some(9));
        drop(drain);
        assert!(set.is_empty());
        assert_consistent(&set);

        set.extend(10..16);
        set.retain(|&v| v != 12);
        let copy = set.clone();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(collect(&copy), [10, 11, 13, 14, 15]);
        assert_consistent(&copy);

        set.insert(1);
        assert_eq!(collect(&set), [1]);
        assert!(!copy.contains(&1));
    }

    #[test]
    fn owned_iterators_stay_exhausted() {
        let mut set: OrderedHashSet<i32, SipHashBuilder> = [1, 2].into();

        let mut drain = set.drain();
        assert_eq!(drain.by_ref().count(), 2);
        assert_eq!(drain.next(), None);
        assert_eq!(drain.next_back(), None);
        drop(drain);

        set.insert(3);
        let mut into_iter = set.into_iter();
        assert_eq!(into_iter.next(), Some(3));
        assert_eq!(into_iter.next(), None);
        assert_eq!(into_iter.next_back(), None);
        assert_eq!(into_iter.len(), 0);
    }

    #[test]
    fn test_default_trait() {
        let set: OrderedHashSet<i32, SipHashBuilder> = OrderedHashSet::default();
        assert!(set.is_empty());
        assert_eq!(set.bucket_count(), 100);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: OrderedHashSet<i32, SipHashBuilder> = [1, 2, 3].into();
        let b: OrderedHashSet<i32, SipHashBuilder> = [3, 2, 1].into();
        let c: OrderedHashSet<i32, SipHashBuilder> = [1, 2].into();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_follows_insertion_order() {
        let set: OrderedHashSet<i32, SipHashBuilder> = [3, 1, 2].into();
        assert_eq!(format!("{set:?}"), "{3, 1, 2}");
    }

    #[test]
    fn test_load_factor() {
        let mut set = OrderedHashSet::with_bucket_count_and_hasher(10, SipHashBuilder::default());
        set.extend(0..25);
        assert!((set.load_factor() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_disjoint() {
        let a: OrderedHashSet<i32, SipHashBuilder> = [1, 2, 3].into();
        let b: OrderedHashSet<i32, SipHashBuilder> = [4, 5].into();
        let c: OrderedHashSet<i32, SipHashBuilder> = [3, 4].into();

        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
    }

    #[test]
    fn test_subset_and_superset() {
        let a: OrderedHashSet<i32, SipHashBuilder> = [1, 2].into();
        let b: OrderedHashSet<i32, SipHashBuilder> = [1, 2, 3].into();

        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(b.is_superset(&a));
        assert!(!a.is_superset(&b));
    }

    #[test]
    fn test_set_operations_keep_order() {
        let a: OrderedHashSet<i32, SipHashBuilder> = [5, 1, 4, 2].into();
        let b: OrderedHashSet<i32, SipHashBuilder> = [3, 2, 6, 5].into();

        let union: Vec<i32> = a.union(&b).copied().collect();
        assert_eq!(union, [5, 1, 4, 2, 3, 6]);

        let intersection: Vec<i32> = a.intersection(&b).copied().collect();
        assert_eq!(intersection, [5, 2]);

        let difference: Vec<i32> = a.difference(&b).copied().collect();
        assert_eq!(difference, [1, 4]);

        let sym: Vec<i32> = a.symmetric_difference(&b).copied().collect();
        assert_eq!(sym, [1, 4, 3, 6]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8),
        Remove(u8),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0u8..40).prop_map(Op::Insert),
            3 => (0u8..40).prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_ordered_model(
            bucket_count in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 0..200),
        ) {
            let mut set = OrderedHashSet::with_bucket_count_and_hasher(
                bucket_count,
                SipHashBuilder::default(),
            );
            let mut model: Vec<u8> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(v) => {
                        let fresh = !model.contains(&v);
                        if fresh {
                            model.push(v);
                        }
                        prop_assert_eq!(set.insert(v), fresh);
                    }
                    Op::Remove(v) => {
                        let present = model.contains(&v);
                        model.retain(|&m| m != v);
                        prop_assert_eq!(set.remove(&v), present);
                    }
                    Op::Clear => {
                        model.clear();
                        set.clear();
                    }
                }

                set.table.assert_consistent();
                prop_assert_eq!(set.len(), model.len());
                prop_assert_eq!(collect(&set), model.clone());
                for v in 0u8..40 {
                    prop_assert_eq!(set.contains(&v), model.contains(&v));
                }
            }
        }

        #[test]
        fn prop_clone_never_shares_state(
            values in prop::collection::vec(any::<u16>(), 0..64),
            removals in prop::collection::vec(any::<u16>(), 0..16),
        ) {
            let original: OrderedHashSet<u16, SipHashBuilder> = values.iter().copied().collect();
            let before = collect(&original);

            let mut copy = original.clone();
            for r in &removals {
                copy.remove(r);
            }
            copy.insert(u16::MAX);

            prop_assert_eq!(collect(&original), before);
        }
    }
}
