//! The raw separately chained table underneath [`OrderedHashSet`].
//!
//! [`OrderedHashSet`]: crate::OrderedHashSet

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::bucket_count::BucketCount;

/// Sentinel link marking the end of a bucket chain or of the order list.
///
/// Slot indices are bounded by `isize::MAX` through `Vec`, so `usize::MAX`
/// is never a real slot.
const NIL: usize = usize::MAX;

/// A stored value, linked into exactly one bucket chain and into the
/// insertion-order list.
#[derive(Clone)]
struct Node<V> {
    value: V,
    hash: u64,
    chain_next: usize,
    order_prev: usize,
    order_next: usize,
}

#[derive(Clone)]
enum Slot<V> {
    Occupied(Node<V>),
    Vacant { next_free: usize },
}

/// Debug statistics for chain analysis.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Number of chains
    pub bucket_count: usize,
    /// Number of chains holding no elements
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Load factor (populated / bucket_count)
    pub load_factor: f64,
    /// Average length of the non-empty chains
    pub mean_chain_length: f64,
    /// Total memory in bytes reserved by the table
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Chain Table Debug Statistics ===");
        println!(
            "Population: {} over {} buckets ({:.2} load factor)",
            self.populated, self.bucket_count, self.load_factor
        );
        println!(
            "Chains: {} empty, longest {}, mean occupied length {:.2}",
            self.empty_buckets, self.longest_chain, self.mean_chain_length
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// Number of buckets per chain length.
///
/// `counts()[n]` is the number of buckets whose chain holds exactly `n`
/// elements.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainHistogram {
    counts: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ChainHistogram {
    /// Returns the bucket counts indexed by chain length.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Print the histogram as a bar chart, one row per chain length.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        let width = 50usize;

        for (length, &count) in self.counts.iter().enumerate() {
            let filled = if max == 0 {
                0
            } else {
                count.saturating_mul(width).div_ceil(max)
            };
            let bar: alloc::string::String = core::iter::repeat_n('#', filled).collect();
            println!("{:>3} | {} ({})", length, bar, count);
        }
    }
}

/// A hash table resolving collisions by separate chaining, with a fixed
/// bucket count and insertion-ordered iteration.
///
/// `ChainTable<V>` does not hash anything itself: every operation takes the
/// value's hash and an equality predicate, and the table uses `hash % N` to
/// pick one of its `N` chains. Each stored value sits in a single node that is
/// linked both into its bucket's chain and into a doubly-linked list recording
/// insertion order, so the two structures can never disagree about which
/// values are present.
///
/// The bucket count is fixed at construction and never changes; the average
/// chain length grows linearly with the number of stored values.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::BucketCount;
/// # use chain_hash::chain_table::ChainTable;
/// # use chain_hash::chain_table::Entry;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_str(s: &str) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     s.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = ChainTable::with_bucket_count(BucketCount::default());
///
/// for name in ["carol", "alice", "bob", "alice"] {
///     match table.entry(hash_str(name), |s: &String| s == name) {
///         Entry::Vacant(entry) => {
///             entry.insert(name.to_string());
///         }
///         Entry::Occupied(_) => {
///             println!("{name} already present");
///         }
///     }
/// }
///
/// let names: Vec<&str> = table.iter().map(String::as_str).collect();
/// assert_eq!(names, ["carol", "alice", "bob"]);
/// ```
#[derive(Clone)]
pub struct ChainTable<V> {
    buckets: Vec<usize>,
    slots: Vec<Slot<V>>,
    free_head: usize,

    head: usize,
    tail: usize,

    populated: usize,
    bucket_count: BucketCount,
}

impl<V> Debug for ChainTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;

        f.debug_struct("ChainTable")
            .field(
                "chains",
                &self
                    .buckets
                    .iter()
                    .enumerate()
                    .filter(|(_, head)| **head != NIL)
                    .map(|(bucket, _)| format!("{bucket:03}x{:02}", self.chain_len(bucket)))
                    .collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("bucket_count", &self.bucket_count.get())
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<V> ChainTable<V> {
    /// Creates an empty table with `bucket_count` chains.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::BucketCount;
    /// # use chain_hash::chain_table::ChainTable;
    /// #
    /// let count = BucketCount::try_from(8).unwrap();
    /// let table: ChainTable<String> = ChainTable::with_bucket_count(count);
    /// assert_eq!(table.bucket_count(), 8);
    /// assert!(table.is_empty());
    /// ```
    pub fn with_bucket_count(bucket_count: BucketCount) -> Self {
        log::trace!("creating chain table with {bucket_count} buckets");

        let mut buckets = Vec::new();
        buckets.resize(bucket_count.get(), NIL);

        Self {
            buckets,
            slots: Vec::new(),
            free_head: NIL,
            head: NIL,
            tail: NIL,
            populated: 0,
            bucket_count,
        }
    }

    /// Returns the number of chains. This never changes after construction.
    pub fn bucket_count(&self) -> usize {
        self.bucket_count.get()
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns an iterator over all values in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::BucketCount;
    /// # use chain_hash::chain_table::ChainTable;
    /// #
    /// let count = BucketCount::try_from(2).unwrap();
    /// let mut table: ChainTable<u64> = ChainTable::with_bucket_count(count);
    /// for n in [30u64, 10, 20] {
    ///     table.entry(n, |&v| v == n).or_insert(n);
    /// }
    ///
    /// let values: Vec<u64> = table.iter().copied().collect();
    /// assert_eq!(values, [30, 10, 20]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            front: self.head,
            back: self.tail,
            remaining: self.populated,
        }
    }

    /// Returns an iterator that removes and yields all values in insertion
    /// order.
    ///
    /// The table is empty as soon as this is called, whether or not the
    /// iterator is consumed. The bucket count is kept.
    pub fn drain(&mut self) -> Drain<'_, V> {
        if self.populated > 0 {
            log::debug!(
                "draining {} values from {} buckets",
                self.populated,
                self.bucket_count
            );
        }

        let inner = IntoIter {
            slots: core::mem::take(&mut self.slots),
            front: self.head,
            back: self.tail,
            remaining: self.populated,
        };
        self.reset_links();

        Drain {
            inner,
            _table: PhantomData,
        }
    }

    /// Removes all elements from the table.
    ///
    /// The bucket count is preserved, so the table is immediately usable
    /// again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::BucketCount;
    /// # use chain_hash::chain_table::ChainTable;
    /// #
    /// let mut table = ChainTable::with_bucket_count(BucketCount::default());
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.clear();
    ///
    /// assert!(table.is_empty());
    /// assert_eq!(table.bucket_count(), 100);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn clear(&mut self) {
        if self.populated > 0 {
            log::debug!(
                "clearing {} values from {} buckets",
                self.populated,
                self.bucket_count
            );
        }

        self.slots.clear();
        self.reset_links();
    }

    fn reset_links(&mut self) {
        self.buckets.fill(NIL);
        self.free_head = NIL;
        self.head = NIL;
        self.tail = NIL;
        self.populated = 0;
    }

    /// Returns the first value still present, in insertion order.
    pub fn first(&self) -> Option<&V> {
        (self.head != NIL).then(|| &self.node(self.head).value)
    }

    /// Returns the most recently inserted value still present.
    pub fn last(&self) -> Option<&V> {
        (self.tail != NIL).then(|| &self.node(self.tail).value)
    }

    /// Finds a value by its hash and an equality predicate.
    ///
    /// Only the chain selected by `hash` is scanned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::BucketCount;
    /// # use chain_hash::chain_table::ChainTable;
    /// #
    /// let mut table = ChainTable::with_bucket_count(BucketCount::default());
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(7, |&n| n == 7), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        self.search_chain(hash, eq)
            .map(|(_, index)| &self.node(index).value)
    }

    /// Removes and returns a value from the table.
    ///
    /// The value is unlinked from its chain and from the insertion order in a
    /// single step; the order of the remaining values is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::BucketCount;
    /// # use chain_hash::chain_table::ChainTable;
    /// #
    /// let mut table = ChainTable::with_bucket_count(BucketCount::default());
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(42, |&n| n == 42), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let (chain_prev, index) = self.search_chain(hash, eq)?;
        Some(self.unlink(chain_prev, index))
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::BucketCount;
    /// # use chain_hash::chain_table::ChainTable;
    /// # use chain_hash::chain_table::Entry;
    /// #
    /// let mut table = ChainTable::with_bucket_count(BucketCount::default());
    ///
    /// match table.entry(5, |&n: &u64| n == 5) {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert(5);
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// assert!(matches!(table.entry(5, |&n| n == 5), Entry::Occupied(_)));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.search_chain(hash, eq) {
            Some((chain_prev, index)) => Entry::Occupied(OccupiedEntry {
                table: self,
                chain_prev,
                index,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Retains only the values for which `f` returns `true`.
    ///
    /// Values are visited in insertion order.
    pub fn retain(&mut self, mut f: impl FnMut(&V) -> bool) {
        let mut cursor = self.head;
        while cursor != NIL {
            let node = self.node(cursor);
            let next = node.order_next;
            if !f(&node.value) {
                let chain_prev = self.chain_predecessor(cursor);
                self.unlink(chain_prev, cursor);
            }
            cursor = next;
        }
    }

    /// Scans the chain selected by `hash`, returning the matching node and
    /// its predecessor in the chain (`NIL` when it is the chain head).
    fn search_chain(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<(usize, usize)> {
        let mut chain_prev = NIL;
        let mut cursor = self.buckets[self.bucket_count.index(hash)];
        while cursor != NIL {
            let node = self.node(cursor);
            if node.hash == hash && eq(&node.value) {
                return Some((chain_prev, cursor));
            }
            chain_prev = cursor;
            cursor = node.chain_next;
        }
        None
    }

    fn chain_predecessor(&self, index: usize) -> usize {
        let mut chain_prev = NIL;
        let mut cursor = self.buckets[self.bucket_count.index(self.node(index).hash)];
        while cursor != index {
            debug_assert!(cursor != NIL, "node {index} missing from its chain");
            chain_prev = cursor;
            cursor = self.node(cursor).chain_next;
        }
        chain_prev
    }

    fn node(&self, index: usize) -> &Node<V> {
        match &self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {index}"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<V> {
        match &mut self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {index}"),
        }
    }

    /// Stores `value` in a fresh node at the head of its chain and the tail of
    /// the insertion order. The caller must have checked the value is absent.
    fn link(&mut self, hash: u64, value: V) -> usize {
        let bucket = self.bucket_count.index(hash);
        let node = Node {
            value,
            hash,
            chain_next: self.buckets[bucket],
            order_prev: self.tail,
            order_next: NIL,
        };

        let index = if self.free_head != NIL {
            let index = self.free_head;
            if let Slot::Vacant { next_free } = &self.slots[index] {
                self.free_head = *next_free;
            }
            self.slots[index] = Slot::Occupied(node);
            index
        } else {
            self.slots.push(Slot::Occupied(node));
            self.slots.len() - 1
        };

        if self.tail == NIL {
            self.head = index;
        } else {
            self.node_mut(self.tail).order_next = index;
        }
        self.tail = index;
        self.buckets[bucket] = index;
        self.populated += 1;

        index
    }

    /// Detaches the node at `index` from both its chain and the insertion
    /// order, then frees its slot.
    ///
    /// Both unlinks read the links captured from the node itself, so neither
    /// depends on the state the other leaves behind.
    fn unlink(&mut self, chain_prev: usize, index: usize) -> V {
        let freed = core::mem::replace(
            &mut self.slots[index],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        let Slot::Occupied(node) = freed else {
            unreachable!("unlinking vacant slot {index}");
        };
        self.free_head = index;

        if chain_prev == NIL {
            self.buckets[self.bucket_count.index(node.hash)] = node.chain_next;
        } else {
            self.node_mut(chain_prev).chain_next = node.chain_next;
        }

        if node.order_prev == NIL {
            self.head = node.order_next;
        } else {
            self.node_mut(node.order_prev).order_next = node.order_next;
        }
        if node.order_next == NIL {
            self.tail = node.order_prev;
        } else {
            self.node_mut(node.order_next).order_prev = node.order_prev;
        }

        self.populated -= 1;
        if self.populated == 0 {
            // Every slot is vacant; drop the free list along with them.
            self.slots.clear();
            self.free_head = NIL;
        }

        node.value
    }

    fn chain_len(&self, bucket: usize) -> usize {
        let mut len = 0;
        let mut cursor = self.buckets[bucket];
        while cursor != NIL {
            len += 1;
            cursor = self.node(cursor).chain_next;
        }
        len
    }

    /// Returns the number of buckets for each chain length.
    ///
    /// Only available with the `stats` feature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::BucketCount;
    /// # use chain_hash::chain_table::ChainTable;
    /// #
    /// let count = BucketCount::try_from(4).unwrap();
    /// let mut table: ChainTable<u64> = ChainTable::with_bucket_count(count);
    /// for n in [0u64, 4, 1] {
    ///     table.entry(n, |&v| v == n).or_insert(n);
    /// }
    ///
    /// // Buckets 2 and 3 are empty, bucket 1 holds one value, bucket 0 holds two.
    /// assert_eq!(table.chain_histogram().counts(), [2, 1, 1]);
    /// ```
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> ChainHistogram {
        let mut counts = Vec::new();
        for bucket in 0..self.buckets.len() {
            let len = self.chain_len(bucket);
            if counts.len() <= len {
                counts.resize(len + 1, 0);
            }
            counts[len] += 1;
        }
        ChainHistogram { counts }
    }

    /// Returns a summary of chain usage and memory.
    ///
    /// Only available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let bucket_count = self.buckets.len();
        let mut empty_buckets = 0;
        let mut longest_chain = 0;
        for bucket in 0..bucket_count {
            let len = self.chain_len(bucket);
            if len == 0 {
                empty_buckets += 1;
            }
            longest_chain = longest_chain.max(len);
        }

        let occupied_buckets = bucket_count - empty_buckets;
        DebugStats {
            populated: self.populated,
            bucket_count,
            empty_buckets,
            longest_chain,
            load_factor: self.populated as f64 / bucket_count as f64,
            mean_chain_length: if occupied_buckets == 0 {
                0.0
            } else {
                self.populated as f64 / occupied_buckets as f64
            },
            total_bytes: self.buckets.capacity() * core::mem::size_of::<usize>()
                + self.slots.capacity() * core::mem::size_of::<Slot<V>>(),
        }
    }

    /// Checks that the chains and the order list link exactly the same live
    /// nodes, and that every node sits in the chain its hash selects.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        use alloc::vec;

        let mut in_chain = vec![false; self.slots.len()];
        let mut chained = 0;
        for (bucket, &head) in self.buckets.iter().enumerate() {
            let mut cursor = head;
            while cursor != NIL {
                let node = self.node(cursor);
                assert_eq!(self.bucket_count.index(node.hash), bucket);
                assert!(!in_chain[cursor], "node {cursor} chained twice");
                in_chain[cursor] = true;
                chained += 1;
                cursor = node.chain_next;
            }
        }

        let mut ordered = 0;
        let mut prev = NIL;
        let mut cursor = self.head;
        while cursor != NIL {
            let node = self.node(cursor);
            assert_eq!(node.order_prev, prev);
            assert!(in_chain[cursor], "ordered node {cursor} not chained");
            ordered += 1;
            prev = cursor;
            cursor = node.order_next;
        }
        assert_eq!(prev, self.tail);

        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(chained, self.populated);
        assert_eq!(ordered, self.populated);
        assert_eq!(occupied, self.populated);
        assert_eq!(self.buckets.len(), self.bucket_count.get());
    }
}

impl<V> IntoIterator for ChainTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.populated,
        }
    }
}

impl<'a, V> IntoIterator for &'a ChainTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in the table, which may be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`ChainTable`].
///
/// [`entry`]: ChainTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a reference to the
    /// stored value.
    ///
    /// If the entry is occupied, `default` is dropped and the existing value is
    /// returned.
    pub fn or_insert(self, default: V) -> &'a V {
        match self {
            Entry::Occupied(entry) => entry.into_ref(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the value computed by `default` if the entry is vacant.
    ///
    /// The closure is not called when the entry is occupied.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a V {
        match self {
            Entry::Occupied(entry) => entry.into_ref(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Returns `true` if a matching value is present.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Entry::Occupied(_))
    }
}

/// A view into a vacant entry in a [`ChainTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut ChainTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value, appending it to the insertion order.
    ///
    /// The value must match the hash and predicate the entry was looked up
    /// with; otherwise later lookups will not find it.
    pub fn insert(self, value: V) -> &'a V {
        let table = self.table;
        let index = table.link(self.hash, value);
        &table.node(index).value
    }
}

/// A view into an occupied entry in a [`ChainTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut ChainTable<V>,
    chain_prev: usize,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.node(self.index).value
    }

    /// Converts the entry into a reference with the table's lifetime.
    pub fn into_ref(self) -> &'a V {
        let table = self.table;
        &table.node(self.index).value
    }

    /// Swaps in `value`, keeping the entry's place in the insertion order, and
    /// returns the old value.
    ///
    /// `value` must hash and compare equal to the value it replaces.
    pub fn replace(self, value: V) -> V {
        core::mem::replace(&mut self.table.node_mut(self.index).value, value)
    }

    /// Takes the value out of the table.
    pub fn remove(self) -> V {
        self.table.unlink(self.chain_prev, self.index)
    }
}

/// An iterator over the values in a [`ChainTable`], in insertion order.
///
/// This struct is created by the [`iter`] method on [`ChainTable`].
///
/// [`iter`]: ChainTable::iter
pub struct Iter<'a, V> {
    table: &'a ChainTable<V>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            table: self.table,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.table.node(self.front);
        self.front = node.order_next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.table.node(self.back);
        self.back = node.order_prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A consuming iterator over the values in a [`ChainTable`], in insertion
/// order.
pub struct IntoIter<V> {
    slots: Vec<Slot<V>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<V> IntoIter<V> {
    fn take(&mut self, index: usize) -> Node<V> {
        match core::mem::replace(&mut self.slots[index], Slot::Vacant { next_free: NIL }) {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {index}"),
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.take(self.front);
        self.front = node.order_next;
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.take(self.back);
        self.back = node.order_prev;
        self.remaining -= 1;
        Some(node.value)
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

/// A draining iterator over the values in a [`ChainTable`], in insertion
/// order.
///
/// This struct is created by the [`drain`] method on [`ChainTable`]. Values
/// not yielded are dropped along with the iterator.
///
/// [`drain`]: ChainTable::drain
pub struct Drain<'a, V> {
    inner: IntoIter<V>,
    _table: PhantomData<&'a mut ChainTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Drain<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}
