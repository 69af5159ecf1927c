//! ChainedHashMap: fixed bucket array, separate chaining through an entry arena.

use crate::error::{MapError, Result};
use crate::hash::bucket_index;
use crate::iter::{Chain, Iter};
use core::fmt;
use core::mem;
use slotmap::SlotMap;

/// Bucket count used by `new()` and `Default`.
pub const DEFAULT_BUCKETS: usize = 10;

slotmap::new_key_type! {
    pub(crate) struct EntryKey;
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: Box<str>,
    pub(crate) value: i64,
    pub(crate) next: Option<EntryKey>,
}

/// Outcome of a successful `insert`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Insertion {
    /// The key was absent; a new entry now heads its bucket's chain.
    Inserted,
    /// The key was present; its value was replaced in place.
    Updated { previous: i64 },
}

/// Map from text keys to `i64` values over a fixed number of buckets.
///
/// Every entry lives in `slots`; `heads[b]` is the first entry of
/// bucket `b` and each entry links to the next one in its chain. The
/// bucket count never changes after construction.
pub struct ChainedHashMap {
    heads: Vec<Option<EntryKey>>,
    slots: SlotMap<EntryKey, Entry>,
}

impl ChainedHashMap {
    /// Creates an empty map with [`DEFAULT_BUCKETS`] buckets.
    pub fn new() -> Self {
        log::trace!("chained map created with {} buckets", DEFAULT_BUCKETS);
        Self {
            heads: vec![None; DEFAULT_BUCKETS],
            slots: SlotMap::with_key(),
        }
    }

    /// Creates an empty map with exactly `bucket_count` buckets.
    ///
    /// Fails with `InvalidArgument` for a zero count and with
    /// `Allocation` if the bucket array cannot be reserved.
    pub fn with_buckets(bucket_count: usize) -> Result<Self> {
        if bucket_count == 0 {
            return Err(MapError::InvalidArgument("bucket count must be at least 1"));
        }
        let mut heads = Vec::new();
        heads
            .try_reserve_exact(bucket_count)
            .map_err(|_| MapError::Allocation {
                what: "bucket array",
                bytes: bucket_count.saturating_mul(mem::size_of::<Option<EntryKey>>()),
            })?;
        heads.resize(bucket_count, None);
        log::trace!("chained map created with {} buckets", bucket_count);
        Ok(Self {
            heads,
            slots: SlotMap::with_key(),
        })
    }

    #[inline]
    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(key, self.heads.len())
    }

    fn find(&self, bucket: usize, key: &str) -> Option<EntryKey> {
        let mut cursor = self.heads[bucket];
        while let Some(k) = cursor {
            let entry = self.slots.get(k)?;
            if &*entry.key == key {
                return Some(k);
            }
            cursor = entry.next;
        }
        None
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// Entries per bucket. Not managed: the map never resizes.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Inserts `key` or replaces its value.
    ///
    /// A new key is copied into owned storage and prepended to its
    /// bucket's chain. An existing key keeps its position and only its
    /// value changes; nothing is allocated. On `Allocation` failure the
    /// map is left untouched.
    pub fn insert(&mut self, key: &str, value: i64) -> Result<Insertion> {
        let bucket = self.bucket_of(key);
        if let Some(entry) = self.find(bucket, key).and_then(|k| self.slots.get_mut(k)) {
            let previous = mem::replace(&mut entry.value, value);
            return Ok(Insertion::Updated { previous });
        }

        let key = copy_key(key)?;
        let next = self.heads[bucket];
        let k = self.slots.insert(Entry { key, value, next });
        self.heads[bucket] = Some(k);
        Ok(Insertion::Inserted)
    }

    /// Inserts every pair in order, stopping at the first failure.
    /// Pairs inserted before the failure remain.
    pub fn try_extend<I, K>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        for (key, value) in pairs {
            self.insert(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Value stored under `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<i64> {
        let k = self.find(self.bucket_of(key), key)?;
        self.slots.get(k).map(|e| e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut i64> {
        let k = self.find(self.bucket_of(key), key)?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(self.bucket_of(key), key).is_some()
    }

    /// Unlinks `key` from its chain and returns its value, or `None` if
    /// absent. Other entries keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<i64> {
        let bucket = self.bucket_of(key);
        let mut prev: Option<EntryKey> = None;
        let mut cursor = self.heads[bucket];
        while let Some(k) = cursor {
            let entry = self.slots.get(k)?;
            if &*entry.key != key {
                prev = cursor;
                cursor = entry.next;
                continue;
            }

            let next = entry.next;
            match prev {
                Some(p) => {
                    if let Some(pe) = self.slots.get_mut(p) {
                        pe.next = next;
                    }
                }
                None => self.heads[bucket] = next,
            }
            return self.slots.remove(k).map(|e| e.value);
        }
        None
    }

    /// Releases every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        self.release_all();
    }

    /// Tears the map down, releasing each bucket's chain in order, and
    /// returns how many entries were released.
    pub fn destroy(mut self) -> usize {
        let buckets = self.heads.len();
        let released = self.release_all();
        log::trace!(
            "chained map destroyed: released {} entries across {} buckets",
            released,
            buckets
        );
        released
    }

    fn release_all(&mut self) -> usize {
        let mut released = 0;
        for head in self.heads.iter_mut() {
            let mut cursor = head.take();
            while let Some(entry) = cursor.and_then(|k| self.slots.remove(k)) {
                cursor = entry.next;
                released += 1;
            }
        }
        debug_assert!(self.slots.is_empty());
        released
    }

    /// Every `(bucket, key, value)` in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.heads, &self.slots)
    }

    /// Entries of one bucket, head first. Empty for an out-of-range bucket.
    pub fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain::new(self.heads.get(bucket).copied().flatten(), &self.slots)
    }

    pub fn chain_len(&self, bucket: usize) -> usize {
        self.chain(bucket).count()
    }
}

fn copy_key(key: &str) -> Result<Box<str>> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| MapError::Allocation {
            what: "key copy",
            bytes: key.len(),
        })?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

impl Default for ChainedHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a ChainedHashMap {
    type Item = (usize, &'a str, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ChainedHashMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(_, k, v)| (k, v)))
            .finish()
    }
}

/// Human-readable dump listing each non-empty bucket and its chain.
impl fmt::Display for ChainedHashMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "HashTable (size: {}, count: {}):",
            self.bucket_count(),
            self.len()
        )?;
        for (bucket, head) in self.heads.iter().enumerate() {
            if head.is_none() {
                continue;
            }
            write!(f, "  Bucket {}: ", bucket)?;
            for (key, value) in self.chain(bucket) {
                write!(f, "({}: {}) ", key, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
