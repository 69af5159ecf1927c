//! Borrowing traversals over a `ChainedHashMap`.

use crate::chained_hash_map::{Entry, EntryKey};
use core::iter::{Enumerate, FusedIterator};
use core::slice;
use slotmap::SlotMap;

/// Iterator over every entry as `(bucket, key, value)`, in bucket order
/// and then chain order (most recently inserted first within a bucket).
pub struct Iter<'a> {
    slots: &'a SlotMap<EntryKey, Entry>,
    heads: Enumerate<slice::Iter<'a, Option<EntryKey>>>,
    bucket: usize,
    cursor: Option<EntryKey>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(heads: &'a [Option<EntryKey>], slots: &'a SlotMap<EntryKey, Entry>) -> Self {
        Self {
            slots,
            heads: heads.iter().enumerate(),
            bucket: 0,
            cursor: None,
            remaining: slots.len(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a str, i64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cursor {
                let entry = self.slots.get(k)?;
                self.cursor = entry.next;
                self.remaining = self.remaining.saturating_sub(1);
                return Some((self.bucket, &*entry.key, entry.value));
            }
            let (bucket, head) = self.heads.next()?;
            self.bucket = bucket;
            self.cursor = *head;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Iterator over the entries of a single bucket, head first.
pub struct Chain<'a> {
    slots: &'a SlotMap<EntryKey, Entry>,
    cursor: Option<EntryKey>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(head: Option<EntryKey>, slots: &'a SlotMap<EntryKey, Entry>) -> Self {
        Self {
            slots,
            cursor: head,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = (&'a str, i64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.get(self.cursor?)?;
        self.cursor = entry.next;
        Some((&*entry.key, entry.value))
    }
}

impl FusedIterator for Chain<'_> {}
