//! chained-hashmap: a single-threaded map from text keys to `i64`
//! values, resolving collisions by separate chaining over a fixed
//! number of buckets.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose structural invariants
//!   can be checked directly: one bucket per key, no duplicate keys,
//!   and a count that always matches the stored entries.
//! - Layers:
//!   - `hash::bucket_index`: polynomial rolling hash (multiplier 31)
//!     reduced modulo the bucket count after every byte.
//!   - `ChainedHashMap`: owns the bucket array and an entry arena.
//!     Each bucket holds the head of a singly linked chain whose links
//!     are arena keys.
//!   - `iter`: borrowing traversals over the whole map or one chain.
//!
//! Constraints
//! - Bucket count fixed at construction (>= 1); no resize or rehash.
//! - New keys are prepended to their chain, so a chain lists entries
//!   newest first. Updating an existing key keeps its position.
//! - Keys are copied into owned storage on insert; callers keep theirs.
//! - Missing keys are `None`, never an error. Errors are reserved for
//!   a zero bucket count and failed allocations, and leave the map as
//!   it was.
//!
//! Ownership
//! - Tree-shaped: the map owns the head array and the arena, the arena
//!   owns every entry, and each entry owns its key. Chains link by
//!   generational key, so unlinking never leaves a dangling reference.
//! - `destroy` releases every chain bucket by bucket; plain `Drop` does
//!   the same implicitly.
//!
//! Notes and non-goals
//! - No internal locking. Mutation needs `&mut self`; share across
//!   threads by wrapping the whole map.
//! - `Display` prints a per-bucket dump for humans; its layout is not
//!   a stable format.

mod chained_hash_map;
mod chained_hash_map_proptest;
mod error;
pub mod hash;
pub mod iter;

// Public surface
pub use chained_hash_map::{ChainedHashMap, Insertion, DEFAULT_BUCKETS};
pub use error::{MapError, Result};
