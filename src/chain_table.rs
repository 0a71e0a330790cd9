//! ChainTable: fixed-bucket separate-chaining map with string keys and slot
//! storage.
//!
//! Design notes:
//! - Bucket index is the sum of the ASCII-lowercased byte values of the key
//!   modulo the bucket count. The formula is deliberately weak (anagrams
//!   collide, no avalanche) and is part of the contract; the point of the
//!   structure is chaining with visible collisions, so do not swap in a real
//!   hash function.
//! - Nodes live in a `SlotMap` arena and chains are per-bucket `Vec`s of slot
//!   keys in insertion order, so there is no manual node linking and no
//!   use-after-free surface.
//! - Key comparison is ASCII case-insensitive; nodes keep the original-case
//!   key. Two keys differing only in case intentionally collide.
//! - Every mutating operation probes the full target chain before touching
//!   the structure, and each operation is a single node create/unlink/splice.
//!   Lookups are O(chain length) by design; catalogs are small.

use slotmap::{DefaultKey, SlotMap};

/// Default bucket count. Prime, for distribution.
pub const DEFAULT_BUCKETS: usize = 17;

/// Precondition failures for mutating table operations. These are recovered
/// by callers, never raised as panics.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TableError {
    /// An insert targeted a key already present (case-insensitive).
    DuplicateKey,
    /// A remove or update targeted an absent key.
    KeyNotFound,
}

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
}

/// String-keyed separate-chaining hash table with a fixed bucket count.
#[derive(Debug)]
pub struct ChainTable<V> {
    buckets: Vec<Vec<DefaultKey>>, // chain order == insertion order
    slots: SlotMap<DefaultKey, Node<V>>,
}

impl<V> ChainTable<V> {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates a table with `buckets` chains. A zero count is clamped to one
    /// so the modulus is always defined.
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(1);
        Self {
            buckets: (0..buckets).map(|_| Vec::new()).collect(),
            slots: SlotMap::with_key(),
        }
    }

    /// Bucket index for `key`: ASCII-lowercased byte sum mod bucket count.
    pub fn bucket_index(&self, key: &str) -> usize {
        let sum: usize = key
            .bytes()
            .map(|b| b.to_ascii_lowercase() as usize)
            .sum();
        sum % self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position of `key` within its chain, if present.
    fn probe(&self, key: &str) -> Option<usize> {
        let chain = &self.buckets[self.bucket_index(key)];
        chain.iter().position(|&slot| {
            self.slots
                .get(slot)
                .map(|node| node.key.eq_ignore_ascii_case(key))
                .unwrap_or(false)
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.probe(key).is_some()
    }

    /// Appends a new (key, value) node at the tail of the key's chain.
    /// Fails without mutating when the key is already present.
    pub fn insert(&mut self, key: String, value: V) -> Result<(), TableError> {
        if self.probe(&key).is_some() {
            return Err(TableError::DuplicateKey);
        }
        let index = self.bucket_index(&key);
        let slot = self.slots.insert(Node { key, value });
        self.buckets[index].push(slot);
        Ok(())
    }

    /// Unlinks the key's node from its chain and returns the stored value.
    pub fn remove(&mut self, key: &str) -> Result<V, TableError> {
        let position = self.probe(key).ok_or(TableError::KeyNotFound)?;
        let index = self.bucket_index(key);
        let slot = self.buckets[index].remove(position);
        let node = self.slots.remove(slot).ok_or(TableError::KeyNotFound)?;
        Ok(node.value)
    }

    /// Replaces the value of an existing node in place; the node keeps its
    /// chain position and original-case key.
    pub fn update(&mut self, key: &str, value: V) -> Result<(), TableError> {
        let position = self.probe(key).ok_or(TableError::KeyNotFound)?;
        let index = self.bucket_index(key);
        let slot = self.buckets[index][position];
        match self.slots.get_mut(slot) {
            Some(node) => {
                node.value = value;
                Ok(())
            }
            None => Err(TableError::KeyNotFound),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let position = self.probe(key)?;
        let slot = self.buckets[self.bucket_index(key)][position];
        self.slots.get(slot).map(|node| &node.value)
    }

    /// All stored values, bucket by bucket, chain order within a bucket.
    /// Callers must treat the order as unspecified.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter())
            .filter_map(|&slot| self.slots.get(slot).map(|node| &node.value))
    }

    /// Drops every node and resets the pair count; the bucket count is kept.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.slots.clear();
    }
}

impl<V> Default for ChainTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
