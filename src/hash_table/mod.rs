//! Hash tables with unique keys.
//!
//! Two collision strategies share the [`HashTable`] interface: [`OpenHashTable`] stores entries in
//! a single slot array and resolves collisions with double hashing, and [`ChainedHashTable`]
//! keeps a chain of entries per bucket. Both pick prime bucket counts.

mod chained;
mod open;

pub use self::chained::ChainedHashTable;
pub use self::open::OpenHashTable;

use crate::error::{Error, Result};
use rand::{Rng, XorShiftRng};
use siphasher::sip::SipHasher;
use std::hash::{Hash, Hasher};

/// Operations shared by the hash tables.
pub trait HashTable<K, V> {
    /// Inserts a key-value pair. Returns `Error::DuplicateKey` and leaves the table unchanged if
    /// the key already exists.
    fn insert(&mut self, key: K, value: V) -> Result<()>;

    /// Inserts a key-value pair, replacing the value of an existing key. Returns the replaced
    /// value, if any.
    fn overwrite(&mut self, key: K, value: V) -> Option<V>;

    /// Returns a reference to the value associated with `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value associated with `key`.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Removes a key and returns its value. Returns `None` if the key does not exist.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Checks if a key exists in the table.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries in the table.
    fn len(&self) -> usize;

    /// Returns `true` if the table is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets of the table.
    fn buckets(&self) -> usize;

    /// Removes every entry. The number of buckets is kept.
    fn clear(&mut self);
}

/// Sizing parameters of a hash table.
///
/// `capacity` is the requested number of buckets and is rounded up to a prime. `max_load` is the
/// highest ratio of entries to buckets the table tolerates before growing.
///
/// # Examples
///
/// ```
/// use classic_collections::hash_table::{HashTable, OpenHashTable, TableConfig};
///
/// let config = TableConfig::open_addressing().with_capacity(40).with_max_load(0.5);
/// let table: OpenHashTable<u32, u32> = OpenHashTable::with_config(config).unwrap();
/// assert_eq!(table.buckets(), 41);
///
/// let config = TableConfig::open_addressing().with_max_load(1.5);
/// assert!(OpenHashTable::<u32, u32>::with_config(config).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableConfig {
    pub capacity: usize,
    pub max_load: f64,
}

impl TableConfig {
    /// Defaults for an open addressing table: 23 buckets filled to at most 75%.
    pub fn open_addressing() -> Self {
        TableConfig {
            capacity: 23,
            max_load: 0.75,
        }
    }

    /// Defaults for a chained table: 11 buckets with at most 4 entries each on average.
    pub fn chaining() -> Self {
        TableConfig {
            capacity: 11,
            max_load: 4.0,
        }
    }

    pub fn with_capacity(self, capacity: usize) -> Self {
        TableConfig { capacity, ..self }
    }

    pub fn with_max_load(self, max_load: f64) -> Self {
        TableConfig { max_load, ..self }
    }

    pub(crate) fn validate(&self, max_load_limit: f64) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidArgument(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if !self.max_load.is_finite() || self.max_load <= 0.0 || self.max_load > max_load_limit {
            return Err(Error::InvalidArgument(format!(
                "max load {} is outside of (0, {}]",
                self.max_load, max_load_limit,
            )));
        }
        Ok(())
    }
}

// Two independent SipHash functions with fixed keys.
#[derive(Clone)]
pub(crate) struct Hashers {
    hashers: [SipHasher; 2],
}

impl Hashers {
    pub(crate) fn new() -> Self {
        let mut rng = XorShiftRng::new_unseeded();
        Hashers {
            hashers: [
                SipHasher::new_with_keys(rng.next_u64(), rng.next_u64()),
                SipHasher::new_with_keys(rng.next_u64(), rng.next_u64()),
            ],
        }
    }

    pub(crate) fn hash<K>(&self, index: usize, key: &K) -> u64
    where
        K: Hash,
    {
        let sip = &mut self.hashers[index].clone();
        key.hash(sip);
        sip.finish()
    }
}
