use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::hash_table::{HashTable, Hashers, TableConfig};
use crate::primes;
use log::debug;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;
use std::mem;
use std::slice;
use std::vec;

/// A hash table that resolves collisions by chaining entries in their bucket.
///
/// Each bucket holds its entries in insertion order and is searched linearly. Before an
/// insertion would raise the average number of entries per bucket above `max_load`, the bucket
/// count is doubled and rounded up to a prime until the insertion fits, and every entry is
/// rehashed once.
///
/// # Examples
///
/// ```
/// use classic_collections::hash_table::{ChainedHashTable, HashTable};
///
/// let mut table = ChainedHashTable::new();
/// table.insert("a", 1).unwrap();
/// table.insert("b", 2).unwrap();
/// assert!(table.insert("a", 3).is_err());
///
/// assert_eq!(table.get(&"a"), Some(&1));
/// assert_eq!(table.remove(&"a"), Some(1));
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.buckets(), 11);
/// ```
pub struct ChainedHashTable<K, V> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
    max_load: f64,
    hashers: Hashers,
}

impl<K, V> ChainedHashTable<K, V>
where
    K: Hash + Eq,
{
    /// Constructs a new, empty `ChainedHashTable<K, V>` with 11 buckets and a maximum load of 4.
    pub fn new() -> Self {
        Self::from_config(TableConfig::chaining())
    }

    /// Constructs a new, empty `ChainedHashTable<K, V>` with at least `capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(TableConfig::chaining().with_capacity(capacity))
    }

    /// Constructs a new, empty `ChainedHashTable<K, V>` sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the capacity is zero or the maximum load is not a
    /// positive finite number.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate(std::f64::MAX)?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: TableConfig) -> Self {
        ChainedHashTable {
            buckets: Self::empty_buckets(primes::next_prime(config.capacity)),
            len: 0,
            max_load: config.max_load,
            hashers: Hashers::new(),
        }
    }

    fn empty_buckets(count: usize) -> Vec<Vec<Entry<K, V>>> {
        (0..count).map(|_| Vec::new()).collect()
    }

    fn bucket_index(&self, key: &K) -> usize {
        (self.hashers.hash(0, key) % self.buckets.len() as u64) as usize
    }

    // Returns the bucket of `key` and the position of the key in that bucket.
    fn locate(&self, key: &K) -> (usize, Option<usize>) {
        let index = self.bucket_index(key);
        let position = self.buckets[index].iter().position(|entry| entry.key == *key);
        (index, position)
    }

    fn push(&mut self, key: K, value: V) {
        let count = self.buckets.len();
        if (self.len + 1) as f64 / count as f64 > self.max_load {
            let mut new_count = primes::next_prime(2 * count);
            while (self.len + 1) as f64 / new_count as f64 > self.max_load {
                new_count = primes::next_prime(2 * new_count);
            }
            debug!("growing chained hash table from {} to {} buckets", count, new_count);
            let buckets = mem::replace(&mut self.buckets, Self::empty_buckets(new_count));
            for entry in buckets.into_iter().flatten() {
                let index = self.bucket_index(&entry.key);
                self.buckets[index].push(entry);
            }
        }
        let index = self.bucket_index(&key);
        self.buckets[index].push(Entry::new(key, value));
        self.len += 1;
    }

    /// Returns an iterator over the entries of the table in bucket order.
    pub fn iter(&self) -> Iter<K, V> {
        Iter {
            buckets: self.buckets.iter(),
            entries: [].iter(),
        }
    }

    /// Returns an iterator over the keys of the table.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the table.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V> HashTable<K, V> for ChainedHashTable<K, V>
where
    K: Hash + Eq,
{
    fn insert(&mut self, key: K, value: V) -> Result<()> {
        if let (_, Some(_)) = self.locate(&key) {
            return Err(Error::DuplicateKey);
        }
        self.push(key, value);
        Ok(())
    }

    fn overwrite(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            (index, Some(position)) => Some(mem::replace(
                &mut self.buckets[index][position].value,
                value,
            )),
            (_, None) => {
                self.push(key, value);
                None
            },
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        match self.locate(key) {
            (index, Some(position)) => Some(&self.buckets[index][position].value),
            (_, None) => None,
        }
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.locate(key) {
            (index, Some(position)) => Some(&mut self.buckets[index][position].value),
            (_, None) => None,
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let (index, position) = self.locate(key);
        let entry = self.buckets[index].remove(position?);
        self.len -= 1;
        Some(entry.value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn buckets(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        debug!("clearing chained hash table of {} entries", self.len);
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }
}

impl<K, V> Default for ChainedHashTable<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashTable<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashTable<K, V>
where
    K: Hash + Eq,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.overwrite(key, value);
        }
    }
}

/// An iterator over the entries of a `ChainedHashTable<K, V>`.
pub struct Iter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    buckets: slice::Iter<'a, Vec<Entry<K, V>>>,
    entries: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                return Some(entry.as_pair());
            }
            self.entries = self.buckets.next()?.iter();
        }
    }
}

/// An owning iterator over the entries of a `ChainedHashTable<K, V>`.
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<Vec<Entry<K, V>>>,
    entries: vec::IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                return Some(entry.into_pair());
            }
            self.entries = self.buckets.next()?.into_iter();
        }
    }
}

impl<K, V> IntoIterator for ChainedHashTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            entries: Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ChainedHashTable<K, V>
where
    K: 'a + Hash + Eq,
    V: 'a,
{
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> fmt::Debug for ChainedHashTable<K, V>
where
    K: Hash + Eq + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ChainedHashTable;
    use crate::error::Error;
    use crate::hash_table::{HashTable, TableConfig};
    use crate::primes;

    #[test]
    fn test_len_empty() {
        let table: ChainedHashTable<u32, u32> = ChainedHashTable::new();
        assert!(table.is_empty());
        assert_eq!(table.buckets(), 11);
        assert!(!table.contains_key(&0));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut table = ChainedHashTable::new();
        assert_eq!(table.insert(1, "a"), Ok(()));
        assert_eq!(table.insert(1, "b"), Err(Error::DuplicateKey));
        assert_eq!(table.get(&1), Some(&"a"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_overwrite_and_get_mut() {
        let mut table = ChainedHashTable::new();
        assert_eq!(table.overwrite(1, 1), None);
        assert_eq!(table.overwrite(1, 2), Some(1));
        *table.get_mut(&1).unwrap() *= 5;
        assert_eq!(table.get(&1), Some(&10));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut table: ChainedHashTable<u32, u32> = (0..100).map(|key| (key, key)).collect();
        for key in (0..100).filter(|key| key % 2 == 0) {
            assert_eq!(table.remove(&key), Some(key));
        }
        assert_eq!(table.remove(&0), None);
        assert_eq!(table.len(), 50);
        for key in 0..100 {
            assert_eq!(table.contains_key(&key), key % 2 == 1);
        }
    }

    #[test]
    fn test_grows_before_exceeding_load() {
        let mut table = ChainedHashTable::new();
        for key in 0..44 {
            table.insert(key, ()).unwrap();
        }
        assert_eq!(table.buckets(), 11);
        table.insert(44, ()).unwrap();
        assert_eq!(table.buckets(), 23);
        assert!(table.len() as f64 / table.buckets() as f64 <= 4.0);
        for key in 0..45 {
            assert!(table.contains_key(&key));
        }
    }

    #[test]
    fn test_small_max_load() {
        let config = TableConfig::chaining().with_capacity(2).with_max_load(0.5);
        let mut table = ChainedHashTable::with_config(config).unwrap();
        assert_eq!(table.buckets(), 2);
        table.insert(0, ()).unwrap();
        assert_eq!(table.buckets(), 2);
        table.insert(1, ()).unwrap();
        assert_eq!(table.buckets(), 5);
    }

    #[test]
    fn test_grows_past_tiny_max_load() {
        let config = TableConfig::chaining().with_max_load(0.01);
        let mut table = ChainedHashTable::with_config(config).unwrap();
        table.insert(0, 0).unwrap();
        assert_eq!(table.buckets(), 197);
        for key in 1..10 {
            table.insert(key, key).unwrap();
            assert!(table.len() as f64 / table.buckets() as f64 <= 0.01);
            assert!(primes::is_prime(table.buckets()));
        }
        for key in 0..10 {
            assert_eq!(table.get(&key), Some(&key));
        }
    }

    #[test]
    fn test_with_config_invalid() {
        assert!(ChainedHashTable::<u32, u32>::with_capacity(0).is_err());
        let config = TableConfig::chaining().with_max_load(0.0);
        assert!(ChainedHashTable::<u32, u32>::with_config(config).is_err());
        let config = TableConfig::chaining().with_max_load(8.0);
        assert!(ChainedHashTable::<u32, u32>::with_config(config).is_ok());
    }

    #[test]
    fn test_clear() {
        let mut table: ChainedHashTable<u32, u32> = (0..100).map(|key| (key, key)).collect();
        let buckets = table.buckets();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.buckets(), buckets);
        assert_eq!(table.get(&5), None);
    }

    #[test]
    fn test_iter() {
        let table: ChainedHashTable<u32, u32> = (0..20).map(|key| (key, key * 2)).collect();
        let mut pairs: Vec<(u32, u32)> = table.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort();
        assert_eq!(pairs, (0..20).map(|key| (key, key * 2)).collect::<Vec<_>>());
        assert_eq!(table.values().count(), 20);

        let mut keys: Vec<u32> = table.into_iter().map(|(k, _)| k).collect();
        keys.sort();
        assert_eq!(keys, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_debug() {
        let mut table = ChainedHashTable::new();
        table.insert(1, 2).unwrap();
        assert_eq!(format!("{:?}", table), "{1: 2}");
    }
}
