use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::hash_table::{HashTable, Hashers, TableConfig};
use crate::primes;
use log::debug;
use std::cmp;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;
use std::mem;
use std::slice;
use std::vec;

enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(Entry<K, V>),
}

enum Probe {
    Found(usize),
    // First reusable slot on the probe sequence, if any.
    Vacant(Option<usize>),
}

/// A hash table that stores every entry in one slot array.
///
/// Collisions are resolved with double hashing: the first hash picks the starting slot and the
/// second hash picks the distance between probed slots. The number of slots is always prime, so
/// every step size visits every slot. Removed entries leave a tombstone that lookups skip over
/// and insertions reuse.
///
/// Before the number of entries would exceed `max_load` times the slot count, the table doubles
/// its slot count, rounded up to a prime, until the new entry fits. When tombstones alone push the table over that limit, the
/// entries are rehashed into a fresh array one prime smaller, or of the same size when the
/// entries would not fit below the limit of the smaller array.
///
/// # Examples
///
/// ```
/// use classic_collections::hash_table::{HashTable, OpenHashTable};
///
/// let mut table = OpenHashTable::new();
/// table.insert(1, "one").unwrap();
/// table.insert(2, "two").unwrap();
/// assert!(table.insert(1, "uno").is_err());
///
/// assert_eq!(table.get(&1), Some(&"one"));
/// assert_eq!(table.overwrite(1, "uno"), Some("one"));
/// assert_eq!(table.remove(&2), Some("two"));
/// assert!(!table.contains_key(&2));
/// assert_eq!(table.len(), 1);
/// ```
pub struct OpenHashTable<K, V> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    max_load: f64,
    hashers: Hashers,
}

impl<K, V> OpenHashTable<K, V>
where
    K: Hash + Eq,
{
    /// Constructs a new, empty `OpenHashTable<K, V>` with 23 slots and a maximum load of 0.75.
    pub fn new() -> Self {
        Self::from_config(TableConfig::open_addressing())
    }

    /// Constructs a new, empty `OpenHashTable<K, V>` with at least `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(TableConfig::open_addressing().with_capacity(capacity))
    }

    /// Constructs a new, empty `OpenHashTable<K, V>` sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the capacity is zero or the maximum load is not in
    /// `(0, 1]`.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate(1.0)?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: TableConfig) -> Self {
        OpenHashTable {
            slots: Self::empty_slots(primes::next_prime(cmp::max(config.capacity, 3))),
            len: 0,
            tombstones: 0,
            max_load: config.max_load,
            hashers: Hashers::new(),
        }
    }

    fn empty_slots(capacity: usize) -> Vec<Slot<K, V>> {
        (0..capacity).map(|_| Slot::Empty).collect()
    }

    fn probe(&self, key: &K) -> Probe {
        let capacity = self.slots.len();
        let mut index = (self.hashers.hash(0, key) % capacity as u64) as usize;
        let step = 1 + (self.hashers.hash(1, key) % (capacity as u64 - 2)) as usize;
        let mut tombstone = None;
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(tombstone.or(Some(index))),
                Slot::Tombstone => {
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                },
                Slot::Occupied(entry) => {
                    if entry.key == *key {
                        return Probe::Found(index);
                    }
                },
            }
            index = (index + step) % capacity;
        }
        Probe::Vacant(tombstone)
    }

    fn entry(&self, key: &K) -> Option<&Entry<K, V>> {
        match self.probe(key) {
            Probe::Found(index) => match &self.slots[index] {
                Slot::Occupied(entry) => Some(entry),
                _ => unreachable!(),
            },
            Probe::Vacant(_) => None,
        }
    }

    fn limit(&self) -> f64 {
        self.slots.len() as f64 * self.max_load
    }

    // Returns `true` if one more entry fits below the load limit of a table with `capacity` slots.
    fn fits(&self, capacity: usize) -> bool {
        (self.len + 1) as f64 <= capacity as f64 * self.max_load
    }

    // Makes room for one more entry. Returns `true` if the slots were rehashed.
    fn reserve_one(&mut self) -> bool {
        let capacity = self.slots.len();
        if (self.len + 1) as f64 > self.limit() {
            let mut new_capacity = primes::next_prime(2 * capacity);
            while !self.fits(new_capacity) {
                new_capacity = primes::next_prime(2 * new_capacity);
            }
            debug!("growing open hash table from {} to {} slots", capacity, new_capacity);
            self.rehash(new_capacity);
            true
        } else if (self.len + self.tombstones + 1) as f64 > self.limit() {
            // shrink by one prime when the live entries still fit below the limit
            let new_capacity = primes::prev_prime(capacity)
                .filter(|smaller| *smaller >= 3 && self.fits(*smaller))
                .unwrap_or(capacity);
            debug!(
                "compacting open hash table with {} entries and {} tombstones from {} to {} slots",
                self.len, self.tombstones, capacity, new_capacity,
            );
            self.rehash(new_capacity);
            true
        } else {
            false
        }
    }

    fn rehash(&mut self, capacity: usize) {
        let slots = mem::replace(&mut self.slots, Self::empty_slots(capacity));
        self.tombstones = 0;
        for slot in slots {
            if let Slot::Occupied(entry) = slot {
                self.place(entry, None);
            }
        }
    }

    // Stores an entry whose key is known to be absent.
    fn place(&mut self, entry: Entry<K, V>, vacant: Option<usize>) {
        let index = match vacant {
            Some(index) => index,
            None => match self.probe(&entry.key) {
                Probe::Vacant(Some(index)) => index,
                _ => panic!("Expected a vacant slot for a new key."),
            },
        };
        if let Slot::Tombstone = self.slots[index] {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(entry);
    }

    fn insert_new(&mut self, key: K, value: V, vacant: Option<usize>) {
        let vacant = if self.reserve_one() { None } else { vacant };
        self.place(Entry::new(key, value), vacant);
        self.len += 1;
    }

    /// Returns an iterator over the entries of the table in slot order.
    pub fn iter(&self) -> Iter<K, V> {
        Iter {
            slots: self.slots.iter(),
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

impl<K, V> HashTable<K, V> for OpenHashTable<K, V>
where
    K: Hash + Eq,
{
    fn insert(&mut self, key: K, value: V) -> Result<()> {
        match self.probe(&key) {
            Probe::Found(_) => Err(Error::DuplicateKey),
            Probe::Vacant(vacant) => {
                self.insert_new(key, value, vacant);
                Ok(())
            },
        }
    }

    fn overwrite(&mut self, key: K, value: V) -> Option<V> {
        match self.probe(&key) {
            Probe::Found(index) => match &mut self.slots[index] {
                Slot::Occupied(entry) => Some(mem::replace(&mut entry.value, value)),
                _ => unreachable!(),
            },
            Probe::Vacant(vacant) => {
                self.insert_new(key, value, vacant);
                None
            },
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.entry(key).map(|entry| &entry.value)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Found(index) => match &mut self.slots[index] {
                Slot::Occupied(entry) => Some(&mut entry.value),
                _ => unreachable!(),
            },
            Probe::Vacant(_) => None,
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        match self.probe(key) {
            Probe::Found(index) => match mem::replace(&mut self.slots[index], Slot::Tombstone) {
                Slot::Occupied(entry) => {
                    self.len -= 1;
                    self.tombstones += 1;
                    Some(entry.value)
                },
                _ => unreachable!(),
            },
            Probe::Vacant(_) => None,
        }
    }

    fn contains_key(&self, key: &K) -> bool {
        self.entry(key).is_some()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn buckets(&self) -> usize {
        self.slots.len()
    }

    fn clear(&mut self) {
        debug!("clearing open hash table of {} entries", self.len);
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.tombstones = 0;
    }
}

impl<K, V> Default for OpenHashTable<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for OpenHashTable<K, V>
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

impl<K, V> Extend<(K, V)> for OpenHashTable<K, V>
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

/// An iterator over the entries of an `OpenHashTable<K, V>`.
pub struct Iter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    slots: slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next() {
            if let Slot::Occupied(entry) = slot {
                return Some(entry.as_pair());
            }
        }
        None
    }
}

/// An owning iterator over the entries of an `OpenHashTable<K, V>`.
pub struct IntoIter<K, V> {
    slots: vec::IntoIter<Slot<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next() {
            if let Slot::Occupied(entry) = slot {
                return Some(entry.into_pair());
            }
        }
        None
    }
}

impl<K, V> IntoIterator for OpenHashTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OpenHashTable<K, V>
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

impl<K, V> fmt::Debug for OpenHashTable<K, V>
where
    K: Hash + Eq + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
