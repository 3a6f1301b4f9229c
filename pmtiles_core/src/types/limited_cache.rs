//! A small bounded key/value cache.
//!
//! The PMTiles reader keeps recently decoded leaf directories here, keyed by their byte range in the
//! archive. When the cache is full, the older half of the entries (by last access) is evicted in one go.
//!
//! # Examples
//!
//! ```rust
//! use pmtiles_core::LimitedCache;
//!
//! let mut cache = LimitedCache::<u64, &str>::with_maximum_length(2);
//! cache.add(1, "one");
//! assert_eq!(cache.get(&1), Some("one"));
//! assert_eq!(cache.get(&2), None);
//! ```

use std::{collections::HashMap, fmt::Debug, hash::Hash};

pub struct LimitedCache<K, V> {
	cache: HashMap<K, (V, u64)>,
	max_length: usize,
	access_counter: u64,
}

impl<K, V> LimitedCache<K, V>
where
	K: Eq + Hash,
	V: Clone,
{
	/// Creates a cache holding at most `max_length` entries. A length of zero is treated as one.
	pub fn with_maximum_length(max_length: usize) -> Self {
		Self {
			cache: HashMap::new(),
			max_length: max_length.max(1),
			access_counter: 0,
		}
	}

	/// Returns a clone of the cached value and marks it as recently used.
	pub fn get(&mut self, key: &K) -> Option<V> {
		let (value, last_access) = self.cache.get_mut(key)?;
		self.access_counter += 1;
		*last_access = self.access_counter;
		Some(value.clone())
	}

	/// Inserts `value` unless `key` is already present, and returns the value now stored under `key`.
	pub fn add(&mut self, key: K, value: V) -> V {
		if !self.cache.contains_key(&key) && self.cache.len() >= self.max_length {
			self.evict_older_half();
		}
		self.access_counter += 1;
		self
			.cache
			.entry(key)
			.or_insert((value, self.access_counter))
			.0
			.clone()
	}

	pub fn len(&self) -> usize {
		self.cache.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.is_empty()
	}

	fn evict_older_half(&mut self) {
		let mut accesses: Vec<u64> = self.cache.values().map(|(_, access)| *access).collect();
		accesses.sort_unstable();
		let median = accesses[(accesses.len() - 1) / 2];
		self.cache.retain(|_, (_, access)| *access > median);
		log::trace!("leaf cache evicted down to {} entries", self.cache.len());
	}
}

impl<K, V> Debug for LimitedCache<K, V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LimitedCache")
			.field("length", &self.cache.len())
			.field("max_length", &self.max_length)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_and_get() {
		let mut cache = LimitedCache::with_maximum_length(10);
		assert!(cache.is_empty());
		cache.add(1, 100);
		cache.add(2, 200);
		assert_eq!(cache.len(), 2);
		assert_eq!(cache.get(&1), Some(100));
		assert_eq!(cache.get(&2), Some(200));
		assert_eq!(cache.get(&3), None);
	}

	#[test]
	fn add_keeps_existing_value() {
		let mut cache = LimitedCache::with_maximum_length(10);
		assert_eq!(cache.add("a", 1), 1);
		assert_eq!(cache.add("a", 2), 1);
		assert_eq!(cache.get(&"a"), Some(1));
	}

	#[test]
	fn zero_length_holds_one_entry() {
		let mut cache = LimitedCache::with_maximum_length(0);
		cache.add(1, 'a');
		assert_eq!(cache.get(&1), Some('a'));
		cache.add(2, 'b');
		assert_eq!(cache.len(), 1);
		assert_eq!(cache.get(&2), Some('b'));
	}

	#[test]
	fn evicts_least_recently_used() {
		let mut cache = LimitedCache::with_maximum_length(4);
		for i in 0..4u64 {
			cache.add(i, i * 10);
		}
		// touch 0 and 1 so that 2 and 3 become the oldest
		cache.get(&0);
		cache.get(&1);
		cache.add(4, 40);

		assert_eq!(cache.get(&0), Some(0));
		assert_eq!(cache.get(&1), Some(10));
		assert_eq!(cache.get(&2), None);
		assert_eq!(cache.get(&3), None);
		assert_eq!(cache.get(&4), Some(40));
	}

	#[test]
	fn never_exceeds_maximum_length() {
		let mut cache = LimitedCache::with_maximum_length(7);
		for i in 0..1000u32 {
			cache.add(i, i);
			assert!(cache.len() <= 7);
		}
		assert_eq!(cache.get(&999), Some(999));
	}
}
