//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] used for every chunk of bytes
//! that moves through the PMTiles code: tile payloads, compressed directories, headers and metadata.
//!
//! # Examples
//!
//! ```rust
//! use pmtiles_core::{Blob, ByteRange};
//!
//! let blob = Blob::from(&[0, 1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(blob.len(), 8);
//! assert_eq!(blob.read_range(&ByteRange::new(2, 3)).unwrap().as_slice(), &[2, 3, 4]);
//! ```

use super::ByteRange;
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`].
///
/// `Blob` implements [`Hash`] and [`Eq`] so that byte-identical tile payloads can be detected with a
/// `HashMap<&Blob, _>`.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Returns a new [`Blob`] containing the bytes in the specified [`ByteRange`].
	///
	/// # Errors
	///
	/// Returns an error if the range reaches past the end of the blob.
	pub fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		ensure!(
			range.end() <= self.len(),
			"read outside range: {range:?} exceeds blob length {}",
			self.len()
		);
		Ok(Blob::from(&self.0[range.as_range_usize()]))
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_ref()
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the bytes as lowercase hex, separated by spaces.
	///
	/// ```rust
	/// use pmtiles_core::Blob;
	///
	/// assert_eq!(Blob::from(&[0xDE, 0xAD, 0xBE, 0xEF]).as_hex(), "de ad be ef");
	/// ```
	#[must_use]
	pub fn as_hex(&self) -> String {
		self
			.0
			.iter()
			.map(|byte| format!("{byte:02x}"))
			.collect::<Vec<_>>()
			.join(" ")
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(item: String) -> Self {
		Blob(item.into_bytes())
	}
}

/// Prints the byte length followed by the hex representation.
impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({}): {}", self.0.len(), self.as_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn basic_tests() {
		let vec = vec![0, 1, 2, 3, 4, 5, 6, 7];
		let blob = Blob::from(vec.clone());
		assert_eq!(blob.len(), 8);
		assert!(!blob.is_empty());
		assert_eq!(blob.as_slice(), vec.as_slice());
		assert_eq!(blob.into_vec(), vec);
	}

	#[test]
	fn read_range() -> Result<()> {
		let blob = Blob::from("abcdef");
		assert_eq!(blob.read_range(&ByteRange::new(2, 3))?.as_slice(), b"cde");
		assert_eq!(blob.read_range(&ByteRange::new(6, 0))?.len(), 0);
		assert!(blob.read_range(&ByteRange::new(4, 3)).is_err());
		Ok(())
	}

	#[test]
	fn empty() {
		assert!(Blob::new_empty().is_empty());
		assert_eq!(Blob::default(), Blob::new_empty());
	}

	#[test]
	fn debug_and_hex() {
		let blob = Blob::from(&[1, 2, 255]);
		assert_eq!(blob.as_hex(), "01 02 ff");
		assert_eq!(format!("{blob:?}"), "Blob(3): 01 02 ff");
	}

	#[test]
	fn identical_content_hashes_equal() {
		let mut map: HashMap<Blob, u32> = HashMap::new();
		map.insert(Blob::from("ocean"), 1);
		assert_eq!(map.get(&Blob::from(String::from("ocean"))), Some(&1));
		assert_eq!(map.get(&Blob::from("land")), None);
	}
}
