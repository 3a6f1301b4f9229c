//! `ByteRange` addresses a contiguous span of an archive: every region the PMTiles header points to,
//! every tile payload and every leaf directory is one of these.
//!
//! # Examples
//!
//! ```rust
//! use pmtiles_core::ByteRange;
//!
//! let range = ByteRange::new(127, 42);
//! assert_eq!(range.end(), 169);
//! ```

use std::{fmt, ops::Range};

/// An offset/length pair in bytes.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct ByteRange {
	/// The starting offset of the byte range.
	pub offset: u64,
	/// The length of the byte range.
	pub length: u64,
}

impl ByteRange {
	pub fn new(offset: u64, length: u64) -> Self {
		Self { offset, length }
	}

	/// Creates a `ByteRange` with zero offset and zero length.
	pub fn empty() -> Self {
		Self { offset: 0, length: 0 }
	}

	/// Returns `true` if the range covers no bytes.
	pub fn is_empty(&self) -> bool {
		self.length == 0
	}

	/// The first offset after the range. Saturates, so a corrupt range never wraps around to a small end.
	pub fn end(&self) -> u64 {
		self.offset.saturating_add(self.length)
	}

	pub fn as_range_usize(&self) -> Range<usize> {
		Range {
			start: self.offset as usize,
			end: self.end() as usize,
		}
	}
}

impl fmt::Debug for ByteRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ByteRange[{},{}]", self.offset, self.length)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_and_empty() {
		let range = ByteRange::new(23, 42);
		assert_eq!(range.offset, 23);
		assert_eq!(range.length, 42);
		assert!(!range.is_empty());

		let range = ByteRange::empty();
		assert_eq!(range, ByteRange::default());
		assert!(range.is_empty());
	}

	#[test]
	fn end_saturates() {
		assert_eq!(ByteRange::new(23, 42).end(), 65);
		assert_eq!(ByteRange::new(u64::MAX - 1, 42).end(), u64::MAX);
	}

	#[test]
	fn as_range_usize() {
		let range = ByteRange::new(23, 42).as_range_usize();
		assert_eq!(range.start, 23);
		assert_eq!(range.end, 65);
	}

	#[test]
	fn debug() {
		assert_eq!(format!("{:?}", ByteRange::new(23, 42)), "ByteRange[23,42]");
	}
}
