use pmtiles_core::ByteRange;

/// One directory entry.
///
/// With `run_length >= 1` it is a data entry: the tiles `tile_id .. tile_id + run_length` all share the
/// bytes at `range` within the tile data section. With `run_length == 0` it points to a leaf directory
/// at `range` within the leaf directory section, starting at `tile_id`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntryV3 {
	pub tile_id: u64,
	pub range: ByteRange,
	pub run_length: u32,
}

impl EntryV3 {
	pub fn new(tile_id: u64, range: ByteRange, run_length: u32) -> Self {
		Self {
			tile_id,
			range,
			run_length,
		}
	}

	pub fn is_leaf_pointer(&self) -> bool {
		self.run_length == 0
	}

	/// Whether this data entry covers `tile_id`. Always `false` for leaf pointers.
	pub fn covers(&self, tile_id: u64) -> bool {
		tile_id >= self.tile_id && tile_id - self.tile_id < u64::from(self.run_length)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn covers_run() {
		let entry = EntryV3::new(10, ByteRange::new(0, 5), 3);
		assert!(!entry.is_leaf_pointer());
		assert!(!entry.covers(9));
		assert!(entry.covers(10));
		assert!(entry.covers(12));
		assert!(!entry.covers(13));
	}

	#[test]
	fn leaf_pointer_covers_nothing() {
		let entry = EntryV3::new(10, ByteRange::new(0, 5), 0);
		assert!(entry.is_leaf_pointer());
		assert!(!entry.covers(10));
	}
}
