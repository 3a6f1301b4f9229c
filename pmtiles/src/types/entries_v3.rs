//! The directory codec.
//!
//! A serialized directory is a varint entry count followed by four varint columns: tile id deltas,
//! run lengths, lengths and offsets. An offset is written as `0` when the entry starts exactly where
//! its predecessor ends, otherwise as `offset + 1`.

use super::{
	EntryV3,
	varint::{VarintReader, write_varint},
};
use crate::{PMTilesError, Result};
use pmtiles_core::{Blob, ByteRange};
use std::slice::Iter;

/// An ordered list of directory entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntriesV3 {
	entries: Vec<EntryV3>,
}

impl EntriesV3 {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_vec(entries: Vec<EntryV3>) -> Self {
		Self { entries }
	}

	pub fn push(&mut self, entry: EntryV3) {
		self.entries.push(entry);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> Iter<'_, EntryV3> {
		self.entries.iter()
	}

	pub fn as_slice(&self) -> &[EntryV3] {
		&self.entries
	}

	/// Number of tiles addressed by the data entries, counting every tile of a run.
	pub fn tile_count(&self) -> u64 {
		self
			.entries
			.iter()
			.map(|entry| u64::from(entry.run_length))
			.sum()
	}

	/// Whether tile ids are strictly ascending.
	pub fn is_sorted(&self) -> bool {
		self.entries.windows(2).all(|pair| pair[0].tile_id < pair[1].tile_id)
	}

	/// Encodes the entries without compression. Entries must be sorted by tile id.
	///
	/// Fails if a length does not fit into 32 bits or an offset is `u64::MAX`.
	pub fn serialize(&self) -> Result<Blob> {
		serialize_entries(&self.entries)
	}

	/// Decodes a serialized (uncompressed) directory. The whole buffer must be consumed.
	pub fn from_blob(blob: &Blob) -> Result<Self> {
		let mut reader = VarintReader::new(blob.as_slice());

		let count = reader.read_varint()?;
		// every entry needs at least one byte in each of the four columns
		if count > (reader.remaining() / 4) as u64 {
			return Err(PMTilesError::UnexpectedEnd);
		}
		let count = count as usize;

		let mut entries: Vec<EntryV3> = Vec::with_capacity(count);
		let mut tile_id: u64 = 0;
		for _ in 0..count {
			let delta = reader.read_varint()?;
			tile_id = tile_id
				.checked_add(delta)
				.ok_or_else(|| PMTilesError::malformed("tile id exceeds 64 bits"))?;
			entries.push(EntryV3::new(tile_id, ByteRange::empty(), 0));
		}

		for entry in &mut entries {
			let run_length = reader.read_varint()?;
			entry.run_length = u32::try_from(run_length)
				.map_err(|_| PMTilesError::malformed(format!("run length {run_length} exceeds 32 bits")))?;
		}

		for entry in &mut entries {
			let length = reader.read_varint()?;
			if length > u64::from(u32::MAX) {
				return Err(PMTilesError::malformed(format!("length {length} exceeds 32 bits")));
			}
			entry.range.length = length;
		}

		for index in 0..count {
			let value = reader.read_varint()?;
			entries[index].range.offset = if value == 0 {
				if index == 0 {
					return Err(PMTilesError::malformed("first entry cannot continue a predecessor"));
				}
				let previous = entries[index - 1].range;
				previous
					.offset
					.checked_add(previous.length)
					.ok_or_else(|| PMTilesError::malformed("offset exceeds 64 bits"))?
			} else {
				value - 1
			};
		}

		if !reader.is_exhausted() {
			return Err(PMTilesError::malformed(format!(
				"{} trailing bytes after {count} entries",
				reader.remaining()
			)));
		}

		Ok(EntriesV3 { entries })
	}

	/// Finds the entry responsible for `tile_id`: the last entry with `entry.tile_id <= tile_id`, if it
	/// is a leaf pointer or a run covering `tile_id`.
	pub fn find_tile(&self, tile_id: u64) -> Option<EntryV3> {
		let index = self.entries.partition_point(|entry| entry.tile_id <= tile_id);
		let entry = *self.entries.get(index.checked_sub(1)?)?;
		if entry.tile_id == tile_id || entry.is_leaf_pointer() || entry.covers(tile_id) {
			Some(entry)
		} else {
			None
		}
	}
}

impl From<Vec<EntryV3>> for EntriesV3 {
	fn from(entries: Vec<EntryV3>) -> Self {
		Self::from_vec(entries)
	}
}

pub(crate) fn serialize_entries(entries: &[EntryV3]) -> Result<Blob> {
	let mut buffer = Vec::with_capacity(entries.len() * 4 + 8);
	write_varint(&mut buffer, entries.len() as u64);

	let mut last_id = 0;
	for entry in entries {
		write_varint(&mut buffer, entry.tile_id.wrapping_sub(last_id));
		last_id = entry.tile_id;
	}

	for entry in entries {
		write_varint(&mut buffer, u64::from(entry.run_length));
	}

	for entry in entries {
		let length = entry.range.length;
		if length > u64::from(u32::MAX) {
			return Err(PMTilesError::malformed(format!(
				"length {length} of tile {} exceeds 32 bits",
				entry.tile_id
			)));
		}
		write_varint(&mut buffer, length);
	}

	let mut previous: Option<&EntryV3> = None;
	for entry in entries {
		let contiguous = previous.is_some_and(|previous| entry.range.offset == previous.range.end());
		let value = if contiguous {
			0
		} else {
			entry.range.offset.checked_add(1).ok_or_else(|| {
				PMTilesError::malformed(format!("offset of tile {} cannot be encoded", entry.tile_id))
			})?
		};
		write_varint(&mut buffer, value);
		previous = Some(entry);
	}

	Ok(Blob::from(buffer))
}
