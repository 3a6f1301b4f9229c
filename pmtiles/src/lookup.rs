//! Finding tiles in a directory tree.
//!
//! [`get_tile`] follows one path from the root directory down to a tile and gives up after
//! [`MAX_DIRECTORY_DEPTH`] directory reads. [`enumerate`] expands the whole tree into one
//! [`TileRecord`] per addressed tile.
//!
//! Both work on any [`DirectorySource`], for example an archive held in memory as a [`Blob`]:
//!
//! ```rust
//! use pmtiles::{lookup, types::TileCoord};
//! use pmtiles::writer::PMTilesWriter;
//! use pmtiles_core::{Blob, io::DataWriterBlob};
//!
//! let mut writer = PMTilesWriter::default();
//! writer.add_tile(&TileCoord::new(1, 0, 1).unwrap(), Blob::from("tile")).unwrap();
//! let mut data = DataWriterBlob::new();
//! let header = writer.write_to_writer(&mut data, &Blob::from("{}")).unwrap();
//! let archive = data.into_blob();
//!
//! let range = lookup::get_tile(&header, &archive, &TileCoord::new(1, 0, 1).unwrap()).unwrap().unwrap();
//! assert_eq!(archive.read_range(&range).unwrap().as_slice(), b"tile");
//! assert_eq!(lookup::enumerate(&header, &archive).unwrap().len(), 1);
//! ```

use crate::{
	PMTilesError, Result,
	types::{EntriesV3, EntryV3, HeaderV3, PMTilesCompression, TileCoord},
};
use pmtiles_core::{Blob, ByteRange};
use std::collections::HashSet;

/// Point lookups read at most this many directories, the root included.
pub const MAX_DIRECTORY_DEPTH: usize = 4;

/// Random access to the bytes of an archive.
pub trait DirectorySource {
	/// Returns the bytes at the absolute `range` of the archive.
	fn read_range(&self, range: &ByteRange) -> anyhow::Result<Blob>;

	fn decompress(&self, blob: Blob, compression: PMTilesCompression) -> anyhow::Result<Blob> {
		compression.decompress(blob)
	}
}

impl DirectorySource for Blob {
	fn read_range(&self, range: &ByteRange) -> anyhow::Result<Blob> {
		Blob::read_range(self, range)
	}
}

/// One addressed tile and the absolute byte range of its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TileRecord {
	pub coord: TileCoord,
	pub range: ByteRange,
}

impl TileRecord {
	/// Records are ordered by zoom level, then column, then row.
	pub fn sort_key(&self) -> (u8, u32, u32) {
		(self.coord.level, self.coord.x, self.coord.y)
	}
}

/// What a directory says about a tile id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Step {
	/// Absolute range of the tile payload.
	Tile(ByteRange),
	/// Absolute range of the directory to continue in.
	Directory(ByteRange),
	NotFound,
}

pub(crate) fn resolve(header: &HeaderV3, entries: &EntriesV3, tile_id: u64) -> Result<Step> {
	let Some(entry) = entries.find_tile(tile_id) else {
		return Ok(Step::NotFound);
	};
	if entry.range.is_empty() {
		return Ok(Step::NotFound);
	}
	Ok(if entry.is_leaf_pointer() {
		Step::Directory(leaf_range(header, &entry)?)
	} else {
		Step::Tile(tile_range(header, &entry)?)
	})
}

pub(crate) fn leaf_range(header: &HeaderV3, entry: &EntryV3) -> Result<ByteRange> {
	absolute(header.leaf_dirs.offset, entry)
}

pub(crate) fn tile_range(header: &HeaderV3, entry: &EntryV3) -> Result<ByteRange> {
	absolute(header.tile_data.offset, entry)
}

fn absolute(base: u64, entry: &EntryV3) -> Result<ByteRange> {
	let offset = base
		.checked_add(entry.range.offset)
		.ok_or_else(|| PMTilesError::malformed(format!("offset of entry {} exceeds 64 bits", entry.tile_id)))?;
	Ok(ByteRange::new(offset, entry.range.length))
}

/// Appends one record per tile id of the run in `entry`.
pub(crate) fn push_run(header: &HeaderV3, entry: &EntryV3, records: &mut Vec<TileRecord>) -> Result<()> {
	let range = tile_range(header, entry)?;
	for index in 0..u64::from(entry.run_length) {
		let tile_id = entry
			.tile_id
			.checked_add(index)
			.ok_or(PMTilesError::TileIdOverflow(entry.tile_id))?;
		records.push(TileRecord {
			coord: TileCoord::from_tile_id(tile_id)?,
			range,
		});
	}
	Ok(())
}

pub(crate) fn sort_records(records: &mut [TileRecord]) {
	records.sort_unstable_by_key(TileRecord::sort_key);
}

fn read_directory<S: DirectorySource + ?Sized>(header: &HeaderV3, source: &S, range: &ByteRange) -> Result<EntriesV3> {
	let blob = source.read_range(range)?;
	let blob = source.decompress(blob, header.internal_compression)?;
	EntriesV3::from_blob(&blob)
}

/// Returns the absolute byte range of the tile at `coord`, or `None` if the archive does not contain it.
pub fn get_tile<S: DirectorySource + ?Sized>(
	header: &HeaderV3,
	source: &S,
	coord: &TileCoord,
) -> Result<Option<ByteRange>> {
	let tile_id = coord.get_tile_id()?;
	let mut range = header.root_dir;

	for depth in 0..MAX_DIRECTORY_DEPTH {
		let entries = read_directory(header, source, &range)?;
		match resolve(header, &entries, tile_id)? {
			Step::Tile(tile) => return Ok(Some(tile)),
			Step::NotFound => return Ok(None),
			Step::Directory(leaf) => {
				log::trace!("tile {tile_id}: descending into {leaf:?} at depth {depth}");
				range = leaf;
			}
		}
	}

	log::debug!("tile {tile_id}: no data after {MAX_DIRECTORY_DEPTH} directories");
	Ok(None)
}

/// Lists every addressed tile of the archive, sorted by zoom level, column and row.
///
/// Runs are expanded to one record per tile and empty entries are skipped. A leaf directory that is
/// referenced twice is reported as malformed.
pub fn enumerate<S: DirectorySource + ?Sized>(header: &HeaderV3, source: &S) -> Result<Vec<TileRecord>> {
	let mut records = Vec::new();
	let mut visited = HashSet::new();
	collect_records(header, source, &header.root_dir, &mut visited, &mut records)?;
	sort_records(&mut records);
	log::debug!("enumerated {} tiles", records.len());
	Ok(records)
}

fn collect_records<S: DirectorySource + ?Sized>(
	header: &HeaderV3,
	source: &S,
	range: &ByteRange,
	visited: &mut HashSet<ByteRange>,
	records: &mut Vec<TileRecord>,
) -> Result<()> {
	for entry in read_directory(header, source, range)?.iter() {
		if entry.range.is_empty() {
			continue;
		}
		if entry.is_leaf_pointer() {
			let leaf = leaf_range(header, entry)?;
			if !visited.insert(leaf) {
				return Err(PMTilesError::malformed(format!("leaf directory {leaf:?} is referenced twice")));
			}
			collect_records(header, source, &leaf, visited, records)?;
		} else {
			push_run(header, entry, records)?;
		}
	}
	Ok(())
}
