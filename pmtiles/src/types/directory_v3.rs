//! Splitting the entries of an archive into a root directory and leaf directories.

use super::{EntriesV3, EntryV3, entries_v3::serialize_entries};
use crate::{PMTilesError, Result, config::DirectoryConfig};
use anyhow::anyhow;
use pmtiles_core::{Blob, ByteRange};
use std::fmt::Debug;

/// Compressed directory bytes, ready to be written into an archive.
pub struct Directory {
	pub root_bytes: Blob,
	/// All leaf directories, concatenated. Root pointers are relative to the start of this blob.
	pub leaves_bytes: Blob,
	pub leaf_count: usize,
}

impl Debug for Directory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Directory")
			.field("root_bytes", &self.root_bytes.len())
			.field("leaves_bytes", &self.leaves_bytes.len())
			.field("leaf_count", &self.leaf_count)
			.finish()
	}
}

impl EntriesV3 {
	/// Builds the directory tree for the entries of a whole archive.
	///
	/// If all entries fit into `config.target_root_len` after compression, the root holds them directly.
	/// Otherwise they are cut into leaves of `config.initial_leaf_size` entries, and the leaf size is
	/// doubled until the root of leaf pointers fits.
	pub fn build_directory<F>(&self, config: &DirectoryConfig, compress: F) -> Result<Directory>
	where
		F: Fn(Blob) -> anyhow::Result<Blob>,
	{
		if !self.is_sorted() {
			return Err(PMTilesError::malformed("entries must be sorted by tile id without duplicates"));
		}

		let root_bytes = compress(self.serialize()?)?;
		log::debug!(
			"directory with {} entries compresses to {} bytes, budget is {}",
			self.len(),
			root_bytes.len(),
			config.target_root_len
		);
		if root_bytes.len() <= config.target_root_len {
			return Ok(Directory {
				root_bytes,
				leaves_bytes: Blob::new_empty(),
				leaf_count: 0,
			});
		}

		let entries = self.as_slice();
		let mut leaf_size = config.initial_leaf_size.max(1);
		loop {
			let directory = build_root_and_leaves(entries, leaf_size, &compress)?;
			log::debug!(
				"leaf size {leaf_size}: {} leaves, root is {} bytes",
				directory.leaf_count,
				directory.root_bytes.len()
			);
			if directory.root_bytes.len() <= config.target_root_len {
				return Ok(directory);
			}
			if leaf_size >= entries.len() {
				return Err(PMTilesError::External(anyhow!(
					"root directory does not fit into {} bytes even with a single leaf",
					config.target_root_len
				)));
			}
			leaf_size *= 2;
		}
	}
}

fn build_root_and_leaves<F>(entries: &[EntryV3], leaf_size: usize, compress: &F) -> Result<Directory>
where
	F: Fn(Blob) -> anyhow::Result<Blob>,
{
	let mut root_entries = Vec::with_capacity(entries.len().div_ceil(leaf_size));
	let mut leaves_bytes: Vec<u8> = Vec::new();

	for chunk in entries.chunks(leaf_size) {
		let leaf = compress(serialize_entries(chunk)?)?;
		root_entries.push(EntryV3::new(
			chunk[0].tile_id,
			ByteRange::new(leaves_bytes.len() as u64, leaf.len()),
			0,
		));
		leaves_bytes.extend_from_slice(leaf.as_slice());
	}

	Ok(Directory {
		root_bytes: compress(serialize_entries(&root_entries)?)?,
		leaves_bytes: Blob::from(leaves_bytes),
		leaf_count: root_entries.len(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::PMTilesCompression;

	fn uncompressed(blob: Blob) -> anyhow::Result<Blob> {
		Ok(blob)
	}

	fn create_filled_entries(count: u64) -> EntriesV3 {
		EntriesV3::from(
			(0..count)
				.map(|i| EntryV3::new(i * 3, ByteRange::new(i * 1000, 1000 - i % 7), 1))
				.collect::<Vec<_>>(),
		)
	}

	fn config(target_root_len: u64, initial_leaf_size: usize) -> DirectoryConfig {
		DirectoryConfig {
			target_root_len,
			initial_leaf_size,
		}
	}

	#[test]
	fn debug() {
		let directory = Directory {
			root_bytes: Blob::from(vec![1, 2, 3]),
			leaves_bytes: Blob::from(vec![4, 5]),
			leaf_count: 1,
		};
		assert_eq!(
			format!("{directory:?}"),
			"Directory { root_bytes: 3, leaves_bytes: 2, leaf_count: 1 }"
		);
	}

	#[test]
	fn single_entry_stays_in_root() -> Result<()> {
		let entries = EntriesV3::from(vec![EntryV3::new(42, ByteRange::new(0, 10), 1)]);
		let directory = entries.build_directory(&DirectoryConfig::default(), uncompressed)?;

		assert_eq!(directory.leaf_count, 0);
		assert!(directory.leaves_bytes.is_empty());
		let root = EntriesV3::from_blob(&directory.root_bytes)?;
		assert_eq!(root, entries);
		assert_eq!(root.find_tile(42), Some(entries.as_slice()[0]));
		Ok(())
	}

	#[test]
	fn empty_entries() -> Result<()> {
		let directory = EntriesV3::new().build_directory(&DirectoryConfig::default(), uncompressed)?;
		assert_eq!(directory.root_bytes.as_slice(), &[0]);
		assert_eq!(directory.leaf_count, 0);
		Ok(())
	}

	#[test]
	fn leaves_cover_all_entries() -> Result<()> {
		let entries = create_filled_entries(500);
		let directory = entries.build_directory(&config(1024, 64), uncompressed)?;

		assert!(directory.root_bytes.len() <= 1024);
		let root = EntriesV3::from_blob(&directory.root_bytes)?;
		assert_eq!(root.len(), directory.leaf_count);
		assert!(root.iter().all(EntryV3::is_leaf_pointer));

		let mut expected_offset = 0;
		let mut collected = Vec::new();
		for pointer in root.iter() {
			assert_eq!(pointer.range.offset, expected_offset);
			expected_offset = pointer.range.end();
			let leaf = EntriesV3::from_blob(&directory.leaves_bytes.read_range(&pointer.range)?)?;
			assert_eq!(leaf.as_slice()[0].tile_id, pointer.tile_id);
			collected.extend_from_slice(leaf.as_slice());
		}
		assert_eq!(expected_offset, directory.leaves_bytes.len());
		assert_eq!(EntriesV3::from(collected), entries);
		Ok(())
	}

	#[test]
	fn leaf_size_doubles_until_root_fits() -> Result<()> {
		let entries = create_filled_entries(1000);
		// leaf size 1 would need 1000 pointers
		let directory = entries.build_directory(&config(200, 1), uncompressed)?;
		assert!(directory.root_bytes.len() <= 200);
		assert!(directory.leaf_count > 1);
		assert!(directory.leaf_count < 100);
		Ok(())
	}

	#[test]
	fn compressed_directory() -> Result<()> {
		let entries = create_filled_entries(20_000);
		let compression = PMTilesCompression::Gzip;
		let directory = entries.build_directory(&config(2000, 4096), |blob| compression.compress(blob))?;

		assert!(directory.root_bytes.len() <= 2000);
		assert!(directory.leaf_count >= 1);
		let root = EntriesV3::from_blob(&compression.decompress(directory.root_bytes)?)?;
		let first = root.as_slice()[0];
		let leaf = compression.decompress(directory.leaves_bytes.read_range(&first.range)?)?;
		assert_eq!(EntriesV3::from_blob(&leaf)?.as_slice()[0], entries.as_slice()[0]);
		Ok(())
	}

	#[test]
	fn unsorted_entries_are_rejected() {
		let entries = EntriesV3::from(vec![
			EntryV3::new(2, ByteRange::new(0, 1), 1),
			EntryV3::new(1, ByteRange::new(1, 1), 1),
		]);
		assert!(matches!(
			entries.build_directory(&DirectoryConfig::default(), uncompressed),
			Err(PMTilesError::MalformedDirectory(_))
		));
	}

	#[test]
	fn impossible_budget_fails() {
		let entries = create_filled_entries(100);
		assert!(entries.build_directory(&config(2, 16), uncompressed).is_err());
	}
}
