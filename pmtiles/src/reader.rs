//! Reading tiles from a PMTiles v3 archive.
//!
//! `PMTilesReader` reads the header, the root directory and the metadata once when it is opened. Leaf
//! directories are fetched on demand and kept in a small cache.
//!
//! ```rust
//! use pmtiles::{reader::PMTilesReader, types::TileCoord, writer::PMTilesWriter};
//! use pmtiles_core::{Blob, io::DataWriterBlob};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut writer = PMTilesWriter::default();
//!     writer.add_tile(&TileCoord::new(2, 1, 3)?, Blob::from("tile"))?;
//!     let mut data = DataWriterBlob::new();
//!     writer.write_to_writer(&mut data, &Blob::from("{}"))?;
//!
//!     let reader = PMTilesReader::open_reader(Box::new(data.into_reader())).await?;
//!     let tile = reader.get_tile(&TileCoord::new(2, 1, 3)?).await?;
//!     assert_eq!(tile, Some(Blob::from("tile")));
//!     Ok(())
//! }
//! ```

use crate::{
	PMTilesError,
	config::ReaderConfig,
	lookup::{self, MAX_DIRECTORY_DEPTH, Step, TileRecord},
	types::{EntriesV3, HeaderV3, TileCoord},
};
use anyhow::{Context, Result, ensure};
use futures::lock::Mutex;
use pmtiles_core::{Blob, ByteRange, LimitedCache, io::*};
use std::{collections::HashSet, path::Path, sync::Arc};

#[derive(Debug)]
pub struct PMTilesReader {
	data_reader: DataReader,
	header: HeaderV3,
	metadata: Blob,
	root_entries: Arc<EntriesV3>,
	leaf_cache: Mutex<LimitedCache<ByteRange, Arc<EntriesV3>>>,
}

impl PMTilesReader {
	pub async fn open_path(path: &Path) -> Result<PMTilesReader> {
		PMTilesReader::open_reader(DataReaderFile::open(path)?).await
	}

	pub async fn open_reader(data_reader: DataReader) -> Result<PMTilesReader> {
		PMTilesReader::open_reader_with_config(data_reader, &ReaderConfig::default()).await
	}

	pub async fn open_reader_with_config(data_reader: DataReader, config: &ReaderConfig) -> Result<PMTilesReader> {
		log::debug!("opening PMTiles archive {}", data_reader.get_name());

		// a shorter source is still handed to the header codec, which tells foreign data from truncation
		let header_len = HeaderV3::LEN.min(data_reader.get_size());
		let header_bytes = data_reader
			.read_range(&ByteRange::new(0, header_len))
			.await
			.context("failed to read PMTiles header")?;
		let header = HeaderV3::deserialize(&header_bytes)?;
		log::trace!("header: {header:?}");

		let compression = header.internal_compression;

		let root_bytes = data_reader.read_range(&header.root_dir).await?;
		log::trace!("root directory: {} bytes", root_bytes.len());
		let root_entries = EntriesV3::from_blob(&compression.decompress(root_bytes)?)
			.context("failed to decode root directory")?;
		log::trace!("root directory: {} entries", root_entries.len());

		let metadata = if header.metadata.is_empty() {
			Blob::new_empty()
		} else {
			compression
				.decompress(data_reader.read_range(&header.metadata).await?)
				.context("failed to decompress metadata")?
		};
		log::trace!("metadata: {} bytes", metadata.len());

		Ok(PMTilesReader {
			data_reader,
			header,
			metadata,
			root_entries: Arc::new(root_entries),
			leaf_cache: Mutex::new(LimitedCache::with_maximum_length(config.leaf_cache_size)),
		})
	}

	pub fn header(&self) -> &HeaderV3 {
		&self.header
	}

	/// The decompressed metadata. Its content is not interpreted.
	pub fn metadata(&self) -> &Blob {
		&self.metadata
	}

	pub fn root_entries(&self) -> &EntriesV3 {
		&self.root_entries
	}

	pub fn source_name(&self) -> &str {
		self.data_reader.get_name()
	}

	/// Absolute byte range of the tile at `coord`, or `None` if the archive does not contain it.
	pub async fn get_tile_range(&self, coord: &TileCoord) -> Result<Option<ByteRange>> {
		let tile_id = coord.get_tile_id()?;
		let mut entries = Arc::clone(&self.root_entries);

		for _ in 0..MAX_DIRECTORY_DEPTH {
			match lookup::resolve(&self.header, &entries, tile_id)? {
				Step::Tile(range) => return Ok(Some(range)),
				Step::NotFound => return Ok(None),
				Step::Directory(range) => entries = self.get_leaf(&range).await?,
			}
		}

		log::debug!("tile {tile_id}: no data after {MAX_DIRECTORY_DEPTH} directories");
		Ok(None)
	}

	pub async fn get_tile(&self, coord: &TileCoord) -> Result<Option<Blob>> {
		log::trace!("get_tile {coord:?}");
		match self.get_tile_range(coord).await? {
			Some(range) => Ok(Some(self.data_reader.read_range(&range).await?)),
			None => Ok(None),
		}
	}

	/// Lists every addressed tile, sorted by zoom level, column and row.
	pub async fn enumerate(&self) -> Result<Vec<TileRecord>> {
		let mut records = Vec::new();
		let mut visited = HashSet::new();
		let mut pending = vec![Arc::clone(&self.root_entries)];

		while let Some(entries) = pending.pop() {
			for entry in entries.iter() {
				if entry.range.is_empty() {
					continue;
				}
				if entry.is_leaf_pointer() {
					let range = lookup::leaf_range(&self.header, entry)?;
					ensure!(
						visited.insert(range),
						PMTilesError::malformed(format!("leaf directory {range:?} is referenced twice"))
					);
					pending.push(self.get_leaf(&range).await?);
				} else {
					lookup::push_run(&self.header, entry, &mut records)?;
				}
			}
		}

		lookup::sort_records(&mut records);
		log::debug!("enumerated {} tiles", records.len());
		Ok(records)
	}

	/// Returns the decoded leaf directory at the absolute `range`. The cache is not locked during I/O.
	async fn get_leaf(&self, range: &ByteRange) -> Result<Arc<EntriesV3>> {
		let cached = self.leaf_cache.lock().await.get(range);
		if let Some(entries) = cached {
			return Ok(entries);
		}

		let blob = self.data_reader.read_range(range).await?;
		let blob = self.header.internal_compression.decompress(blob)?;
		let entries = EntriesV3::from_blob(&blob).with_context(|| format!("failed to decode leaf directory {range:?}"))?;
		log::trace!("leaf directory {range:?}: {} entries", entries.len());

		Ok(self.leaf_cache.lock().await.add(*range, Arc::new(entries)))
	}
}
