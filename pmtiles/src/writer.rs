//! Writing PMTiles v3 archives.
//!
//! Tiles are collected in memory and written in one go, ordered by tile id. Byte-identical payloads
//! are stored once, and consecutive tile ids sharing a payload become a single run entry.
//!
//! The archive layout is `header | root directory | metadata | leaf directories | tile data`.

use crate::{
	config::WriterConfig,
	types::{EntriesV3, EntryV3, HeaderV3, TileCoord},
};
use anyhow::{Context, Result, bail};
use pmtiles_core::{
	Blob, ByteRange,
	io::{DataWriterFile, DataWriterTrait},
};
use std::{
	collections::{HashMap, hash_map::Entry},
	path::Path,
};

#[derive(Debug, Default)]
pub struct PMTilesWriter {
	config: WriterConfig,
	tiles: Vec<(u64, Blob)>,
	zoom_range: Option<(u8, u8)>,
	geo_bbox: Option<[f64; 4]>,
}

impl PMTilesWriter {
	pub fn new(config: WriterConfig) -> PMTilesWriter {
		PMTilesWriter {
			config,
			..PMTilesWriter::default()
		}
	}

	/// Adds a tile. Empty payloads are ignored, since a zero-length entry means "no tile".
	pub fn add_tile(&mut self, coord: &TileCoord, blob: Blob) -> Result<()> {
		let tile_id = coord.get_tile_id()?;
		if blob.is_empty() {
			log::warn!("ignoring empty tile {coord:?}");
			return Ok(());
		}

		self.zoom_range = Some(match self.zoom_range {
			None => (coord.level, coord.level),
			Some((min, max)) => (min.min(coord.level), max.max(coord.level)),
		});

		let [west, south, east, north] = coord.as_geo_bbox();
		self.geo_bbox = Some(match self.geo_bbox {
			None => [west, south, east, north],
			Some(bbox) => [bbox[0].min(west), bbox[1].min(south), bbox[2].max(east), bbox[3].max(north)],
		});

		self.tiles.push((tile_id, blob));
		Ok(())
	}

	pub fn tile_count(&self) -> usize {
		self.tiles.len()
	}

	/// Writes the complete archive, starting at position 0 of `writer`, and returns its header.
	pub fn write_to_writer(self, writer: &mut dyn DataWriterTrait, metadata: &Blob) -> Result<HeaderV3> {
		let PMTilesWriter {
			config,
			mut tiles,
			zoom_range,
			geo_bbox,
		} = self;

		tiles.sort_unstable_by_key(|(tile_id, _)| *tile_id);
		if let Some(pair) = tiles.windows(2).find(|pair| pair[0].0 == pair[1].0) {
			bail!("tile {} was added twice", pair[0].0);
		}

		let mut entries: Vec<EntryV3> = Vec::new();
		let mut tile_data: Vec<u8> = Vec::new();
		let mut contents: HashMap<&Blob, ByteRange> = HashMap::new();

		for (tile_id, blob) in &tiles {
			let range = match contents.entry(blob) {
				Entry::Occupied(entry) => *entry.get(),
				Entry::Vacant(entry) => {
					let range = ByteRange::new(tile_data.len() as u64, blob.len());
					tile_data.extend_from_slice(blob.as_slice());
					*entry.insert(range)
				}
			};

			if let Some(last) = entries.last_mut() {
				let extends_run = last.range == range
					&& last.run_length < u32::MAX
					&& last.tile_id + u64::from(last.run_length) == *tile_id;
				if extends_run {
					last.run_length += 1;
					continue;
				}
			}
			entries.push(EntryV3::new(*tile_id, range, 1));
		}

		let entries = EntriesV3::from(entries);
		log::debug!(
			"{} tiles, {} entries, {} distinct contents, {} bytes of tile data",
			tiles.len(),
			entries.len(),
			contents.len(),
			tile_data.len()
		);

		let compression = config.internal_compression;
		let directory = entries.build_directory(&config.directory, |blob| compression.compress(blob))?;
		log::debug!("directory: {directory:?}");
		let metadata = compression
			.compress(metadata.clone())
			.context("failed to compress metadata")?;

		let mut header = HeaderV3 {
			addressed_tiles_count: tiles.len() as u64,
			tile_entries_count: entries.len() as u64,
			tile_contents_count: contents.len() as u64,
			clustered: true,
			internal_compression: compression,
			tile_compression: config.tile_compression,
			tile_type: config.tile_type,
			..HeaderV3::default()
		};
		if let Some((min_zoom, max_zoom)) = zoom_range {
			header.min_zoom = min_zoom;
			header.max_zoom = max_zoom;
		}
		if let Some(bbox) = geo_bbox {
			header.set_geo_bbox(bbox, header.min_zoom);
		}

		writer.set_position(HeaderV3::LEN)?;
		header.root_dir = writer.append(&directory.root_bytes)?;
		header.metadata = writer.append(&metadata)?;
		header.leaf_dirs = writer.append(&directory.leaves_bytes)?;
		header.tile_data = writer.append(&Blob::from(tile_data))?;
		writer.write_start(&header.serialize()?)?;

		log::trace!("header: {header:?}");
		Ok(header)
	}

	pub fn write_to_path(self, path: &Path, metadata: &Blob) -> Result<HeaderV3> {
		let mut writer = DataWriterFile::from_path(path)?;
		let header = self
			.write_to_writer(&mut writer, metadata)
			.with_context(|| format!("failed to write PMTiles archive {path:?}"))?;
		writer.finish()?;
		Ok(header)
	}
}
