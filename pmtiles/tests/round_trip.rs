use anyhow::Result;
use pmtiles::{
	PMTilesError, PMTilesReader, PMTilesWriter, TileCoord,
	config::{DirectoryConfig, WriterConfig},
	types::{HeaderV3, PMTilesCompression, PMTilesType},
};
use pmtiles_core::{
	Blob, ByteRange,
	io::{DataReaderBlob, DataWriterBlob},
};

fn coords(max_level: u8) -> Vec<TileCoord> {
	let mut coords = Vec::new();
	for level in 0..=max_level {
		for x in 0..(1u32 << level) {
			for y in 0..(1u32 << level) {
				coords.push(TileCoord { level, x, y });
			}
		}
	}
	coords
}

/// Water everywhere, except for the tiles on the diagonal.
fn content(coord: &TileCoord) -> Blob {
	if coord.x == coord.y {
		Blob::from(format!("land {}/{}/{}", coord.level, coord.x, coord.y))
	} else {
		Blob::from("water")
	}
}

fn write_archive(max_level: u8, config: WriterConfig, metadata: &Blob) -> Result<Blob> {
	let mut writer = PMTilesWriter::new(config);
	for coord in coords(max_level) {
		writer.add_tile(&coord, content(&coord))?;
	}
	let mut data = DataWriterBlob::new();
	writer.write_to_writer(&mut data, metadata)?;
	Ok(data.into_blob())
}

async fn open(blob: Blob) -> Result<PMTilesReader> {
	PMTilesReader::open_reader(Box::new(DataReaderBlob::from(blob))).await
}

#[tokio::test]
async fn every_tile_comes_back() -> Result<()> {
	let config = WriterConfig {
		tile_compression: PMTilesCompression::None,
		tile_type: PMTilesType::PNG,
		directory: DirectoryConfig {
			target_root_len: 100,
			initial_leaf_size: 32,
		},
		..WriterConfig::default()
	};
	let metadata = Blob::from(r#"{"vector_layers":[]}"#);
	let reader = open(write_archive(6, config, &metadata)?).await?;

	assert_eq!(reader.metadata(), &metadata);
	assert_eq!(reader.header().tile_type, PMTilesType::PNG);
	assert_eq!((reader.header().min_zoom, reader.header().max_zoom), (0, 6));

	for coord in coords(6) {
		assert_eq!(reader.get_tile(&coord).await?, Some(content(&coord)), "{coord:?}");
	}
	assert_eq!(reader.get_tile(&TileCoord::new(7, 0, 0)?).await?, None);
	Ok(())
}

#[tokio::test]
async fn duplicates_and_runs_are_counted() -> Result<()> {
	let reader = open(write_archive(4, WriterConfig::default(), &Blob::new_empty())?).await?;
	let header = reader.header();

	let all = coords(4).len() as u64;
	let diagonal = (0..=4u64).map(|level| 1 << level).sum::<u64>();
	assert_eq!(header.addressed_tiles_count, all);
	assert_eq!(header.tile_contents_count, diagonal + 1);
	assert!(header.tile_entries_count < all);
	assert!(header.tile_entries_count > diagonal);

	// "water" is stored once, all water tiles share its range
	let water: Vec<ByteRange> = {
		let mut ranges = Vec::new();
		for coord in coords(4).into_iter().filter(|c| c.x != c.y) {
			ranges.push(reader.get_tile_range(&coord).await?.unwrap());
		}
		ranges
	};
	assert!(water.windows(2).all(|pair| pair[0] == pair[1]));

	let records = reader.enumerate().await?;
	assert_eq!(records.len() as u64, all);
	Ok(())
}

#[tokio::test]
async fn concurrent_lookups() -> Result<()> {
	let config = WriterConfig {
		directory: DirectoryConfig {
			target_root_len: 60,
			initial_leaf_size: 8,
		},
		..WriterConfig::default()
	};
	let reader = std::sync::Arc::new(open(write_archive(5, config, &Blob::new_empty())?).await?);

	let mut handles = Vec::new();
	for coord in coords(5) {
		let reader = reader.clone();
		handles.push(tokio::spawn(async move {
			reader.get_tile(&coord).await.map(|tile| (coord, tile))
		}));
	}
	for handle in handles {
		let (coord, tile) = handle.await??;
		assert_eq!(tile, Some(content(&coord)));
	}
	Ok(())
}

#[tokio::test]
async fn corrupted_leaf_is_a_typed_error() -> Result<()> {
	let config = WriterConfig {
		internal_compression: PMTilesCompression::None,
		directory: DirectoryConfig {
			target_root_len: 30,
			initial_leaf_size: 4,
		},
		..WriterConfig::default()
	};
	let mut bytes = write_archive(3, config, &Blob::new_empty())?.into_vec();
	let header = HeaderV3::deserialize(&Blob::from(&bytes[..HeaderV3::LEN as usize]))?;
	assert!(!header.leaf_dirs.is_empty());

	// append garbage to every leaf by claiming a huge entry count
	let leaves = header.leaf_dirs.as_range_usize();
	bytes[leaves].fill(0x7f);

	let reader = open(Blob::from(bytes)).await?;
	let mut failures = 0;
	for coord in coords(3) {
		match reader.get_tile(&coord).await {
			Ok(_) => {}
			Err(error) => {
				assert!(error.downcast_ref::<PMTilesError>().is_some(), "{error:?}");
				failures += 1;
			}
		}
	}
	assert!(failures > 0);
	assert!(reader.enumerate().await.is_err());
	Ok(())
}

#[tokio::test]
async fn truncated_archive() -> Result<()> {
	let bytes = write_archive(2, WriterConfig::default(), &Blob::from("meta"))?.into_vec();
	for length in [0, 100, HeaderV3::LEN as usize + 3] {
		assert!(open(Blob::from(&bytes[..length])).await.is_err(), "length {length}");
	}
	Ok(())
}
