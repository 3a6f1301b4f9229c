use super::{PMTilesCompression, PMTilesType};
use crate::{PMTilesError, Result};
use pmtiles_core::{
	Blob, ByteRange,
	io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob},
};

const MAGIC: &[u8; 7] = b"PMTiles";
const VERSION: u8 = 3;

/// The fixed-size header at the start of every PMTiles v3 archive.
///
/// All ranges are absolute byte offsets in the archive. Geographic values are stored in 1e-7 degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderV3 {
	pub root_dir: ByteRange,
	pub metadata: ByteRange,
	pub leaf_dirs: ByteRange,
	pub tile_data: ByteRange,
	pub addressed_tiles_count: u64,
	pub tile_entries_count: u64,
	pub tile_contents_count: u64,
	pub clustered: bool,
	pub internal_compression: PMTilesCompression,
	pub tile_compression: PMTilesCompression,
	pub tile_type: PMTilesType,
	pub min_zoom: u8,
	pub max_zoom: u8,
	pub min_lon_e7: i32,
	pub min_lat_e7: i32,
	pub max_lon_e7: i32,
	pub max_lat_e7: i32,
	pub center_zoom: u8,
	pub center_lon_e7: i32,
	pub center_lat_e7: i32,
}

impl HeaderV3 {
	pub const LEN: u64 = 127;

	/// Sets bounds and center from `[west, south, east, north]` in degrees. The center is the middle of
	/// the bounds.
	pub fn set_geo_bbox(&mut self, bbox: [f64; 4], center_zoom: u8) {
		let [west, south, east, north] = bbox;
		self.min_lon_e7 = to_e7(west);
		self.min_lat_e7 = to_e7(south);
		self.max_lon_e7 = to_e7(east);
		self.max_lat_e7 = to_e7(north);
		self.center_zoom = center_zoom;
		self.center_lon_e7 = to_e7(f64::midpoint(west, east));
		self.center_lat_e7 = to_e7(f64::midpoint(south, north));
	}

	/// Returns `[west, south, east, north]` in degrees.
	pub fn geo_bbox(&self) -> [f64; 4] {
		[
			from_e7(self.min_lon_e7),
			from_e7(self.min_lat_e7),
			from_e7(self.max_lon_e7),
			from_e7(self.max_lat_e7),
		]
	}

	pub fn serialize(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_slice(MAGIC)?;
		writer.write_u8(VERSION)?;

		writer.write_range(&self.root_dir)?;
		writer.write_range(&self.metadata)?;
		writer.write_range(&self.leaf_dirs)?;
		writer.write_range(&self.tile_data)?;
		writer.write_u64(self.addressed_tiles_count)?;
		writer.write_u64(self.tile_entries_count)?;
		writer.write_u64(self.tile_contents_count)?;

		writer.write_u8(u8::from(self.clustered))?;
		writer.write_u8(self.internal_compression as u8)?;
		writer.write_u8(self.tile_compression as u8)?;
		writer.write_u8(self.tile_type as u8)?;
		writer.write_u8(self.min_zoom)?;
		writer.write_u8(self.max_zoom)?;
		writer.write_i32(self.min_lon_e7)?;
		writer.write_i32(self.min_lat_e7)?;
		writer.write_i32(self.max_lon_e7)?;
		writer.write_i32(self.max_lat_e7)?;
		writer.write_u8(self.center_zoom)?;
		writer.write_i32(self.center_lon_e7)?;
		writer.write_i32(self.center_lat_e7)?;

		Ok(writer.into_blob())
	}

	/// Decodes a header. Only the magic bytes, the version and the length are checked.
	pub fn deserialize(blob: &Blob) -> Result<Self> {
		let buffer = blob.as_slice();

		if buffer.get(0..MAGIC.len()) != Some(MAGIC.as_slice()) {
			return Err(PMTilesError::BadMagic);
		}
		if buffer.len() as u64 != Self::LEN {
			return Err(PMTilesError::UnsupportedVersion(format!(
				"header has {} bytes, expected {}",
				buffer.len(),
				Self::LEN
			)));
		}
		if buffer[7] != VERSION {
			return Err(PMTilesError::UnsupportedVersion(format!(
				"version {}, expected {VERSION}",
				buffer[7]
			)));
		}

		let mut reader = ValueReaderSlice::new_le(buffer);
		reader.set_position(8)?;

		Ok(Self {
			root_dir: reader.read_range()?,
			metadata: reader.read_range()?,
			leaf_dirs: reader.read_range()?,
			tile_data: reader.read_range()?,
			addressed_tiles_count: reader.read_u64()?,
			tile_entries_count: reader.read_u64()?,
			tile_contents_count: reader.read_u64()?,
			clustered: reader.read_u8()? == 1,
			internal_compression: PMTilesCompression::from_u8(reader.read_u8()?),
			tile_compression: PMTilesCompression::from_u8(reader.read_u8()?),
			tile_type: PMTilesType::from_u8(reader.read_u8()?),
			min_zoom: reader.read_u8()?,
			max_zoom: reader.read_u8()?,
			min_lon_e7: reader.read_i32()?,
			min_lat_e7: reader.read_i32()?,
			max_lon_e7: reader.read_i32()?,
			max_lat_e7: reader.read_i32()?,
			center_zoom: reader.read_u8()?,
			center_lon_e7: reader.read_i32()?,
			center_lat_e7: reader.read_i32()?,
		})
	}
}

impl Default for HeaderV3 {
	fn default() -> Self {
		let mut header = Self {
			root_dir: ByteRange::empty(),
			metadata: ByteRange::empty(),
			leaf_dirs: ByteRange::empty(),
			tile_data: ByteRange::empty(),
			addressed_tiles_count: 0,
			tile_entries_count: 0,
			tile_contents_count: 0,
			clustered: false,
			internal_compression: PMTilesCompression::Unknown,
			tile_compression: PMTilesCompression::Unknown,
			tile_type: PMTilesType::UNKNOWN,
			min_zoom: 0,
			max_zoom: 0,
			min_lon_e7: 0,
			min_lat_e7: 0,
			max_lon_e7: 0,
			max_lat_e7: 0,
			center_zoom: 0,
			center_lon_e7: 0,
			center_lat_e7: 0,
		};
		header.set_geo_bbox([-180.0, -85.051_128_78, 180.0, 85.051_128_78], 0);
		header
	}
}

fn to_e7(degrees: f64) -> i32 {
	(degrees * 1e7).round() as i32
}

fn from_e7(value: i32) -> f64 {
	f64::from(value) / 1e7
}
