use anyhow::{Result, bail};
use pmtiles_core::{Blob, TileCompression, compression};

/// Compression codec byte of the PMTiles header.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PMTilesCompression {
	Unknown = 0x0,
	None = 0x1,
	Gzip = 0x2,
	Brotli = 0x3,
	Zstd = 0x4,
}

impl PMTilesCompression {
	/// Bytes outside the known set decode to `Unknown`.
	pub fn from_u8(value: u8) -> Self {
		match value {
			1 => PMTilesCompression::None,
			2 => PMTilesCompression::Gzip,
			3 => PMTilesCompression::Brotli,
			4 => PMTilesCompression::Zstd,
			_ => PMTilesCompression::Unknown,
		}
	}

	pub fn as_value(&self) -> Result<TileCompression> {
		Ok(match self {
			PMTilesCompression::Unknown => bail!("unknown PMTiles compression"),
			PMTilesCompression::None => TileCompression::Uncompressed,
			PMTilesCompression::Gzip => TileCompression::Gzip,
			PMTilesCompression::Brotli => TileCompression::Brotli,
			PMTilesCompression::Zstd => TileCompression::Zstd,
		})
	}

	pub fn compress(&self, blob: Blob) -> Result<Blob> {
		compression::compress(blob, self.as_value()?)
	}

	pub fn decompress(&self, blob: Blob) -> Result<Blob> {
		compression::decompress(blob, self.as_value()?)
	}
}
