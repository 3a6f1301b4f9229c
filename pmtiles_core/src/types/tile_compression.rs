//! The codecs a blob can be compressed with.
//!
//! ```rust
//! use pmtiles_core::TileCompression;
//!
//! assert_eq!(TileCompression::Gzip.to_string(), "gzip");
//! ```

use std::fmt::Display;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TileCompression {
	Uncompressed,
	Gzip,
	Brotli,
	Zstd,
}

impl TileCompression {
	pub fn as_str(&self) -> &'static str {
		match self {
			TileCompression::Uncompressed => "none",
			TileCompression::Gzip => "gzip",
			TileCompression::Brotli => "brotli",
			TileCompression::Zstd => "zstd",
		}
	}
}

impl Display for TileCompression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
