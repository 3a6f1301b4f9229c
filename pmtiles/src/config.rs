//! Tunables of the directory builder, the reader and the writer.

use crate::types::{HeaderV3, PMTilesCompression, PMTilesType};

/// Clients fetch the first 16 KiB of an archive in one request; header and root directory must fit.
pub const ROOT_DIRECTORY_LIMIT: u64 = 16384 - HeaderV3::LEN;

#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryConfig {
	/// Maximum size of the compressed root directory in bytes.
	pub target_root_len: u64,
	/// Number of entries per leaf directory in the first partitioning attempt.
	pub initial_leaf_size: usize,
}

impl Default for DirectoryConfig {
	fn default() -> Self {
		Self {
			target_root_len: ROOT_DIRECTORY_LIMIT,
			initial_leaf_size: 4096,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReaderConfig {
	/// How many decoded leaf directories are kept in memory.
	pub leaf_cache_size: usize,
}

impl Default for ReaderConfig {
	fn default() -> Self {
		Self { leaf_cache_size: 1024 }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct WriterConfig {
	/// Codec for directories and metadata.
	pub internal_compression: PMTilesCompression,
	/// Codec the tile payloads are already compressed with. Only recorded in the header.
	pub tile_compression: PMTilesCompression,
	pub tile_type: PMTilesType,
	pub directory: DirectoryConfig,
}

impl Default for WriterConfig {
	fn default() -> Self {
		Self {
			internal_compression: PMTilesCompression::Gzip,
			tile_compression: PMTilesCompression::Unknown,
			tile_type: PMTilesType::UNKNOWN,
			directory: DirectoryConfig::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		assert_eq!(ROOT_DIRECTORY_LIMIT, 16257);
		assert_eq!(DirectoryConfig::default().initial_leaf_size, 4096);
		assert_eq!(WriterConfig::default().internal_compression, PMTilesCompression::Gzip);
		assert!(ReaderConfig::default().leaf_cache_size > 0);
	}
}
