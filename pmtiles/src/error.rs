//! Typed failures of the PMTiles format layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PMTilesError>;

#[derive(Error, Debug)]
pub enum PMTilesError {
	/// The buffer does not start with `PMTiles`.
	#[error("not a PMTiles archive: magic bytes are missing")]
	BadMagic,

	#[error("unsupported PMTiles header: {0}")]
	UnsupportedVersion(String),

	#[error("varint is longer than 10 bytes")]
	VarintTooLong,

	#[error("unexpected end of buffer")]
	UnexpectedEnd,

	#[error("malformed directory: {0}")]
	MalformedDirectory(String),

	#[error("tile coordinate {level}/{x}/{y} is outside the representable range")]
	CoordinateOutOfRange { level: u8, x: u32, y: u32 },

	#[error("tile id {0} is beyond zoom level 31")]
	TileIdOverflow(u64),

	/// Failure of a collaborator: reading bytes, compression, writing.
	#[error(transparent)]
	External(#[from] anyhow::Error),
}

impl PMTilesError {
	pub fn malformed(msg: impl Into<String>) -> Self {
		PMTilesError::MalformedDirectory(msg.into())
	}
}
