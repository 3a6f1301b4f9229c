//! Compression and decompression of blobs with gzip, brotli and zstd.
//!
//! ```rust
//! use pmtiles_core::{Blob, TileCompression, compression::{compress, decompress}};
//!
//! let data = Blob::from("a directory that repeats, a directory that repeats");
//! let compressed = compress(data.clone(), TileCompression::Zstd)?;
//! assert_eq!(decompress(compressed, TileCompression::Zstd)?, data);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::{Blob, TileCompression};
use anyhow::{Context, Result};
use brotli::{BrotliCompress, BrotliDecompress, enc::BrotliEncoderParams};
use flate2::bufread::{GzDecoder, GzEncoder};
use std::io::{Cursor, Read};

pub fn compress(blob: Blob, compression: TileCompression) -> Result<Blob> {
	match compression {
		TileCompression::Uncompressed => Ok(blob),
		TileCompression::Gzip => compress_gzip(&blob),
		TileCompression::Brotli => compress_brotli(&blob),
		TileCompression::Zstd => compress_zstd(&blob),
	}
}

pub fn decompress(blob: Blob, compression: TileCompression) -> Result<Blob> {
	match compression {
		TileCompression::Uncompressed => Ok(blob),
		TileCompression::Gzip => decompress_gzip(&blob),
		TileCompression::Brotli => decompress_brotli(&blob),
		TileCompression::Zstd => decompress_zstd(&blob),
	}
}

pub fn compress_gzip(blob: &Blob) -> Result<Blob> {
	let mut encoder = GzEncoder::new(blob.as_slice(), flate2::Compression::best());
	let mut output = Vec::new();
	encoder
		.read_to_end(&mut output)
		.context("failed to compress data using gzip")?;
	Ok(Blob::from(output))
}

pub fn decompress_gzip(blob: &Blob) -> Result<Blob> {
	let mut decoder = GzDecoder::new(blob.as_slice());
	let mut output = Vec::new();
	decoder
		.read_to_end(&mut output)
		.context("failed to decompress data using gzip")?;
	Ok(Blob::from(output))
}

pub fn compress_brotli(blob: &Blob) -> Result<Blob> {
	let params = BrotliEncoderParams {
		quality: 10,
		lgwin: 19,
		size_hint: blob.len() as usize,
		..Default::default()
	};
	let mut input = Cursor::new(blob.as_slice());
	let mut output = Vec::new();
	BrotliCompress(&mut input, &mut output, &params).context("failed to compress data using brotli")?;
	Ok(Blob::from(output))
}

pub fn decompress_brotli(blob: &Blob) -> Result<Blob> {
	let mut input = Cursor::new(blob.as_slice());
	let mut output = Vec::new();
	BrotliDecompress(&mut input, &mut output).context("failed to decompress data using brotli")?;
	Ok(Blob::from(output))
}

pub fn compress_zstd(blob: &Blob) -> Result<Blob> {
	let output = zstd::encode_all(Cursor::new(blob.as_slice()), 19).context("failed to compress data using zstd")?;
	Ok(Blob::from(output))
}

pub fn decompress_zstd(blob: &Blob) -> Result<Blob> {
	let output = zstd::decode_all(Cursor::new(blob.as_slice())).context("failed to decompress data using zstd")?;
	Ok(Blob::from(output))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn sample() -> Blob {
		Blob::from(
			(0..10_000u32)
				.map(|i| (i % 251) as u8 ^ (i / 97) as u8)
				.collect::<Vec<u8>>(),
		)
	}

	#[rstest]
	#[case(TileCompression::Uncompressed)]
	#[case(TileCompression::Gzip)]
	#[case(TileCompression::Brotli)]
	#[case(TileCompression::Zstd)]
	fn compress_then_decompress(#[case] compression: TileCompression) -> Result<()> {
		let data = sample();
		let compressed = compress(data.clone(), compression)?;
		if compression != TileCompression::Uncompressed {
			assert_ne!(compressed, data);
		}
		assert_eq!(decompress(compressed, compression)?, data);
		Ok(())
	}

	#[test]
	fn gzip_magic() -> Result<()> {
		let compressed = compress_gzip(&Blob::from("tile"))?;
		assert_eq!(&compressed.as_slice()[0..2], &[0x1f, 0x8b]);
		Ok(())
	}

	#[test]
	fn zstd_magic() -> Result<()> {
		let compressed = compress_zstd(&Blob::from("tile"))?;
		assert_eq!(&compressed.as_slice()[0..4], &[0x28, 0xb5, 0x2f, 0xfd]);
		Ok(())
	}

	#[rstest]
	#[case(TileCompression::Gzip)]
	#[case(TileCompression::Zstd)]
	fn garbage_fails_to_decompress(#[case] compression: TileCompression) {
		let garbage = Blob::from(vec![0xff; 64]);
		assert!(decompress(garbage, compression).is_err());
	}
}
