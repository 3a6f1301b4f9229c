//! The `DataReaderTrait` abstracts random-access reads from wherever an archive is stored.
//!
//! ```rust
//! use pmtiles_core::{Blob, ByteRange, io::{DataReader, DataReaderBlob}};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let reader: DataReader = Box::new(DataReaderBlob::from(Blob::from("PMTiles")));
//! assert_eq!(reader.read_range(&ByteRange::new(2, 5)).await?.as_slice(), b"Tiles");
//! # Ok(())
//! # }
//! ```

use crate::{Blob, ByteRange};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// A boxed, type-erased data reader.
pub type DataReader = Box<dyn DataReaderTrait>;

#[async_trait]
pub trait DataReaderTrait: Debug + Send + Sync {
	/// Reads exactly `range.length` bytes starting at `range.offset`.
	async fn read_range(&self, range: &ByteRange) -> Result<Blob>;

	async fn read_all(&self) -> Result<Blob>;

	/// Total number of bytes available.
	fn get_size(&self) -> u64;

	/// A human readable name of the source, used in error messages and logs.
	fn get_name(&self) -> &str;
}
