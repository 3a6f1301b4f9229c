//! The `DataWriterTrait` abstracts sequential writes with the ability to patch the start afterwards,
//! which is what an archive writer needs to fill in the header last.

use crate::{Blob, ByteRange};
use anyhow::Result;

pub trait DataWriterTrait: Send {
	/// Writes `blob` at the current position and returns where it landed.
	fn append(&mut self, blob: &Blob) -> Result<ByteRange>;

	/// Overwrites the beginning of the output without moving the current position.
	fn write_start(&mut self, blob: &Blob) -> Result<()>;

	fn get_position(&mut self) -> Result<u64>;

	fn set_position(&mut self, position: u64) -> Result<()>;
}
