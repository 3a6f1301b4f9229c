//! The `ValueReader` trait reads fixed-width numbers and byte ranges in a given byte order.
//!
//! ```rust
//! use pmtiles_core::io::{ValueReader, ValueReaderSlice};
//!
//! let mut reader = ValueReaderSlice::new_le(&[0x01, 0xFF, 0xFF, 0xFF, 0xFF]);
//! assert_eq!(reader.read_u8().unwrap(), 1);
//! assert_eq!(reader.remaining(), 4);
//! assert_eq!(reader.read_i32().unwrap(), -1);
//! ```

use crate::ByteRange;
use anyhow::Result;
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// Anything that can be read from and seeked in.
pub trait SeekRead: Seek + Read {}

pub trait ValueReader<E: ByteOrder> {
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Total number of readable bytes.
	fn len(&self) -> u64;

	fn position(&mut self) -> u64;

	fn set_position(&mut self, position: u64) -> Result<()>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn remaining(&mut self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	fn read_i32(&mut self) -> Result<i32> {
		Ok(self.get_reader().read_i32::<E>()?)
	}

	fn read_u64(&mut self) -> Result<u64> {
		Ok(self.get_reader().read_u64::<E>()?)
	}

	/// Reads a [`ByteRange`] stored as two `u64`: offset, then length.
	fn read_range(&mut self) -> Result<ByteRange> {
		let offset = self.read_u64()?;
		let length = self.read_u64()?;
		Ok(ByteRange::new(offset, length))
	}
}
