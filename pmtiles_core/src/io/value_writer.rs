//! The `ValueWriter` trait writes fixed-width numbers, byte ranges and raw bytes in a given byte order.

use crate::ByteRange;
use anyhow::Result;
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

pub trait ValueWriter<E: ByteOrder> {
	fn get_writer(&mut self) -> &mut dyn Write;

	fn position(&mut self) -> Result<u64>;

	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	fn write_i32(&mut self, value: i32) -> Result<()> {
		Ok(self.get_writer().write_i32::<E>(value)?)
	}

	fn write_u64(&mut self, value: u64) -> Result<()> {
		Ok(self.get_writer().write_u64::<E>(value)?)
	}

	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		Ok(self.get_writer().write_all(buf)?)
	}

	/// Writes a [`ByteRange`] as two `u64`: offset, then length.
	fn write_range(&mut self, range: &ByteRange) -> Result<()> {
		self.write_u64(range.offset)?;
		self.write_u64(range.length)
	}
}
