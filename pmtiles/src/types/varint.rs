//! Unsigned LEB128 varints: 7 bits per byte, least significant group first, high bit set on every
//! byte but the last.

use crate::{PMTilesError, Result};

/// A `u64` never needs more than this many bytes.
pub const MAX_VARINT_LEN: usize = 10;

pub fn write_varint(buffer: &mut Vec<u8>, mut value: u64) {
	while value >= 0x80 {
		buffer.push((value as u8) | 0x80);
		value >>= 7;
	}
	buffer.push(value as u8);
}

/// Reads varints from a byte slice, keeping track of the position.
pub struct VarintReader<'a> {
	data: &'a [u8],
	position: usize,
}

impl<'a> VarintReader<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, position: 0 }
	}

	pub fn position(&self) -> usize {
		self.position
	}

	pub fn remaining(&self) -> usize {
		self.data.len() - self.position
	}

	pub fn is_exhausted(&self) -> bool {
		self.position >= self.data.len()
	}

	pub fn read_varint(&mut self) -> Result<u64> {
		let first = self.next_byte()?;
		if first < 0x80 {
			return Ok(u64::from(first));
		}

		let mut value = u64::from(first & 0x7f);
		for shift in (7..63).step_by(7) {
			let byte = self.next_byte()?;
			value |= u64::from(byte & 0x7f) << shift;
			if byte < 0x80 {
				return Ok(value);
			}
		}

		// tenth byte: only bit 63 is left
		let byte = self.next_byte()?;
		if byte >= 0x80 {
			return Err(PMTilesError::VarintTooLong);
		}
		Ok(value | (u64::from(byte & 1) << 63))
	}

	fn next_byte(&mut self) -> Result<u8> {
		let byte = *self.data.get(self.position).ok_or(PMTilesError::UnexpectedEnd)?;
		self.position += 1;
		Ok(byte)
	}
}
