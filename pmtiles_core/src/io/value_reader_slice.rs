//! `ValueReaderSlice` reads values from a borrowed byte slice.

use super::{SeekRead, ValueReader};
use anyhow::{Result, ensure};
use byteorder::{ByteOrder, LittleEndian};
use std::{io::Cursor, marker::PhantomData};

pub struct ValueReaderSlice<'a, E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<&'a [u8]>,
	len: u64,
}

impl<'a, E: ByteOrder> ValueReaderSlice<'a, E> {
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice {
			_phantom: PhantomData,
			len: slice.len() as u64,
			cursor: Cursor::new(slice),
		}
	}
}

impl<'a> ValueReaderSlice<'a, LittleEndian> {
	pub fn new_le(slice: &'a [u8]) -> ValueReaderSlice<'a, LittleEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl SeekRead for Cursor<&[u8]> {}

impl<E: ByteOrder> ValueReader<E> for ValueReaderSlice<'_, E> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> u64 {
		self.cursor.position()
	}

	fn set_position(&mut self, position: u64) -> Result<()> {
		ensure!(position <= self.len, "set position {position} outside length {}", self.len);
		self.cursor.set_position(position);
		Ok(())
	}
}
