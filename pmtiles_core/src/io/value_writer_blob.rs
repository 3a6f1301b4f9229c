//! `ValueWriterBlob` collects written values in memory and hands them out as a [`Blob`].
//!
//! ```rust
//! use pmtiles_core::io::{ValueWriter, ValueWriterBlob};
//!
//! let mut writer = ValueWriterBlob::new_le();
//! writer.write_slice(b"PM").unwrap();
//! writer.write_i32(-2).unwrap();
//! assert_eq!(writer.into_blob().as_slice(), &[b'P', b'M', 0xFE, 0xFF, 0xFF, 0xFF]);
//! ```

use super::ValueWriter;
use crate::Blob;
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::{
	io::{Cursor, Write},
	marker::PhantomData,
};

pub struct ValueWriterBlob<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	pub fn new() -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriterBlob<LittleEndian> {
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBlob<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl<E: ByteOrder> Default for ValueWriterBlob<E> {
	fn default() -> Self {
		Self::new()
	}
}
