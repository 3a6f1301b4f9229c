//! `DataWriterBlob` writes into memory.
//!
//! ```rust
//! use pmtiles_core::{Blob, ByteRange, io::{DataWriterBlob, DataWriterTrait}};
//!
//! let mut writer = DataWriterBlob::new();
//! assert_eq!(writer.append(&Blob::from("tiles")).unwrap(), ByteRange::new(0, 5));
//! writer.write_start(&Blob::from("T")).unwrap();
//! assert_eq!(writer.into_blob().as_slice(), b"Tiles");
//! ```

use super::{DataReaderBlob, DataWriterTrait};
use crate::{Blob, ByteRange};
use anyhow::Result;
use std::io::{Cursor, Seek, SeekFrom, Write};

#[derive(Default)]
pub struct DataWriterBlob {
	writer: Cursor<Vec<u8>>,
}

impl DataWriterBlob {
	pub fn new() -> DataWriterBlob {
		DataWriterBlob::default()
	}

	pub fn as_slice(&self) -> &[u8] {
		self.writer.get_ref()
	}

	pub fn into_blob(self) -> Blob {
		Blob::from(self.writer.into_inner())
	}

	pub fn into_reader(self) -> DataReaderBlob {
		DataReaderBlob::from(self.into_blob())
	}

	pub fn len(&self) -> usize {
		self.writer.get_ref().len()
	}

	pub fn is_empty(&self) -> bool {
		self.writer.get_ref().is_empty()
	}
}

impl DataWriterTrait for DataWriterBlob {
	fn append(&mut self, blob: &Blob) -> Result<ByteRange> {
		let offset = self.writer.stream_position()?;
		self.writer.write_all(blob.as_slice())?;
		Ok(ByteRange::new(offset, blob.len()))
	}

	fn write_start(&mut self, blob: &Blob) -> Result<()> {
		let position = self.writer.stream_position()?;
		self.writer.rewind()?;
		self.writer.write_all(blob.as_slice())?;
		self.writer.seek(SeekFrom::Start(position))?;
		Ok(())
	}

	fn get_position(&mut self) -> Result<u64> {
		Ok(self.writer.stream_position()?)
	}

	fn set_position(&mut self, position: u64) -> Result<()> {
		self.writer.seek(SeekFrom::Start(position))?;
		Ok(())
	}
}
