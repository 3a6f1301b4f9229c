//! `DataWriterFile` writes into a local file through a buffered writer.

use super::DataWriterTrait;
use crate::{Blob, ByteRange};
use anyhow::{Context, Result};
use std::{
	fs::File,
	io::{BufWriter, Seek, SeekFrom, Write},
	path::Path,
};

pub struct DataWriterFile {
	writer: BufWriter<File>,
}

impl DataWriterFile {
	/// Creates or truncates the file at `path`.
	pub fn from_path(path: &Path) -> Result<DataWriterFile> {
		let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;
		log::debug!("writing to {path:?}");
		Ok(DataWriterFile {
			writer: BufWriter::new(file),
		})
	}

	/// Flushes buffered bytes to disk.
	pub fn finish(mut self) -> Result<()> {
		self.writer.flush().context("failed to flush file")
	}
}

impl DataWriterTrait for DataWriterFile {
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
