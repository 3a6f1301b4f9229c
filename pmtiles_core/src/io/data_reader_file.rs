//! `DataReaderFile` serves reads from a local file.

use super::DataReaderTrait;
use crate::{Blob, ByteRange};
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use std::{
	fs::File,
	io::{Read, Seek, SeekFrom},
	path::Path,
};

#[derive(Debug)]
pub struct DataReaderFile {
	name: String,
	file: File,
	size: u64,
}

impl DataReaderFile {
	pub fn open(path: &Path) -> Result<Box<DataReaderFile>> {
		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_file(), "path {path:?} must be a file");

		let path = path.canonicalize()?;
		let file = File::open(&path).with_context(|| format!("failed to open {path:?}"))?;
		let size = file.metadata()?.len();
		log::debug!("opened {path:?} ({size} bytes)");

		Ok(Box::new(DataReaderFile {
			name: path.to_string_lossy().into_owned(),
			file,
			size,
		}))
	}

	pub fn size(&self) -> u64 {
		self.size
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderFile {
	async fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		ensure!(
			range.end() <= self.size,
			"{range:?} reaches past the end of file '{}' ({} bytes)",
			self.name,
			self.size
		);
		let mut buffer = vec![0; range.length as usize];
		let mut file = self
			.file
			.try_clone()
			.with_context(|| format!("failed to clone file '{}'", self.name))?;
		file
			.seek(SeekFrom::Start(range.offset))
			.with_context(|| format!("failed to seek to offset {} in file '{}'", range.offset, self.name))?;
		file
			.read_exact(&mut buffer)
			.with_context(|| format!("failed to read {range:?} from file '{}'", self.name))?;
		Ok(Blob::from(buffer))
	}

	async fn read_all(&self) -> Result<Blob> {
		self.read_range(&ByteRange::new(0, self.size)).await
	}

	fn get_size(&self) -> u64 {
		self.size
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}
