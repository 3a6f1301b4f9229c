//! `DataReaderBlob` serves reads from an archive that is held completely in memory.

use super::DataReaderTrait;
use crate::{Blob, ByteRange};
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug)]
pub struct DataReaderBlob {
	blob: Blob,
}

impl DataReaderBlob {
	pub fn len(&self) -> u64 {
		self.blob.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blob.is_empty()
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderBlob {
	async fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		self.blob.read_range(range)
	}

	async fn read_all(&self) -> Result<Blob> {
		Ok(self.blob.clone())
	}

	fn get_size(&self) -> u64 {
		self.blob.len()
	}

	fn get_name(&self) -> &str {
		"memory"
	}
}

impl From<Blob> for DataReaderBlob {
	fn from(blob: Blob) -> Self {
		DataReaderBlob { blob }
	}
}

impl From<Vec<u8>> for DataReaderBlob {
	fn from(value: Vec<u8>) -> Self {
		DataReaderBlob::from(Blob::from(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn from_blob() -> Result<()> {
		let reader = DataReaderBlob::from(Blob::from(vec![0, 1, 2, 3, 4, 5, 6, 7]));

		assert_eq!(reader.get_name(), "memory");
		assert_eq!(reader.len(), 8);
		assert_eq!(reader.get_size(), 8);
		assert!(!reader.is_empty());
		assert_eq!(reader.read_range(&ByteRange::new(4, 3)).await?.as_slice(), &[4, 5, 6]);
		assert_eq!(reader.read_all().await?.len(), 8);
		Ok(())
	}

	#[tokio::test]
	async fn read_past_end_fails() {
		let reader = DataReaderBlob::from(vec![0, 1, 2]);
		assert!(reader.read_range(&ByteRange::new(2, 2)).await.is_err());
	}
}
