//! Readers and writers for bytes and fixed-width values.
//!
//! `ValueReader`/`ValueWriter` read and write little- or big-endian numbers on an in-memory buffer.
//! `DataReaderTrait`/`DataWriterTrait` abstract the storage an archive lives in: memory or a file.

mod data_reader;
mod data_reader_blob;
mod data_reader_file;
mod data_writer;
mod data_writer_blob;
mod data_writer_file;
mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_blob;

pub use data_reader::*;
pub use data_reader_blob::*;
pub use data_reader_file::*;
pub use data_writer::*;
pub use data_writer_blob::*;
pub use data_writer_file::*;
pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_blob::*;
