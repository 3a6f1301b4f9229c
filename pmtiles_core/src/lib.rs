//! Byte-level building blocks shared by the PMTiles crates: blobs and byte ranges, fixed-width value
//! readers/writers, random-access data readers/writers and the compression functions.

pub mod compression;

pub mod io;

pub mod types;
pub use types::*;
