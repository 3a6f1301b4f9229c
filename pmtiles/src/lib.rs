//! Reading and writing PMTiles v3 archives.
//!
//! The format layer lives in [`types`]: the header codec, the varint and directory codecs, the
//! Hilbert tile id mapping and the directory builder. [`lookup`] finds tiles in any archive that
//! supports random access. [`reader::PMTilesReader`] and [`writer::PMTilesWriter`] put it all together.

pub mod config;
pub mod error;
pub mod lookup;
pub mod reader;
pub mod types;
pub mod writer;

pub use error::{PMTilesError, Result};
pub use lookup::{DirectorySource, TileRecord};
pub use reader::PMTilesReader;
pub use types::TileCoord;
pub use writer::PMTilesWriter;
