mod blob;
mod byte_range;
mod limited_cache;
mod tile_compression;

pub use blob::*;
pub use byte_range::*;
pub use limited_cache::*;
pub use tile_compression::*;
