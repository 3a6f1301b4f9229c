//! Mapping between tile coordinates and PMTiles tile ids.
//!
//! Tile ids count all tiles of the lower zoom levels first, `(4^z - 1) / 3`, and then walk the
//! `2^z × 2^z` grid of level `z` along a Hilbert curve.
//!
//! ```rust
//! use pmtiles::types::{TileCoord, zxy_to_tile_id, tile_id_to_zxy};
//!
//! assert_eq!(zxy_to_tile_id(1, 1, 1).unwrap(), 3);
//! assert_eq!(tile_id_to_zxy(5).unwrap(), TileCoord::new(2, 0, 0).unwrap());
//! ```

use crate::{PMTilesError, Result};
use std::f64::consts::PI;

pub const MAX_LEVEL: u8 = 31;

/// First id that no zoom level up to 31 can hold: `(4^32 - 1) / 3`.
const TILE_ID_LIMIT: u64 = u64::MAX / 3;

/// A tile address: zoom level, column, row.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TileCoord {
	pub level: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	/// Creates a coordinate after checking `level <= 31` and `x, y < 2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		check_coord(level, x, y)?;
		Ok(TileCoord { level, x, y })
	}

	pub fn get_tile_id(&self) -> Result<u64> {
		zxy_to_tile_id(self.level, self.x, self.y)
	}

	pub fn from_tile_id(tile_id: u64) -> Result<TileCoord> {
		tile_id_to_zxy(tile_id)
	}

	/// Longitude and latitude of the north-west corner of the tile.
	pub fn as_geo(&self) -> [f64; 2] {
		let size = 2.0f64.powi(i32::from(self.level));
		[x_to_lon(f64::from(self.x), size), y_to_lat(f64::from(self.y), size)]
	}

	/// Bounds of the tile as `[west, south, east, north]` in degrees.
	pub fn as_geo_bbox(&self) -> [f64; 4] {
		let size = 2.0f64.powi(i32::from(self.level));
		[
			x_to_lon(f64::from(self.x), size),
			y_to_lat(f64::from(self.y) + 1.0, size),
			x_to_lon(f64::from(self.x) + 1.0, size),
			y_to_lat(f64::from(self.y), size),
		]
	}
}

fn x_to_lon(x: f64, size: f64) -> f64 {
	(x / size - 0.5) * 360.0
}

fn y_to_lat(y: f64, size: f64) -> f64 {
	((PI * (1.0 - 2.0 * y / size)).exp().atan() / PI - 0.25) * 360.0
}

fn check_coord(level: u8, x: u32, y: u32) -> Result<()> {
	let out_of_range = level > MAX_LEVEL || {
		let size = 1u64 << level;
		u64::from(x) >= size || u64::from(y) >= size
	};
	if out_of_range {
		return Err(PMTilesError::CoordinateOutOfRange { level, x, y });
	}
	Ok(())
}

/// Number of tiles on all levels below `level`.
fn level_base(level: u8) -> u64 {
	((1u64 << (2 * u32::from(level))) - 1) / 3
}

pub fn zxy_to_tile_id(level: u8, x: u32, y: u32) -> Result<u64> {
	check_coord(level, x, y)?;
	Ok(level_base(level) + hilbert_distance(1u64 << level, u64::from(x), u64::from(y)))
}

pub fn tile_id_to_zxy(tile_id: u64) -> Result<TileCoord> {
	if tile_id >= TILE_ID_LIMIT {
		return Err(PMTilesError::TileIdOverflow(tile_id));
	}

	let mut base = 0u64;
	for level in 0..=MAX_LEVEL {
		let count = 1u64 << (2 * u32::from(level));
		if tile_id < base + count {
			let (x, y) = hilbert_position(1u64 << level, tile_id - base);
			return Ok(TileCoord {
				level,
				x: x as u32,
				y: y as u32,
			});
		}
		base += count;
	}
	Err(PMTilesError::TileIdOverflow(tile_id))
}

fn hilbert_distance(size: u64, mut x: u64, mut y: u64) -> u64 {
	let mut distance = 0;
	let mut s = size / 2;
	while s > 0 {
		let rx = u64::from(x & s > 0);
		let ry = u64::from(y & s > 0);
		distance += s * s * ((3 * rx) ^ ry);
		rotate(s, &mut x, &mut y, rx, ry);
		s /= 2;
	}
	distance
}

fn hilbert_position(size: u64, mut t: u64) -> (u64, u64) {
	let (mut x, mut y) = (0, 0);
	let mut s = 1;
	while s < size {
		let rx = 1 & (t / 2);
		let ry = 1 & (t ^ rx);
		rotate(s, &mut x, &mut y, rx, ry);
		x += s * rx;
		y += s * ry;
		t /= 4;
		s *= 2;
	}
	(x, y)
}

// Bits above `s` are irrelevant for the remaining steps, so wrapping is fine.
fn rotate(s: u64, x: &mut u64, y: &mut u64, rx: u64, ry: u64) {
	if ry == 0 {
		if rx == 1 {
			*x = s.wrapping_sub(1).wrapping_sub(*x);
			*y = s.wrapping_sub(1).wrapping_sub(*y);
		}
		std::mem::swap(x, y);
	}
}
