/// Tile content type byte of the PMTiles header. The archive never looks inside tiles; this is a label.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PMTilesType {
	UNKNOWN = 0x0,
	MVT = 0x1,
	PNG = 0x2,
	JPEG = 0x3,
	WEBP = 0x4,
	AVIF = 0x5,
}

impl PMTilesType {
	/// Bytes outside the known set decode to `UNKNOWN`.
	pub fn from_u8(value: u8) -> Self {
		match value {
			1 => PMTilesType::MVT,
			2 => PMTilesType::PNG,
			3 => PMTilesType::JPEG,
			4 => PMTilesType::WEBP,
			5 => PMTilesType::AVIF,
			_ => PMTilesType::UNKNOWN,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_u8() {
		assert_eq!(PMTilesType::from_u8(0), PMTilesType::UNKNOWN);
		assert_eq!(PMTilesType::from_u8(1), PMTilesType::MVT);
		assert_eq!(PMTilesType::from_u8(2), PMTilesType::PNG);
		assert_eq!(PMTilesType::from_u8(3), PMTilesType::JPEG);
		assert_eq!(PMTilesType::from_u8(4), PMTilesType::WEBP);
		assert_eq!(PMTilesType::from_u8(5), PMTilesType::AVIF);
		assert_eq!(PMTilesType::from_u8(6), PMTilesType::UNKNOWN);
	}

	#[test]
	fn discriminants_are_header_bytes() {
		for tile_type in [PMTilesType::MVT, PMTilesType::PNG, PMTilesType::JPEG, PMTilesType::WEBP, PMTilesType::AVIF] {
			assert_eq!(PMTilesType::from_u8(tile_type as u8), tile_type);
		}
	}
}
