//! The typed inner loops.
//!
//! One generic skeleton per mode, monomorphized into the six sample formats
//! by the dispatch in the parent module. Iteration is band-major (band →
//! row → pixel); the per-source state has been flattened into
//! [`SourceTile`]s before the loops start, so the hot path performs no
//! option checks, no format dispatch and no allocation.

use mosatiles_core::{BandBuffer, PixelRect, Sample};

use super::sample_test::SampleTest;

/// Per-source weighting input for one tile, extended to the tile's rect.
pub(crate) enum WeightTile<T> {
	/// Single-band alpha samples, zero-padded outside the alpha's bounds.
	Alpha(BandBuffer<T>),
	/// Single-band ROI samples, zero-padded; inside iff strictly positive.
	Roi(BandBuffer<i32>),
	/// Neither alpha nor ROI; the source always accepts.
	None,
}

/// One source, prepared for one tile: data and weights re-framed to the
/// tile's rect, validity test selected.
pub(crate) struct SourceTile<'a, T: Sample> {
	/// Intersection of the tile with the source's real bounds. Pixels
	/// outside it read border padding and must contribute nothing.
	pub covered: PixelRect,
	pub data: BandBuffer<T>,
	pub weight: WeightTile<T>,
	pub test: SampleTest<'a, T>,
}

/// First valid and accepted source in input order wins; pixels nobody
/// accepts get the destination no-data value of their band.
pub(crate) fn overlay<T: Sample>(dest: &mut BandBuffer<T>, nodata: &[T], tiles: &[SourceTile<T>]) {
	let rect = *dest.rect();
	for band in 0..dest.band_count() {
		let band_nodata = nodata[band];
		for y in rect.y_range() {
			for x in rect.x_range() {
				let mut out = band_nodata;
				for tile in tiles {
					if !tile.covered.contains(x, y) {
						continue;
					}
					let value = tile.data.get(x, y, band);
					if !tile.test.is_valid(value, band) {
						continue;
					}
					let accepted = match &tile.weight {
						WeightTile::Alpha(alpha) => alpha.get(x, y, 0) != T::zero(),
						WeightTile::Roi(roi) => roi.get(x, y, 0) > 0,
						WeightTile::None => true,
					};
					if accepted {
						out = value;
						break;
					}
				}
				dest.set(x, y, band, out);
			}
		}
	}
}

/// Weighted mean of all contributing sources, accumulated in `f64` in
/// source order. A zero weight sum yields the destination no-data value.
pub(crate) fn blend<T: Sample>(
	dest: &mut BandBuffer<T>,
	nodata: &[T],
	tiles: &[SourceTile<T>],
	alpha_is_bitmask: bool,
) {
	let rect = *dest.rect();
	for band in 0..dest.band_count() {
		let band_nodata = nodata[band];
		for y in rect.y_range() {
			for x in rect.x_range() {
				let mut numerator = 0.0f64;
				let mut denominator = 0.0f64;
				for tile in tiles {
					if !tile.covered.contains(x, y) {
						continue;
					}
					let value = tile.data.get(x, y, band);
					let valid = tile.test.is_valid(value, band);
					let weight = if valid {
						match &tile.weight {
							WeightTile::Alpha(alpha) => {
								let alpha = alpha.get(x, y, 0).to_f64();
								if alpha_is_bitmask && alpha > 0.0 { 1.0 } else { alpha / 255.0 }
							}
							WeightTile::Roi(roi) => {
								if roi.get(x, y, 0) > 0 {
									1.0
								} else {
									0.0
								}
							}
							WeightTile::None => 1.0,
						}
					} else {
						0.0
					};
					denominator += weight;
					// The numerator is guarded on validity so that NaN
					// samples never reach the accumulator.
					if valid {
						numerator += weight * value.to_f64();
					}
				}
				let out = if denominator == 0.0 {
					band_nodata
				} else {
					T::clamp_from_f64(numerator / denominator)
				};
				dest.set(x, y, band, out);
			}
		}
	}
}
