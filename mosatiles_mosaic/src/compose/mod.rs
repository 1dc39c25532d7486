//! Tile composition.
//!
//! `compose_tile` turns one destination rectangle into pixels: it maps the
//! rect into every source ([`PixelRect::intersected`]), materializes
//! border-extended data/alpha/ROI buffers for the sources that cover it,
//! dispatches once on the destination sample format, and runs the
//! monomorphized kernel for the plan's mode. The call is pure and
//! re-entrant; disjoint tiles may be composed concurrently from the same
//! plan.

mod kernel;
mod sample_test;

use anyhow::{Result, ensure};
use mosatiles_core::{BandBuffer, BorderFill, PixelRect, Raster, Sample, SampleFormat};

use crate::{MosaicMode, MosaicPlan};
use kernel::{SourceTile, WeightTile};
use sample_test::SampleTest;

impl MosaicPlan {
	/// Composes the destination tile covering `rect`.
	///
	/// Every pixel of `rect` is written: the combined source value where at
	/// least one source contributes, the destination no-data value
	/// everywhere else. `rect` does not have to lie inside the plan's
	/// destination rectangle; uncovered regions simply produce no-data.
	pub fn compose_tile(&self, rect: PixelRect) -> Result<Raster> {
		ensure!(!rect.is_empty(), "cannot compose an empty tile");
		log::debug!("compose_tile {rect}");

		use SampleFormat::*;
		Ok(match self.layout.format {
			U8 => Raster::from(self.compose_typed::<u8>(rect)?),
			U16 => Raster::from(self.compose_typed::<u16>(rect)?),
			I16 => Raster::from(self.compose_typed::<i16>(rect)?),
			I32 => Raster::from(self.compose_typed::<i32>(rect)?),
			F32 => Raster::from(self.compose_typed::<f32>(rect)?),
			F64 => Raster::from(self.compose_typed::<f64>(rect)?),
		})
	}

	/// The generic composition skeleton; `T` is the destination (and source)
	/// sample type.
	fn compose_typed<T: Sample>(&self, rect: PixelRect) -> Result<BandBuffer<T>> {
		let nodata = self.typed_nodata::<T>();
		let tiles = self.prepare_tiles::<T>(rect)?;

		let mut dest = BandBuffer::filled(rect, self.layout.band_count, nodata[0]);
		if tiles.is_empty() {
			for band in 1..self.layout.band_count {
				dest.fill_band(band, nodata[band]);
			}
			return Ok(dest);
		}

		match self.mode {
			MosaicMode::Overlay => kernel::overlay(&mut dest, &nodata, &tiles),
			MosaicMode::Blend => kernel::blend(&mut dest, &nodata, &tiles, self.alpha_is_bitmask),
		}
		Ok(dest)
	}

	/// Materializes the per-source tile state for `rect`: sources without
	/// coverage are elided, everything else is read and border-extended to
	/// the full rect (data with the format's low sentinel, alpha and ROI
	/// with zero).
	fn prepare_tiles<T: Sample>(&self, rect: PixelRect) -> Result<Vec<SourceTile<'_, T>>> {
		let mut tiles = Vec::with_capacity(self.sources.len());

		for (index, source) in self.sources.iter().enumerate() {
			let covered = rect.intersected(&source.image().bounds());
			if covered.is_empty() {
				continue;
			}

			let data = T::from_raster(source.image().read(covered)?)?.extended_to(rect, BorderFill::FormatMin.value::<T>());

			let weight = if let Some(alpha) = source.alpha() {
				let alpha_covered = rect.intersected(&alpha.bounds());
				let buffer = if alpha_covered.is_empty() {
					BandBuffer::filled(rect, 1, BorderFill::Zero.value::<T>())
				} else {
					T::from_raster(alpha.read(alpha_covered)?)?.extended_to(rect, BorderFill::Zero.value::<T>())
				};
				WeightTile::Alpha(buffer)
			} else if let Some(roi) = source.roi() {
				let roi_covered = rect.intersected(&roi.bounds());
				let buffer = if roi_covered.is_empty() {
					BandBuffer::filled(rect, 1, 0i32)
				} else {
					roi.rasterize(roi_covered)?.extended_to(rect, 0)
				};
				WeightTile::Roi(buffer)
			} else {
				WeightTile::None
			};

			let test = match &self.luts[index] {
				Some(lut) => SampleTest::Lut {
					lut,
					dest_bytes: &self.dest_nodata_bytes,
				},
				None => match source.nodata().and_then(T::range_from) {
					Some(range) => SampleTest::Range(range),
					None => SampleTest::All,
				},
			};

			tiles.push(SourceTile {
				covered,
				data,
				weight,
				test,
			});
		}

		Ok(tiles)
	}
}
