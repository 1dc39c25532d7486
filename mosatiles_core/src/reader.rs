//! Host-facing source raster abstraction.
//!
//! The engine never touches host image frameworks directly; it reads source
//! pixels through [`RasterReader`], which hands out copied sub-rasters on
//! demand. Implementations must tolerate concurrent `read` calls — every
//! call produces an independent tile extraction (the built-in
//! [`MemoryRaster`] copies out of its owned buffer).

use anyhow::{Result, ensure};

use crate::{PixelRect, Raster, SampleFormat};

/// Random access to a typed raster with rectangular bounds.
///
/// `read` must return a raster covering exactly the requested rect, which the
/// caller guarantees to lie inside [`bounds`](RasterReader::bounds).
pub trait RasterReader: Send + Sync {
	/// The rectangle of real coverage.
	fn bounds(&self) -> PixelRect;

	/// The sample format of the raster.
	fn format(&self) -> SampleFormat;

	/// Number of bands.
	fn band_count(&self) -> usize;

	/// Copies the sub-raster covering `rect` (must lie inside the bounds).
	fn read(&self, rect: PixelRect) -> Result<Raster>;
}

/// A [`RasterReader`] backed by an owned in-memory raster.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
	raster: Raster,
}

impl MemoryRaster {
	/// Wraps a raster tile as a readable source.
	///
	/// # Errors
	/// Returns an error if the raster is empty or has no bands.
	pub fn new(raster: Raster) -> Result<MemoryRaster> {
		ensure!(!raster.rect().is_empty(), "source raster must not be empty");
		ensure!(raster.band_count() >= 1, "source raster must have at least one band");
		Ok(MemoryRaster { raster })
	}

	/// The wrapped raster.
	#[must_use]
	pub fn raster(&self) -> &Raster {
		&self.raster
	}
}

impl RasterReader for MemoryRaster {
	fn bounds(&self) -> PixelRect {
		*self.raster.rect()
	}

	fn format(&self) -> SampleFormat {
		self.raster.format()
	}

	fn band_count(&self) -> usize {
		self.raster.band_count()
	}

	fn read(&self, rect: PixelRect) -> Result<Raster> {
		self.raster.cropped(rect)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::BandBuffer;

	fn rect(x0: i32, y0: i32, w: u32, h: u32) -> PixelRect {
		PixelRect::from_min_and_size(x0, y0, w, h).unwrap()
	}

	#[test]
	fn memory_raster_reads_sub_rects() {
		let buffer = BandBuffer::from_vec(rect(0, 0, 2, 2), 1, vec![1u8, 2, 3, 4]).unwrap();
		let source = MemoryRaster::new(Raster::from(buffer)).unwrap();

		assert_eq!(source.bounds().as_array(), [0, 0, 1, 1]);
		assert_eq!(source.format(), SampleFormat::U8);
		assert_eq!(source.band_count(), 1);

		let tile = source.read(rect(1, 0, 1, 2)).unwrap();
		assert_eq!(tile.get_f64(1, 0, 0), 2.0);
		assert_eq!(tile.get_f64(1, 1, 0), 4.0);

		assert!(source.read(rect(0, 0, 3, 1)).is_err());
	}

	#[test]
	fn memory_raster_rejects_empty() {
		let empty = Raster::new_filled(SampleFormat::U8, PixelRect::new_empty(), 1, 0.0);
		assert!(MemoryRaster::new(empty).is_err());
	}
}
