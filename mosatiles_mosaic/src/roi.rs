//! Region-of-interest masks.
//!
//! A ROI restricts which pixels of a source take part in the mosaic. The
//! engine consumes masks through [`RoiMask`], which rasterizes the region
//! into a single-band `i32` buffer on demand; a pixel is *inside* iff its
//! sample is strictly positive. Outside the mask's bounds the engine pads
//! with zero, so uncovered pixels are outside by construction.

use anyhow::{Result, ensure};
use mosatiles_core::{BandBuffer, PixelRect};

/// A rasterizable region of interest.
pub trait RoiMask: Send + Sync {
	/// The rectangle outside of which the region is empty.
	fn bounds(&self) -> PixelRect;

	/// Rasterizes the region over `rect` (must lie inside the bounds) into a
	/// single-band buffer; strictly positive samples are inside.
	fn rasterize(&self, rect: PixelRect) -> Result<BandBuffer<i32>>;
}

/// A [`RoiMask`] backed by a precomputed in-memory mask buffer.
#[derive(Debug, Clone)]
pub struct MemoryRoi {
	mask: BandBuffer<i32>,
}

impl MemoryRoi {
	/// Wraps a single-band mask buffer.
	pub fn new(mask: BandBuffer<i32>) -> Result<MemoryRoi> {
		ensure!(mask.band_count() == 1, "a ROI mask must be single-band");
		Ok(MemoryRoi { mask })
	}

	/// Builds a mask from row-major inside/outside flags.
	pub fn from_flags(rect: PixelRect, flags: &[bool]) -> Result<MemoryRoi> {
		let mask = BandBuffer::from_vec(rect, 1, flags.iter().map(|f| i32::from(*f)).collect())?;
		Self::new(mask)
	}
}

impl RoiMask for MemoryRoi {
	fn bounds(&self) -> PixelRect {
		*self.mask.rect()
	}

	fn rasterize(&self, rect: PixelRect) -> Result<BandBuffer<i32>> {
		self.mask.cropped(rect)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_flags_and_rasterize() {
		let rect = PixelRect::from_min_and_size(0, 0, 2, 2).unwrap();
		let roi = MemoryRoi::from_flags(rect, &[true, false, true, true]).unwrap();
		assert_eq!(roi.bounds(), rect);

		let mask = roi.rasterize(rect).unwrap();
		assert_eq!(mask.get(0, 0, 0), 1);
		assert_eq!(mask.get(1, 0, 0), 0);
		assert_eq!(mask.get(1, 1, 0), 1);
	}

	#[test]
	fn rejects_multi_band_masks() {
		let rect = PixelRect::from_min_and_size(0, 0, 1, 1).unwrap();
		let mask = BandBuffer::filled(rect, 2, 1i32);
		assert!(MemoryRoi::new(mask).is_err());
	}
}
