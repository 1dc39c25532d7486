use std::sync::Arc;

use mosatiles_core::{NoData, RasterReader};

use crate::RoiMask;

/// Everything the engine knows about one mosaic source.
///
/// A descriptor bundles the source image with its optional validity inputs:
/// a single-band alpha image in the source's sample format, a
/// region-of-interest mask, and a no-data value range. The descriptor holds
/// handles, not pixel data — the host guarantees the images outlive the plan.
#[derive(Clone)]
pub struct SourceDescriptor {
	image: Arc<dyn RasterReader>,
	alpha: Option<Arc<dyn RasterReader>>,
	roi: Option<Arc<dyn RoiMask>>,
	nodata: Option<NoData>,
}

impl SourceDescriptor {
	/// Creates a descriptor with no alpha, ROI or no-data.
	#[must_use]
	pub fn new(image: Arc<dyn RasterReader>) -> SourceDescriptor {
		SourceDescriptor {
			image,
			alpha: None,
			roi: None,
			nodata: None,
		}
	}

	/// Attaches a single-band alpha image (validated at plan construction).
	#[must_use]
	pub fn with_alpha(mut self, alpha: Arc<dyn RasterReader>) -> SourceDescriptor {
		self.alpha = Some(alpha);
		self
	}

	/// Attaches a region-of-interest mask.
	#[must_use]
	pub fn with_roi(mut self, roi: Arc<dyn RoiMask>) -> SourceDescriptor {
		self.roi = Some(roi);
		self
	}

	/// Attaches a no-data value range (validated at plan construction).
	#[must_use]
	pub fn with_nodata(mut self, nodata: impl Into<NoData>) -> SourceDescriptor {
		self.nodata = Some(nodata.into());
		self
	}

	/// The source image.
	#[must_use]
	pub fn image(&self) -> &Arc<dyn RasterReader> {
		&self.image
	}

	/// The alpha image, if any.
	#[must_use]
	pub fn alpha(&self) -> Option<&Arc<dyn RasterReader>> {
		self.alpha.as_ref()
	}

	/// The ROI mask, if any.
	#[must_use]
	pub fn roi(&self) -> Option<&Arc<dyn RoiMask>> {
		self.roi.as_ref()
	}

	/// The no-data range, if any.
	#[must_use]
	pub fn nodata(&self) -> Option<&NoData> {
		self.nodata.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mosatiles_core::{MemoryRaster, PixelRect, Raster, SampleFormat, ValueRange};

	#[test]
	fn builder_attaches_optional_inputs() {
		let rect = PixelRect::from_min_and_size(0, 0, 2, 2).unwrap();
		let image = Arc::new(MemoryRaster::new(Raster::new_filled(SampleFormat::U8, rect, 1, 7.0)).unwrap());
		let alpha = Arc::new(MemoryRaster::new(Raster::new_filled(SampleFormat::U8, rect, 1, 255.0)).unwrap());

		let plain = SourceDescriptor::new(image.clone());
		assert!(plain.alpha().is_none());
		assert!(plain.roi().is_none());
		assert!(plain.nodata().is_none());

		let full = SourceDescriptor::new(image)
			.with_alpha(alpha)
			.with_nodata(ValueRange::point(255u8).unwrap());
		assert!(full.alpha().is_some());
		assert_eq!(full.nodata().unwrap().format(), SampleFormat::U8);
	}
}
