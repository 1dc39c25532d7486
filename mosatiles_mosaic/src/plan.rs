use anyhow::{Result, bail};
use mosatiles_core::{PixelRect, Sample, SampleFormat};

use crate::{LayoutHint, MosaicLayout, NoDataLut, SourceDescriptor, derive_layout};

/// How contributing sources are combined at each destination pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MosaicMode {
	/// The first valid and accepted source in input order wins.
	Overlay,
	/// The weighted mean of all valid contributing sources.
	Blend,
}

impl std::fmt::Display for MosaicMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			MosaicMode::Overlay => "overlay",
			MosaicMode::Blend => "blend",
		};
		write!(f, "{name}")
	}
}

/// An immutable mosaic operation, validated and precomputed once.
///
/// A plan owns its ordered source descriptors, the derived destination
/// layout, the broadcast destination no-data vector and the byte lookup
/// tables for `u8` sources with a no-data range. It is read-only after
/// construction and may be shared across threads; tiles are composed with
/// [`compose_tile`](MosaicPlan::compose_tile), which owns all of its mutable
/// state.
pub struct MosaicPlan {
	pub(crate) mode: MosaicMode,
	pub(crate) sources: Vec<SourceDescriptor>,
	pub(crate) layout: MosaicLayout,
	pub(crate) dest_nodata: Vec<f64>,
	pub(crate) dest_nodata_bytes: Vec<u8>,
	pub(crate) alpha_is_bitmask: bool,
	pub(crate) luts: Vec<Option<NoDataLut>>,
}

impl std::fmt::Debug for MosaicPlan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MosaicPlan").finish_non_exhaustive()
	}
}

impl MosaicPlan {
	/// Validates the sources and builds the plan.
	///
	/// `dest_nodata` is the destination no-data vector: empty for all-zeros,
	/// one value to broadcast to every band, or at least one value per band
	/// (extra values are ignored).
	///
	/// # Errors
	/// Fails on any incompatibility among the sources (sample format, band
	/// count, alpha shape, no-data element type), on an unusable layout, or
	/// on a `dest_nodata` length between 2 and `band_count - 1`.
	pub fn new(
		mode: MosaicMode,
		sources: Vec<SourceDescriptor>,
		dest_nodata: &[f64],
		hint: Option<LayoutHint>,
	) -> Result<MosaicPlan> {
		let layout = derive_layout(&sources, hint.as_ref())?;

		let bands = layout.band_count;
		let dest_nodata = match dest_nodata.len() {
			0 => vec![0.0; bands],
			1 => vec![dest_nodata[0]; bands],
			n if n >= bands => dest_nodata[..bands].to_vec(),
			n => bail!("destination no-data has {n} values, but the mosaic has {bands} bands"),
		};

		let with_alpha = sources.iter().any(|s| s.alpha().is_some());
		let without_alpha = sources.iter().any(|s| s.alpha().is_none());
		let alpha_is_bitmask = with_alpha && without_alpha;

		// Byte materialization of the no-data vector; the u8 loops test
		// validity against these instead of evaluating ranges.
		let dest_nodata_bytes: Vec<u8> = dest_nodata.iter().map(|&v| u8::nodata_from_f64(v)).collect();

		let luts = if layout.format == SampleFormat::U8 {
			sources
				.iter()
				.map(|source| {
					source
						.nodata()
						.and_then(u8::range_from)
						.map(|range| NoDataLut::build(range, &dest_nodata_bytes))
				})
				.collect()
		} else {
			vec![None; sources.len()]
		};

		log::debug!(
			"mosaic plan: {mode}, {} sources, {} {} band(s), rect {}",
			sources.len(),
			layout.format,
			bands,
			layout.rect
		);

		Ok(MosaicPlan {
			mode,
			sources,
			layout,
			dest_nodata,
			dest_nodata_bytes,
			alpha_is_bitmask,
			luts,
		})
	}

	/// The compositing mode.
	#[must_use]
	pub fn mode(&self) -> MosaicMode {
		self.mode
	}

	/// The derived destination layout.
	#[must_use]
	pub fn layout(&self) -> &MosaicLayout {
		&self.layout
	}

	/// The destination rectangle.
	#[must_use]
	pub fn rect(&self) -> &PixelRect {
		&self.layout.rect
	}

	/// The destination sample format.
	#[must_use]
	pub fn format(&self) -> SampleFormat {
		self.layout.format
	}

	/// The destination band count.
	#[must_use]
	pub fn band_count(&self) -> usize {
		self.layout.band_count
	}

	/// The destination no-data vector, one value per band.
	#[must_use]
	pub fn dest_nodata(&self) -> &[f64] {
		&self.dest_nodata
	}

	/// The ordered source descriptors.
	#[must_use]
	pub fn sources(&self) -> &[SourceDescriptor] {
		&self.sources
	}

	/// Whether blend weights treat any non-zero alpha as full opacity.
	///
	/// Derived at construction: set iff at least one source has an alpha
	/// image and at least one source has none.
	#[must_use]
	pub fn alpha_is_bitmask(&self) -> bool {
		self.alpha_is_bitmask
	}

	/// The destination no-data vector materialized in the kernel's sample
	/// type (truncating-cast semantics).
	pub(crate) fn typed_nodata<T: Sample>(&self) -> Vec<T> {
		self.dest_nodata.iter().map(|&v| T::nodata_from_f64(v)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mosatiles_core::{MemoryRaster, Raster, ValueRange};
	use std::sync::Arc;

	fn rect(x0: i32, y0: i32, w: u32, h: u32) -> PixelRect {
		PixelRect::from_min_and_size(x0, y0, w, h).unwrap()
	}

	fn source(format: SampleFormat, bands: usize) -> SourceDescriptor {
		SourceDescriptor::new(Arc::new(
			MemoryRaster::new(Raster::new_filled(format, rect(0, 0, 4, 4), bands, 0.0)).unwrap(),
		))
	}

	fn alpha_source(format: SampleFormat, bands: usize) -> SourceDescriptor {
		let alpha = Arc::new(MemoryRaster::new(Raster::new_filled(format, rect(0, 0, 4, 4), 1, 255.0)).unwrap());
		source(format, bands).with_alpha(alpha)
	}

	#[test]
	fn nodata_broadcast_rules() {
		let bands = 3;
		let plan = |nodata: &[f64]| MosaicPlan::new(MosaicMode::Overlay, vec![source(SampleFormat::U8, bands)], nodata, None);

		assert_eq!(plan(&[]).unwrap().dest_nodata(), &[0.0, 0.0, 0.0]);
		assert_eq!(plan(&[9.0]).unwrap().dest_nodata(), &[9.0, 9.0, 9.0]);
		assert_eq!(plan(&[1.0, 2.0, 3.0, 4.0]).unwrap().dest_nodata(), &[1.0, 2.0, 3.0]);
		assert_eq!(
			plan(&[1.0, 2.0]).unwrap_err().to_string(),
			"destination no-data has 2 values, but the mosaic has 3 bands"
		);
	}

	#[test]
	fn alpha_bitmask_requires_mixed_sources() {
		let all_plain = MosaicPlan::new(
			MosaicMode::Blend,
			vec![source(SampleFormat::U8, 1), source(SampleFormat::U8, 1)],
			&[0.0],
			None,
		)
		.unwrap();
		assert!(!all_plain.alpha_is_bitmask());

		let all_alpha = MosaicPlan::new(
			MosaicMode::Blend,
			vec![alpha_source(SampleFormat::U8, 1), alpha_source(SampleFormat::U8, 1)],
			&[0.0],
			None,
		)
		.unwrap();
		assert!(!all_alpha.alpha_is_bitmask());

		let mixed = MosaicPlan::new(
			MosaicMode::Blend,
			vec![alpha_source(SampleFormat::U8, 1), source(SampleFormat::U8, 1)],
			&[0.0],
			None,
		)
		.unwrap();
		assert!(mixed.alpha_is_bitmask());
	}

	#[test]
	fn luts_only_for_u8_sources_with_nodata() {
		let with_nodata = source(SampleFormat::U8, 1).with_nodata(ValueRange::point(255u8).unwrap());
		let plan = MosaicPlan::new(
			MosaicMode::Overlay,
			vec![with_nodata, source(SampleFormat::U8, 1)],
			&[0.0],
			None,
		)
		.unwrap();
		assert!(plan.luts[0].is_some());
		assert!(plan.luts[1].is_none());

		let wide = source(SampleFormat::U16, 1).with_nodata(ValueRange::point(9u16).unwrap());
		let plan = MosaicPlan::new(MosaicMode::Overlay, vec![wide], &[0.0], None).unwrap();
		assert!(plan.luts[0].is_none());
	}

	#[test]
	fn lut_uses_truncated_dest_bytes() {
		let with_nodata = source(SampleFormat::U8, 1).with_nodata(ValueRange::new(10u8, 20u8).unwrap());
		let plan = MosaicPlan::new(MosaicMode::Overlay, vec![with_nodata], &[260.0], None).unwrap();
		// 260 truncates to byte 4
		assert_eq!(plan.luts[0].as_ref().unwrap().entry(0, 15), 4);
	}

	#[test]
	fn typed_nodata_materialization() {
		let plan = MosaicPlan::new(MosaicMode::Overlay, vec![source(SampleFormat::I16, 2)], &[-5.7, 40000.0], None).unwrap();
		assert_eq!(plan.typed_nodata::<i16>(), vec![-5, -25536]);
		assert_eq!(plan.dest_nodata(), &[-5.7, 40000.0]);
	}
}
