//! The type-erased raster tile.
//!
//! [`Raster`] carries one [`BandBuffer`] in one of the six sample formats.
//! It is the currency between the host-facing reader traits and the typed
//! engine kernels: readers return `Raster`, the engine unwraps it into the
//! matching `BandBuffer<T>` once per tile and never dispatches on the format
//! inside the pixel loops.

use anyhow::Result;

use crate::{BandBuffer, BorderFill, PixelRect, Sample, SampleFormat};

/// A raster tile in one of the six supported sample formats.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
	U8(BandBuffer<u8>),
	U16(BandBuffer<u16>),
	I16(BandBuffer<i16>),
	I32(BandBuffer<i32>),
	F32(BandBuffer<f32>),
	F64(BandBuffer<f64>),
}

impl Raster {
	/// Creates a raster with every sample set to `value`, saturated into
	/// `format`.
	#[must_use]
	pub fn new_filled(format: SampleFormat, rect: PixelRect, bands: usize, value: f64) -> Raster {
		use SampleFormat::*;
		match format {
			U8 => Raster::U8(BandBuffer::filled(rect, bands, u8::clamp_from_f64(value))),
			U16 => Raster::U16(BandBuffer::filled(rect, bands, u16::clamp_from_f64(value))),
			I16 => Raster::I16(BandBuffer::filled(rect, bands, i16::clamp_from_f64(value))),
			I32 => Raster::I32(BandBuffer::filled(rect, bands, i32::clamp_from_f64(value))),
			F32 => Raster::F32(BandBuffer::filled(rect, bands, f32::clamp_from_f64(value))),
			F64 => Raster::F64(BandBuffer::filled(rect, bands, value)),
		}
	}

	/// The sample format of this raster.
	#[must_use]
	pub fn format(&self) -> SampleFormat {
		match self {
			Raster::U8(_) => SampleFormat::U8,
			Raster::U16(_) => SampleFormat::U16,
			Raster::I16(_) => SampleFormat::I16,
			Raster::I32(_) => SampleFormat::I32,
			Raster::F32(_) => SampleFormat::F32,
			Raster::F64(_) => SampleFormat::F64,
		}
	}

	/// The rectangle this raster covers.
	#[must_use]
	pub fn rect(&self) -> &PixelRect {
		match self {
			Raster::U8(b) => b.rect(),
			Raster::U16(b) => b.rect(),
			Raster::I16(b) => b.rect(),
			Raster::I32(b) => b.rect(),
			Raster::F32(b) => b.rect(),
			Raster::F64(b) => b.rect(),
		}
	}

	/// Number of bands.
	#[must_use]
	pub fn band_count(&self) -> usize {
		match self {
			Raster::U8(b) => b.band_count(),
			Raster::U16(b) => b.band_count(),
			Raster::I16(b) => b.band_count(),
			Raster::I32(b) => b.band_count(),
			Raster::F32(b) => b.band_count(),
			Raster::F64(b) => b.band_count(),
		}
	}

	/// Sample at `(x, y, band)` widened to `f64`.
	#[must_use]
	pub fn get_f64(&self, x: i32, y: i32, band: usize) -> f64 {
		match self {
			Raster::U8(b) => b.get(x, y, band).to_f64(),
			Raster::U16(b) => b.get(x, y, band).to_f64(),
			Raster::I16(b) => b.get(x, y, band).to_f64(),
			Raster::I32(b) => b.get(x, y, band).to_f64(),
			Raster::F32(b) => b.get(x, y, band).to_f64(),
			Raster::F64(b) => b.get(x, y, band),
		}
	}

	/// Writes `value` at `(x, y, band)`, saturated into this raster's format.
	pub fn set_f64(&mut self, x: i32, y: i32, band: usize, value: f64) {
		match self {
			Raster::U8(b) => b.set(x, y, band, u8::clamp_from_f64(value)),
			Raster::U16(b) => b.set(x, y, band, u16::clamp_from_f64(value)),
			Raster::I16(b) => b.set(x, y, band, i16::clamp_from_f64(value)),
			Raster::I32(b) => b.set(x, y, band, i32::clamp_from_f64(value)),
			Raster::F32(b) => b.set(x, y, band, f32::clamp_from_f64(value)),
			Raster::F64(b) => b.set(x, y, band, value),
		}
	}

	/// Returns a copy re-framed to `rect`, padding with `fill`.
	#[must_use]
	pub fn extended_to(&self, rect: PixelRect, fill: BorderFill) -> Raster {
		match self {
			Raster::U8(b) => Raster::U8(b.extended_to(rect, fill.value())),
			Raster::U16(b) => Raster::U16(b.extended_to(rect, fill.value())),
			Raster::I16(b) => Raster::I16(b.extended_to(rect, fill.value())),
			Raster::I32(b) => Raster::I32(b.extended_to(rect, fill.value())),
			Raster::F32(b) => Raster::F32(b.extended_to(rect, fill.value())),
			Raster::F64(b) => Raster::F64(b.extended_to(rect, fill.value())),
		}
	}

	/// Returns a copy restricted to `rect`, which must lie inside this
	/// raster's coverage.
	pub fn cropped(&self, rect: PixelRect) -> Result<Raster> {
		Ok(match self {
			Raster::U8(b) => Raster::U8(b.cropped(rect)?),
			Raster::U16(b) => Raster::U16(b.cropped(rect)?),
			Raster::I16(b) => Raster::I16(b.cropped(rect)?),
			Raster::I32(b) => Raster::I32(b.cropped(rect)?),
			Raster::F32(b) => Raster::F32(b.cropped(rect)?),
			Raster::F64(b) => Raster::F64(b.cropped(rect)?),
		})
	}
}

impl<T: Sample> From<BandBuffer<T>> for Raster {
	fn from(buffer: BandBuffer<T>) -> Self {
		T::into_raster(buffer)
	}
}
