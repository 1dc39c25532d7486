//! The per-format numeric contract of the compositing engine.
//!
//! [`Sample`] is implemented for exactly the six types of [`SampleFormat`].
//! The mosaic inner loops are written once, generically over `Sample`, and
//! monomorphize into six typed variants; everything format-specific (blend
//! clamping, no-data materialization, border sentinels, NaN handling, the
//! byte-LUT hook) lives behind this trait.

use anyhow::{Result, bail};

use crate::{BandBuffer, NoData, Raster, SampleFormat, ValueRange};

// Supertraits re-exported so downstream kernels can use them without
// depending on num-traits themselves.
pub use num_traits::{Bounded, Zero};

/// Rounds half-away-from-zero, the rounding used for integer blend results.
#[inline]
fn round_half_away(value: f64) -> f64 {
	if value >= 0.0 { (value + 0.5).floor() } else { (value - 0.5).ceil() }
}

/// A raster sample type.
///
/// The trait carries the format's numeric semantics:
///
/// - [`clamp_from_f64`](Sample::clamp_from_f64) converts a blend accumulator
///   to the destination format: integers round half-away-from-zero and
///   saturate, `f32` clamps to its finite range, `f64` is the identity.
/// - [`nodata_from_f64`](Sample::nodata_from_f64) materializes a destination
///   no-data value with truncating-cast semantics (the low bits of the
///   integer conversion), not a saturating round.
/// - [`pad_fill`](Sample::pad_fill) is the saturated-low sentinel written
///   into the padding of border-extended data buffers: `0` for unsigned
///   formats, the most negative value for signed and float formats.
pub trait Sample:
	Copy + PartialEq + PartialOrd + Zero + Bounded + Send + Sync + std::fmt::Debug + 'static
{
	/// The format tag of this sample type.
	const FORMAT: SampleFormat;

	/// Widens the sample to `f64`. Unsigned formats promote without sign
	/// extension.
	fn to_f64(self) -> f64;

	/// Saturating conversion from a blend accumulator.
	fn clamp_from_f64(value: f64) -> Self;

	/// Truncating conversion used to materialize destination no-data values.
	fn nodata_from_f64(value: f64) -> Self;

	/// Fill value for the padding of border-extended data buffers.
	#[inline]
	fn pad_fill() -> Self {
		Self::min_value()
	}

	/// Whether this sample is NaN. Always false for integer formats.
	#[inline]
	fn is_nan_sample(self) -> bool {
		false
	}

	/// Index of this sample in a 256-entry byte lookup table.
	///
	/// Meaningful for byte samples only; the engine builds LUT-based no-data
	/// tests exclusively for byte rasters.
	fn lut_index(self) -> u8;

	/// Extracts the typed range from a type-erased no-data predicate.
	/// Returns `None` if the predicate carries a different format.
	fn range_from(nodata: &NoData) -> Option<&ValueRange<Self>>;

	/// Unwraps a type-erased raster into this sample type's buffer.
	///
	/// # Errors
	/// Returns an error if the raster carries a different format.
	fn from_raster(raster: Raster) -> Result<BandBuffer<Self>>;

	/// Wraps a typed buffer back into the type-erased carrier.
	fn into_raster(buffer: BandBuffer<Self>) -> Raster;
}

impl Sample for u8 {
	const FORMAT: SampleFormat = SampleFormat::U8;

	#[inline]
	fn to_f64(self) -> f64 {
		f64::from(self)
	}

	#[inline]
	fn clamp_from_f64(value: f64) -> Self {
		round_half_away(value) as u8
	}

	#[inline]
	fn nodata_from_f64(value: f64) -> Self {
		(value as i32) as u8
	}

	#[inline]
	fn lut_index(self) -> u8 {
		self
	}

	fn range_from(nodata: &NoData) -> Option<&ValueRange<u8>> {
		match nodata {
			NoData::U8(range) => Some(range),
			_ => None,
		}
	}

	fn from_raster(raster: Raster) -> Result<BandBuffer<u8>> {
		match raster {
			Raster::U8(buffer) => Ok(buffer),
			_ => bail!("expected a u8 raster, got {}", raster.format()),
		}
	}

	fn into_raster(buffer: BandBuffer<u8>) -> Raster {
		Raster::U8(buffer)
	}
}

impl Sample for u16 {
	const FORMAT: SampleFormat = SampleFormat::U16;

	#[inline]
	fn to_f64(self) -> f64 {
		f64::from(self)
	}

	#[inline]
	fn clamp_from_f64(value: f64) -> Self {
		round_half_away(value) as u16
	}

	#[inline]
	fn nodata_from_f64(value: f64) -> Self {
		(value as i32) as u16
	}

	#[inline]
	fn lut_index(self) -> u8 {
		0
	}

	fn range_from(nodata: &NoData) -> Option<&ValueRange<u16>> {
		match nodata {
			NoData::U16(range) => Some(range),
			_ => None,
		}
	}

	fn from_raster(raster: Raster) -> Result<BandBuffer<u16>> {
		match raster {
			Raster::U16(buffer) => Ok(buffer),
			_ => bail!("expected a u16 raster, got {}", raster.format()),
		}
	}

	fn into_raster(buffer: BandBuffer<u16>) -> Raster {
		Raster::U16(buffer)
	}
}

impl Sample for i16 {
	const FORMAT: SampleFormat = SampleFormat::I16;

	#[inline]
	fn to_f64(self) -> f64 {
		f64::from(self)
	}

	#[inline]
	fn clamp_from_f64(value: f64) -> Self {
		round_half_away(value) as i16
	}

	#[inline]
	fn nodata_from_f64(value: f64) -> Self {
		(value as i32) as i16
	}

	#[inline]
	fn lut_index(self) -> u8 {
		0
	}

	fn range_from(nodata: &NoData) -> Option<&ValueRange<i16>> {
		match nodata {
			NoData::I16(range) => Some(range),
			_ => None,
		}
	}

	fn from_raster(raster: Raster) -> Result<BandBuffer<i16>> {
		match raster {
			Raster::I16(buffer) => Ok(buffer),
			_ => bail!("expected an i16 raster, got {}", raster.format()),
		}
	}

	fn into_raster(buffer: BandBuffer<i16>) -> Raster {
		Raster::I16(buffer)
	}
}

impl Sample for i32 {
	const FORMAT: SampleFormat = SampleFormat::I32;

	#[inline]
	fn to_f64(self) -> f64 {
		f64::from(self)
	}

	#[inline]
	fn clamp_from_f64(value: f64) -> Self {
		round_half_away(value) as i32
	}

	#[inline]
	fn nodata_from_f64(value: f64) -> Self {
		value as i32
	}

	#[inline]
	fn lut_index(self) -> u8 {
		0
	}

	fn range_from(nodata: &NoData) -> Option<&ValueRange<i32>> {
		match nodata {
			NoData::I32(range) => Some(range),
			_ => None,
		}
	}

	fn from_raster(raster: Raster) -> Result<BandBuffer<i32>> {
		match raster {
			Raster::I32(buffer) => Ok(buffer),
			_ => bail!("expected an i32 raster, got {}", raster.format()),
		}
	}

	fn into_raster(buffer: BandBuffer<i32>) -> Raster {
		Raster::I32(buffer)
	}
}

impl Sample for f32 {
	const FORMAT: SampleFormat = SampleFormat::F32;

	#[inline]
	fn to_f64(self) -> f64 {
		f64::from(self)
	}

	#[inline]
	fn clamp_from_f64(value: f64) -> Self {
		value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
	}

	#[inline]
	fn nodata_from_f64(value: f64) -> Self {
		value as f32
	}

	#[inline]
	fn is_nan_sample(self) -> bool {
		self.is_nan()
	}

	#[inline]
	fn lut_index(self) -> u8 {
		0
	}

	fn range_from(nodata: &NoData) -> Option<&ValueRange<f32>> {
		match nodata {
			NoData::F32(range) => Some(range),
			_ => None,
		}
	}

	fn from_raster(raster: Raster) -> Result<BandBuffer<f32>> {
		match raster {
			Raster::F32(buffer) => Ok(buffer),
			_ => bail!("expected an f32 raster, got {}", raster.format()),
		}
	}

	fn into_raster(buffer: BandBuffer<f32>) -> Raster {
		Raster::F32(buffer)
	}
}

impl Sample for f64 {
	const FORMAT: SampleFormat = SampleFormat::F64;

	#[inline]
	fn to_f64(self) -> f64 {
		self
	}

	#[inline]
	fn clamp_from_f64(value: f64) -> Self {
		value
	}

	#[inline]
	fn nodata_from_f64(value: f64) -> Self {
		value
	}

	#[inline]
	fn is_nan_sample(self) -> bool {
		self.is_nan()
	}

	#[inline]
	fn lut_index(self) -> u8 {
		0
	}

	fn range_from(nodata: &NoData) -> Option<&ValueRange<f64>> {
		match nodata {
			NoData::F64(range) => Some(range),
			_ => None,
		}
	}

	fn from_raster(raster: Raster) -> Result<BandBuffer<f64>> {
		match raster {
			Raster::F64(buffer) => Ok(buffer),
			_ => bail!("expected an f64 raster, got {}", raster.format()),
		}
	}

	fn into_raster(buffer: BandBuffer<f64>) -> Raster {
		Raster::F64(buffer)
	}
}
