//! Typed band-major scanline buffers.
//!
//! A [`BandBuffer`] owns the samples of one raster tile: `bands` planes laid
//! out band-major (`data[(band · height + row) · width + col]`), addressed by
//! **absolute** pixel coordinates relative to its [`PixelRect`]. The mosaic
//! engine iterates band → row → pixel, which is why the bands are kept as
//! contiguous planes.

use anyhow::{Result, ensure};

use crate::PixelRect;

/// A band-major sample buffer over a pixel rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct BandBuffer<T> {
	rect: PixelRect,
	bands: usize,
	data: Vec<T>,
}

impl<T: Copy> BandBuffer<T> {
	/// Creates a buffer with every sample set to `value`.
	#[must_use]
	pub fn filled(rect: PixelRect, bands: usize, value: T) -> BandBuffer<T> {
		let len = rect.count_pixels() as usize * bands;
		BandBuffer {
			rect,
			bands,
			data: vec![value; len],
		}
	}

	/// Wraps an existing band-major sample vector.
	///
	/// # Errors
	/// Returns an error if the vector length does not match
	/// `rect.count_pixels() * bands`.
	pub fn from_vec(rect: PixelRect, bands: usize, data: Vec<T>) -> Result<BandBuffer<T>> {
		let expected = rect.count_pixels() as usize * bands;
		ensure!(
			data.len() == expected,
			"data length ({}) does not match {} pixels x {} bands = {}",
			data.len(),
			rect.count_pixels(),
			bands,
			expected
		);
		Ok(BandBuffer { rect, bands, data })
	}

	/// The rectangle this buffer covers.
	#[must_use]
	#[inline]
	pub fn rect(&self) -> &PixelRect {
		&self.rect
	}

	/// Number of bands.
	#[must_use]
	#[inline]
	pub fn band_count(&self) -> usize {
		self.bands
	}

	/// The raw band-major sample storage.
	#[must_use]
	pub fn data(&self) -> &[T] {
		&self.data
	}

	#[inline]
	fn offset(&self, x: i32, y: i32, band: usize) -> usize {
		debug_assert!(self.rect.contains(x, y), "({x}, {y}) outside {}", self.rect);
		debug_assert!(band < self.bands, "band {band} out of {}", self.bands);
		let col = (i64::from(x) - i64::from(self.rect.x_min())) as usize;
		let row = (i64::from(y) - i64::from(self.rect.y_min())) as usize;
		(band * self.rect.height() as usize + row) * self.rect.width() as usize + col
	}

	/// Sample at the absolute pixel `(x, y)` in `band`.
	#[must_use]
	#[inline]
	pub fn get(&self, x: i32, y: i32, band: usize) -> T {
		self.data[self.offset(x, y, band)]
	}

	/// Writes the sample at the absolute pixel `(x, y)` in `band`.
	#[inline]
	pub fn set(&mut self, x: i32, y: i32, band: usize, value: T) {
		let offset = self.offset(x, y, band);
		self.data[offset] = value;
	}

	/// The full row `y` of `band` as a slice, left to right.
	#[must_use]
	pub fn band_row(&self, band: usize, y: i32) -> &[T] {
		let start = self.offset(self.rect.x_min(), y, band);
		&self.data[start..start + self.rect.width() as usize]
	}

	/// Sets every sample of `band` to `value`.
	pub fn fill_band(&mut self, band: usize, value: T) {
		let plane = self.rect.count_pixels() as usize;
		self.data[band * plane..(band + 1) * plane].fill(value);
	}

	/// Copies the overlapping region of `other` into this buffer.
	///
	/// Pixels of this buffer outside `other`'s rect are left untouched. Both
	/// buffers must have the same band count.
	pub fn copy_from(&mut self, other: &BandBuffer<T>) {
		assert_eq!(self.bands, other.bands, "band count mismatch");
		let overlap = self.rect.intersected(&other.rect);
		if overlap.is_empty() {
			return;
		}
		let width = overlap.width() as usize;
		for band in 0..self.bands {
			for y in overlap.y_range() {
				let dst = self.offset(overlap.x_min(), y, band);
				let src = other.offset(overlap.x_min(), y, band);
				self.data[dst..dst + width].copy_from_slice(&other.data[src..src + width]);
			}
		}
	}

	/// Returns a copy of this buffer re-framed to `rect`.
	///
	/// Pixels of `rect` outside this buffer's coverage are set to `fill`;
	/// this is the border-extension primitive of the engine.
	#[must_use]
	pub fn extended_to(&self, rect: PixelRect, fill: T) -> BandBuffer<T> {
		let mut extended = BandBuffer::filled(rect, self.bands, fill);
		extended.copy_from(self);
		extended
	}

	/// Returns a copy restricted to `rect`, which must lie inside this
	/// buffer's coverage.
	pub fn cropped(&self, rect: PixelRect) -> Result<BandBuffer<T>> {
		ensure!(
			self.rect.contains_rect(&rect),
			"crop rect {} is not contained in {}",
			rect,
			self.rect
		);
		let mut cropped = BandBuffer::filled(rect, self.bands, self.data[0]);
		cropped.copy_from(self);
		Ok(cropped)
	}
}
