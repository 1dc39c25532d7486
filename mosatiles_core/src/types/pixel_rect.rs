//! Integer rectangles in destination pixel space.
//!
//! A `PixelRect` describes an axis-aligned rectangular region of pixels.
//! Coordinates are signed (sources may sit anywhere in pixel space) and the
//! maximum side is inclusive when expressed as `(x_min, y_min, x_max, y_max)`;
//! internally the rect stores `(x_min, y_min, width, height)` where
//! `width = x_max − x_min + 1` and `height = y_max − y_min + 1`.
//!
//! ## Conventions
//! - Y increases downwards (scanline order).
//! - An empty rect has `width == 0` or `height == 0`.
//! - Union ([`PixelRect::include_rect`]) and intersection
//!   ([`PixelRect::intersect_with`]) never fail; they only move edges.
//!
//! ## Common tasks
//! - Build from min+size: [`PixelRect::from_min_and_size`]
//! - Build from min+max:  [`PixelRect::from_min_and_max`]
//! - Empty rect:          [`PixelRect::new_empty`]
//!
//! ## Examples
//! Create a 3×2 rect starting at (−5, 6):
//! ```
//! # use mosatiles_core::PixelRect;
//! let r = PixelRect::from_min_and_size(-5, 6, 3, 2).unwrap();
//! assert_eq!((r.x_min(), r.y_min(), r.x_max(), r.y_max()), (-5, 6, -3, 7));
//! ```

use anyhow::{Result, ensure};

/// An axis-aligned rectangular region of pixels.
///
/// The rect stores the **minimum** pixel coordinates and **dimensions**. The
/// derived maximum coordinates are inclusive. A rect is *empty* when either
/// `width == 0` or `height == 0`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PixelRect {
	/// Minimum x-coordinate.
	x_min: i32,
	/// Minimum y-coordinate.
	y_min: i32,
	/// Width of the rect in pixels.
	width: u32,
	/// Height of the rect in pixels.
	height: u32,
}

impl PixelRect {
	/// Create from minimum pixel and a size.
	///
	/// # Errors
	/// Returns an error if the far edge would overflow the signed coordinate
	/// range.
	///
	/// # Example
	/// ```
	/// # use mosatiles_core::PixelRect;
	/// let r = PixelRect::from_min_and_size(2, 1, 2, 2).unwrap();
	/// assert_eq!((r.x_min(), r.y_min(), r.x_max(), r.y_max()), (2, 1, 3, 2));
	/// ```
	pub fn from_min_and_size(x_min: i32, y_min: i32, width: u32, height: u32) -> Result<PixelRect> {
		// The exclusive far edge must itself be representable, so the maximum
		// coordinate i32::MAX is excluded.
		ensure!(
			i64::from(x_min) + i64::from(width) <= i64::from(i32::MAX),
			"x_min ({x_min}) + width ({width}) must fit the coordinate range"
		);
		ensure!(
			i64::from(y_min) + i64::from(height) <= i64::from(i32::MAX),
			"y_min ({y_min}) + height ({height}) must fit the coordinate range"
		);

		Ok(PixelRect {
			x_min,
			y_min,
			width,
			height,
		})
	}

	/// Create from inclusive minimum and maximum pixel coordinates.
	///
	/// # Errors
	/// Returns an error if `x_min > x_max` or `y_min > y_max`.
	///
	/// # Example
	/// ```
	/// # use mosatiles_core::PixelRect;
	/// let r = PixelRect::from_min_and_max(-2, 1, 0, 2).unwrap();
	/// assert_eq!(r.width(), 3);  // 0 − (−2) + 1
	/// assert_eq!(r.height(), 2); // 2 − 1 + 1
	/// ```
	pub fn from_min_and_max(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Result<PixelRect> {
		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");

		Self::from_min_and_size(
			x_min,
			y_min,
			(i64::from(x_max) - i64::from(x_min) + 1) as u32,
			(i64::from(y_max) - i64::from(y_min) + 1) as u32,
		)
	}

	/// Creates an empty `PixelRect` at the origin.
	///
	/// An empty rect has `width == 0` and `height == 0` and covers no pixels.
	///
	/// # Example
	/// ```
	/// # use mosatiles_core::PixelRect;
	/// assert!(PixelRect::new_empty().is_empty());
	/// ```
	#[must_use]
	pub fn new_empty() -> PixelRect {
		PixelRect {
			x_min: 0,
			y_min: 0,
			width: 0,
			height: 0,
		}
	}

	/// Width of the rect in pixels.
	#[must_use]
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height of the rect in pixels.
	#[must_use]
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Minimum x (column) coordinate.
	#[must_use]
	#[inline]
	pub fn x_min(&self) -> i32 {
		self.x_min
	}

	/// Minimum y (row) coordinate.
	#[must_use]
	#[inline]
	pub fn y_min(&self) -> i32 {
		self.y_min
	}

	/// Maximum x-coordinate (inclusive). One less than `x_min` for an empty rect.
	#[must_use]
	#[inline]
	pub fn x_max(&self) -> i32 {
		(i64::from(self.x_min) + i64::from(self.width) - 1) as i32
	}

	/// Maximum y-coordinate (inclusive). One less than `y_min` for an empty rect.
	#[must_use]
	#[inline]
	pub fn y_max(&self) -> i32 {
		(i64::from(self.y_min) + i64::from(self.height) - 1) as i32
	}

	/// Returns whether the rect is empty.
	///
	/// # Example
	/// ```
	/// # use mosatiles_core::PixelRect;
	/// assert!(PixelRect::new_empty().is_empty());
	/// assert!(!PixelRect::from_min_and_size(0, 0, 1, 1).unwrap().is_empty());
	/// ```
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Total number of pixels covered by this rect.
	#[must_use]
	pub fn count_pixels(&self) -> u64 {
		u64::from(self.width) * u64::from(self.height)
	}

	/// Checks whether the rect contains the pixel `(x, y)`.
	#[must_use]
	pub fn contains(&self, x: i32, y: i32) -> bool {
		!self.is_empty() && x >= self.x_min && x <= self.x_max() && y >= self.y_min && y <= self.y_max()
	}

	/// Returns whether this rect completely contains another rect.
	///
	/// Empty rects never contain anything and are contained by everything
	/// non-empty.
	#[must_use]
	pub fn contains_rect(&self, rect: &PixelRect) -> bool {
		if self.is_empty() {
			return false;
		}
		if rect.is_empty() {
			return true;
		}
		self.x_min <= rect.x_min && self.x_max() >= rect.x_max() && self.y_min <= rect.y_min && self.y_max() >= rect.y_max()
	}

	/// Checks whether two rects overlap in at least one pixel.
	///
	/// # Example
	/// ```
	/// # use mosatiles_core::PixelRect;
	/// let a = PixelRect::from_min_and_max(0, 0, 4, 4).unwrap();
	/// let b = PixelRect::from_min_and_max(4, 2, 8, 3).unwrap();
	/// assert!(a.overlaps(&b));
	/// ```
	#[must_use]
	pub fn overlaps(&self, rect: &PixelRect) -> bool {
		if self.is_empty() || rect.is_empty() {
			return false;
		}
		self.x_min <= rect.x_max() && self.x_max() >= rect.x_min && self.y_min <= rect.y_max() && self.y_max() >= rect.y_min
	}

	/// Expands this rect to include another rect (bounding-box union).
	///
	/// Including an empty rect is a no-op; an empty rect adopts the other.
	///
	/// # Example
	/// ```
	/// # use mosatiles_core::PixelRect;
	/// let mut a = PixelRect::from_min_and_max(4, 4, 6, 6).unwrap();
	/// a.include_rect(&PixelRect::from_min_and_max(2, 5, 8, 7).unwrap());
	/// assert_eq!(a.as_array(), [2, 4, 8, 7]);
	/// ```
	pub fn include_rect(&mut self, rect: &PixelRect) {
		if rect.is_empty() {
			return;
		}
		if self.is_empty() {
			*self = *rect;
			return;
		}
		let x_min = self.x_min.min(rect.x_min);
		let y_min = self.y_min.min(rect.y_min);
		let x_max = self.x_max().max(rect.x_max());
		let y_max = self.y_max().max(rect.y_max());
		*self = PixelRect {
			x_min,
			y_min,
			width: (i64::from(x_max) - i64::from(x_min) + 1) as u32,
			height: (i64::from(y_max) - i64::from(y_min) + 1) as u32,
		};
	}

	/// Shrinks this rect to the overlap with another rect.
	///
	/// The result is empty if the rects do not overlap.
	///
	/// # Example
	/// ```
	/// # use mosatiles_core::PixelRect;
	/// let mut a = PixelRect::from_min_and_max(0, 0, 10, 10).unwrap();
	/// a.intersect_with(&PixelRect::from_min_and_max(5, 5, 15, 15).unwrap());
	/// assert_eq!(a.as_array(), [5, 5, 10, 10]);
	/// ```
	pub fn intersect_with(&mut self, rect: &PixelRect) {
		if self.is_empty() || rect.is_empty() {
			*self = PixelRect::new_empty();
			return;
		}

		let x_min = self.x_min.max(rect.x_min);
		let y_min = self.y_min.max(rect.y_min);
		let x_max = self.x_max().min(rect.x_max());
		let y_max = self.y_max().min(rect.y_max());

		if x_min > x_max || y_min > y_max {
			*self = PixelRect::new_empty();
		} else {
			*self = PixelRect {
				x_min,
				y_min,
				width: (i64::from(x_max) - i64::from(x_min) + 1) as u32,
				height: (i64::from(y_max) - i64::from(y_min) + 1) as u32,
			};
		}
	}

	/// Returns the overlap of two rects as a copy.
	#[must_use]
	pub fn intersected(&self, rect: &PixelRect) -> PixelRect {
		let mut c = *self;
		c.intersect_with(rect);
		c
	}

	/// Returns the rect as an array `[x_min, y_min, x_max, y_max]`.
	/// Useful for assertions and equality checks.
	#[must_use]
	pub fn as_array(&self) -> [i32; 4] {
		[self.x_min, self.y_min, self.x_max(), self.y_max()]
	}

	/// Iterator over the absolute x-coordinates of the rect's columns.
	pub fn x_range(&self) -> std::ops::Range<i32> {
		self.x_min..(i64::from(self.x_min) + i64::from(self.width)) as i32
	}

	/// Iterator over the absolute y-coordinates of the rect's rows.
	pub fn y_range(&self) -> std::ops::Range<i32> {
		self.y_min..(i64::from(self.y_min) + i64::from(self.height)) as i32
	}
}

impl std::fmt::Display for PixelRect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"[{},{} {}x{}]",
			self.x_min, self.y_min, self.width, self.height
		)
	}
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn pr(x0: i32, y0: i32, x1: i32, y1: i32) -> PixelRect {
		PixelRect::from_min_and_max(x0, y0, x1, y1).unwrap()
	}

	// ------------------------------ constructors ------------------------------
	#[rstest]
	#[case((0, 0, 1, 1))]
	#[case((-5, 6, 3, 2))]
	#[case((i32::MIN, i32::MIN, 16, 16))]
	fn from_min_and_size_valid(#[case] args: (i32, i32, u32, u32)) -> Result<()> {
		let (x0, y0, w, h) = args;
		let r = PixelRect::from_min_and_size(x0, y0, w, h)?;
		assert_eq!(r.x_min(), x0);
		assert_eq!(r.y_min(), y0);
		assert_eq!(r.width(), w);
		assert_eq!(r.height(), h);
		assert_eq!(i64::from(r.x_max()), i64::from(x0) + i64::from(w) - 1);
		assert_eq!(i64::from(r.y_max()), i64::from(y0) + i64::from(h) - 1);
		Ok(())
	}

	#[rstest]
	#[case((i32::MAX, 0, 2, 1))] // x overflow
	#[case((0, i32::MAX - 2, 1, 4))] // y overflow
	fn from_min_and_size_invalid(#[case] args: (i32, i32, u32, u32)) {
		let (x0, y0, w, h) = args;
		assert!(PixelRect::from_min_and_size(x0, y0, w, h).is_err());
	}

	#[rstest]
	#[case((0, 0, 0, 0), 1, 1)]
	#[case((-2, 1, 0, 2), 3, 2)]
	fn from_min_and_max_valid(#[case] args: (i32, i32, i32, i32), #[case] w: u32, #[case] h: u32) -> Result<()> {
		let (x0, y0, x1, y1) = args;
		let r = PixelRect::from_min_and_max(x0, y0, x1, y1)?;
		assert_eq!(r.width(), w);
		assert_eq!(r.height(), h);
		assert_eq!(r.as_array(), [x0, y0, x1, y1]);
		Ok(())
	}

	#[rstest]
	#[case((1, 0, 0, 0))] // x_min > x_max
	#[case((0, 3, 0, 2))] // y_min > y_max
	fn from_min_and_max_invalid(#[case] args: (i32, i32, i32, i32)) {
		let (x0, y0, x1, y1) = args;
		assert!(PixelRect::from_min_and_max(x0, y0, x1, y1).is_err());
	}

	#[test]
	fn empty_rect_properties() {
		let e = PixelRect::new_empty();
		assert!(e.is_empty());
		assert_eq!(e.count_pixels(), 0);
		assert!(!e.contains(0, 0));
	}

	// ------------------------------ queries ------------------------------
	#[test]
	fn contains_and_overlaps() {
		let a = pr(0, 0, 4, 4);
		assert!(a.contains(0, 0));
		assert!(a.contains(4, 4));
		assert!(!a.contains(5, 0));
		assert!(!a.contains(0, -1));

		assert!(a.overlaps(&pr(4, 2, 8, 3))); // edge contact counts
		assert!(!a.overlaps(&pr(5, 5, 8, 8)));
		assert!(!a.overlaps(&PixelRect::new_empty()));
	}

	#[test]
	fn contains_rect_cases() {
		let outer = pr(0, 0, 10, 10);
		assert!(outer.contains_rect(&pr(2, 2, 8, 8)));
		assert!(outer.contains_rect(&outer));
		assert!(!outer.contains_rect(&pr(2, 2, 11, 8)));
		assert!(outer.contains_rect(&PixelRect::new_empty()));
		assert!(!PixelRect::new_empty().contains_rect(&outer));
	}

	#[test]
	fn count_pixels_matches_dimensions() {
		assert_eq!(pr(-1, -1, 1, 0).count_pixels(), 6); // 3x2
	}

	// ------------------------------ union / intersection ------------------------------
	#[test]
	fn include_rect_merges_and_handles_empty() {
		let mut a = pr(4, 4, 6, 6);
		a.include_rect(&pr(2, 5, 8, 7));
		assert_eq!(a.as_array(), [2, 4, 8, 7]);

		a.include_rect(&PixelRect::new_empty()); // no change
		assert_eq!(a.as_array(), [2, 4, 8, 7]);

		let mut e = PixelRect::new_empty();
		e.include_rect(&a); // adopt
		assert_eq!(e, a);
	}

	#[rstest]
	#[case(pr(0, 0, 10, 10), pr(5, 5, 15, 15), Some([5, 5, 10, 10]))] // partial overlap
	#[case(pr(0, 0, 4, 4), pr(5, 5, 8, 8), None)] // disjoint
	#[case(pr(-3, -3, 3, 3), pr(-3, -3, 3, 3), Some([-3, -3, 3, 3]))] // identical
	fn intersect_cases(#[case] mut a: PixelRect, #[case] b: PixelRect, #[case] expected: Option<[i32; 4]>) {
		a.intersect_with(&b);
		match expected {
			Some(arr) => assert_eq!(a.as_array(), arr),
			None => assert!(a.is_empty()),
		}
	}

	#[test]
	fn intersected_is_pure() {
		let a = pr(0, 0, 10, 10);
		let c = a.intersected(&pr(8, 8, 12, 12));
		assert_eq!(c.as_array(), [8, 8, 10, 10]);
		assert_eq!(a, pr(0, 0, 10, 10));
	}

	// ------------------------------ ranges / display ------------------------------
	#[test]
	fn coordinate_ranges_are_absolute() {
		let r = pr(-2, 3, 0, 4);
		assert_eq!(r.x_range().collect::<Vec<_>>(), [-2, -1, 0]);
		assert_eq!(r.y_range().collect::<Vec<_>>(), [3, 4]);
	}

	#[test]
	fn display_format() {
		assert_eq!(format!("{}", pr(-5, 6, -3, 7)), "[-5,6 3x2]");
	}

	use anyhow::Result;
}
