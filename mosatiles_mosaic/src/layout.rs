//! Destination layout derivation.
//!
//! Before any tile is composed, the planner validates that all sources are
//! compatible (one sample format, one band count, matching alpha and no-data
//! formats) and derives the destination layout: the bounding-box union of all
//! source bounds, or the caller's hint where one is given. All failures
//! surface here, at construction time — the tile loop itself never validates.

use anyhow::{Result, ensure};
use mosatiles_core::{PixelRect, SampleFormat};

use crate::SourceDescriptor;

/// Optional overrides for the derived destination layout.
///
/// The rect is honored whenever it is non-empty. Format and band count are
/// honored only when they agree with what the sources dictate; with no
/// sources they are mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutHint {
	pub rect: Option<PixelRect>,
	pub format: Option<SampleFormat>,
	pub band_count: Option<usize>,
}

/// The derived destination layout of a mosaic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicLayout {
	/// Destination rectangle (union of source bounds unless hinted).
	pub rect: PixelRect,
	/// Destination sample format, shared with every source.
	pub format: SampleFormat,
	/// Destination band count, shared with every source.
	pub band_count: usize,
}

/// Validates the sources and derives the destination layout.
pub fn derive_layout(sources: &[SourceDescriptor], hint: Option<&LayoutHint>) -> Result<MosaicLayout> {
	let (format, band_count) = match sources.first() {
		Some(first) => {
			let format = first.image().format();
			let band_count = first.image().band_count();
			ensure!(band_count >= 1, "source 0 must have at least one band");

			for (index, source) in sources.iter().enumerate() {
				let image = source.image();
				ensure!(
					image.format() == format,
					"source {index} has sample format {}, but source 0 has {format}",
					image.format()
				);
				ensure!(
					image.band_count() == band_count,
					"source {index} has {} bands, but source 0 has {band_count}",
					image.band_count()
				);

				if let Some(alpha) = source.alpha() {
					ensure!(
						alpha.band_count() == 1,
						"alpha image of source {index} must be single-band, it has {} bands",
						alpha.band_count()
					);
					ensure!(
						alpha.format() == format,
						"alpha image of source {index} must have sample format {format}, it has {}",
						alpha.format()
					);
				}

				if let Some(nodata) = source.nodata() {
					ensure!(
						nodata.format() == format,
						"no-data range of source {index} has element type {}, but the source has {format}",
						nodata.format()
					);
				}
			}

			resolve_hinted(format, band_count, hint)
		}
		None => {
			let hint = hint.copied().unwrap_or_default();
			let complete = hint.rect.is_some_and(|r| !r.is_empty()) && hint.format.is_some() && hint.band_count.is_some();
			ensure!(
				complete,
				"a mosaic without sources requires a layout hint with rectangle, sample format and band count"
			);
			ensure!(
				hint.band_count.unwrap() >= 1,
				"the layout hint must specify at least one band"
			);
			(hint.format.unwrap(), hint.band_count.unwrap())
		}
	};

	let rect = match hint.and_then(|h| h.rect).filter(|r| !r.is_empty()) {
		Some(rect) => rect,
		None => {
			let mut union = PixelRect::new_empty();
			for source in sources {
				union.include_rect(&source.image().bounds());
			}
			union
		}
	};
	ensure!(!rect.is_empty(), "the derived destination rectangle is empty");

	Ok(MosaicLayout {
		rect,
		format,
		band_count,
	})
}

/// Keeps the hinted format/band count only if compatible with the sources.
fn resolve_hinted(format: SampleFormat, band_count: usize, hint: Option<&LayoutHint>) -> (SampleFormat, usize) {
	if let Some(hint) = hint {
		if let Some(hinted) = hint.format
			&& hinted != format
		{
			log::debug!("layout hint format {hinted} is incompatible, using {format}");
		}
		if let Some(hinted) = hint.band_count
			&& hinted != band_count
		{
			log::debug!("layout hint band count {hinted} is incompatible, using {band_count}");
		}
	}
	(format, band_count)
}
