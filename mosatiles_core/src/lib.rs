//! Foundation types for the mosatiles raster compositing engine.
//!
//! This crate provides the pixel-space building blocks that the mosaic engine
//! in `mosatiles_mosaic` is written against:
//!
//! - [`PixelRect`] — integer rectangles with union/intersection algebra.
//! - [`SampleFormat`] and the [`Sample`] trait — the six supported numeric
//!   sample types (`u8`, `u16`, `i16`, `i32`, `f32`, `f64`) together with
//!   their saturating conversions.
//! - [`BandBuffer`] and [`Raster`] — typed band-major scanline buffers and
//!   their type-erased carrier.
//! - [`ValueRange`] and [`NoData`] — value-range predicates used as no-data
//!   tests.
//! - [`BorderFill`] — fill policies for border-extended buffers.
//! - [`RasterReader`] — the host-facing source abstraction, with
//!   [`MemoryRaster`] as the built-in in-memory implementation.

pub mod reader;
pub mod types;

pub use reader::*;
pub use types::*;
