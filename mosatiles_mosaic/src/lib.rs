//! The mosatiles mosaic engine.
//!
//! Combines *multiple* aligned raster sources into one destination raster,
//! tile by tile. Each source may carry a single-band alpha mask, a
//! region-of-interest mask and a no-data value range; at every destination
//! pixel the engine applies these validity predicates and either takes the
//! first accepted source ([`MosaicMode::Overlay`]) or the weighted mean of
//! all contributing sources ([`MosaicMode::Blend`]).
//!
//! ### Usage
//! Build a [`MosaicPlan`] once from ordered [`SourceDescriptor`]s, then call
//! [`MosaicPlan::compose_tile`] for every destination rectangle — in
//! parallel if desired; the plan is immutable and the tile computation shares
//! no mutable state.
//!
//! ```
//! # use std::sync::Arc;
//! # use mosatiles_core::{BandBuffer, MemoryRaster, PixelRect, Raster};
//! # use mosatiles_mosaic::{MosaicMode, MosaicPlan, SourceDescriptor};
//! let rect = PixelRect::from_min_and_size(0, 0, 2, 2).unwrap();
//! let buffer = BandBuffer::from_vec(rect, 1, vec![10u8, 20, 30, 40]).unwrap();
//! let source = SourceDescriptor::new(Arc::new(MemoryRaster::new(Raster::from(buffer)).unwrap()));
//!
//! let plan = MosaicPlan::new(MosaicMode::Overlay, vec![source], &[0.0], None).unwrap();
//! let tile = plan.compose_tile(rect).unwrap();
//! assert_eq!(tile.get_f64(1, 1, 0), 40.0);
//! ```

mod compose;
mod descriptor;
mod layout;
mod nodata_lut;
mod plan;
mod roi;

pub use descriptor::*;
pub use layout::*;
pub use nodata_lut::*;
pub use plan::*;
pub use roi::*;
