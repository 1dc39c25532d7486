//! Contains types like pixel rectangles, sample formats, band buffers, value ranges and more.

mod band_buffer;
pub use band_buffer::*;

mod border_fill;
pub use border_fill::*;

mod pixel_rect;
pub use pixel_rect::*;

mod raster;
pub use raster::*;

mod sample;
pub use sample::*;

mod sample_format;
pub use sample_format::*;

mod value_range;
pub use value_range::*;
