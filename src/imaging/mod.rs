//! Image processing: geometry, parameters and the codec capability.
//!
//! | Operation | Where |
//! |---|---|
//! | **Crop box** | [`CropTarget::plan`] (pure geometry) |
//! | **Resize size** | [`calculate_resize_dimensions`] (pure) |
//! | **Decode / encode / resample** | [`ImageCodec`], implemented by [`RustCodec`] |
//!
//! The module is split into:
//! - **Calculations** and **Crop**: pure functions for dimension math (unit testable)
//! - **Parameters**: data structures describing image operations
//! - **Codec**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Formats**: mime type ↔ `image::ImageFormat` table

mod calculations;
pub mod codec;
pub mod crop;
pub mod formats;
mod params;
pub mod rust_codec;

pub use calculations::calculate_resize_dimensions;
pub use codec::{CodecError, Dimensions, ImageCodec};
pub use crop::{COVERAGE, CropBox, CropTarget, InvalidDimensionError, Orientation};
pub use params::{Quality, Region};
pub use rust_codec::RustCodec;
