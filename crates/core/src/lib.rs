//! # runoffcn core
//!
//! Raster types and GeoTIFF I/O for the runoffcn Curve Number toolkit.
//!
//! This crate provides:
//! - [`Raster`]: generic georeferenced grid type
//! - [`GeoTransform`]: affine transformation for georeferencing
//! - [`CRS`]: coordinate reference system record
//! - [`io`]: GeoTIFF reading and writing (native `tiff` backend by default,
//!   GDAL behind the `gdal` feature)

pub mod crs;
pub mod error;
pub mod io;
pub mod raster;

pub use crs::CRS;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
}
