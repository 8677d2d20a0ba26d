//! Raster algebra operations
//!
//! Element-wise math and value reclassification on `Raster<f64>` grids.
//! Nodata (NaN or a declared nodata value) in any input propagates as NaN.

mod band_math;
mod reclassify;

pub use band_math::{add, binary_op, multiply, BinaryOp};
pub use reclassify::{reclassify_assign, reclassify_ranges, RangeEntry};
