//! # runoffcn algorithms
//!
//! Raster algebra and the SCS Curve Number recipe.
//!
//! - **algebra**: reclassification (assign and range mode) and element-wise
//!   binary raster math
//! - **curve_number**: the SCS CN lookup tables and the five-step file-based
//!   pipeline that derives a Curve Number raster from land cover,
//!   agriculture, and hydrologic soil group inputs

pub mod algebra;
pub mod curve_number;
pub(crate) mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algebra::{
        add, binary_op, multiply, reclassify_assign, reclassify_ranges, BinaryOp, RangeEntry,
    };
    pub use crate::curve_number::{
        composite_code, curve_number, run_pipeline, CoverClass, PipelineConfig, PipelineOutputs,
        SoilGroup,
    };
    pub use runoffcn_core::prelude::*;
}
