//! SCS Curve Number derivation
//!
//! The Curve Number (CN) is a dimensionless SCS/NRCS index (1-100) of runoff
//! potential, determined by land cover and hydrologic soil group (HSG). This
//! module carries the literal lookup tables of the standard recipe and the
//! five-step pipeline that applies them:
//!
//! 1. normalize the agriculture mask (assign reclass)
//! 2. overlay agriculture onto land cover (cell-wise add)
//! 3. simplify land cover into five classes (assign reclass)
//! 4. combine with soil groups (cell-wise multiply)
//! 5. look up the final Curve Number (assign reclass)
//!
//! HSG codes are powers of ten (A=1, B=10, C=100, D=1000) so that step 4's
//! product is a unique composite code per (cover, soil) pair.

mod pipeline;
mod tables;

pub use pipeline::{
    run_pipeline, PipelineConfig, PipelineOutputs, AG_RECLASS_FILE, CN_UNIQUE_FILE, CN_VALUES_FILE,
    DEFAULT_AGRICULTURE, DEFAULT_LAND_COVER, DEFAULT_SOIL_GROUP, LAND_COVER_RECLASS_FILE,
    LAND_COVER_WITH_AG_FILE,
};
pub use tables::{
    composite_code, curve_number, CoverClass, SoilGroup, AG_NORMALIZE, CN_LOOKUP,
    LAND_COVER_SIMPLIFY,
};
