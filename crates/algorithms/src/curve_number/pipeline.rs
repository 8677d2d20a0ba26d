//! The five-step Curve Number pipeline
//!
//! File-based and fully sequential: each step reads its inputs from the
//! working directory, computes, and materializes its output on disk before
//! the next step runs. Intermediate rasters are part of the deliverable and
//! overwrite any prior run. Any step failure aborts the rest and surfaces
//! the underlying error unmodified.

use std::path::{Path, PathBuf};

use runoffcn_core::io::{read_geotiff, write_geotiff};
use runoffcn_core::{Raster, Result};
use tracing::info;

use crate::algebra::{add, multiply, reclassify_assign};
use crate::curve_number::tables::{AG_NORMALIZE, CN_LOOKUP, LAND_COVER_SIMPLIFY};

/// Default input file names (the original New Haven dataset)
pub const DEFAULT_LAND_COVER: &str = "newHavenLCSimple.tif";
pub const DEFAULT_AGRICULTURE: &str = "nhAg.tif";
pub const DEFAULT_SOIL_GROUP: &str = "nhHSG_image.tif";

/// Step output file names, fixed across runs
pub const AG_RECLASS_FILE: &str = "01_agReclass.tif";
pub const LAND_COVER_WITH_AG_FILE: &str = "02_landCoverwithAg.tif";
pub const LAND_COVER_RECLASS_FILE: &str = "landCoverReclass.tif";
pub const CN_UNIQUE_FILE: &str = "CnUnique.tif";
pub const CN_VALUES_FILE: &str = "CnValues.tif";

/// Pipeline configuration: a working directory plus the three input names
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the inputs; all outputs are written here too
    pub work_dir: PathBuf,
    /// Land cover raster (class codes 1-8)
    pub land_cover: String,
    /// Agriculture mask raster (values {0, 10})
    pub agriculture: String,
    /// Hydrologic soil group raster (codes {1, 10, 100, 1000})
    pub soil_group: String,
}

impl PipelineConfig {
    /// Configuration with the default input names
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            land_cover: DEFAULT_LAND_COVER.to_string(),
            agriculture: DEFAULT_AGRICULTURE.to_string(),
            soil_group: DEFAULT_SOIL_GROUP.to_string(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }
}

/// Paths of the five rasters a pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub ag_reclass: PathBuf,
    pub land_cover_with_ag: PathBuf,
    pub land_cover_reclass: PathBuf,
    pub cn_unique: PathBuf,
    pub cn_values: PathBuf,
}

/// Run the full Curve Number pipeline.
///
/// Returns the paths of all five outputs; `cn_values` is the final Curve
/// Number raster.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutputs> {
    let outputs = PipelineOutputs {
        ag_reclass: config.path(AG_RECLASS_FILE),
        land_cover_with_ag: config.path(LAND_COVER_WITH_AG_FILE),
        land_cover_reclass: config.path(LAND_COVER_RECLASS_FILE),
        cn_unique: config.path(CN_UNIQUE_FILE),
        cn_values: config.path(CN_VALUES_FILE),
    };

    info!("step 1/5: normalizing agriculture mask");
    reclass_step(
        &config.path(&config.agriculture),
        &outputs.ag_reclass,
        &AG_NORMALIZE,
    )?;

    info!("step 2/5: overlaying agriculture onto land cover");
    add_step(
        &outputs.ag_reclass,
        &config.path(&config.land_cover),
        &outputs.land_cover_with_ag,
    )?;

    info!("step 3/5: simplifying land cover classes");
    reclass_step(
        &outputs.land_cover_with_ag,
        &outputs.land_cover_reclass,
        &LAND_COVER_SIMPLIFY,
    )?;

    info!("step 4/5: combining land cover with soil groups");
    multiply_step(
        &outputs.land_cover_reclass,
        &config.path(&config.soil_group),
        &outputs.cn_unique,
    )?;

    info!("step 5/5: assigning curve numbers");
    reclass_step(&outputs.cn_unique, &outputs.cn_values, &CN_LOOKUP)?;

    Ok(outputs)
}

fn reclass_step(input: &Path, output: &Path, table: &[(f64, f64)]) -> Result<()> {
    let raster: Raster<f64> = read_geotiff(input, None)?;
    let result = reclassify_assign(&raster, table)?;
    write_geotiff(&result, output, None)
}

// Operand order matters for output metadata and is kept as in the recipe.

fn add_step(input1: &Path, input2: &Path, output: &Path) -> Result<()> {
    let a: Raster<f64> = read_geotiff(input1, None)?;
    let b: Raster<f64> = read_geotiff(input2, None)?;
    let result = add(&a, &b)?;
    write_geotiff(&result, output, None)
}

fn multiply_step(input1: &Path, input2: &Path, output: &Path) -> Result<()> {
    let a: Raster<f64> = read_geotiff(input1, None)?;
    let b: Raster<f64> = read_geotiff(input2, None)?;
    let result = multiply(&a, &b)?;
    write_geotiff(&result, output, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runoffcn_core::GeoTransform;

    fn write_input(dir: &Path, name: &str, values: Vec<f64>, rows: usize, cols: usize) {
        let mut raster = Raster::from_vec(values, rows, cols).unwrap();
        raster.set_transform(GeoTransform::new(682_000.0, 4_625_000.0, 30.0, -30.0));
        write_geotiff(&raster, dir.join(name), None).unwrap();
    }

    fn read_output(path: &Path) -> Raster<f64> {
        read_geotiff(path, None).unwrap()
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path());

        // (land cover, agriculture, soil group) per cell:
        // grass/shrub + ag on C soils, canopy on A, water on D, bare soil on B
        write_input(
            dir.path(),
            DEFAULT_LAND_COVER,
            vec![2.0, 1.0, 4.0, 3.0],
            2,
            2,
        );
        write_input(
            dir.path(),
            DEFAULT_AGRICULTURE,
            vec![10.0, 0.0, 0.0, 0.0],
            2,
            2,
        );
        write_input(
            dir.path(),
            DEFAULT_SOIL_GROUP,
            vec![100.0, 1.0, 1000.0, 10.0],
            2,
            2,
        );

        let outputs = run_pipeline(&config).unwrap();

        let cn = read_output(&outputs.cn_values);
        // ag grass/shrub: 2+10=12 -> 5, x100=500 -> 83
        assert_eq!(cn.get(0, 0).unwrap(), 83.0);
        // canopy: 1 -> 3, x1=3 -> 30
        assert_eq!(cn.get(0, 1).unwrap(), 30.0);
        // water: 4 -> 1, x1000=1000 -> 100
        assert_eq!(cn.get(1, 0).unwrap(), 100.0);
        // bare soil: 3 -> 2, x10=20 -> 98
        assert_eq!(cn.get(1, 1).unwrap(), 98.0);
    }

    #[test]
    fn test_pipeline_intermediates_trace_the_recipe() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path());

        write_input(dir.path(), DEFAULT_LAND_COVER, vec![2.0], 1, 1);
        write_input(dir.path(), DEFAULT_AGRICULTURE, vec![10.0], 1, 1);
        write_input(dir.path(), DEFAULT_SOIL_GROUP, vec![100.0], 1, 1);

        let outputs = run_pipeline(&config).unwrap();

        assert_eq!(read_output(&outputs.ag_reclass).get(0, 0).unwrap(), 10.0);
        assert_eq!(
            read_output(&outputs.land_cover_with_ag).get(0, 0).unwrap(),
            12.0
        );
        assert_eq!(
            read_output(&outputs.land_cover_reclass).get(0, 0).unwrap(),
            5.0
        );
        assert_eq!(read_output(&outputs.cn_unique).get(0, 0).unwrap(), 500.0);
        assert_eq!(read_output(&outputs.cn_values).get(0, 0).unwrap(), 83.0);
    }

    #[test]
    fn test_pipeline_nodata_propagates_to_final_raster() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path());

        write_input(dir.path(), DEFAULT_LAND_COVER, vec![1.0, 1.0], 1, 2);
        write_input(dir.path(), DEFAULT_AGRICULTURE, vec![f64::NAN, 0.0], 1, 2);
        write_input(dir.path(), DEFAULT_SOIL_GROUP, vec![1.0, 1.0], 1, 2);

        let outputs = run_pipeline(&config).unwrap();

        let cn = read_output(&outputs.cn_values);
        assert!(cn.get(0, 0).unwrap().is_nan());
        assert_eq!(cn.get(0, 1).unwrap(), 30.0);
    }

    #[test]
    fn test_pipeline_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path());

        // No inputs on disk: step 1 must fail and nothing gets written.
        let result = run_pipeline(&config);
        assert!(result.is_err());
        assert!(!dir.path().join(AG_RECLASS_FILE).exists());
    }

    #[test]
    fn test_unmapped_road_codes_pass_all_the_way_through() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path());

        write_input(dir.path(), DEFAULT_LAND_COVER, vec![6.0], 1, 1);
        write_input(dir.path(), DEFAULT_AGRICULTURE, vec![0.0], 1, 1);
        write_input(dir.path(), DEFAULT_SOIL_GROUP, vec![1.0], 1, 1);

        let outputs = run_pipeline(&config).unwrap();

        // Roads (6) have no simplification entry: 6 x 1 = 6 is not a
        // composite code, so the CN lookup passes it through as well.
        assert_eq!(read_output(&outputs.cn_values).get(0, 0).unwrap(), 6.0);
    }
}
