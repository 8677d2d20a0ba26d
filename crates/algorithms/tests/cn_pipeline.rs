//! End-to-end pipeline tests over real files on disk

use runoffcn_algorithms::curve_number::{
    run_pipeline, PipelineConfig, AG_RECLASS_FILE, CN_UNIQUE_FILE, CN_VALUES_FILE,
    LAND_COVER_RECLASS_FILE, LAND_COVER_WITH_AG_FILE,
};
use runoffcn_core::io::{read_geotiff, write_geotiff};
use runoffcn_core::{GeoTransform, Raster};
use std::path::Path;

fn write_input(dir: &Path, name: &str, values: Vec<f64>, rows: usize, cols: usize) {
    let mut raster = Raster::from_vec(values, rows, cols).unwrap();
    raster.set_transform(GeoTransform::new(682_000.0, 4_625_000.0, 30.0, -30.0));
    write_geotiff(&raster, dir.join(name), None).unwrap();
}

fn seed_inputs(dir: &Path, config: &PipelineConfig) {
    // 3x2 scene exercising every simplified class at least once
    write_input(
        dir,
        &config.land_cover,
        vec![2.0, 1.0, 4.0, 5.0, 2.0, 3.0],
        3,
        2,
    );
    write_input(
        dir,
        &config.agriculture,
        vec![10.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        3,
        2,
    );
    write_input(
        dir,
        &config.soil_group,
        vec![100.0, 1.0, 1000.0, 100.0, 10.0, 10.0],
        3,
        2,
    );
}

#[test]
fn pipeline_produces_expected_curve_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());
    seed_inputs(dir.path(), &config);

    let outputs = run_pipeline(&config).unwrap();

    for file in [
        AG_RECLASS_FILE,
        LAND_COVER_WITH_AG_FILE,
        LAND_COVER_RECLASS_FILE,
        CN_UNIQUE_FILE,
        CN_VALUES_FILE,
    ] {
        assert!(dir.path().join(file).exists(), "missing output {}", file);
    }

    let cn: Raster<f64> = read_geotiff(&outputs.cn_values, None).unwrap();
    // grass/shrub + agriculture on C soils: 2+10=12 -> 5, x100 -> 83
    assert_eq!(cn.get(0, 0).unwrap(), 83.0);
    // tree canopy on A soils: 3 -> 30
    assert_eq!(cn.get(0, 1).unwrap(), 30.0);
    // water on D soils: 1000 -> 100
    assert_eq!(cn.get(1, 0).unwrap(), 100.0);
    // buildings on C soils: 2 -> 200 -> 98
    assert_eq!(cn.get(1, 1).unwrap(), 98.0);
    // grass/shrub on B soils: 4 -> 40 -> 61
    assert_eq!(cn.get(2, 0).unwrap(), 61.0);
    // bare soil on B soils: 2 -> 20 -> 98
    assert_eq!(cn.get(2, 1).unwrap(), 98.0);

    // Output grid keeps the input georeferencing
    let lc: Raster<f64> = read_geotiff(dir.path().join(&config.land_cover), None).unwrap();
    assert_eq!(cn.transform(), lc.transform());
}

#[test]
fn pipeline_is_deterministic_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());
    seed_inputs(dir.path(), &config);

    run_pipeline(&config).unwrap();
    let first: Vec<Vec<u8>> = output_bytes(dir.path());

    // Second run overwrites every output in place
    run_pipeline(&config).unwrap();
    let second: Vec<Vec<u8>> = output_bytes(dir.path());

    assert_eq!(first, second);
}

fn output_bytes(dir: &Path) -> Vec<Vec<u8>> {
    [
        AG_RECLASS_FILE,
        LAND_COVER_WITH_AG_FILE,
        LAND_COVER_RECLASS_FILE,
        CN_UNIQUE_FILE,
        CN_VALUES_FILE,
    ]
    .iter()
    .map(|file| std::fs::read(dir.join(file)).unwrap())
    .collect()
}

#[test]
fn pipeline_honors_custom_input_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        work_dir: dir.path().to_path_buf(),
        land_cover: "cover.tif".to_string(),
        agriculture: "ag.tif".to_string(),
        soil_group: "soils.tif".to_string(),
    };

    write_input(dir.path(), "cover.tif", vec![4.0], 1, 1);
    write_input(dir.path(), "ag.tif", vec![0.0], 1, 1);
    write_input(dir.path(), "soils.tif", vec![10.0], 1, 1);

    let outputs = run_pipeline(&config).unwrap();
    let cn: Raster<f64> = read_geotiff(&outputs.cn_values, None).unwrap();
    // water on B soils: 1 x 10 = 10 -> 100
    assert_eq!(cn.get(0, 0).unwrap(), 100.0);
}

#[test]
fn pipeline_fails_on_misaligned_grids() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());

    write_input(dir.path(), &config.land_cover, vec![1.0, 2.0], 1, 2);
    write_input(dir.path(), &config.agriculture, vec![0.0], 1, 1);
    write_input(dir.path(), &config.soil_group, vec![1.0, 1.0], 1, 2);

    assert!(run_pipeline(&config).is_err());
}
