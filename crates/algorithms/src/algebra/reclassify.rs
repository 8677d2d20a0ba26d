//! Raster reclassification
//!
//! Two modes, mirroring the classic GIS reclass tool:
//!
//! - **assign mode**: exact value matching against a flat `(new, old)` table.
//!   This is how class-code rasters (land cover, soil groups, CN lookup) are
//!   remapped.
//! - **range mode**: `(new, min, max)` entries with `min <= v < max`.
//!
//! In both modes cells matching no table entry pass through unchanged, and
//! nodata cells stay nodata. Table exhaustiveness is the caller's
//! responsibility; nothing validates coverage of the input value domain.

use crate::maybe_rayon::*;
use ndarray::Array2;
use runoffcn_core::raster::Raster;
use runoffcn_core::{Error, Result};

/// A range-mode reclassification entry
#[derive(Debug, Clone, Copy)]
pub struct RangeEntry {
    /// Output value for this class
    pub new: f64,
    /// Minimum value (inclusive)
    pub min: f64,
    /// Maximum value (exclusive)
    pub max: f64,
}

impl RangeEntry {
    pub fn new(new: f64, min: f64, max: f64) -> Self {
        Self { new, min, max }
    }
}

/// Reclassify by exact value matching.
///
/// `table` is an ordered sequence of `(new_value, old_value)` pairs; the
/// first pair whose `old_value` equals the cell value wins. Cell values are
/// class codes stored as floats, so equality is tested within `f64::EPSILON`.
pub fn reclassify_assign(raster: &Raster<f64>, table: &[(f64, f64)]) -> Result<Raster<f64>> {
    reclassify_with(raster, |val| {
        table
            .iter()
            .find(|(_, old)| (val - old).abs() < f64::EPSILON)
            .map(|(new, _)| *new)
    })
}

/// Reclassify by value ranges (`min <= v < max`).
pub fn reclassify_ranges(raster: &Raster<f64>, table: &[RangeEntry]) -> Result<Raster<f64>> {
    reclassify_with(raster, |val| {
        table
            .iter()
            .find(|entry| val >= entry.min && val < entry.max)
            .map(|entry| entry.new)
    })
}

/// Shared driver: apply a per-cell remapping, passing unmatched values through.
fn reclassify_with<F>(raster: &Raster<f64>, remap: F) -> Result<Raster<f64>>
where
    F: Fn(f64) -> Option<f64> + Sync + Send,
{
    let (rows, cols) = raster.shape();
    let nodata = raster.nodata();

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            for col in 0..cols {
                let val = unsafe { raster.get_unchecked(row, col) };

                if val.is_nan() {
                    continue;
                }
                if let Some(nd) = nodata {
                    if (val - nd).abs() < f64::EPSILON {
                        continue;
                    }
                }

                row_data[col] = remap(val).unwrap_or(val);
            }
            row_data
        })
        .collect();

    let mut output = raster.with_same_meta::<f64>(rows, cols);
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}
