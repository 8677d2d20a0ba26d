//! Element-wise binary raster math
//!
//! Cell-wise arithmetic between two rasters of identical shape. The overlay
//! and combine steps of the Curve Number pipeline are `add` and `multiply`.

use crate::maybe_rayon::*;
use ndarray::Array2;
use runoffcn_core::raster::Raster;
use runoffcn_core::{Error, Result};

/// Binary operations for raster math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Apply a binary operation between two rasters element-wise.
///
/// Both rasters must have the same dimensions; the output carries the first
/// raster's geographic metadata. Nodata in either input produces NaN in the
/// output.
pub fn binary_op(a: &Raster<f64>, b: &Raster<f64>, op: BinaryOp) -> Result<Raster<f64>> {
    if a.shape() != b.shape() {
        return Err(Error::SizeMismatch {
            er: a.rows(),
            ec: a.cols(),
            ar: b.rows(),
            ac: b.cols(),
        });
    }

    let (rows, cols) = a.shape();
    let nodata_a = a.nodata();
    let nodata_b = b.nodata();

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            for col in 0..cols {
                let va = unsafe { a.get_unchecked(row, col) };
                let vb = unsafe { b.get_unchecked(row, col) };

                if va.is_nan() || vb.is_nan() {
                    continue;
                }
                if let Some(nd) = nodata_a {
                    if (va - nd).abs() < f64::EPSILON {
                        continue;
                    }
                }
                if let Some(nd) = nodata_b {
                    if (vb - nd).abs() < f64::EPSILON {
                        continue;
                    }
                }

                row_data[col] = match op {
                    BinaryOp::Add => va + vb,
                    BinaryOp::Subtract => va - vb,
                    BinaryOp::Multiply => va * vb,
                    BinaryOp::Divide => {
                        if vb.abs() < 1e-10 {
                            f64::NAN
                        } else {
                            va / vb
                        }
                    }
                };
            }
            row_data
        })
        .collect();

    let mut output = a.with_same_meta::<f64>(rows, cols);
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

/// Cell-wise sum of two rasters
pub fn add(a: &Raster<f64>, b: &Raster<f64>) -> Result<Raster<f64>> {
    binary_op(a, b, BinaryOp::Add)
}

/// Cell-wise product of two rasters
pub fn multiply(a: &Raster<f64>, b: &Raster<f64>) -> Result<Raster<f64>> {
    binary_op(a, b, BinaryOp::Multiply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runoffcn_core::GeoTransform;

    fn make_band(value: f64) -> Raster<f64> {
        let mut r = Raster::filled(4, 4, value);
        r.set_transform(GeoTransform::new(0.0, 4.0, 1.0, -1.0));
        r
    }

    #[test]
    fn test_add() {
        let cover = make_band(2.0);
        let ag = make_band(10.0);

        let result = add(&ag, &cover).unwrap();
        assert_eq!(result.get(1, 1).unwrap(), 12.0);
    }

    #[test]
    fn test_multiply_builds_composite_codes() {
        let cover = make_band(5.0);
        let hsg = make_band(100.0);

        let result = multiply(&cover, &hsg).unwrap();
        assert_eq!(result.get(2, 3).unwrap(), 500.0);
    }

    #[test]
    fn test_divide_by_zero_is_nan() {
        let a = make_band(10.0);
        let b = make_band(0.0);

        let result = binary_op(&a, &b, BinaryOp::Divide).unwrap();
        assert!(result.get(0, 0).unwrap().is_nan());
    }

    #[test]
    fn test_nodata_propagates() {
        let mut a = make_band(3.0);
        a.set(2, 2, f64::NAN).unwrap();
        let b = make_band(7.0);

        let result = add(&a, &b).unwrap();
        assert!(result.get(2, 2).unwrap().is_nan());
        assert_eq!(result.get(0, 0).unwrap(), 10.0);
    }

    #[test]
    fn test_declared_nodata_propagates() {
        let mut a = make_band(3.0);
        a.set(1, 0, -9999.0).unwrap();
        a.set_nodata(Some(-9999.0));
        let b = make_band(7.0);

        let result = add(&a, &b).unwrap();
        assert!(result.get(1, 0).unwrap().is_nan());
    }

    #[test]
    fn test_shape_mismatch() {
        let a = make_band(1.0);
        let b = Raster::filled(3, 4, 1.0);

        assert!(matches!(
            add(&a, &b),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_output_keeps_first_operand_metadata() {
        let mut a = make_band(1.0);
        a.set_transform(GeoTransform::new(682_000.0, 4_625_000.0, 30.0, -30.0));
        let b = make_band(2.0);

        let result = add(&a, &b).unwrap();
        assert_eq!(result.transform(), a.transform());
    }
}
