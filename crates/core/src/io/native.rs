//! Native GeoTIFF reading/writing (without GDAL dependency)
//!
//! Uses the `tiff` crate for single-band TIFF I/O and decodes the GeoTIFF
//! georeferencing tags directly. For full GeoTIFF support (projections,
//! compression), enable the `gdal` feature.

use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

// GeoTIFF tag numbers (tags 33550, 33922, 34735 — named variants in the
// `tiff` crate; the decoder indexes known tags by their named variant, so
// `Tag::Unknown(33550)` would not match on read)
const MODEL_PIXEL_SCALE: Tag = Tag::ModelPixelScaleTag;
const MODEL_TIEPOINT: Tag = Tag::ModelTiepointTag;
const GEO_KEY_DIRECTORY: Tag = Tag::GeoKeyDirectoryTag;

/// Options for writing GeoTIFF files
#[derive(Debug, Clone)]
pub struct GeoTiffOptions {
    /// Compression (not supported by the native writer)
    pub compression: String,
}

impl Default for GeoTiffOptions {
    fn default() -> Self {
        Self {
            compression: "NONE".to_string(),
        }
    }
}

/// Read a single-band GeoTIFF file into a Raster.
///
/// The `band` argument exists for parity with the GDAL backend; the native
/// decoder always reads the first image.
pub fn read_geotiff<T, P>(path: P, band: Option<usize>) -> Result<Raster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_geotiff(file, band)
}

/// Read a GeoTIFF from an in-memory buffer into a Raster
pub fn read_geotiff_from_buffer<T>(data: &[u8], band: Option<usize>) -> Result<Raster<T>>
where
    T: RasterElement,
{
    let cursor = Cursor::new(data);
    decode_geotiff(cursor, band)
}

/// Internal: decode a GeoTIFF from any `Read + Seek` source
fn decode_geotiff<T, R>(reader: R, _band: Option<usize>) -> Result<Raster<T>>
where
    T: RasterElement,
    R: std::io::Read + std::io::Seek,
{
    let mut decoder =
        Decoder::new(reader).map_err(|e| Error::Tiff(format!("decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Tiff(format!("cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    let result = decoder
        .read_image()
        .map_err(|e| Error::Tiff(format!("cannot read image data: {}", e)))?;

    let data: Vec<T> = match result {
        DecodingResult::U8(buf) => cast_buffer(&buf),
        DecodingResult::U16(buf) => cast_buffer(&buf),
        DecodingResult::U32(buf) => cast_buffer(&buf),
        DecodingResult::I8(buf) => cast_buffer(&buf),
        DecodingResult::I16(buf) => cast_buffer(&buf),
        DecodingResult::I32(buf) => cast_buffer(&buf),
        DecodingResult::F32(buf) => cast_buffer(&buf),
        DecodingResult::F64(buf) => cast_buffer(&buf),
        _ => {
            return Err(Error::UnsupportedDataType(
                "unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    if data.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let mut raster = Raster::from_vec(data, rows, cols)?;

    // Georeferencing is optional; a plain TIFF still decodes.
    if let Ok(transform) = read_geotransform(&mut decoder) {
        raster.set_transform(transform);
    }

    Ok(raster)
}

fn cast_buffer<T, S>(buf: &[S]) -> Vec<T>
where
    T: RasterElement,
    S: Copy + num_traits::NumCast,
{
    buf.iter()
        .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
        .collect()
}

/// Attempt to read a GeoTransform from the ModelPixelScale + ModelTiepoint tags
fn read_geotransform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
) -> Result<GeoTransform> {
    let scale = decoder
        .get_tag_f64_vec(MODEL_PIXEL_SCALE)
        .map_err(|_| Error::Tiff("no pixel scale tag".into()))?;

    let tiepoint = decoder
        .get_tag_f64_vec(MODEL_TIEPOINT)
        .map_err(|_| Error::Tiff("no tiepoint tag".into()))?;

    if scale.len() >= 2 && tiepoint.len() >= 6 {
        // tiepoint: [I, J, K, X, Y, Z]; scale: [ScaleX, ScaleY, ScaleZ]
        let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
        let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
        let pixel_width = scale[0];
        let pixel_height = -scale[1]; // negative for north-up

        return Ok(GeoTransform::new(
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        ));
    }

    Err(Error::Tiff("cannot determine geotransform".into()))
}

/// Write a Raster to a GeoTIFF file.
///
/// The native writer always emits a single 32-bit float band; class-code
/// rasters survive this exactly since their values are small integers.
///
/// Only NaN nodata survives a native round-trip: a declared non-NaN nodata
/// value (as the GDAL backend can read) is written as ordinary cell data,
/// since the native writer emits no GDAL_NODATA tag. The pipeline itself
/// marks nodata as NaN throughout, which round-trips intact.
pub fn write_geotiff<T, P>(
    raster: &Raster<T>,
    path: P,
    _options: Option<GeoTiffOptions>,
) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    encode_geotiff(raster, file)
}

/// Write a Raster to an in-memory GeoTIFF buffer
pub fn write_geotiff_to_buffer<T>(
    raster: &Raster<T>,
    _options: Option<GeoTiffOptions>,
) -> Result<Vec<u8>>
where
    T: RasterElement,
{
    let mut buf = Vec::new();
    encode_geotiff(raster, Cursor::new(&mut buf))?;
    Ok(buf)
}

/// Internal: encode a Raster as GeoTIFF into any `Write + Seek` sink
fn encode_geotiff<T, W>(raster: &Raster<T>, writer: W) -> Result<()>
where
    T: RasterElement,
    W: std::io::Write + std::io::Seek,
{
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Tiff(format!("encoder error: {}", e)))?;

    let (rows, cols) = raster.shape();

    let data: Vec<f32> = raster
        .data()
        .iter()
        .map(|&v| num_traits::cast(v).unwrap_or(f32::NAN))
        .collect();

    let mut image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Tiff(format!("cannot create image: {}", e)))?;

    let gt = raster.transform();

    let scale = vec![gt.pixel_width, gt.pixel_height.abs(), 0.0];
    image
        .encoder()
        .write_tag(MODEL_PIXEL_SCALE, scale.as_slice())
        .map_err(|e| Error::Tiff(format!("cannot write scale tag: {}", e)))?;

    let tiepoint = vec![0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    image
        .encoder()
        .write_tag(MODEL_TIEPOINT, tiepoint.as_slice())
        .map_err(|e| Error::Tiff(format!("cannot write tiepoint tag: {}", e)))?;

    // Minimal GeoKeyDirectory so downstream GIS tools accept the file:
    // GTModelTypeGeoKey=1 (Projected), GTRasterTypeGeoKey=1 (PixelIsArea).
    let geokeys: Vec<u16> = vec![
        1, 1, 0, 2, //
        1024, 0, 1, 1, //
        1025, 0, 1, 1, //
    ];
    image
        .encoder()
        .write_tag(GEO_KEY_DIRECTORY, geokeys.as_slice())
        .map_err(|e| Error::Tiff(format!("cannot write geokey tag: {}", e)))?;

    image
        .write_data(&data)
        .map_err(|e| Error::Tiff(format!("cannot write image data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_roundtrip_preserves_classes_and_transform() {
        let mut raster =
            Raster::from_vec(vec![1.0f64, 10.0, 100.0, 1000.0, 5.0, f64::NAN], 2, 3).unwrap();
        raster.set_transform(GeoTransform::new(682_000.0, 4_625_000.0, 30.0, -30.0));
        raster.set_nodata(Some(f64::NAN));

        let buf = write_geotiff_to_buffer(&raster, None).unwrap();
        let loaded: Raster<f64> = read_geotiff_from_buffer(&buf, None).unwrap();

        assert_eq!(loaded.shape(), (2, 3));
        assert_eq!(loaded.get(0, 0).unwrap(), 1.0);
        assert_eq!(loaded.get(1, 0).unwrap(), 1000.0);
        assert!(loaded.get(1, 2).unwrap().is_nan());
        assert_eq!(loaded.transform(), raster.transform());
    }

    #[test]
    fn test_declared_nodata_becomes_plain_data() {
        // The native writer emits no GDAL_NODATA tag: only NaN nodata
        // round-trips, a declared marker value comes back as ordinary data.
        let mut raster = Raster::from_vec(vec![1.0f64, -9999.0], 1, 2).unwrap();
        raster.set_nodata(Some(-9999.0));

        let buf = write_geotiff_to_buffer(&raster, None).unwrap();
        let loaded: Raster<f64> = read_geotiff_from_buffer(&buf, None).unwrap();

        assert_eq!(loaded.nodata(), None);
        assert_eq!(loaded.get(0, 1).unwrap(), -9999.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result: Result<Raster<f64>> = read_geotiff("no_such_raster.tif", None);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
