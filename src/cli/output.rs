use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use stratec::DecodedImage;
use stratec::structs::pixels::PixelMatrix;

use super::InputSource;
use super::command::ImageFormat;
use crate::byteorder::{WriteBytesBe, WriteBytesLe};

pub fn create_path_with_extension(base_path: &Path, expected_ext: &str) -> PathBuf {
    let mut path = base_path.to_path_buf();
    match (base_path.extension(), base_path.file_name()) {
        (Some(existing_ext), _) if existing_ext == expected_ext => {}
        (Some(_), Some(name)) => {
            path.set_file_name(format!("{}.{expected_ext}", name.to_string_lossy()));
        }
        _ => {
            path.set_extension(expected_ext);
        }
    }
    path
}

/// Base output path for `source`: its file name inside `output_dir`, or
/// next to the input when no directory is given.
pub fn output_base(output_dir: Option<&Path>, source: &InputSource) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(&source.file_name),
        None => Path::new(&source.directory).join(&source.file_name),
    }
}

pub fn create_output_paths(base_path: &Path, format: ImageFormat) -> (PathBuf, PathBuf) {
    (
        create_path_with_extension(base_path, format.extension()),
        create_path_with_extension(base_path, "yaml"),
    )
}

/// 16-bit binary PGM of the unsigned pixel values, most significant byte
/// first as the format requires.
pub fn write_pgm<W: Write>(writer: &mut W, pixels: &PixelMatrix) -> io::Result<()> {
    write!(
        writer,
        "P5\n{} {}\n{}\n",
        pixels.width(),
        pixels.height(),
        u16::MAX
    )?;

    let mut data = Vec::with_capacity(pixels.len() * 2);
    for value in pixels.unsigned() {
        value.write_be(&mut data);
    }
    writer.write_all(&data)
}

/// Headerless signed little-endian pixels, row-major.
pub fn write_raw<W: Write>(writer: &mut W, pixels: &PixelMatrix) -> io::Result<()> {
    let mut data = Vec::with_capacity(pixels.len() * 2);
    pixels.pixels().write_le(&mut data);
    writer.write_all(&data)
}

pub fn write_image(path: &Path, format: ImageFormat, pixels: &PixelMatrix) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ImageFormat::Pgm => write_pgm(&mut writer, pixels)?,
        ImageFormat::Raw => write_raw(&mut writer, pixels)?,
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ImageMetadata<'a> {
    pub file_name: &'a str,
    pub device: &'a str,
    pub voxel_size_mm: f64,
    pub obj_len: f64,
    pub meas_info: &'a str,
    pub meas_date: u32,
    pub pat_meas_no: u16,
    pub pat_no: u32,
    pub pat_birth: u32,
    pub pat_name: &'a str,
    pub pat_id: &'a str,
    pub pic_x0: u16,
    pub pic_y0: u16,
    pub width: u16,
    pub height: u16,
    pub pixel_format: &'static str,
    pub calibration: CalibrationMetadata,
    pub display_calibration: DisplayCalibrationMetadata,
    pub display_range: Option<RangeMetadata>,
}

#[derive(Debug, Serialize)]
pub struct CalibrationMetadata {
    pub x_slope: f64,
    pub x_inter: f64,
}

#[derive(Debug, Serialize)]
pub struct DisplayCalibrationMetadata {
    pub intercept: f64,
    pub slope: f64,
    pub unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RangeMetadata {
    pub min: u16,
    pub max: u16,
}

impl<'a> ImageMetadata<'a> {
    pub fn new(file_name: &'a str, image: &'a DecodedImage, format: ImageFormat) -> Self {
        let header = &image.header;
        let display = image.display_calibration();

        Self {
            file_name,
            device: &header.device,
            voxel_size_mm: header.voxel_size,
            obj_len: header.obj_len,
            meas_info: &header.meas_info,
            meas_date: header.meas_date,
            pat_meas_no: header.pat_meas_no,
            pat_no: header.pat_no,
            pat_birth: header.pat_birth,
            pat_name: &header.pat_name,
            pat_id: &header.pat_id,
            pic_x0: header.pic_x0,
            pic_y0: header.pic_y0,
            width: image.width(),
            height: image.height(),
            pixel_format: match format {
                ImageFormat::Pgm => "u16be",
                ImageFormat::Raw => "i16le",
            },
            calibration: CalibrationMetadata {
                x_slope: image.calibration.x_slope,
                x_inter: image.calibration.x_inter,
            },
            display_calibration: DisplayCalibrationMetadata {
                intercept: display.intercept,
                slope: display.slope,
                unit: display.unit,
            },
            display_range: image
                .pixels
                .range()
                .map(|range| RangeMetadata {
                    min: range.min,
                    max: range.max,
                }),
        }
    }
}

pub fn write_metadata(path: &Path, metadata: &ImageMetadata) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml_ng::to_writer(&mut writer, metadata)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratec::{DecodedImage, MemoryStore, decode};

    const DEVICE: &str = "XCT2000L.TYP";

    fn image(raw: &[i16], width: u16, height: u16) -> DecodedImage {
        let mut buffer = vec![0u8; 1609];
        buffer[1050] = DEVICE.len() as u8;
        buffer[1051..1051 + DEVICE.len()].copy_from_slice(DEVICE.as_bytes());
        buffer[1529..1531].copy_from_slice(&width.to_le_bytes());
        buffer[1531..1533].copy_from_slice(&height.to_le_bytes());
        raw.write_le(&mut buffer);

        let store = MemoryStore::new().with(DEVICE, "XSlope = 1724\nXInter = -322\n");
        decode(&buffer, store).unwrap()
    }

    #[test]
    fn pgm_holds_unsigned_big_endian_pixels() -> io::Result<()> {
        // raw 0 -> -32768 (0x8000), raw -1 -> 32766 (0x7FFE)
        let image = image(&[0, -1], 2, 1);
        let mut out = Vec::new();
        write_pgm(&mut out, &image.pixels)?;

        let mut expected = b"P5\n2 1\n65535\n".to_vec();
        expected.extend([0x80, 0x00, 0x7F, 0xFE]);
        assert_eq!(out, expected);

        Ok(())
    }

    #[test]
    fn raw_holds_signed_little_endian_pixels() -> io::Result<()> {
        let image = image(&[0, -1, 32767], 3, 1);
        let mut out = Vec::new();
        write_raw(&mut out, &image.pixels)?;

        assert_eq!(out, [0x00, 0x80, 0xFE, 0x7F, 0xFF, 0xFF]);

        Ok(())
    }

    #[test]
    fn metadata_serializes_header_and_calibrations() {
        let image = image(&[5, 6], 1, 2);
        let metadata = ImageMetadata::new("I0000001.M01", &image, ImageFormat::Raw);
        let yaml = serde_yaml_ng::to_string(&metadata).unwrap();

        assert!(yaml.contains("device: XCT2000L.TYP"));
        assert!(yaml.contains("pixel_format: i16le"));
        assert!(yaml.contains("x_slope: 1724.0"));
        assert!(yaml.contains("unit: 1/cm"));
        assert!(yaml.contains("display_range:"));
    }

    #[test]
    fn output_paths_keep_scan_extension() {
        let (image, metadata) = create_output_paths(Path::new("out/I0000001.M01"), ImageFormat::Pgm);
        assert_eq!(image, PathBuf::from("out/I0000001.M01.pgm"));
        assert_eq!(metadata, PathBuf::from("out/I0000001.M01.yaml"));

        let (image, _) = create_output_paths(Path::new("out/scan"), ImageFormat::Raw);
        assert_eq!(image, PathBuf::from("out/scan.raw"));

        let (image, _) = create_output_paths(Path::new("out/scan.raw"), ImageFormat::Raw);
        assert_eq!(image, PathBuf::from("out/scan.raw"));
    }

    #[test]
    fn output_base_prefers_output_dir() {
        let source = InputSource {
            file_name: "I0000001.M01".to_string(),
            directory: "scans".to_string(),
        };

        assert_eq!(
            output_base(Some(Path::new("/tmp/out")), &source),
            PathBuf::from("/tmp/out/I0000001.M01")
        );
        assert_eq!(
            output_base(None, &source),
            PathBuf::from("scans/I0000001.M01")
        );
    }
}
