//! Decoded image aggregate.

use std::fmt::Write;

use crate::structs::calibration::{Calibration, DISPLAY_CALIBRATION, DisplayCalibration};
use crate::structs::header::Header;
use crate::structs::pixels::PixelMatrix;

/// Everything decoded from one Stratec file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub header: Header,
    pub calibration: Calibration,
    pub pixels: PixelMatrix,
}

impl DecodedImage {
    pub fn width(&self) -> u16 {
        self.pixels.width()
    }

    pub fn height(&self) -> u16 {
        self.pixels.height()
    }

    /// Pixel width and height in millimetres; pixels are square.
    pub fn pixel_spacing(&self) -> f64 {
        self.header.voxel_size
    }

    pub fn display_calibration(&self) -> DisplayCalibration {
        DISPLAY_CALIBRATION
    }

    /// Named image properties in display order.
    ///
    /// `file_name` and `directory` describe where the file came from and are
    /// reported verbatim.
    pub fn properties(&self, file_name: &str, directory: &str) -> Vec<(&'static str, String)> {
        let h = &self.header;
        vec![
            ("File Name", file_name.to_string()),
            ("File Path", directory.to_string()),
            ("Pixel Spacing", format!("{:?}", h.voxel_size)),
            ("ObjLen", format!("{:?}", h.obj_len)),
            ("MeasInfo", h.meas_info.clone()),
            ("Acquisition Date", h.meas_date.to_string()),
            ("Device", h.device.clone()),
            ("PatMeasNo", h.pat_meas_no.to_string()),
            ("PatNo", h.pat_no.to_string()),
            ("Patient's Birth Date", h.pat_birth.to_string()),
            ("Patient's Name", h.pat_name.clone()),
            ("Patient ID", h.pat_id.clone()),
            ("PicX0", h.pic_x0.to_string()),
            ("PicY0", h.pic_y0.to_string()),
            ("Width", h.pic_matrix_x.to_string()),
            ("Height", h.pic_matrix_y.to_string()),
            ("XSlope", format!("{:?}", self.calibration.x_slope)),
            ("XInter", format!("{:?}", self.calibration.x_inter)),
            ("Stratec File", "1".to_string()),
        ]
    }

    /// [`properties`](Self::properties) rendered as `Name: value` lines.
    pub fn properties_text(&self, file_name: &str, directory: &str) -> String {
        self.properties(file_name, directory)
            .into_iter()
            .fold(String::new(), |mut text, (name, value)| {
                let _ = writeln!(text, "{name}: {value}");
                text
            })
    }
}
