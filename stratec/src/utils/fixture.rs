//! Synthetic Stratec files for tests.

use crate::structs::header::{
    DEVICE_OFFSET, HEADER_LEN, MEAS_DATE_OFFSET, MEAS_INFO_OFFSET, OBJ_LEN_OFFSET, PAT_BIRTH_OFFSET,
    PAT_ID_OFFSET, PAT_MEAS_NO_OFFSET, PAT_NAME_OFFSET, PAT_NO_OFFSET, PIC_MATRIX_X_OFFSET,
    PIC_MATRIX_Y_OFFSET, PIC_X0_OFFSET, PIC_Y0_OFFSET, VOXEL_SIZE_OFFSET,
};

pub const DEVICE: &str = "XCT2000L.TYP";

pub const TYP_TEXT: &str = "\
[Device]
Name = XCT 2000 L
XSlope = 1724.0
XInter = -322.0
";

pub struct FileBuilder {
    buf: Vec<u8>,
}

impl FileBuilder {
    /// A zeroed header carrying `device` and a 0x0 matrix.
    pub fn new(device: &str) -> Self {
        Self {
            buf: vec![0u8; HEADER_LEN],
        }
        .pstring(DEVICE_OFFSET, device)
    }

    /// A fully populated header for a `width`x`height` matrix, without pixels.
    pub fn populated(width: u16, height: u16) -> Self {
        Self::new(DEVICE)
            .f64(VOXEL_SIZE_OFFSET, 0.5)
            .f64(OBJ_LEN_OFFSET, 12.25)
            .pstring(MEAS_INFO_OFFSET, "Radius 4%")
            .u32(MEAS_DATE_OFFSET, 20_110_523)
            .u16(PAT_MEAS_NO_OFFSET, 3)
            .u32(PAT_NO_OFFSET, 4242)
            .u32(PAT_BIRTH_OFFSET, 19_750_101)
            .pstring(PAT_NAME_OFFSET, "Doe, Jane")
            .pstring(PAT_ID_OFFSET, "ID-0042")
            .u16(PIC_X0_OFFSET, 17)
            .u16(PIC_Y0_OFFSET, 29)
            .matrix(width, height)
    }

    pub fn bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        if self.buf.len() < offset + bytes.len() {
            self.buf.resize(offset + bytes.len(), 0);
        }
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Writes `value` Latin-1 encoded behind its length byte; characters
    /// past U+00FF and strings over 255 characters are not representable.
    pub fn pstring(self, offset: usize, value: &str) -> Self {
        let latin1: Vec<u8> = value.chars().map(|c| c as u32 as u8).collect();
        let mut bytes = vec![latin1.len() as u8];
        bytes.extend_from_slice(&latin1);
        self.bytes(offset, &bytes)
    }

    pub fn u16(self, offset: usize, value: u16) -> Self {
        self.bytes(offset, &value.to_le_bytes())
    }

    pub fn u32(self, offset: usize, value: u32) -> Self {
        self.bytes(offset, &value.to_le_bytes())
    }

    pub fn f64(self, offset: usize, value: f64) -> Self {
        self.bytes(offset, &value.to_le_bytes())
    }

    pub fn matrix(self, width: u16, height: u16) -> Self {
        self.u16(PIC_MATRIX_X_OFFSET, width)
            .u16(PIC_MATRIX_Y_OFFSET, height)
    }

    /// Appends raw pixel words after whatever the buffer already holds.
    pub fn pixels(mut self, raw: &[i16]) -> Self {
        for word in raw {
            self.buf.extend_from_slice(&word.to_le_bytes());
        }
        self
    }

    pub fn pixel_bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
