//! Fixed-offset file header.
//!
//! The header occupies the first 1609 bytes of a Stratec file. All numeric
//! fields are little-endian; strings carry a single leading length byte and
//! no terminator.
//!
//! | Field | Offset | Encoding |
//! |---|---|---|
//! | voxel size | 12 | f64 |
//! | object length | 318 | f64 |
//! | measurement info | 662 | length-prefixed string |
//! | measurement date | 986 | u32 |
//! | device | 1050 | length-prefixed string |
//! | patient measurement number | 1085 | u16 |
//! | patient number | 1087 | u32 |
//! | patient birth date | 1091 | u32 |
//! | patient name | 1099 | length-prefixed string |
//! | patient id | 1282 | length-prefixed string |
//! | picture origin x / y | 1525 / 1527 | u16 |
//! | matrix width / height | 1529 / 1531 | u16 |

use std::io;

use log::{debug, trace};

use crate::utils::byte_io::ByteIoSliceReader;
use crate::utils::errors::FormatError;

/// Size of the header block; pixel data starts right after it.
pub const HEADER_LEN: usize = 1609;

/// Offset of the first pixel word.
pub const PIXEL_DATA_OFFSET: usize = HEADER_LEN;

/// Substring every device identifier carries, matched case-insensitively.
pub const DEVICE_SUFFIX: &str = ".typ";

pub const VOXEL_SIZE_OFFSET: usize = 12;
pub const OBJ_LEN_OFFSET: usize = 318;
pub const MEAS_INFO_OFFSET: usize = 662;
pub const MEAS_DATE_OFFSET: usize = 986;
pub const DEVICE_OFFSET: usize = 1050;
pub const PAT_MEAS_NO_OFFSET: usize = 1085;
pub const PAT_NO_OFFSET: usize = 1087;
pub const PAT_BIRTH_OFFSET: usize = 1091;
pub const PAT_NAME_OFFSET: usize = 1099;
pub const PAT_ID_OFFSET: usize = 1282;
pub const PIC_X0_OFFSET: usize = 1525;
pub const PIC_Y0_OFFSET: usize = 1527;
pub const PIC_MATRIX_X_OFFSET: usize = 1529;
pub const PIC_MATRIX_Y_OFFSET: usize = 1531;

/// Scanner metadata decoded from the header block.
///
/// `meas_date` and `pat_birth` are opaque scanner values and are kept as
/// the raw integers found in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub device: String,
    /// Edge length of one pixel in millimetres.
    pub voxel_size: f64,
    pub obj_len: f64,
    pub meas_info: String,
    pub meas_date: u32,
    pub pat_meas_no: u16,
    pub pat_no: u32,
    pub pat_birth: u32,
    pub pat_name: String,
    pub pat_id: String,
    pub pic_x0: u16,
    pub pic_y0: u16,
    pub pic_matrix_x: u16,
    pub pic_matrix_y: u16,
}

impl Header {
    /// Decodes the header from a whole-file buffer.
    ///
    /// The device string is read and validated before any other field.
    pub fn read(reader: &ByteIoSliceReader) -> Result<Self, FormatError> {
        let len = reader.len();
        if len <= HEADER_LEN {
            return Err(FormatError::TooShort(len));
        }

        let device = Self::read_device(reader)?;

        let truncated = move |_: io::Error| FormatError::TooShort(len);

        let header = Header {
            device,
            voxel_size: reader.get_f64_at(VOXEL_SIZE_OFFSET).map_err(truncated)?,
            obj_len: reader.get_f64_at(OBJ_LEN_OFFSET).map_err(truncated)?,
            meas_info: reader.get_pstring_at(MEAS_INFO_OFFSET).map_err(truncated)?,
            meas_date: reader.get_at(MEAS_DATE_OFFSET).map_err(truncated)?,
            pat_meas_no: reader.get_at(PAT_MEAS_NO_OFFSET).map_err(truncated)?,
            pat_no: reader.get_at(PAT_NO_OFFSET).map_err(truncated)?,
            pat_birth: reader.get_at(PAT_BIRTH_OFFSET).map_err(truncated)?,
            pat_name: reader.get_pstring_at(PAT_NAME_OFFSET).map_err(truncated)?,
            pat_id: reader.get_pstring_at(PAT_ID_OFFSET).map_err(truncated)?,
            pic_x0: reader.get_at(PIC_X0_OFFSET).map_err(truncated)?,
            pic_y0: reader.get_at(PIC_Y0_OFFSET).map_err(truncated)?,
            pic_matrix_x: reader.get_at(PIC_MATRIX_X_OFFSET).map_err(truncated)?,
            pic_matrix_y: reader.get_at(PIC_MATRIX_Y_OFFSET).map_err(truncated)?,
        };

        debug!(
            "Stratec header: device {:?}, {}x{} px @ {} mm, meas_date {}",
            header.device,
            header.pic_matrix_x,
            header.pic_matrix_y,
            header.voxel_size,
            header.meas_date
        );
        trace!("{header:?}");

        Ok(header)
    }

    /// Reads the device identifier and checks it names a `.typ` resource.
    pub fn read_device(reader: &ByteIoSliceReader) -> Result<String, FormatError> {
        let device = reader
            .get_pstring_at(DEVICE_OFFSET)
            .map_err(|_| FormatError::TooShort(reader.len()))?;

        if !device.to_ascii_lowercase().contains(DEVICE_SUFFIX) {
            return Err(FormatError::InvalidDevice(device));
        }

        Ok(device)
    }

    pub fn pixel_count(&self) -> usize {
        self.pic_matrix_x as usize * self.pic_matrix_y as usize
    }

    /// Bytes occupied by the pixel matrix, two per pixel.
    pub fn pixel_data_len(&self) -> usize {
        self.pixel_count() * 2
    }
}

/// Decodes the header of a whole-file buffer.
pub fn decode_header(buffer: &[u8]) -> Result<Header, FormatError> {
    Header::read(&ByteIoSliceReader::from_slice(buffer))
}
