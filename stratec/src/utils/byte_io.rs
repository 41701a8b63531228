//! Byte I/O utilities for fixed-offset records.
//!
//! Stratec files are laid out as a flat little-endian record: every header
//! field lives at a literal byte offset, so reads are positioned rather than
//! sequential. Each read opens a fresh [`ByteReader`] over the tail of the
//! buffer starting at the requested offset.

use std::io;

use bitstream_io::{ByteRead, ByteReader, LittleEndian, Primitive};
use log::trace;

#[derive(Debug, Clone, Copy)]
pub struct ByteIoSliceReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteIoSliceReader<'a> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes available from `offset` to the end of the buffer.
    #[inline(always)]
    pub fn available(&self, offset: usize) -> usize {
        self.data.len().saturating_sub(offset)
    }

    fn at(&self, offset: usize) -> io::Result<ByteReader<&'a [u8], LittleEndian>> {
        match self.data.get(offset..) {
            Some(tail) => Ok(ByteReader::endian(tail, LittleEndian)),
            None => Err(out_of_bounds("at", offset, self.data.len())),
        }
    }

    #[inline(always)]
    pub fn get_at<V: Primitive>(&self, offset: usize) -> io::Result<V> {
        match self.at(offset)?.read::<V>() {
            Ok(val) => Ok(val),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(out_of_bounds(
                "get_at",
                offset,
                self.data.len(),
            )),
            Err(e) => Err(e),
        }
    }

    /// Reads an IEEE-754 double from its little-endian bit pattern.
    #[inline(always)]
    pub fn get_f64_at(&self, offset: usize) -> io::Result<f64> {
        self.get_at::<u64>(offset).map(f64::from_bits)
    }

    /// Reads a string prefixed by a single length byte.
    ///
    /// Characters are single bytes and map one-to-one onto Latin-1 code
    /// points; there is no terminator.
    pub fn get_pstring_at(&self, offset: usize) -> io::Result<String> {
        let mut reader = self.at(offset)?;
        let len = reader.read::<u8>()? as usize;

        if self.available(offset + 1) < len {
            return Err(out_of_bounds("get_pstring_at", offset + 1 + len, self.data.len()));
        }

        let mut bytes = vec![0u8; len];
        reader.read_bytes(&mut bytes)?;
        let value: String = bytes.iter().map(|&b| char::from(b)).collect();
        trace!("pstring @ {offset}: {len} bytes {value:?}");

        Ok(value)
    }

    /// Reads `count` consecutive little-endian signed 16-bit words.
    pub fn get_i16_run_at(&self, offset: usize, count: usize) -> io::Result<Vec<i16>> {
        if self.available(offset) < count * 2 {
            return Err(out_of_bounds("get_i16_run_at", offset + count * 2, self.data.len()));
        }

        let mut reader = self.at(offset)?;
        let mut words = Vec::with_capacity(count);
        for _ in 0..count {
            words.push(reader.read::<i16>()?);
        }

        Ok(words)
    }
}

fn out_of_bounds(op: &str, offset: usize, len: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("{op}({offset}): out of bounds bytes, buffer holds {len}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_fields_at_offsets() -> io::Result<()> {
        let data = [0xAA, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xFF];
        let reader = ByteIoSliceReader::from_slice(&data);

        assert_eq!(reader.get_at::<u16>(1)?, 0x1234);
        assert_eq!(reader.get_at::<u32>(3)?, 0x1234_5678);
        assert_eq!(reader.get_at::<i16>(6)?, -238);

        Ok(())
    }

    #[test]
    fn reads_doubles_from_bit_pattern() -> io::Result<()> {
        let mut data = vec![0u8; 3];
        data.extend_from_slice(&0.59f64.to_le_bytes());
        let reader = ByteIoSliceReader::from_slice(&data);

        assert_eq!(reader.get_f64_at(3)?, 0.59);

        Ok(())
    }

    #[test]
    fn pstring_is_latin1_without_terminator() -> io::Result<()> {
        let data = [0x00, 0x04, b'M', 0xFC, b'l', b'l', b'x'];
        let reader = ByteIoSliceReader::from_slice(&data);

        assert_eq!(reader.get_pstring_at(1)?, "Müll");
        assert_eq!(reader.get_pstring_at(0)?, "");

        Ok(())
    }

    #[test]
    fn reads_past_the_end_fail() {
        let data = [0x03, b'a', b'b'];
        let reader = ByteIoSliceReader::from_slice(&data);

        let err = reader.get_pstring_at(0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(reader.get_at::<u32>(1).is_err());
        assert!(reader.get_at::<u8>(10).is_err());
        assert!(reader.get_i16_run_at(1, 2).is_err());
    }

    #[test]
    fn i16_run_is_sequential() -> io::Result<()> {
        let data = [0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80, 0xFF, 0xFF];
        let reader = ByteIoSliceReader::from_slice(&data);

        assert_eq!(reader.get_i16_run_at(0, 4)?, vec![0, 32767, -32768, -1]);
        assert!(reader.get_i16_run_at(8, 0)?.is_empty());

        Ok(())
    }
}
