//! EXIF metadata readers.
//!
//! The orientation reader walks the JPEG marker segments itself instead of
//! going through a full EXIF library: it only needs one tag from IFD0, and
//! it must degrade to "upright" on any malformed input rather than fail.
//!
//! # Layout
//!
//! ```text
//! FFD8                      SOI
//! FFxx LLLL ...             segments, skipped by length
//! FFE1 LLLL "Exif" 00 00    APP1
//!   "II"|"MM" 002A OOOOOOOO TIFF header, IFD0 offset relative to header
//!   NNNN                    IFD0 entry count
//!   TTTT YYYY CCCCCCCC VVVV 12-byte entries, value at +8
//! ```

use std::io::Cursor;

use exif::{In, Reader, Tag, Value};

use super::{DecodeError, Orientation};

// JPEG markers
const MARKER_SOI: u16 = 0xFFD8;
const MARKER_APP1: u16 = 0xFFE1;
const MARKER_SOS: u16 = 0xFFDA;

const EXIF_SIGNATURE: &[u8] = b"Exif";
// "Exif" plus two NUL padding bytes
const EXIF_HEADER_LEN: usize = 6;

// TIFF byte order marks
const BYTE_ORDER_LE: &[u8] = b"II";
const BYTE_ORDER_BE: &[u8] = b"MM";

const TAG_ORIENTATION: u16 = 0x0112;
const IFD_ENTRY_SIZE: usize = 12;
const IFD_VALUE_OFFSET: usize = 8;

// ResolutionUnit value for centimetres
const RESOLUTION_UNIT_CM: u32 = 3;

/// Read the EXIF orientation tag from raw file bytes.
///
/// Never fails: anything that is not a JPEG with a well-formed APP1/Exif
/// block, or whose IFD0 has no orientation entry, yields
/// `Orientation::Normal`.
///
/// # Example
///
/// ```ignore
/// let orientation = decode_orientation(&std::fs::read("photo.jpg")?);
/// if orientation.swaps_dimensions() { /* portrait shot */ }
/// ```
pub fn decode_orientation(bytes: &[u8]) -> Orientation {
    match read_orientation(bytes) {
        Ok(orientation) => orientation,
        Err(e) => {
            log::debug!("Assuming upright orientation: {}", e);
            Orientation::Normal
        }
    }
}

fn read_orientation(bytes: &[u8]) -> Result<Orientation, DecodeError> {
    if read_u16(bytes, 0, false)? != MARKER_SOI {
        return Err(DecodeError::ExifError("missing SOI marker".to_string()));
    }

    let mut offset = 2;
    while offset + 4 <= bytes.len() {
        let marker = read_u16(bytes, offset, false)?;
        if marker & 0xFF00 != 0xFF00 {
            return Err(DecodeError::ExifError(format!(
                "expected marker at offset {}, found {:#06x}",
                offset, marker
            )));
        }
        if marker == MARKER_SOS {
            break;
        }

        let length = read_u16(bytes, offset + 2, false)? as usize;
        if length < 2 {
            return Err(DecodeError::ExifError(format!(
                "segment {:#06x} declares length {}",
                marker, length
            )));
        }

        if marker == MARKER_APP1 {
            if slice(bytes, offset + 4, EXIF_SIGNATURE.len())? != EXIF_SIGNATURE {
                return Err(DecodeError::ExifError(
                    "APP1 segment is not Exif".to_string(),
                ));
            }
            return read_tiff_orientation(bytes, offset + 4 + EXIF_HEADER_LEN);
        }

        offset += 2 + length;
    }

    Ok(Orientation::Normal)
}

/// Scan IFD0 of the TIFF structure starting at `tiff_start`.
fn read_tiff_orientation(bytes: &[u8], tiff_start: usize) -> Result<Orientation, DecodeError> {
    let little_endian = match slice(bytes, tiff_start, 2)? {
        order if order == BYTE_ORDER_LE => true,
        order if order == BYTE_ORDER_BE => false,
        order => {
            return Err(DecodeError::ExifError(format!(
                "unknown byte order {:02x?}",
                order
            )))
        }
    };

    let ifd_offset = read_u32(bytes, tiff_start + 4, little_endian)? as usize;
    let ifd_start = tiff_start
        .checked_add(ifd_offset)
        .ok_or_else(|| DecodeError::ExifError("IFD offset overflow".to_string()))?;
    let entry_count = read_u16(bytes, ifd_start, little_endian)? as usize;

    for index in 0..entry_count {
        let entry = ifd_start + 2 + index * IFD_ENTRY_SIZE;
        if read_u16(bytes, entry, little_endian)? == TAG_ORIENTATION {
            let value = read_u16(bytes, entry + IFD_VALUE_OFFSET, little_endian)?;
            return Ok(Orientation::from(value as u32));
        }
    }

    Ok(Orientation::Normal)
}

/// Bounds-checked sub-slice.
#[inline]
fn slice(bytes: &[u8], offset: usize, length: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(length)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| {
            DecodeError::ExifError(format!(
                "truncated: need {} bytes at offset {}, have {}",
                length,
                offset,
                bytes.len()
            ))
        })
}

fn read_u16(bytes: &[u8], offset: usize, little_endian: bool) -> Result<u16, DecodeError> {
    let s = slice(bytes, offset, 2)?;
    let buf = [s[0], s[1]];
    Ok(if little_endian {
        u16::from_le_bytes(buf)
    } else {
        u16::from_be_bytes(buf)
    })
}

fn read_u32(bytes: &[u8], offset: usize, little_endian: bool) -> Result<u32, DecodeError> {
    let s = slice(bytes, offset, 4)?;
    let buf = [s[0], s[1], s[2], s[3]];
    Ok(if little_endian {
        u32::from_le_bytes(buf)
    } else {
        u32::from_be_bytes(buf)
    })
}

/// Read the horizontal resolution in dots per inch.
///
/// Uses the primary image's `XResolution` and `ResolutionUnit`. Centimetre
/// resolutions are converted; a missing unit is read as inches. Returns
/// `None` when there is no EXIF block or the value is not a positive number.
pub fn read_resolution_dpi(bytes: &[u8]) -> Option<f64> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new().read_from_container(&mut cursor).ok()?;

    let field = exif.get_field(Tag::XResolution, In::PRIMARY)?;
    let value = match &field.value {
        Value::Rational(values) => values.first()?.to_f64(),
        other => other.get_uint(0)? as f64,
    };

    let unit = exif
        .get_field(Tag::ResolutionUnit, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(2);
    let dpi = if unit == RESOLUTION_UNIT_CM {
        value * 2.54
    } else {
        value
    };

    (dpi.is_finite() && dpi > 0.0).then_some(dpi)
}
