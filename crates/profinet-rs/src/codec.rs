// crates/profinet-rs/src/codec.rs

//! Stateless accessors for the fields of a parameter record buffer.
//!
//! All multi-byte integers are big-endian (PROFINET network byte order).
//! Every function validates offsets and shapes before touching the buffer,
//! so a setter either applies completely or leaves the buffer unchanged.

use crate::error::CodecError;
use crate::types::DataType;
use alloc::string::String;

/// Returns the sub-slice `[byte_offset, byte_offset + width)` or an `OutOfBounds` error.
fn range(buf: &[u8], byte_offset: usize, width: usize) -> Result<&[u8], CodecError> {
    let len = buf.len();
    match byte_offset.checked_add(width) {
        Some(end) if end <= len => Ok(&buf[byte_offset..end]),
        _ => Err(CodecError::OutOfBounds {
            byte_offset,
            width,
            len,
        }),
    }
}

/// Mutable counterpart of [`range`].
fn range_mut(buf: &mut [u8], byte_offset: usize, width: usize) -> Result<&mut [u8], CodecError> {
    let len = buf.len();
    match byte_offset.checked_add(width) {
        Some(end) if end <= len => Ok(&mut buf[byte_offset..end]),
        _ => Err(CodecError::OutOfBounds {
            byte_offset,
            width,
            len,
        }),
    }
}

fn check_bit_offset(bit_offset: u8) -> Result<(), CodecError> {
    if bit_offset > 7 {
        return Err(CodecError::InvalidBitOffset(bit_offset));
    }
    Ok(())
}

/// Validates a bit area shape and returns its mask (unshifted).
fn bit_area_mask(bit_offset: u8, bit_length: u8) -> Result<u8, CodecError> {
    check_bit_offset(bit_offset)?;
    if bit_length == 0 || bit_length > 8 {
        return Err(CodecError::InvalidBitLength(bit_length));
    }
    if bit_offset + bit_length > 8 {
        return Err(CodecError::BitSpanOverflow {
            bit_offset,
            bit_length,
        });
    }
    Ok(((1u16 << bit_length) - 1) as u8)
}

// --- Getters ---

/// Reads bit `bit_offset` (0 = LSB) of `buf[byte_offset]`.
pub fn get_bit(buf: &[u8], byte_offset: usize, bit_offset: u8) -> Result<bool, CodecError> {
    check_bit_offset(bit_offset)?;
    let byte = range(buf, byte_offset, 1)?[0];
    Ok(byte & (1 << bit_offset) != 0)
}

/// Reads `bit_length` bits starting at `bit_offset` of `buf[byte_offset]`.
/// The lowest bit of the area is the least significant bit of the result.
pub fn get_bit_area(
    buf: &[u8],
    byte_offset: usize,
    bit_offset: u8,
    bit_length: u8,
) -> Result<u8, CodecError> {
    let mask = bit_area_mask(bit_offset, bit_length)?;
    let byte = range(buf, byte_offset, 1)?[0];
    Ok((byte >> bit_offset) & mask)
}

pub fn get_u8(buf: &[u8], byte_offset: usize) -> Result<u8, CodecError> {
    Ok(range(buf, byte_offset, 1)?[0])
}

pub fn get_u16(buf: &[u8], byte_offset: usize) -> Result<u16, CodecError> {
    let b = range(buf, byte_offset, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub fn get_i16(buf: &[u8], byte_offset: usize) -> Result<i16, CodecError> {
    get_u16(buf, byte_offset).map(|v| v as i16)
}

pub fn get_i32(buf: &[u8], byte_offset: usize) -> Result<i32, CodecError> {
    let b = range(buf, byte_offset, 4)?;
    Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Reads a fixed-length ASCII string and trims trailing NUL bytes.
pub fn get_string(buf: &[u8], byte_offset: usize, length: usize) -> Result<String, CodecError> {
    let bytes = range(buf, byte_offset, length)?;
    let end = bytes
        .iter()
        .rposition(|b| *b != 0)
        .map_or(0, |pos| pos + 1);
    let text = &bytes[..end];
    if !text.is_ascii() {
        return Err(CodecError::NonAscii);
    }
    Ok(text.iter().map(|b| *b as char).collect())
}

/// Like `get_string`, but replaces non-ASCII bytes with U+FFFD instead of failing.
pub fn get_string_lossy(buf: &[u8], byte_offset: usize, length: usize) -> Result<String, CodecError> {
    let bytes = range(buf, byte_offset, length)?;
    let end = bytes
        .iter()
        .rposition(|b| *b != 0)
        .map_or(0, |pos| pos + 1);
    Ok(bytes[..end]
        .iter()
        .map(|b| if b.is_ascii() { *b as char } else { char::REPLACEMENT_CHARACTER })
        .collect())
}

// --- Setters ---

/// Sets or clears bit `bit_offset` of `buf[byte_offset]`.
pub fn set_bit(
    buf: &mut [u8],
    byte_offset: usize,
    bit_offset: u8,
    value: bool,
) -> Result<(), CodecError> {
    check_bit_offset(bit_offset)?;
    let byte = &mut range_mut(buf, byte_offset, 1)?[0];
    if value {
        *byte |= 1 << bit_offset;
    } else {
        *byte &= !(1 << bit_offset);
    }
    Ok(())
}

/// Writes `value` into the bit area, leaving all bits outside the area untouched.
pub fn set_bit_area(
    buf: &mut [u8],
    byte_offset: usize,
    bit_offset: u8,
    bit_length: u8,
    value: u8,
) -> Result<(), CodecError> {
    let mask = bit_area_mask(bit_offset, bit_length)?;
    if value & !mask != 0 {
        return Err(CodecError::ValueTooWide { value, bit_length });
    }
    let byte = &mut range_mut(buf, byte_offset, 1)?[0];
    *byte = (*byte & !(mask << bit_offset)) | (value << bit_offset);
    Ok(())
}

pub fn set_u8(buf: &mut [u8], byte_offset: usize, value: u8) -> Result<(), CodecError> {
    range_mut(buf, byte_offset, 1)?[0] = value;
    Ok(())
}

pub fn set_u16(buf: &mut [u8], byte_offset: usize, value: u16) -> Result<(), CodecError> {
    range_mut(buf, byte_offset, 2)?.copy_from_slice(&value.to_be_bytes());
    Ok(())
}

pub fn set_i16(buf: &mut [u8], byte_offset: usize, value: i16) -> Result<(), CodecError> {
    range_mut(buf, byte_offset, 2)?.copy_from_slice(&value.to_be_bytes());
    Ok(())
}

pub fn set_i32(buf: &mut [u8], byte_offset: usize, value: i32) -> Result<(), CodecError> {
    range_mut(buf, byte_offset, 4)?.copy_from_slice(&value.to_be_bytes());
    Ok(())
}

/// Writes an ASCII string into a fixed-length field.
///
/// Longer input is truncated to `length`; shorter input is zero-padded.
pub fn set_string(
    buf: &mut [u8],
    byte_offset: usize,
    length: usize,
    value: &str,
) -> Result<(), CodecError> {
    if !value.is_ascii() {
        return Err(CodecError::NonAscii);
    }
    let target = range_mut(buf, byte_offset, length)?;
    let src = value.as_bytes();
    let n = src.len().min(length);
    target[..n].copy_from_slice(&src[..n]);
    target[n..].fill(0);
    Ok(())
}

/// Number of bytes a field of `data_type` occupies, given its string length.
pub fn field_width(data_type: DataType, string_length: Option<usize>) -> Option<usize> {
    data_type.fixed_width().or(string_length)
}
