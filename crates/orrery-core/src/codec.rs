// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-size little-endian byte layout for orrery values.
//!
//! Every value serializes as its float components, 4 bytes each, in
//! declared field order. Round-trips are exact for finite inputs.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::GeometryError;

/// Values with a fixed-size little-endian byte form.
pub trait ByteSerializable: Sized {
    /// Number of bytes written by [`ByteSerializable::write_to`].
    const SERIALIZED_LEN: usize;

    /// Appends the value's bytes to `dest`.
    fn write_to<B: BufMut>(&self, dest: &mut B);

    /// Reads a value without checking the length of `src`. Prefer
    /// [`ByteSerializable::deserialize`].
    ///
    /// # Panics
    /// Panics if fewer than `SERIALIZED_LEN` bytes remain in `src`.
    fn read_from<B: Buf>(src: &mut B) -> Result<Self, GeometryError>;

    /// Reads a value, failing with [`GeometryError::BufferTooShort`] when
    /// `src` holds fewer than `SERIALIZED_LEN` bytes.
    fn deserialize<B: Buf>(src: &mut B) -> Result<Self, GeometryError> {
        let actual = src.remaining();
        if actual < Self::SERIALIZED_LEN {
            return Err(GeometryError::BufferTooShort {
                needed: Self::SERIALIZED_LEN,
                actual,
            });
        }
        Self::read_from(src)
    }

    /// Serializes into a freshly allocated buffer.
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::SERIALIZED_LEN);
        self.write_to(&mut buf);
        buf.freeze()
    }

    /// Deserializes from the front of `bytes`.
    fn from_bytes(bytes: &[u8]) -> Result<Self, GeometryError> {
        let mut cursor = bytes;
        Self::deserialize(&mut cursor)
    }
}

/// Writes each float as 4 little-endian bytes.
pub fn put_f32s<B: BufMut>(dest: &mut B, values: &[f32]) {
    for value in values {
        dest.put_f32_le(*value);
    }
}

/// Reads `N` little-endian floats.
///
/// # Panics
/// Panics if fewer than `4 * N` bytes remain in `src`.
pub fn get_f32s<B: Buf, const N: usize>(src: &mut B) -> [f32; N] {
    std::array::from_fn(|_| src.get_f32_le())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_are_little_endian() {
        let mut buf = BytesMut::new();
        put_f32s(&mut buf, &[1.0]);
        assert_eq!(&buf[..], &[0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn get_reads_in_order() {
        let mut buf = BytesMut::new();
        put_f32s(&mut buf, &[1.0, -2.5, 3.25]);
        let mut cursor = &buf[..];
        assert_eq!(get_f32s::<_, 3>(&mut cursor), [1.0, -2.5, 3.25]);
        assert!(cursor.is_empty());
    }

    #[test]
    fn checked_read_reports_a_short_buffer() {
        let short = [0_u8; 11];
        assert!(matches!(
            crate::Vect::from_bytes(&short),
            Err(GeometryError::BufferTooShort { needed: 12, actual: 11 })
        ));
    }
}
