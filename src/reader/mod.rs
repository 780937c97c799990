#![doc = r#"
A cursor over a borrowed byte buffer, plus the decode error types.

[`Reader`] owns nothing: it borrows the caller's bytes and advances a
position over them. All multi-byte integers in an SMF are big-endian, and
lengths and delta-times use the MIDI variable-length quantity encoding,
both of which are read here.
"#]

mod error;
pub use error::*;

/// A cursor over an in-memory SMF byte buffer.
///
/// The buffer is never mutated; decoding only advances the position.
/// Independent readers over independent buffers are safe to drive from
/// multiple threads with no coordination.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader starting at the beginning of `bytes`
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The current position in the buffer
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Bytes left between the position and the end of the buffer
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    pub(crate) fn read_u8(&mut self) -> DecodeResult<u8> {
        let byte = self.peek_u8().ok_or_else(|| self.truncated())?;
        self.position += 1;
        Ok(byte)
    }

    /// Borrows the next `count` bytes out of the buffer.
    pub(crate) fn read_exact(&mut self, count: usize) -> DecodeResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| self.truncated())?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    pub(crate) fn read_exact_size<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let slice = self.read_exact(N)?;
        let mut bytes = [0; N];
        bytes.copy_from_slice(slice);
        Ok(bytes)
    }

    pub(crate) fn read_u16_be(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_be_bytes(self.read_exact_size()?))
    }

    pub(crate) fn read_u32_be(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_be_bytes(self.read_exact_size()?))
    }

    pub(crate) fn skip(&mut self, count: usize) -> DecodeResult<()> {
        self.read_exact(count).map(|_| ())
    }

    /// Decodes one MIDI variable-length quantity at the current position.
    ///
    /// Each byte contributes its low 7 bits, most significant group first;
    /// the high bit marks continuation. SMF quantities are at most 4 bytes
    /// (28 bits of value), so a fourth byte that still has its continuation
    /// bit set is treated as corruption.
    pub fn read_varlen(&mut self) -> DecodeResult<u32> {
        let mut value: u32 = 0;
        for _ in 0..4 {
            let byte = self.read_u8()?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(self.err(DecodeErrorKind::TruncatedInput))
    }

    pub(crate) fn err(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(self.position, kind)
    }

    pub(crate) fn truncated(&self) -> DecodeError {
        self.err(DecodeErrorKind::TruncatedInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn varlen(bytes: &[u8]) -> (DecodeResult<u32>, usize) {
        let mut reader = Reader::from_byte_slice(bytes);
        let value = reader.read_varlen();
        (value, reader.buffer_position())
    }

    #[test]
    fn varlen_known_vectors() {
        assert_eq!(varlen(&[0x00]), (Ok(0), 1));
        assert_eq!(varlen(&[0x40]), (Ok(64), 1));
        assert_eq!(varlen(&[0x7F]), (Ok(127), 1));
        assert_eq!(varlen(&[0x81, 0x00]), (Ok(128), 2));
        assert_eq!(varlen(&[0x81, 0x48]), (Ok(200), 2));
        assert_eq!(varlen(&[0xFF, 0x7F]), (Ok(16383), 2));
        assert_eq!(varlen(&[0x81, 0x80, 0x00]), (Ok(16384), 3));
        assert_eq!(varlen(&[0xFF, 0xFF, 0xFF, 0x7F]), (Ok(0x0FFF_FFFF), 4));
    }

    fn encode_varlen(mut value: u32) -> Vec<u8> {
        let mut groups = alloc::vec![(value & 0x7F) as u8];
        value >>= 7;
        while value != 0 {
            groups.push((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
        groups.reverse();
        groups
    }

    #[test]
    fn varlen_round_trip() {
        for value in [
            0,
            1,
            0x40,
            0x7F,
            0x80,
            200,
            0x3FFF,
            0x4000,
            0x001F_FFFF,
            0x0020_0000,
            0x0FFF_FFFF,
        ] {
            let bytes = encode_varlen(value);
            assert_eq!(varlen(&bytes), (Ok(value), bytes.len()));
        }
    }

    #[test]
    fn varlen_truncated() {
        let (value, _) = varlen(&[0x81]);
        assert_eq!(value.unwrap_err().kind(), &DecodeErrorKind::TruncatedInput);
        let (value, _) = varlen(&[]);
        assert!(value.unwrap_err().is_truncated());
    }

    #[test]
    fn varlen_rejects_fifth_byte() {
        // 0x0FFFFFFF is the largest representable quantity; a fourth
        // continuation byte can never be valid.
        let (value, consumed) = varlen(&[0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(value.unwrap_err().kind(), &DecodeErrorKind::TruncatedInput);
        assert_eq!(consumed, 4);
    }

    #[test]
    fn fixed_width_reads_are_big_endian() {
        let mut reader = Reader::from_byte_slice(&[0x00, 0x60, 0x00, 0x00, 0x00, 0x06]);
        assert_eq!(reader.read_u16_be(), Ok(0x60));
        assert_eq!(reader.read_u32_be(), Ok(6));
        assert_eq!(reader.remaining(), 0);
        assert!(reader.read_u8().is_err());
    }
}
