use crate::reader::{DecodeResult, HeaderError, Reader};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The four-byte tag opening every SMF file
pub(crate) const HEADER_TAG: [u8; 4] = *b"MThd";

/// The header chunk's data length is fixed by the format
const HEADER_DATA_LEN: u32 = 6;

#[doc = r#"
The fixed 14-byte header chunk of an SMF file.

The format and time-division words are kept as the raw big-endian values
found in the file; [`FileHeader::format_type`] and [`FileHeader::timing`]
interpret them. Out-of-range format values are not rejected here, so a
caller that wants strict validation can layer it on top.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    format: u16,
    track_count: u16,
    division: u16,
}

impl FileHeader {
    /// Consumes exactly 14 bytes: tag, length word, and the three
    /// big-endian data words.
    pub(crate) fn read(reader: &mut Reader<'_>) -> DecodeResult<Self> {
        let tag: [u8; 4] = reader.read_exact_size()?;
        if tag != HEADER_TAG {
            return Err(reader.err(HeaderError::Tag(tag).into()));
        }
        let declared = reader.read_u32_be()?;
        if declared != HEADER_DATA_LEN {
            return Err(reader.err(HeaderError::Length(declared).into()));
        }
        let format = reader.read_u16_be()?;
        let track_count = reader.read_u16_be()?;
        let division = reader.read_u16_be()?;
        Ok(Self {
            format,
            track_count,
            division,
        })
    }

    /// The raw format word (0, 1, or 2 in a conforming file)
    pub const fn format_raw(&self) -> u16 {
        self.format
    }

    /// Returns the format, or `None` for a value outside 0..=2.
    pub fn format_type(&self) -> Option<FormatType> {
        FormatType::try_from(self.format).ok()
    }

    /// The number of track chunks the header claims the file holds.
    ///
    /// This is advisory: the chunk scan decodes whatever `MTrk` chunks are
    /// actually present (see [`SmfFile::track_count_matches`](crate::file::SmfFile::track_count_matches)).
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// The raw time-division word
    pub const fn division_raw(&self) -> u16 {
        self.division
    }

    /// Interprets the time-division word.
    ///
    /// A clear high bit means ticks per quarter note; a set high bit means
    /// SMPTE timing, with the negated frame rate in the high byte and the
    /// ticks per frame in the low byte.
    pub const fn timing(&self) -> Timing {
        if self.division & 0x8000 == 0 {
            Timing::TicksPerQuarterNote(self.division & 0x7FFF)
        } else {
            Timing::Smpte {
                frames_per_second: ((self.division >> 8) as u8).wrapping_neg(),
                ticks_per_frame: (self.division & 0x00FF) as u8,
            }
        }
    }
}

#[doc = r#"
    The three SMF format types.

    - Format 0 stores one track carrying all channels.
    - Format 1 stores simultaneous tracks of a single song.
    - Format 2 stores sequentially independent patterns.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

/// The header timing type.
///
/// Either the number of ticks per quarter note or the SMPTE frame-based
/// alternative, selected by the high bit of the division word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta times count ticks of a quarter note (1-32767)
    TicksPerQuarterNote(u16),
    /// Delta times count subdivisions of an SMPTE frame
    Smpte {
        /// Nominal frame rate (24, 25, 29, or 30 in conforming files)
        frames_per_second: u8,
        /// Ticks within each frame
        ticks_per_frame: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{DecodeErrorKind, HeaderError};
    use pretty_assertions::assert_eq;

    fn parse(bytes: &[u8]) -> DecodeResult<FileHeader> {
        FileHeader::read(&mut Reader::from_byte_slice(bytes))
    }

    #[test]
    fn accepts_reference_header() {
        let header = parse(&[
            0x4D, 0x54, 0x68, 0x64, // "MThd"
            0x00, 0x00, 0x00, 0x06, // length 6
            0x00, 0x01, // format 1
            0x00, 0x02, // 2 tracks
            0x00, 0x60, // 96 tpqn
        ])
        .unwrap();
        assert_eq!(header.format_raw(), 1);
        assert_eq!(header.format_type(), Some(FormatType::Simultaneous));
        assert_eq!(header.track_count(), 2);
        assert_eq!(header.timing(), Timing::TicksPerQuarterNote(96));
    }

    #[test]
    fn rejects_wrong_tag() {
        let err = parse(&[
            0x52, 0x49, 0x46, 0x46, // "RIFF"
            0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60,
        ])
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorKind::InvalidHeader(HeaderError::Tag(*b"RIFF"))
        );
    }

    #[test]
    fn rejects_wrong_declared_length() {
        let err = parse(&[
            0x4D, 0x54, 0x68, 0x64, //
            0x00, 0x00, 0x00, 0x07, // length must be 6
            0x00, 0x00, 0x00, 0x01, 0x00, 0x60,
        ])
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorKind::InvalidHeader(HeaderError::Length(7))
        );
    }

    #[test]
    fn truncated_header_is_truncated_input() {
        let err = parse(&[0x4D, 0x54, 0x68, 0x64, 0x00, 0x00]).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn out_of_range_format_is_kept_raw() {
        let header = parse(&[
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, //
            0x00, 0x07, // format 7: nonsense, but not rejected
            0x00, 0x00, 0x00, 0x60,
        ])
        .unwrap();
        assert_eq!(header.format_raw(), 7);
        assert_eq!(header.format_type(), None);
    }

    #[test]
    fn smpte_division_splits_rate_and_ticks() {
        let header = parse(&[
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, //
            0xE8, 0x28, // -24 fps, 40 ticks per frame
        ])
        .unwrap();
        assert_eq!(
            header.timing(),
            Timing::Smpte {
                frames_per_second: 24,
                ticks_per_frame: 40
            }
        );
        assert_eq!(header.division_raw(), 0xE828);
    }
}
