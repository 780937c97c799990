#![doc = r#"
The SMF container: header chunk, track chunks, and the scan over them.
"#]

mod header;
pub use header::*;

mod event;
pub use event::*;

mod track;
pub use track::*;

use crate::reader::{DecodeResult, Reader};
use alloc::vec::Vec;

#[doc = r#"
A fully decoded SMF file: the header plus every track chunk found.

Decoding is a single synchronous pass over a caller-supplied byte buffer.
Nothing is cached between calls, so independent buffers can be decoded
concurrently from multiple threads with no coordination.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmfFile<'a> {
    header: FileHeader,
    tracks: Vec<Track<'a>>,
}

impl<'a> SmfFile<'a> {
    /// Decodes a complete SMF byte buffer.
    ///
    /// The header chunk must sit at offset 0. After it, `MTrk` chunks are
    /// decoded in file order; a chunk with any other tag is skipped over by
    /// its declared length and never interpreted as track data. Scanning
    /// stops at the end of the buffer, when fewer than 8 bytes remain, or
    /// when a foreign chunk's declared length runs past the buffer, so
    /// trailing garbage is tolerated.
    pub fn decode(bytes: &'a [u8]) -> DecodeResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = FileHeader::read(&mut reader)?;

        let mut tracks = Vec::new();
        while reader.remaining() >= 8 {
            let tag: [u8; 4] = reader.read_exact_size()?;
            let length = reader.read_u32_be()?;
            if tag == TRACK_TAG {
                tracks.push(Track::read(&mut reader, length)?);
            } else if reader.skip(length as usize).is_err() {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        if tracks.len() != usize::from(header.track_count()) {
            tracing::warn!(
                "header declares {} tracks but {} were decoded",
                header.track_count(),
                tracks.len()
            );
        }

        Ok(Self { header, tracks })
    }

    /// The decoded file header
    pub const fn header(&self) -> &FileHeader {
        &self.header
    }

    /// The decoded tracks, in file order
    pub fn tracks(&self) -> &[Track<'a>] {
        &self.tracks
    }

    /// Whether the header's declared track count matches the number of
    /// `MTrk` chunks actually decoded.
    ///
    /// The declared count is advisory, so a mismatch never fails the
    /// decode; callers wanting strict validation check here.
    pub fn track_count_matches(&self) -> bool {
        usize::from(self.header.track_count()) == self.tracks.len()
    }

    /// Consumes the file, returning its tracks.
    pub fn into_tracks(self) -> Vec<Track<'a>> {
        self.tracks
    }
}
