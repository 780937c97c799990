use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding an SMF byte buffer.

Every error is fatal for the current decode: no partial track is ever
returned once one is raised.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("decoding at position {position}, {kind}")]
pub struct DecodeError {
    position: usize,
    pub(crate) kind: DecodeErrorKind,
}

/// A kind of error that the decoder can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The header chunk is not a well-formed `MThd` chunk.
    #[error("invalid header: {0}")]
    InvalidHeader(#[from] HeaderError),
    /// The buffer ends in the middle of a field (fixed-width read,
    /// variable-length quantity, or declared-length payload).
    #[error("input ends before the field completes")]
    TruncatedInput,
    /// A meta event declares more data bytes than remain in its track.
    #[error("meta event declares {declared} data bytes but only {remaining} remain in the track")]
    TruncatedMeta {
        /// Length declared by the event
        declared: u32,
        /// Bytes left in the track chunk
        remaining: u32,
    },
    /// A system-exclusive event declares more data bytes than remain in its track.
    #[error("sysex event declares {declared} data bytes but only {remaining} remain in the track")]
    TruncatedSysex {
        /// Length declared by the event
        declared: u32,
        /// Bytes left in the track chunk
        remaining: u32,
    },
    /// The events of a track chunk do not add up to its declared length.
    #[error("track declares {declared} bytes but events consumed {consumed}")]
    TrackLengthMismatch {
        /// Length declared by the chunk header
        declared: u32,
        /// Event bytes consumed when the mismatch was detected
        consumed: u32,
    },
    /// A data byte appeared where a status byte was expected, with no
    /// prior status recorded in the current track.
    #[error("data byte 0x{byte:02X} with no running status in this track")]
    NoRunningStatus {
        /// The offending data byte
        byte: u8,
    },
    /// A status byte outside the channel voice range and the recognized
    /// `0xFF`/`0xF0`/`0xF7` selectors.
    #[error("status byte 0x{byte:02X} is not valid in a track event stream")]
    UnsupportedStatus {
        /// The offending status byte
        byte: u8,
    },
}

/// The ways the fixed 14-byte file header can be malformed
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The first four bytes are not the ASCII tag `MThd`.
    #[error("chunk tag {0:02X?} is not MThd")]
    Tag([u8; 4]),
    /// The declared header chunk length is not 6.
    #[error("declared header length {0} (must be 6)")]
    Length(u32),
}

impl DecodeError {
    /// Create a decode error from a position and kind
    pub const fn new(position: usize, kind: DecodeErrorKind) -> Self {
        Self { position, kind }
    }

    /// Returns the error kind of the decoder.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Returns the buffer position where the decode error occurred.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// True if the buffer ended mid-field
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::TruncatedInput)
    }
}

/// The decode result type (see [`DecodeError`])
pub type DecodeResult<T> = Result<T, DecodeError>;
