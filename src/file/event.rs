#![doc = r#"
The decoded track-event data model.

A track is an ordered list of [`TrackEvent`]s. Each event pairs a
delta-time (ticks since the previous event in the same track) with one of
three message classes: channel voice, meta, or system exclusive. Meta and
sysex payloads borrow their bytes straight out of the decoded buffer.
"#]

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// One delta-timed event out of a track chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent<'a> {
    delta_ticks: u32,
    message: TrackMessage<'a>,
}

impl<'a> TrackEvent<'a> {
    /// Create an event from a delta-time and message
    pub const fn new(delta_ticks: u32, message: TrackMessage<'a>) -> Self {
        Self {
            delta_ticks,
            message,
        }
    }

    /// Ticks elapsed since the previous event in the same track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The decoded message
    pub const fn message(&self) -> &TrackMessage<'a> {
        &self.message
    }
}

/// The set of possible track messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage<'a> {
    /// A channel voice message
    ChannelVoice(ChannelVoiceEvent),
    /// A meta message (file-only, tagged `0xFF`)
    Meta(MetaEvent<'a>),
    /// A system-exclusive block (tagged `0xF0` or `0xF7`)
    SystemExclusive(SysexEvent<'a>),
}

impl From<ChannelVoiceEvent> for TrackMessage<'_> {
    fn from(value: ChannelVoiceEvent) -> Self {
        Self::ChannelVoice(value)
    }
}

impl<'a> From<MetaEvent<'a>> for TrackMessage<'a> {
    fn from(value: MetaEvent<'a>) -> Self {
        Self::Meta(value)
    }
}

impl<'a> From<SysexEvent<'a>> for TrackMessage<'a> {
    fn from(value: SysexEvent<'a>) -> Self {
        Self::SystemExclusive(value)
    }
}

#[doc = r#"
The closed set of channel voice message kinds, keyed by status nibble.

The nibble also fixes how many data bytes the message carries, which is
what keeps the track decoder's byte accounting exact (see
[`VoiceKind::data_len`]).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VoiceKind {
    /// `0x8n`: note released
    NoteOff = 0x8,
    /// `0x9n`: note pressed (velocity 0 conventionally means off)
    NoteOn = 0x9,
    /// `0xAn`: per-key aftertouch
    PolyPressure = 0xA,
    /// `0xBn`: controller change
    ControlChange = 0xB,
    /// `0xCn`: program (patch) change
    ProgramChange = 0xC,
    /// `0xDn`: whole-channel aftertouch
    ChannelPressure = 0xD,
    /// `0xEn`: pitch bend, 14-bit value split over both data bytes
    PitchBend = 0xE,
}

impl VoiceKind {
    /// How many data bytes follow the status byte
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

/// A channel voice message with its data bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceEvent {
    kind: VoiceKind,
    channel: u8,
    data1: u8,
    data2: Option<u8>,
}

impl ChannelVoiceEvent {
    /// Create a voice event.
    ///
    /// `data2` must be present exactly when [`VoiceKind::data_len`] is 2.
    pub const fn new(kind: VoiceKind, channel: u8, data1: u8, data2: Option<u8>) -> Self {
        Self {
            kind,
            channel,
            data1,
            data2,
        }
    }

    /// The message kind
    pub const fn kind(&self) -> VoiceKind {
        self.kind
    }

    /// The channel out of the status byte's low nibble (0-15)
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// First data byte (key, controller, program, pressure, or bend LSB)
    pub const fn data1(&self) -> u8 {
        self.data1
    }

    /// Second data byte, absent for one-data-byte kinds
    pub const fn data2(&self) -> Option<u8> {
        self.data2
    }

    /// Reassembles the status byte this event was (or would have been)
    /// carried with on the wire.
    pub fn status(&self) -> u8 {
        (u8::from(self.kind) << 4) | self.channel
    }
}

/// A meta message: a type byte plus a raw, length-prefixed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaEvent<'a> {
    meta_type: u8,
    data: &'a [u8],
}

impl<'a> MetaEvent<'a> {
    /// Create a meta event from its type byte and payload
    pub const fn new(meta_type: u8, data: &'a [u8]) -> Self {
        Self { meta_type, data }
    }

    /// The raw type byte
    pub const fn meta_type(&self) -> u8 {
        self.meta_type
    }

    /// The payload, exactly as declared by the event's length quantity
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Classifies the type byte, or `None` for a type this crate does not
    /// name. Unknown types decode fine either way; the payload stays raw.
    pub fn kind(&self) -> Option<MetaKind> {
        MetaKind::try_from(self.meta_type).ok()
    }
}

/// The meta message types named by the SMF specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaKind {
    /// `FF 00`: sequence number
    SequenceNumber = 0x00,
    /// `FF 01`: arbitrary text
    Text = 0x01,
    /// `FF 02`: copyright notice
    Copyright = 0x02,
    /// `FF 03`: track name
    TrackName = 0x03,
    /// `FF 04`: instrument name
    InstrumentName = 0x04,
    /// `FF 05`: lyric
    Lyric = 0x05,
    /// `FF 06`: marker
    Marker = 0x06,
    /// `FF 07`: cue point
    CuePoint = 0x07,
    /// `FF 20`: MIDI channel prefix
    ChannelPrefix = 0x20,
    /// `FF 21`: MIDI port
    MidiPort = 0x21,
    /// `FF 2F`: end of track
    EndOfTrack = 0x2F,
    /// `FF 51`: tempo in microseconds per quarter note
    SetTempo = 0x51,
    /// `FF 54`: SMPTE offset
    SmpteOffset = 0x54,
    /// `FF 58`: time signature
    TimeSignature = 0x58,
    /// `FF 59`: key signature
    KeySignature = 0x59,
    /// `FF 7F`: sequencer-specific payload
    SequencerSpecific = 0x7F,
}

/// A system-exclusive data block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysexEvent<'a> {
    data: &'a [u8],
}

impl<'a> SysexEvent<'a> {
    /// Create a sysex event from its payload
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// The payload after the selector byte, exactly as declared by the
    /// event's length quantity
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
}
