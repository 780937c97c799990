use crate::{
    file::event::{ChannelVoiceEvent, MetaEvent, SysexEvent, TrackEvent, TrackMessage, VoiceKind},
    reader::{DecodeError, DecodeErrorKind, DecodeResult, Reader},
};
use alloc::vec::Vec;

/// The four-byte tag opening every track chunk
pub(crate) const TRACK_TAG: [u8; 4] = *b"MTrk";

#[doc = r#"
One decoded track chunk: an ordered sequence of [`TrackEvent`]s.

A track is only ever produced whole. The decoder consumes exactly the
chunk's declared byte length; any event that would overrun it, and any
leftover bytes, fail the decode instead of yielding a short track.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track<'a> {
    events: Vec<TrackEvent<'a>>,
}

impl<'a> Track<'a> {
    /// Decodes `declared_len` bytes of event stream at the reader's
    /// current position.
    pub(crate) fn read(reader: &mut Reader<'a>, declared_len: u32) -> DecodeResult<Self> {
        TrackDecoder::new(reader, declared_len)?.run()
    }

    /// The events in file order
    pub fn events(&self) -> &[TrackEvent<'a>] {
        &self.events
    }

    /// Number of events in the track
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True for a track chunk with no events at all
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for Track<'a> {
    type Item = TrackEvent<'a>;
    type IntoIter = alloc::vec::IntoIter<TrackEvent<'a>>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Decode state for one track chunk.
///
/// Running status lives here and nowhere else, so it can never leak
/// across track boundaries.
struct TrackDecoder<'r, 'a> {
    reader: &'r mut Reader<'a>,
    start: usize,
    end: usize,
    running_status: Option<u8>,
}

impl<'r, 'a> TrackDecoder<'r, 'a> {
    fn new(reader: &'r mut Reader<'a>, declared_len: u32) -> DecodeResult<Self> {
        let start = reader.buffer_position();
        let end = start
            .checked_add(declared_len as usize)
            .ok_or_else(|| reader.truncated())?;
        Ok(Self {
            reader,
            start,
            end,
            running_status: None,
        })
    }

    fn run(mut self) -> DecodeResult<Track<'a>> {
        let mut events = Vec::new();
        while self.reader.buffer_position() < self.end {
            events.push(self.read_event()?);
        }
        // the loop ends the instant consumption reaches the declared
        // length; landing past it means the last event overran the chunk
        if self.reader.buffer_position() != self.end {
            return Err(self.overrun());
        }
        Ok(Track { events })
    }

    fn read_event(&mut self) -> DecodeResult<TrackEvent<'a>> {
        let delta_ticks = self.reader.read_varlen()?;
        // every event has a selector byte after its delta-time
        if self.reader.buffer_position() >= self.end {
            return Err(self.overrun());
        }
        let selector = self.reader.peek_u8().ok_or_else(|| self.reader.truncated())?;

        let message = match selector {
            0xFF => {
                self.reader.skip(1)?;
                self.read_meta()?
            }
            0xF0 | 0xF7 => {
                self.reader.skip(1)?;
                self.read_sysex()?
            }
            byte if byte & 0x80 != 0 => {
                if byte & 0xF0 == 0xF0 {
                    // 0xF1-0xF6 and 0xF8-0xFE are wire-protocol system
                    // messages with no place in a track chunk
                    return Err(self
                        .reader
                        .err(DecodeErrorKind::UnsupportedStatus { byte }));
                }
                self.reader.skip(1)?;
                self.running_status = Some(byte);
                self.read_voice(byte)?
            }
            byte => {
                // a data byte in status position reuses the last explicit
                // status of this track
                let Some(status) = self.running_status else {
                    return Err(self
                        .reader
                        .err(DecodeErrorKind::NoRunningStatus { byte }));
                };
                self.read_voice(status)?
            }
        };

        Ok(TrackEvent::new(delta_ticks, message))
    }

    fn read_voice(&mut self, status: u8) -> DecodeResult<TrackMessage<'a>> {
        // status is known to have a channel-voice high nibble here
        let kind = VoiceKind::try_from(status >> 4)
            .map_err(|_| self.reader.err(DecodeErrorKind::UnsupportedStatus { byte: status }))?;
        if self.remaining_in_track() < kind.data_len() {
            return Err(self.overrun());
        }
        let data1 = self.reader.read_u8()?;
        let data2 = if kind.data_len() == 2 {
            Some(self.reader.read_u8()?)
        } else {
            None
        };
        Ok(ChannelVoiceEvent::new(kind, status & 0x0F, data1, data2).into())
    }

    fn read_meta(&mut self) -> DecodeResult<TrackMessage<'a>> {
        if self.remaining_in_track() == 0 {
            return Err(self.overrun());
        }
        let meta_type = self.reader.read_u8()?;
        let declared = self.reader.read_varlen()?;
        self.check_within()?;
        let remaining = self.remaining_in_track();
        if declared as usize > remaining {
            return Err(self.reader.err(DecodeErrorKind::TruncatedMeta {
                declared,
                remaining: remaining as u32,
            }));
        }
        let data = self.reader.read_exact(declared as usize)?;
        Ok(MetaEvent::new(meta_type, data).into())
    }

    /// Sysex payloads are length-prefixed: the `0xF0`/`0xF7` selector is
    /// followed by a variable-length quantity and that many raw bytes.
    /// For `0xF0` events the payload conventionally ends with the `0xF7`
    /// terminator, which is kept in the data as the file stored it.
    fn read_sysex(&mut self) -> DecodeResult<TrackMessage<'a>> {
        let declared = self.reader.read_varlen()?;
        self.check_within()?;
        let remaining = self.remaining_in_track();
        if declared as usize > remaining {
            return Err(self.reader.err(DecodeErrorKind::TruncatedSysex {
                declared,
                remaining: remaining as u32,
            }));
        }
        let data = self.reader.read_exact(declared as usize)?;
        Ok(SysexEvent::new(data).into())
    }

    fn remaining_in_track(&self) -> usize {
        self.end.saturating_sub(self.reader.buffer_position())
    }

    /// Errors when a variable-length quantity ran past the chunk boundary.
    fn check_within(&self) -> DecodeResult<()> {
        if self.reader.buffer_position() > self.end {
            return Err(self.overrun());
        }
        Ok(())
    }

    fn overrun(&self) -> DecodeError {
        self.reader.err(DecodeErrorKind::TrackLengthMismatch {
            declared: (self.end - self.start) as u32,
            consumed: (self.reader.buffer_position() - self.start) as u32,
        })
    }
}
