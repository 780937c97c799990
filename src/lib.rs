#![cfg_attr(not(feature = "std"), no_std)]
#![doc = r#"
Decode Standard MIDI Files (SMF) from in-memory byte buffers.

`smfread` walks the chunk-based SMF container (one `MThd` header chunk
followed by `MTrk` track chunks) and decodes each track's byte stream into
an ordered sequence of delta-timed events. The decoder borrows the caller's
buffer for the duration of the call and never performs I/O; sourcing the
bytes and presenting the decoded events are the caller's concern.

# Example

```rust
use smfread::prelude::*;

let bytes = [
    0x4D, 0x54, 0x68, 0x64, // "MThd"
    0x00, 0x00, 0x00, 0x06, // header length (always 6)
    0x00, 0x00, // format 0
    0x00, 0x01, // one track
    0x00, 0x60, // 96 ticks per quarter note
    0x4D, 0x54, 0x72, 0x6B, // "MTrk"
    0x00, 0x00, 0x00, 0x04, // 4 bytes of events
    0x00, 0x90, 0x3C, 0x40, // delta 0, note on, middle C
];

let file = SmfFile::decode(&bytes)?;
assert_eq!(file.header().timing(), Timing::TicksPerQuarterNote(96));
assert_eq!(file.tracks().len(), 1);
# Ok::<(), smfread::reader::DecodeError>(())
```

# What is not here

Encoding, real-time wire decoding, and musical interpretation (tempo math,
note naming) are out of scope. Meta and system-exclusive payloads are
exposed as raw byte slices.
"#]

extern crate alloc;

pub mod file;

pub mod reader;

pub mod prelude {
    #![doc = r#"
    Re-exports the whole public surface of the crate.
    "#]
    pub use crate::file::{
        ChannelVoiceEvent, FileHeader, FormatType, MetaEvent, MetaKind, SmfFile, SysexEvent,
        Timing, Track, TrackEvent, TrackMessage, VoiceKind,
    };
    pub use crate::reader::{DecodeError, DecodeErrorKind, DecodeResult, HeaderError, Reader};
}
