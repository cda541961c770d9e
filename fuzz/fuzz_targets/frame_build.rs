//! Fuzz target for frame building
//!
//! Drives the write path with arbitrary widths, values, and buffer sizes;
//! every write must either fail cleanly or read back exactly.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use specter_wire::{StreamFrame, StreamId, StreamOffset};

#[derive(Debug, Arbitrary)]
struct BuildInput {
    buffer_len: u16,
    id_width: u8,
    stream_id: u32,
    offset_width: u8,
    offset: Option<u64>,
    data: Vec<u8>,
    finish: bool,
}

fuzz_target!(|input: BuildInput| {
    // Cap the buffer at a datagram-sized allocation
    let mut buf = vec![0u8; usize::from(input.buffer_len.min(2048))];
    let mut frame = StreamFrame::new(buf.as_mut_slice());

    let id = match input.id_width % 3 {
        0 => StreamId::U8(input.stream_id as u8),
        1 => StreamId::U16(input.stream_id as u16),
        _ => StreamId::U32(input.stream_id),
    };
    if frame.set_stream_id(id).is_err() {
        return;
    }

    let mut offset = None;
    if let Some(raw) = input.offset {
        let value = match input.offset_width % 3 {
            0 => StreamOffset::U16(raw as u16),
            1 => StreamOffset::U32(raw as u32),
            _ => StreamOffset::U64(raw),
        };
        if frame.add_offset(value).is_ok() {
            offset = Some(value);
        }
    }

    let wrote_data = frame.set_data(&input.data).is_ok() && !input.data.is_empty();
    if input.finish {
        let _ = frame.set_finish();
    }

    // Whatever the write path accepted must decode unchanged
    let frame = StreamFrame::new(buf.as_slice());
    assert_eq!(frame.stream_id().unwrap(), id);
    assert_eq!(frame.offset().unwrap(), offset);
    assert_eq!(frame.is_finish().unwrap(), input.finish);
    if wrote_data {
        assert_eq!(frame.data().unwrap(), &input.data[..]);
    }
});
