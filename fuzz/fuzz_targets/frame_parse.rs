//! Fuzz target for frame decoding
//!
//! Drives every frame accessor over arbitrary bytes; the views must only
//! ever return Ok or Err, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use specter_wire::{FrameType, StreamFrame};

fuzz_target!(|data: &[u8]| {
    let frame_type = FrameType::new(data);
    let _ = frame_type.kind();
    let _ = frame_type.flags();

    let frame = StreamFrame::new(data);
    let _ = frame.stream_id();
    let _ = frame.offset();
    let _ = frame.data();
    let _ = frame.is_finish();
    let _ = frame.len();
});
