//! Frame layer of the wire format.
//!
//! Every frame opens with a self-describing type byte; stream frames
//! follow it with variable-width fields sized by the flag bits inside
//! that same byte.

pub mod frame_type;
pub mod stream;

pub use frame_type::{FrameKind, FrameType};
pub use stream::{StreamFrame, StreamId, StreamOffset};
