//! The self-describing frame type byte.
//!
//! A single leading byte names the frame kind and, for stream and
//! acknowledge frames, doubles as the flag field that sizes everything
//! behind it. Stream frames claim the high bit and acknowledge frames the
//! next one down, so those two kinds are detected by bit test before the
//! remaining kinds are matched as plain values.

use crate::buffer;
use crate::error::Error;

/// Stream frame marker bit.
pub const STREAM_BIT: u8 = 0x80;
/// Acknowledge frame marker bit.
pub const ACKNOWLEDGE_BIT: u8 = 0x40;

/// Flag bits available to stream frames.
pub const STREAM_FLAG_MASK: u8 = 0x7f;
/// Final frame of the stream.
pub const FLAG_FINISH: u8 = 0x40;
/// Length-prefixed data field present.
pub const FLAG_DATA_LEN: u8 = 0x20;
/// Offset width field of the stream flags (three bits).
pub const OFFSET_LEN_MASK: u8 = 0x1c;
/// Eight-byte offset.
pub const FLAG_OFFSET_LEN_8: u8 = 0x07 << 2;
/// Seven-byte offset, defined by the wire format but not decoded.
pub const FLAG_OFFSET_LEN_7: u8 = 0x06 << 2;
/// Six-byte offset, defined by the wire format but not decoded.
pub const FLAG_OFFSET_LEN_6: u8 = 0x05 << 2;
/// Five-byte offset, defined by the wire format but not decoded.
pub const FLAG_OFFSET_LEN_5: u8 = 0x04 << 2;
/// Four-byte offset.
pub const FLAG_OFFSET_LEN_4: u8 = 0x03 << 2;
/// Three-byte offset, defined by the wire format but not decoded.
pub const FLAG_OFFSET_LEN_3: u8 = 0x02 << 2;
/// Two-byte offset.
pub const FLAG_OFFSET_LEN_2: u8 = 0x01 << 2;
/// Offset omitted.
pub const FLAG_OFFSET_LEN_0: u8 = 0x00;
/// Stream id width field of the stream flags (two bits).
pub const STREAM_ID_LEN_MASK: u8 = 0x03;
/// Four-byte stream id.
pub const FLAG_STREAM_ID_LEN_4: u8 = 0x03;
/// Three-byte stream id, defined by the wire format but not decoded.
pub const FLAG_STREAM_ID_LEN_3: u8 = 0x02;
/// Two-byte stream id.
pub const FLAG_STREAM_ID_LEN_2: u8 = 0x01;
/// One-byte stream id.
pub const FLAG_STREAM_ID_LEN_1: u8 = 0x00;

/// Flag bits available to acknowledge frames.
pub const ACKNOWLEDGE_FLAG_MASK: u8 = 0x3f;
/// Multiple ack block ranges follow.
pub const FLAG_MULTIPLE: u8 = 0x20;
/// Largest-acked width field of the acknowledge flags (two bits).
pub const LARGEST_ACKED_LEN_MASK: u8 = 0x0c;
/// Six-byte largest acked.
pub const FLAG_LARGEST_ACKED_LEN_6: u8 = 0x0c;
/// Four-byte largest acked.
pub const FLAG_LARGEST_ACKED_LEN_4: u8 = 0x08;
/// Two-byte largest acked.
pub const FLAG_LARGEST_ACKED_LEN_2: u8 = 0x04;
/// One-byte largest acked.
pub const FLAG_LARGEST_ACKED_LEN_1: u8 = 0x00;
/// Ack block width field of the acknowledge flags (two bits).
pub const ACK_BLOCK_LEN_MASK: u8 = 0x03;
/// Six-byte ack block values.
pub const FLAG_ACK_BLOCK_LEN_6: u8 = 0x03;
/// Four-byte ack block values.
pub const FLAG_ACK_BLOCK_LEN_4: u8 = 0x02;
/// Two-byte ack block values.
pub const FLAG_ACK_BLOCK_LEN_2: u8 = 0x01;
/// One-byte ack block values.
pub const FLAG_ACK_BLOCK_LEN_1: u8 = 0x00;

/// Frame kinds distinguishable from the type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Stream data; low bits carry the stream flags
    Stream,
    /// Acknowledgment; low bits carry the acknowledge flags
    Acknowledge,
    /// Padding filler
    Padding,
    /// Abrupt stream termination
    ResetStream,
    /// Connection teardown
    ConnectionClose,
    /// Graceful shutdown notice
    GoAway,
    /// Flow control credit
    WindowUpdate,
    /// Flow control starvation notice
    Blocked,
    /// Lowest-unacked hint
    StopWaiting,
    /// Liveness probe
    Ping,
}

impl FrameKind {
    /// Wire value this kind stamps into a fresh type byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Stream => STREAM_BIT,
            Self::Acknowledge => ACKNOWLEDGE_BIT,
            Self::Padding => 0x00,
            Self::ResetStream => 0x01,
            Self::ConnectionClose => 0x02,
            Self::GoAway => 0x03,
            Self::WindowUpdate => 0x04,
            Self::Blocked => 0x05,
            Self::StopWaiting => 0x06,
            Self::Ping => 0x07,
        }
    }

    /// True for the two kinds that carry flag bits in the type byte.
    #[must_use]
    pub const fn has_flags(self) -> bool {
        matches!(self, Self::Stream | Self::Acknowledge)
    }

    const fn flag_mask(self) -> u8 {
        match self {
            Self::Stream => STREAM_FLAG_MASK,
            Self::Acknowledge => ACKNOWLEDGE_FLAG_MASK,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for FrameKind {
    type Error = Error;

    /// The stream bit wins over everything, then the acknowledge bit;
    /// the plain kinds must match exactly.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value & STREAM_BIT != 0 {
            return Ok(Self::Stream);
        }
        if value & ACKNOWLEDGE_BIT != 0 {
            return Ok(Self::Acknowledge);
        }
        match value {
            0x00 => Ok(Self::Padding),
            0x01 => Ok(Self::ResetStream),
            0x02 => Ok(Self::ConnectionClose),
            0x03 => Ok(Self::GoAway),
            0x04 => Ok(Self::WindowUpdate),
            0x05 => Ok(Self::Blocked),
            0x06 => Ok(Self::StopWaiting),
            0x07 => Ok(Self::Ping),
            _ => Err(Error::UnrecognizedFlags { bits: value }),
        }
    }
}

/// View of the type byte at the start of a frame buffer
#[derive(Debug)]
pub struct FrameType<B>(B);

impl<B> FrameType<B> {
    /// Wrap a buffer whose first byte is the frame type byte.
    pub const fn new(buffer: B) -> Self {
        Self(buffer)
    }

    /// Give the underlying buffer back.
    pub fn into_inner(self) -> B {
        self.0
    }

    /// Bytes the type byte occupies.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub const fn len(&self) -> usize {
        1
    }
}

impl<B: AsRef<[u8]>> FrameType<B> {
    /// Decode the frame kind.
    pub fn kind(&self) -> Result<FrameKind, Error> {
        FrameKind::try_from(buffer::get_u8(self.0.as_ref(), 0)?)
    }

    /// Flag bits of the type byte, masked for the kind.
    ///
    /// Plain kinds carry no flags and read as zero.
    pub fn flags(&self) -> Result<u8, Error> {
        let byte = buffer::get_u8(self.0.as_ref(), 0)?;
        let kind = FrameKind::try_from(byte)?;
        Ok(byte & kind.flag_mask())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameType<B> {
    /// Overwrite the type byte with the kind's marker value.
    ///
    /// Any flag bits already present are discarded.
    pub fn set_kind(&mut self, kind: FrameKind) -> Result<(), Error> {
        buffer::put_u8(self.0.as_mut(), 0, kind.as_byte())
    }

    /// Merge flag bits into the type byte, masked for the current kind.
    ///
    /// A no-op for kinds that carry no flags.
    pub fn set_flags(&mut self, flags: u8) -> Result<(), Error> {
        let byte = buffer::get_u8(self.0.as_ref(), 0)?;
        let kind = FrameKind::try_from(byte)?;
        buffer::put_u8(self.0.as_mut(), 0, byte | (flags & kind.flag_mask()))
    }
}
