//! Stream frame encoding and decoding.
//!
//! Layout after the type byte: stream id, optional offset, optional
//! length-prefixed data, each field as wide as the type-byte flags say.
//! Writers populate the fields front to back; `set_stream_id` stamps the
//! type byte and so always comes first.

use crate::buffer;
use crate::error::Error;
use crate::frame::frame_type::{
    FLAG_DATA_LEN, FLAG_FINISH, FLAG_OFFSET_LEN_0, FLAG_OFFSET_LEN_2, FLAG_OFFSET_LEN_4,
    FLAG_OFFSET_LEN_8, FLAG_STREAM_ID_LEN_1, FLAG_STREAM_ID_LEN_2, FLAG_STREAM_ID_LEN_3,
    FLAG_STREAM_ID_LEN_4, OFFSET_LEN_MASK, STREAM_BIT, STREAM_ID_LEN_MASK,
};

/// Stream id at one of the supported wire widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    /// One byte on the wire
    U8(u8),
    /// Two bytes on the wire
    U16(u16),
    /// Four bytes on the wire
    U32(u32),
}

impl StreamId {
    /// Bytes the id occupies on the wire.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) => 4,
        }
    }

    /// The id widened to its largest representation.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::U8(v) => v as u32,
            Self::U16(v) => v as u32,
            Self::U32(v) => v,
        }
    }

    const fn flag_bits(self) -> u8 {
        match self {
            Self::U8(_) => FLAG_STREAM_ID_LEN_1,
            Self::U16(_) => FLAG_STREAM_ID_LEN_2,
            Self::U32(_) => FLAG_STREAM_ID_LEN_4,
        }
    }
}

impl From<u8> for StreamId {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<u16> for StreamId {
    fn from(value: u16) -> Self {
        Self::U16(value)
    }
}

impl From<u32> for StreamId {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

/// Stream offset at one of the supported wire widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamOffset {
    /// Two bytes on the wire
    U16(u16),
    /// Four bytes on the wire
    U32(u32),
    /// Eight bytes on the wire
    U64(u64),
}

impl StreamOffset {
    /// Bytes the offset occupies on the wire.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::U16(_) => 2,
            Self::U32(_) => 4,
            Self::U64(_) => 8,
        }
    }

    /// The offset widened to its largest representation.
    #[must_use]
    pub const fn value(self) -> u64 {
        match self {
            Self::U16(v) => v as u64,
            Self::U32(v) => v as u64,
            Self::U64(v) => v,
        }
    }

    const fn flag_bits(self) -> u8 {
        match self {
            Self::U16(_) => FLAG_OFFSET_LEN_2,
            Self::U32(_) => FLAG_OFFSET_LEN_4,
            Self::U64(_) => FLAG_OFFSET_LEN_8,
        }
    }
}

impl From<u16> for StreamOffset {
    fn from(value: u16) -> Self {
        Self::U16(value)
    }
}

impl From<u32> for StreamOffset {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<u64> for StreamOffset {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

/// Stream id width for any flags byte, including the reserved three-byte
/// code point. Totality keeps field offsets computable for every input.
const fn stream_id_len(flags: u8) -> usize {
    match flags & STREAM_ID_LEN_MASK {
        FLAG_STREAM_ID_LEN_4 => 4,
        FLAG_STREAM_ID_LEN_3 => 3,
        FLAG_STREAM_ID_LEN_2 => 2,
        _ => 1,
    }
}

/// Offset width for any flags byte: field value zero means no offset,
/// anything else is one wider than the field value.
const fn offset_len(flags: u8) -> usize {
    let field = ((flags & OFFSET_LEN_MASK) >> 2) as usize;
    if field == 0 { 0 } else { field + 1 }
}

/// View of a stream frame
#[derive(Debug)]
pub struct StreamFrame<B>(B);

impl<B> StreamFrame<B> {
    /// Wrap a buffer whose first byte is the frame type byte.
    pub const fn new(buffer: B) -> Self {
        Self(buffer)
    }

    /// Give the underlying buffer back.
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: AsRef<[u8]>> StreamFrame<B> {
    fn type_byte(&self) -> Result<u8, Error> {
        buffer::get_u8(self.0.as_ref(), 0)
    }

    /// Decode the stream id at the width the flags announce.
    pub fn stream_id(&self) -> Result<StreamId, Error> {
        let flags = self.type_byte()?;
        let buf = self.0.as_ref();
        match flags & STREAM_ID_LEN_MASK {
            FLAG_STREAM_ID_LEN_4 => Ok(StreamId::U32(buffer::get_u32(buf, 1)?)),
            FLAG_STREAM_ID_LEN_2 => Ok(StreamId::U16(buffer::get_u16(buf, 1)?)),
            FLAG_STREAM_ID_LEN_1 => Ok(StreamId::U8(buffer::get_u8(buf, 1)?)),
            bits => Err(Error::UnrecognizedFlags { bits }),
        }
    }

    /// Decode the offset, or `None` when the flags omit it.
    ///
    /// The four offset widths the wire format defines but never assigned
    /// an encoder are rejected as unrecognized.
    pub fn offset(&self) -> Result<Option<StreamOffset>, Error> {
        let flags = self.type_byte()?;
        let buf = self.0.as_ref();
        let at = 1 + stream_id_len(flags);
        match flags & OFFSET_LEN_MASK {
            FLAG_OFFSET_LEN_0 => Ok(None),
            FLAG_OFFSET_LEN_2 => Ok(Some(StreamOffset::U16(buffer::get_u16(buf, at)?))),
            FLAG_OFFSET_LEN_4 => Ok(Some(StreamOffset::U32(buffer::get_u32(buf, at)?))),
            FLAG_OFFSET_LEN_8 => Ok(Some(StreamOffset::U64(buffer::get_u64(buf, at)?))),
            bits => Err(Error::UnrecognizedFlags { bits }),
        }
    }

    /// Borrow the frame data (zero-copy).
    ///
    /// Frames without the data length flag read as empty.
    pub fn data(&self) -> Result<&[u8], Error> {
        let flags = self.type_byte()?;
        if flags & FLAG_DATA_LEN == 0 {
            return Ok(&[]);
        }
        let buf = self.0.as_ref();
        let at = 1 + stream_id_len(flags) + offset_len(flags);
        let data_len = buffer::get_u16(buf, at)? as usize;
        let end = at + 2 + data_len;
        buffer::ensure_len(buf, end)?;
        Ok(&buf[at + 2..end])
    }

    /// Finish flag state.
    pub fn is_finish(&self) -> Result<bool, Error> {
        Ok(self.type_byte()? & FLAG_FINISH != 0)
    }

    /// Bytes the frame occupies, type byte through end of data.
    ///
    /// Computable for any flags byte; only the data length prefix is read
    /// from the buffer.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Result<usize, Error> {
        let flags = self.type_byte()?;
        let mut len = 1 + stream_id_len(flags) + offset_len(flags);
        if flags & FLAG_DATA_LEN != 0 {
            len += 2 + buffer::get_u16(self.0.as_ref(), len)? as usize;
        }
        Ok(len)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> StreamFrame<B> {
    /// Stamp the type byte as a stream frame and write the id behind it.
    ///
    /// Resets the whole type byte, so call this before `add_offset`,
    /// `set_data`, and `set_finish`.
    pub fn set_stream_id(&mut self, id: impl Into<StreamId>) -> Result<(), Error> {
        let id = id.into();
        let buf = self.0.as_mut();
        buffer::ensure_len(buf, 1 + id.width())?;
        buf[0] = STREAM_BIT | id.flag_bits();
        match id {
            StreamId::U8(v) => buffer::put_u8(buf, 1, v),
            StreamId::U16(v) => buffer::put_u16(buf, 1, v),
            StreamId::U32(v) => buffer::put_u32(buf, 1, v),
        }
    }

    /// Write the offset behind the stream id and flag its width.
    pub fn add_offset(&mut self, offset: impl Into<StreamOffset>) -> Result<(), Error> {
        let offset = offset.into();
        let buf = self.0.as_mut();
        let flags = buffer::get_u8(buf, 0)?;
        let at = 1 + stream_id_len(flags);
        buffer::ensure_len(buf, at + offset.width())?;
        match offset {
            StreamOffset::U16(v) => buffer::put_u16(buf, at, v)?,
            StreamOffset::U32(v) => buffer::put_u32(buf, at, v)?,
            StreamOffset::U64(v) => buffer::put_u64(buf, at, v)?,
        }
        buf[0] = (flags & !OFFSET_LEN_MASK) | offset.flag_bits();
        Ok(())
    }

    /// Write the data behind a two-byte length prefix and set the data
    /// length flag.
    ///
    /// Empty data writes nothing and leaves the flag clear, encoding an
    /// empty frame one length-prefix shorter.
    pub fn set_data(&mut self, data: &[u8]) -> Result<(), Error> {
        if data.is_empty() {
            return Ok(());
        }
        if data.len() > usize::from(u16::MAX) {
            return Err(Error::UnsupportedWidth {
                width: buffer::byte_width(data.len() as u64),
            });
        }
        let buf = self.0.as_mut();
        let flags = buffer::get_u8(buf, 0)?;
        let at = 1 + stream_id_len(flags) + offset_len(flags);
        let end = at + 2 + data.len();
        buffer::ensure_len(buf, end)?;
        buffer::put_u16(buf, at, data.len() as u16)?;
        buf[at + 2..end].copy_from_slice(data);
        buf[0] = flags | FLAG_DATA_LEN;
        Ok(())
    }

    /// Mark the frame as the final one of its stream.
    pub fn set_finish(&mut self) -> Result<(), Error> {
        let buf = self.0.as_mut();
        let flags = buffer::get_u8(buf, 0)?;
        buffer::put_u8(buf, 0, flags | FLAG_FINISH)
    }
}
