//! The flag-driven public packet header.
//!
//! One flags byte announces which header fields follow and how wide each
//! one is: an optional connection id, an optional protocol version, and a
//! packet number. All width arithmetic for the header lives here; the
//! packet kind views derive their field positions from it instead of
//! keeping copies of the math.
//!
//! Version negotiation and public reset packets read the header in
//! special mode: the version field never counts toward their layout even
//! when its flag is set, and the zero packet-number flag means the field
//! is absent rather than one byte wide.

use crate::buffer;
use crate::error::Error;

/// Flag bits that name the packet kind.
pub const KIND_MASK: u8 = 0x03;
/// Version field present; marks version negotiation when sent by a server.
pub const FLAG_VERSION: u8 = 0x01;
/// Public reset packet.
pub const FLAG_PUBLIC_RESET: u8 = 0x02;
/// Connection id width field (two bits).
pub const CONNECTION_ID_MASK: u8 = 0x0c;
/// Eight-byte connection id.
pub const FLAG_CONNECTION_ID_8: u8 = 0x08;
/// Four-byte connection id.
pub const FLAG_CONNECTION_ID_4: u8 = 0x0c;
/// One-byte connection id.
pub const FLAG_CONNECTION_ID_1: u8 = 0x04;
/// Connection id omitted.
pub const FLAG_CONNECTION_ID_0: u8 = 0x00;
/// Packet number width field (two bits).
pub const PACKET_NUMBER_MASK: u8 = 0x30;
/// Six-byte packet number.
pub const FLAG_PACKET_NUMBER_6: u8 = 0x30;
/// Four-byte packet number.
pub const FLAG_PACKET_NUMBER_4: u8 = 0x20;
/// Two-byte packet number.
pub const FLAG_PACKET_NUMBER_2: u8 = 0x10;
/// One-byte packet number, or no packet number in special packets.
pub const FLAG_PACKET_NUMBER_1: u8 = 0x00;

/// Connection id at one of the supported wire widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionId {
    /// One byte on the wire
    U8(u8),
    /// Four bytes on the wire
    U32(u32),
    /// Eight bytes on the wire
    U64(u64),
}

impl ConnectionId {
    /// Bytes the id occupies on the wire.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U32(_) => 4,
            Self::U64(_) => 8,
        }
    }

    /// The id widened to its largest representation.
    #[must_use]
    pub const fn value(self) -> u64 {
        match self {
            Self::U8(v) => v as u64,
            Self::U32(v) => v as u64,
            Self::U64(v) => v,
        }
    }

    const fn flag_bits(self) -> u8 {
        match self {
            Self::U8(_) => FLAG_CONNECTION_ID_1,
            Self::U32(_) => FLAG_CONNECTION_ID_4,
            Self::U64(_) => FLAG_CONNECTION_ID_8,
        }
    }
}

impl From<u8> for ConnectionId {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<u32> for ConnectionId {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<u64> for ConnectionId {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

/// Packet number at one of the supported wire widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketNumber {
    /// One byte on the wire
    U8(u8),
    /// Two bytes on the wire
    U16(u16),
    /// Four bytes on the wire
    U32(u32),
    /// Six bytes on the wire; values must stay below `1 << 48`
    U48(u64),
}

impl PacketNumber {
    /// Bytes the packet number occupies on the wire.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) => 4,
            Self::U48(_) => 6,
        }
    }

    /// The packet number widened to its largest representation.
    #[must_use]
    pub const fn value(self) -> u64 {
        match self {
            Self::U8(v) => v as u64,
            Self::U16(v) => v as u64,
            Self::U32(v) => v as u64,
            Self::U48(v) => v,
        }
    }

    const fn flag_bits(self) -> u8 {
        match self {
            Self::U8(_) => FLAG_PACKET_NUMBER_1,
            Self::U16(_) => FLAG_PACKET_NUMBER_2,
            Self::U32(_) => FLAG_PACKET_NUMBER_4,
            Self::U48(_) => FLAG_PACKET_NUMBER_6,
        }
    }
}

impl From<u8> for PacketNumber {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<u16> for PacketNumber {
    fn from(value: u16) -> Self {
        Self::U16(value)
    }
}

impl From<u32> for PacketNumber {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<u64> for PacketNumber {
    fn from(value: u64) -> Self {
        Self::U48(value)
    }
}

const fn connection_id_len_of(flags: u8) -> usize {
    match flags & CONNECTION_ID_MASK {
        FLAG_CONNECTION_ID_8 => 8,
        FLAG_CONNECTION_ID_4 => 4,
        FLAG_CONNECTION_ID_1 => 1,
        _ => 0,
    }
}

const fn version_len_of(flags: u8, special: bool) -> usize {
    if !special && flags & FLAG_VERSION != 0 {
        4
    } else {
        0
    }
}

const fn packet_number_len_of(flags: u8, special: bool) -> usize {
    match flags & PACKET_NUMBER_MASK {
        FLAG_PACKET_NUMBER_6 => 6,
        FLAG_PACKET_NUMBER_4 => 4,
        FLAG_PACKET_NUMBER_2 => 2,
        _ => {
            if special { 0 } else { 1 }
        }
    }
}

/// View of the public header at the start of a packet buffer
#[derive(Debug)]
pub struct PacketHeader<B>(B);

impl<B> PacketHeader<B> {
    /// Wrap a buffer whose first byte is the public flags byte.
    pub const fn new(buffer: B) -> Self {
        Self(buffer)
    }

    /// Give the underlying buffer back.
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: AsRef<[u8]>> PacketHeader<B> {
    /// The raw flags byte.
    pub fn flags(&self) -> Result<u8, Error> {
        buffer::get_u8(self.0.as_ref(), 0)
    }

    /// Whether the public reset flag is set.
    pub fn is_public_reset(&self) -> Result<bool, Error> {
        Ok(self.flags()? & FLAG_PUBLIC_RESET != 0)
    }

    /// Whether the version flag is set.
    pub fn has_version(&self) -> Result<bool, Error> {
        Ok(self.flags()? & FLAG_VERSION != 0)
    }

    /// Connection id width in bytes announced by the flags.
    pub fn connection_id_len(&self) -> Result<usize, Error> {
        Ok(connection_id_len_of(self.flags()?))
    }

    /// Version field width in bytes for the given mode.
    pub fn version_len(&self, special: bool) -> Result<usize, Error> {
        Ok(version_len_of(self.flags()?, special))
    }

    /// Packet number width in bytes for the given mode.
    pub fn packet_number_len(&self, special: bool) -> Result<usize, Error> {
        Ok(packet_number_len_of(self.flags()?, special))
    }

    /// Header length in bytes for the given mode, flags byte included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self, special: bool) -> Result<usize, Error> {
        let flags = self.flags()?;
        Ok(1 + connection_id_len_of(flags)
            + version_len_of(flags, special)
            + packet_number_len_of(flags, special))
    }

    /// Decode the connection id, or `None` when the flags omit it.
    pub fn connection_id(&self) -> Result<Option<ConnectionId>, Error> {
        let flags = self.flags()?;
        let buf = self.0.as_ref();
        Ok(match flags & CONNECTION_ID_MASK {
            FLAG_CONNECTION_ID_8 => Some(ConnectionId::U64(buffer::get_u64(buf, 1)?)),
            FLAG_CONNECTION_ID_4 => Some(ConnectionId::U32(buffer::get_u32(buf, 1)?)),
            FLAG_CONNECTION_ID_1 => Some(ConnectionId::U8(buffer::get_u8(buf, 1)?)),
            _ => None,
        })
    }

    /// Decode the version field.
    ///
    /// Special packets never carry one in the header; otherwise `None`
    /// means the version flag is clear.
    pub fn version(&self, special: bool) -> Result<Option<u32>, Error> {
        let flags = self.flags()?;
        if special || flags & FLAG_VERSION == 0 {
            return Ok(None);
        }
        let at = 1 + connection_id_len_of(flags);
        Ok(Some(buffer::get_u32(self.0.as_ref(), at)?))
    }

    /// Decode the packet number at the width the flags announce.
    ///
    /// In special mode the zero width flag reads as `None`; everywhere
    /// else it is a one-byte packet number.
    pub fn packet_number(&self, special: bool) -> Result<Option<PacketNumber>, Error> {
        let flags = self.flags()?;
        let buf = self.0.as_ref();
        let at = 1 + connection_id_len_of(flags) + version_len_of(flags, special);
        Ok(match flags & PACKET_NUMBER_MASK {
            FLAG_PACKET_NUMBER_6 => Some(PacketNumber::U48(buffer::get_u48(buf, at)?)),
            FLAG_PACKET_NUMBER_4 => Some(PacketNumber::U32(buffer::get_u32(buf, at)?)),
            FLAG_PACKET_NUMBER_2 => Some(PacketNumber::U16(buffer::get_u16(buf, at)?)),
            _ if special => None,
            _ => Some(PacketNumber::U8(buffer::get_u8(buf, at)?)),
        })
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PacketHeader<B> {
    /// Merge raw bits into the flags byte.
    pub fn set_flags(&mut self, flags: u8) -> Result<(), Error> {
        let byte = buffer::get_u8(self.0.as_ref(), 0)?;
        buffer::put_u8(self.0.as_mut(), 0, byte | flags)
    }

    /// Write the connection id right behind the flags byte and record its
    /// width in the flags.
    pub fn set_connection_id(&mut self, id: impl Into<ConnectionId>) -> Result<(), Error> {
        let id = id.into();
        let buf = self.0.as_mut();
        let flags = buffer::get_u8(buf, 0)?;
        buffer::ensure_len(buf, 1 + id.width())?;
        match id {
            ConnectionId::U8(v) => buffer::put_u8(buf, 1, v)?,
            ConnectionId::U32(v) => buffer::put_u32(buf, 1, v)?,
            ConnectionId::U64(v) => buffer::put_u64(buf, 1, v)?,
        }
        buf[0] = (flags & !CONNECTION_ID_MASK) | id.flag_bits();
        Ok(())
    }

    /// Write the version behind the connection id and set the version flag.
    ///
    /// Call after the connection id is in place; the write position comes
    /// from the current flags.
    pub fn set_version(&mut self, version: u32) -> Result<(), Error> {
        let buf = self.0.as_mut();
        let flags = buffer::get_u8(buf, 0)?;
        let at = 1 + connection_id_len_of(flags);
        buffer::put_u32(buf, at, version)?;
        buf[0] = flags | FLAG_VERSION;
        Ok(())
    }

    /// Write the packet number behind the fields before it and record its
    /// width in the flags.
    ///
    /// Six-byte packet numbers reject values of seven or eight natural
    /// bytes instead of truncating them.
    pub fn set_packet_number(
        &mut self,
        packet_number: impl Into<PacketNumber>,
        special: bool,
    ) -> Result<(), Error> {
        let packet_number = packet_number.into();
        if let PacketNumber::U48(v) = packet_number {
            if v >= 1 << 48 {
                return Err(Error::UnsupportedWidth {
                    width: buffer::byte_width(v),
                });
            }
        }
        let buf = self.0.as_mut();
        let flags = buffer::get_u8(buf, 0)?;
        let at = 1 + connection_id_len_of(flags) + version_len_of(flags, special);
        buffer::ensure_len(buf, at + packet_number.width())?;
        match packet_number {
            PacketNumber::U8(v) => buffer::put_u8(buf, at, v)?,
            PacketNumber::U16(v) => buffer::put_u16(buf, at, v)?,
            PacketNumber::U32(v) => buffer::put_u32(buf, at, v)?,
            PacketNumber::U48(v) => buffer::put_u48(buf, at, v)?,
        }
        buf[0] = (flags & !PACKET_NUMBER_MASK) | packet_number.flag_bits();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_HEADER_SIZE;

    #[test]
    fn test_flag_accumulation() {
        let mut header = PacketHeader::new([0u8; MAX_HEADER_SIZE]);
        header.set_connection_id(1u64).unwrap();
        assert_eq!(header.flags().unwrap(), 0x08);
        header.set_version(2).unwrap();
        assert_eq!(header.flags().unwrap(), 0x09);
        header.set_packet_number(3u64, false).unwrap();
        assert_eq!(header.flags().unwrap(), 0x39);
        // widest possible header fills the whole buffer
        assert_eq!(header.len(false).unwrap(), MAX_HEADER_SIZE);
    }

    #[test]
    fn test_connection_id_widths() {
        let mut header = PacketHeader::new([0u8; 9]);
        header.set_connection_id(0xabu8).unwrap();
        assert_eq!(header.flags().unwrap(), FLAG_CONNECTION_ID_1);
        assert_eq!(
            header.connection_id().unwrap(),
            Some(ConnectionId::U8(0xab))
        );

        header.set_connection_id(0xdead_beefu32).unwrap();
        assert_eq!(header.flags().unwrap(), FLAG_CONNECTION_ID_4);
        assert_eq!(
            header.connection_id().unwrap(),
            Some(ConnectionId::U32(0xdead_beef))
        );

        header.set_connection_id(0x0102_0304_0506_0708u64).unwrap();
        assert_eq!(header.flags().unwrap(), FLAG_CONNECTION_ID_8);
        assert_eq!(
            header.connection_id().unwrap(),
            Some(ConnectionId::U64(0x0102_0304_0506_0708))
        );
    }

    #[test]
    fn test_absent_connection_id() {
        let header = PacketHeader::new([0x00u8]);
        assert_eq!(header.connection_id().unwrap(), None);
        assert_eq!(header.connection_id_len().unwrap(), 0);
    }

    #[test]
    fn test_packet_number_widths() {
        for (pn, flag, width) in [
            (PacketNumber::U8(9), FLAG_PACKET_NUMBER_1, 1usize),
            (PacketNumber::U16(9), FLAG_PACKET_NUMBER_2, 2),
            (PacketNumber::U32(9), FLAG_PACKET_NUMBER_4, 4),
            (PacketNumber::U48(9), FLAG_PACKET_NUMBER_6, 6),
        ] {
            let mut header = PacketHeader::new([0u8; 7]);
            header.set_packet_number(pn, false).unwrap();
            assert_eq!(header.flags().unwrap(), flag);
            assert_eq!(header.packet_number_len(false).unwrap(), width);
            assert_eq!(header.packet_number(false).unwrap(), Some(pn));
            assert_eq!(header.len(false).unwrap(), 1 + width);
        }
    }

    #[test]
    fn test_six_byte_packet_number_split() {
        let mut header = PacketHeader::new([0u8; 7]);
        header
            .set_packet_number(0x1234_5678_9abcu64, false)
            .unwrap();
        assert_eq!(
            header.0,
            [0x30, 0xbc, 0x9a, 0x78, 0x56, 0x34, 0x12]
        );
        assert_eq!(
            header.packet_number(false).unwrap(),
            Some(PacketNumber::U48(0x1234_5678_9abc))
        );
    }

    #[test]
    fn test_overwide_packet_number_rejected() {
        let mut header = PacketHeader::new([0u8; 7]);
        assert_eq!(
            header.set_packet_number(1u64 << 48, false),
            Err(Error::UnsupportedWidth { width: 7 })
        );
        assert_eq!(
            header.set_packet_number(u64::MAX, false),
            Err(Error::UnsupportedWidth { width: 8 })
        );
        assert_eq!(header.0, [0u8; 7]);
    }

    #[test]
    fn test_special_mode_lengths() {
        // version negotiation style flags: version bit plus 8-byte id
        let header = PacketHeader::new([0x09u8, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(header.len(true).unwrap(), 9);
        assert_eq!(header.len(false).unwrap(), 14);
        assert_eq!(header.version_len(true).unwrap(), 0);
        assert_eq!(header.version_len(false).unwrap(), 4);
        assert_eq!(header.packet_number_len(true).unwrap(), 0);
        assert_eq!(header.packet_number_len(false).unwrap(), 1);
    }

    #[test]
    fn test_special_mode_packet_number_absent() {
        let buf = [0x09u8, 1, 0, 0, 0, 0, 0, 0, 0];
        let header = PacketHeader::new(&buf[..]);
        assert_eq!(header.packet_number(true).unwrap(), None);
        assert_eq!(header.version(true).unwrap(), None);
    }

    #[test]
    fn test_version_read_needs_flag() {
        let mut header = PacketHeader::new([0u8; 13]);
        header.set_connection_id(7u64).unwrap();
        assert_eq!(header.version(false).unwrap(), None);
        header.set_version(0x0a0b_0c0d).unwrap();
        assert_eq!(header.version(false).unwrap(), Some(0x0a0b_0c0d));
    }

    #[test]
    fn test_reset_width_bits_on_rewrite() {
        let mut header = PacketHeader::new([0u8; 9]);
        header.set_connection_id(1u64).unwrap();
        header.set_connection_id(2u8).unwrap();
        // stale width bits must not linger
        assert_eq!(
            header.flags().unwrap() & CONNECTION_ID_MASK,
            FLAG_CONNECTION_ID_1
        );
        assert_eq!(header.connection_id().unwrap(), Some(ConnectionId::U8(2)));
    }

    #[test]
    fn test_short_buffer_reads() {
        let header = PacketHeader::new([0x08u8, 1, 2, 3]);
        assert_eq!(
            header.connection_id(),
            Err(Error::BufferTooSmall {
                needed: 9,
                actual: 4
            })
        );
        // length stays computable from the flags alone
        assert_eq!(header.len(false).unwrap(), 10);
    }
}
