//! Regular data packets.
//!
//! A regular packet is the public header followed by the payload, which
//! runs to the end of the buffer. The view adds nothing to the header
//! layout; it only fixes the mode to non-special and hands out the tail.

use crate::buffer;
use crate::error::Error;
use crate::packet::header::{ConnectionId, PacketHeader, PacketNumber};

/// View of a regular packet
#[derive(Debug)]
pub struct RegularPacket<B>(B);

impl<B> RegularPacket<B> {
    /// Wrap a buffer holding a whole regular packet.
    pub const fn new(buffer: B) -> Self {
        Self(buffer)
    }

    /// Give the underlying buffer back.
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: AsRef<[u8]>> RegularPacket<B> {
    fn header(&self) -> PacketHeader<&[u8]> {
        PacketHeader::new(self.0.as_ref())
    }

    /// The raw flags byte.
    pub fn flags(&self) -> Result<u8, Error> {
        self.header().flags()
    }

    /// Decode the connection id, or `None` when the flags omit it.
    pub fn connection_id(&self) -> Result<Option<ConnectionId>, Error> {
        self.header().connection_id()
    }

    /// Decode the version field, or `None` when the flag is clear.
    pub fn version(&self) -> Result<Option<u32>, Error> {
        self.header().version(false)
    }

    /// Decode the packet number.
    pub fn packet_number(&self) -> Result<Option<PacketNumber>, Error> {
        self.header().packet_number(false)
    }

    /// Borrow the payload behind the header (zero-copy).
    pub fn data(&self) -> Result<&[u8], Error> {
        let at = self.header().len(false)?;
        let buf = self.0.as_ref();
        buffer::ensure_len(buf, at)?;
        Ok(&buf[at..])
    }

    /// Bytes the packet occupies: the whole buffer.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.as_ref().len()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> RegularPacket<B> {
    fn header_mut(&mut self) -> PacketHeader<&mut [u8]> {
        PacketHeader::new(self.0.as_mut())
    }

    /// Write the connection id and record its width in the flags.
    pub fn set_connection_id(&mut self, id: impl Into<ConnectionId>) -> Result<(), Error> {
        self.header_mut().set_connection_id(id)
    }

    /// Write the version field and set the version flag.
    pub fn add_version(&mut self, version: u32) -> Result<(), Error> {
        self.header_mut().set_version(version)
    }

    /// Write the packet number and record its width in the flags.
    pub fn add_packet_number(
        &mut self,
        packet_number: impl Into<PacketNumber>,
    ) -> Result<(), Error> {
        self.header_mut().set_packet_number(packet_number, false)
    }

    /// Copy the payload in right behind the header.
    pub fn set_data(&mut self, data: &[u8]) -> Result<(), Error> {
        let at = self.header().len(false)?;
        let buf = self.0.as_mut();
        let end = at + data.len();
        buffer::ensure_len(buf, end)?;
        buf[at..end].copy_from_slice(data);
        Ok(())
    }
}
