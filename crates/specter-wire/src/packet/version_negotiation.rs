//! Version negotiation packets.
//!
//! Sent by a server that does not speak the version a client asked for:
//! the version flag, an eight-byte connection id, and then the list of
//! versions the server does speak, four bytes each to the end of the
//! buffer. The header is read in special mode, so the version flag marks
//! the packet kind without reserving a version field in the layout.

use crate::VERSION_SIZE;
use crate::buffer;
use crate::error::Error;
use crate::packet::header::{ConnectionId, FLAG_VERSION, PacketHeader};

/// View of a version negotiation packet
#[derive(Debug)]
pub struct VersionNegotiation<B>(B);

impl<B> VersionNegotiation<B> {
    /// Wrap a buffer holding a whole version negotiation packet.
    pub const fn new(buffer: B) -> Self {
        Self(buffer)
    }

    /// Give the underlying buffer back.
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: AsRef<[u8]>> VersionNegotiation<B> {
    fn header(&self) -> PacketHeader<&[u8]> {
        PacketHeader::new(self.0.as_ref())
    }

    /// The raw flags byte.
    pub fn flags(&self) -> Result<u8, Error> {
        self.header().flags()
    }

    /// Decode the connection id.
    pub fn connection_id(&self) -> Result<Option<ConnectionId>, Error> {
        self.header().connection_id()
    }

    /// Iterate over the advertised versions.
    ///
    /// Trailing bytes short of a whole version are ignored.
    pub fn versions(&self) -> Result<impl Iterator<Item = u32> + '_, Error> {
        let at = self.header().len(true)?;
        let buf = self.0.as_ref();
        buffer::ensure_len(buf, at)?;
        Ok(buf[at..]
            .chunks_exact(VERSION_SIZE)
            .map(|raw| u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])))
    }

    /// Bytes the packet occupies: the whole buffer.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.as_ref().len()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> VersionNegotiation<B> {
    /// Mark the packet as version negotiation and write the eight-byte
    /// connection id.
    pub fn set_connection_id(&mut self, id: u64) -> Result<(), Error> {
        let mut header = PacketHeader::new(self.0.as_mut());
        header.set_flags(FLAG_VERSION)?;
        header.set_connection_id(id)
    }

    /// Write the version list right behind the header.
    pub fn set_versions(&mut self, versions: &[u32]) -> Result<(), Error> {
        let at = self.header().len(true)?;
        let buf = self.0.as_mut();
        buffer::ensure_len(buf, at + versions.len() * VERSION_SIZE)?;
        for (i, &version) in versions.iter().enumerate() {
            buffer::put_u32(buf, at + i * VERSION_SIZE, version)?;
        }
        Ok(())
    }
}
