//! Public reset packets.
//!
//! The stateless "go away" of the wire format: a peer that has lost all
//! state for a connection answers with the public reset flag and the
//! eight-byte connection id so the other side can tear down. Read in
//! special mode like version negotiation.

use crate::error::Error;
use crate::packet::header::{ConnectionId, FLAG_PUBLIC_RESET, PacketHeader};

/// View of a public reset packet
#[derive(Debug)]
pub struct PublicReset<B>(B);

impl<B> PublicReset<B> {
    /// Wrap a buffer holding a whole public reset packet.
    pub const fn new(buffer: B) -> Self {
        Self(buffer)
    }

    /// Give the underlying buffer back.
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: AsRef<[u8]>> PublicReset<B> {
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

    /// Bytes the packet occupies: the whole buffer.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.as_ref().len()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PublicReset<B> {
    /// Mark the packet as a public reset and write the eight-byte
    /// connection id.
    pub fn set_connection_id(&mut self, id: u64) -> Result<(), Error> {
        let mut header = PacketHeader::new(self.0.as_mut());
        header.set_flags(FLAG_PUBLIC_RESET)?;
        header.set_connection_id(id)
    }
}
