//! Packet layer of the wire format.
//!
//! The flag-driven public header plus the three packet kinds built on
//! top of it. All field positioning flows through [`PacketHeader`]; the
//! kind views only fix the read mode and expose their own payloads.

pub mod header;
pub mod public_reset;
pub mod regular;
pub mod version_negotiation;

pub use header::{ConnectionId, PacketHeader, PacketNumber};
pub use public_reset::PublicReset;
pub use regular::RegularPacket;
pub use version_negotiation::VersionNegotiation;
