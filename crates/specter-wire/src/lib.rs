//! # SPECTER Wire Format
//!
//! Wire codec for the SPECTER (Self-describing Packet Encoding for Compact
//! Transport Envelope Representation) protocol.
//!
//! Every packet and frame announces its own layout: the leading flag bytes
//! say which fields follow and how wide each one is, so small values spend
//! one byte where large values spend eight and a receiver needs no
//! out-of-band context to walk a buffer. All multi-byte fields are
//! little-endian.
//!
//! This crate provides:
//! - Flag-driven public headers with variable-width connection ids,
//!   versions, and packet numbers
//! - Regular, version negotiation, and public reset packet views
//! - Stream frame encoding with variable-width stream ids and offsets
//! - Zero-copy views over caller-owned buffers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Packets                                 │
//! │   (public header + regular / negotiation / reset layouts)      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                         Frames                                  │
//! │   (self-describing type byte + stream frame fields)            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                         Views                                   │
//! │   (non-owning windows over caller-owned byte buffers)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A view wraps a buffer without validating it; every accessor checks
//! bounds against the widths the flags announce and fails with an error
//! instead of panicking. Writers expect the caller to have sized the
//! buffer and populate fields front to back, since each field's position
//! depends on the flags written before it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frame;
pub mod packet;

mod buffer;

pub use error::Error;
pub use frame::{FrameKind, FrameType, StreamFrame, StreamId, StreamOffset};
pub use packet::{
    ConnectionId, PacketHeader, PacketNumber, PublicReset, RegularPacket, VersionNegotiation,
};

/// Widest possible public header: flags byte, eight-byte connection id,
/// four-byte version, six-byte packet number.
pub const MAX_HEADER_SIZE: usize = 19;

/// Bytes per entry in a version negotiation list.
pub const VERSION_SIZE: usize = 4;
