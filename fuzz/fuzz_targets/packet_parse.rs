//! Fuzz target for packet decoding
//!
//! Reads arbitrary bytes through the header and every packet kind view,
//! in both header modes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use specter_wire::{PacketHeader, PublicReset, RegularPacket, VersionNegotiation};

fuzz_target!(|data: &[u8]| {
    let header = PacketHeader::new(data);
    let _ = header.connection_id();
    for special in [false, true] {
        let _ = header.len(special);
        let _ = header.version(special);
        let _ = header.packet_number(special);
    }

    let packet = RegularPacket::new(data);
    let _ = packet.connection_id();
    let _ = packet.version();
    let _ = packet.packet_number();
    let _ = packet.data();

    let negotiation = VersionNegotiation::new(data);
    if let Ok(versions) = negotiation.versions() {
        let _ = versions.count();
    }

    let _ = PublicReset::new(data).connection_id();
});
