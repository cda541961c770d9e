use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use specter_wire::{PacketHeader, RegularPacket, StreamFrame};

/// Stream frame with the widest id and offset carrying `payload_len` bytes.
fn build_stream_frame(payload_len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; 1 + 4 + 8 + 2 + payload_len];
    let mut frame = StreamFrame::new(buf.as_mut_slice());
    frame.set_stream_id(42u32).unwrap();
    frame.add_offset(1_000_000u64).unwrap();
    let payload = vec![0xaa; payload_len];
    frame.set_data(&payload).unwrap();
    buf
}

fn bench_stream_frame_parse(c: &mut Criterion) {
    let sizes: Vec<(usize, &str)> = vec![
        (64, "64_bytes"),
        (256, "256_bytes"),
        (1024, "1024_bytes"),
        (1456, "1456_bytes"),
    ];

    let mut group = c.benchmark_group("stream_frame_parse");

    for (payload_len, name) in sizes {
        let data = build_stream_frame(payload_len);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let frame = StreamFrame::new(black_box(data.as_slice()));
                let id = frame.stream_id().unwrap();
                let offset = frame.offset().unwrap();
                let payload = frame.data().unwrap();
                black_box((id, offset, payload.len()))
            })
        });
    }

    group.finish();
}

fn bench_stream_frame_build(c: &mut Criterion) {
    let payload = vec![0xbb; 1200];
    let total = 1 + 4 + 8 + 2 + payload.len();

    let mut group = c.benchmark_group("stream_frame_build");
    group.throughput(Throughput::Bytes(total as u64));

    group.bench_function("build_1215_bytes", |b| {
        let mut buf = vec![0u8; total];
        b.iter(|| {
            let mut frame = StreamFrame::new(buf.as_mut_slice());
            frame.set_stream_id(black_box(42u32)).unwrap();
            frame.add_offset(black_box(1_000_000u64)).unwrap();
            frame.set_data(black_box(&payload)).unwrap();
            black_box(frame.len().unwrap())
        })
    });

    group.finish();
}

fn bench_header_parse(c: &mut Criterion) {
    let mut buf = vec![0u8; 1219];
    {
        let mut packet = RegularPacket::new(buf.as_mut_slice());
        packet.set_connection_id(0x0102_0304_0506_0708u64).unwrap();
        packet.add_version(1).unwrap();
        packet.add_packet_number(0x1234_5678u64).unwrap();
    }

    let mut group = c.benchmark_group("header_parse");
    group.throughput(Throughput::Bytes(buf.len() as u64));

    group.bench_function("regular_packet", |b| {
        b.iter(|| {
            let packet = RegularPacket::new(black_box(buf.as_slice()));
            let id = packet.connection_id().unwrap();
            let version = packet.version().unwrap();
            let pn = packet.packet_number().unwrap();
            let data = packet.data().unwrap();
            black_box((id, version, pn, data.len()))
        })
    });

    group.bench_function("header_len_only", |b| {
        b.iter(|| {
            let header = PacketHeader::new(black_box(buf.as_slice()));
            black_box(header.len(false).unwrap())
        })
    });

    group.finish();
}

fn bench_packet_roundtrip(c: &mut Criterion) {
    let payload = vec![0xcc; 1200];
    let total = 19 + payload.len();

    let mut group = c.benchmark_group("packet_roundtrip");
    group.throughput(Throughput::Bytes(total as u64));

    group.bench_function("build_and_parse", |b| {
        let mut buf = vec![0u8; total];
        b.iter(|| {
            let mut packet = RegularPacket::new(buf.as_mut_slice());
            packet
                .set_connection_id(black_box(0xfeed_f00d_dead_beefu64))
                .unwrap();
            packet.add_version(black_box(1)).unwrap();
            packet.add_packet_number(black_box(7u64)).unwrap();
            packet.set_data(black_box(&payload)).unwrap();

            let parsed = RegularPacket::new(&*buf);
            black_box(parsed.packet_number().unwrap())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_stream_frame_parse,
    bench_stream_frame_build,
    bench_header_parse,
    bench_packet_roundtrip
);
criterion_main!(benches);
