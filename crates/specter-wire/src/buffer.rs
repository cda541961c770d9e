//! Bounds-checked little-endian buffer access shared by every view.
//!
//! All readers check length before touching memory and all failures carry
//! the exact shortfall, so callers can surface `BufferTooSmall` without
//! ever panicking on malformed input.

use crate::error::Error;

/// Check that `buf` holds at least `needed` bytes.
pub(crate) fn ensure_len(buf: &[u8], needed: usize) -> Result<(), Error> {
    if buf.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Natural width of a value in whole bytes, minimum one.
pub(crate) fn byte_width(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

pub(crate) fn get_u8(buf: &[u8], at: usize) -> Result<u8, Error> {
    ensure_len(buf, at + 1)?;
    Ok(buf[at])
}

pub(crate) fn get_u16(buf: &[u8], at: usize) -> Result<u16, Error> {
    ensure_len(buf, at + 2)?;
    Ok(u16::from_le_bytes([buf[at], buf[at + 1]]))
}

pub(crate) fn get_u32(buf: &[u8], at: usize) -> Result<u32, Error> {
    ensure_len(buf, at + 4)?;
    Ok(u32::from_le_bytes([
        buf[at],
        buf[at + 1],
        buf[at + 2],
        buf[at + 3],
    ]))
}

/// Six-byte values travel as a four-byte low half followed by a two-byte
/// high half, both little-endian.
pub(crate) fn get_u48(buf: &[u8], at: usize) -> Result<u64, Error> {
    ensure_len(buf, at + 6)?;
    let low = u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
    let high = u16::from_le_bytes([buf[at + 4], buf[at + 5]]);
    Ok(u64::from(low) | (u64::from(high) << 32))
}

pub(crate) fn get_u64(buf: &[u8], at: usize) -> Result<u64, Error> {
    ensure_len(buf, at + 8)?;
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&buf[at..at + 8]);
    Ok(u64::from_le_bytes(raw))
}

pub(crate) fn put_u8(buf: &mut [u8], at: usize, value: u8) -> Result<(), Error> {
    ensure_len(buf, at + 1)?;
    buf[at] = value;
    Ok(())
}

pub(crate) fn put_u16(buf: &mut [u8], at: usize, value: u16) -> Result<(), Error> {
    ensure_len(buf, at + 2)?;
    buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

pub(crate) fn put_u32(buf: &mut [u8], at: usize, value: u32) -> Result<(), Error> {
    ensure_len(buf, at + 4)?;
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// Write the six-byte split layout; the caller guarantees `value < 1 << 48`.
pub(crate) fn put_u48(buf: &mut [u8], at: usize, value: u64) -> Result<(), Error> {
    ensure_len(buf, at + 6)?;
    let low = (value & 0xffff_ffff) as u32;
    let high = ((value >> 32) & 0xffff) as u16;
    buf[at..at + 4].copy_from_slice(&low.to_le_bytes());
    buf[at + 4..at + 6].copy_from_slice(&high.to_le_bytes());
    Ok(())
}

pub(crate) fn put_u64(buf: &mut [u8], at: usize, value: u64) -> Result<(), Error> {
    ensure_len(buf, at + 8)?;
    buf[at..at + 8].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u48_wire_layout() {
        let mut buf = [0u8; 6];
        put_u48(&mut buf, 0, 0x1234_5678_9abc).unwrap();
        // low u32 first, then high u16
        assert_eq!(buf, [0xbc, 0x9a, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(get_u48(&buf, 0).unwrap(), 0x1234_5678_9abc);
    }

    #[test]
    fn test_get_reports_shortfall() {
        let buf = [0u8; 3];
        assert_eq!(
            get_u32(&buf, 0),
            Err(Error::BufferTooSmall {
                needed: 4,
                actual: 3
            })
        );
        assert_eq!(
            get_u16(&buf, 2),
            Err(Error::BufferTooSmall {
                needed: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_put_leaves_short_buffer_untouched() {
        let mut buf = [0xeeu8; 5];
        assert!(put_u64(&mut buf, 0, 1).is_err());
        assert_eq!(buf, [0xee; 5]);
    }

    #[test]
    fn test_roundtrip_at_offset() {
        let mut buf = [0u8; 12];
        put_u32(&mut buf, 3, 0xdead_beef).unwrap();
        assert_eq!(get_u32(&buf, 3).unwrap(), 0xdead_beef);
        put_u16(&mut buf, 10, 0x0102).unwrap();
        assert_eq!(&buf[10..], [0x02, 0x01]);
    }

    #[test]
    fn test_byte_width() {
        assert_eq!(byte_width(0), 1);
        assert_eq!(byte_width(0xff), 1);
        assert_eq!(byte_width(0x100), 2);
        assert_eq!(byte_width(0xffff_ffff_ffff), 6);
        assert_eq!(byte_width(1 << 48), 7);
        assert_eq!(byte_width(u64::MAX), 8);
    }
}
