//! Flag bytes, byte stuffing, and the per-byte LSB transform.

use crate::bitbuf::BitBuffer;
use crate::crc;
use crate::error::GdlError;

pub const FLAG_BYTE: u8 = 0x7E;
pub const CONTROL_ESCAPE_BYTE: u8 = 0x7D;
pub const ESCAPE_XOR_BYTE: u8 = 0x20;
pub const FOREFLIGHT_MESSAGE_ID: u8 = 0x65;

/// Replace every `0x7E`/`0x7D` byte with `0x7D` followed by `byte ^ 0x20`.
pub fn escape(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        if byte == FLAG_BYTE || byte == CONTROL_ESCAPE_BYTE {
            out.push(CONTROL_ESCAPE_BYTE);
            out.push(byte ^ ESCAPE_XOR_BYTE);
        } else {
            out.push(byte);
        }
    }
    out
}

/// Inverse of [`escape`]. Fails if a `0x7D` is the last byte with nothing
/// to unescape.
pub fn unescape(data: &[u8]) -> Result<Vec<u8>, GdlError> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter().copied();
    while let Some(byte) = iter.next() {
        if byte == CONTROL_ESCAPE_BYTE {
            let next = iter.next().ok_or(GdlError::MalformedEscape)?;
            out.push(next ^ ESCAPE_XOR_BYTE);
        } else {
            out.push(byte);
        }
    }
    Ok(out)
}

/// Reverse the bit order within each byte. Its own inverse.
fn reverse_bits_per_byte(data: &[u8]) -> Vec<u8> {
    data.iter().map(|b| b.reverse_bits()).collect()
}

/// Frame a message: prepend message id(s), append CRC, escape, wrap in
/// flag bytes, and optionally reverse bits within each byte.
pub fn build(
    message_ids: &[u8],
    body: &BitBuffer,
    outgoing_lsb: bool,
) -> Result<Vec<u8>, GdlError> {
    let mut payload = message_ids.to_vec();
    payload.extend(body.to_bytes()?);

    let crc = crc::compute_crc(&payload);
    payload.extend(crc::crc_bytes_le(crc));

    let escaped = escape(&payload);

    let mut frame = Vec::with_capacity(escaped.len() + 2);
    frame.push(FLAG_BYTE);
    frame.extend(escaped);
    frame.push(FLAG_BYTE);

    if outgoing_lsb {
        frame = reverse_bits_per_byte(&frame);
    }

    tracing::trace!(ids = ?message_ids, len = frame.len(), "built frame");
    Ok(frame)
}

/// Unframe a single message: strip flag bytes, undo the LSB transform,
/// unescape, verify the CRC, and split off the message id(s).
pub fn deconstruct(data: &[u8], incoming_msb: bool) -> Result<(Vec<u8>, BitBuffer), GdlError> {
    if data.len() < 2 || data.first() != Some(&FLAG_BYTE) || data.last() != Some(&FLAG_BYTE) {
        return Err(GdlError::MissingFlagBytes);
    }

    let inner = &data[1..data.len() - 1];
    let inner = if incoming_msb {
        inner.to_vec()
    } else {
        reverse_bits_per_byte(inner)
    };

    let unescaped = unescape(&inner)?;
    if unescaped.len() < 2 {
        return Err(GdlError::MissingFlagBytes);
    }

    let (payload, crc_bytes) = unescaped.split_at(unescaped.len() - 2);
    let received = u16::from(crc_bytes[0]) | (u16::from(crc_bytes[1]) << 8);
    let computed = crc::compute_crc(payload);
    if received != computed {
        tracing::debug!(received, computed, "frame failed CRC check");
        return Err(GdlError::InvalidCRC { received, computed });
    }

    if payload.is_empty() {
        return Err(GdlError::MissingFlagBytes);
    }

    let (ids, body) = if payload[0] == FOREFLIGHT_MESSAGE_ID {
        if payload.len() < 2 {
            return Err(GdlError::MissingFlagBytes);
        }
        (vec![payload[0], payload[1]], &payload[2..])
    } else {
        (vec![payload[0]], &payload[1..])
    };

    Ok((ids, BitBuffer::from_bytes(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_then_unescape_is_identity() {
        let data = [0x7E, 0x01, 0x7D, 0x02, 0x20];
        assert_eq!(unescape(&escape(&data)).unwrap(), data);
    }

    #[test]
    fn reverse_bits_is_involution() {
        let data = [0x01, 0x80, 0x55, 0xAA];
        assert_eq!(reverse_bits_per_byte(&reverse_bits_per_byte(&data)), data);
    }

    #[test]
    fn unescape_trailing_control_byte_fails() {
        assert!(matches!(
            unescape(&[0x01, CONTROL_ESCAPE_BYTE]),
            Err(GdlError::MalformedEscape)
        ));
    }

    #[test]
    fn missing_flag_bytes_is_rejected() {
        assert!(matches!(
            deconstruct(&[0x00, 0x01, 0x02], true),
            Err(GdlError::MissingFlagBytes)
        ));
    }

    #[test]
    fn build_then_deconstruct_round_trips() {
        let mut body = BitBuffer::new();
        body.append(0xAB, 8);
        let frame = build(&[0x09], &body, false).unwrap();
        assert_eq!(frame.first(), Some(&FLAG_BYTE));
        assert_eq!(frame.last(), Some(&FLAG_BYTE));

        let (ids, mut decoded_body) = deconstruct(&frame, true).unwrap();
        assert_eq!(ids, vec![0x09]);
        assert_eq!(decoded_body.pop_front(8).unwrap(), 0xAB);
    }

    #[test]
    fn corrupt_crc_is_detected() {
        let mut body = BitBuffer::new();
        body.append(0x01, 8);
        let mut frame = build(&[0x00], &body, false).unwrap();
        // flip the unescaped message-id byte right after the opening flag;
        // this cannot itself need escaping (0x00 is neither 0x7E nor 0x7D).
        frame[1] ^= 0xFF;
        assert!(matches!(deconstruct(&frame, true), Err(GdlError::InvalidCRC { .. })));
    }
}
