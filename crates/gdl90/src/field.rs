//! Typed field encoders and decoders, each with a documented clamp or
//! strict out-of-range policy.

use crate::bitbuf::BitBuffer;
use crate::error::GdlError;

fn max_uint(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

pub fn encode_uint(buf: &mut BitBuffer, value: i64, width: u32, constrain: bool) -> Result<(), GdlError> {
    if value < 0 {
        return Err(GdlError::UnexpectedNegative);
    }
    let max = max_uint(width);
    let raw = value as u64;
    let raw = if constrain {
        raw.min(max)
    } else if raw > max {
        return Err(GdlError::BadIntegerSize { value, width, signed: "unsigned" });
    } else {
        raw
    };
    buf.append(raw, width as usize);
    Ok(())
}

pub fn decode_uint(buf: &mut BitBuffer, width: u32) -> Result<u64, GdlError> {
    buf.pop_front(width as usize)
}

pub fn encode_int(buf: &mut BitBuffer, value: i64, width: u32, constrain: bool) -> Result<(), GdlError> {
    let max = (1i64 << (width - 1)) - 1;
    let min = -(1i64 << (width - 1));
    let clamped = if constrain {
        value.clamp(min, max)
    } else if value > max || value < min {
        return Err(GdlError::BadIntegerSize { value, width, signed: "signed" });
    } else {
        value
    };
    let mask = max_uint(width);
    buf.append((clamped as u64) & mask, width as usize);
    Ok(())
}

pub fn decode_int(buf: &mut BitBuffer, width: u32) -> Result<i64, GdlError> {
    let raw = buf.pop_front(width as usize)?;
    Ok(sign_extend(raw, width))
}

/// Interpret the low `width` bits of `raw` as two's complement.
pub fn sign_extend(raw: u64, width: u32) -> i64 {
    let shift = 64 - width;
    ((raw << shift) as i64) >> shift
}

pub fn encode_uint_scaled(buf: &mut BitBuffer, value: f64, resolution: f64, width: u32) -> Result<(), GdlError> {
    encode_uint(buf, (value / resolution).floor() as i64, width, true)
}

pub fn decode_uint_scaled(buf: &mut BitBuffer, resolution: f64, width: u32) -> Result<i64, GdlError> {
    Ok((decode_uint(buf, width)? as f64 * resolution) as i64)
}

pub fn encode_int_scaled(buf: &mut BitBuffer, value: f64, resolution: f64, width: u32) -> Result<(), GdlError> {
    encode_int(buf, (value / resolution).floor() as i64, width, true)
}

pub fn decode_int_scaled(buf: &mut BitBuffer, resolution: f64, width: u32) -> Result<f64, GdlError> {
    Ok(decode_int(buf, width)? as f64 * resolution)
}

pub fn encode_uint_offset_scaled(
    buf: &mut BitBuffer,
    value: i64,
    offset: i64,
    resolution: f64,
    width: u32,
) -> Result<(), GdlError> {
    encode_uint_scaled(buf, (value + offset) as f64, resolution, width)
}

pub fn decode_uint_offset_scaled(
    buf: &mut BitBuffer,
    offset: i64,
    resolution: f64,
    width: u32,
) -> Result<i64, GdlError> {
    Ok(decode_uint_scaled(buf, resolution, width)? - offset)
}

pub fn encode_bool(buf: &mut BitBuffer, value: bool) -> Result<(), GdlError> {
    encode_uint(buf, value as i64, 1, true)
}

pub fn decode_bool(buf: &mut BitBuffer) -> Result<bool, GdlError> {
    Ok(decode_uint(buf, 1)? != 0)
}

/// Right-pad with spaces to `width / 8` bytes, truncating if longer.
pub fn encode_str(buf: &mut BitBuffer, value: &str, width: u32) {
    let num_bytes = (width / 8) as usize;
    let mut bytes = vec![b' '; num_bytes];
    let src = value.as_bytes();
    let n = src.len().min(num_bytes);
    bytes[..n].copy_from_slice(&src[..n]);
    buf.append_bytes(&bytes);
}

/// Decode and strip trailing space padding.
pub fn decode_str(buf: &mut BitBuffer, width: u32) -> Result<String, GdlError> {
    let bytes = buf.pop_bytes((width / 8) as usize)?;
    let raw = String::from_utf8_lossy(&bytes).into_owned();
    Ok(raw.trim_end_matches(' ').to_string())
}

pub fn encode_enum(buf: &mut BitBuffer, value: u8, width: u32) -> Result<(), GdlError> {
    encode_uint(buf, value as i64, width, true)
}

pub fn decode_enum<T>(buf: &mut BitBuffer, width: u32, field: &'static str) -> Result<T, GdlError>
where
    T: TryFrom<u8>,
{
    let raw = decode_uint(buf, width)?;
    T::try_from(raw as u8).map_err(|_| GdlError::UnknownEnumValue { value: raw, field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_clamps_by_default() {
        let mut buf = BitBuffer::new();
        encode_uint(&mut buf, 999, 4, true).unwrap();
        assert_eq!(decode_uint(&mut buf, 4).unwrap(), 0b1111);
    }

    #[test]
    fn uint_strict_mode_rejects_overflow() {
        let mut buf = BitBuffer::new();
        assert!(matches!(
            encode_uint(&mut buf, 999, 4, false),
            Err(GdlError::BadIntegerSize { .. })
        ));
    }

    #[test]
    fn uint_rejects_negative() {
        let mut buf = BitBuffer::new();
        assert!(matches!(encode_uint(&mut buf, -1, 8, true), Err(GdlError::UnexpectedNegative)));
    }

    #[test]
    fn int_round_trips_negative_values() {
        let mut buf = BitBuffer::new();
        encode_int(&mut buf, -100, 16, true).unwrap();
        assert_eq!(decode_int(&mut buf, 16).unwrap(), -100);
    }

    #[test]
    fn int_clamps_to_range() {
        let mut buf = BitBuffer::new();
        encode_int(&mut buf, 1000, 8, true).unwrap();
        assert_eq!(decode_int(&mut buf, 8).unwrap(), 127);
    }

    #[test]
    fn string_pads_and_truncates() {
        let mut buf = BitBuffer::new();
        encode_str(&mut buf, "N825V", 64);
        assert_eq!(decode_str(&mut buf, 64).unwrap(), "N825V");
    }

    #[test]
    fn string_overlong_is_truncated() {
        let mut buf = BitBuffer::new();
        encode_str(&mut buf, "TOOLONGCALLSIGN", 64);
        assert_eq!(decode_str(&mut buf, 64).unwrap(), "TOOLONGC");
    }
}
