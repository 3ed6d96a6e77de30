use crate::bitbuf::BitBuffer;
use crate::error::GdlError;
use crate::field;
use crate::message::MessageKind;

const SENTINEL: u64 = 0x8000;

/// Signed altitude above terrain in feet (ID 9). `None` when unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeightAboveTerrain {
    pub height_above_terrain: Option<i32>,
}

impl MessageKind for HeightAboveTerrain {
    const MESSAGE_IDS: &'static [u8] = &[9];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        let mut buf = BitBuffer::new();
        match self.height_above_terrain {
            None => buf.append(SENTINEL, 16),
            Some(value) => field::encode_int(&mut buf, value as i64, 16, true)?,
        }
        Ok(buf)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let raw = field::decode_uint(body, 16)?;
        let height_above_terrain = if raw == SENTINEL {
            None
        } else {
            Some(field::sign_extend(raw, 16) as i32)
        };
        Ok(HeightAboveTerrain { height_above_terrain })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_sentinel_bytes() {
        let msg = HeightAboveTerrain { height_above_terrain: None };
        let body = msg.encode_body().unwrap();
        assert_eq!(body.to_bytes().unwrap(), vec![0x80, 0x00]);
    }

    #[test]
    fn round_trips_a_value() {
        let msg = HeightAboveTerrain { height_above_terrain: Some(-250) };
        let frame = msg.encode(false).unwrap();
        assert_eq!(HeightAboveTerrain::decode(&frame, true).unwrap(), msg);
    }
}
