use crate::bitbuf::BitBuffer;
use crate::error::GdlError;
use crate::message::MessageKind;

const TIME_OF_RECEPTION_RESOLUTION_NS: f64 = 80.0;
const TIME_OF_RECEPTION_MAX_NS: u32 = 100_000_000;
const TIME_OF_RECEPTION_SENTINEL: u32 = 0xFF_FFFF;

/// Time of reception is a 24-bit count of 80 ns ticks, but it rides the
/// wire byte-swapped: the three octets are reversed end to end rather
/// than bit-reversed, independent of the frame's own LSB/MSB convention.
fn encode_time_of_reception(nanos: Option<u32>) -> [u8; 3] {
    let raw = match nanos {
        Some(value) if value <= TIME_OF_RECEPTION_MAX_NS => {
            (value as f64 / TIME_OF_RECEPTION_RESOLUTION_NS).floor() as u32
        }
        _ => TIME_OF_RECEPTION_SENTINEL,
    };
    let msb_first = [(raw >> 16) as u8, (raw >> 8) as u8, raw as u8];
    [msb_first[2], msb_first[1], msb_first[0]]
}

fn decode_time_of_reception(swapped: [u8; 3]) -> Option<u32> {
    let msb_first = [swapped[2], swapped[1], swapped[0]];
    let raw = ((msb_first[0] as u32) << 16) | ((msb_first[1] as u32) << 8) | (msb_first[2] as u32);
    if raw == TIME_OF_RECEPTION_SENTINEL {
        None
    } else {
        Some((raw as f64 * TIME_OF_RECEPTION_RESOLUTION_NS) as u32)
    }
}

fn encode_uat_body(time_of_reception: Option<u32>, payload: &[u8], expected_len: usize) -> Result<BitBuffer, GdlError> {
    if payload.len() != expected_len {
        return Err(GdlError::UplinkDataWrongSize {
            expected: expected_len,
            actual: payload.len(),
        });
    }
    let mut buf = BitBuffer::new();
    buf.append_bytes(&encode_time_of_reception(time_of_reception));
    buf.append_bytes(payload);
    Ok(buf)
}

fn decode_uat_body(body: &mut BitBuffer, expected_len: usize) -> Result<(Option<u32>, Vec<u8>), GdlError> {
    let swapped = body.pop_bytes(3)?;
    let time_of_reception = decode_time_of_reception([swapped[0], swapped[1], swapped[2]]);
    let payload = body.pop_bytes(expected_len)?;
    Ok((time_of_reception, payload))
}

/// FIS-B/TIS-B uplink payload relay (ID 7). The payload is opaque at
/// this layer; decoding its contents is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UplinkData {
    pub time_of_reception: Option<u32>,
    pub uplink_payload: Vec<u8>,
}

impl Default for UplinkData {
    fn default() -> Self {
        UplinkData {
            time_of_reception: None,
            uplink_payload: vec![0; 432],
        }
    }
}

impl MessageKind for UplinkData {
    const MESSAGE_IDS: &'static [u8] = &[7];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        encode_uat_body(self.time_of_reception, &self.uplink_payload, 432)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let (time_of_reception, uplink_payload) = decode_uat_body(body, 432)?;
        Ok(UplinkData { time_of_reception, uplink_payload })
    }
}

/// Basic UAT ADS-B report relay (ID 30), a raw 18-byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicUatReport {
    pub time_of_reception: Option<u32>,
    pub uplink_payload: Vec<u8>,
}

impl Default for BasicUatReport {
    fn default() -> Self {
        BasicUatReport {
            time_of_reception: None,
            uplink_payload: vec![0; 18],
        }
    }
}

impl MessageKind for BasicUatReport {
    const MESSAGE_IDS: &'static [u8] = &[30];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        encode_uat_body(self.time_of_reception, &self.uplink_payload, 18)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let (time_of_reception, uplink_payload) = decode_uat_body(body, 18)?;
        Ok(BasicUatReport { time_of_reception, uplink_payload })
    }
}

/// Long UAT ADS-B report relay (ID 31), a raw 34-byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongUatReport {
    pub time_of_reception: Option<u32>,
    pub uplink_payload: Vec<u8>,
}

impl Default for LongUatReport {
    fn default() -> Self {
        LongUatReport {
            time_of_reception: None,
            uplink_payload: vec![0; 34],
        }
    }
}

impl MessageKind for LongUatReport {
    const MESSAGE_IDS: &'static [u8] = &[31];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        encode_uat_body(self.time_of_reception, &self.uplink_payload, 34)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let (time_of_reception, uplink_payload) = decode_uat_body(body, 34)?;
        Ok(LongUatReport { time_of_reception, uplink_payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_report_round_trips() {
        let msg = BasicUatReport {
            time_of_reception: Some(8_000_000),
            uplink_payload: (0u8..18).collect(),
        };
        let frame = msg.encode(false).unwrap();
        let decoded = BasicUatReport::decode(&frame, true).unwrap();
        assert_eq!(decoded.uplink_payload, msg.uplink_payload);
        assert_eq!(decoded.time_of_reception, Some(8_000_000));
    }

    #[test]
    fn absent_time_of_reception_is_sentinel() {
        let msg = LongUatReport::default();
        let decoded = LongUatReport::decode(&msg.encode(true).unwrap(), false).unwrap();
        assert_eq!(decoded.time_of_reception, None);
    }

    #[test]
    fn wrong_size_payload_is_rejected() {
        let msg = BasicUatReport {
            time_of_reception: None,
            uplink_payload: vec![0; 17],
        };
        assert!(matches!(
            msg.encode_body(),
            Err(GdlError::UplinkDataWrongSize { expected: 18, actual: 17 })
        ));
    }

    #[test]
    fn out_of_range_time_of_reception_becomes_sentinel() {
        let msg = UplinkData {
            time_of_reception: Some(TIME_OF_RECEPTION_MAX_NS + 1),
            uplink_payload: vec![0xAA; 432],
        };
        let decoded = UplinkData::decode(&msg.encode(false).unwrap(), true).unwrap();
        assert_eq!(decoded.time_of_reception, None);
    }
}
