use crate::bitbuf::BitBuffer;
use crate::error::GdlError;
use crate::field;
use crate::message::MessageKind;

const SERIAL_SENTINEL: u64 = u64::MAX;
const ANGLE16_RESOLUTION: f64 = 0.1;
const ANGLE16_SENTINEL: u64 = 0x7FFF;
const HEADING_SENTINEL: u64 = 0xFFFF;
const AIRSPEED_SENTINEL: u64 = 0xFFFF;

/// ForeFlight device identification extension (`0x65, 0`).
#[derive(Debug, Clone, PartialEq)]
pub struct ForeflightId {
    pub version: u8,
    pub device_serial_number: Option<u64>,
    pub device_name: String,
    pub device_long_name: Option<String>,
    pub is_msl: bool,
}

impl Default for ForeflightId {
    fn default() -> Self {
        ForeflightId {
            version: 1,
            device_serial_number: None,
            device_name: String::new(),
            device_long_name: None,
            is_msl: false,
        }
    }
}

impl MessageKind for ForeflightId {
    const MESSAGE_IDS: &'static [u8] = &[0x65, 0];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        let mut buf = BitBuffer::new();
        field::encode_uint(&mut buf, self.version as i64, 8, true)?;

        match self.device_serial_number {
            None => buf.append(SERIAL_SENTINEL, 64),
            Some(value) => buf.append(value, 64),
        }

        field::encode_str(&mut buf, &self.device_name, 64);

        let long_name = self
            .device_long_name
            .clone()
            .unwrap_or_else(|| self.device_name.clone());
        field::encode_str(&mut buf, &long_name, 128);

        buf.append(0, 7);
        field::encode_bool(&mut buf, self.is_msl)?;
        buf.append(0, 24);

        Ok(buf)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let version = field::decode_uint(body, 8)? as u8;

        let raw_serial = body.pop_front(64)?;
        let device_serial_number = if raw_serial == SERIAL_SENTINEL { None } else { Some(raw_serial) };

        let device_name = field::decode_str(body, 64)?;

        let long_name_raw = field::decode_str(body, 128)?;
        let device_long_name = if long_name_raw.is_empty() { None } else { Some(long_name_raw) };

        body.pop_front(7)?;
        let is_msl = field::decode_bool(body)?;
        body.pop_front(24)?;

        Ok(ForeflightId {
            version,
            device_serial_number,
            device_name,
            device_long_name,
            is_msl,
        })
    }
}

fn encode_angle16(buf: &mut BitBuffer, value: Option<f64>, range: f64) -> Result<(), GdlError> {
    match value {
        Some(v) if v.abs() <= range => field::encode_int_scaled(buf, v, ANGLE16_RESOLUTION, 16)?,
        _ => buf.append(ANGLE16_SENTINEL, 16),
    }
    Ok(())
}

fn decode_angle16(body: &mut BitBuffer) -> Result<Option<f64>, GdlError> {
    let raw = field::decode_uint(body, 16)?;
    if raw == ANGLE16_SENTINEL {
        Ok(None)
    } else {
        Ok(Some(field::sign_extend(raw, 16) as f64 * ANGLE16_RESOLUTION))
    }
}

/// Heading is one combined 16-bit span: 1 bit `is_magnetic_heading`
/// followed by a 15-bit signed value, but the sentinel for "absent"
/// spans the whole 16 bits rather than living in the 15-bit sub-field.
fn encode_heading(buf: &mut BitBuffer, heading: Option<f64>, is_magnetic_heading: Option<bool>) -> Result<(), GdlError> {
    match (heading, is_magnetic_heading) {
        (Some(h), Some(is_magnetic)) if h.abs() <= 360.0 => {
            field::encode_bool(buf, is_magnetic)?;
            field::encode_int_scaled(buf, h, ANGLE16_RESOLUTION, 15)?;
        }
        _ => buf.append(HEADING_SENTINEL, 16),
    }
    Ok(())
}

fn decode_heading(body: &mut BitBuffer) -> Result<(Option<f64>, Option<bool>), GdlError> {
    let raw = field::decode_uint(body, 16)?;
    if raw == HEADING_SENTINEL {
        return Ok((None, None));
    }
    let is_magnetic_heading = (raw >> 15) & 1 == 1;
    let heading = field::sign_extend(raw & 0x7FFF, 15) as f64 * ANGLE16_RESOLUTION;
    Ok((Some(heading), Some(is_magnetic_heading)))
}

fn encode_airspeed(buf: &mut BitBuffer, value: Option<i32>) -> Result<(), GdlError> {
    match value {
        None => buf.append(AIRSPEED_SENTINEL, 16),
        Some(v) => field::encode_int(buf, v as i64, 16, true)?,
    }
    Ok(())
}

fn decode_airspeed(body: &mut BitBuffer) -> Result<Option<i32>, GdlError> {
    let raw = field::decode_uint(body, 16)?;
    if raw == AIRSPEED_SENTINEL {
        Ok(None)
    } else {
        Ok(Some(field::sign_extend(raw, 16) as i32))
    }
}

/// ForeFlight attitude/airspeed extension (`0x65, 1`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForeflightAhrs {
    pub roll: Option<f64>,
    pub pitch: Option<f64>,
    pub heading: Option<f64>,
    pub is_magnetic_heading: Option<bool>,
    pub indicated_airspeed: Option<i32>,
    pub true_airspeed: Option<i32>,
}

impl MessageKind for ForeflightAhrs {
    const MESSAGE_IDS: &'static [u8] = &[0x65, 1];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        let mut buf = BitBuffer::new();
        encode_angle16(&mut buf, self.roll, 180.0)?;
        encode_angle16(&mut buf, self.pitch, 180.0)?;
        encode_heading(&mut buf, self.heading, self.is_magnetic_heading)?;
        encode_airspeed(&mut buf, self.indicated_airspeed)?;
        encode_airspeed(&mut buf, self.true_airspeed)?;
        Ok(buf)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let roll = decode_angle16(body)?;
        let pitch = decode_angle16(body)?;
        let (heading, is_magnetic_heading) = decode_heading(body)?;
        let indicated_airspeed = decode_airspeed(body)?;
        let true_airspeed = decode_airspeed(body)?;
        Ok(ForeflightAhrs {
            roll,
            pitch,
            heading,
            is_magnetic_heading,
            indicated_airspeed,
            true_airspeed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trips_with_long_name_fallback() {
        let msg = ForeflightId {
            version: 1,
            device_serial_number: Some(42),
            device_name: "iPad".to_string(),
            device_long_name: None,
            is_msl: true,
        };
        let decoded = ForeflightId::decode(&msg.encode(false).unwrap(), true).unwrap();
        assert_eq!(decoded.device_long_name, Some("iPad".to_string()));
        assert_eq!(decoded.device_serial_number, Some(42));
        assert!(decoded.is_msl);
    }

    #[test]
    fn absent_serial_number_is_sentinel() {
        let msg = ForeflightId::default();
        let decoded = ForeflightId::decode(&msg.encode(true).unwrap(), false).unwrap();
        assert_eq!(decoded.device_serial_number, None);
    }

    #[test]
    fn ahrs_round_trips_all_present() {
        let msg = ForeflightAhrs {
            roll: Some(12.3),
            pitch: Some(-4.5),
            heading: Some(270.0),
            is_magnetic_heading: Some(true),
            indicated_airspeed: Some(120),
            true_airspeed: Some(128),
        };
        let decoded = ForeflightAhrs::decode(&msg.encode(false).unwrap(), true).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn ahrs_absent_heading_is_full_sentinel() {
        let msg = ForeflightAhrs::default();
        let decoded = ForeflightAhrs::decode(&msg.encode(true).unwrap(), false).unwrap();
        assert_eq!(decoded.heading, None);
        assert_eq!(decoded.is_magnetic_heading, None);
    }
}
