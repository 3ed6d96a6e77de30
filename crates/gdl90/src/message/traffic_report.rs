use crate::bitbuf::BitBuffer;
use crate::enums::{AddressType, Accuracy, EmergencyPriorityCode, EmitterCategory, Integrity, TrackType};
use crate::error::GdlError;
use crate::field;
use crate::message::MessageKind;

const LAT_LON_RESOLUTION: f64 = 180.0 / 8_388_608.0; // 180 / 2^23
const PRESSURE_ALTITUDE_OFFSET: i64 = 1000;
const PRESSURE_ALTITUDE_RESOLUTION: f64 = 25.0;
const PRESSURE_ALTITUDE_MIN: i32 = -1000;
const PRESSURE_ALTITUDE_MAX: i32 = 101_350;
const PRESSURE_ALTITUDE_SENTINEL: u64 = 0xFFF;
const HORIZONTAL_VELOCITY_MAX: u32 = 4094;
const HORIZONTAL_VELOCITY_SENTINEL: u64 = 0xFFF;
const VERTICAL_VELOCITY_RESOLUTION: f64 = 64.0;
const VERTICAL_VELOCITY_CLAMP: i32 = 32576;
const VERTICAL_VELOCITY_CLAMPED_ENCODE: i32 = 32640;
const VERTICAL_VELOCITY_SENTINEL: u64 = 0x800;
const TRACK_RESOLUTION: f64 = 360.0 / 256.0;

/// The 27-byte body shared by Traffic Report (ID 20) and Ownship Report
/// (ID 10); only the leading message id differs between the two.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficReportBody {
    pub traffic_alert: bool,
    pub address_type: AddressType,
    pub address: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub pressure_altitude: Option<i32>,
    pub airborne: bool,
    pub report_extrapolated: bool,
    pub track_type: TrackType,
    pub integrity: Integrity,
    pub accuracy: Accuracy,
    pub horizontal_velocity: Option<u32>,
    pub vertical_velocity: Option<i32>,
    pub track: f64,
    pub emitter_category: EmitterCategory,
    pub callsign: Option<String>,
    pub emergency_priority_code: EmergencyPriorityCode,
}

impl Default for TrafficReportBody {
    fn default() -> Self {
        TrafficReportBody {
            traffic_alert: false,
            address_type: AddressType::AdsbIcao,
            address: 0,
            latitude: 0.0,
            longitude: 0.0,
            pressure_altitude: None,
            airborne: false,
            report_extrapolated: false,
            track_type: TrackType::Invalid,
            integrity: Integrity::Unknown,
            accuracy: Accuracy::Unknown,
            horizontal_velocity: None,
            vertical_velocity: None,
            track: 0.0,
            emitter_category: EmitterCategory::Unknown,
            callsign: None,
            emergency_priority_code: EmergencyPriorityCode::NoEmergency,
        }
    }
}

fn encode_callsign(buf: &mut BitBuffer, callsign: &Option<String>) -> Result<(), GdlError> {
    let trimmed = callsign.as_deref().unwrap_or("").trim().to_uppercase();
    if !trimmed.is_empty() && !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GdlError::InvalidCallsign(trimmed));
    }
    field::encode_str(buf, &trimmed, 64);
    Ok(())
}

impl TrafficReportBody {
    pub fn encode(&self) -> Result<BitBuffer, GdlError> {
        let mut buf = BitBuffer::new();

        field::encode_bool(&mut buf, self.traffic_alert)?;
        buf.append(0, 3);
        field::encode_enum(&mut buf, self.address_type.into(), 4)?;
        field::encode_uint(&mut buf, self.address as i64, 24, false)?;

        let (latitude, longitude) = if self.integrity == Integrity::Unknown {
            (0.0, 0.0)
        } else {
            (self.latitude, self.longitude)
        };
        field::encode_int_scaled(&mut buf, latitude, LAT_LON_RESOLUTION, 24)?;
        field::encode_int_scaled(&mut buf, longitude, LAT_LON_RESOLUTION, 24)?;

        match self.pressure_altitude {
            None => buf.append(PRESSURE_ALTITUDE_SENTINEL, 12),
            Some(alt) => {
                let clamped = alt.clamp(PRESSURE_ALTITUDE_MIN, PRESSURE_ALTITUDE_MAX);
                field::encode_uint_offset_scaled(
                    &mut buf,
                    clamped as i64,
                    PRESSURE_ALTITUDE_OFFSET,
                    PRESSURE_ALTITUDE_RESOLUTION,
                    12,
                )?;
            }
        }

        field::encode_bool(&mut buf, self.airborne)?;
        field::encode_bool(&mut buf, self.report_extrapolated)?;
        field::encode_enum(&mut buf, self.track_type.into(), 2)?;
        field::encode_enum(&mut buf, self.integrity.into(), 4)?;
        field::encode_enum(&mut buf, self.accuracy.into(), 4)?;

        match self.horizontal_velocity {
            None => buf.append(HORIZONTAL_VELOCITY_SENTINEL, 12),
            Some(value) => {
                field::encode_uint(&mut buf, value.min(HORIZONTAL_VELOCITY_MAX) as i64, 12, true)?
            }
        }

        match self.vertical_velocity {
            None => buf.append(VERTICAL_VELOCITY_SENTINEL, 12),
            Some(value) => {
                let clamped = if value > VERTICAL_VELOCITY_CLAMP {
                    VERTICAL_VELOCITY_CLAMPED_ENCODE
                } else if value < -VERTICAL_VELOCITY_CLAMP {
                    -VERTICAL_VELOCITY_CLAMPED_ENCODE
                } else {
                    value
                };
                field::encode_int_scaled(&mut buf, clamped as f64, VERTICAL_VELOCITY_RESOLUTION, 12)?;
            }
        }

        field::encode_uint_scaled(&mut buf, self.track, TRACK_RESOLUTION, 8)?;
        field::encode_enum(&mut buf, self.emitter_category.into(), 8)?;
        encode_callsign(&mut buf, &self.callsign)?;
        field::encode_enum(&mut buf, self.emergency_priority_code.into(), 4)?;
        buf.append(0, 4);

        Ok(buf)
    }

    pub fn decode(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let traffic_alert = field::decode_bool(body)?;
        body.pop_front(3)?;
        let address_type = field::decode_enum(body, 4, "address_type")?;
        let address = field::decode_uint(body, 24)? as u32;

        let latitude = field::decode_int_scaled(body, LAT_LON_RESOLUTION, 24)?;
        let longitude = field::decode_int_scaled(body, LAT_LON_RESOLUTION, 24)?;

        let raw_altitude = field::decode_uint(body, 12)?;
        let pressure_altitude = if raw_altitude == PRESSURE_ALTITUDE_SENTINEL {
            None
        } else {
            Some((raw_altitude as f64 * PRESSURE_ALTITUDE_RESOLUTION - PRESSURE_ALTITUDE_OFFSET as f64) as i32)
        };

        let airborne = field::decode_bool(body)?;
        let report_extrapolated = field::decode_bool(body)?;
        let track_type = field::decode_enum(body, 2, "track_type")?;
        let integrity: Integrity = field::decode_enum(body, 4, "integrity")?;
        let accuracy = field::decode_enum(body, 4, "accuracy")?;

        let raw_velocity = field::decode_uint(body, 12)?;
        let horizontal_velocity = if raw_velocity == HORIZONTAL_VELOCITY_SENTINEL {
            None
        } else {
            Some(raw_velocity as u32)
        };

        let raw_vvi = field::decode_uint(body, 12)?;
        let vertical_velocity = if raw_vvi == VERTICAL_VELOCITY_SENTINEL {
            None
        } else {
            let signed = field::sign_extend(raw_vvi, 12);
            Some((signed as f64 * VERTICAL_VELOCITY_RESOLUTION) as i32)
        };

        let track = field::decode_uint_scaled(body, TRACK_RESOLUTION, 8)? as f64;
        let emitter_category = field::decode_enum(body, 8, "emitter_category")?;
        let callsign_raw = field::decode_str(body, 64)?;
        let callsign = if callsign_raw.is_empty() { None } else { Some(callsign_raw) };
        let emergency_priority_code = field::decode_enum(body, 4, "emergency_priority_code")?;
        body.pop_front(4)?;

        let (latitude, longitude) = if integrity == Integrity::Unknown {
            (0.0, 0.0)
        } else {
            (latitude, longitude)
        };

        Ok(TrafficReportBody {
            traffic_alert,
            address_type,
            address,
            latitude,
            longitude,
            pressure_altitude,
            airborne,
            report_extrapolated,
            track_type,
            integrity,
            accuracy,
            horizontal_velocity,
            vertical_velocity,
            track,
            emitter_category,
            callsign,
            emergency_priority_code,
        })
    }
}

/// Traffic Report (ID 20): another aircraft's state, as seen by this
/// receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficReport(pub TrafficReportBody);

impl MessageKind for TrafficReport {
    const MESSAGE_IDS: &'static [u8] = &[20];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        self.0.encode()
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        Ok(TrafficReport(TrafficReportBody::decode(body)?))
    }
}

/// Ownship Report (ID 10): the receiver's own state, same body layout as
/// [`TrafficReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct OwnshipReport(pub TrafficReportBody);

impl MessageKind for OwnshipReport {
    const MESSAGE_IDS: &'static [u8] = &[10];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        self.0.encode()
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        Ok(OwnshipReport(TrafficReportBody::decode(body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_integrity_zeroes_position() {
        let report = TrafficReport(TrafficReportBody {
            integrity: Integrity::Unknown,
            latitude: 47.0,
            longitude: 2.0,
            ..TrafficReportBody::default()
        });
        let decoded = TrafficReport::decode(&report.encode(false).unwrap(), true).unwrap();
        assert_eq!(decoded.0.latitude, 0.0);
        assert_eq!(decoded.0.longitude, 0.0);
    }

    #[test]
    fn callsign_is_padded_and_uppercased() {
        let report = TrafficReport(TrafficReportBody {
            callsign: Some("n825v".to_string()),
            ..TrafficReportBody::default()
        });
        let body = report.encode_body().unwrap();
        let bytes = body.to_bytes().unwrap();
        // traffic_alert(4) + address_type(4) + address(24) + lat(24) + lon(24)
        // + pressure_altitude(12) + airborne(1) + report_extrapolated(1)
        // + track_type(2) + integrity(4) + accuracy(4) + hvel(12) + vvel(12)
        // + track(8) + emitter_category(8) = 144 bits = 18 bytes before callsign.
        let callsign_bytes = &bytes[18..26];
        assert_eq!(callsign_bytes, b"N825V   ");
    }

    #[test]
    fn non_alphanumeric_callsign_is_rejected() {
        let report = TrafficReport(TrafficReportBody {
            callsign: Some("ab!c".to_string()),
            ..TrafficReportBody::default()
        });
        assert!(matches!(report.encode_body(), Err(GdlError::InvalidCallsign(_))));
    }

    #[test]
    fn horizontal_velocity_clamps_to_max_exceeded() {
        let report = TrafficReport(TrafficReportBody {
            horizontal_velocity: Some(5000),
            ..TrafficReportBody::default()
        });
        let decoded = TrafficReport::decode(&report.encode(true).unwrap(), false).unwrap();
        assert_eq!(decoded.0.horizontal_velocity, Some(HORIZONTAL_VELOCITY_MAX));
    }

    #[test]
    fn ownship_and_traffic_share_body_layout() {
        let body = TrafficReportBody {
            address: 0xABCDEF,
            track: 90.0,
            ..TrafficReportBody::default()
        };
        let traffic = TrafficReport(body.clone()).encode_body().unwrap();
        let ownship = OwnshipReport(body).encode_body().unwrap();
        assert_eq!(traffic.to_bytes().unwrap(), ownship.to_bytes().unwrap());
    }
}
