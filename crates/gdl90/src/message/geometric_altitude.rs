use crate::bitbuf::BitBuffer;
use crate::error::GdlError;
use crate::field;
use crate::message::MessageKind;

const RESOLUTION_FT: f64 = 5.0;
const VFOM_UNAVAILABLE: u64 = 0x7FFF;
const VFOM_MAX_ENCODED: u64 = 0x7FFE;
const VFOM_MAX_VALUE: u32 = 32766;

/// Ownship altitude derived from GNSS rather than a pressure sensor
/// (ID 11). `vertical_figure_of_merit` is a raw meter count, not
/// resolution-scaled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OwnshipGeometricAltitude {
    pub geo_altitude: f64,
    pub vertical_warning_indicator: bool,
    pub vertical_figure_of_merit: Option<u32>,
}

impl MessageKind for OwnshipGeometricAltitude {
    const MESSAGE_IDS: &'static [u8] = &[11];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        let mut buf = BitBuffer::new();
        field::encode_int_scaled(&mut buf, self.geo_altitude, RESOLUTION_FT, 16)?;
        field::encode_bool(&mut buf, self.vertical_warning_indicator)?;
        match self.vertical_figure_of_merit {
            None => buf.append(VFOM_UNAVAILABLE, 15),
            Some(value) if value >= VFOM_MAX_VALUE => buf.append(VFOM_MAX_ENCODED, 15),
            Some(value) => buf.append(value as u64, 15),
        }
        Ok(buf)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let geo_altitude = field::decode_int_scaled(body, RESOLUTION_FT, 16)?;
        let vertical_warning_indicator = field::decode_bool(body)?;
        let raw_vfom = field::decode_uint(body, 15)?;
        let vertical_figure_of_merit = if raw_vfom == VFOM_UNAVAILABLE {
            None
        } else {
            Some(raw_vfom as u32)
        };
        Ok(OwnshipGeometricAltitude {
            geo_altitude,
            vertical_warning_indicator,
            vertical_figure_of_merit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vfom_clamps_at_max_value() {
        let msg = OwnshipGeometricAltitude {
            geo_altitude: 1000.0,
            vertical_warning_indicator: false,
            vertical_figure_of_merit: Some(50_000),
        };
        let decoded = OwnshipGeometricAltitude::decode(&msg.encode(false).unwrap(), true).unwrap();
        assert_eq!(decoded.vertical_figure_of_merit, Some(VFOM_MAX_ENCODED as u32));
    }

    #[test]
    fn absent_vfom_round_trips() {
        let msg = OwnshipGeometricAltitude {
            geo_altitude: -500.0,
            vertical_warning_indicator: true,
            vertical_figure_of_merit: None,
        };
        let decoded = OwnshipGeometricAltitude::decode(&msg.encode(true).unwrap(), false).unwrap();
        assert_eq!(decoded.vertical_figure_of_merit, None);
        assert_eq!(decoded.vertical_warning_indicator, true);
    }
}
