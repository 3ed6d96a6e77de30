use crate::bitbuf::BitBuffer;
use crate::error::GdlError;
use crate::field;
use crate::message::MessageKind;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = SECONDS_PER_MINUTE * 60;

/// UTC time of day, to second resolution. Stored separately from
/// `std::time` types since the wire value is just seconds-since-midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    fn total_seconds(&self) -> u32 {
        self.hour as u32 * SECONDS_PER_HOUR + self.minute as u32 * SECONDS_PER_MINUTE + self.second as u32
    }

    fn from_total_seconds(total: u32) -> Self {
        let hour = (total / SECONDS_PER_HOUR) as u8;
        let remainder = total % SECONDS_PER_HOUR;
        let minute = (remainder / SECONDS_PER_MINUTE) as u8;
        let second = (remainder % SECONDS_PER_MINUTE) as u8;
        TimeOfDay { hour, minute, second }
    }
}

/// State-of-health message broadcast once per second (ID 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    pub gps_position_valid: bool,
    pub maintenance_required: bool,
    pub ident_talkback: bool,
    pub self_assigned_address_talkback: bool,
    pub gps_battery_low: bool,
    pub ratcs_talkback: bool,
    pub uat_initialized: bool,
    pub csa_requested: bool,
    pub csa_unavailable: bool,
    pub utc_timing_valid: bool,
    pub timestamp: TimeOfDay,
    pub uplink_messages_count: u8,
    pub basic_long_messages_count: u16,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Heartbeat {
            gps_position_valid: false,
            maintenance_required: false,
            ident_talkback: false,
            self_assigned_address_talkback: false,
            gps_battery_low: false,
            ratcs_talkback: false,
            uat_initialized: false,
            csa_requested: false,
            csa_unavailable: false,
            utc_timing_valid: false,
            timestamp: TimeOfDay { hour: 0, minute: 0, second: 0 },
            uplink_messages_count: 0,
            basic_long_messages_count: 0,
        }
    }
}

impl MessageKind for Heartbeat {
    const MESSAGE_IDS: &'static [u8] = &[0];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        // The 17-bit timestamp is split 1/16 across two byte regions with
        // the low 16 bits little-endian among themselves; build it as its
        // own bit buffer first, then pull the three pieces back out in
        // wire order.
        let mut timestamp_bits = BitBuffer::new();
        timestamp_bits.append(self.timestamp.total_seconds() as u64, 17);
        let bit16 = timestamp_bits.pop_front(1)?;
        let high_byte = timestamp_bits.pop_front(8)?;
        let low_byte = timestamp_bits.pop_front(8)?;

        let mut buf = BitBuffer::new();
        field::encode_bool(&mut buf, self.gps_position_valid)?;
        field::encode_bool(&mut buf, self.maintenance_required)?;
        field::encode_bool(&mut buf, self.ident_talkback)?;
        field::encode_bool(&mut buf, self.self_assigned_address_talkback)?;
        field::encode_bool(&mut buf, self.gps_battery_low)?;
        field::encode_bool(&mut buf, self.ratcs_talkback)?;
        buf.append(0, 1);
        field::encode_bool(&mut buf, self.uat_initialized)?;

        buf.append(bit16, 1);
        field::encode_bool(&mut buf, self.csa_requested)?;
        field::encode_bool(&mut buf, self.csa_unavailable)?;
        buf.append(0, 4);
        field::encode_bool(&mut buf, self.utc_timing_valid)?;

        buf.append(low_byte, 8);
        buf.append(high_byte, 8);

        field::encode_uint(&mut buf, self.uplink_messages_count as i64, 5, true)?;
        buf.append(0, 1);
        field::encode_uint(&mut buf, self.basic_long_messages_count as i64, 10, true)?;

        Ok(buf)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        let gps_position_valid = field::decode_bool(body)?;
        let maintenance_required = field::decode_bool(body)?;
        let ident_talkback = field::decode_bool(body)?;
        let self_assigned_address_talkback = field::decode_bool(body)?;
        let gps_battery_low = field::decode_bool(body)?;
        let ratcs_talkback = field::decode_bool(body)?;
        body.pop_front(1)?;
        let uat_initialized = field::decode_bool(body)?;

        let bit16 = body.pop_front(1)?;
        let csa_requested = field::decode_bool(body)?;
        let csa_unavailable = field::decode_bool(body)?;
        body.pop_front(4)?;
        let utc_timing_valid = field::decode_bool(body)?;

        let low_byte = body.pop_front(8)?;
        let high_byte = body.pop_front(8)?;

        let mut timestamp_bits = BitBuffer::new();
        timestamp_bits.append(bit16, 1);
        timestamp_bits.append(high_byte, 8);
        timestamp_bits.append(low_byte, 8);
        let total_seconds = timestamp_bits.pop_front(17)? as u32;

        let uplink_messages_count = field::decode_uint(body, 5)? as u8;
        body.pop_front(1)?;
        let basic_long_messages_count = field::decode_uint(body, 10)? as u16;

        Ok(Heartbeat {
            gps_position_valid,
            maintenance_required,
            ident_talkback,
            self_assigned_address_talkback,
            gps_battery_low,
            ratcs_talkback,
            uat_initialized,
            csa_requested,
            csa_unavailable,
            utc_timing_valid,
            timestamp: TimeOfDay::from_total_seconds(total_seconds),
            uplink_messages_count,
            basic_long_messages_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageKind;

    #[test]
    fn one_second_past_midnight_round_trips() {
        let hb = Heartbeat {
            uat_initialized: true,
            timestamp: TimeOfDay { hour: 0, minute: 0, second: 1 },
            ..Heartbeat::default()
        };
        let frame = hb.encode(false).unwrap();
        assert_eq!(frame[0], 0x7E);
        assert_eq!(frame[1], 0x00);
        assert_eq!(frame[2], 0x01);
        assert_eq!(*frame.last().unwrap(), 0x7E);

        let decoded = Heartbeat::decode(&frame, true).unwrap();
        assert_eq!(decoded, hb);
    }

    #[test]
    fn round_trips_with_lsb_wire_order() {
        let hb = Heartbeat {
            gps_position_valid: true,
            uplink_messages_count: 17,
            basic_long_messages_count: 500,
            timestamp: TimeOfDay { hour: 13, minute: 45, second: 9 },
            ..Heartbeat::default()
        };
        let frame = hb.encode(true).unwrap();
        let decoded = Heartbeat::decode(&frame, false).unwrap();
        assert_eq!(decoded, hb);
    }
}
