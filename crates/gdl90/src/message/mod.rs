//! One record type per GDL 90 message, plus the dispatching [`Message`]
//! enum that the registry and stream parser operate over.

mod foreflight;
mod geometric_altitude;
mod heartbeat;
mod height_above_terrain;
mod initialization;
mod traffic_report;
mod uat;

pub use foreflight::{ForeflightAhrs, ForeflightId};
pub use geometric_altitude::OwnshipGeometricAltitude;
pub use heartbeat::{Heartbeat, TimeOfDay};
pub use height_above_terrain::HeightAboveTerrain;
pub use initialization::Initialization;
pub use traffic_report::{OwnshipReport, TrafficReport, TrafficReportBody};
pub use uat::{BasicUatReport, LongUatReport, UplinkData};

use crate::bitbuf::BitBuffer;
use crate::error::GdlError;
use crate::framing;

/// Shared capability every message record implements: its registry key,
/// and how to turn its body into/from bits. `encode`/`decode` layer the
/// framing codec on top and are provided once here.
pub trait MessageKind: Sized {
    const MESSAGE_IDS: &'static [u8];

    fn encode_body(&self) -> Result<BitBuffer, GdlError>;
    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError>;

    fn encode(&self, outgoing_lsb: bool) -> Result<Vec<u8>, GdlError> {
        let body = self.encode_body()?;
        framing::build(Self::MESSAGE_IDS, &body, outgoing_lsb)
    }

    fn decode(data: &[u8], incoming_msb: bool) -> Result<Self, GdlError> {
        let (ids, mut body) = framing::deconstruct(data, incoming_msb)?;
        if ids != Self::MESSAGE_IDS {
            return Err(GdlError::InvalidMessageID {
                expected: Self::MESSAGE_IDS.to_vec(),
                found: ids,
            });
        }
        let value = Self::decode_body(&mut body)?;
        if !body.is_empty() {
            return Err(GdlError::DataTooLong(body.len()));
        }
        Ok(value)
    }
}

/// A decoded (or to-be-encoded) message of any known type.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Heartbeat(Heartbeat),
    Initialization(Initialization),
    UplinkData(UplinkData),
    HeightAboveTerrain(HeightAboveTerrain),
    OwnshipReport(OwnshipReport),
    OwnshipGeometricAltitude(OwnshipGeometricAltitude),
    TrafficReport(TrafficReport),
    BasicUatReport(BasicUatReport),
    LongUatReport(LongUatReport),
    ForeflightId(ForeflightId),
    ForeflightAhrs(ForeflightAhrs),
}

impl Message {
    pub fn message_ids(&self) -> &'static [u8] {
        match self {
            Message::Heartbeat(_) => Heartbeat::MESSAGE_IDS,
            Message::Initialization(_) => Initialization::MESSAGE_IDS,
            Message::UplinkData(_) => UplinkData::MESSAGE_IDS,
            Message::HeightAboveTerrain(_) => HeightAboveTerrain::MESSAGE_IDS,
            Message::OwnshipReport(_) => OwnshipReport::MESSAGE_IDS,
            Message::OwnshipGeometricAltitude(_) => OwnshipGeometricAltitude::MESSAGE_IDS,
            Message::TrafficReport(_) => TrafficReport::MESSAGE_IDS,
            Message::BasicUatReport(_) => BasicUatReport::MESSAGE_IDS,
            Message::LongUatReport(_) => LongUatReport::MESSAGE_IDS,
            Message::ForeflightId(_) => ForeflightId::MESSAGE_IDS,
            Message::ForeflightAhrs(_) => ForeflightAhrs::MESSAGE_IDS,
        }
    }

    pub fn encode(&self, outgoing_lsb: bool) -> Result<Vec<u8>, GdlError> {
        match self {
            Message::Heartbeat(m) => m.encode(outgoing_lsb),
            Message::Initialization(m) => m.encode(outgoing_lsb),
            Message::UplinkData(m) => m.encode(outgoing_lsb),
            Message::HeightAboveTerrain(m) => m.encode(outgoing_lsb),
            Message::OwnshipReport(m) => m.encode(outgoing_lsb),
            Message::OwnshipGeometricAltitude(m) => m.encode(outgoing_lsb),
            Message::TrafficReport(m) => m.encode(outgoing_lsb),
            Message::BasicUatReport(m) => m.encode(outgoing_lsb),
            Message::LongUatReport(m) => m.encode(outgoing_lsb),
            Message::ForeflightId(m) => m.encode(outgoing_lsb),
            Message::ForeflightAhrs(m) => m.encode(outgoing_lsb),
        }
    }
}

macro_rules! from_message_kind {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Message {
            fn from(value: $ty) -> Self {
                Message::$variant(value)
            }
        }
    };
}

from_message_kind!(Heartbeat, Heartbeat);
from_message_kind!(Initialization, Initialization);
from_message_kind!(UplinkData, UplinkData);
from_message_kind!(HeightAboveTerrain, HeightAboveTerrain);
from_message_kind!(OwnshipReport, OwnshipReport);
from_message_kind!(OwnshipGeometricAltitude, OwnshipGeometricAltitude);
from_message_kind!(TrafficReport, TrafficReport);
from_message_kind!(BasicUatReport, BasicUatReport);
from_message_kind!(LongUatReport, LongUatReport);
from_message_kind!(ForeflightId, ForeflightId);
from_message_kind!(ForeflightAhrs, ForeflightAhrs);

/// Dispatch a frame's already-split id(s) and body to the matching
/// message type. Returns `Ok(None)` only when `ignore_unknown` is set and
/// the ids are not registered.
pub(crate) fn dispatch(
    ids: &[u8],
    mut body: BitBuffer,
    ignore_unknown: bool,
) -> Result<Option<Message>, GdlError> {
    let message = match ids {
        [0] => Message::Heartbeat(Heartbeat::decode_body(&mut body)?),
        [2] => Message::Initialization(Initialization::decode_body(&mut body)?),
        [7] => Message::UplinkData(UplinkData::decode_body(&mut body)?),
        [9] => Message::HeightAboveTerrain(HeightAboveTerrain::decode_body(&mut body)?),
        [10] => Message::OwnshipReport(OwnshipReport::decode_body(&mut body)?),
        [11] => Message::OwnshipGeometricAltitude(OwnshipGeometricAltitude::decode_body(&mut body)?),
        [20] => Message::TrafficReport(TrafficReport::decode_body(&mut body)?),
        [30] => Message::BasicUatReport(BasicUatReport::decode_body(&mut body)?),
        [31] => Message::LongUatReport(LongUatReport::decode_body(&mut body)?),
        [0x65, 0] => Message::ForeflightId(ForeflightId::decode_body(&mut body)?),
        [0x65, 1] => Message::ForeflightAhrs(ForeflightAhrs::decode_body(&mut body)?),
        other => {
            if ignore_unknown {
                return Ok(None);
            }
            return Err(GdlError::UnknownMessageID(other.to_vec()));
        }
    };
    if !body.is_empty() {
        return Err(GdlError::DataTooLong(body.len()));
    }
    Ok(Some(message))
}
