use gdl90::enums::{AddressType, Accuracy, EmergencyPriorityCode, EmitterCategory, Integrity, TrackType};
use gdl90::message::TrafficReportBody;

/// One aircraft's state as read from whatever is backing a
/// [`TrafficSource`]. Shaped to translate directly into a
/// [`TrafficReportBody`]; a real deployment would populate this from a
/// database row or an ingester's in-memory track table instead of the
/// synthetic values [`DemoSource`] returns.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficRow {
    pub address: u32,
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pressure_altitude: Option<i32>,
    pub track: f64,
    pub horizontal_velocity: Option<u32>,
    pub vertical_velocity: Option<i32>,
}

impl From<TrafficRow> for TrafficReportBody {
    fn from(row: TrafficRow) -> Self {
        TrafficReportBody {
            traffic_alert: false,
            address_type: AddressType::AdsbIcao,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            pressure_altitude: row.pressure_altitude,
            airborne: true,
            report_extrapolated: false,
            track_type: TrackType::TrueTrackAngle,
            integrity: Integrity::LessThan0Dot2NmHpl,
            accuracy: Accuracy::LessThan0Dot1Nm,
            horizontal_velocity: row.horizontal_velocity,
            vertical_velocity: row.vertical_velocity,
            track: row.track,
            emitter_category: EmitterCategory::Light,
            callsign: Some(row.callsign),
            emergency_priority_code: EmergencyPriorityCode::NoEmergency,
        }
    }
}

/// Where the broadcaster's traffic table comes from. The database
/// queries and OGN/OpenSky ingesters a production deployment would use
/// are out of scope here; this trait is the seam a real implementation
/// plugs into.
pub trait TrafficSource: Send + Sync {
    fn snapshot(&self) -> Vec<TrafficRow>;
}

/// A fixed, in-memory pair of aircraft, for running the binary without
/// a real data source wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoSource;

impl TrafficSource for DemoSource {
    fn snapshot(&self) -> Vec<TrafficRow> {
        vec![
            TrafficRow {
                address: 0xA1B2C3,
                callsign: "N825V".to_string(),
                latitude: 44.903_056,
                longitude: -122.869_722,
                pressure_altitude: Some(5_500),
                track: 270.0,
                horizontal_velocity: Some(120),
                vertical_velocity: Some(0),
            },
            TrafficRow {
                address: 0xA4D3E1,
                callsign: "UAL245".to_string(),
                latitude: 45.588_4,
                longitude: -122.597_2,
                pressure_altitude: Some(18_000),
                track: 90.0,
                horizontal_velocity: Some(340),
                vertical_velocity: Some(-512),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_source_rows_convert_to_traffic_bodies() {
        for row in DemoSource.snapshot() {
            let callsign = row.callsign.clone();
            let body: TrafficReportBody = row.into();
            assert_eq!(body.callsign, Some(callsign));
        }
    }
}
