//! Enumerated field values. Each implements `TryFrom<u8>`, failing on any
//! integer not assigned a meaning rather than
//! silently coercing to a neighboring variant.

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    ($name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant = $value),+
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }
    };
}

wire_enum!(AddressType {
    AdsbIcao = 0,
    AdsbSelfAssigned = 1,
    TisbIcao = 2,
    TisbTrackFile = 3,
    SurfaceVehicle = 4,
    GroundStationBeacon = 5,
});

wire_enum!(TrackType {
    Invalid = 0,
    TrueTrackAngle = 1,
    MagneticHeading = 2,
    TrueHeading = 3,
});

/// Navigation Integrity Category.
wire_enum!(Integrity {
    Unknown = 0,
    LessThan20Nm = 1,
    LessThan8Nm = 2,
    LessThan4Nm = 3,
    LessThan2Nm = 4,
    LessThan1Nm = 5,
    LessThan0Dot6Nm = 6,
    LessThan0Dot2NmHpl = 7,
    LessThan75mHpl = 8,
    LessThan25mHpl = 9,
    LessThan7Dot5mHpl = 10,
    Hpl3mVpl4m = 11,
});

/// Navigation Accuracy Category for Position.
wire_enum!(Accuracy {
    Unknown = 0,
    LessThan10Nm = 1,
    LessThan4Nm = 2,
    LessThan2Nm = 3,
    LessThan1Nm = 4,
    LessThan0Dot5Nm = 5,
    LessThan0Dot3Nm = 6,
    LessThan0Dot1Nm = 7,
    LessThan0Dot05Nm = 8,
    Hfom30mVfom45m = 9,
    Hfom10mVfom15m = 10,
    Hfom3mVfom4m = 11,
});

wire_enum!(EmergencyPriorityCode {
    NoEmergency = 0,
    GeneralEmergency = 1,
    MedicalEmergency = 2,
    MinimumFuel = 3,
    NoCommunication = 4,
    UnlawfulInterference = 5,
    DownedAircraft = 6,
});

/// Emitter category. Values 8, 13, 16, and anything above 21 are not
/// assigned a meaning and must fail to decode rather than be
/// coerced to a neighboring variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitterCategory {
    Unknown = 0,
    Light = 1,
    Small = 2,
    Large = 3,
    HighVortexLarge = 4,
    Heavy = 5,
    HighlyManeuverable = 6,
    Rotorcraft = 7,
    GliderSailplane = 9,
    LighterThanAir = 10,
    ParachutistSkydiver = 11,
    UltralightHangGliderParaglider = 12,
    UnmannedAerialVehicle = 14,
    SpaceTransatmosphericVehicle = 15,
    SurfaceEmergencyVehicle = 17,
    SurfaceServiceVehicle = 18,
    PointObstacle = 19,
    ClusterObstacle = 20,
    LineObstacle = 21,
}

impl TryFrom<u8> for EmitterCategory {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Light),
            2 => Ok(Self::Small),
            3 => Ok(Self::Large),
            4 => Ok(Self::HighVortexLarge),
            5 => Ok(Self::Heavy),
            6 => Ok(Self::HighlyManeuverable),
            7 => Ok(Self::Rotorcraft),
            9 => Ok(Self::GliderSailplane),
            10 => Ok(Self::LighterThanAir),
            11 => Ok(Self::ParachutistSkydiver),
            12 => Ok(Self::UltralightHangGliderParaglider),
            14 => Ok(Self::UnmannedAerialVehicle),
            15 => Ok(Self::SpaceTransatmosphericVehicle),
            17 => Ok(Self::SurfaceEmergencyVehicle),
            18 => Ok(Self::SurfaceServiceVehicle),
            19 => Ok(Self::PointObstacle),
            20 => Ok(Self::ClusterObstacle),
            21 => Ok(Self::LineObstacle),
            other => Err(other),
        }
    }
}

impl From<EmitterCategory> for u8 {
    fn from(value: EmitterCategory) -> u8 {
        value as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emitter_category_gaps_fail() {
        assert!(EmitterCategory::try_from(8).is_err());
        assert!(EmitterCategory::try_from(13).is_err());
        assert!(EmitterCategory::try_from(16).is_err());
        assert!(EmitterCategory::try_from(22).is_err());
    }

    #[test]
    fn emitter_category_known_values_round_trip() {
        for raw in [0u8, 7, 9, 21] {
            let value = EmitterCategory::try_from(raw).unwrap();
            assert_eq!(u8::from(value), raw);
        }
    }

    #[test]
    fn track_type_out_of_range_fails() {
        assert!(TrackType::try_from(4).is_err());
    }
}
