use thiserror::Error;

/// Every way a GDL 90 encode or decode call can fail.
///
/// The nine kinds named by the wire specification are distinct variants;
/// a handful of additional variants (`UnknownEnumValue`, `MalformedEscape`,
/// `BitBufferUnderflow`, `UnalignedBitBuffer`) round out total error
/// handling for situations left implicit elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GdlError {
    #[error("frame does not begin and end with the flag byte 0x7E")]
    MissingFlagBytes,

    #[error("CRC mismatch: received {received:#06x}, computed {computed:#06x}")]
    InvalidCRC { received: u16, computed: u16 },

    #[error("no message type registered for id(s) {0:?}")]
    UnknownMessageID(Vec<u8>),

    #[error("frame id(s) {found:?} do not match the decoder's expected id(s) {expected:?}")]
    InvalidMessageID {
        expected: Vec<u8>,
        found: Vec<u8>,
    },

    #[error("{0} bit(s) remained unconsumed after decoding a fixed-layout message")]
    DataTooLong(usize),

    #[error("callsign {0:?} is not alphanumeric once trimmed and upper-cased")]
    InvalidCallsign(String),

    #[error("negative value passed to an unsigned field encoder")]
    UnexpectedNegative,

    #[error("value {value} is out of range for a {width}-bit {signed} integer field")]
    BadIntegerSize {
        value: i64,
        width: u32,
        signed: &'static str,
    },

    #[error("UAT uplink payload is {actual} byte(s), expected {expected}")]
    UplinkDataWrongSize { expected: usize, actual: usize },

    #[error("{value} is not a valid value for enum field `{field}`")]
    UnknownEnumValue { value: u64, field: &'static str },

    #[error("trailing control escape byte (0x7D) with no following byte")]
    MalformedEscape,

    #[error("requested {requested} bit(s) but only {available} remain")]
    BitBufferUnderflow { requested: usize, available: usize },

    #[error("bit buffer holds {0} bit(s), which is not a whole number of bytes")]
    UnalignedBitBuffer(usize),
}
