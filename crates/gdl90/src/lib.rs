#![doc = include_str!("../readme.md")]

pub mod bitbuf;
pub mod crc;
pub mod enums;
pub mod error;
pub mod field;
pub mod framing;
pub mod message;

pub use error::GdlError;
pub use message::{Message, MessageKind};

/// Encode any known message as a complete GDL 90 frame.
///
/// `outgoing_lsb` selects the wire's per-byte bit order: `true` reverses
/// each byte before emission (the convention most serial GDL 90 sources
/// use), `false` leaves bytes MSB-first.
pub fn encode_message(message: &Message, outgoing_lsb: bool) -> Result<Vec<u8>, GdlError> {
    message.encode(outgoing_lsb)
}

/// Decode a single flag-delimited frame into a [`Message`].
///
/// `incoming_msb` is the inverse of `outgoing_lsb`: `true` if the frame's
/// bytes are already MSB-first, `false` if they need a bit-reversal
/// before unescaping. When `ignore_unknown` is set, a frame whose
/// message id(s) are not in the registry yields `Ok(None)` instead of
/// `Err(GdlError::UnknownMessageID)`.
pub fn parse_message(
    data: &[u8],
    incoming_msb: bool,
    ignore_unknown: bool,
) -> Result<Option<Message>, GdlError> {
    let (ids, body) = framing::deconstruct(data, incoming_msb)?;
    message::dispatch(&ids, body, ignore_unknown)
}

/// Split a byte stream holding zero or more concatenated GDL 90 frames
/// and decode each one.
///
/// Frames are delimited by the `0x7E` flag byte; each frame carries its
/// own open and close flag (as [`framing::build`] emits them), so two
/// consecutive frames appear back to back as `... 0x7E 0x7E ...` rather
/// than sharing a single flag byte. Escaping guarantees a `0x7E` inside
/// a frame's payload never appears unescaped, so scanning for the next
/// flag byte after an open always lands on that frame's own close. A
/// trailing byte run with no closing flag is a partial frame and is
/// dropped. A message whose ids are unknown is skipped rather than
/// aborting the whole stream when `ignore_unknown` is set.
pub fn parse_messages(
    data: &[u8],
    incoming_msb: bool,
    ignore_unknown: bool,
) -> Result<Vec<Message>, GdlError> {
    let mut messages = Vec::new();
    let mut index = 0;

    while index < data.len() {
        if data[index] != framing::FLAG_BYTE {
            index += 1;
            continue;
        }
        let open = index;
        let mut close = open + 1;
        while close < data.len() && data[close] != framing::FLAG_BYTE {
            close += 1;
        }
        if close >= data.len() {
            break;
        }
        if let Some(message) = parse_message(&data[open..=close], incoming_msb, ignore_unknown)? {
            messages.push(message);
        }
        index = close + 1;
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use message::Heartbeat;

    #[test]
    fn round_trips_a_single_message() {
        let message = Message::from(Heartbeat::default());
        let frame = encode_message(&message, false).unwrap();
        assert_eq!(parse_message(&frame, true, false).unwrap(), Some(message));
    }

    #[test]
    fn concatenated_frames_parse_independently() {
        let a = Message::from(Heartbeat::default());
        let b = Message::from(message::Initialization::default());
        let mut stream = encode_message(&a, false).unwrap();
        stream.extend(encode_message(&b, false).unwrap());

        let decoded = parse_messages(&stream, true, false).unwrap();
        assert_eq!(decoded, vec![a, b]);
    }

    #[test]
    fn unknown_message_id_can_be_ignored() {
        let mut body = bitbuf::BitBuffer::new();
        body.append(0, 8);
        let frame = framing::build(&[0xF0], &body, false).unwrap();
        assert_eq!(parse_message(&frame, false, true).unwrap(), None);
        assert!(matches!(
            parse_message(&frame, false, false),
            Err(GdlError::UnknownMessageID(ref ids)) if ids == &[0xF0]
        ));
    }
}
