use crate::bitbuf::BitBuffer;
use crate::error::GdlError;
use crate::field;
use crate::message::MessageKind;

/// Configuration message accepted from the display (ID 2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Initialization {
    pub audio_test: bool,
    pub audio_inhibit: bool,
    pub cdti_ok: bool,
    pub csa_audio_disable: bool,
    pub csa_disable: bool,
}

impl MessageKind for Initialization {
    const MESSAGE_IDS: &'static [u8] = &[2];

    fn encode_body(&self) -> Result<BitBuffer, GdlError> {
        let mut buf = BitBuffer::new();
        buf.append(0, 1);
        field::encode_bool(&mut buf, self.audio_test)?;
        buf.append(0, 4);
        field::encode_bool(&mut buf, self.audio_inhibit)?;
        field::encode_bool(&mut buf, self.cdti_ok)?;
        buf.append(0, 6);
        field::encode_bool(&mut buf, self.csa_audio_disable)?;
        field::encode_bool(&mut buf, self.csa_disable)?;
        Ok(buf)
    }

    fn decode_body(body: &mut BitBuffer) -> Result<Self, GdlError> {
        body.pop_front(1)?;
        let audio_test = field::decode_bool(body)?;
        body.pop_front(4)?;
        let audio_inhibit = field::decode_bool(body)?;
        let cdti_ok = field::decode_bool(body)?;
        body.pop_front(6)?;
        let csa_audio_disable = field::decode_bool(body)?;
        let csa_disable = field::decode_bool(body)?;

        Ok(Initialization {
            audio_test,
            audio_inhibit,
            cdti_ok,
            csa_audio_disable,
            csa_disable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let msg = Initialization {
            audio_test: true,
            cdti_ok: true,
            ..Initialization::default()
        };
        let frame = msg.encode(true).unwrap();
        assert_eq!(Initialization::decode(&frame, false).unwrap(), msg);
    }
}
