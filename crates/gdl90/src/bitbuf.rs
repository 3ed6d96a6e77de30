use bitvec::prelude::*;

use crate::error::GdlError;

/// An ordered sequence of bits, MSB-first.
///
/// Bit 0 of the buffer corresponds to bit 7 of the first byte on the wire,
/// prior to any outgoing LSB transform. This is the only state a message
/// encoder or decoder touches; it never outlives a single `encode`/`decode`
/// call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: BitVec<u8, Msb0>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { bits: BitVec::from_slice(bytes) }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `width` bits of `value`, MSB-first.
    pub fn append(&mut self, value: u64, width: usize) {
        for i in (0..width).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.bits.extend_from_bitslice(bytes.view_bits::<Msb0>());
    }

    /// Concatenate `other` onto the end of `self`. Associative; the empty
    /// buffer is the identity.
    pub fn extend(&mut self, other: &BitBuffer) {
        self.bits.extend_from_bitslice(&other.bits);
    }

    /// Remove and return the first `width` bits as an unsigned integer.
    pub fn pop_front(&mut self, width: usize) -> Result<u64, GdlError> {
        if width > self.bits.len() {
            return Err(GdlError::BitBufferUnderflow {
                requested: width,
                available: self.bits.len(),
            });
        }
        let mut value: u64 = 0;
        for bit in self.bits.drain(..width) {
            value = (value << 1) | (bit as u64);
        }
        Ok(value)
    }

    /// Remove and return the first `count` bytes, MSB-first.
    pub fn pop_bytes(&mut self, count: usize) -> Result<Vec<u8>, GdlError> {
        let width = count * 8;
        if width > self.bits.len() {
            return Err(GdlError::BitBufferUnderflow {
                requested: width,
                available: self.bits.len(),
            });
        }
        let drained: BitVec<u8, Msb0> = self.bits.drain(..width).collect();
        Ok(drained.into_vec())
    }

    /// Pack into MSB-first bytes. Fails if the buffer length is not a
    /// multiple of 8; every message type's field widths are designed to
    /// sum to a whole number of bytes, so this should never trigger for a
    /// correctly specified message.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GdlError> {
        if self.bits.len() % 8 != 0 {
            return Err(GdlError::UnalignedBitBuffer(self.bits.len()));
        }
        Ok(self.bits.clone().into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_pop_round_trips() {
        let mut buf = BitBuffer::new();
        buf.append(0b101, 3);
        buf.append(0xFF, 8);
        assert_eq!(buf.len(), 11);
        assert_eq!(buf.pop_front(3).unwrap(), 0b101);
        assert_eq!(buf.pop_front(8).unwrap(), 0xFF);
        assert!(buf.is_empty());
    }

    #[test]
    fn from_bytes_then_to_bytes_is_identity() {
        let bytes = [0x12, 0x34, 0xAB];
        let buf = BitBuffer::from_bytes(&bytes);
        assert_eq!(buf.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn pop_front_past_end_fails() {
        let mut buf = BitBuffer::new();
        buf.append(1, 4);
        assert!(matches!(
            buf.pop_front(8),
            Err(GdlError::BitBufferUnderflow { requested: 8, available: 4 })
        ));
    }

    #[test]
    fn extend_is_concatenation() {
        let mut a = BitBuffer::new();
        a.append(0b11, 2);
        let mut b = BitBuffer::new();
        b.append(0b00, 2);
        a.extend(&b);
        assert_eq!(a.pop_front(4).unwrap(), 0b1100);
    }
}
