// Bit writer backing the data codewords. Bits are packed MSB first within
// each byte into a zero-initialised buffer of fixed size.
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(codewords: usize) -> Self {
        Self { data: vec![0; codewords], len: 0, capacity: codewords << 3 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    // Writes the low `size` bits of `bits`, which may straddle up to 3 bytes
    pub fn push_bits(&mut self, bits: u16, size: usize) {
        debug_assert!(size <= 16, "Cannot push more than 16 bits at once: Size {size}");
        debug_assert!(
            size == 16 || (bits as u32) < (1 << size),
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        let mut remaining = size;
        while remaining > 0 {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            let room = 8 - offset;
            let take = room.min(remaining);
            let chunk = ((bits as u32 >> (remaining - take)) & ((1 << take) - 1)) as u8;
            self.data[pos] |= chunk << (room - take);
            self.len += take;
            remaining -= take;
        }
    }

    // Overwrites a whole byte, used for pad codewords after the terminator
    pub fn set_byte(&mut self, pos: usize, byte: u8) {
        self.data[pos] = byte;
    }
}

#[cfg(test)]
mod bit_stream_tests {

    use super::BitStream;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new(19);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 16);
        bs.push_bits(0b1111111, 7);
        assert_eq!(bs.len(), 23);
        bs.push_bits(0b11111111111, 11);
        assert_eq!(bs.len(), 34);
    }

    #[test]
    fn test_push_bits() {
        let mut bs = BitStream::new(8);

        bs.push_bits(0b010, 3);
        bs.push_bits(0b110, 3);
        bs.push_bits(0b101, 3);
        bs.push_bits(0b001_1010, 7);
        bs.push_bits(0b1100, 4);
        bs.push_bits(0b1011_0110_1101, 12);
        bs.push_bits(0b01_1001_0001, 10);
        bs.push_bits(0b111_0010_1110_0011, 15);

        assert_eq!(
            bs.data(),
            [
                0b0101_1010,
                0b1001_1010,
                0b1100_1011,
                0b0110_1101,
                0b0110_0100,
                0b0111_1001,
                0b0111_0001,
                0b1000_0000,
            ]
        );
        assert_eq!(bs.len(), 57);
    }

    #[test]
    fn test_push_bits_across_three_bytes() {
        let mut bs = BitStream::new(3);
        bs.push_bits(0b1, 1);
        bs.push_bits(0xFFFF, 16);
        assert_eq!(bs.data(), [0xFF, 0xFF, 0b1000_0000]);
    }

    #[test]
    #[should_panic]
    fn test_push_bits_capacity_overflow() {
        let mut bs = BitStream::new(2);
        bs.push_bits(0xFF, 8);
        bs.push_bits(0xFF, 8);
        bs.push_bits(0b1, 1);
    }
}
