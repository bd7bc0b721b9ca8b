use crate::register::{Readable, Reg};

/// Marker struct for the HXL - ST2 (0x11 - 0x18) registers.
///
/// The AK09918 auto-increments on multiple reads, so one 8-byte burst from 0x11 returns
/// all three axes, the TMPS dummy byte and ST2. Reading ST2 is what releases the data
/// registers for the next measurement, so the block is always read as a whole.
///
/// - **Length:** 8 bytes
/// - **Access:** Read-only
///
/// Used with [`crate::Ak09918::read`] or the methods [`crate::Ak09918::read_raw`] and
/// [`crate::Ak09918::read_scaled`].
pub struct Data;
impl Reg for Data { const ADDR: u8 = 0x11; }

/// Magnetic sensor overflow bit in ST2.
const HOFL_BIT: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataSample {
    x: i16,
    y: i16,
    z: i16,
    overflow: bool,
}

impl DataSample {
    pub fn new(x: i16, y: i16, z: i16, overflow: bool) -> Self {
        Self { x, y, z, overflow }
    }

    /// Raw X axis from HXL/HXH
    pub fn x(&self) -> i16 { self.x }

    /// Raw Y axis from HYL/HYH
    pub fn y(&self) -> i16 { self.y }

    /// Raw Z axis from HZL/HZH
    pub fn z(&self) -> i16 { self.z }

    /// Set when |X| + |Y| + |Z| exceeded the measurement range (4912 µT).
    ///
    /// The axis values are still the last ones the ADC produced.
    pub fn overflow(&self) -> bool { self.overflow }
}

impl Readable for Data {
    type Out = DataSample;

    const N: usize = 8;

    fn decode(b: &[u8]) -> Self::Out {
        DataSample {
            x: i16::from_le_bytes([b[0], b[1]]),
            y: i16::from_le_bytes([b[2], b[3]]),
            z: i16::from_le_bytes([b[4], b[5]]),
            // b[6] is TMPS, unused on this part
            overflow: (b[7] & HOFL_BIT) != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_decode() {
        let reg = Data::decode(&[0x10, 0x00, 0x20, 0x00, 0x30, 0x00, 0x00, 0x08]);
        assert_eq!(DataSample::new(16, 32, 48, true), reg);

        let reg = Data::decode(&[0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F, 0xAA, 0x00]);
        assert_eq!(DataSample::new(-1, i16::MIN, i16::MAX, false), reg);
    }

    #[test]
    fn data_decode_ignores_other_st2_bits() {
        let reg = Data::decode(&[0, 0, 0, 0, 0, 0, 0xFF, 0b1111_0111]);
        assert!(!reg.overflow());
    }

    #[test]
    fn axis_bytes_reassemble_little_endian() {
        for v in [i16::MIN, -4913, -1, 0, 1, 255, 256, 4912, i16::MAX] {
            let [lo, hi] = v.to_le_bytes();
            let reg = Data::decode(&[lo, hi, lo, hi, lo, hi, 0, 0]);
            assert_eq!([v, v, v], [reg.x(), reg.y(), reg.z()]);
        }
    }
}
