use crate::register::{Readable, Reg};

/// Marker struct for the ST1 (0x10) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
///
/// Only read when status validation is enabled, or while waiting for a self-test
/// measurement.
pub struct St1;
impl Reg for St1 { const ADDR: u8 = 0x10; }

const DRDY_BIT: u8 = 0x01;
const DOR_BIT: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status1 {
    drdy: bool,
    dor: bool,
}

impl Status1 {
    pub fn new(drdy: bool, dor: bool) -> Self {
        Self { drdy, dor }
    }

    /// Is a new measurement waiting in the data registers?
    ///
    /// Cleared when ST2 is read.
    pub fn data_ready(&self) -> bool { self.drdy }

    /// Was a measurement skipped because the previous one was never read?
    ///
    /// Only meaningful in the continuous modes. Cleared when ST2 is read.
    pub fn data_overrun(&self) -> bool { self.dor }
}

impl Readable for St1 {
    type Out = Status1;

    fn decode(b: &[u8]) -> Self::Out {
        Status1 {
            drdy: (b[0] & DRDY_BIT) != 0,
            dor:  (b[0] & DOR_BIT) != 0,
        }
    }
}
