//! ### CNTL3 - Control 3 (`0x32`, 1 byte, Write-only)
//!
//! Only the soft-reset bit is defined. A soft reset returns every register to its
//! power-on value, which puts the chip in power-down.
//!
//! See also: [`crate::Ak09918::reset()`]
#![doc(alias = "CNTL3")]
use crate::register::{Reg, Writable};

/// Marker type for CNTL3 (0x32) register
pub struct Cntl3;
impl Reg for Cntl3 { const ADDR: u8 = 0x32; }

/// The payload for the CNTL3 (0x32) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cntl3Command {
    /// Triggers a soft reset. The bit clears itself once the reset has finished.
    SoftReset,
}

impl From<Cntl3Command> for u8 {
    fn from(value: Cntl3Command) -> Self {
        match value {
            Cntl3Command::SoftReset => 0x01,
        }
    }
}

impl Writable for Cntl3 {
    type In = Cntl3Command;

    fn encode(v: &Self::In) -> u8 {
        (*v).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cntl3_encode() {
        assert_eq!(0x01, Cntl3::encode(&Cntl3Command::SoftReset));
    }
}
