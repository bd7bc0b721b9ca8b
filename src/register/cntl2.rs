//! ### CNTL2 - Mode select (`0x31`, 1 byte, R/W)
//!
//! Holds the operating mode code. After a single measurement (or a self-test) completes
//! the chip drops back to power-down on its own, so reading this register back as `0x00`
//! is how the driver detects the end of a [`OperatingMode::Normal`] conversion.
//!
//! See also: [`crate::Ak09918::switch_mode()`]
#![doc(alias = "CNTL2")]
use embassy_time::Duration;

use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker struct for the CNTL2 (0x31) register
pub struct Cntl2;
impl Reg for Cntl2 { const ADDR: u8 = 0x31; }

/// Value CNTL2 reads back once a single measurement has finished.
pub(crate) const IDLE: u8 = 0x00;

/// Operating modes of the AK09918.
///
/// The register codes are not sequential; see [`OperatingMode::register_value`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Power-down. This is the state of the chip after power-on and after every
    /// single measurement.
    PowerDown,
    /// Single measurement. Each read triggers one conversion and waits for it.
    #[default]
    Normal,
    /// Continuous measurement at 10 Hz.
    Continuous10Hz,
    /// Continuous measurement at 20 Hz.
    Continuous20Hz,
    /// Continuous measurement at 50 Hz.
    Continuous50Hz,
    /// Continuous measurement at 100 Hz.
    Continuous100Hz,
    /// Self-test. Only entered through [`crate::Ak09918::self_test()`]; rejected by
    /// [`crate::Ak09918::switch_mode()`] and replaced by [`OperatingMode::PowerDown`] in
    /// [`crate::Ak09918::initialize()`].
    SelfTest,
}

impl OperatingMode {
    pub fn register_value(self) -> u8 {
        match self {
            OperatingMode::PowerDown => 0x00,
            OperatingMode::Normal => 0x01,
            OperatingMode::Continuous10Hz => 0x02,
            OperatingMode::Continuous20Hz => 0x04,
            OperatingMode::Continuous50Hz => 0x06,
            OperatingMode::Continuous100Hz => 0x08,
            OperatingMode::SelfTest => 0x10,
        }
    }

    /// Is the chip free-running in this mode?
    pub fn is_continuous(self) -> bool {
        self.sample_period().is_some()
    }

    /// Time between two measurements in the continuous modes, [`None`] otherwise.
    pub fn sample_period(self) -> Option<Duration> {
        match self {
            OperatingMode::Continuous10Hz => Some(Duration::from_millis(100)),
            OperatingMode::Continuous20Hz => Some(Duration::from_millis(50)),
            OperatingMode::Continuous50Hz => Some(Duration::from_millis(20)),
            OperatingMode::Continuous100Hz => Some(Duration::from_millis(10)),
            _ => None,
        }
    }
}

impl TryFrom<u8> for OperatingMode {
    type Error = InvalidRegisterField;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value & 0b1_1111 {
            0x00 => Ok(OperatingMode::PowerDown),
            0x01 => Ok(OperatingMode::Normal),
            0x02 => Ok(OperatingMode::Continuous10Hz),
            0x04 => Ok(OperatingMode::Continuous20Hz),
            0x06 => Ok(OperatingMode::Continuous50Hz),
            0x08 => Ok(OperatingMode::Continuous100Hz),
            0x10 => Ok(OperatingMode::SelfTest),
            _ => Err(InvalidRegisterField::new(Cntl2::ADDR, value, 0)),
        }
    }
}

impl Readable for Cntl2 {
    /// The raw mode code, left undecoded so that polling never fails on odd values.
    type Out = u8;

    fn decode(b: &[u8]) -> Self::Out {
        b[0]
    }
}

impl Writable for Cntl2 {
    type In = OperatingMode;

    fn encode(v: &Self::In) -> u8 {
        v.register_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [OperatingMode; 7] = [
        OperatingMode::PowerDown,
        OperatingMode::Normal,
        OperatingMode::Continuous10Hz,
        OperatingMode::Continuous20Hz,
        OperatingMode::Continuous50Hz,
        OperatingMode::Continuous100Hz,
        OperatingMode::SelfTest,
    ];

    #[test]
    fn cntl2_encode() {
        let codes: [u8; 7] = ALL_MODES.map(|m| Cntl2::encode(&m));
        assert_eq!([0x00, 0x01, 0x02, 0x04, 0x06, 0x08, 0x10], codes);
    }

    #[test]
    fn mode_from_register_value() {
        for mode in ALL_MODES {
            assert_eq!(Ok(mode), OperatingMode::try_from(mode.register_value()));
        }

        assert_eq!(
            Err(InvalidRegisterField::new(0x31, 0x03, 0)),
            OperatingMode::try_from(0x03)
        );
    }

    #[test]
    fn default_mode_is_single_measurement() {
        assert_eq!(OperatingMode::Normal, OperatingMode::default());
    }

    #[test]
    fn sample_periods() {
        assert_eq!(None, OperatingMode::PowerDown.sample_period());
        assert_eq!(None, OperatingMode::Normal.sample_period());
        assert_eq!(None, OperatingMode::SelfTest.sample_period());
        assert_eq!(Some(Duration::from_millis(100)), OperatingMode::Continuous10Hz.sample_period());
        assert_eq!(Some(Duration::from_millis(10)), OperatingMode::Continuous100Hz.sample_period());
        assert!(OperatingMode::Continuous50Hz.is_continuous());
        assert!(!OperatingMode::Normal.is_continuous());
    }
}
