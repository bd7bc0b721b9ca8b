//! Errors that can occur when using the AK09918 device.
//!
//! [`Ak09918Error`] is what fallible driver calls return. It is generic over the
//! underlying bus error type. [`ErrorKind`] is the flat, closed classification used for
//! diagnostics: every error and every [`crate::Reading`] maps onto exactly one kind, and
//! [`describe`] turns a kind code into text.

use core::fmt::{Display, Formatter};

use crate::register::cntl2::OperatingMode;
use crate::register::InvalidRegisterField;
use crate::sample::{Raw, Reading};

/// This represents all possible errors that can occur when using the AK09918 device.
#[derive(Debug)]
pub enum Ak09918Error<BusError> {
    /// The bus failed while reading a register.
    Read(BusError),

    /// The bus failed while writing a register.
    ///
    /// Only returned when [`crate::config::WriteCheck::Propagate`] is configured.
    Write(BusError),

    /// The requested mode cannot be entered through an ordinary mode switch.
    ///
    /// Currently only [`OperatingMode::SelfTest`], which has its own entry point in
    /// [`crate::Ak09918::self_test`].
    ModeRejected(OperatingMode),

    /// A measurement did not complete within the configured poll budget.
    ///
    /// No sample registers were read.
    Timeout,

    /// ST1 reported no new data. Only produced with status validation enabled.
    NotReady,

    /// The self-test measurement fell outside the datasheet limits.
    ///
    /// Holds the measured values for inspection.
    SelfTestFailed(Reading<Raw>),

    /// A register returned a value that has no meaning. This should not happen in normal
    /// circumstances.
    ///
    /// Could possibly indicate wiring problems, or a different device on the address.
    UnexpectedRegisterData(InvalidRegisterField),
}

impl<BusError> Ak09918Error<BusError> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Ak09918Error::Read(_) => ErrorKind::ReadFailed,
            Ak09918Error::Write(_) => ErrorKind::WriteFailed,
            Ak09918Error::ModeRejected(_) => ErrorKind::WriteFailed,
            Ak09918Error::Timeout => ErrorKind::Timeout,
            Ak09918Error::NotReady => ErrorKind::NotReady,
            Ak09918Error::SelfTestFailed(_) => ErrorKind::SelfTestFailed,
            Ak09918Error::UnexpectedRegisterData(_) => ErrorKind::ReadFailed,
        }
    }
}

/// Closed classification of driver outcomes.
///
/// The discriminants are stable and double as the numeric code accepted by [`describe`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    Ok = 0,
    DataOverrun = 1,
    NotReady = 2,
    Timeout = 3,
    SelfTestFailed = 4,
    Overflow = 5,
    WriteFailed = 6,
    ReadFailed = 7,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::Ok,
        ErrorKind::DataOverrun,
        ErrorKind::NotReady,
        ErrorKind::Timeout,
        ErrorKind::SelfTestFailed,
        ErrorKind::Overflow,
        ErrorKind::WriteFailed,
        ErrorKind::ReadFailed,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Symbolic name of the kind, e.g. `"AK09918_ERR_TIMEOUT"`.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Ok => "AK09918_ERR_OK",
            ErrorKind::DataOverrun => "AK09918_ERR_DOR",
            ErrorKind::NotReady => "AK09918_ERR_NOT_RDY",
            ErrorKind::Timeout => "AK09918_ERR_TIMEOUT",
            ErrorKind::SelfTestFailed => "AK09918_ERR_SELFTEST_FAILED",
            ErrorKind::Overflow => "AK09918_ERR_OVERFLOW",
            ErrorKind::WriteFailed => "AK09918_ERR_WRITE_FAILED",
            ErrorKind::ReadFailed => "AK09918_ERR_READ_FAILED",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::Ok => "OK",
            ErrorKind::DataOverrun => "Data skipped",
            ErrorKind::NotReady => "Not ready",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::SelfTestFailed => "Self test failed",
            ErrorKind::Overflow => "Sensor overflow",
            ErrorKind::WriteFailed => "Fail to write",
            ErrorKind::ReadFailed => "Fail to read",
        }
    }
}

impl TryFrom<u8> for ErrorKind {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ErrorKind::ALL.get(code as usize).copied().ok_or(code)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// Human readable text for a kind code. Codes outside the taxonomy give `"Unknown Error"`.
pub fn describe(code: u8) -> &'static str {
    ErrorKind::try_from(code).map_or("Unknown Error", ErrorKind::description)
}
