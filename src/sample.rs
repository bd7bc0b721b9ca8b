use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;

use crate::error::ErrorKind;
use crate::register::data::DataSample;
use crate::register::st1::Status1;

/// Marker for readings in raw ADC counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raw;

/// Marker for readings converted to microtesla.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Microtesla;

/// Sensitivity numerator and denominator: 0.15 µT per LSB.
const SCALE_NUM: i32 = 15;
const SCALE_DEN: i32 = 100;

/// Converts one raw axis value to whole microtesla.
///
/// Integer arithmetic, truncating toward zero, so `-7` becomes `-1`, not `-2`.
pub fn scale_to_microtesla(raw: i16) -> i16 {
    // |i16::MIN| * 15 / 100 = 4915, always fits
    (raw as i32 * SCALE_NUM / SCALE_DEN) as i16
}

/// Status bits that came with a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags {
    status1: Option<Status1>,
    overflow: bool,
}

impl StatusFlags {
    pub fn new(status1: Option<Status1>, overflow: bool) -> Self {
        Self { status1, overflow }
    }

    /// ST1 data-ready bit, if ST1 was read for this sample.
    pub fn data_ready(&self) -> Option<bool> {
        self.status1.map(|s| s.data_ready())
    }

    /// ST1 data-overrun bit, if ST1 was read for this sample.
    pub fn data_overrun(&self) -> Option<bool> {
        self.status1.map(|s| s.data_overrun())
    }

    /// ST2 overflow bit. Always known since ST2 is part of every sample read.
    pub fn overflow(&self) -> bool {
        self.overflow
    }
}

/// One magnetometer sample.
///
/// `Unit` is either [`Raw`] or [`Microtesla`]. A reading whose [`kind`](Self::kind) is
/// [`ErrorKind::Overflow`] or [`ErrorKind::DataOverrun`] still holds real data.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Reading<Unit> {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    status: StatusFlags,
    _unit: PhantomData<Unit>,
}

impl<Unit> Reading<Unit> {
    pub(crate) fn new(x: i16, y: i16, z: i16, status: StatusFlags) -> Self {
        Self { x, y, z, status, _unit: PhantomData }
    }

    pub fn status(&self) -> StatusFlags {
        self.status
    }

    /// Classifies this sample. Overflow wins over data-overrun.
    pub fn kind(&self) -> ErrorKind {
        if self.status.overflow() {
            ErrorKind::Overflow
        } else if self.status.data_overrun() == Some(true) {
            ErrorKind::DataOverrun
        } else {
            ErrorKind::Ok
        }
    }

    pub fn axes(&self) -> (i16, i16, i16) {
        (self.x, self.y, self.z)
    }
}

impl Reading<Raw> {
    pub(crate) fn from_sample(sample: DataSample, status1: Option<Status1>) -> Self {
        Self::new(
            sample.x(),
            sample.y(),
            sample.z(),
            StatusFlags::new(status1, sample.overflow()),
        )
    }

    /// Scales every axis with [`scale_to_microtesla`], keeping the status bits.
    pub fn to_microtesla(&self) -> Reading<Microtesla> {
        Reading::new(
            scale_to_microtesla(self.x),
            scale_to_microtesla(self.y),
            scale_to_microtesla(self.z),
            self.status,
        )
    }
}

impl Debug for Reading<Raw> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reading")
            .field("x_raw", &self.x)
            .field("y_raw", &self.y)
            .field("z_raw", &self.z)
            .field("status", &self.status)
            .finish()
    }
}

impl Debug for Reading<Microtesla> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reading")
            .field("x_ut", &self.x)
            .field("y_ut", &self.y)
            .field("z_ut", &self.z)
            .field("status", &self.status)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<Unit> defmt::Format for Reading<Unit> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Reading {{ x: {}, y: {}, z: {}, status: {} }}", self.x, self.y, self.z, self.status)
    }
}

#[cfg(feature = "uom")]
impl Reading<Raw> {
    /// Exact flux density per axis, without the integer truncation of
    /// [`to_microtesla`](Self::to_microtesla).
    pub fn magnetic_flux_density(&self) -> [uom::si::f32::MagneticFluxDensity; 3] {
        use uom::si::magnetic_flux_density::microtesla;
        let convert = |raw: i16| {
            uom::si::f32::MagneticFluxDensity::new::<microtesla>(
                raw as f32 * SCALE_NUM as f32 / SCALE_DEN as f32,
            )
        };

        [convert(self.x), convert(self.y), convert(self.z)]
    }
}
