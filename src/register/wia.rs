//! ### WIA1/WIA2 - Company and device ID (`0x00`-`0x01`, 2 bytes, R)
//!
//! WIA1 holds the AKM company code (0x48), WIA2 the device code (0x0C).
//!
//! ### Examples
//! ```rust,no_run
//! # use ak09918_rs::{Ak09918, Ak09918Result};
//! # use ak09918_rs::bus::Bus;
//! # use embedded_hal::delay::DelayNs;
//! # fn demo<B: Bus, D: DelayNs>(mut device: Ak09918<B, D>)
//! #     -> Ak09918Result<(), B::Error> {
//! use ak09918_rs::register::wia::Wia;
//!
//! let id = device.read::<Wia>()?;
//! assert_eq!(0x480C, id);
//! # Ok(()) }
//! ```
#![doc(alias = "WIA1")]
#![doc(alias = "WIA2")]
use crate::register::{Readable, Reg};

/// Expected value of the combined WIA1/WIA2 pair.
pub const AK09918_DEVICE_ID: u16 = 0x480C;

/// Marker struct for the WIA1 - WIA2 (0x00 - 0x01) registers
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
///
/// Used with [`crate::Ak09918::read`] or the convenience method
/// [`crate::Ak09918::device_id`].
pub struct Wia;
impl Reg for Wia { const ADDR: u8 = 0x00; }

impl Readable for Wia {
    /// Company ID in the high byte, device ID in the low byte.
    type Out = u16;

    const N: usize = 2;

    fn decode(b: &[u8]) -> Self::Out {
        u16::from_be_bytes([b[0], b[1]])
    }
}
