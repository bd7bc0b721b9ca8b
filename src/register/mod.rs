//! Typed register catalogue for the AK09918.
//!
//! Every register (or fixed-size register block) the driver touches has a marker struct
//! implementing [`Reg`] plus [`Readable`] and/or [`Writable`]. The marker carries the
//! address and transfer length; the trait impl carries the bit layout.
pub mod cntl2;
pub mod cntl3;
pub mod data;
pub mod st1;
pub mod wia;

/// A register returned a bit pattern that has no meaning for that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u8,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u8, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Self::Out;
}

pub trait Writable: Reg {
    type In;
    fn encode(v: &Self::In) -> u8;
}
