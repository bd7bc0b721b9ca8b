//! Register bus capability.
//!
//! The driver only needs two blocking primitives: write one byte to a register and read
//! a run of consecutive registers. [`I2c`] provides them on top of any
//! [`embedded_hal::i2c::I2c`] implementation; other transports can implement [`Bus`]
//! directly and hand it to [`crate::Ak09918::new`].
use embedded_hal::i2c::SevenBitAddress;

/// The AK09918 answers on a fixed address; there is no address-select pin.
pub const AK09918_I2C_ADDRESS: SevenBitAddress = 0x0C;

/// Largest register block the driver ever reads in one transfer.
pub const MAX_REG_BYTES: usize = 8;

pub trait Bus {
    type Error;

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error>;

    /// Fills `data` starting at `addr`, relying on the chip's address auto-increment.
    fn read_registers(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error>;
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    pub(crate) fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = I2cType::Error;

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[addr, value])
    }

    fn read_registers(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[addr], data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    #[test]
    fn write_register_sends_address_then_value() {
        let expectations = [Transaction::write(AK09918_I2C_ADDRESS, vec![0x31, 0x02])];
        let mut bus = I2c::new(Mock::new(&expectations), AK09918_I2C_ADDRESS);

        bus.write_register(0x31, 0x02).unwrap();

        bus.release().done();
    }

    #[test]
    fn read_registers_uses_repeated_start() {
        let expectations = [Transaction::write_read(
            AK09918_I2C_ADDRESS,
            vec![0x00],
            vec![0x48, 0x0C],
        )];
        let mut bus = I2c::new(Mock::new(&expectations), AK09918_I2C_ADDRESS);

        let mut buffer = [0u8; 2];
        bus.read_registers(0x00, &mut buffer).unwrap();
        assert_eq!([0x48, 0x0C], buffer);

        bus.release().done();
    }

    #[test]
    fn bus_errors_are_passed_through() {
        let expectations = [
            Transaction::write(AK09918_I2C_ADDRESS, vec![0x32, 0x01]).with_error(ErrorKind::Other),
        ];
        let mut bus = I2c::new(Mock::new(&expectations), AK09918_I2C_ADDRESS);

        assert_eq!(Err(ErrorKind::Other), bus.write_register(0x32, 0x01));

        bus.release().done();
    }
}
