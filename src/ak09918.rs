use core::ops::RangeInclusive;

use crate::bus::{Bus, I2c, AK09918_I2C_ADDRESS, MAX_REG_BYTES};
use crate::config::{Configuration, WriteCheck};
use crate::error::Ak09918Error;
use crate::register::cntl2::{self, Cntl2, OperatingMode};
use crate::register::cntl3::{Cntl3, Cntl3Command};
use crate::register::data::Data;
use crate::register::st1::{St1, Status1};
use crate::register::wia::{Wia, AK09918_DEVICE_ID};
use crate::register::{Readable, Writable};
use crate::sample::{Microtesla, Raw, Reading};
use embedded_hal::delay::DelayNs;

/// Type alias for an Ak09918 chip communicating over I2C
type Ak09918I2c<T, D> = Ak09918<I2c<T>, D>;

/// Type alias used to simplify return types throughout the driver
pub type Ak09918Result<T, BusError> = Result<T, Ak09918Error<BusError>>;

/// Minimum wait after entering power-down before another mode may be set.
const MODE_TRANSITION_US: u32 = 100;

/// Self-test pass limits, in raw counts.
const SELF_TEST_X: RangeInclusive<i16> = -200..=200;
const SELF_TEST_Y: RangeInclusive<i16> = -200..=200;
const SELF_TEST_Z: RangeInclusive<i16> = -1000..=-150;

/// Main Ak09918 driver struct
///
/// Owns the bus and the delay provider for its whole lifetime. Every call blocks until
/// its bus transfers are done; there is no internal locking, so callers sharing one
/// driver between contexts have to serialize access themselves.
pub struct Ak09918<B, D> {
    bus: B,
    delay: D,
    mode: OperatingMode,
    config: Configuration,
}

impl<T, D> Ak09918I2c<T, D>
where
    T: embedded_hal::i2c::I2c,
    D: DelayNs,
{
    /// Constructs a driver on the fixed I2C address (0x0C).
    ///
    /// No bus traffic happens here; call [`initialize`](Self::initialize) next.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::i2c::I2c;
    /// # use ak09918_rs::Ak09918Result;
    ///  use ak09918_rs::{Ak09918, OperatingMode};
    ///  use ak09918_rs::config::Configuration;
    /// # fn demo<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Ak09918Result<(), I::Error> {
    ///
    ///  let mut device = Ak09918::new_i2c(i2c, delay, Configuration::default());
    ///  device.initialize(OperatingMode::Continuous50Hz)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_i2c(i2c: T, delay: D, config: Configuration) -> Self {
        Self::new(I2c::new(i2c, AK09918_I2C_ADDRESS), delay, config)
    }

    /// Gives back the I2C peripheral and the delay provider.
    pub fn release_i2c(self) -> (T, D) {
        (self.bus.release(), self.delay)
    }
}

impl<B, D> Ak09918<B, D>
where
    B: Bus,
    D: DelayNs,
{
    /// Creates a driver on top of any [`Bus`] implementation.
    ///
    /// The tracked mode starts out as [`OperatingMode::PowerDown`], the chip's power-on
    /// state.
    pub fn new(bus: B, delay: D, config: Configuration) -> Self {
        Ak09918 {
            bus,
            delay,
            mode: OperatingMode::PowerDown,
            config,
        }
    }

    /// Gives back the bus and the delay provider.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Read a register (or fixed-size register block) using a **typed marker**.
    ///
    /// The transfer length and address come from `R::N` and `R::ADDR`. Reading
    /// [`Data`] this way bypasses the single-measurement handshake, so in
    /// [`OperatingMode::Normal`] prefer [`read_raw`](Self::read_raw).
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use ak09918_rs::{register, Ak09918, Ak09918Result};
    /// # use ak09918_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # fn demo<B: Bus, D: DelayNs>(mut device: Ak09918<B, D>) -> Ak09918Result<(), B::Error> {
    /// let status = device.read::<register::st1::St1>()?;
    /// if status.data_ready() {
    ///     let sample = device.read::<register::data::Data>()?;
    /// }
    /// # Ok(()) }
    /// ```
    pub fn read<R: Readable>(&mut self) -> Ak09918Result<R::Out, B::Error> {
        let mut buffer = [0u8; MAX_REG_BYTES];
        let data = &mut buffer[..R::N];
        self.bus
            .read_registers(R::ADDR, data)
            .map_err(Ak09918Error::Read)?;

        Ok(R::decode(data))
    }

    /// Writes one register, applying the configured [`WriteCheck`] to bus failures.
    pub(crate) fn write<W: Writable>(&mut self, value: &W::In) -> Ak09918Result<(), B::Error> {
        match self.bus.write_register(W::ADDR, W::encode(value)) {
            Ok(()) => Ok(()),
            Err(e) => match self.config.write_check {
                WriteCheck::Propagate => Err(Ak09918Error::Write(e)),
                WriteCheck::Ignore => {
                    warn!("write to register {:#x} failed, ignoring", W::ADDR);
                    Ok(())
                }
            },
        }
    }

    /// Puts the driver in its first operating mode.
    ///
    /// [`OperatingMode::SelfTest`] is replaced by [`OperatingMode::PowerDown`].
    /// [`OperatingMode::Normal`] is only recorded: the chip needs no write for it since
    /// every [`read_raw`](Self::read_raw) in that mode triggers its own measurement.
    /// Every other mode goes through [`switch_mode`](Self::switch_mode).
    pub fn initialize(&mut self, mode: OperatingMode) -> Ak09918Result<(), B::Error> {
        let mode = match mode {
            OperatingMode::SelfTest => OperatingMode::PowerDown,
            mode => mode,
        };
        self.mode = mode;

        if mode == OperatingMode::Normal {
            debug!("initialized in {:?}", mode);
            return Ok(());
        }

        self.switch_mode(mode)
    }

    /// Sets the operating mode by writing its code to CNTL2 (0x31).
    ///
    /// The tracked mode is updated before the write goes out, so it always names the last
    /// mode the driver tried to set, whether or not the bus accepted it. Any mode can be
    /// reached from any other; the chip is not asked to confirm.
    ///
    /// [`OperatingMode::SelfTest`] is refused with [`Ak09918Error::ModeRejected`] and
    /// leaves the tracked mode as it was. Use [`self_test`](Self::self_test) instead.
    ///
    /// # Examples
    ///
    /// ```rust, no_run
    /// # use ak09918_rs::{Ak09918, Ak09918Result, OperatingMode};
    /// # use ak09918_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # fn demo<B: Bus, D: DelayNs>(mut device: Ak09918<B, D>) -> Ak09918Result<(), B::Error> {
    /// device.switch_mode(OperatingMode::Continuous100Hz)?;
    /// assert_eq!(OperatingMode::Continuous100Hz, device.mode());
    /// # Ok(()) }
    /// ```
    pub fn switch_mode(&mut self, mode: OperatingMode) -> Ak09918Result<(), B::Error> {
        if mode == OperatingMode::SelfTest {
            warn!("refusing to switch to {:?}", mode);
            return Err(Ak09918Error::ModeRejected(mode));
        }

        debug!("switching mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.write::<Cntl2>(&mode)
    }

    /// The last mode set through [`initialize`](Self::initialize) or
    /// [`switch_mode`](Self::switch_mode). No bus traffic.
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Reads CNTL2 back and decodes it. Leaves the tracked mode alone.
    ///
    /// In [`OperatingMode::Normal`] this reads [`OperatingMode::PowerDown`] whenever no
    /// measurement is in flight.
    pub fn read_device_mode(&mut self) -> Ak09918Result<OperatingMode, B::Error> {
        let raw = self.read::<Cntl2>()?;
        OperatingMode::try_from(raw).map_err(Ak09918Error::UnexpectedRegisterData)
    }

    /// Issues a soft reset through CNTL3 (0x32).
    ///
    /// The chip comes back in power-down, but the tracked mode is left untouched: call
    /// [`initialize`](Self::initialize) afterwards to bring both back in line.
    pub fn reset(&mut self) -> Ak09918Result<(), B::Error> {
        debug!("soft reset");
        self.write::<Cntl3>(&Cntl3Command::SoftReset)
    }

    /// Reads the WIA1/WIA2 pair: company ID in the high byte, device ID in the low byte.
    pub fn device_id(&mut self) -> Ak09918Result<u16, B::Error> {
        self.read::<Wia>()
    }

    /// Does the device on the bus identify as an AK09918?
    pub fn is_connected(&mut self) -> Ak09918Result<bool, B::Error> {
        Ok(self.device_id()? == AK09918_DEVICE_ID)
    }

    /// Reads one sample in raw counts.
    ///
    /// In [`OperatingMode::Normal`] this first triggers a measurement and polls CNTL2
    /// until the chip is idle again, waiting the configured interval between polls. If the
    /// poll budget runs out the call fails with [`Ak09918Error::Timeout`] without touching
    /// the data registers. In every other mode the latest sample is read straight away.
    ///
    /// A saturated sample is still returned; check [`Reading::kind`].
    ///
    /// # Examples
    ///
    /// ```rust, no_run
    /// # use ak09918_rs::{Ak09918, Ak09918Result, ErrorKind};
    /// # use ak09918_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # fn demo<B: Bus, D: DelayNs>(mut device: Ak09918<B, D>) -> Ak09918Result<(), B::Error> {
    /// let reading = device.read_raw()?;
    /// if reading.kind() == ErrorKind::Overflow {
    ///     // field too strong, values are clipped
    /// }
    /// let (x, y, z) = reading.axes();
    /// # Ok(()) }
    /// ```
    pub fn read_raw(&mut self) -> Ak09918Result<Reading<Raw>, B::Error> {
        if self.mode == OperatingMode::Normal {
            self.write::<Cntl2>(&OperatingMode::Normal)?;
            self.poll(|device| Ok((device.read::<Cntl2>()? == cntl2::IDLE).then_some(())))?;
        }

        let status1 = if self.config.validate_status {
            Some(self.checked_status()?)
        } else {
            None
        };

        let reading = Reading::from_sample(self.read::<Data>()?, status1);
        if reading.status().overflow() {
            trace!("sensor overflow");
        }

        Ok(reading)
    }

    /// Reads one sample and converts it to whole microtesla (0.15 µT per count,
    /// truncated toward zero). Fails and classifies exactly like
    /// [`read_raw`](Self::read_raw).
    pub fn read_scaled(&mut self) -> Ak09918Result<Reading<Microtesla>, B::Error> {
        Ok(self.read_raw()?.to_microtesla())
    }

    /// Runs the built-in self-test and restores the tracked mode afterwards.
    ///
    /// The chip applies an internal field and takes one measurement. Passing requires
    /// X and Y within ±200 counts and Z between -1000 and -150 counts. A failing
    /// measurement is returned inside [`Ak09918Error::SelfTestFailed`].
    ///
    /// This is the only way the driver ever writes [`OperatingMode::SelfTest`].
    pub fn self_test(&mut self) -> Ak09918Result<Reading<Raw>, B::Error> {
        let previous = self.mode;

        let outcome = self.measure_self_test();
        let restored = self.initialize(previous);
        if outcome.is_err() && restored.is_err() {
            warn!("self-test aborted and restoring {:?} failed", previous);
        }
        let reading = outcome?;
        restored?;

        if SELF_TEST_X.contains(&reading.x)
            && SELF_TEST_Y.contains(&reading.y)
            && SELF_TEST_Z.contains(&reading.z)
        {
            debug!("self-test passed");
            Ok(reading)
        } else {
            warn!("self-test failed: ({}, {}, {})", reading.x, reading.y, reading.z);
            Err(Ak09918Error::SelfTestFailed(reading))
        }
    }

    fn measure_self_test(&mut self) -> Ak09918Result<Reading<Raw>, B::Error> {
        self.switch_mode(OperatingMode::PowerDown)?;
        self.delay.delay_us(MODE_TRANSITION_US);
        self.write::<Cntl2>(&OperatingMode::SelfTest)?;

        let status1 = self.poll(|device| {
            let status1 = device.read::<St1>()?;
            Ok(status1.data_ready().then_some(status1))
        })?;

        Ok(Reading::from_sample(self.read::<Data>()?, Some(status1)))
    }

    /// Reads ST1 and refuses to go on without fresh data.
    fn checked_status(&mut self) -> Ak09918Result<Status1, B::Error> {
        let status1 = self.read::<St1>()?;
        if !status1.data_ready() {
            return Err(Ak09918Error::NotReady);
        }
        if status1.data_overrun() {
            trace!("data overrun");
        }

        Ok(status1)
    }

    /// Calls `probe` until it yields a value, at most `poll_attempts` times, sleeping
    /// `poll_interval_ms` between calls.
    fn poll<T>(
        &mut self,
        mut probe: impl FnMut(&mut Self) -> Ak09918Result<Option<T>, B::Error>,
    ) -> Ak09918Result<T, B::Error> {
        let attempts = self.config.poll_attempts;
        for attempt in 1..=attempts {
            if let Some(value) = probe(self)? {
                trace!("ready after {} polls", attempt);
                return Ok(value);
            }

            if attempt < attempts {
                self.delay.delay_ms(self.config.poll_interval_ms);
            }
        }

        warn!("not ready after {} polls", attempts);
        Err(Ak09918Error::Timeout)
    }
}
