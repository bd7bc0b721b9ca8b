/// What to do when the bus reports a failed register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteCheck {
    /// Return [`crate::Ak09918Error::Write`] to the caller.
    Propagate,
    /// Log the failure and carry on as if the write had succeeded.
    ///
    /// Mode switches and resets then always report success, matching drivers that never
    /// looked at the bus result.
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) poll_attempts: u8,
    pub(crate) poll_interval_ms: u32,
    pub(crate) write_check: WriteCheck,
    pub(crate) validate_status: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            poll_attempts: 15,
            poll_interval_ms: 1,
            write_check: WriteCheck::Propagate,
            validate_status: false,
        }
    }
}

impl Configuration {
    /// Maximum number of status reads while waiting for a single measurement or a
    /// self-test to finish. Values below 1 are raised to 1.
    pub fn poll_attempts(mut self, attempts: u8) -> Self {
        self.poll_attempts = attempts.max(1);

        self
    }

    /// Delay between two status reads.
    pub fn poll_interval_ms(mut self, interval_ms: u32) -> Self {
        self.poll_interval_ms = interval_ms;

        self
    }

    pub fn write_check(mut self, write_check: WriteCheck) -> Self {
        self.write_check = write_check;

        self
    }

    /// Reads ST1 before every sample.
    ///
    /// A clear data-ready bit then fails the read with [`crate::Ak09918Error::NotReady`],
    /// and a set data-overrun bit is reported through [`crate::Reading::kind`]. Costs one
    /// extra bus transfer per sample.
    pub fn validate_status(mut self, validate: bool) -> Self {
        self.validate_status = validate;

        self
    }

    /// Worst-case time spent waiting for one single measurement, in milliseconds.
    /// Saturates at `u32::MAX`.
    pub fn max_poll_time_ms(&self) -> u32 {
        (u32::from(self.poll_attempts) - 1).saturating_mul(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(15, config.poll_attempts);
        assert_eq!(1, config.poll_interval_ms);
        assert_eq!(WriteCheck::Propagate, config.write_check);
        assert!(!config.validate_status);
        assert_eq!(14, config.max_poll_time_ms());
    }

    #[test]
    fn poll_attempts_never_zero() {
        let config = Configuration::default().poll_attempts(0);
        assert_eq!(1, config.poll_attempts);
        assert_eq!(0, config.max_poll_time_ms());
    }

    #[test]
    fn builder_chains() {
        let config = Configuration::default()
            .poll_attempts(3)
            .poll_interval_ms(5)
            .write_check(WriteCheck::Ignore)
            .validate_status(true);

        assert_eq!(3, config.poll_attempts);
        assert_eq!(5, config.poll_interval_ms);
        assert_eq!(WriteCheck::Ignore, config.write_check);
        assert!(config.validate_status);
        assert_eq!(10, config.max_poll_time_ms());
    }

    #[test]
    fn max_poll_time_saturates() {
        let config = Configuration::default().poll_attempts(3).poll_interval_ms(u32::MAX);
        assert_eq!(u32::MAX, config.max_poll_time_ms());

        let single = Configuration::default().poll_attempts(1).poll_interval_ms(u32::MAX);
        assert_eq!(0, single.max_poll_time_ms());
    }
}
