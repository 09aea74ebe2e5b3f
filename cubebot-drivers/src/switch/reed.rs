//! Reed switch input
//!
//! The lift reed switches are wired to a pulled-up input and close to
//! ground when the carriage magnet is over them, so the pin reads high
//! while the switch is open. An open switch is the active level.

use cubebot_core::traits::LimitSwitch;
use embedded_hal::digital::{Error as _, InputPin};

/// Reed switch on a digital input
pub struct ReedSwitch<P> {
    pin: P,
    /// If true, active = pin LOW
    inverted: bool,
    /// Level reported when the pin cannot be read
    fallback: bool,
    /// A read failed since the last clear
    faulted: bool,
}

impl<P: InputPin> ReedSwitch<P> {
    /// Create a reed switch that is active while the pin reads high
    ///
    /// Read errors report inactive.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            inverted: false,
            fallback: false,
            faulted: false,
        }
    }

    /// Create a reed switch that is active while the pin reads low
    pub fn new_active_low(pin: P) -> Self {
        Self {
            inverted: true,
            ..Self::new(pin)
        }
    }

    /// Level to report when the pin read fails
    pub fn with_fallback(mut self, level: bool) -> Self {
        self.fallback = level;
        self
    }

    /// Check if a read has failed since the last clear
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Forget a latched fault
    pub fn clear_fault(&mut self) {
        self.faulted = false;
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> LimitSwitch for ReedSwitch<P> {
    fn is_active(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.inverted,
            Err(e) => {
                if !self.faulted {
                    log::warn!("Reed switch read failed: {:?}", e.kind());
                }
                self.faulted = true;
                self.fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock input pin for testing
    struct MockPin {
        high: bool,
        fail: bool,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self { high, fail: false }
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    #[test]
    fn test_active_high_switch() {
        let mut switch = ReedSwitch::new(MockPin::new(true));
        assert!(switch.is_active());

        switch.pin.high = false;
        assert!(!switch.is_active());
    }

    #[test]
    fn test_active_low_switch() {
        let mut switch = ReedSwitch::new_active_low(MockPin::new(true));
        assert!(!switch.is_active());

        switch.pin.high = false;
        assert!(switch.is_active());
    }

    #[test]
    fn test_read_failure_reports_fallback() {
        let mut pin = MockPin::new(true);
        pin.fail = true;

        let mut switch = ReedSwitch::new(pin);
        assert!(!switch.is_active());
        assert!(switch.is_faulted());

        let mut pin = MockPin::new(false);
        pin.fail = true;
        let mut switch = ReedSwitch::new(pin).with_fallback(true);
        assert!(switch.is_active());
    }

    #[test]
    fn test_fault_latches_until_cleared() {
        let mut pin = MockPin::new(true);
        pin.fail = true;
        let mut switch = ReedSwitch::new(pin);
        switch.is_active();

        switch.pin.fail = false;
        assert!(switch.is_active());
        assert!(switch.is_faulted());

        switch.clear_fault();
        assert!(!switch.is_faulted());
    }
}
