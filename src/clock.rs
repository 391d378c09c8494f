//! Auxiliary LCD clock.
//!
//! The panel's row driver needs a fixed, low-frequency square wave on its
//! LCD CLOCK input, independent of pixel data. The driver only ever turns
//! it on or off; generating it is up to the platform, usually a PWM slice.

use core::convert::Infallible;

use embedded_hal::pwm::SetDutyCycle;

/// Frequency the platform should configure for the auxiliary clock.
pub const AUX_CLOCK_HZ: u32 = 61;

/// On/off control of the auxiliary LCD clock.
pub trait AuxiliaryClock {
    /// Error type of the underlying output.
    type Error;

    /// Start (`true`) or stop (`false`) the clock signal.
    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error>;
}

/// Auxiliary clock on a PWM channel already configured for
/// [`AUX_CLOCK_HZ`]. Enabled means 50 % duty, disabled means fully off.
pub struct PwmClock<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmClock<P> {
    /// Wrap a PWM channel. Does not touch the output.
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Give back the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> AuxiliaryClock for PwmClock<P> {
    type Error = P::Error;

    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error> {
        if enabled {
            self.pwm.set_duty_cycle_percent(50)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        }
    }
}

/// For boards that generate the LCD clock externally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClock;

impl AuxiliaryClock for NoClock {
    type Error = Infallible;

    fn set_enabled(&mut self, _enabled: bool) -> Result<(), Self::Error> {
        Ok(())
    }
}
