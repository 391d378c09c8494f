//! Recording test doubles that log bus, pin and clock activity into one
//! shared timeline, so ordering across peripherals can be asserted.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use embedded_hal::spi::{self, SpiBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Byte(u8),
    Flush,
    LatchLow,
    LatchHigh,
    EnableLow,
    EnableHigh,
    Duty(u16),
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Bytes put on the bus, in order.
    pub fn bytes(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

// ---------------------------------------------------------------------------
// SPI
// ---------------------------------------------------------------------------

pub struct RecordingSpi {
    recorder: Recorder,
    writes_before_failure: Option<usize>,
}

impl RecordingSpi {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            writes_before_failure: None,
        }
    }

    /// Fail every write after the first `writes` succeed.
    pub fn fail_after(&mut self, writes: usize) {
        self.writes_before_failure = Some(writes);
    }
}

impl spi::ErrorType for RecordingSpi {
    type Error = spi::ErrorKind;
}

impl SpiBus<u8> for RecordingSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        if let Some(remaining) = self.writes_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(spi::ErrorKind::Other);
            }
            *remaining -= 1;
        }
        for &b in words {
            self.recorder.push(Event::Byte(b));
        }
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::Flush);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pins
// ---------------------------------------------------------------------------

pub struct RecordingLatch {
    recorder: Recorder,
}

impl RecordingLatch {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
        }
    }
}

impl digital::ErrorType for RecordingLatch {
    type Error = digital::ErrorKind;
}

impl OutputPin for RecordingLatch {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::LatchLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::LatchHigh);
        Ok(())
    }
}

pub struct RecordingEnable {
    recorder: Recorder,
}

impl RecordingEnable {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
        }
    }
}

impl digital::ErrorType for RecordingEnable {
    type Error = digital::ErrorKind;
}

impl OutputPin for RecordingEnable {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::EnableLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::EnableHigh);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PWM
// ---------------------------------------------------------------------------

pub const PWM_MAX_DUTY: u16 = 1000;

pub struct RecordingPwm {
    recorder: Recorder,
}

impl RecordingPwm {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
        }
    }
}

impl pwm::ErrorType for RecordingPwm {
    type Error = pwm::ErrorKind;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        PWM_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.recorder.push(Event::Duty(duty));
        Ok(())
    }
}
