//! `embedded-hal` pin adapter over the wrappers

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use switchboard_hal::GpioError;

use super::{DispatchError, Gpio};

/// One pin driven through the registry
///
/// Lets drivers written against `embedded-hal` run on whatever chip the
/// registry is bound to. The pin must already be initialized.
#[derive(Clone, Copy)]
pub struct RegistryPin<'r, 'a> {
    gpio: Gpio<'r, 'a>,
    port: u8,
    pin: u8,
}

impl<'r, 'a> RegistryPin<'r, 'a> {
    pub fn new(gpio: Gpio<'r, 'a>, port: u8, pin: u8) -> Self {
        Self { gpio, port, pin }
    }

    pub fn port(&self) -> u8 {
        self.port
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    fn level(&self) -> Result<bool, GpioError> {
        self.gpio
            .try_read(self.port, self.pin)
            .map_err(|err| match err {
                DispatchError::Unbound(_) => GpioError::BadParam,
                DispatchError::InvariantViolated(slot) => {
                    self.gpio.violated(slot, GpioError::Fatal)
                }
            })
    }
}

impl ErrorType for RegistryPin<'_, '_> {
    type Error = GpioError;
}

impl OutputPin for RegistryPin<'_, '_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.gpio.write(self.port, self.pin, false).into_result()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.gpio.write(self.port, self.pin, true).into_result()
    }
}

impl StatefulOutputPin for RegistryPin<'_, '_> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.level()
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.level().map(|high| !high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.gpio.toggle(self.port, self.pin).into_result()
    }
}

impl InputPin for RegistryPin<'_, '_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.level()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.level().map(|high| !high)
    }
}
