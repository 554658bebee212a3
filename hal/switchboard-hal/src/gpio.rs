//! GPIO configuration and status types
//!
//! Drivers receive these records unchanged from the wrapper layer and are
//! responsible for mapping them onto their chip's registers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Status returned by every GPIO action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GpioStatus {
    /// Operation completed
    Success = 0,
    /// Invalid port, pin or configuration, or the capability is not bound
    BadParam = 1,
    /// Unrecoverable driver or framework failure
    FatalError = 2,
}

impl GpioStatus {
    /// Check if the operation completed
    pub fn is_success(self) -> bool {
        self == GpioStatus::Success
    }

    /// Convert into a `Result` so callers can use `?`
    pub fn into_result(self) -> Result<(), GpioError> {
        match self {
            GpioStatus::Success => Ok(()),
            GpioStatus::BadParam => Err(GpioError::BadParam),
            GpioStatus::FatalError => Err(GpioError::Fatal),
        }
    }
}

/// Error form of a failed [`GpioStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Invalid argument or missing capability
    BadParam,
    /// Unrecoverable failure
    Fatal,
}

impl From<GpioError> for GpioStatus {
    fn from(e: GpioError) -> Self {
        match e {
            GpioError::BadParam => GpioStatus::BadParam,
            GpioError::Fatal => GpioStatus::FatalError,
        }
    }
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Input,
    Output,
}

impl Direction {
    /// Create a direction from its wire value (1 = input, 2 = output)
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Direction::Input),
            2 => Some(Direction::Output),
            _ => None,
        }
    }
}

/// Electrical drive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DriveMode {
    /// Strong push-pull
    StrongPushPull = 0,
    /// Resistive pull-up
    PullUp = 1,
    /// Resistive pull-down
    PullDown = 2,
    /// Open drain, drives low
    OpenDrainDrivesLow = 3,
    /// Open drain, drives high
    OpenDrainDrivesHigh = 4,
    /// High impedance
    #[default]
    HighZ = 5,
    /// Analog, input only
    Analog = 6,
}

impl DriveMode {
    /// Create a drive mode from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DriveMode::StrongPushPull),
            1 => Some(DriveMode::PullUp),
            2 => Some(DriveMode::PullDown),
            3 => Some(DriveMode::OpenDrainDrivesLow),
            4 => Some(DriveMode::OpenDrainDrivesHigh),
            5 => Some(DriveMode::HighZ),
            6 => Some(DriveMode::Analog),
            _ => None,
        }
    }

    /// Check if the mode can be used with the given direction
    ///
    /// Output pins cannot be analog.
    pub fn supports(self, direction: Direction) -> bool {
        !(direction == Direction::Output && self == DriveMode::Analog)
    }
}

/// Output drive strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DriveStrength {
    #[default]
    Full = 0,
    Half = 1,
    Quarter = 2,
}

impl DriveStrength {
    /// Create a drive strength from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DriveStrength::Full),
            1 => Some(DriveStrength::Half),
            2 => Some(DriveStrength::Quarter),
            _ => None,
        }
    }
}

/// Output slew rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DriveSpeed {
    #[default]
    Fast = 0,
    Slow = 1,
}

impl DriveSpeed {
    /// Create a drive speed from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DriveSpeed::Fast),
            1 => Some(DriveSpeed::Slow),
            _ => None,
        }
    }
}

/// Alternate-function selector
///
/// The meaning of the value is chip specific (pin mux / HSIOM setting).
/// Zero selects plain software-controlled GPIO on every supported family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltFunction(pub u16);

impl AltFunction {
    /// Software-controlled GPIO
    pub const GPIO: AltFunction = AltFunction(0);
}

/// Digital pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Input or output
    pub direction: Direction,
    /// Peripheral routing
    pub alt_function: AltFunction,
    /// Electrical drive mode
    pub drive_mode: DriveMode,
    /// Output drive strength
    pub drive_strength: DriveStrength,
    /// Output slew rate
    pub drive_speed: DriveSpeed,
    /// Level driven right after initialization
    pub initial_high: bool,
}

impl PinConfig {
    /// Push-pull output starting at `initial_high`
    pub const fn output(initial_high: bool) -> Self {
        Self {
            direction: Direction::Output,
            alt_function: AltFunction::GPIO,
            drive_mode: DriveMode::StrongPushPull,
            drive_strength: DriveStrength::Full,
            drive_speed: DriveSpeed::Fast,
            initial_high,
        }
    }

    /// Input with the given drive mode
    pub const fn input(drive_mode: DriveMode) -> Self {
        Self {
            direction: Direction::Input,
            alt_function: AltFunction::GPIO,
            drive_mode,
            drive_strength: DriveStrength::Full,
            drive_speed: DriveSpeed::Fast,
            initial_high: false,
        }
    }

    /// Set the alternate function
    pub const fn with_alt_function(mut self, alt_function: AltFunction) -> Self {
        self.alt_function = alt_function;
        self
    }

    /// Check the field combination is electrically meaningful
    pub fn is_valid(&self) -> bool {
        self.drive_mode.supports(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_into_result() {
        assert_eq!(GpioStatus::Success.into_result(), Ok(()));
        assert_eq!(GpioStatus::BadParam.into_result(), Err(GpioError::BadParam));
        assert_eq!(GpioStatus::FatalError.into_result(), Err(GpioError::Fatal));
        assert_eq!(GpioStatus::from(GpioError::Fatal), GpioStatus::FatalError);
    }

    #[test]
    fn test_analog_output_rejected() {
        let mut config = PinConfig::output(false);
        assert!(config.is_valid());

        config.drive_mode = DriveMode::Analog;
        assert!(!config.is_valid());

        let analog_in = PinConfig::input(DriveMode::Analog);
        assert!(analog_in.is_valid());
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(Direction::from_u8(1), Some(Direction::Input));
        assert_eq!(Direction::from_u8(2), Some(Direction::Output));
        assert_eq!(Direction::from_u8(0), None);
        assert_eq!(Direction::from_u8(3), None);

        assert_eq!(DriveMode::from_u8(6), Some(DriveMode::Analog));
        assert_eq!(DriveMode::from_u8(7), None);
        assert_eq!(DriveStrength::from_u8(2), Some(DriveStrength::Quarter));
        assert_eq!(DriveStrength::from_u8(3), None);
        assert_eq!(DriveSpeed::from_u8(1), Some(DriveSpeed::Slow));
        assert_eq!(DriveSpeed::from_u8(2), None);
    }

    #[test]
    fn test_builders() {
        let led = PinConfig::output(true).with_alt_function(AltFunction(3));
        assert_eq!(led.direction, Direction::Output);
        assert_eq!(led.alt_function, AltFunction(3));
        assert!(led.initial_high);

        let button = PinConfig::input(DriveMode::PullUp);
        assert_eq!(button.direction, Direction::Input);
        assert!(!button.initial_high);
    }
}
