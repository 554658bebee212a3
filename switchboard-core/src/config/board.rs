//! Board pin map
//!
//! A board lists its pins once, with a label and a [`PinConfig`] each.
//! Start-up code applies the whole map through the wrappers and then looks
//! pins up by label.

use heapless::{String, Vec};
use switchboard_hal::{GpioError, PinConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dispatch::{Gpio, RegistryPin};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum pins per board
pub const MAX_BOARD_PINS: usize = 16;

/// Board map validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Label longer than [`MAX_LABEL_LEN`]
    LabelTooLong,
    /// More than [`MAX_BOARD_PINS`] assignments
    TooManyPins,
    /// Label already used
    DuplicateLabel,
    /// Port and pin already assigned
    DuplicatePin,
    /// Direction and drive mode do not combine
    InvalidPinConfig,
}

/// Failure while applying a board map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// The map itself is inconsistent
    Config(ConfigError),
    /// Pin initialization failed
    Pin { port: u8, pin: u8, error: GpioError },
}

impl From<ConfigError> for BoardError {
    fn from(e: ConfigError) -> Self {
        BoardError::Config(e)
    }
}

/// One labelled pin
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinAssignment {
    /// Pin label (e.g., "led", "button")
    pub label: String<MAX_LABEL_LEN>,
    /// GPIO port number
    pub port: u8,
    /// Pin number within the port
    pub pin: u8,
    /// Electrical configuration
    pub config: PinConfig,
}

impl PinAssignment {
    /// Create a new assignment
    pub fn new(label: &str, port: u8, pin: u8, config: PinConfig) -> Result<Self, ConfigError> {
        let mut owned = String::new();
        owned
            .push_str(label)
            .map_err(|_| ConfigError::LabelTooLong)?;
        Ok(Self {
            label: owned,
            port,
            pin,
            config,
        })
    }

    fn collides_with(&self, other: &PinAssignment) -> Option<ConfigError> {
        if self.label == other.label {
            Some(ConfigError::DuplicateLabel)
        } else if (self.port, self.pin) == (other.port, other.pin) {
            Some(ConfigError::DuplicatePin)
        } else {
            None
        }
    }
}

/// Board pin map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Pin assignments, applied in order
    pub pins: Vec<PinAssignment, MAX_BOARD_PINS>,
}

impl BoardConfig {
    /// Create an empty map
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Add a labelled pin
    pub fn add(
        &mut self,
        label: &str,
        port: u8,
        pin: u8,
        config: PinConfig,
    ) -> Result<(), ConfigError> {
        let assignment = PinAssignment::new(label, port, pin, config)?;
        if !assignment.config.is_valid() {
            return Err(ConfigError::InvalidPinConfig);
        }
        if let Some(e) = self.pins.iter().find_map(|p| p.collides_with(&assignment)) {
            return Err(e);
        }
        self.pins
            .push(assignment)
            .map_err(|_| ConfigError::TooManyPins)
    }

    /// Look up an assignment by label
    pub fn find(&self, label: &str) -> Option<&PinAssignment> {
        self.pins.iter().find(|p| p.label == label)
    }

    /// Check a map that was built field by field (e.g., deserialized)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, assignment) in self.pins.iter().enumerate() {
            if !assignment.config.is_valid() {
                return Err(ConfigError::InvalidPinConfig);
            }
            if let Some(e) = self.pins[..i]
                .iter()
                .find_map(|p| p.collides_with(assignment))
            {
                return Err(e);
            }
        }
        Ok(())
    }

    /// Initialize every pin through the wrappers, in order
    ///
    /// Stops at the first pin the driver rejects; pins before it stay
    /// initialized.
    pub fn apply(&self, gpio: &Gpio<'_, '_>) -> Result<(), BoardError> {
        self.validate()?;
        for assignment in &self.pins {
            gpio.init_pin(assignment.port, assignment.pin, &assignment.config)
                .into_result()
                .map_err(|error| {
                    warn!(
                        "pin {} ({}.{}) failed to initialize",
                        assignment.label.as_str(),
                        assignment.port,
                        assignment.pin
                    );
                    BoardError::Pin {
                        port: assignment.port,
                        pin: assignment.pin,
                        error,
                    }
                })?;
            trace!("pin {} initialized", assignment.label.as_str());
        }
        debug!("board map applied ({} pins)", self.pins.len());
        Ok(())
    }

    /// `embedded-hal` handle for a labelled pin
    pub fn pin<'r, 'a>(&self, gpio: Gpio<'r, 'a>, label: &str) -> Option<RegistryPin<'r, 'a>> {
        self.find(label)
            .map(|p| RegistryPin::new(gpio, p.port, p.pin))
    }
}
