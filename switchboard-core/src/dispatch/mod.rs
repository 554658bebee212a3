//! Wrapper dispatch
//!
//! Every wrapper call exports its fixed capability from the registry,
//! checks that the bound implementation has the capability's signature,
//! and invokes it between the registration's observer notifications. The
//! registry is consulted on every call; nothing is cached.

mod gpio;
mod pin;

pub use gpio::Gpio;
pub use pin::RegistryPin;

use crate::registry::{RegistryError, SlotKey};

/// Why a wrapper call did not reach an implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// The capability could not be exported
    Unbound(RegistryError),
    /// The slot holds an implementation for a different capability
    InvariantViolated(SlotKey),
}

impl From<RegistryError> for DispatchError {
    fn from(err: RegistryError) -> Self {
        DispatchError::Unbound(err)
    }
}

/// What a wrapper does when it finds a corrupted slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViolationPolicy {
    /// Panic
    Halt,
    /// Return `FatalError` from actions and `false` from queries
    Report,
}

impl Default for ViolationPolicy {
    fn default() -> Self {
        if cfg!(feature = "fail-fast") {
            ViolationPolicy::Halt
        } else {
            ViolationPolicy::Report
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_follows_feature() {
        let expected = if cfg!(feature = "fail-fast") {
            ViolationPolicy::Halt
        } else {
            ViolationPolicy::Report
        };
        assert_eq!(ViolationPolicy::default(), expected);
    }

    #[test]
    fn test_registry_error_converts() {
        assert_eq!(
            DispatchError::from(RegistryError::NotFound),
            DispatchError::Unbound(RegistryError::NotFound)
        );
    }
}
