//! Capability ids
//!
//! Every operation a driver can provide is addressed by a fixed id in one of
//! two namespaces: initialization capabilities and operational capabilities.
//! The id doubles as the slot index in the registry table for its namespace.

/// Number of slots in the initialization-capability table
pub const INIT_SLOT_CAPACITY: usize = 32;

/// Number of slots in the operational-capability table
pub const SLOT_CAPACITY: usize = 255;

/// Initialization capabilities
///
/// Run during start-up, before the interrupt controller is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InitCapability {
    /// Board support package bring-up
    BspInit = 0,
    /// Configure a single digital I/O pin
    DigitalPinInit = 1,
    /// Return a whole port to its reset configuration
    DigitalPortDeinit = 2,
}

impl InitCapability {
    /// Reserved out-of-range id; never a valid slot index
    pub const INVALID: u8 = INIT_SLOT_CAPACITY as u8;

    /// Every defined initialization capability, in id order
    pub const ALL: [InitCapability; 3] = [
        InitCapability::BspInit,
        InitCapability::DigitalPinInit,
        InitCapability::DigitalPortDeinit,
    ];

    /// Get the id as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Slot index in the initialization table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Create a capability from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(InitCapability::BspInit),
            1 => Some(InitCapability::DigitalPinInit),
            2 => Some(InitCapability::DigitalPortDeinit),
            _ => None,
        }
    }
}

/// Operational capabilities
///
/// Called from the foreground loop and from interrupt context once the
/// registry has been populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Capability {
    /// Read the input level of a pin
    PinRead = 0,
    /// Drive an output pin to a level
    PinWrite = 1,
    /// Invert the output level of a pin
    PinToggle = 2,
    /// Attach an interrupt handler to a pin edge
    RegisterExti = 3,
    /// Raise the pin interrupt from software
    TriggerSwExti = 4,
    /// Route a pin to an alternate peripheral function
    SetAltFunction = 5,
    /// Detach the interrupt from a pin
    DisableExti = 6,
    /// Query the pending interrupt flag, validating port and pin
    ExtiStatus = 7,
    /// Query the pending interrupt flag without argument validation
    ExtiStatusUnchecked = 8,
    /// Clear the pending interrupt flag, validating port and pin
    ClearExtiStatus = 9,
    /// Clear the pending interrupt flag without argument validation
    ClearExtiStatusUnchecked = 10,
}

impl Capability {
    /// Reserved out-of-range id; never a valid slot index
    pub const INVALID: u8 = 255;

    /// Every defined operational capability, in id order
    pub const ALL: [Capability; 11] = [
        Capability::PinRead,
        Capability::PinWrite,
        Capability::PinToggle,
        Capability::RegisterExti,
        Capability::TriggerSwExti,
        Capability::SetAltFunction,
        Capability::DisableExti,
        Capability::ExtiStatus,
        Capability::ExtiStatusUnchecked,
        Capability::ClearExtiStatus,
        Capability::ClearExtiStatusUnchecked,
    ];

    /// Get the id as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Slot index in the operational table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Create a capability from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_u8() == value)
    }

    /// Whether the capability is a boolean query rather than an action
    pub fn is_query(self) -> bool {
        matches!(
            self,
            Capability::PinRead | Capability::ExtiStatus | Capability::ExtiStatusUnchecked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_above_every_id() {
        for cap in InitCapability::ALL {
            assert!(cap.as_u8() < InitCapability::INVALID);
            assert!(cap.index() < INIT_SLOT_CAPACITY);
        }
        for cap in Capability::ALL {
            assert!(cap.as_u8() < Capability::INVALID);
            assert!(cap.index() < SLOT_CAPACITY);
        }
        assert_eq!(InitCapability::INVALID as usize, INIT_SLOT_CAPACITY);
        assert_eq!(Capability::INVALID as usize, SLOT_CAPACITY);
    }

    #[test]
    fn test_from_u8() {
        for cap in InitCapability::ALL {
            assert_eq!(InitCapability::from_u8(cap.as_u8()), Some(cap));
        }
        for cap in Capability::ALL {
            assert_eq!(Capability::from_u8(cap.as_u8()), Some(cap));
        }

        assert_eq!(InitCapability::from_u8(3), None);
        assert_eq!(InitCapability::from_u8(InitCapability::INVALID), None);
        assert_eq!(Capability::from_u8(11), None);
        assert_eq!(Capability::from_u8(Capability::INVALID), None);
    }

    #[test]
    fn test_queries() {
        assert!(Capability::PinRead.is_query());
        assert!(Capability::ExtiStatusUnchecked.is_query());
        assert!(!Capability::PinToggle.is_query());
        assert!(!Capability::ClearExtiStatusUnchecked.is_query());
    }
}
