//! GPIO and external interrupt wrappers

use switchboard_hal::{
    AltFunction, Capability, ExtiConfig, GpioStatus, InitCapability, PinConfig,
};

use super::{DispatchError, ViolationPolicy};
use crate::registry::{observe, InitImpl, OpImpl, Registry, SlotKey};

/// Export `$cap`, check the variant, and call it inside the observer window
macro_rules! dispatch {
    ($gpio:ident, $export:ident, $kind:ident :: $variant:ident, $cap:expr, |$f:ident| $call:expr) => {{
        let slot = SlotKey::from($cap);
        match $gpio.registry.$export($cap) {
            Err(err) => {
                warn!("{} not bound: {}", slot, err);
                Err(DispatchError::Unbound(err))
            }
            Ok(record) => match record.implementation {
                Some($kind::$variant($f)) => Ok(observe(record.observer, slot, || $call)),
                _ => Err(DispatchError::InvariantViolated(slot)),
            },
        }
    }};
}

/// Hardware-agnostic GPIO operations
///
/// A thin handle over a [`Registry`]; copy it freely. Actions return the
/// bound driver's [`GpioStatus`] unchanged, or `BadParam` if the capability
/// is not bound. Queries return `false` if the capability is not bound;
/// use the `try_` variants to tell that apart from a low level.
#[derive(Clone, Copy)]
pub struct Gpio<'r, 'a> {
    registry: &'r Registry<'a>,
    policy: ViolationPolicy,
}

impl<'r, 'a> Gpio<'r, 'a> {
    /// Wrap `registry` with the default violation policy
    pub fn new(registry: &'r Registry<'a>) -> Self {
        Self {
            registry,
            policy: ViolationPolicy::default(),
        }
    }

    /// Replace the violation policy
    pub fn with_policy(mut self, policy: ViolationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active violation policy
    pub fn policy(&self) -> ViolationPolicy {
        self.policy
    }

    /// Underlying registry
    pub fn registry(&self) -> &'r Registry<'a> {
        self.registry
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    /// Board bring-up
    pub fn init_board(&self) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export_init,
            InitImpl::BspInit,
            InitCapability::BspInit,
            |f| f()
        ))
    }

    /// Configure one pin
    pub fn init_pin(&self, port: u8, pin: u8, config: &PinConfig) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export_init,
            InitImpl::DigitalPinInit,
            InitCapability::DigitalPinInit,
            |f| f(port, pin, config)
        ))
    }

    /// Return every pin of a port to its reset state
    pub fn deinit_port(&self, port: u8) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export_init,
            InitImpl::DigitalPortDeinit,
            InitCapability::DigitalPortDeinit,
            |f| f(port)
        ))
    }

    // ========================================================================
    // Pin operations
    // ========================================================================

    /// Select a pin's alternate function
    pub fn set_alt_function(&self, port: u8, pin: u8, function: AltFunction) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::SetAltFunction,
            Capability::SetAltFunction,
            |f| f(port, pin, function)
        ))
    }

    /// Read a pin level; `false` if not possible
    pub fn read(&self, port: u8, pin: u8) -> bool {
        self.settle_query(self.try_read(port, pin))
    }

    /// Read a pin level
    ///
    /// Unlike [`read`](Self::read), a corrupted slot is returned as an error
    /// regardless of the violation policy.
    pub fn try_read(&self, port: u8, pin: u8) -> Result<bool, DispatchError> {
        dispatch!(self, export, OpImpl::PinRead, Capability::PinRead, |f| f(
            port, pin
        ))
    }

    /// Drive a pin high or low
    pub fn write(&self, port: u8, pin: u8, high: bool) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::PinWrite,
            Capability::PinWrite,
            |f| f(port, pin, high)
        ))
    }

    /// Invert a pin's output level
    pub fn toggle(&self, port: u8, pin: u8) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::PinToggle,
            Capability::PinToggle,
            |f| f(port, pin)
        ))
    }

    // ========================================================================
    // External interrupts
    // ========================================================================

    /// Enable an external interrupt on a pin
    pub fn register_exti(&self, port: u8, pin: u8, config: &ExtiConfig) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::RegisterExti,
            Capability::RegisterExti,
            |f| f(port, pin, config)
        ))
    }

    /// Disable an external interrupt on a pin
    pub fn disable_exti(&self, port: u8, pin: u8, config: &ExtiConfig) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::DisableExti,
            Capability::DisableExti,
            |f| f(port, pin, config)
        ))
    }

    /// Raise a pin's interrupt from software
    pub fn trigger_sw_exti(&self, port: u8, pin: u8) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::TriggerSwExti,
            Capability::TriggerSwExti,
            |f| f(port, pin)
        ))
    }

    /// Pending interrupt flag of a pin, validating the pin
    pub fn exti_status(&self, port: u8, pin: u8) -> bool {
        self.settle_query(self.try_exti_status(port, pin))
    }

    /// Pending interrupt flag of a pin, validating the pin
    pub fn try_exti_status(&self, port: u8, pin: u8) -> Result<bool, DispatchError> {
        dispatch!(self, export, OpImpl::ExtiStatus, Capability::ExtiStatus, |f| f(
            port, pin
        ))
    }

    /// Pending interrupt flag of a pin without driver-side validation
    ///
    /// For interrupt handlers that already know the pin is valid.
    pub fn exti_status_unchecked(&self, port: u8, pin: u8) -> bool {
        self.settle_query(self.try_exti_status_unchecked(port, pin))
    }

    /// Pending interrupt flag of a pin without driver-side validation
    pub fn try_exti_status_unchecked(&self, port: u8, pin: u8) -> Result<bool, DispatchError> {
        dispatch!(
            self,
            export,
            OpImpl::ExtiStatusUnchecked,
            Capability::ExtiStatusUnchecked,
            |f| f(port, pin)
        )
    }

    /// Acknowledge a pin's pending interrupt, validating the pin
    pub fn clear_exti_status(&self, port: u8, pin: u8) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::ClearExtiStatus,
            Capability::ClearExtiStatus,
            |f| f(port, pin)
        ))
    }

    /// Acknowledge a pin's pending interrupt without driver-side validation
    ///
    /// The driver reports nothing; `Success` only means it was called.
    pub fn clear_exti_status_unchecked(&self, port: u8, pin: u8) -> GpioStatus {
        self.settle(dispatch!(
            self,
            export,
            OpImpl::ClearExtiStatusUnchecked,
            Capability::ClearExtiStatusUnchecked,
            |f| {
                f(port, pin);
                GpioStatus::Success
            }
        ))
    }

    // ========================================================================
    // Failure mapping
    // ========================================================================

    fn settle(&self, result: Result<GpioStatus, DispatchError>) -> GpioStatus {
        match result {
            Ok(status) => status,
            Err(DispatchError::Unbound(_)) => GpioStatus::BadParam,
            Err(DispatchError::InvariantViolated(slot)) => {
                self.violated(slot, GpioStatus::FatalError)
            }
        }
    }

    fn settle_query(&self, result: Result<bool, DispatchError>) -> bool {
        match result {
            Ok(level) => level,
            Err(DispatchError::Unbound(_)) => false,
            Err(DispatchError::InvariantViolated(slot)) => self.violated(slot, false),
        }
    }

    pub(super) fn violated<T>(&self, slot: SlotKey, reported: T) -> T {
        error!("{} holds an implementation of another capability", slot);
        match self.policy {
            ViolationPolicy::Halt => panic!("corrupted registry slot {:?}", slot),
            ViolationPolicy::Report => reported,
        }
    }
}
