//! Capability-tagged implementation references
//!
//! Each variant holds a reference to a callable with exactly the signature
//! its capability requires, so binding a driver function with the wrong
//! signature fails to compile. Plain driver functions coerce directly:
//!
//! ```ignore
//! let read = OpImpl::PinRead(&my_chip::pin_read);
//! ```
//!
//! Closures work as well, which is how tests attach recording stubs.

use core::fmt;

use switchboard_hal::{AltFunction, Capability, ExtiConfig, GpioStatus, InitCapability, PinConfig};

/// Board bring-up: `() -> status`
pub type BspInitFn<'a> = &'a (dyn Fn() -> GpioStatus + Sync);

/// Pin initialization: `(port, pin, config) -> status`
pub type PinInitFn<'a> = &'a (dyn Fn(u8, u8, &PinConfig) -> GpioStatus + Sync);

/// Port de-initialization: `(port) -> status`
pub type PortDeinitFn<'a> = &'a (dyn Fn(u8) -> GpioStatus + Sync);

/// Boolean pin query: `(port, pin) -> level`
pub type PinQueryFn<'a> = &'a (dyn Fn(u8, u8) -> bool + Sync);

/// Pin write: `(port, pin, high) -> status`
pub type PinWriteFn<'a> = &'a (dyn Fn(u8, u8, bool) -> GpioStatus + Sync);

/// Argument-less pin action: `(port, pin) -> status`
pub type PinActionFn<'a> = &'a (dyn Fn(u8, u8) -> GpioStatus + Sync);

/// Alternate function select: `(port, pin, function) -> status`
pub type AltFunctionFn<'a> = &'a (dyn Fn(u8, u8, AltFunction) -> GpioStatus + Sync);

/// External interrupt control: `(port, pin, config) -> status`
pub type ExtiFn<'a> = &'a (dyn Fn(u8, u8, &ExtiConfig) -> GpioStatus + Sync);

/// Fire-and-forget pin action: `(port, pin)`
pub type PinClearFn<'a> = &'a (dyn Fn(u8, u8) + Sync);

/// Initialization capability implementations
#[derive(Clone, Copy)]
pub enum InitImpl<'a> {
    BspInit(BspInitFn<'a>),
    DigitalPinInit(PinInitFn<'a>),
    DigitalPortDeinit(PortDeinitFn<'a>),
}

impl InitImpl<'_> {
    /// Capability this implementation satisfies
    pub fn capability(&self) -> InitCapability {
        match self {
            InitImpl::BspInit(_) => InitCapability::BspInit,
            InitImpl::DigitalPinInit(_) => InitCapability::DigitalPinInit,
            InitImpl::DigitalPortDeinit(_) => InitCapability::DigitalPortDeinit,
        }
    }
}

impl fmt::Debug for InitImpl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InitImpl::{:?}", self.capability())
    }
}

/// Operational capability implementations
#[derive(Clone, Copy)]
pub enum OpImpl<'a> {
    PinRead(PinQueryFn<'a>),
    PinWrite(PinWriteFn<'a>),
    PinToggle(PinActionFn<'a>),
    RegisterExti(ExtiFn<'a>),
    TriggerSwExti(PinActionFn<'a>),
    SetAltFunction(AltFunctionFn<'a>),
    DisableExti(ExtiFn<'a>),
    ExtiStatus(PinQueryFn<'a>),
    ExtiStatusUnchecked(PinQueryFn<'a>),
    ClearExtiStatus(PinActionFn<'a>),
    ClearExtiStatusUnchecked(PinClearFn<'a>),
}

impl OpImpl<'_> {
    /// Capability this implementation satisfies
    pub fn capability(&self) -> Capability {
        match self {
            OpImpl::PinRead(_) => Capability::PinRead,
            OpImpl::PinWrite(_) => Capability::PinWrite,
            OpImpl::PinToggle(_) => Capability::PinToggle,
            OpImpl::RegisterExti(_) => Capability::RegisterExti,
            OpImpl::TriggerSwExti(_) => Capability::TriggerSwExti,
            OpImpl::SetAltFunction(_) => Capability::SetAltFunction,
            OpImpl::DisableExti(_) => Capability::DisableExti,
            OpImpl::ExtiStatus(_) => Capability::ExtiStatus,
            OpImpl::ExtiStatusUnchecked(_) => Capability::ExtiStatusUnchecked,
            OpImpl::ClearExtiStatus(_) => Capability::ClearExtiStatus,
            OpImpl::ClearExtiStatusUnchecked(_) => Capability::ClearExtiStatusUnchecked,
        }
    }
}

impl fmt::Debug for OpImpl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpImpl::{:?}", self.capability())
    }
}
