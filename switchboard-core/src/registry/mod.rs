//! Capability registry
//!
//! Two independent namespaces map capability ids to registration records:
//!
//! - Initialization: [`InitCapability`](switchboard_hal::InitCapability),
//!   32 slots
//! - Operational: [`Capability`](switchboard_hal::Capability), 255 slots
//!
//! A slot is bound when its record carries an implementation. Binding an
//! occupied slot overwrites it; there is no unbind short of [`Registry::reset`].

mod context;
mod implementation;
mod observer;
mod shared;
mod slot;

pub use context::{InitRegistration, OpRegistration, Registry};
pub use implementation::{
    AltFunctionFn, BspInitFn, ExtiFn, InitImpl, OpImpl, PinActionFn, PinClearFn, PinInitFn,
    PinQueryFn, PinWriteFn, PortDeinitFn,
};
pub use observer::{Hooks, InvocationCounter, InvocationObserver, SlotKey};
pub use shared::{AlreadyInstalled, SharedRegistry};
pub use slot::{BadParam, Registration, RegistryError, SlotTable};

pub(crate) use observer::observe;
