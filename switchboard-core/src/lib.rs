//! Board-agnostic core of the Switchboard HAL framework
//!
//! Hardware-specific drivers bind themselves into a [`Registry`] during
//! start-up; application code calls the wrappers in [`dispatch`], which
//! look up the bound implementation on every call and invoke it.
//!
//! - Capability registry (slot tables, bind and export contracts)
//! - Invocation observers (pre/post hooks, call counters)
//! - Interrupt-safe shared registry cell
//! - GPIO wrapper dispatch and an `embedded-hal` pin adapter
//! - Board pin configuration

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dispatch;
pub mod registry;

pub use config::{BoardConfig, BoardError, ConfigError, PinAssignment};
pub use dispatch::{DispatchError, Gpio, RegistryPin, ViolationPolicy};
pub use registry::{
    AlreadyInstalled, BadParam, Hooks, InitImpl, InitRegistration, InvocationCounter,
    InvocationObserver, OpImpl, OpRegistration, Registration, Registry, RegistryError,
    SharedRegistry, SlotKey,
};
pub use switchboard_hal as hal;
