//! Switchboard Hardware Abstraction Layer
//!
//! This crate defines the vocabulary shared between chip-specific drivers
//! and the hardware-agnostic wrapper layer: capability ids, pin and
//! external-interrupt configuration records, and GPIO status codes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (wrapper calls)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  switchboard-core (registry + wrappers) │
//! └─────────────────────────────────────────┘
//!                     │  export / bind
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ chip driver A │       │ chip driver B │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! Both sides depend only on this crate, so a driver never needs to know
//! about the wrapper layer and vice versa.

#![no_std]
#![deny(unsafe_code)]

pub mod capability;
pub mod exti;
pub mod gpio;

// Re-export key types at crate root for convenience
pub use capability::{Capability, InitCapability, INIT_SLOT_CAPACITY, SLOT_CAPACITY};
pub use exti::{ExtiConfig, ExtiEdge, IsrHandler};
pub use gpio::{
    AltFunction, Direction, DriveMode, DriveSpeed, DriveStrength, GpioError, GpioStatus,
    PinConfig,
};
