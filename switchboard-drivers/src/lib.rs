//! Driver implementations for the Switchboard registry
//!
//! Each driver module exposes plain functions with the signatures the
//! registry expects, plus a `bind_all` that registers them:
//!
//! - `sim`: simulated 10-port GPIO controller for host testing

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod sim;
