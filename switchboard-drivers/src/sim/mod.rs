//! Simulated GPIO controller
//!
//! A register-level model with the same validation rules as a real chip
//! driver, usable on the host. The controller is a single static, like the
//! peripheral it stands in for; [`bind_all`] registers its driver functions
//! into a [`Registry`], and a test harness plays the outside world with
//! [`drive_input`] and the interrupt controller with [`service_interrupts`].

mod bank;

pub use bank::{PinState, PortBank, PortState, PINS_PER_PORT, PORT_COUNT};

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use switchboard_core::{InitImpl, OpImpl, Registration, Registry, RegistryError};
use switchboard_hal::{AltFunction, ExtiConfig, GpioStatus, PinConfig};

static BANK: Mutex<CriticalSectionRawMutex, RefCell<PortBank>> =
    Mutex::new(RefCell::new(PortBank::new()));

fn with_bank<R>(f: impl FnOnce(&mut PortBank) -> R) -> R {
    BANK.lock(|bank| f(&mut bank.borrow_mut()))
}

// ============================================================================
// Driver functions
// ============================================================================

/// Board bring-up: resets the controller
pub fn bsp_init() -> GpioStatus {
    with_bank(PortBank::reset);
    debug!("sim: controller reset");
    GpioStatus::Success
}

pub fn init_pin(port: u8, pin: u8, config: &PinConfig) -> GpioStatus {
    let status = with_bank(|bank| bank.init_pin(port, pin, config));
    if !status.is_success() {
        warn!("sim: rejected config for {}.{}", port, pin);
    }
    status
}

pub fn deinit_port(port: u8) -> GpioStatus {
    with_bank(|bank| bank.deinit_port(port))
}

pub fn set_alt_function(port: u8, pin: u8, function: AltFunction) -> GpioStatus {
    with_bank(|bank| bank.set_alt_function(port, pin, function))
}

pub fn read(port: u8, pin: u8) -> bool {
    with_bank(|bank| bank.read(port, pin))
}

pub fn write(port: u8, pin: u8, high: bool) -> GpioStatus {
    with_bank(|bank| bank.write(port, pin, high))
}

pub fn toggle(port: u8, pin: u8) -> GpioStatus {
    with_bank(|bank| bank.toggle(port, pin))
}

pub fn register_exti(port: u8, pin: u8, config: &ExtiConfig) -> GpioStatus {
    let status = with_bank(|bank| bank.register_exti(port, pin, config));
    if status.is_success() {
        trace!("sim: exti on {}.{} at priority {}", port, pin, config.priority);
    }
    status
}

pub fn disable_exti(port: u8, pin: u8, _config: &ExtiConfig) -> GpioStatus {
    with_bank(|bank| bank.disable_exti(port, pin))
}

pub fn trigger_sw_exti(port: u8, pin: u8) -> GpioStatus {
    with_bank(|bank| bank.trigger_sw_exti(port, pin))
}

pub fn exti_status(port: u8, pin: u8) -> bool {
    with_bank(|bank| bank.exti_status(port, pin))
}

pub fn exti_status_unchecked(port: u8, pin: u8) -> bool {
    with_bank(|bank| bank.exti_status_unchecked(port, pin))
}

pub fn clear_exti_status(port: u8, pin: u8) -> GpioStatus {
    with_bank(|bank| bank.clear_exti_status(port, pin))
}

pub fn clear_exti_status_unchecked(port: u8, pin: u8) {
    with_bank(|bank| bank.clear_exti_status_unchecked(port, pin))
}

/// Register every simulated driver function
pub fn bind_all(registry: &mut Registry<'_>) -> Result<(), RegistryError> {
    registry.register_init(&Registration::new(InitImpl::BspInit(&bsp_init)))?;
    registry.register_init(&Registration::new(InitImpl::DigitalPinInit(&init_pin)))?;
    registry.register_init(&Registration::new(InitImpl::DigitalPortDeinit(&deinit_port)))?;

    let operations = [
        OpImpl::PinRead(&read),
        OpImpl::PinWrite(&write),
        OpImpl::PinToggle(&toggle),
        OpImpl::RegisterExti(&register_exti),
        OpImpl::TriggerSwExti(&trigger_sw_exti),
        OpImpl::SetAltFunction(&set_alt_function),
        OpImpl::DisableExti(&disable_exti),
        OpImpl::ExtiStatus(&exti_status),
        OpImpl::ExtiStatusUnchecked(&exti_status_unchecked),
        OpImpl::ClearExtiStatus(&clear_exti_status),
        OpImpl::ClearExtiStatusUnchecked(&clear_exti_status_unchecked),
    ];
    for operation in operations {
        registry.register(&Registration::new(operation))?;
    }
    debug!("sim: bound {} operations", operations.len());
    Ok(())
}

// ============================================================================
// Test harness side
// ============================================================================

/// Drive a pin from outside the chip
pub fn drive_input(port: u8, pin: u8, high: bool) -> GpioStatus {
    with_bank(|bank| bank.drive_input(port, pin, high))
}

/// Copy of the whole controller state
pub fn snapshot() -> PortBank {
    with_bank(|bank| *bank)
}

/// Return the controller to its reset state
pub fn reset() {
    with_bank(PortBank::reset);
}

/// Run the handlers of every port with an enabled pending interrupt
///
/// Handlers run outside the controller lock, most urgent port first, so
/// they may call back into the driver. A handler that does not clear its
/// flag runs again on the next call. Returns the number of handlers run.
pub fn service_interrupts() -> usize {
    let pending = with_bank(|bank| bank.pending_handlers());
    for &(_port, handler) in &pending {
        trace!("sim: servicing port {}", _port);
        handler();
    }
    pending.len()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Mutex, MutexGuard};

    use super::*;
    use switchboard_core::Gpio;
    use switchboard_hal::{Capability, DriveMode, ExtiEdge, InitCapability};

    // The controller is global
    static SERIAL: Mutex<()> = Mutex::new(());

    fn exclusive() -> MutexGuard<'static, ()> {
        let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        reset();
        guard
    }

    static HANDLED: AtomicU32 = AtomicU32::new(0);

    fn acknowledge_port_3() {
        HANDLED.fetch_add(1, Ordering::Relaxed);
        clear_exti_status(3, 1);
    }

    #[test]
    fn test_bind_all_fills_every_slot() {
        let _guard = exclusive();
        let mut registry = Registry::new();
        bind_all(&mut registry).unwrap();

        for cap in Capability::ALL {
            assert!(registry.is_bound(cap), "{:?} unbound", cap);
        }
        for cap in InitCapability::ALL {
            assert!(registry.is_init_bound(cap), "{:?} unbound", cap);
        }
    }

    #[test]
    fn test_wrappers_reach_controller() {
        let _guard = exclusive();
        let mut registry = Registry::new();
        bind_all(&mut registry).unwrap();
        let gpio = Gpio::new(&registry);

        assert_eq!(gpio.init_board(), GpioStatus::Success);
        assert_eq!(gpio.init_pin(8, 4, &PinConfig::output(true)), GpioStatus::Success);
        assert!(gpio.read(8, 4));
        assert_eq!(gpio.toggle(8, 4), GpioStatus::Success);
        assert!(!snapshot().read(8, 4));

        assert_eq!(gpio.write(10, 0, true), GpioStatus::BadParam);
        assert_eq!(gpio.deinit_port(8), GpioStatus::Success);
        assert!(snapshot().pin(8, 4).unwrap().config.is_none());
    }

    #[test]
    fn test_service_runs_handler_until_cleared() {
        let _guard = exclusive();
        let start = HANDLED.load(Ordering::Relaxed);

        init_pin(3, 1, &PinConfig::input(DriveMode::PullDown));
        register_exti(3, 1, &ExtiConfig::new(2, ExtiEdge::Rising, acknowledge_port_3));
        assert_eq!(service_interrupts(), 0);

        drive_input(3, 1, true);
        assert!(exti_status(3, 1));
        assert_eq!(service_interrupts(), 1);
        assert!(!exti_status(3, 1));
        assert_eq!(service_interrupts(), 0);
        assert_eq!(HANDLED.load(Ordering::Relaxed) - start, 1);
    }

    #[test]
    fn test_unchecked_clear_through_registry() {
        let _guard = exclusive();
        let mut registry = Registry::new();
        bind_all(&mut registry).unwrap();
        let gpio = Gpio::new(&registry);

        gpio.init_pin(3, 1, &PinConfig::input(DriveMode::PullDown));
        gpio.register_exti(
            3,
            1,
            &ExtiConfig::new(2, ExtiEdge::Rising, acknowledge_port_3),
        );
        assert_eq!(gpio.trigger_sw_exti(3, 1), GpioStatus::Success);
        assert!(gpio.exti_status_unchecked(3, 1));
        assert_eq!(gpio.clear_exti_status_unchecked(3, 1), GpioStatus::Success);
        assert!(!gpio.exti_status(3, 1));
    }
}
