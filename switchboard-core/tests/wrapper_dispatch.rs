//! Wrapper dispatch through a registry built the way start-up code builds it.

use std::sync::Mutex;

use switchboard_core::hal::{Capability, GpioStatus, InitCapability, PinConfig};
use switchboard_core::{
    BadParam, Gpio, Hooks, InitImpl, InitRegistration, InvocationCounter, OpImpl, Registration,
    Registry, RegistryError,
};

static ORDER: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

fn record_pre() {
    ORDER.lock().unwrap().push("pre");
}

fn record_post() {
    ORDER.lock().unwrap().push("post");
}

#[test]
fn toggle_reaches_bound_driver() {
    let calls = Mutex::new(Vec::new());
    let toggle = |port: u8, pin: u8| {
        calls.lock().unwrap().push((port, pin));
        GpioStatus::Success
    };

    let mut registry = Registry::new();
    registry
        .bind(Capability::PinToggle, &Registration::new(OpImpl::PinToggle(&toggle)))
        .unwrap();

    assert_eq!(Gpio::new(&registry).toggle(8, 4), GpioStatus::Success);
    assert_eq!(*calls.lock().unwrap(), vec![(8, 4)]);
}

#[test]
fn read_without_driver_is_low() {
    let mut registry = Registry::new();
    registry.reset();

    let gpio = Gpio::new(&registry);
    assert!(!gpio.read(5, 0));
    assert!(gpio.try_read(5, 0).is_err());
}

#[test]
fn empty_pin_init_is_rejected_and_stays_unbound() {
    let mut registry = Registry::new();
    let empty: InitRegistration<'_> = Registration::EMPTY;

    assert_eq!(
        registry.bind_init(InitCapability::DigitalPinInit, &empty),
        Err(RegistryError::BadParam(BadParam::EmptyImplementation))
    );
    assert_eq!(
        registry
            .export_init(InitCapability::DigitalPinInit)
            .unwrap_err(),
        RegistryError::NotFound
    );
    assert_eq!(
        Gpio::new(&registry).init_pin(8, 4, &PinConfig::output(true)),
        GpioStatus::BadParam
    );
}

#[test]
fn hooks_run_once_around_every_call() {
    static HOOKS: Hooks = Hooks::new(Some(record_pre), Some(record_post));

    let write = |_port: u8, _pin: u8, high: bool| {
        ORDER.lock().unwrap().push("write");
        if high {
            GpioStatus::Success
        } else {
            GpioStatus::FatalError
        }
    };
    let mut registry = Registry::new();
    registry
        .register(&Registration::new(OpImpl::PinWrite(&write)).with_observer(&HOOKS))
        .unwrap();

    let gpio = Gpio::new(&registry);
    assert_eq!(gpio.write(8, 4, true), GpioStatus::Success);
    assert_eq!(gpio.write(8, 4, false), GpioStatus::FatalError);

    assert_eq!(
        *ORDER.lock().unwrap(),
        vec!["pre", "write", "post", "pre", "write", "post"]
    );
}

#[test]
fn counters_track_each_slot_independently() {
    let pin_counter = InvocationCounter::new();
    let port_counter = InvocationCounter::new();
    let init_pin = |_port: u8, _pin: u8, config: &PinConfig| {
        if config.is_valid() {
            GpioStatus::Success
        } else {
            GpioStatus::BadParam
        }
    };
    let deinit = |_port: u8| GpioStatus::Success;

    let mut registry = Registry::new();
    registry
        .register_init(
            &Registration::new(InitImpl::DigitalPinInit(&init_pin)).with_observer(&pin_counter),
        )
        .unwrap();
    registry
        .register_init(
            &Registration::new(InitImpl::DigitalPortDeinit(&deinit)).with_observer(&port_counter),
        )
        .unwrap();

    let gpio = Gpio::new(&registry);
    for pin in 0..8 {
        assert_eq!(
            gpio.init_pin(2, pin, &PinConfig::output(false)),
            GpioStatus::Success
        );
    }
    assert_eq!(gpio.deinit_port(2), GpioStatus::Success);

    assert_eq!(pin_counter.finished(), 8);
    assert_eq!(port_counter.finished(), 1);
    assert!(pin_counter.is_idle() && port_counter.is_idle());
}
