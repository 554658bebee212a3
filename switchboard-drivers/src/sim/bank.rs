//! Register model of a simulated GPIO controller
//!
//! Ten ports of eight pins. Each port has one interrupt line shared by its
//! pins, with a per-pin mask and a per-pin pending flag, like most MCU GPIO
//! blocks.

use switchboard_hal::{AltFunction, Direction, ExtiConfig, ExtiEdge, GpioStatus, IsrHandler, PinConfig};

/// Number of ports
pub const PORT_COUNT: usize = 10;

/// Pins per port
pub const PINS_PER_PORT: usize = 8;

/// State of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinState {
    /// Configuration from the last successful init, `None` after reset
    pub config: Option<PinConfig>,
    /// Output latch
    pub output: bool,
    /// Externally driven input level
    pub input: bool,
    /// Selected alternate function
    pub alt_function: AltFunction,
    /// Interrupt edge
    pub edge: ExtiEdge,
}

impl PinState {
    const RESET: Self = Self {
        config: None,
        output: false,
        input: false,
        alt_function: AltFunction::GPIO,
        edge: ExtiEdge::Disabled,
    };

    /// Level seen by a read: the latch for outputs, the input otherwise
    pub fn level(&self) -> bool {
        match self.config {
            Some(config) if config.direction == Direction::Output => self.output,
            _ => self.input,
        }
    }
}

/// State of one port
#[derive(Debug, Clone, Copy)]
pub struct PortState {
    pub pins: [PinState; PINS_PER_PORT],
    /// Bit n enables the interrupt of pin n
    pub interrupt_mask: u8,
    /// Bit n is set while pin n has a pending interrupt
    pub interrupt_status: u8,
    /// Priority of the port interrupt line
    pub priority: u8,
    /// Handler of the port interrupt line
    pub handler: Option<IsrHandler>,
}

impl PortState {
    const RESET: Self = Self {
        pins: [PinState::RESET; PINS_PER_PORT],
        interrupt_mask: 0,
        interrupt_status: 0,
        priority: 0,
        handler: None,
    };

    /// Pending interrupts that are also enabled
    pub fn pending(&self) -> u8 {
        self.interrupt_status & self.interrupt_mask
    }
}

/// The whole controller
#[derive(Debug, Clone, Copy)]
pub struct PortBank {
    ports: [PortState; PORT_COUNT],
}

fn pin_bit(pin: u8) -> u8 {
    1 << pin
}

impl PortBank {
    /// Controller in its reset state
    pub const fn new() -> Self {
        Self {
            ports: [PortState::RESET; PORT_COUNT],
        }
    }

    /// Return every port to its reset state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check that a port and pin exist
    pub fn validate(port: u8, pin: u8) -> bool {
        (port as usize) < PORT_COUNT && (pin as usize) < PINS_PER_PORT
    }

    /// Port state, if the port exists
    pub fn port(&self, port: u8) -> Option<&PortState> {
        self.ports.get(port as usize)
    }

    /// Pin state, if the pin exists
    pub fn pin(&self, port: u8, pin: u8) -> Option<&PinState> {
        self.port(port)?.pins.get(pin as usize)
    }

    fn pin_mut(&mut self, port: u8, pin: u8) -> Option<&mut PinState> {
        self.ports.get_mut(port as usize)?.pins.get_mut(pin as usize)
    }

    fn port_mut(&mut self, port: u8, pin: u8) -> Option<&mut PortState> {
        if Self::validate(port, pin) {
            self.ports.get_mut(port as usize)
        } else {
            None
        }
    }

    /// Configure a pin; interrupts on it are disabled
    pub fn init_pin(&mut self, port: u8, pin: u8, config: &PinConfig) -> GpioStatus {
        if !config.is_valid() {
            return GpioStatus::BadParam;
        }
        let Some(state) = self.port_mut(port, pin) else {
            return GpioStatus::BadParam;
        };
        let bit = pin_bit(pin);
        state.interrupt_mask &= !bit;
        state.interrupt_status &= !bit;
        state.pins[pin as usize] = PinState {
            config: Some(*config),
            output: config.initial_high,
            alt_function: config.alt_function,
            edge: ExtiEdge::Disabled,
            ..state.pins[pin as usize]
        };
        GpioStatus::Success
    }

    /// Return a whole port to its reset state
    pub fn deinit_port(&mut self, port: u8) -> GpioStatus {
        match self.ports.get_mut(port as usize) {
            Some(state) => {
                *state = PortState::RESET;
                GpioStatus::Success
            }
            None => GpioStatus::BadParam,
        }
    }

    pub fn set_alt_function(&mut self, port: u8, pin: u8, function: AltFunction) -> GpioStatus {
        match self.pin_mut(port, pin) {
            Some(state) => {
                state.alt_function = function;
                GpioStatus::Success
            }
            None => GpioStatus::BadParam,
        }
    }

    /// Pin level; `false` for pins that do not exist
    pub fn read(&self, port: u8, pin: u8) -> bool {
        self.pin(port, pin).is_some_and(PinState::level)
    }

    pub fn write(&mut self, port: u8, pin: u8, high: bool) -> GpioStatus {
        match self.pin_mut(port, pin) {
            Some(state) => {
                state.output = high;
                GpioStatus::Success
            }
            None => GpioStatus::BadParam,
        }
    }

    pub fn toggle(&mut self, port: u8, pin: u8) -> GpioStatus {
        match self.pin_mut(port, pin) {
            Some(state) => {
                state.output = !state.output;
                GpioStatus::Success
            }
            None => GpioStatus::BadParam,
        }
    }

    /// Enable a pin interrupt and install the port handler
    ///
    /// The port line takes the priority and handler of the latest
    /// registration.
    pub fn register_exti(&mut self, port: u8, pin: u8, config: &ExtiConfig) -> GpioStatus {
        if !config.is_valid() || config.edge == ExtiEdge::Disabled {
            return GpioStatus::BadParam;
        }
        let Some(state) = self.port_mut(port, pin) else {
            return GpioStatus::BadParam;
        };
        let bit = pin_bit(pin);
        state.pins[pin as usize].edge = config.edge;
        state.interrupt_status &= !bit;
        state.interrupt_mask |= bit;
        state.priority = config.priority;
        state.handler = Some(config.handler);
        GpioStatus::Success
    }

    /// Disable a pin interrupt; the port handler goes once no pin uses it
    pub fn disable_exti(&mut self, port: u8, pin: u8) -> GpioStatus {
        let Some(state) = self.port_mut(port, pin) else {
            return GpioStatus::BadParam;
        };
        let bit = pin_bit(pin);
        state.pins[pin as usize].edge = ExtiEdge::Disabled;
        state.interrupt_mask &= !bit;
        state.interrupt_status &= !bit;
        if state.interrupt_mask == 0 {
            state.handler = None;
        }
        GpioStatus::Success
    }

    /// Raise a pin interrupt from software; only allowed if it is enabled
    pub fn trigger_sw_exti(&mut self, port: u8, pin: u8) -> GpioStatus {
        let Some(state) = self.port_mut(port, pin) else {
            return GpioStatus::BadParam;
        };
        let bit = pin_bit(pin);
        if state.interrupt_mask & bit == 0 {
            return GpioStatus::BadParam;
        }
        state.interrupt_status |= bit;
        GpioStatus::Success
    }

    /// Pending flag of a pin; `false` for pins that do not exist
    pub fn exti_status(&self, port: u8, pin: u8) -> bool {
        Self::validate(port, pin) && self.ports[port as usize].pending() & pin_bit(pin) != 0
    }

    /// Pending flag without range checks; out-of-range numbers wrap
    pub fn exti_status_unchecked(&self, port: u8, pin: u8) -> bool {
        let (port, pin) = Self::wrap(port, pin);
        self.ports[port].pending() & pin_bit(pin) != 0
    }

    pub fn clear_exti_status(&mut self, port: u8, pin: u8) -> GpioStatus {
        match self.port_mut(port, pin) {
            Some(state) => {
                state.interrupt_status &= !pin_bit(pin);
                GpioStatus::Success
            }
            None => GpioStatus::BadParam,
        }
    }

    /// Clear a pending flag without range checks; out-of-range numbers wrap
    pub fn clear_exti_status_unchecked(&mut self, port: u8, pin: u8) {
        let (port, pin) = Self::wrap(port, pin);
        self.ports[port].interrupt_status &= !pin_bit(pin);
    }

    fn wrap(port: u8, pin: u8) -> (usize, u8) {
        (port as usize % PORT_COUNT, pin % PINS_PER_PORT as u8)
    }

    /// Drive a pin's input from outside, latching an interrupt on a
    /// matching edge
    pub fn drive_input(&mut self, port: u8, pin: u8, high: bool) -> GpioStatus {
        let Some(state) = self.port_mut(port, pin) else {
            return GpioStatus::BadParam;
        };
        let bit = pin_bit(pin);
        let pin_state = &mut state.pins[pin as usize];
        let was_high = pin_state.input;
        pin_state.input = high;
        if state.interrupt_mask & bit != 0 && pin_state.edge.fires(was_high, high) {
            state.interrupt_status |= bit;
        }
        GpioStatus::Success
    }

    /// Handlers of ports with enabled pending interrupts, most urgent first
    ///
    /// Ports of equal priority are ordered by port number.
    pub fn pending_handlers(&self) -> heapless::Vec<(u8, IsrHandler), PORT_COUNT> {
        let mut pending: heapless::Vec<(u8, u8, IsrHandler), PORT_COUNT> = self
            .ports
            .iter()
            .enumerate()
            .filter(|(_, p)| p.pending() != 0)
            .filter_map(|(i, p)| p.handler.map(|h| (p.priority, i as u8, h)))
            .collect();
        pending.sort_unstable_by_key(|&(priority, port, _)| (priority, port));
        pending
            .into_iter()
            .map(|(_, port, handler)| (port, handler))
            .collect()
    }
}

impl Default for PortBank {
    fn default() -> Self {
        Self::new()
    }
}
