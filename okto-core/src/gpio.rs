//! Port and pin operations
//!
//! [`Gpio`] is a stateless engine over a chip's [`PortMap`]. Single-pin
//! operations address one bit of a port's register triple; the masked
//! whole-port operations update up to eight bits in one register store.
//!
//! The PORTx register bit written by the pull-up and level operations has
//! one physical location and two meanings: output level while the pin is
//! an output, pull-up enable while it is an input. The engine reproduces
//! the hardware faithfully and does not track direction; callers that want
//! the misuse ruled out statically use the typed descriptors in
//! [`crate::pin`].

use okto_hal::gpio::{Level, PinMode, Port, PortMap, PortRegisters, PullUp};

/// Update `current` so masked-in bits take their value from `value` and
/// masked-out bits stay untouched.
fn masked(current: u8, value: u8, mask: u8) -> u8 {
    (current | (mask & value)) & !(mask & !value)
}

/// Bounds-checked digital I/O over a chip's port map.
///
/// Operations on ports the chip does not implement, or with a pin index
/// above 7, return without effect; reads then yield zero. The engine holds
/// no state of its own, so one instance serves the whole program and any
/// number of descriptors may alias the same physical pin.
pub struct Gpio<M> {
    map: M,
}

impl<M: PortMap> Gpio<M> {
    pub const fn new(map: M) -> Gpio<M> {
        Gpio { map }
    }

    /// The underlying port map.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Whether the compiled target implements `port`.
    pub fn supports(&self, port: Port) -> bool {
        self.map.supports(port)
    }

    /// Program a single pin as input or output.
    pub fn set_pin_mode(&self, port: Port, pin: u8, mode: PinMode) {
        let Some(regs) = self.resolve(port, pin) else {
            return;
        };
        let bit = 1 << pin;
        match mode {
            PinMode::Output => regs.set_dir(regs.dir() | bit),
            PinMode::Input => regs.set_dir(regs.dir() & !bit),
        }
    }

    /// Switch the internal pull-up of an input pin on or off.
    ///
    /// The pin must currently be an input for this to have pull-up
    /// semantics; on an output pin the same register bit sets the driven
    /// level instead.
    pub fn set_pin_pullup(&self, port: Port, pin: u8, pullup: PullUp) {
        let high = match pullup {
            PullUp::On => Level::High,
            PullUp::Off => Level::Low,
        };
        self.write_pin(port, pin, high);
    }

    /// Drive an output pin to `level`.
    ///
    /// The pin must currently be an output; on an input pin the same
    /// register bit controls the pull-up instead.
    pub fn write_pin(&self, port: Port, pin: u8, level: Level) {
        let Some(regs) = self.resolve(port, pin) else {
            return;
        };
        let bit = 1 << pin;
        match level {
            Level::High => regs.set_out(regs.out() | bit),
            Level::Low => regs.set_out(regs.out() & !bit),
        }
    }

    /// The sensed level of a pin, valid for inputs and outputs alike
    /// (an output pin reads back its driven level). `Low` for unsupported
    /// ports or out-of-range pin indices.
    pub fn read_pin(&self, port: Port, pin: u8) -> Level {
        let Some(regs) = self.resolve(port, pin) else {
            return Level::Low;
        };
        Level::of(regs.input() & (1 << pin) != 0)
    }

    /// Flip the level of an output pin without reading its state first.
    pub fn toggle_pin(&self, port: Port, pin: u8) {
        let Some(regs) = self.resolve(port, pin) else {
            return;
        };
        regs.toggle(1 << pin);
    }

    /// Program the masked-in pins of a port: a 1-bit in `modes` makes the
    /// pin an output, a 0-bit an input. Pins with a 0 mask bit keep their
    /// direction.
    pub fn set_port_mode(&self, port: Port, modes: u8, mask: u8) {
        let Some(regs) = self.map.port(port) else {
            return;
        };
        regs.set_dir(masked(regs.dir(), modes, mask));
    }

    /// Switch the pull-ups of the masked-in pins of a port. The pins
    /// should already be inputs; see [`set_pin_pullup`](Self::set_pin_pullup).
    pub fn set_port_pullup(&self, port: Port, pullups: u8, mask: u8) {
        let Some(regs) = self.map.port(port) else {
            return;
        };
        regs.set_out(masked(regs.out(), pullups, mask));
    }

    /// Drive the masked-in output pins of a port to `levels`. Pins with a
    /// 0 mask bit keep their state.
    pub fn write_port(&self, port: Port, levels: u8, mask: u8) {
        let Some(regs) = self.map.port(port) else {
            return;
        };
        regs.set_out(masked(regs.out(), levels, mask));
    }

    /// The sensed levels of the masked-in pins. Masked-out bits read as 0,
    /// not their true hardware value; unsupported ports read as 0.
    pub fn read_port(&self, port: Port, mask: u8) -> u8 {
        match self.map.port(port) {
            Some(regs) => regs.input() & mask,
            None => 0,
        }
    }

    /// Flip the levels of the masked-in output pins.
    pub fn toggle_port(&self, port: Port, mask: u8) {
        if let Some(regs) = self.map.port(port) {
            regs.toggle(mask);
        }
    }

    /// A descriptor for one pin. Descriptors are stateless; constructing
    /// one never touches the hardware and any number may refer to the same
    /// physical pin.
    pub fn pin(&self, port: Port, pin: u8) -> Pin<'_, M> {
        Pin {
            gpio: self,
            port,
            pin,
        }
    }

    /// A descriptor for a whole port.
    pub fn port(&self, port: Port) -> PortHandle<'_, M> {
        PortHandle { gpio: self, port }
    }

    fn resolve(&self, port: Port, pin: u8) -> Option<M::Regs<'_>> {
        if pin > 7 {
            return None;
        }
        self.map.port(port)
    }
}

/// Descriptor for a single pin of a [`Gpio`] engine.
pub struct Pin<'a, M> {
    pub(crate) gpio: &'a Gpio<M>,
    pub(crate) port: Port,
    pub(crate) pin: u8,
}

// Derived impls would demand M: Copy; descriptors are copyable regardless.
impl<M> Clone for Pin<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Pin<'_, M> {}

impl<'a, M: PortMap> Pin<'a, M> {
    pub fn port(&self) -> Port {
        self.port
    }

    pub fn index(&self) -> u8 {
        self.pin
    }

    /// Program the pin as input or output.
    pub fn set_mode(&self, mode: PinMode) {
        self.gpio.set_pin_mode(self.port, self.pin, mode);
    }

    /// Switch the internal pull-up; the pin should be an input.
    pub fn set_pullup(&self, pullup: PullUp) {
        self.gpio.set_pin_pullup(self.port, self.pin, pullup);
    }

    /// Drive the pin; it should be an output.
    pub fn write(&self, level: Level) {
        self.gpio.write_pin(self.port, self.pin, level);
    }

    /// The sensed level of the pin.
    pub fn read(&self) -> Level {
        self.gpio.read_pin(self.port, self.pin)
    }

    /// Flip the driven level; the pin should be an output.
    pub fn toggle(&self) {
        self.gpio.toggle_pin(self.port, self.pin);
    }
}

/// Descriptor for all eight pins of one port.
pub struct PortHandle<'a, M> {
    gpio: &'a Gpio<M>,
    port: Port,
}

impl<M> Clone for PortHandle<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for PortHandle<'_, M> {}

impl<'a, M: PortMap> PortHandle<'a, M> {
    pub fn port(&self) -> Port {
        self.port
    }

    /// Program the masked-in pins as outputs (1) or inputs (0).
    pub fn set_mode(&self, modes: u8, mask: u8) {
        self.gpio.set_port_mode(self.port, modes, mask);
    }

    /// Switch the masked-in pins' pull-ups.
    pub fn set_pullup(&self, pullups: u8, mask: u8) {
        self.gpio.set_port_pullup(self.port, pullups, mask);
    }

    /// Drive the masked-in pins to `levels`.
    pub fn write(&self, levels: u8, mask: u8) {
        self.gpio.write_port(self.port, levels, mask);
    }

    /// The sensed levels of the masked-in pins; masked-out bits are 0.
    pub fn read(&self, mask: u8) -> u8 {
        self.gpio.read_port(self.port, mask)
    }

    /// Flip the masked-in pins.
    pub fn toggle(&self, mask: u8) {
        self.gpio.toggle_port(self.port, mask);
    }

    /// Drive all eight pins.
    pub fn write_all(&self, levels: u8) {
        self.write(levels, 0xFF);
    }

    /// The sensed levels of all eight pins.
    pub fn read_all(&self) -> u8 {
        self.read(0xFF)
    }

    /// Flip all eight pins.
    pub fn toggle_all(&self) {
        self.toggle(0xFF);
    }
}
