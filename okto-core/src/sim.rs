//! Simulated register blocks for host tests.

use core::cell::Cell;

use okto_hal::exint::ExtIntRegisters;
use okto_hal::gpio::{Port, PortMap, PortRegisters};

use crate::exint::CallbackRegistry;

/// One simulated I/O port.
///
/// The input register resolves like the silicon does: output pins read
/// back their driven level, input pins read whatever the outside world
/// drives onto them.
pub(crate) struct SimPort {
    pub dir: Cell<u8>,
    pub out: Cell<u8>,
    /// Levels driven onto the pins from outside the chip.
    pub pins: Cell<u8>,
}

impl SimPort {
    pub fn new() -> SimPort {
        SimPort {
            dir: Cell::new(0),
            out: Cell::new(0),
            pins: Cell::new(0),
        }
    }

    /// Drive external levels onto the port's pins.
    pub fn drive(&self, bits: u8) {
        self.pins.set(bits);
    }
}

impl PortRegisters for &SimPort {
    fn dir(&self) -> u8 {
        self.dir.get()
    }

    fn set_dir(&self, bits: u8) {
        self.dir.set(bits);
    }

    fn out(&self) -> u8 {
        self.out.get()
    }

    fn set_out(&self, bits: u8) {
        self.out.set(bits);
    }

    fn input(&self) -> u8 {
        let dir = self.dir.get();
        (self.out.get() & dir) | (self.pins.get() & !dir)
    }
}

/// A chip with a configurable subset of the twelve ports.
pub(crate) struct SimChip {
    ports: [SimPort; Port::COUNT],
    supported: u16,
}

impl SimChip {
    /// A chip implementing exactly `ports`.
    pub fn with_ports(ports: &[Port]) -> SimChip {
        let mut supported = 0u16;
        for port in ports {
            supported |= 1 << port.index();
        }
        SimChip {
            ports: [(); Port::COUNT].map(|()| SimPort::new()),
            supported,
        }
    }

    /// Direct register access for assertions, bypassing the locator.
    pub fn raw(&self, port: Port) -> &SimPort {
        &self.ports[port.index() as usize]
    }
}

impl PortMap for SimChip {
    type Regs<'a>
        = &'a SimPort
    where
        Self: 'a;

    fn port(&self, port: Port) -> Option<&SimPort> {
        if self.supported & (1 << port.index()) != 0 {
            Some(&self.ports[port.index() as usize])
        } else {
            None
        }
    }
}

/// Simulated external-interrupt unit with `LINES` lines.
pub(crate) struct SimExtInt<const LINES: u8> {
    pub sense_low: Cell<u8>,
    pub sense_high: Cell<u8>,
    pub mask: Cell<u8>,
    pub flags: Cell<u8>,
}

impl<const LINES: u8> SimExtInt<LINES> {
    pub fn new() -> SimExtInt<LINES> {
        SimExtInt {
            sense_low: Cell::new(0),
            sense_high: Cell::new(0),
            mask: Cell::new(0),
            flags: Cell::new(0),
        }
    }

    /// Latch an interrupt event on `line`, as the hardware does whether or
    /// not the line is enabled.
    pub fn raise(&self, line: u8) {
        self.flags.set(self.flags.get() | (1 << line));
    }

    pub fn pending(&self, line: u8) -> bool {
        self.flags.get() & (1 << line) != 0
    }

    /// Deliver every enabled pending line, clearing its flag on vector
    /// entry like the CPU does, then invoking the registered callback.
    pub fn poll(&self, registry: &CallbackRegistry) {
        for line in 0..LINES {
            let bit = 1 << line;
            if self.mask.get() & self.flags.get() & bit != 0 {
                self.flags.set(self.flags.get() & !bit);
                registry.dispatch(line);
            }
        }
    }
}

impl<const N: u8> ExtIntRegisters for &SimExtInt<N> {
    const LINES: u8 = N;

    fn sense_low(&self) -> u8 {
        self.sense_low.get()
    }

    fn set_sense_low(&self, bits: u8) {
        self.sense_low.set(bits);
    }

    fn sense_high(&self) -> u8 {
        self.sense_high.get()
    }

    fn set_sense_high(&self, bits: u8) {
        self.sense_high.set(bits);
    }

    fn mask(&self) -> u8 {
        self.mask.get()
    }

    fn set_mask(&self, bits: u8) {
        self.mask.set(bits);
    }

    fn clear_flags(&self, bits: u8) {
        // Write-1-to-clear: set bits clear the flag, clear bits do nothing.
        self.flags.set(self.flags.get() & !bits);
    }
}
