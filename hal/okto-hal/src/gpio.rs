//! GPIO register seam and pin abstractions
//!
//! An AVR I/O port is a group of up to eight pins governed by three
//! special-function registers: the direction register (DDRx), the combined
//! output-level/pull-up register (PORTx) and the input-level register
//! (PINx). [`PortRegisters`] models one such triple; [`PortMap`] resolves a
//! logical [`Port`] to its triple, or to `None` on chips that do not
//! implement that port.

/// Identifies one 8-bit I/O port.
///
/// The index values (0..=11) match the port numbering of AVR datasheets:
/// port A is 0, port L is 11. Port `I` is a reserved slot that no AVR
/// implements; every chip map resolves it to "unsupported".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    /// Reserved on every AVR; exists only to keep datasheet numbering.
    I,
    J,
    K,
    L,
}

impl Port {
    /// Number of port identifiers, including the reserved slot.
    pub const COUNT: usize = 12;

    /// All port identifiers in index order.
    pub const ALL: [Port; Port::COUNT] = [
        Port::A,
        Port::B,
        Port::C,
        Port::D,
        Port::E,
        Port::F,
        Port::G,
        Port::H,
        Port::I,
        Port::J,
        Port::K,
        Port::L,
    ];

    /// The small-integer index of this port (A = 0 .. L = 11).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Look a port up by its index; `None` above 11.
    pub fn from_index(index: u8) -> Option<Port> {
        Port::ALL.get(index as usize).copied()
    }
}

/// Direction of a single pin.
///
/// The discriminants equal the direction-register bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input = 0,
    Output = 1,
}

/// Internal pull-up resistor state of an input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PullUp {
    Off = 0,
    On = 1,
}

/// Voltage level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low = 0,
    High = 1,
}

impl Level {
    /// `High` for `true`, `Low` for `false`.
    pub fn of(high: bool) -> Level {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }

    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

/// Register triple of one I/O port.
///
/// Methods take `&self`: the registers themselves are the mutable state and
/// several descriptors may refer to the same physical port at once.
///
/// The PORTx bit written by [`set_out`](PortRegisters::set_out) has a dual
/// meaning fixed by the hardware: output level while the pin's direction
/// bit is set, pull-up enable while it is cleared. The seam does not track
/// direction; callers own that contract.
pub trait PortRegisters {
    /// Read the direction register (DDRx).
    fn dir(&self) -> u8;

    /// Write the direction register.
    fn set_dir(&self, bits: u8);

    /// Read the output-level/pull-up register (PORTx).
    fn out(&self) -> u8;

    /// Write the output-level/pull-up register.
    fn set_out(&self, bits: u8);

    /// Read the input-level register (PINx). Reflects the sensed level of
    /// every pin regardless of direction.
    fn input(&self) -> u8;

    /// Flip the masked bits of the output register.
    ///
    /// The default body is a read-modify-write XOR. Hardware with a
    /// toggle-on-write input register (writing 1s to PINx flips PORTx)
    /// should override this with the single-store form.
    fn toggle(&self, mask: u8) {
        self.set_out(self.out() ^ mask);
    }
}

/// Resolves a logical port to its register triple.
///
/// This is a pure lookup with no side effects. `None` means the compiled
/// target has no such port; engine operations turn that into a silent
/// no-op.
pub trait PortMap {
    /// Register handle type. Cheap to construct; borrows the map at most
    /// for its own lifetime.
    type Regs<'a>: PortRegisters
    where
        Self: 'a;

    /// The register triple of `port`, or `None` if the chip lacks it.
    fn port(&self, port: Port) -> Option<Self::Regs<'_>>;

    /// Whether the compiled target implements `port`.
    fn supports(&self, port: Port) -> bool {
        self.port(port).is_some()
    }
}

/// Digital output pin
///
/// Implemented by direction-typed pin descriptors; the descriptor's
/// construction performs the direction-register write, so `set_level` on
/// an implementor always has output semantics.
pub trait OutputPin {
    /// Drive the pin to `level`.
    fn set_level(&mut self, level: Level);

    /// Drive the pin high.
    fn set_high(&mut self) {
        self.set_level(Level::High);
    }

    /// Drive the pin low.
    fn set_low(&mut self) {
        self.set_level(Level::Low);
    }

    /// Flip the driven level without reading it first.
    fn toggle(&mut self);
}

/// Digital input pin
pub trait InputPin {
    /// The sensed voltage level of the pin.
    fn level(&self) -> Level;

    fn is_high(&self) -> bool {
        self.level().is_high()
    }

    fn is_low(&self) -> bool {
        self.level().is_low()
    }
}

/// Pin usable for both directions at once.
///
/// On AVR the input register reflects the sensed level of output pins too,
/// so output descriptors can read themselves back.
pub trait IoPin: OutputPin + InputPin {}

// Blanket implementation for types that implement both traits
impl<T: OutputPin + InputPin> IoPin for T {}
