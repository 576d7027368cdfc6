//! External-interrupt register seam
//!
//! AVR external interrupts (INT0..INT7) are controlled by up to four
//! registers: two sensitivity-control registers holding one 2-bit event
//! field per line (EICRA for lines 0-3, EICRB for lines 4-7 where they
//! exist), a mask register (EIMSK) and a write-1-to-clear flag register
//! (EIFR).

/// Callback invoked from interrupt context. No arguments, no return value.
pub type Callback = fn();

/// Which pin event triggers an interrupt line.
///
/// The discriminants equal the hardware sensitivity encoding and must not
/// be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventType {
    /// Interrupt continuously while the pin is low.
    LowLevel = 0,
    /// Interrupt on both rising and falling edges.
    AnyEdge = 1,
    /// Interrupt on high-to-low transitions only.
    FallingEdge = 2,
    /// Interrupt on low-to-high transitions only.
    RisingEdge = 3,
}

impl EventType {
    /// The 2-bit sensitivity-register code of this event type.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Control registers of the external-interrupt unit.
///
/// Methods take `&self` for the same reason as the GPIO seam: hardware
/// registers are the shared mutable state.
pub trait ExtIntRegisters {
    /// Number of interrupt lines the chip provides (1..=8).
    const LINES: u8;

    /// Read the sensitivity register holding lines 0-3.
    fn sense_low(&self) -> u8;

    /// Write the sensitivity register holding lines 0-3.
    fn set_sense_low(&self, bits: u8);

    /// Read the sensitivity register holding lines 4-7. Chips with four or
    /// fewer lines keep the default, which is never reached because the
    /// line index is bounds-checked against [`LINES`](Self::LINES) first.
    fn sense_high(&self) -> u8 {
        0
    }

    /// Write the sensitivity register holding lines 4-7.
    fn set_sense_high(&self, _bits: u8) {}

    /// Read the interrupt mask register.
    fn mask(&self) -> u8;

    /// Write the interrupt mask register.
    fn set_mask(&self, bits: u8);

    /// Store `bits` to the write-1-to-clear flag register.
    ///
    /// This is deliberately write-only: a set bit clears that line's
    /// latched pending flag, a clear bit has no effect. There is no read
    /// accessor, so a stale read-modify-write that would wipe other lines'
    /// pending flags cannot be expressed against this seam.
    fn clear_flags(&self, bits: u8);
}
