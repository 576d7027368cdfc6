//! External-interrupt configuration, line control and dispatch
//!
//! Three pieces cooperate here:
//!
//! - [`ExtInt`] programs the per-line event sensitivity and drives the
//!   mask and flag registers (enable, disable, clear-pending).
//! - [`CallbackRegistry`] is the fixed table mapping a line index to an
//!   optional callback, written by the application and read from
//!   interrupt context.
//! - Dispatch itself is one registry-slot lookup per firing; the chip
//!   crate's vector handlers each call [`CallbackRegistry::dispatch`] with
//!   their own fixed line index.
//!
//! # The pending-flag hazard
//!
//! An event on a disabled line still latches the hardware pending flag.
//! Enabling the line with that flag set dispatches immediately; call
//! [`ExtInt::clear_pending`] first when stale events must not be
//! delivered. [`ExtInt::setup`] performs the clear-before-enable sequence
//! as one call. Enabling deliberately does not clear on its own, so a
//! caller who wants the latched event delivered late can have it.

use core::cell::Cell;

use critical_section::Mutex;
use okto_hal::exint::{Callback, EventType, ExtIntRegisters};

/// Size of the callback table: no AVR has more external-interrupt lines.
pub const MAX_LINES: usize = 8;

/// Fixed table of per-line callbacks, read from interrupt context.
///
/// Const-constructible so it can live in a `static` for the whole program
/// (the table is never torn down). Slots are guarded by a critical
/// section; [`attach`](Self::attach) and [`detach`](Self::detach) should
/// nevertheless only run while the corresponding line is disabled, so a
/// firing never observes a half-reconfigured line.
pub struct CallbackRegistry {
    slots: [Mutex<Cell<Option<Callback>>>; MAX_LINES],
}

impl CallbackRegistry {
    pub const fn new() -> CallbackRegistry {
        const EMPTY: Mutex<Cell<Option<Callback>>> = Mutex::new(Cell::new(None));
        CallbackRegistry {
            slots: [EMPTY; MAX_LINES],
        }
    }

    /// Store `callback` in the slot for `line`. No-op above the table
    /// size; the chip's line count is enforced by [`ExtInt::attach`].
    pub fn attach(&self, line: u8, callback: Callback) {
        self.set(line, Some(callback));
    }

    /// Clear the slot for `line`. The line itself keeps firing; dispatch
    /// just finds nothing to call.
    pub fn detach(&self, line: u8) {
        self.set(line, None);
    }

    /// Whether a callback is currently attached to `line`.
    pub fn is_attached(&self, line: u8) -> bool {
        match self.slots.get(line as usize) {
            Some(slot) => critical_section::with(|cs| slot.borrow(cs).get()).is_some(),
            None => false,
        }
    }

    /// Invoke the callback attached to `line`, if any.
    ///
    /// Reads the slot exactly once per firing. Runs in whatever interrupt
    /// state the caller provides; vector handlers call this with further
    /// interrupts of the same class blocked by the CPU.
    pub fn dispatch(&self, line: u8) {
        let Some(slot) = self.slots.get(line as usize) else {
            return;
        };
        let callback = critical_section::with(|cs| slot.borrow(cs).get());
        if let Some(callback) = callback {
            callback();
        }
    }

    fn set(&self, line: u8, callback: Option<Callback>) {
        if let Some(slot) = self.slots.get(line as usize) {
            critical_section::with(|cs| slot.borrow(cs).set(callback));
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        CallbackRegistry::new()
    }
}

/// Configurator and line control over a chip's external-interrupt
/// registers, bound to the registry its vectors dispatch from.
///
/// Every operation with a line index at or above the chip's line count is
/// a silent no-op.
pub struct ExtInt<'a, R> {
    regs: R,
    registry: &'a CallbackRegistry,
}

impl<'a, R: ExtIntRegisters> ExtInt<'a, R> {
    pub const fn new(regs: R, registry: &'a CallbackRegistry) -> ExtInt<'a, R> {
        ExtInt { regs, registry }
    }

    /// The registry this unit dispatches from.
    pub fn registry(&self) -> &'a CallbackRegistry {
        self.registry
    }

    /// Select which pin event triggers `line`.
    ///
    /// Each line owns a 2-bit field at offset `(line % 4) * 2` of its
    /// sensitivity register; lines 0-3 live in the low register, lines
    /// 4-7 in the high one. The field is cleared before the new code is
    /// OR-ed in, so reconfiguration never accumulates stale bits.
    pub fn set_event_type(&self, line: u8, event: EventType) {
        if line >= R::LINES {
            return;
        }
        let shift = (line % 4) * 2;
        let field = 0b11 << shift;
        if line < 4 {
            let bits = (self.regs.sense_low() & !field) | (event.code() << shift);
            self.regs.set_sense_low(bits);
        } else {
            let bits = (self.regs.sense_high() & !field) | (event.code() << shift);
            self.regs.set_sense_high(bits);
        }
    }

    /// Unmask `line`.
    ///
    /// If an event was latched while the line was disabled, the interrupt
    /// fires immediately; see the module docs for the hazard and
    /// [`clear_pending`](Self::clear_pending) to suppress it.
    pub fn enable(&self, line: u8) {
        if line >= R::LINES {
            return;
        }
        self.regs.set_mask(self.regs.mask() | (1 << line));
    }

    /// Mask `line`. Does not abort a handler that is already running, and
    /// events keep latching the pending flag while masked.
    pub fn disable(&self, line: u8) {
        if line >= R::LINES {
            return;
        }
        self.regs.set_mask(self.regs.mask() & !(1 << line));
    }

    /// Whether `line` is currently unmasked.
    pub fn is_enabled(&self, line: u8) -> bool {
        line < R::LINES && self.regs.mask() & (1 << line) != 0
    }

    /// Discard a latched pending event on `line`.
    ///
    /// The flag register is write-1-to-clear: exactly the line's own bit
    /// is stored, never a value computed from a prior read, so pending
    /// flags of other lines survive.
    pub fn clear_pending(&self, line: u8) {
        if line >= R::LINES {
            return;
        }
        self.regs.clear_flags(1 << line);
    }

    /// Attach `callback` to `line`. Do this while the line is disabled.
    pub fn attach(&self, line: u8, callback: Callback) {
        if line >= R::LINES {
            return;
        }
        self.registry.attach(line, callback);
    }

    /// Detach the callback of `line`.
    pub fn detach(&self, line: u8) {
        if line >= R::LINES {
            return;
        }
        self.registry.detach(line);
    }

    /// Configure a line in one step: event type, callback slot, pending
    /// flag cleared, then enabled or disabled as requested. The clear
    /// means events from before this call are never delivered.
    pub fn setup(&self, line: u8, event: EventType, callback: Option<Callback>, enabled: bool) {
        if line >= R::LINES {
            return;
        }
        self.set_event_type(line, event);
        match callback {
            Some(callback) => self.attach(line, callback),
            None => self.detach(line),
        }
        self.clear_pending(line);
        if enabled {
            self.enable(line);
        } else {
            self.disable(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimExtInt;
    use portable_atomic::{AtomicUsize, Ordering};

    #[test]
    fn event_type_writes_exactly_one_field() {
        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        regs.sense_low.set(0b1111_1111);
        exint.set_event_type(1, EventType::FallingEdge);
        // Field 1 (bits 3:2) becomes 0b10, every other field survives.
        assert_eq!(regs.sense_low.get(), 0b1111_1011);

        exint.set_event_type(0, EventType::LowLevel);
        assert_eq!(regs.sense_low.get(), 0b1111_1000);
    }

    #[test]
    fn event_type_codes_match_the_hardware_encoding() {
        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        for (event, code) in [
            (EventType::LowLevel, 0b00),
            (EventType::AnyEdge, 0b01),
            (EventType::FallingEdge, 0b10),
            (EventType::RisingEdge, 0b11),
        ] {
            exint.set_event_type(2, event);
            assert_eq!((regs.sense_low.get() >> 4) & 0b11, code);
        }
    }

    #[test]
    fn lines_four_and_up_use_the_high_register() {
        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        exint.set_event_type(4, EventType::RisingEdge);
        exint.set_event_type(7, EventType::FallingEdge);
        assert_eq!(regs.sense_low.get(), 0);
        assert_eq!(regs.sense_high.get(), 0b1000_0011);
    }

    #[test]
    fn line_index_at_or_above_the_chip_count_is_a_noop() {
        let regs = SimExtInt::<2>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        fn never() {
            panic!("callback attached past the line count");
        }

        exint.set_event_type(2, EventType::RisingEdge);
        exint.enable(2);
        exint.clear_pending(2);
        exint.attach(2, never);
        assert_eq!(regs.sense_low.get(), 0);
        assert_eq!(regs.mask.get(), 0);
        assert!(!registry.is_attached(2));
        assert!(!exint.is_enabled(2));
    }

    #[test]
    fn enable_and_disable_drive_single_mask_bits() {
        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        exint.enable(0);
        exint.enable(5);
        assert_eq!(regs.mask.get(), 0b0010_0001);
        assert!(exint.is_enabled(5));

        exint.disable(0);
        assert_eq!(regs.mask.get(), 0b0010_0000);
        assert!(!exint.is_enabled(0));
    }

    #[test]
    fn clear_pending_spares_other_latched_flags() {
        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        regs.raise(1);
        regs.raise(3);
        exint.clear_pending(1);
        assert!(!regs.pending(1));
        assert!(regs.pending(3));
    }

    #[test]
    fn dispatch_without_a_callback_does_nothing() {
        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();

        regs.mask.set(0xFF);
        regs.raise(6);
        regs.poll(&registry);
        assert!(!regs.pending(6));
    }

    #[test]
    fn attach_and_detach_mutate_only_their_slot() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn on_event() {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let registry = CallbackRegistry::new();
        registry.attach(3, on_event);
        assert!(registry.is_attached(3));
        assert!(!registry.is_attached(2));

        registry.dispatch(3);
        registry.dispatch(2);
        assert_eq!(CALLS.load(Ordering::Relaxed), 1);

        registry.detach(3);
        registry.dispatch(3);
        assert_eq!(CALLS.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn pending_event_fires_immediately_on_enable() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn on_event() {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        exint.set_event_type(2, EventType::FallingEdge);
        exint.attach(2, on_event);

        // Event arrives while the line is disabled: latched, not delivered.
        regs.raise(2);
        regs.poll(&registry);
        assert_eq!(CALLS.load(Ordering::Relaxed), 0);
        assert!(regs.pending(2));

        // Enabling with the flag still set delivers the stale event.
        exint.enable(2);
        regs.poll(&registry);
        assert_eq!(CALLS.load(Ordering::Relaxed), 1);
        assert!(!regs.pending(2));
    }

    #[test]
    fn clear_pending_before_enable_suppresses_the_stale_event() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn on_event() {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        exint.attach(4, on_event);
        regs.raise(4);

        exint.clear_pending(4);
        exint.enable(4);
        regs.poll(&registry);
        assert_eq!(CALLS.load(Ordering::Relaxed), 0);

        // A fresh event on the now-enabled line is delivered normally.
        regs.raise(4);
        regs.poll(&registry);
        assert_eq!(CALLS.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn setup_runs_the_clear_before_enable_sequence() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn on_event() {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let regs = SimExtInt::<8>::new();
        let registry = CallbackRegistry::new();
        let exint = ExtInt::new(&regs, &registry);

        // A stale event from before configuration is discarded by setup.
        regs.raise(0);
        exint.setup(0, EventType::RisingEdge, Some(on_event), true);
        assert_eq!(regs.sense_low.get() & 0b11, 0b11);
        assert!(exint.is_enabled(0));
        regs.poll(&registry);
        assert_eq!(CALLS.load(Ordering::Relaxed), 0);

        // Passing no callback clears the slot again.
        exint.setup(0, EventType::RisingEdge, None, false);
        assert!(!registry.is_attached(0));
        assert!(!exint.is_enabled(0));
    }
}
