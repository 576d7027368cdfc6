//! Global interrupt master switch and the critical-section provider.
//!
//! The master switch is the CPU's I flag in SREG: no interrupt vector
//! runs while it is clear, whatever the per-line mask registers say.
//! Host builds get inert stand-ins so engine code that sprinkles
//! `interrupt::disable()` around multi-byte shared data still compiles
//! and tests on the development machine.

/// Allow enabled interrupts to fire (`sei`).
#[cfg(target_arch = "avr")]
#[inline(always)]
pub fn enable() {
    // SAFETY: sei touches no memory; the implicit compiler barrier is
    // wanted so shared-data writes are not moved past the enable.
    unsafe {
        core::arch::asm!("sei", options(nostack));
    }
}

/// Block all interrupts (`cli`).
#[cfg(target_arch = "avr")]
#[inline(always)]
pub fn disable() {
    // SAFETY: as for `enable`.
    unsafe {
        core::arch::asm!("cli", options(nostack));
    }
}

/// Host stand-in; interrupts only exist on the real target.
#[cfg(not(target_arch = "avr"))]
pub fn enable() {}

/// Host stand-in; interrupts only exist on the real target.
#[cfg(not(target_arch = "avr"))]
pub fn disable() {}

// SREG save / cli / restore critical sections for the callback registry
// and any other crate in the program that needs them.
#[cfg(all(target_arch = "avr", feature = "critical-section-impl"))]
mod cs {
    use critical_section::RawRestoreState;

    struct SregCriticalSection;
    critical_section::set_impl!(SregCriticalSection);

    const SREG_I: u8 = 0x80;

    unsafe impl critical_section::Impl for SregCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            let sreg: u8;
            // 0x3F is SREG in I/O space.
            core::arch::asm!(
                "in {sreg}, 0x3F",
                "cli",
                sreg = out(reg) sreg,
                options(nostack),
            );
            sreg
        }

        unsafe fn release(sreg: RawRestoreState) {
            // Only re-enable if interrupts were enabled on entry; a
            // critical section inside a vector handler must stay closed.
            if sreg & SREG_I != 0 {
                core::arch::asm!("sei", options(nostack));
            }
        }
    }
}
