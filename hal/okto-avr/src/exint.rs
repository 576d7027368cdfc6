//! External-interrupt registers, vector handlers and the program-lifetime
//! callback registry.
//!
//! EIFR, EIMSK and EICRA share their addresses across the supported
//! chips; EICRB and interrupt lines 2-7 exist on the ATmega2560 only.

use okto_core::{CallbackRegistry, ExtInt};
use okto_hal::exint::ExtIntRegisters;

use crate::regs::Reg;

const EIFR: Reg = Reg::at(0x3C);
const EIMSK: Reg = Reg::at(0x3D);
const EICRA: Reg = Reg::at(0x69);
#[cfg(feature = "atmega2560")]
const EICRB: Reg = Reg::at(0x6A);

#[cfg(feature = "atmega2560")]
const LINES: u8 = 8;
#[cfg(all(feature = "atmega328p", not(feature = "atmega2560")))]
const LINES: u8 = 2;

/// Number of external-interrupt lines on the selected chip.
pub const EXT_INT_LINES: u8 = LINES;

/// The selected chip's external-interrupt control registers.
pub struct ExtIntRegs;

impl ExtIntRegisters for ExtIntRegs {
    const LINES: u8 = LINES;

    fn sense_low(&self) -> u8 {
        EICRA.read()
    }

    fn set_sense_low(&self, bits: u8) {
        EICRA.write(bits);
    }

    #[cfg(feature = "atmega2560")]
    fn sense_high(&self) -> u8 {
        EICRB.read()
    }

    #[cfg(feature = "atmega2560")]
    fn set_sense_high(&self, bits: u8) {
        EICRB.write(bits);
    }

    fn mask(&self) -> u8 {
        EIMSK.read()
    }

    fn set_mask(&self, bits: u8) {
        EIMSK.write(bits);
    }

    fn clear_flags(&self, bits: u8) {
        // Plain store: EIFR is write-1-to-clear, so this clears exactly
        // the set bits and leaves other pending flags latched.
        EIFR.write(bits);
    }
}

// Owned by the dispatch layer for the whole program; the vector handlers
// below read it, applications write it through `extint()`.
static CALLBACKS: CallbackRegistry = CallbackRegistry::new();

/// The external-interrupt unit over this chip's registers, bound to the
/// registry the vector handlers dispatch from.
pub fn extint() -> ExtInt<'static, ExtIntRegs> {
    ExtInt::new(ExtIntRegs, &CALLBACKS)
}

// One handler per vector the chip provides, each dispatching its own
// fixed line. INTn lives at __vector_{n+1} on both supported chips.
#[cfg(target_arch = "avr")]
mod vectors {
    use super::CALLBACKS;

    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_1() {
        CALLBACKS.dispatch(0);
    }

    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_2() {
        CALLBACKS.dispatch(1);
    }

    #[cfg(feature = "atmega2560")]
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_3() {
        CALLBACKS.dispatch(2);
    }

    #[cfg(feature = "atmega2560")]
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_4() {
        CALLBACKS.dispatch(3);
    }

    #[cfg(feature = "atmega2560")]
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_5() {
        CALLBACKS.dispatch(4);
    }

    #[cfg(feature = "atmega2560")]
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_6() {
        CALLBACKS.dispatch(5);
    }

    #[cfg(feature = "atmega2560")]
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_7() {
        CALLBACKS.dispatch(6);
    }

    #[cfg(feature = "atmega2560")]
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_8() {
        CALLBACKS.dispatch(7);
    }
}
