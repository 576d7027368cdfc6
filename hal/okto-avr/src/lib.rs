//! Memory-mapped ATmega backing for the okto HAL
//!
//! Implements the `okto-hal` register seams over the special-function
//! register addresses of the chip selected by cargo feature, and provides
//! the external-interrupt vector handlers plus the global interrupt master
//! switch.
//!
//! Everything except the vector handlers and the inline-asm interrupt
//! primitives compiles on any target, so the register maps are verified by
//! plain host tests.

#![no_std]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(not(any(feature = "atmega328p", feature = "atmega2560")))]
compile_error!(
    "This crate requires you to specify your target chip as a feature.

    Please select one of the following

    * atmega328p
    * atmega2560
    "
);

pub mod exint;
pub mod gpio;
pub mod interrupt;
mod regs;

pub use exint::{extint, EXT_INT_LINES};
pub use gpio::{gpio, Ports};
