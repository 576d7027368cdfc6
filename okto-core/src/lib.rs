//! Chip-agnostic engines of the okto HAL
//!
//! This crate contains all logic that does not depend on a concrete
//! register map:
//!
//! - The [`Gpio`] engine: named, bounds-checked pin and masked whole-port
//!   operations over any [`okto_hal::PortMap`]
//! - Untyped [`Pin`]/[`PortHandle`] descriptors and direction-typed
//!   [`Input`]/[`Output`] descriptors
//! - The external-interrupt layer: sensitivity configuration, line
//!   enable/disable/clear-pending, and the interrupt-context
//!   [`CallbackRegistry`]
//!
//! Every operation taking a port, pin or line index is a silent no-op when
//! the index is out of range or the compiled target lacks the hardware;
//! reads then return zero. Firmware of this class must keep running, so
//! there are no error codes and no panics on invalid indices.

#![no_std]
#![deny(unsafe_code)]

pub mod exint;
pub mod gpio;
pub mod pin;

#[cfg(test)]
pub(crate) mod sim;

pub use exint::{CallbackRegistry, ExtInt, MAX_LINES};
pub use gpio::{Gpio, Pin, PortHandle};
pub use pin::{Input, Output};
