//! Okto Hardware Abstraction Layer
//!
//! This crate defines the register-level traits and value types that
//! chip-specific backends (okto-avr, a simulator, etc.) implement. The
//! engines in `okto-core` are written against these traits only, so the
//! same logic runs on real silicon and on simulated registers in host
//! tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application firmware                   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  okto-core (engines, callback registry) │
//! └─────────────────────────────────────────┘
//!                     │
//! ┌─────────────────────────────────────────┐
//! │  okto-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   okto-avr    │       │  simulated    │
//! │  (MMIO regs)  │       │  registers    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PortMap`], [`gpio::PortRegisters`] - port register lookup and
//!   access
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - single-pin digital I/O
//! - [`exint::ExtIntRegisters`] - external-interrupt control registers

#![no_std]
#![deny(unsafe_code)]

pub mod exint;
pub mod gpio;

// Re-export key items at crate root for convenience
pub use exint::{Callback, EventType, ExtIntRegisters};
pub use gpio::{InputPin, IoPin, Level, OutputPin, PinMode, Port, PortMap, PortRegisters, PullUp};
