//! Direction-typed pin descriptors
//!
//! The untyped [`Pin`](crate::Pin) reproduces the hardware contract as-is:
//! the PORTx bit means "level" or "pull-up" depending on a direction the
//! engine does not track. [`Output`] and [`Input`] encode the direction in
//! the type instead. Conversion performs the direction-register write, so
//! a level write on something the type system knows is an input cannot be
//! expressed. The untyped layer stays available for code that switches
//! direction at runtime.

use okto_hal::gpio::{InputPin, Level, OutputPin, PinMode, PortMap, PullUp};

use crate::gpio::Pin;

impl<'a, M: PortMap> Pin<'a, M> {
    /// Program the pin as an output and fix that in the type.
    pub fn into_output(self) -> Output<'a, M> {
        self.set_mode(PinMode::Output);
        Output { pin: self }
    }

    /// Program the pin as an output already driven to `level`, avoiding a
    /// glitch between the mode and level writes (level first: the PORTx
    /// write only arms the pull-up while the pin is still an input).
    pub fn into_output_at(self, level: Level) -> Output<'a, M> {
        self.write(level);
        self.into_output()
    }

    /// Program the pin as an input with the given pull-up state and fix
    /// that in the type.
    pub fn into_input(self, pullup: PullUp) -> Input<'a, M> {
        self.set_mode(PinMode::Input);
        self.set_pullup(pullup);
        Input { pin: self }
    }
}

/// A pin whose output direction is part of its type.
pub struct Output<'a, M> {
    pin: Pin<'a, M>,
}

impl<'a, M: PortMap> Output<'a, M> {
    /// Reprogram the pin as an input.
    pub fn into_input(self, pullup: PullUp) -> Input<'a, M> {
        self.pin.into_input(pullup)
    }

    /// The untyped descriptor for this pin.
    pub fn degrade(self) -> Pin<'a, M> {
        self.pin
    }
}

impl<M: PortMap> OutputPin for Output<'_, M> {
    fn set_level(&mut self, level: Level) {
        self.pin.write(level);
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }
}

// Output pins read back their driven level through the input register.
impl<M: PortMap> InputPin for Output<'_, M> {
    fn level(&self) -> Level {
        self.pin.read()
    }
}

/// A pin whose input direction is part of its type.
pub struct Input<'a, M> {
    pin: Pin<'a, M>,
}

impl<'a, M: PortMap> Input<'a, M> {
    /// Switch the internal pull-up. Unlike the untyped descriptor this is
    /// guaranteed to mean "pull-up": the type fixes the direction.
    pub fn set_pullup(&self, pullup: PullUp) {
        self.pin.set_pullup(pullup);
    }

    /// Reprogram the pin as an output.
    pub fn into_output(self) -> Output<'a, M> {
        self.pin.into_output()
    }

    /// The untyped descriptor for this pin.
    pub fn degrade(self) -> Pin<'a, M> {
        self.pin
    }
}

impl<M: PortMap> InputPin for Input<'_, M> {
    fn level(&self) -> Level {
        self.pin.read()
    }
}
