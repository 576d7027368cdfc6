//! Per-chip port register map
//!
//! One match arm per logical port, compiled in only for chips that have
//! the hardware; every other port resolves to `None` and the engines turn
//! that into a no-op. PINx, DDRx and PORTx sit at consecutive addresses on
//! every ATmega, so each arm records just the PINx base.

use okto_core::Gpio;
use okto_hal::gpio::{Port, PortMap, PortRegisters};

use crate::regs::Reg;

/// Register triple of one hardware port.
pub struct PortRegs {
    pin: Reg,
    dir: Reg,
    out: Reg,
}

impl PortRegs {
    /// `base` is the PINx address; DDRx and PORTx follow it.
    const fn at(base: usize) -> PortRegs {
        PortRegs {
            pin: Reg::at(base),
            dir: Reg::at(base + 1),
            out: Reg::at(base + 2),
        }
    }

    #[cfg(test)]
    fn addresses(&self) -> (usize, usize, usize) {
        (self.pin.addr(), self.dir.addr(), self.out.addr())
    }
}

impl PortRegisters for PortRegs {
    fn dir(&self) -> u8 {
        self.dir.read()
    }

    fn set_dir(&self, bits: u8) {
        self.dir.write(bits);
    }

    fn out(&self) -> u8 {
        self.out.read()
    }

    fn set_out(&self, bits: u8) {
        self.out.write(bits);
    }

    fn input(&self) -> u8 {
        self.pin.read()
    }

    // Writing 1s to PINx flips the matching PORTx bits in hardware; one
    // store instead of the default read-XOR-write.
    fn toggle(&self, mask: u8) {
        self.pin.write(mask);
    }
}

/// The selected chip's port map.
pub struct Ports;

impl PortMap for Ports {
    type Regs<'a>
        = PortRegs
    where
        Self: 'a;

    fn port(&self, port: Port) -> Option<PortRegs> {
        match port {
            #[cfg(feature = "atmega2560")]
            Port::A => Some(PortRegs::at(0x20)),
            // B, C and D share their addresses across the supported chips.
            Port::B => Some(PortRegs::at(0x23)),
            Port::C => Some(PortRegs::at(0x26)),
            Port::D => Some(PortRegs::at(0x29)),
            #[cfg(feature = "atmega2560")]
            Port::E => Some(PortRegs::at(0x2C)),
            #[cfg(feature = "atmega2560")]
            Port::F => Some(PortRegs::at(0x2F)),
            #[cfg(feature = "atmega2560")]
            Port::G => Some(PortRegs::at(0x32)),
            #[cfg(feature = "atmega2560")]
            Port::H => Some(PortRegs::at(0x100)),
            #[cfg(feature = "atmega2560")]
            Port::J => Some(PortRegs::at(0x103)),
            #[cfg(feature = "atmega2560")]
            Port::K => Some(PortRegs::at(0x106)),
            #[cfg(feature = "atmega2560")]
            Port::L => Some(PortRegs::at(0x109)),
            _ => None,
        }
    }
}

/// The GPIO engine over this chip's ports.
pub const fn gpio() -> Gpio<Ports> {
    Gpio::new(Ports)
}
