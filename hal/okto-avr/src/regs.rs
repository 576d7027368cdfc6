//! Volatile access to byte-wide special-function registers.
//!
//! The single place in the workspace that dereferences raw hardware
//! addresses. Handles are plain data; constructing one touches nothing.

use core::ptr;

/// One special-function register at a fixed data-space address.
#[derive(Clone, Copy)]
pub(crate) struct Reg {
    addr: *mut u8,
}

impl Reg {
    pub(crate) const fn at(addr: usize) -> Reg {
        Reg {
            addr: addr as *mut u8,
        }
    }

    #[cfg(test)]
    pub(crate) fn addr(self) -> usize {
        self.addr as usize
    }

    pub(crate) fn read(self) -> u8 {
        // SAFETY: the address comes from the selected chip's datasheet
        // register map and is always valid to read on that chip.
        unsafe { ptr::read_volatile(self.addr) }
    }

    pub(crate) fn write(self, bits: u8) {
        // SAFETY: as above; byte stores to SFR addresses are always
        // permitted on the selected chip.
        unsafe { ptr::write_volatile(self.addr, bits) }
    }
}
