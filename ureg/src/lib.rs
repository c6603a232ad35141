// Licensed under the Apache-2.0 license
//
// Register access abstraction shared by the drivers and by anything that
// stands in for the hardware accelerator (real MMIO or a simulated bank).
#![no_std]

/// Read access to a block of memory-mapped registers.
///
/// Offsets are byte offsets relative to the peripheral base address.
pub trait Mmio {
    fn read32(&self, offset: usize) -> u32;

    fn read64(&self, offset: usize) -> u64;
}

/// Write access to a block of memory-mapped registers.
///
/// Writes take `&self`: register writes are side effects on the device, not
/// on the accessor.
pub trait MmioMut: Mmio {
    fn write32(&self, offset: usize, val: u32);

    fn write64(&self, offset: usize, val: u64);
}

impl<T: Mmio + ?Sized> Mmio for &T {
    #[inline(always)]
    fn read32(&self, offset: usize) -> u32 {
        T::read32(self, offset)
    }

    #[inline(always)]
    fn read64(&self, offset: usize) -> u64 {
        T::read64(self, offset)
    }
}

impl<T: MmioMut + ?Sized> MmioMut for &T {
    #[inline(always)]
    fn write32(&self, offset: usize, val: u32) {
        T::write32(self, offset, val)
    }

    #[inline(always)]
    fn write64(&self, offset: usize, val: u64) {
        T::write64(self, offset, val)
    }
}

/// A handler the platform calls from interrupt context.
///
/// Implementations must not block or allocate.
pub trait IrqHandler {
    fn handle_irq(&self, irq_id: u32);
}

/// Platform hook used to route a peripheral interrupt to a handler.
pub trait IrqRegistrar<'a> {
    fn register_handler(&self, irq_id: u32, handler: &'a dyn IrqHandler);
}

/// Volatile accessors over a physical peripheral base address.
#[derive(Clone, Copy)]
pub struct RealMmio {
    base: usize,
}

impl RealMmio {
    /// Returns an accessor for the register block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of a mapped peripheral register block that
    /// stays mapped for as long as the returned accessor is used, and every
    /// offset passed to the accessors must be a valid register in that block.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    pub fn base(&self) -> usize {
        self.base
    }
}

impl Mmio for RealMmio {
    #[inline(always)]
    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: upheld by the contract of `RealMmio::new`.
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u32) }
    }

    #[inline(always)]
    fn read64(&self, offset: usize) -> u64 {
        cfg_if::cfg_if! {
            if #[cfg(target_pointer_width = "64")] {
                // SAFETY: upheld by the contract of `RealMmio::new`.
                unsafe { core::ptr::read_volatile((self.base + offset) as *const u64) }
            } else {
                // The bus is little-endian: low word first.
                let lo = self.read32(offset) as u64;
                let hi = self.read32(offset + 4) as u64;
                (hi << 32) | lo
            }
        }
    }
}

impl MmioMut for RealMmio {
    #[inline(always)]
    fn write32(&self, offset: usize, val: u32) {
        // SAFETY: upheld by the contract of `RealMmio::new`.
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, val) }
    }

    #[inline(always)]
    fn write64(&self, offset: usize, val: u64) {
        cfg_if::cfg_if! {
            if #[cfg(target_pointer_width = "64")] {
                // SAFETY: upheld by the contract of `RealMmio::new`.
                unsafe { core::ptr::write_volatile((self.base + offset) as *mut u64, val) }
            } else {
                self.write32(offset, val as u32);
                self.write32(offset + 4, (val >> 32) as u32);
            }
        }
    }
}
