/*++

Licensed under the Apache-2.0 license.

File Name:

    hca.rs

Abstract:

    File contains the capability handle through which drivers reach the
    hardware cryptographic accelerator: register access plus the platform's
    interrupt routing.

--*/

use rvcl_ureg::{IrqRegistrar, MmioMut};
use tock_registers::fields::FieldValue;
use tock_registers::RegisterLongName;

/// Hardware cryptographic accelerator handle
pub struct Hca<'a, M: MmioMut> {
    regs: M,
    irq: Option<&'a dyn IrqRegistrar<'a>>,
}

impl<'a, M: MmioMut> Hca<'a, M> {
    /// Handle without interrupt support. Interrupt driven operations on such
    /// a handle fail with `RvclError::INVALID_INPUT`.
    pub fn new(regs: M) -> Self {
        Self { regs, irq: None }
    }

    pub fn with_irq(regs: M, irq: &'a dyn IrqRegistrar<'a>) -> Self {
        Self {
            regs,
            irq: Some(irq),
        }
    }

    pub fn regs(&self) -> &M {
        &self.regs
    }

    pub fn irq(&self) -> Option<&'a dyn IrqRegistrar<'a>> {
        self.irq
    }

    #[inline(always)]
    pub fn read32(&self, offset: usize) -> u32 {
        self.regs.read32(offset)
    }

    #[inline(always)]
    pub fn read64(&self, offset: usize) -> u64 {
        self.regs.read64(offset)
    }

    #[inline(always)]
    pub fn write32(&self, offset: usize, val: u32) {
        self.regs.write32(offset, val)
    }

    #[inline(always)]
    pub fn write64(&self, offset: usize, val: u64) {
        self.regs.write64(offset, val)
    }

    /// Read-modify-write the fields named by `field` in the 32-bit register at
    /// `offset`, leaving every other bit untouched.
    pub fn set_field32<R: RegisterLongName>(&self, offset: usize, field: FieldValue<u32, R>) {
        let val = self.read32(offset);
        self.write32(offset, field.modify(val));
    }
}
