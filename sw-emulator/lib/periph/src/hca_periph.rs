/*++

Licensed under the Apache-2.0 license.

File Name:

    hca_periph.rs

Abstract:

    File contains the register bank of the emulated hardware cryptographic
    accelerator (HCA).

--*/

use crate::hash_sha2::{Sha2Engine, HASH_REGION_SIZE};
use crate::trng::TrngModel;
use rvcl_registers::{
    Cr, ShaCr, TrngCr, TrngSr, TrngTrim, HCA_CR, HCA_FIFO_IN, HCA_HASH, HCA_REV, HCA_SHA_CR,
    HCA_SHA_REV, HCA_TRNG_CR, HCA_TRNG_DATA, HCA_TRNG_IRQ_ID, HCA_TRNG_REV, HCA_TRNG_SR,
    HCA_TRNG_TRIM,
};
use rvcl_ureg::{IrqHandler, IrqRegistrar, Mmio, MmioMut};
use std::cell::{Cell, RefCell};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::InMemoryRegister;

/// Emulated HCA peripheral
pub struct HcaPeriph<'a> {
    /// Control register
    cr: InMemoryRegister<u32, Cr::Register>,

    /// SHA control register
    sha_cr: InMemoryRegister<u32, ShaCr::Register>,

    /// TRNG control register
    trng_cr: InMemoryRegister<u32, TrngCr::Register>,

    /// TRNG trim register
    trng_trim: InMemoryRegister<u32, TrngTrim::Register>,

    sha_rev: Cell<u32>,

    trng_rev: Cell<u32>,

    /// Status reads reporting BUSY after each compressed block
    sha_busy_polls: Cell<u32>,

    sha_busy_remaining: Cell<u32>,

    sha: RefCell<Sha2Engine>,

    trng: RefCell<TrngModel>,

    irq_handler: Cell<Option<&'a dyn IrqHandler>>,
}

impl<'a> HcaPeriph<'a> {
    /// HCA_REV Register Value
    const HCA_REV_VAL: u32 = 0x0001_0000;

    /// HCA_SHA_REV Register Value
    const SHA_REV_VAL: u32 = 0x0001_0000;

    /// HCA_TRNG_REV Register Value
    const TRNG_REV_VAL: u32 = 0x0001_0000;

    /// Reset value of the trim register
    const TRIM_RESET_VAL: u32 = 0x0000_0c35;

    pub fn new() -> Self {
        Self {
            cr: InMemoryRegister::new(0),
            sha_cr: InMemoryRegister::new(0),
            trng_cr: InMemoryRegister::new(0),
            trng_trim: InMemoryRegister::new(Self::TRIM_RESET_VAL),
            sha_rev: Cell::new(Self::SHA_REV_VAL),
            trng_rev: Cell::new(Self::TRNG_REV_VAL),
            sha_busy_polls: Cell::new(2),
            sha_busy_remaining: Cell::new(0),
            sha: RefCell::new(Sha2Engine::new()),
            trng: RefCell::new(TrngModel::new()),
            irq_handler: Cell::new(None),
        }
    }

    /// Instantiate or remove the SHA block
    pub fn set_sha_present(&self, present: bool) {
        self.sha_rev.set(if present { Self::SHA_REV_VAL } else { 0 });
    }

    pub fn set_sha_busy_polls(&self, polls: u32) {
        self.sha_busy_polls.set(polls);
    }

    /// Number of blocks compressed since reset
    pub fn sha_blocks(&self) -> usize {
        self.sha.borrow().blocks()
    }

    /// Overwrite the digest register span, lowest offset first
    pub fn set_hash_region(&self, region: &[u8]) {
        self.sha.borrow_mut().set_region(region);
    }

    pub fn hash_region(&self) -> [u8; HASH_REGION_SIZE] {
        *self.sha.borrow().region()
    }

    pub fn set_trng_rev(&self, rev: u32) {
        self.trng_rev.set(rev);
    }

    /// Number of status reads the health test stays running
    pub fn set_trng_ht_duration(&self, polls: u32) {
        self.trng.borrow_mut().ht_duration = polls;
    }

    /// Value the data register returns while the health test runs
    pub fn set_trng_ht_sample(&self, sample: u32) {
        self.trng.borrow_mut().ht_sample = sample;
    }

    pub fn set_trng_ht_fail(&self, fail: bool) {
        self.trng.borrow_mut().ht_fail = fail;
    }

    pub fn set_trng_ready_delay(&self, polls: u32) {
        self.trng.borrow_mut().ready_delay = polls;
    }

    /// Queue samples returned ahead of the generated ones
    pub fn push_trng_samples(&self, samples: &[u32]) {
        self.trng.borrow_mut().push_samples(samples);
    }

    pub fn trng_cr(&self) -> u32 {
        self.trng_cr.get()
    }

    pub fn trng_trim(&self) -> u32 {
        self.trng_trim.get()
    }

    pub fn trim_locked(&self) -> bool {
        self.trng_trim.is_set(TrngTrim::LOCK)
    }

    pub fn irq_registered(&self) -> bool {
        self.irq_handler.get().is_some()
    }

    /// Signal "random data ready". The registered handler runs only while
    /// `RNDIRQEN` is set.
    ///
    /// # Returns
    ///
    /// Whether a handler was invoked
    pub fn raise_trng_irq(&self) -> bool {
        if !self.trng_cr.is_set(TrngCr::RNDIRQEN) {
            return false;
        }
        match self.irq_handler.get() {
            Some(handler) => {
                handler.handle_irq(HCA_TRNG_IRQ_ID);
                true
            }
            None => false,
        }
    }

    fn read_cr(&self) -> u32 {
        let empty = self.sha.borrow().fifo_is_empty();
        self.cr.modify(if empty {
            Cr::IFIFOEMPTY::SET
        } else {
            Cr::IFIFOEMPTY::CLEAR
        });
        self.cr.get()
    }

    fn read_sha_cr(&self) -> u32 {
        let remaining = self.sha_busy_remaining.get();
        if remaining > 0 {
            self.sha_busy_remaining.set(remaining - 1);
            self.sha_cr.modify(ShaCr::BUSY::SET);
        } else {
            self.sha_cr.modify(ShaCr::BUSY::CLEAR);
        }
        self.sha_cr.get()
    }

    fn read_trng_sr(&self) -> u32 {
        let (ready, running, failed) = self.trng.borrow_mut().poll_status();
        let sr = InMemoryRegister::<u32, TrngSr::Register>::new(0);
        sr.write(
            TrngSr::RNDRDY.val(u32::from(ready))
                + TrngSr::SRCS::SET
                + TrngSr::HTR.val(u32::from(running))
                + TrngSr::HTS.val(u32::from(failed)),
        );
        sr.get()
    }

    fn read_hash(&self, offset: usize) -> u32 {
        let index = offset - HCA_HASH;
        let region = self.sha.borrow();
        let mut word = [0u8; 4];
        for (i, b) in word.iter_mut().enumerate() {
            *b = region.region().get(index + i).copied().unwrap_or(0);
        }
        u32::from_le_bytes(word)
    }

    fn write_sha_cr(&self, val: u32) {
        let written = InMemoryRegister::<u32, ShaCr::Register>::new(val);
        self.sha_cr.modify(ShaCr::MODE.val(written.read(ShaCr::MODE)));
        if written.is_set(ShaCr::INIT) {
            self.sha.borrow_mut().reset(written.read(ShaCr::MODE));
        }
    }

    fn write_fifo(&self, bytes: &[u8]) {
        if !self.cr.matches_all(Cr::IFIFOTGT::Sha) {
            return;
        }
        if self.sha.borrow_mut().push(bytes) {
            self.sha_busy_remaining.set(self.sha_busy_polls.get());
        }
    }

    fn write_trng_cr(&self, val: u32) {
        let was_started = self.trng_cr.is_set(TrngCr::HTSTART);
        self.trng_cr.set(val);
        if !was_started && self.trng_cr.is_set(TrngCr::HTSTART) {
            self.trng.borrow_mut().start_health_test();
        }
    }

    fn write_trng_trim(&self, val: u32) {
        if !self.trim_locked() {
            self.trng_trim.set(val);
        }
    }
}

impl Default for HcaPeriph<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmio for HcaPeriph<'_> {
    fn read32(&self, offset: usize) -> u32 {
        match offset {
            HCA_CR => self.read_cr(),
            HCA_SHA_CR => self.read_sha_cr(),
            HCA_TRNG_CR => self.trng_cr.get(),
            HCA_TRNG_SR => self.read_trng_sr(),
            HCA_TRNG_DATA => self.trng.borrow_mut().read_data(),
            HCA_TRNG_TRIM => self.trng_trim.get(),
            HCA_REV => Self::HCA_REV_VAL,
            HCA_SHA_REV => self.sha_rev.get(),
            HCA_TRNG_REV => self.trng_rev.get(),
            _ if (HCA_HASH..HCA_HASH + HASH_REGION_SIZE).contains(&offset) => {
                self.read_hash(offset)
            }
            _ => 0,
        }
    }

    fn read64(&self, offset: usize) -> u64 {
        let lo = u64::from(self.read32(offset));
        let hi = u64::from(self.read32(offset + 4));
        (hi << 32) | lo
    }
}

impl MmioMut for HcaPeriph<'_> {
    fn write32(&self, offset: usize, val: u32) {
        match offset {
            HCA_CR => self.cr.modify(Cr::IFIFOTGT.val(Cr::IFIFOTGT.read(val))),
            HCA_SHA_CR => self.write_sha_cr(val),
            HCA_FIFO_IN => self.write_fifo(&val.to_le_bytes()),
            HCA_TRNG_CR => self.write_trng_cr(val),
            HCA_TRNG_TRIM => self.write_trng_trim(val),
            _ => {}
        }
    }

    fn write64(&self, offset: usize, val: u64) {
        match offset {
            HCA_FIFO_IN => self.write_fifo(&val.to_le_bytes()),
            _ => {
                self.write32(offset, val as u32);
                self.write32(offset + 4, (val >> 32) as u32);
            }
        }
    }
}

impl<'a> IrqRegistrar<'a> for HcaPeriph<'a> {
    fn register_handler(&self, irq_id: u32, handler: &'a dyn IrqHandler) {
        if irq_id == HCA_TRNG_IRQ_ID {
            self.irq_handler.set(Some(handler));
        }
    }
}
