/*++

Licensed under the Apache-2.0 license.

File Name:

    hca_trng.rs

Abstract:

    File contains API for the true random number generator of the hardware
    cryptographic accelerator.

--*/

use crate::{cprintln, wait, Hca, RvclError, RvclResult};
use core::cell::Cell;
use rand_core::{CryptoRng, RngCore};
use rvcl_registers::{
    TrngCr, TrngSr, TrngTrim, HCA_TRNG_CR, HCA_TRNG_DATA, HCA_TRNG_IRQ_ID, HCA_TRNG_REV,
    HCA_TRNG_SR, HCA_TRNG_TRIM,
};
use rvcl_ureg::{IrqHandler, MmioMut};
use tock_registers::LocalRegisterCopy;
use zeroize::Zeroize;

/// Lifecycle of a TRNG session
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TrngState {
    Uninitialized,
    HealthTesting,
    Ready,
    /// Health test failed. Terminal.
    Failed,
}

/// Completion callback of an interrupt driven request
pub type TrngCallback<'a> = &'a dyn Fn(RvclResult<()>);

#[derive(Clone, Copy)]
struct TrngRequest<'a> {
    dest: &'a Cell<u32>,
    callback: TrngCallback<'a>,
}

/// TRNG session of one HCA instance
pub struct HcaTrng<'a, M: MmioMut + 'a> {
    hca: &'a Hca<'a, M>,

    state: Cell<TrngState>,

    /// The single outstanding interrupt driven request
    request: Cell<Option<TrngRequest<'a>>>,
}

impl<'a, M: MmioMut + 'a> HcaTrng<'a, M> {
    pub fn new(hca: &'a Hca<'a, M>) -> Self {
        Self {
            hca,
            state: Cell::new(TrngState::Uninitialized),
            request: Cell::new(None),
        }
    }

    pub fn state(&self) -> TrngState {
        self.state.get()
    }

    pub fn is_request_pending(&self) -> bool {
        self.request.get().is_some()
    }

    /// Lock the trim configuration and run the on-demand health test
    ///
    /// The trim lock holds until the next hardware reset. `HTSTART` is
    /// cleared again on every path once the test has been started.
    ///
    /// # Returns
    ///
    /// * `RvclError::ERROR` - The TRNG is not instantiated
    /// * `RvclError::RNG_ERROR` - The health test failed
    pub fn init(&self) -> RvclResult<()> {
        if self.state.get() == TrngState::Failed {
            return Err(RvclError::RNG_ERROR);
        }
        if !self.is_present() {
            cprintln!("[trng] Not present");
            return Err(RvclError::ERROR);
        }

        self.hca.set_field32(HCA_TRNG_TRIM, TrngTrim::LOCK::SET);

        self.state.set(TrngState::HealthTesting);
        self.hca.set_field32(HCA_TRNG_CR, TrngCr::HTSTART::SET);
        let result = self.run_health_test();
        self.hca.set_field32(HCA_TRNG_CR, TrngCr::HTSTART::CLEAR);

        self.state.set(match result {
            Ok(()) => TrngState::Ready,
            Err(_) => TrngState::Failed,
        });
        result
    }

    fn run_health_test(&self) -> RvclResult<()> {
        loop {
            let sr = LocalRegisterCopy::<u32, TrngSr::Register>::new(self.hca.read32(HCA_TRNG_SR));
            if !sr.is_set(TrngSr::HTR) {
                break;
            }
            // A sample only counts against the test if it is still running
            // once the sample has been read.
            if self.hca.read32(HCA_TRNG_DATA) != 0
                && TrngSr::HTR.is_set(self.hca.read32(HCA_TRNG_SR))
            {
                cprintln!("[trng] Sample observed during health test");
                return Err(RvclError::RNG_ERROR);
            }
        }

        if !self.health_test_passed() {
            cprintln!("[trng] Health test failed");
            return Err(RvclError::RNG_ERROR);
        }
        Ok(())
    }

    /// Status of the last health test as reported by the peripheral
    pub fn health_test_passed(&self) -> bool {
        TrngSr::HTS.read(self.hca.read32(HCA_TRNG_SR)) == 0
    }

    /// Wait for and return one 32-bit sample
    ///
    /// Polls the ready flag without a timeout.
    pub fn get_data(&self) -> RvclResult<u32> {
        if !self.is_present() {
            return Err(RvclError::INVALID_INPUT);
        }
        self.check_ready()?;

        wait::until_set(self.hca, HCA_TRNG_SR, TrngSr::RNDRDY);
        Ok(self.hca.read32(HCA_TRNG_DATA))
    }

    /// Request one sample through the "data ready" interrupt
    ///
    /// Returns once the request is armed. From interrupt context the sample
    /// is stored in `dest`, the interrupt is disabled and then `callback` is
    /// invoked, so the callback may issue the next request. Only one request
    /// may be outstanding; a second one fails with `RvclError::ERROR`.
    pub fn get_data_with_irq(
        &'a self,
        dest: &'a Cell<u32>,
        callback: TrngCallback<'a>,
    ) -> RvclResult<()> {
        let irq = self.hca.irq().ok_or(RvclError::INVALID_INPUT)?;
        if !self.is_present() {
            return Err(RvclError::INVALID_INPUT);
        }
        self.check_ready()?;
        if self.is_request_pending() {
            return Err(RvclError::ERROR);
        }

        self.request.set(Some(TrngRequest { dest, callback }));
        irq.register_handler(HCA_TRNG_IRQ_ID, self);
        self.hca.set_field32(HCA_TRNG_CR, TrngCr::RNDIRQEN::SET);
        Ok(())
    }

    /// Interrupt service routine for the "data ready" interrupt
    pub fn isr(&self) {
        let Some(request) = self.request.take() else {
            return;
        };

        request.dest.set(self.hca.read32(HCA_TRNG_DATA));
        self.hca.set_field32(HCA_TRNG_CR, TrngCr::RNDIRQEN::CLEAR);
        (request.callback)(Ok(()));
    }

    /// Fill `dest` with samples, least significant byte of each sample first
    pub fn fill_bytes(&self, dest: &mut [u8]) -> RvclResult<()> {
        for chunk in dest.chunks_mut(4) {
            let sample = self.get_data()?.to_le_bytes();
            chunk.copy_from_slice(&sample[..chunk.len()]);
        }
        Ok(())
    }

    fn is_present(&self) -> bool {
        self.hca.read32(HCA_TRNG_REV) != 0
    }

    fn check_ready(&self) -> RvclResult<()> {
        match self.state.get() {
            TrngState::Ready => Ok(()),
            TrngState::Failed => Err(RvclError::RNG_ERROR),
            TrngState::Uninitialized | TrngState::HealthTesting => Err(RvclError::ERROR),
        }
    }
}

impl<'a, M: MmioMut + 'a> IrqHandler for HcaTrng<'a, M> {
    fn handle_irq(&self, irq_id: u32) {
        if irq_id == HCA_TRNG_IRQ_ID {
            self.isr();
        }
    }
}

/// `rand_core` view of an initialized TRNG session
pub struct TrngRng<'t, 'a, M: MmioMut + 'a> {
    trng: &'t HcaTrng<'a, M>,
}

impl<'t, 'a, M: MmioMut + 'a> TrngRng<'t, 'a, M> {
    /// Fails with the session's error if it is not ready
    pub fn new(trng: &'t HcaTrng<'a, M>) -> RvclResult<Self> {
        trng.check_ready()?;
        Ok(Self { trng })
    }
}

impl<'t, 'a, M: MmioMut + 'a> RngCore for TrngRng<'t, 'a, M> {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    /// On failure `dest` is left zeroed
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if self.try_fill_bytes(dest).is_err() {
            cprintln!("[trng] Sample acquisition failed");
            dest.zeroize();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.trng
            .fill_bytes(dest)
            .map_err(|err| rand_core::Error::from(core::num::NonZeroU32::from(err)))
    }
}

impl<'t, 'a, M: MmioMut + 'a> CryptoRng for TrngRng<'t, 'a, M> {}
