/*++

Licensed under the Apache-2.0 license.

File Name:

    hca_sha.rs

Abstract:

    File contains API for the SHA-2 engine of the hardware cryptographic
    accelerator.

--*/

use crate::sha::{pad, ShaBlockBuffer};
use crate::{wait, Endianness, Hca, RvclError, RvclResult, ShaMode};
use rvcl_registers::{Cr, ShaCr, HCA_CR, HCA_FIFO_IN, HCA_HASH, HCA_SHA_CR, HCA_SHA_REV};
use rvcl_ureg::MmioMut;

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        const NATIVE_WORD_SIZE: usize = 8;
    } else {
        const NATIVE_WORD_SIZE: usize = 4;
    }
}

/// Digest operation in progress on the HCA. The compression state lives in
/// the peripheral; only the partial block is kept here.
pub struct HcaShaCtx {
    buf: ShaBlockBuffer,
}

impl HcaShaCtx {
    pub fn mode(&self) -> ShaMode {
        self.buf.mode()
    }
}

/// HCA SHA-2 engine
pub struct HcaSha<'h, 'a, M: MmioMut> {
    hca: &'h Hca<'a, M>,
}

impl<'h, 'a, M: MmioMut> HcaSha<'h, 'a, M> {
    pub fn new(hca: &'h Hca<'a, M>) -> Self {
        Self { hca }
    }

    /// Compute the digest of `data` in one call
    ///
    /// # Returns
    ///
    /// * `usize` - Digest length in bytes
    pub fn digest(&self, mode: ShaMode, data: &[u8], hash: &mut [u8]) -> RvclResult<usize> {
        let mut ctx = self.init(mode, Endianness::Little)?;
        self.update(&mut ctx, data)?;
        self.finish(ctx, hash)
    }

    /// Start a digest operation
    ///
    /// Routes the input FIFO to the SHA block and loads the initial hash
    /// value for `mode` into the peripheral.
    pub fn init(&self, mode: ShaMode, endianness: Endianness) -> RvclResult<HcaShaCtx> {
        self.check_present()?;

        self.hca.set_field32(HCA_CR, Cr::IFIFOTGT::Sha);
        self.hca.write32(
            HCA_SHA_CR,
            (ShaCr::MODE.val(u32::from(mode)) + ShaCr::INIT::SET).value,
        );

        Ok(HcaShaCtx {
            buf: ShaBlockBuffer::new(mode, endianness),
        })
    }

    /// Absorb `data`, submitting every block as soon as it is complete
    pub fn update(&self, ctx: &mut HcaShaCtx, data: &[u8]) -> RvclResult<()> {
        ctx.buf.absorb(data, |block| self.sha_block(block))
    }

    /// Pad the message, submit the final block(s) and read the digest into
    /// the start of `hash`.
    ///
    /// # Returns
    ///
    /// * `usize` - Digest length in bytes
    pub fn finish(&self, mut ctx: HcaShaCtx, hash: &mut [u8]) -> RvclResult<usize> {
        let mode = ctx.mode();
        if hash.len() < mode.digest_size() {
            return Err(RvclError::INVALID_OUTPUT);
        }

        pad(&mut ctx.buf, |block| self.sha_block(block))?;

        self.read_digest(mode, hash)?;
        Ok(mode.digest_size())
    }

    /// Submit one assembled block and wait for the compression round
    pub fn sha_block(&self, block: &[u8]) -> RvclResult<()> {
        self.check_present()?;

        for chunk in block.chunks_exact(8) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.hca.write64(HCA_FIFO_IN, u64::from_le_bytes(word));
        }

        wait::until_clear(self.hca, HCA_SHA_CR, ShaCr::BUSY);
        Ok(())
    }

    /// Copy the digest registers into `out` in big-endian order
    ///
    /// The digest span holds the most significant word at its highest offset.
    /// When `out` is aligned for a full register word, whole words are read
    /// from the last offset down and stored front to back. Otherwise the
    /// registers are unpacked byte by byte from the tail of `out` backward.
    pub fn read_digest(&self, mode: ShaMode, out: &mut [u8]) -> RvclResult<()> {
        let len = mode.digest_size();
        if out.len() < len {
            return Err(RvclError::INVALID_OUTPUT);
        }
        let out = &mut out[..len];
        let word_size = mode.word_size();
        let words = len / word_size;
        let align = core::cmp::min(NATIVE_WORD_SIZE, word_size);

        if (out.as_ptr() as usize) % align == 0 {
            for (i, dest) in out.chunks_exact_mut(word_size).enumerate() {
                let offset = HCA_HASH + (words - 1 - i) * word_size;
                match word_size {
                    4 => dest.copy_from_slice(&self.hca.read32(offset).to_be_bytes()),
                    _ => dest.copy_from_slice(&self.hca.read64(offset).to_be_bytes()),
                }
            }
        } else {
            for k in 0..words {
                let offset = HCA_HASH + k * word_size;
                let word = match word_size {
                    4 => u64::from(self.hca.read32(offset)),
                    _ => self.hca.read64(offset),
                };
                for b in 0..word_size {
                    out[len - 1 - (k * word_size + b)] = (word >> (8 * b)) as u8;
                }
            }
        }
        Ok(())
    }

    fn check_present(&self) -> RvclResult<()> {
        if self.hca.read32(HCA_SHA_REV) == 0 {
            return Err(RvclError::ERROR);
        }
        Ok(())
    }
}
