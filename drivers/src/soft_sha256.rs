/*++

Licensed under the Apache-2.0 license.

File Name:

    soft_sha256.rs

Abstract:

    File contains the software implementation of SHA-224 and SHA-256

--*/

use crate::sha::{pad, ShaBlockBuffer};
use crate::{Endianness, RvclError, RvclResult, ShaMode};
use sha2::digest::consts::U64;
use sha2::digest::generic_array::GenericArray;
use zeroize::Zeroize;

/// SHA-224 Initial Hash Vectors
#[cfg_attr(rustfmt, rustfmt_skip)]
const HASH_IV_224: [u32; 8] = [
    0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939,
    0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

/// SHA-256 Initial Hash Vectors
#[cfg_attr(rustfmt, rustfmt_skip)]
const HASH_IV_256: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Software SHA-224 / SHA-256 digest operation
#[derive(Clone)]
pub struct Sha256Soft {
    /// Hash
    hash: [u32; 8],

    buf: ShaBlockBuffer,
}

impl Sha256Soft {
    /// Start a digest operation
    ///
    /// # Arguments
    ///
    /// * `mode` - `ShaMode::Sha224` or `ShaMode::Sha256`
    /// * `endianness` - Layout of the data passed to `update`
    pub fn init(mode: ShaMode, endianness: Endianness) -> RvclResult<Self> {
        let hash = match mode {
            ShaMode::Sha224 => HASH_IV_224,
            ShaMode::Sha256 => HASH_IV_256,
            _ => return Err(RvclError::ERROR),
        };
        Ok(Self {
            hash,
            buf: ShaBlockBuffer::new(mode, endianness),
        })
    }

    pub fn mode(&self) -> ShaMode {
        self.buf.mode()
    }

    /// Absorb `data`. May be called any number of times with chunks of any
    /// length, including zero.
    pub fn update(&mut self, data: &[u8]) -> RvclResult<()> {
        let hash = &mut self.hash;
        self.buf.absorb(data, |block| {
            compress(hash, block);
            Ok(())
        })
    }

    /// Pad the message, compress the final block(s) and write the digest to
    /// the start of `hash`.
    ///
    /// # Returns
    ///
    /// * `usize` - Digest length in bytes
    pub fn finish(mut self, hash: &mut [u8]) -> RvclResult<usize> {
        let digest_len = self.mode().digest_size();
        if hash.len() < digest_len {
            return Err(RvclError::INVALID_OUTPUT);
        }

        let state = &mut self.hash;
        pad(&mut self.buf, |block| {
            compress(state, block);
            Ok(())
        })?;

        self.hash
            .iter()
            .flat_map(|word| word.to_be_bytes())
            .take(digest_len)
            .zip(hash.iter_mut())
            .for_each(|(src, dest)| *dest = src);

        Ok(digest_len)
    }
}

impl Drop for Sha256Soft {
    fn drop(&mut self) {
        self.hash.zeroize();
    }
}

fn compress(hash: &mut [u32; 8], block: &[u8]) {
    let block = *GenericArray::<u8, U64>::from_slice(block);
    sha2::compress256(hash, &[block]);
}
