/*++

Licensed under the Apache-2.0 license.

File Name:

    soft_sha512.rs

Abstract:

    File contains the software implementation of SHA-384 and SHA-512

--*/

use crate::sha::{pad, ShaBlockBuffer};
use crate::{Endianness, RvclError, RvclResult, ShaMode};
use sha2::digest::consts::U128;
use sha2::digest::generic_array::GenericArray;
use zeroize::Zeroize;

/// SHA-384 Initial Hash Vectors
const HASH_IV_384: [u64; 8] = [
    0xcbbb9d5dc1059ed8,
    0x629a292a367cd507,
    0x9159015a3070dd17,
    0x152fecd8f70e5939,
    0x67332667ffc00b31,
    0x8eb44a8768581511,
    0xdb0c2e0d64f98fa7,
    0x47b5481dbefa4fa4,
];

/// SHA-512 Initial Hash Vectors
const HASH_IV_512: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

/// Software SHA-384 / SHA-512 digest operation
#[derive(Clone)]
pub struct Sha512Soft {
    /// Hash
    hash: [u64; 8],

    buf: ShaBlockBuffer,
}

impl Sha512Soft {
    /// Start a digest operation
    ///
    /// # Arguments
    ///
    /// * `mode` - `ShaMode::Sha384` or `ShaMode::Sha512`
    /// * `endianness` - Layout of the data passed to `update`
    pub fn init(mode: ShaMode, endianness: Endianness) -> RvclResult<Self> {
        let hash = match mode {
            ShaMode::Sha384 => HASH_IV_384,
            ShaMode::Sha512 => HASH_IV_512,
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

impl Drop for Sha512Soft {
    fn drop(&mut self) {
        self.hash.zeroize();
    }
}

fn compress(hash: &mut [u64; 8], block: &[u8]) {
    let block = *GenericArray::<u8, U128>::from_slice(block);
    sha2::compress512(hash, &[block]);
}
