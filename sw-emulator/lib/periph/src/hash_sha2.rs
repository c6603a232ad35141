/*++

Licensed under the Apache-2.0 license.

File Name:

    hash_sha2.rs

Abstract:

    File contains the SHA-2 engine model of the emulated HCA.

--*/

use sha2::digest::consts::{U128, U64};
use sha2::digest::generic_array::GenericArray;

const SHA256_IV: [[u32; 8]; 2] = [
    // SHA-224
    [
        0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7,
        0xbefa4fa4,
    ],
    // SHA-256
    [
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
        0x5be0cd19,
    ],
];

const SHA512_IV: [[u64; 8]; 2] = [
    // SHA-384
    [
        0xcbbb9d5dc1059ed8,
        0x629a292a367cd507,
        0x9159015a3070dd17,
        0x152fecd8f70e5939,
        0x67332667ffc00b31,
        0x8eb44a8768581511,
        0xdb0c2e0d64f98fa7,
        0x47b5481dbefa4fa4,
    ],
    // SHA-512
    [
        0x6a09e667f3bcc908,
        0xbb67ae8584caa73b,
        0x3c6ef372fe94f82b,
        0xa54ff53a5f1d36f1,
        0x510e527fade682d1,
        0x9b05688c2b3e6c1f,
        0x1f83d9abfb41bd6b,
        0x5be0cd19137e2179,
    ],
];

/// Size of the digest register span
pub const HASH_REGION_SIZE: usize = rvcl_registers::HCA_HASH_SIZE;

const MAX_BLOCK_SIZE: usize = 128;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum State {
    Sha256([u32; 8]),
    Sha512([u64; 8]),
}

/// SHA-2 engine fed through the 64-bit input FIFO
pub(crate) struct Sha2Engine {
    /// Mode field value latched at the last INIT
    mode: u32,

    state: State,

    fifo: [u8; MAX_BLOCK_SIZE],

    fifo_len: usize,

    /// Digest register span, least significant digest byte first
    region: [u8; HASH_REGION_SIZE],

    blocks: usize,
}

impl Sha2Engine {
    pub(crate) fn new() -> Self {
        let mut engine = Self {
            mode: 1,
            state: State::Sha256(SHA256_IV[1]),
            fifo: [0; MAX_BLOCK_SIZE],
            fifo_len: 0,
            region: [0; HASH_REGION_SIZE],
            blocks: 0,
        };
        engine.reset(1);
        engine
    }

    /// Load the initial hash value of `mode` and drop any buffered input
    pub(crate) fn reset(&mut self, mode: u32) {
        self.mode = mode & 0x3;
        self.state = match self.mode {
            0 | 1 => State::Sha256(SHA256_IV[self.mode as usize]),
            _ => State::Sha512(SHA512_IV[self.mode as usize - 2]),
        };
        self.fifo_len = 0;
        self.update_region();
    }

    fn block_size(&self) -> usize {
        match self.state {
            State::Sha256(_) => 64,
            State::Sha512(_) => 128,
        }
    }

    fn digest_size(&self) -> usize {
        [28, 32, 48, 64][self.mode as usize]
    }

    pub(crate) fn fifo_is_empty(&self) -> bool {
        self.fifo_len == 0
    }

    /// Push bytes into the input FIFO. Returns true when a block was
    /// compressed as a result.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> bool {
        let mut compressed = false;
        for &b in bytes {
            self.fifo[self.fifo_len] = b;
            self.fifo_len += 1;
            if self.fifo_len == self.block_size() {
                self.compress();
                compressed = true;
            }
        }
        compressed
    }

    fn compress(&mut self) {
        match &mut self.state {
            State::Sha256(state) => {
                let block = *GenericArray::<u8, U64>::from_slice(&self.fifo[..64]);
                sha2::compress256(state, &[block]);
            }
            State::Sha512(state) => {
                let block = *GenericArray::<u8, U128>::from_slice(&self.fifo[..128]);
                sha2::compress512(state, &[block]);
            }
        }
        self.fifo_len = 0;
        self.blocks += 1;
        self.update_region();
    }

    fn update_region(&mut self) {
        let mut digest = [0u8; HASH_REGION_SIZE];
        match &self.state {
            State::Sha256(state) => {
                for (chunk, word) in digest.chunks_exact_mut(4).zip(state.iter()) {
                    chunk.copy_from_slice(&word.to_be_bytes());
                }
            }
            State::Sha512(state) => {
                for (chunk, word) in digest.chunks_exact_mut(8).zip(state.iter()) {
                    chunk.copy_from_slice(&word.to_be_bytes());
                }
            }
        }

        let len = self.digest_size();
        self.region = [0; HASH_REGION_SIZE];
        for k in 0..len {
            self.region[k] = digest[len - 1 - k];
        }
    }

    pub(crate) fn region(&self) -> &[u8; HASH_REGION_SIZE] {
        &self.region
    }

    pub(crate) fn set_region(&mut self, region: &[u8]) {
        let len = core::cmp::min(region.len(), HASH_REGION_SIZE);
        self.region = [0; HASH_REGION_SIZE];
        self.region[..len].copy_from_slice(&region[..len]);
    }

    pub(crate) fn blocks(&self) -> usize {
        self.blocks
    }
}
