/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains the SHA-2 mode, input endianness and block buffering
    definitions shared by the software and hardware hash engines.

--*/

use crate::{RvclError, RvclResult};
use zeroize::Zeroize;

/// Largest block size of the supported modes (SHA-384/512)
pub const SHA_MAX_BLOCK_BYTE_SIZE: usize = 128;

/// Largest digest size of the supported modes (SHA-512)
pub const SHA_MAX_DIGEST_BYTE_SIZE: usize = 64;

/// SHA-2 mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaMode {
    Sha224 = 0,
    Sha256 = 1,
    Sha384 = 2,
    Sha512 = 3,
}

impl ShaMode {
    /// Compression block size in bytes
    pub const fn block_size(self) -> usize {
        match self {
            Self::Sha224 | Self::Sha256 => 64,
            Self::Sha384 | Self::Sha512 => 128,
        }
    }

    /// Digest size in bytes
    pub const fn digest_size(self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Size in bytes of one word of the internal state
    pub const fn word_size(self) -> usize {
        match self {
            Self::Sha224 | Self::Sha256 => 4,
            Self::Sha384 | Self::Sha512 => 8,
        }
    }

    /// Size in bytes of the message length field appended during padding
    pub const fn len_field_size(self) -> usize {
        match self {
            Self::Sha224 | Self::Sha256 => 8,
            Self::Sha384 | Self::Sha512 => 16,
        }
    }
}

impl From<ShaMode> for u32 {
    fn from(mode: ShaMode) -> Self {
        mode as Self
    }
}

impl TryFrom<u32> for ShaMode {
    type Error = RvclError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Sha224),
            1 => Ok(Self::Sha256),
            2 => Ok(Self::Sha384),
            3 => Ok(Self::Sha512),
            _ => Err(RvclError::ERROR),
        }
    }
}

/// Memory layout of caller supplied message data
///
/// `Little` is a plain byte stream. With `Big`, every complete word of the
/// message (4 bytes for SHA-224/256, 8 bytes for SHA-384/512) is stored
/// byte-reversed and is restored to canonical order before compression.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Endianness {
    #[default]
    Little = 0,
    Big = 1,
}

/// Block staging area and running message length of a digest operation
#[derive(Clone)]
pub(crate) struct ShaBlockBuffer {
    /// Number of message bits absorbed so far
    bit_len: u64,

    block: [u8; SHA_MAX_BLOCK_BYTE_SIZE],

    mode: ShaMode,

    endianness: Endianness,
}

impl ShaBlockBuffer {
    pub(crate) fn new(mode: ShaMode, endianness: Endianness) -> Self {
        Self {
            bit_len: 0,
            block: [0u8; SHA_MAX_BLOCK_BYTE_SIZE],
            mode,
            endianness,
        }
    }

    pub(crate) fn mode(&self) -> ShaMode {
        self.mode
    }

    pub(crate) fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Number of valid bytes currently held in the block
    pub(crate) fn index(&self) -> usize {
        ((self.bit_len >> 3) % self.mode.block_size() as u64) as usize
    }

    /// Absorb `data`, calling `compress` once for every completed block.
    ///
    /// If `data` would overflow the length counter nothing is absorbed. If
    /// `compress` fails, the counter and buffered bytes cover only the data
    /// accepted before the failing block.
    pub(crate) fn absorb<F>(&mut self, data: &[u8], mut compress: F) -> RvclResult<()>
    where
        F: FnMut(&[u8]) -> RvclResult<()>,
    {
        let block_size = self.mode.block_size();
        (data.len() as u64)
            .checked_mul(8)
            .and_then(|bits| self.bit_len.checked_add(bits))
            .ok_or(RvclError::INVALID_INPUT)?;

        let mut index = self.index();
        let mut remaining = data;
        while !remaining.is_empty() {
            let take = core::cmp::min(block_size - index, remaining.len());
            self.block[index..index + take].copy_from_slice(&remaining[..take]);
            self.normalize(index, index + take);

            if index + take == block_size {
                if let Err(err) = compress(&self.block[..block_size]) {
                    // Word reversal is its own inverse
                    self.normalize(index, block_size);
                    return Err(err);
                }
            }

            self.bit_len += (take as u64) * 8;
            index = (index + take) % block_size;
            remaining = &remaining[take..];
        }
        Ok(())
    }

    /// Restore canonical byte order of the words completed by a write to
    /// `block[start..end]`.
    fn normalize(&mut self, start: usize, end: usize) {
        if self.endianness != Endianness::Big {
            return;
        }
        let word = self.mode.word_size();
        let first = start / word;
        let last = end / word;
        for w in first..last {
            self.block[w * word..(w + 1) * word].reverse();
        }
    }

    /// Block storage, for padding
    pub(crate) fn block_mut(&mut self) -> &mut [u8] {
        let block_size = self.mode.block_size();
        &mut self.block[..block_size]
    }
}

impl Drop for ShaBlockBuffer {
    fn drop(&mut self) {
        self.block.zeroize();
        self.bit_len.zeroize();
    }
}

/// Write the big-endian message bit length at the tail of `block`.
///
/// The length field is 64 bits for SHA-224/256 and 128 bits for
/// SHA-384/512; the upper half of the wide field is always zero.
pub(crate) fn append_bit_len(block: &mut [u8], mode: ShaMode, bit_len: u64) {
    let len_offset = block.len() - mode.len_field_size();
    block[len_offset..].fill(0);
    let tail = block.len() - core::mem::size_of::<u64>();
    block[tail..].copy_from_slice(&bit_len.to_be_bytes());
}

/// Apply FIPS 180-4 padding to the buffered tail of a message, calling
/// `compress` for the one or two final blocks.
pub(crate) fn pad<F>(buf: &mut ShaBlockBuffer, mut compress: F) -> RvclResult<()>
where
    F: FnMut(&[u8]) -> RvclResult<()>,
{
    let mode = buf.mode();
    let bit_len = buf.bit_len();
    let mut index = buf.index();
    let block = buf.block_mut();
    let block_size = block.len();

    // Add end of message
    block[index] = 0b1000_0000;
    index += 1;

    let block_remain = block_size - index;
    if block_remain >= mode.len_field_size() {
        block[index..].fill(0);
        append_bit_len(block, mode, bit_len);
        compress(block)
    } else {
        block[index..].fill(0);
        compress(block)?;

        block.fill(0);
        append_bit_len(block, mode, bit_len);
        compress(block)
    }
}
