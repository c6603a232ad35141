/*++

Licensed under the Apache-2.0 license.

File Name:

    soft_sha.rs

Abstract:

    File contains the runtime-selectable SHA-2 context wrapping the
    software hash engines.

--*/

use crate::{Endianness, RvclResult, Sha256Soft, Sha512Soft, ShaMode};

/// Software digest operation for a mode chosen at runtime
#[derive(Clone)]
pub enum ShaCtx {
    Sha224(Sha256Soft),
    Sha256(Sha256Soft),
    Sha384(Sha512Soft),
    Sha512(Sha512Soft),
}

impl ShaCtx {
    pub fn init(mode: ShaMode, endianness: Endianness) -> RvclResult<Self> {
        let ctx = match mode {
            ShaMode::Sha224 => Self::Sha224(Sha256Soft::init(mode, endianness)?),
            ShaMode::Sha256 => Self::Sha256(Sha256Soft::init(mode, endianness)?),
            ShaMode::Sha384 => Self::Sha384(Sha512Soft::init(mode, endianness)?),
            ShaMode::Sha512 => Self::Sha512(Sha512Soft::init(mode, endianness)?),
        };
        Ok(ctx)
    }

    /// Start a digest operation for a raw mode tag as encoded in the
    /// `ShaCr::MODE` field. Unknown tags yield `RvclError::ERROR`.
    pub fn init_raw(tag: u32, endianness: Endianness) -> RvclResult<Self> {
        Self::init(ShaMode::try_from(tag)?, endianness)
    }

    pub fn mode(&self) -> ShaMode {
        match self {
            Self::Sha224(ctx) | Self::Sha256(ctx) => ctx.mode(),
            Self::Sha384(ctx) | Self::Sha512(ctx) => ctx.mode(),
        }
    }

    pub fn update(&mut self, data: &[u8]) -> RvclResult<()> {
        match self {
            Self::Sha224(ctx) | Self::Sha256(ctx) => ctx.update(data),
            Self::Sha384(ctx) | Self::Sha512(ctx) => ctx.update(data),
        }
    }

    pub fn finish(self, hash: &mut [u8]) -> RvclResult<usize> {
        match self {
            Self::Sha224(ctx) | Self::Sha256(ctx) => ctx.finish(hash),
            Self::Sha384(ctx) | Self::Sha512(ctx) => ctx.finish(hash),
        }
    }
}

/// Compute the digest of `data` in one call
///
/// # Returns
///
/// * `usize` - Digest length in bytes
pub fn sha_digest(mode: ShaMode, data: &[u8], hash: &mut [u8]) -> RvclResult<usize> {
    let mut ctx = ShaCtx::init(mode, Endianness::Little)?;
    ctx.update(data)?;
    ctx.finish(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RvclError;

    #[test]
    fn test_init_raw_rejects_unknown_tag() {
        assert_eq!(
            ShaCtx::init_raw(4, Endianness::Little).err(),
            Some(RvclError::ERROR)
        );
        assert_eq!(
            ShaCtx::init_raw(2, Endianness::Little).map(|ctx| ctx.mode()),
            Ok(ShaMode::Sha384)
        );
    }

    #[test]
    fn test_dispatch_matches_engine() {
        let data = b"The quick brown fox jumps over the lazy dog";
        for mode in [
            ShaMode::Sha224,
            ShaMode::Sha256,
            ShaMode::Sha384,
            ShaMode::Sha512,
        ] {
            let mut expected = [0u8; 64];
            let len = match mode {
                ShaMode::Sha224 | ShaMode::Sha256 => {
                    let mut sha = Sha256Soft::init(mode, Endianness::Little).unwrap();
                    sha.update(data).unwrap();
                    sha.finish(&mut expected).unwrap()
                }
                ShaMode::Sha384 | ShaMode::Sha512 => {
                    let mut sha = Sha512Soft::init(mode, Endianness::Little).unwrap();
                    sha.update(data).unwrap();
                    sha.finish(&mut expected).unwrap()
                }
            };

            let mut out = [0u8; 64];
            assert_eq!(sha_digest(mode, data, &mut out), Ok(mode.digest_size()));
            assert_eq!(len, mode.digest_size());
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_finish_checks_capacity() {
        let ctx = ShaCtx::init(ShaMode::Sha512, Endianness::Little).unwrap();
        let mut out = [0u8; 48];
        assert_eq!(ctx.finish(&mut out), Err(RvclError::INVALID_OUTPUT));
    }
}
