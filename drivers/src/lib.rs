/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the RISC-V crypto library drivers.

--*/

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod hca;
mod hca_sha;
mod hca_trng;
pub mod printer;
mod sha;
mod soft_sha;
mod soft_sha256;
mod soft_sha512;
pub mod wait;

pub use hca::Hca;
pub use hca_sha::{HcaSha, HcaShaCtx};
pub use hca_trng::{HcaTrng, TrngCallback, TrngRng, TrngState};
pub use rvcl_error::{RvclError, RvclResult};
pub use sha::{Endianness, ShaMode, SHA_MAX_BLOCK_BYTE_SIZE, SHA_MAX_DIGEST_BYTE_SIZE};
pub use soft_sha::{sha_digest, ShaCtx};
pub use soft_sha256::Sha256Soft;
pub use soft_sha512::Sha512Soft;
