/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the emulated HCA peripheral library.

--*/

mod hash_sha2;
mod hca_periph;
mod trng;

pub use hash_sha2::HASH_REGION_SIZE;
pub use hca_periph::HcaPeriph;
