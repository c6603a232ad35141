/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Known Answer Tests.

--*/

#![no_std]

mod sha_kat;

pub use rvcl_drivers::{RvclError, RvclResult};
pub use sha_kat::ShaKat;
