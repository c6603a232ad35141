/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains helpers shared by the driver integration tests: reference
    digests and long-lived emulated peripherals.

--*/

#![allow(dead_code)]

use rvcl_drivers::{Hca, ShaMode};
use rvcl_emu_periph::HcaPeriph;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

pub const ALL_MODES: [ShaMode; 4] = [
    ShaMode::Sha224,
    ShaMode::Sha256,
    ShaMode::Sha384,
    ShaMode::Sha512,
];

/// Digest computed by the `sha2` crate
pub fn reference_digest(mode: ShaMode, data: &[u8]) -> Vec<u8> {
    match mode {
        ShaMode::Sha224 => Sha224::digest(data).to_vec(),
        ShaMode::Sha256 => Sha256::digest(data).to_vec(),
        ShaMode::Sha384 => Sha384::digest(data).to_vec(),
        ShaMode::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Deterministic message of `len` bytes
pub fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

pub type StaticHca = Hca<'static, &'static HcaPeriph<'static>>;

/// Peripheral and handle living for the rest of the test process, as
/// interrupt handlers must.
pub fn leak_hca_with_irq() -> (&'static HcaPeriph<'static>, &'static StaticHca) {
    let periph: &'static HcaPeriph<'static> = Box::leak(Box::new(HcaPeriph::new()));
    let hca: &'static StaticHca = Box::leak(Box::new(Hca::with_irq(periph, periph)));
    (periph, hca)
}

pub fn leak_hca() -> (&'static HcaPeriph<'static>, &'static StaticHca) {
    let periph: &'static HcaPeriph<'static> = Box::leak(Box::new(HcaPeriph::new()));
    let hca: &'static StaticHca = Box::leak(Box::new(Hca::new(periph)));
    (periph, hca)
}
