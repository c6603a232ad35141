// Licensed under the Apache-2.0 license

use rvcl_drivers::Hca;
use rvcl_emu_periph::HcaPeriph;
use rvcl_kat::{RvclError, ShaKat};

#[test]
fn test_soft_kat() {
    assert_eq!(ShaKat::default().execute_soft(), Ok(()));
}

#[test]
fn test_hca_kat() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    assert_eq!(ShaKat::default().execute_hca(&hca), Ok(()));
}

#[test]
fn test_hca_kat_without_sha_block() {
    let periph = HcaPeriph::new();
    periph.set_sha_present(false);
    let hca = Hca::new(&periph);
    assert_eq!(ShaKat::default().execute_hca(&hca), Err(RvclError::ERROR));
}
