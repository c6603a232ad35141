/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains common functions to implement register polling routines.
    None of them time out; a caller needing a bound must abandon the call.

--*/

use crate::Hca;
use rvcl_ureg::MmioMut;
use tock_registers::fields::Field;
use tock_registers::RegisterLongName;

pub fn until<F>(mut predicate: F)
where
    F: FnMut() -> bool,
{
    while !predicate() {}
}

/// Spin until `field` of the 32-bit register at `offset` reads non-zero
pub fn until_set<M: MmioMut, R: RegisterLongName>(hca: &Hca<M>, offset: usize, field: Field<u32, R>) {
    until(|| field.read(hca.read32(offset)) != 0)
}

/// Spin until `field` of the 32-bit register at `offset` reads zero
pub fn until_clear<M: MmioMut, R: RegisterLongName>(
    hca: &Hca<M>,
    offset: usize,
    field: Field<u32, R>,
) {
    until(|| field.read(hca.read32(offset)) == 0)
}
