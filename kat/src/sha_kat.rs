/*++

Licensed under the Apache-2.0 license.

File Name:

    sha_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for the SHA-2 engines.

--*/

use rvcl_drivers::printer::HexBytes;
use rvcl_drivers::{
    cprintln, sha_digest, Hca, HcaSha, RvclError, RvclResult, ShaMode, SHA_MAX_DIGEST_BYTE_SIZE,
};
use rvcl_ureg::MmioMut;

struct KatVector {
    mode: ShaMode,
    msg: &'static [u8],
    digest: &'static [u8],
}

// Test vector source: FIPS 180-4 examples
// https://csrc.nist.gov/projects/cryptographic-standards-and-guidelines/example-values
#[cfg_attr(rustfmt, rustfmt_skip)]
const VECTORS: [KatVector; 8] = [
    KatVector {
        mode: ShaMode::Sha224,
        msg: b"abc",
        digest: &[
            0x23, 0x09, 0x7d, 0x22, 0x34, 0x05, 0xd8, 0x22, 0x86, 0x42, 0xa4, 0x77, 0xbd, 0xa2,
            0x55, 0xb3, 0x2a, 0xad, 0xbc, 0xe4, 0xbd, 0xa0, 0xb3, 0xf7, 0xe3, 0x6c, 0x9d, 0xa7,
        ],
    },
    KatVector {
        mode: ShaMode::Sha224,
        msg: b"",
        digest: &[
            0xd1, 0x4a, 0x02, 0x8c, 0x2a, 0x3a, 0x2b, 0xc9, 0x47, 0x61, 0x02, 0xbb, 0x28, 0x82,
            0x34, 0xc4, 0x15, 0xa2, 0xb0, 0x1f, 0x82, 0x8e, 0xa6, 0x2a, 0xc5, 0xb3, 0xe4, 0x2f,
        ],
    },
    KatVector {
        mode: ShaMode::Sha256,
        msg: b"abc",
        digest: &[
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae, 0x22, 0x23,
            0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00, 0x15, 0xad,
        ],
    },
    KatVector {
        mode: ShaMode::Sha256,
        msg: b"",
        digest: &[
            0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
            0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
        ],
    },
    KatVector {
        mode: ShaMode::Sha384,
        msg: b"abc",
        digest: &[
            0xcb, 0x00, 0x75, 0x3f, 0x45, 0xa3, 0x5e, 0x8b, 0xb5, 0xa0, 0x3d, 0x69, 0x9a, 0xc6, 0x50, 0x07,
            0x27, 0x2c, 0x32, 0xab, 0x0e, 0xde, 0xd1, 0x63, 0x1a, 0x8b, 0x60, 0x5a, 0x43, 0xff, 0x5b, 0xed,
            0x80, 0x86, 0x07, 0x2b, 0xa1, 0xe7, 0xcc, 0x23, 0x58, 0xba, 0xec, 0xa1, 0x34, 0xc8, 0x25, 0xa7,
        ],
    },
    KatVector {
        mode: ShaMode::Sha384,
        msg: b"",
        digest: &[
            0x38, 0xb0, 0x60, 0xa7, 0x51, 0xac, 0x96, 0x38, 0x4c, 0xd9, 0x32, 0x7e, 0xb1, 0xb1, 0xe3, 0x6a,
            0x21, 0xfd, 0xb7, 0x11, 0x14, 0xbe, 0x07, 0x43, 0x4c, 0x0c, 0xc7, 0xbf, 0x63, 0xf6, 0xe1, 0xda,
            0x27, 0x4e, 0xde, 0xbf, 0xe7, 0x6f, 0x65, 0xfb, 0xd5, 0x1a, 0xd2, 0xf1, 0x48, 0x98, 0xb9, 0x5b,
        ],
    },
    KatVector {
        mode: ShaMode::Sha512,
        msg: b"abc",
        digest: &[
            0xdd, 0xaf, 0x35, 0xa1, 0x93, 0x61, 0x7a, 0xba, 0xcc, 0x41, 0x73, 0x49, 0xae, 0x20, 0x41, 0x31,
            0x12, 0xe6, 0xfa, 0x4e, 0x89, 0xa9, 0x7e, 0xa2, 0x0a, 0x9e, 0xee, 0xe6, 0x4b, 0x55, 0xd3, 0x9a,
            0x21, 0x92, 0x99, 0x2a, 0x27, 0x4f, 0xc1, 0xa8, 0x36, 0xba, 0x3c, 0x23, 0xa3, 0xfe, 0xeb, 0xbd,
            0x45, 0x4d, 0x44, 0x23, 0x64, 0x3c, 0xe8, 0x0e, 0x2a, 0x9a, 0xc9, 0x4f, 0xa5, 0x4c, 0xa4, 0x9f,
        ],
    },
    KatVector {
        mode: ShaMode::Sha512,
        msg: b"",
        digest: &[
            0xcf, 0x83, 0xe1, 0x35, 0x7e, 0xef, 0xb8, 0xbd, 0xf1, 0x54, 0x28, 0x50, 0xd6, 0x6d, 0x80, 0x07,
            0xd6, 0x20, 0xe4, 0x05, 0x0b, 0x57, 0x15, 0xdc, 0x83, 0xf4, 0xa9, 0x21, 0xd3, 0x6c, 0xe9, 0xce,
            0x47, 0xd0, 0xd1, 0x3c, 0x5d, 0x85, 0xf2, 0xb0, 0xff, 0x83, 0x18, 0xd2, 0x87, 0x7e, 0xec, 0x2f,
            0x63, 0xb9, 0x31, 0xbd, 0x47, 0x41, 0x7a, 0x81, 0xa5, 0x38, 0x32, 0x7a, 0xf9, 0x27, 0xda, 0x3e,
        ],
    },
];

fn mode_name(mode: ShaMode) -> &'static str {
    match mode {
        ShaMode::Sha224 => "SHA-224",
        ShaMode::Sha256 => "SHA-256",
        ShaMode::Sha384 => "SHA-384",
        ShaMode::Sha512 => "SHA-512",
    }
}

#[derive(Default, Debug)]
pub struct ShaKat {}

impl ShaKat {
    /// Run the known answer tests against the software engines.
    ///
    /// # Returns
    ///
    /// * `RvclResult` - `RvclError::ERROR` on the first mismatch or engine failure
    pub fn execute_soft(&self) -> RvclResult<()> {
        for vector in VECTORS.iter() {
            let mut digest = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
            let result = sha_digest(vector.mode, vector.msg, &mut digest);
            Self::check("soft", vector, result, &digest)?;
        }
        Ok(())
    }

    /// Run the known answer tests against the HCA SHA engine.
    pub fn execute_hca<M: MmioMut>(&self, hca: &Hca<M>) -> RvclResult<()> {
        let sha = HcaSha::new(hca);
        for vector in VECTORS.iter() {
            let mut digest = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
            let result = sha.digest(vector.mode, vector.msg, &mut digest);
            Self::check("hca", vector, result, &digest)?;
        }
        Ok(())
    }

    fn check(
        engine: &str,
        vector: &KatVector,
        result: RvclResult<usize>,
        digest: &[u8],
    ) -> RvclResult<()> {
        match result {
            Ok(len) if digest[..len] == *vector.digest => Ok(()),
            Ok(len) => {
                cprintln!(
                    "[kat] {} {} mismatch: {}",
                    engine,
                    mode_name(vector.mode),
                    HexBytes(&digest[..len])
                );
                Err(RvclError::ERROR)
            }
            Err(err) => {
                cprintln!(
                    "[kat] {} {} failed: 0x{}",
                    engine,
                    mode_name(vector.mode),
                    HexBytes(&u32::from(err).to_be_bytes())
                );
                Err(RvclError::ERROR)
            }
        }
    }
}
