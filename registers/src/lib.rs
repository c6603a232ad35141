/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Register map of the hardware cryptographic accelerator (HCA). Offsets are
    relative to the peripheral base address.

--*/
#![no_std]
#![allow(non_snake_case)]

use tock_registers::register_bitfields;

/// Control register
pub const HCA_CR: usize = 0x000;

/// SHA control register
pub const HCA_SHA_CR: usize = 0x060;

/// Input FIFO, 64 bits wide
pub const HCA_FIFO_IN: usize = 0x070;

/// Digest span. The most significant digest word sits at the highest offset.
pub const HCA_HASH: usize = 0x080;

/// Size of the digest span in bytes
pub const HCA_HASH_SIZE: usize = 64;

pub const HCA_TRNG_CR: usize = 0x0e0;
pub const HCA_TRNG_SR: usize = 0x0e4;
pub const HCA_TRNG_DATA: usize = 0x0e8;
pub const HCA_TRNG_TRIM: usize = 0x0ec;

/// Accelerator revision
pub const HCA_REV: usize = 0x200;

/// SHA block revision; zero when the block is not instantiated.
pub const HCA_SHA_REV: usize = 0x208;

/// TRNG revision; zero when the TRNG is not instantiated.
pub const HCA_TRNG_REV: usize = 0x20c;

/// Interrupt line of the TRNG "random data ready" event
pub const HCA_TRNG_IRQ_ID: u32 = 1;

register_bitfields! [
    u32,

    /// Control Register Fields
    pub Cr [
        /// Input FIFO target
        IFIFOTGT OFFSET(0) NUMBITS(1) [
            Aes = 0,
            Sha = 1,
        ],
        IFIFOEMPTY OFFSET(8) NUMBITS(1) [],
    ],

    /// SHA Control Register Fields
    pub ShaCr [
        MODE OFFSET(0) NUMBITS(2) [
            Sha224 = 0,
            Sha256 = 1,
            Sha384 = 2,
            Sha512 = 3,
        ],
        /// Start a new digest with the selected mode's initial values
        INIT OFFSET(2) NUMBITS(1) [],
        BUSY OFFSET(16) NUMBITS(1) [],
    ],

    /// TRNG Control Register Fields
    pub TrngCr [
        /// Random data ready interrupt enable
        RNDIRQEN OFFSET(0) NUMBITS(1) [],
        /// Start the on-demand health test
        HTSTART OFFSET(1) NUMBITS(1) [],
    ],

    /// TRNG Status Register Fields
    pub TrngSr [
        /// Random data ready
        RNDRDY OFFSET(0) NUMBITS(1) [],
        /// Entropy source enabled
        SRCS OFFSET(1) NUMBITS(1) [],
        /// Health test running
        HTR OFFSET(8) NUMBITS(1) [],
        /// Health test status, set on failure
        HTS OFFSET(9) NUMBITS(1) [],
    ],

    /// TRNG Trim Register Fields
    pub TrngTrim [
        VALUE OFFSET(0) NUMBITS(31) [],
        /// Locks the trim value until the next hardware reset
        LOCK OFFSET(31) NUMBITS(1) [],
    ],
];
