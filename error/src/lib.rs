/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the library for error handling

--*/
#![cfg_attr(not(any(test, feature = "std")), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// RVCL Error Type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RvclError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: RvclError = RvclError::new_const($value);
        )*

        /// Returns the name of the error constant matching `self`, if any
        pub fn name(&self) -> Option<&'static str> {
            $(
                if self.0.get() == $value {
                    return Some(stringify!($name));
                }
            )*
            None
        }

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl RvclError {
    /// Create an error; intended to only be used from const contexts, as we don't want
    /// runtime panics if val is zero. The preferred way to get an RvclError from a u32 is to
    /// use `RvclError::try_from()` from the `TryFrom` trait impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("RvclError cannot be 0"),
        }
    }

    define_error_constants![
        (
            ERROR,
            0x0001_0001,
            "Generic error: unsupported configuration or absent hardware feature"
        ),
        (
            INVALID_INPUT,
            0x0001_0002,
            "Missing or malformed input argument"
        ),
        (
            INVALID_OUTPUT,
            0x0001_0003,
            "Destination buffer missing or too small"
        ),
        (
            RNG_ERROR,
            0x0002_0001,
            "Entropy source failed its health test or produced invalid output"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::RvclError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::RvclError(val)
    }
}

impl From<RvclError> for core::num::NonZeroU32 {
    fn from(val: RvclError) -> Self {
        val.0
    }
}

impl From<RvclError> for u32 {
    fn from(val: RvclError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for RvclError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(RvclError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type RvclResult<T> = Result<T, RvclError>;
