//! Fixed configuration of the release tooling.
//!
//! Nothing here is read from the environment; every value is part of the
//! contract with the Bao1x bootloader or the UF2 flasher.

use crate::sealed::{FunctionCode, SEMVER_LEN};

/// UF2 family identifier of the Baochip Bao1x.
pub const BAOCHIP_1X_UF2_FAMILY: u32 = 0xa7d7_6373;

/// Flash address where bare metal images are loaded.
pub const BAREMETAL_START: u32 = 0x6006_0000;

/// Oldest bootloader semver accepted by release images.
pub const RELEASE_MIN_SEMVER: [u8; SEMVER_LEN] = [
    0x00, 0x00, 0x09, 0x00, 0x08, 0x00, 0x17, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Semver stamped into release images.
pub const RELEASE_SEMVER: [u8; SEMVER_LEN] = [
    0x00, 0x00, 0x09, 0x00, 0x10, 0x00, 0xfc, 0x09, 0xf2, 0x29, 0xf5, 0x47, 0x01, 0x00, 0x00, 0x00,
];

/// Metadata that goes into the sealed header alongside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOptions {
    /// Written verbatim, including 0. Use [`ImageOptions::default`] for
    /// the baremetal code.
    pub function_code: u32,
    pub min_semver: [u8; SEMVER_LEN],
    pub semver: [u8; SEMVER_LEN],
}

impl ImageOptions {
    /// Baremetal image carrying the pinned release semvers.
    pub fn release() -> Self {
        Self {
            min_semver: RELEASE_MIN_SEMVER,
            semver: RELEASE_SEMVER,
            ..Self::default()
        }
    }
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            function_code: FunctionCode::Baremetal.into(),
            min_semver: [0u8; SEMVER_LEN],
            semver: [0u8; SEMVER_LEN],
        }
    }
}
