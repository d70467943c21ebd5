//! Signing and UF2 packing for Baochip Bao1x bare metal firmware.
//!
//! A raw firmware binary goes through two stages before it can be dropped
//! onto the bootloader's USB drive:
//!
//! 1. [`seal_firmware`] wraps the binary in a [`SealedData`] header (version,
//!    magic, length, function code, semvers and the public key table),
//!    signs those bytes with Ed25519ph and prefixes the [`SignedBlob`]
//!    header. An input that is already signed has its old signature block
//!    stripped first, so signing is idempotent.
//! 2. [`uf2::pack`] chunks the signed image into 512-byte UF2 blocks
//!    addressed from [`BAREMETAL_START`].
//!
//! # Usage
//!
//! ```no_run
//! use bao_image::{devkey, ed25519ph, uf2, Ed25519ph, ImageOptions};
//!
//! # fn main() -> bao_image::Result<()> {
//! ed25519ph::self_test(&Ed25519ph)?;
//! let firmware = std::fs::read("firmware.bin").unwrap();
//! let signed = bao_image::seal_firmware(
//!     &Ed25519ph,
//!     &devkey::dev_secret_key()?,
//!     &firmware,
//!     &ImageOptions::release(),
//! )?;
//! let stream = uf2::pack(&signed, bao_image::BAOCHIP_1X_UF2_FAMILY, bao_image::BAREMETAL_START);
//! # Ok(())
//! # }
//! ```
//!
//! The byte layouts here are a fixed contract with the bootloader. In
//! particular the sealed magic is stored reversed (`ymuy3oaB`); changing
//! it bricks the boot path.

pub mod config;
pub mod devkey;
pub mod ed25519ph;
pub mod error;
pub mod output;
pub mod pubkey;
pub mod reseal;
pub mod sealed;
pub mod signed;
pub mod uf2;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{ImageOptions, BAOCHIP_1X_UF2_FAMILY, BAREMETAL_START};
pub use ed25519ph::{Ed25519ph, PrehashSigner};
pub use error::{Error, Result};
pub use pubkey::{Pubkey, PUBKEYS};
pub use sealed::{build_sealed_data, FunctionCode, SealedData, SIGBLOCK_LEN};
pub use signed::{sign_and_wrap, verify_image, SignedBlob, SBLOB_LEN};

/// Strip any existing signature block from `input`, seal what is left and
/// sign it against the development key slot.
pub fn seal_firmware(
    signer: &impl PrehashSigner,
    secret_key: &[u8],
    input: &[u8],
    options: &ImageOptions,
) -> Result<Vec<u8>> {
    let payload = reseal::strip_envelope(input);
    log::info!("binary payload size is {} bytes", payload.len());

    let sealed = build_sealed_data(payload, options);
    let blob = SignedBlob::new(signer, secret_key, sealed)?;
    Ok(blob.to_bytes())
}
