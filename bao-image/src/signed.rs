//! The outer signed blob: a jump over the signature block, the detached
//! signature, reserved fields and the sealed data the signature covers.

use byteorder::{ByteOrder, LittleEndian};

use crate::ed25519ph::{PrehashSigner, SIGNATURE_LEN};
use crate::error::Result;
use crate::pubkey::DEV_KEY;

/// `jal x0, 768`: jumps from the start of the image to the payload.
pub const JAL_X0: u32 = 0x3000_006f;

/// Length of the reserved area following `aad_len`.
pub const AAD_LEN: usize = 60;

/// Header length of the signed blob, excluding the sealed data.
pub const SBLOB_LEN: usize = 4 + SIGNATURE_LEN + 4 + AAD_LEN;

const _: () = assert!(SBLOB_LEN == 132);

/// Byte range of the signature within a signed image.
pub const SIGNATURE_RANGE: core::ops::Range<usize> = 4..4 + SIGNATURE_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedBlob {
    pub jal_x0: u32,
    pub signature: [u8; SIGNATURE_LEN],
    /// Unused, always zero.
    pub aad_len: u32,
    /// Unused, always zero.
    pub aad: [u8; AAD_LEN],
    pub sealed_data: Vec<u8>,
}

impl SignedBlob {
    /// Sign `sealed_data` with `secret_key` and wrap it. The signature is
    /// made against the development key slot of the public key table.
    pub fn new(
        signer: &impl PrehashSigner,
        secret_key: &[u8],
        sealed_data: Vec<u8>,
    ) -> Result<Self> {
        log::debug!("signing against the '{}' key slot", DEV_KEY.tag_str());
        Self::with_public_key(signer, secret_key, &DEV_KEY.key, sealed_data)
    }

    pub fn with_public_key(
        signer: &impl PrehashSigner,
        secret_key: &[u8],
        public_key: &[u8],
        sealed_data: Vec<u8>,
    ) -> Result<Self> {
        let signature = signer.sign(secret_key, public_key, &sealed_data)?;
        log::debug!("ed25519ph signature {}", hex::encode(signature));
        Ok(Self {
            jal_x0: JAL_X0,
            signature,
            aad_len: 0,
            aad: [0u8; AAD_LEN],
            sealed_data,
        })
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LEN] {
        &self.signature
    }

    pub fn sealed_data(&self) -> &[u8] {
        &self.sealed_data
    }

    pub fn header_bytes(&self) -> [u8; SBLOB_LEN] {
        let mut buf = [0u8; SBLOB_LEN];
        LittleEndian::write_u32(&mut buf[0..4], self.jal_x0);
        buf[SIGNATURE_RANGE].copy_from_slice(&self.signature);
        LittleEndian::write_u32(&mut buf[68..72], self.aad_len);
        buf[72..].copy_from_slice(&self.aad);
        buf
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SBLOB_LEN + self.sealed_data.len());
        buf.extend_from_slice(&self.header_bytes());
        buf.extend_from_slice(&self.sealed_data);
        buf
    }
}

/// Sign `sealed_data` and return the complete signed image.
pub fn sign_and_wrap(
    signer: &impl PrehashSigner,
    secret_key: &[u8],
    public_key: &[u8],
    sealed_data: &[u8],
) -> Result<Vec<u8>> {
    let blob = SignedBlob::with_public_key(signer, secret_key, public_key, sealed_data.to_vec())?;
    Ok(blob.to_bytes())
}

/// Check the signature of a signed image against `public_key`.
///
/// Only the sealed data is covered; the outer header is not.
pub fn verify_image(signer: &impl PrehashSigner, public_key: &[u8], image: &[u8]) -> Result<()> {
    if image.len() < SBLOB_LEN {
        return Err(crate::Error::Verification);
    }
    let mut signature = [0u8; SIGNATURE_LEN];
    signature.copy_from_slice(&image[SIGNATURE_RANGE]);
    signer.verify(public_key, &image[SBLOB_LEN..], &signature)
}
