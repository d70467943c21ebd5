use sha2::{Digest, Sha512};

use crate::ed25519ph::{PrehashSigner, SIGNATURE_LEN};
use crate::error::{Error, Result};

/// Deterministic stand-in for the real signing capability: the "signature"
/// is SHA-512 over the public key and message.
pub(crate) struct FakeSigner;

impl FakeSigner {
    fn digest(public_key: &[u8], message: &[u8]) -> [u8; SIGNATURE_LEN] {
        let mut hasher = Sha512::new();
        hasher.update(public_key);
        hasher.update(message);
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

impl PrehashSigner for FakeSigner {
    fn sign(
        &self,
        secret_key: &[u8],
        public_key: &[u8],
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN]> {
        if secret_key.len() != 32 {
            return Err(Error::KeyLength {
                which: "secret",
                len: secret_key.len(),
            });
        }
        Ok(Self::digest(public_key, message))
    }

    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<()> {
        if Self::digest(public_key, message) == *signature {
            Ok(())
        } else {
            Err(Error::Verification)
        }
    }
}
