//! Pre-hashed Ed25519 (RFC 8032 "Ed25519ph") signing capability.
//!
//! The envelope code only needs something that turns a seed, a public key
//! and a message into 64 signature bytes. [`PrehashSigner`] is that seam;
//! [`Ed25519ph`] fills it with `ed25519-dalek`.

use ed25519_dalek::{Signature, SigningKey, VerifyingKey, KEYPAIR_LENGTH};
use sha2::{Digest, Sha512};

use crate::error::{Error, Result, SignStage};

pub const SECRET_KEY_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// Something that can produce and check Ed25519ph signatures.
pub trait PrehashSigner {
    /// Sign `message` with the 32-byte seed `secret_key` whose public half is
    /// `public_key`.
    fn sign(&self, secret_key: &[u8], public_key: &[u8], message: &[u8])
        -> Result<[u8; SIGNATURE_LEN]>;

    /// Check `signature` over `message` against `public_key`.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8; SIGNATURE_LEN])
        -> Result<()>;
}

fn key_array<const N: usize>(which: &'static str, key: &[u8]) -> Result<[u8; N]> {
    key.try_into()
        .map_err(|_| Error::KeyLength { which, len: key.len() })
}

/// Ed25519ph with an empty context, backed by `ed25519-dalek`.
///
/// Every call builds its own SHA-512 state, so one value can be shared
/// freely between signing jobs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519ph;

impl PrehashSigner for Ed25519ph {
    fn sign(
        &self,
        secret_key: &[u8],
        public_key: &[u8],
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN]> {
        let seed: [u8; SECRET_KEY_LEN] = key_array("secret", secret_key)?;
        let public: [u8; PUBLIC_KEY_LEN] = key_array("public", public_key)?;

        // Expanded key layout is seed || public key.
        let mut keypair = [0u8; KEYPAIR_LENGTH];
        keypair[..SECRET_KEY_LEN].copy_from_slice(&seed);
        keypair[SECRET_KEY_LEN..].copy_from_slice(&public);
        let signing_key = SigningKey::from_keypair_bytes(&keypair).map_err(|e| Error::Signing {
            stage: SignStage::Init,
            reason: e.to_string(),
        })?;

        let mut prehash = Sha512::new();
        prehash.update(message);

        let signature = signing_key
            .sign_prehashed(prehash, None)
            .map_err(|e| Error::Signing {
                stage: SignStage::Finalize,
                reason: e.to_string(),
            })?;
        Ok(signature.to_bytes())
    }

    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<()> {
        let public: [u8; PUBLIC_KEY_LEN] = key_array("public", public_key)?;
        let verifying_key =
            VerifyingKey::from_bytes(&public).map_err(|_| Error::Verification)?;

        let mut prehash = Sha512::new();
        prehash.update(message);

        verifying_key
            .verify_prehashed(prehash, None, &Signature::from_bytes(signature))
            .map_err(|_| Error::Verification)
    }
}

/// RFC 8032 section 7.3 test vector.
pub mod rfc8032 {
    pub const SECRET_KEY: &str =
        "833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42";
    pub const PUBLIC_KEY: &str =
        "ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf";
    pub const MESSAGE: &str = "616263";
    pub const SIGNATURE: &str = "98a70222f0b8121aa9d30f813d683f809e462b469c7ff87639499bb94e6dae41\
                                 31f85042463c2a355a2003d062adf5aaa10b8c61e636062aaad11c2a26083406";
}

/// Sign the RFC 8032 Ed25519ph vector and compare against the known answer.
///
/// Must pass before any real key material is handed to `signer`.
pub fn self_test(signer: &impl PrehashSigner) -> Result<()> {
    let decode = |s: &str| hex::decode(s).map_err(|_| Error::SelfTest);
    let secret_key = decode(rfc8032::SECRET_KEY)?;
    let public_key = decode(rfc8032::PUBLIC_KEY)?;
    let message = decode(rfc8032::MESSAGE)?;
    let expected = decode(rfc8032::SIGNATURE)?;

    let signature = signer
        .sign(&secret_key, &public_key, &message)
        .map_err(|_| Error::SelfTest)?;
    if signature[..] != expected[..] {
        return Err(Error::SelfTest);
    }
    log::debug!("ed25519ph self test passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_passes() {
        self_test(&Ed25519ph).expect("RFC 8032 vector should sign correctly");
    }

    #[test]
    fn test_rejects_short_secret_key() {
        let err = Ed25519ph.sign(&[0u8; 31], &[0u8; 32], b"abc").unwrap_err();
        assert!(matches!(err, Error::KeyLength { which: "secret", len: 31 }));
    }

    #[test]
    fn test_rejects_long_public_key() {
        let err = Ed25519ph.sign(&[0u8; 32], &[0u8; 33], b"abc").unwrap_err();
        assert!(matches!(err, Error::KeyLength { which: "public", len: 33 }));
    }

    #[test]
    fn test_mismatched_keypair_fails_at_init() {
        let secret = hex::decode(rfc8032::SECRET_KEY).unwrap();
        let err = Ed25519ph.sign(&secret, &[7u8; 32], b"abc").unwrap_err();
        assert!(matches!(err, Error::Signing { stage: SignStage::Init, .. }));
    }

    #[test]
    fn test_verify_roundtrip() {
        let secret = hex::decode(rfc8032::SECRET_KEY).unwrap();
        let public = hex::decode(rfc8032::PUBLIC_KEY).unwrap();
        let sig = Ed25519ph.sign(&secret, &public, b"firmware").unwrap();
        Ed25519ph.verify(&public, b"firmware", &sig).unwrap();
        assert!(Ed25519ph.verify(&public, b"firmwarf", &sig).is_err());
    }

    /// Answers every request with the wrong bytes.
    struct BrokenSigner;

    impl PrehashSigner for BrokenSigner {
        fn sign(&self, _: &[u8], _: &[u8], _: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
            Ok([0u8; SIGNATURE_LEN])
        }

        fn verify(&self, _: &[u8], _: &[u8], _: &[u8; SIGNATURE_LEN]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_self_test_catches_broken_signer() {
        assert!(matches!(self_test(&BrokenSigner), Err(Error::SelfTest)));
    }
}
