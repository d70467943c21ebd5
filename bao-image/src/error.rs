//! Error type shared by every stage of the signing and packing pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Stage of the streaming Ed25519ph computation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignStage {
    Init,
    /// Not produced by [`crate::Ed25519ph`], whose SHA-512 update cannot
    /// fail; reserved for other [`crate::PrehashSigner`] backends.
    Update,
    Finalize,
}

impl core::fmt::Display for SignStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            SignStage::Init => "init",
            SignStage::Update => "update",
            SignStage::Finalize => "final_create",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Secret or public key material was not exactly 32 bytes.
    #[error("{which} key must be 32 bytes, got {len}")]
    KeyLength { which: &'static str, len: usize },

    /// The signing capability reported a failure.
    #[error("ed25519ph {stage} failed: {reason}")]
    Signing { stage: SignStage, reason: String },

    /// The RFC 8032 known-answer test did not reproduce the expected signature.
    #[error("ed25519ph self test failed: signing capability is broken or tampered with")]
    SelfTest,

    /// A signature did not verify against the given public key.
    #[error("signature verification failed")]
    Verification,

    /// The embedded development key could not be decoded.
    #[error("development key is malformed: {0}")]
    DevKey(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
