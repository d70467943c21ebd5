use bao_image::ed25519ph::{self, rfc8032, Ed25519ph, PrehashSigner};
use bao_image::Error;

#[test]
fn test_rfc8032_ed25519ph_vector() {
    let secret_key = hex::decode(rfc8032::SECRET_KEY).unwrap();
    let public_key = hex::decode(rfc8032::PUBLIC_KEY).unwrap();
    let message = hex::decode(rfc8032::MESSAGE).unwrap();

    let signature = Ed25519ph.sign(&secret_key, &public_key, &message).unwrap();

    assert_eq!(
        hex::encode(signature),
        "98a70222f0b8121aa9d30f813d683f809e462b469c7ff87639499bb94e6dae41\
         31f85042463c2a355a2003d062adf5aaa10b8c61e636062aaad11c2a26083406"
    );
    Ed25519ph.verify(&public_key, &message, &signature).unwrap();
}

#[test]
fn test_self_test() {
    ed25519ph::self_test(&Ed25519ph).unwrap();
}

#[test]
fn test_signing_is_deterministic() {
    let secret_key = bao_image::devkey::dev_secret_key().unwrap();
    let public_key = bao_image::pubkey::DEV_KEY.key;
    let a = Ed25519ph.sign(&secret_key, &public_key, b"same input").unwrap();
    let b = Ed25519ph.sign(&secret_key, &public_key, b"same input").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_verify_with_wrong_key_fails() {
    let secret_key = bao_image::devkey::dev_secret_key().unwrap();
    let signature = Ed25519ph
        .sign(&secret_key, &bao_image::pubkey::DEV_KEY.key, b"msg")
        .unwrap();
    let err = Ed25519ph
        .verify(&bao_image::pubkey::BETA_KEY.key, b"msg", &signature)
        .unwrap_err();
    assert!(matches!(err, Error::Verification));
}
