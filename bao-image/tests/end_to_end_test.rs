//! Sign then pack a small payload with the development key and release
//! semvers, and compare against reference output bytes.

use bao_image::uf2::{self, UF2_BLOCK_LEN};
use bao_image::{
    devkey, ed25519ph, seal_firmware, Ed25519ph, ImageOptions, BAOCHIP_1X_UF2_FAMILY,
    BAREMETAL_START, SIGBLOCK_LEN,
};
use sha2::{Digest, Sha256};

fn payload() -> Vec<u8> {
    [1u8, 2, 3].repeat(100)
}

fn signed_image() -> Vec<u8> {
    ed25519ph::self_test(&Ed25519ph).unwrap();
    let sk = devkey::dev_secret_key().unwrap();
    seal_firmware(&Ed25519ph, &sk, &payload(), &ImageOptions::release()).unwrap()
}

#[test]
fn test_signed_image_matches_reference() {
    let image = signed_image();
    assert_eq!(image.len(), SIGBLOCK_LEN + 300);
    assert_eq!(
        hex::encode(&image[4..68]),
        "20c6f59bc644ccc0d8e7e6b54828279794aa76b2c73f15f921c7f8150fe4ace3\
         a483b453fc6b6cbd42369db87eb2002b3025b6206edce72ab3f4665e03814205"
    );
    assert_eq!(
        hex::encode(Sha256::digest(&image)),
        "30556dcbcb65f6960eb65f2cecd75b8ec08b5b274bf3953ab24698c41b7a4326"
    );
}

#[test]
fn test_uf2_stream_matches_reference() {
    let image = signed_image();
    let stream = uf2::pack(&image, BAOCHIP_1X_UF2_FAMILY, BAREMETAL_START);

    assert_eq!(stream.len(), 5 * UF2_BLOCK_LEN);
    assert_eq!(
        hex::encode(Sha256::digest(&stream)),
        "da5bf6ca27e27fc0e2aafcf07d7cfa0e4a0f4a8222a70f0508b06ba05ee39e04"
    );

    let blocks = uf2::parse(&stream).unwrap();
    assert_eq!(blocks.len(), 5);
    assert_eq!(blocks[0].target_addr, 0x6006_0000);
    assert_eq!(blocks[4].target_addr, 0x6006_0400);
    assert!(blocks.iter().all(|b| b.family_id == 0xa7d7_6373 && b.num_blocks == 5));

    // 1068 bytes of image: the last block holds 44 real bytes.
    assert_eq!(&blocks[4].data[..44], &image[1024..]);
    assert!(blocks[4].data[44..].iter().all(|b| *b == 0));
}

#[test]
fn test_resigning_signed_output_is_stable() {
    let image = signed_image();
    let sk = devkey::dev_secret_key().unwrap();
    let again = seal_firmware(&Ed25519ph, &sk, &image, &ImageOptions::release()).unwrap();
    assert_eq!(again, image);
    assert_eq!(&again[SIGBLOCK_LEN..], &payload()[..]);
}
