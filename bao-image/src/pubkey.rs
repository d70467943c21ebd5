//! Public keys baked into every sealed envelope.
//!
//! The bootloader selects which of these keys validates an image, so the
//! table order and the exact 36-byte encoding of each entry are part of the
//! boot contract.

/// Length of an ed25519 public key.
pub const PUBKEY_LEN: usize = 32;

/// Length of a role tag.
pub const TAG_LEN: usize = 4;

/// Serialized length of one table entry: key followed by tag.
pub const PUBKEY_ENTRY_LEN: usize = PUBKEY_LEN + TAG_LEN;

/// Serialized length of the whole table.
pub const PUBKEY_TABLE_LEN: usize = PUBKEY_ENTRY_LEN * PUBKEYS.len();

/// An ed25519 public key paired with a 4-byte ASCII role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pubkey {
    pub key: [u8; PUBKEY_LEN],
    pub tag: [u8; TAG_LEN],
}

impl Pubkey {
    pub const fn new(key: [u8; PUBKEY_LEN], tag: [u8; TAG_LEN]) -> Self {
        Self { key, tag }
    }

    pub fn to_bytes(&self) -> [u8; PUBKEY_ENTRY_LEN] {
        let mut buf = [0u8; PUBKEY_ENTRY_LEN];
        buf[..PUBKEY_LEN].copy_from_slice(&self.key);
        buf[PUBKEY_LEN..].copy_from_slice(&self.tag);
        buf
    }

    /// Printable form of the tag. The null key's tag renders as an empty string.
    pub fn tag_str(&self) -> &str {
        core::str::from_utf8(&self.tag)
            .map(|s| s.trim_end_matches('\0'))
            .unwrap_or("?")
    }
}

/// Unused slot.
pub const NULL_KEY: Pubkey = Pubkey::new([0u8; PUBKEY_LEN], [0u8; TAG_LEN]);

/// Production release key.
pub const BAO2_KEY: Pubkey = Pubkey::new(
    [
        0x79, 0x13, 0x5d, 0xc6, 0x67, 0xaf, 0xf4, 0xf7, 0xd3, 0x52, 0xb9, 0x03, 0x28, 0x78, 0x8e,
        0xbf, 0x92, 0xc7, 0x86, 0x78, 0x21, 0x38, 0xb3, 0x77, 0x37, 0x0b, 0x15, 0x19, 0x4e, 0x31,
        0x28, 0x88,
    ],
    *b"bao2",
);

/// Beta release key.
pub const BETA_KEY: Pubkey = Pubkey::new(
    [
        0x80, 0x97, 0x99, 0x29, 0xed, 0xd0, 0x4e, 0x40, 0x12, 0x4b, 0x52, 0xca, 0xe9, 0xae, 0x54,
        0xb2, 0x4b, 0xdf, 0xf7, 0x2a, 0x7b, 0x8a, 0x00, 0x4c, 0x41, 0x06, 0x5b, 0xd1, 0x40, 0x20,
        0x78, 0xa7,
    ],
    *b"beta",
);

/// Development key. Its secret half is public, see [`crate::devkey`].
///
/// The tag is space padded, not null padded.
pub const DEV_KEY: Pubkey = Pubkey::new(
    [
        0x1c, 0x9b, 0xea, 0xe3, 0x2a, 0xea, 0xc8, 0x75, 0x07, 0xc1, 0x80, 0x94, 0x38, 0x7e, 0xff,
        0x1c, 0x74, 0x61, 0x42, 0x82, 0xaf, 0xfd, 0x81, 0x52, 0xd8, 0x71, 0x35, 0x2e, 0xdf, 0x3f,
        0x58, 0xbb,
    ],
    *b"dev ",
);

/// Key table in bootloader slot order.
pub const PUBKEYS: [Pubkey; 4] = [NULL_KEY, BAO2_KEY, BETA_KEY, DEV_KEY];

/// Concatenation of every table entry in slot order.
pub fn table_bytes() -> [u8; PUBKEY_TABLE_LEN] {
    let mut buf = [0u8; PUBKEY_TABLE_LEN];
    for (slot, pk) in buf.chunks_exact_mut(PUBKEY_ENTRY_LEN).zip(PUBKEYS.iter()) {
        slot.copy_from_slice(&pk.to_bytes());
    }
    buf
}
