//! Detection of images that already carry a signature block.
//!
//! This is byte-pattern sniffing, not authentication: a crafted or unlucky
//! payload can look wrapped. Nothing here checks the old signature.

use crate::sealed::{MAGIC_WIRE, SIGBLOCK_LEN};
use crate::signed::{JAL_X0, SBLOB_LEN};

/// Offset of the sealed magic within a signed image.
pub const MAGIC_OFFSET: usize = SBLOB_LEN + 4;

const _: () = assert!(MAGIC_OFFSET == 0x88);

/// True when `image` starts with the signed blob jump instruction and has
/// the sealed magic at offset 0x88. Both must match.
pub fn is_wrapped(image: &[u8]) -> bool {
    let starts_with_jal = image.get(0..4) == Some(&JAL_X0.to_le_bytes()[..]);
    let matches_magic =
        image.get(MAGIC_OFFSET..MAGIC_OFFSET + MAGIC_WIRE.len()) == Some(&MAGIC_WIRE[..]);
    starts_with_jal && matches_magic
}

/// The payload to seal: `image` minus its signature block when it already
/// has one, otherwise all of `image`.
pub fn strip_envelope(image: &[u8]) -> &[u8] {
    if is_wrapped(image) {
        log::info!("slicing {} header bytes off the input file", SIGBLOCK_LEN);
        image.get(SIGBLOCK_LEN..).unwrap_or_default()
    } else {
        image
    }
}
