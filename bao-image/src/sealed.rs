//! The sealed data envelope: fixed metadata header, zero padding and the
//! opaque firmware payload. Its serialized bytes are the message that gets
//! signed.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::config::ImageOptions;
use crate::pubkey::{self, PUBKEY_TABLE_LEN};
use crate::signed::SBLOB_LEN;

/// Length of the whole signature block: signed blob header plus sealed header.
pub const SIGBLOCK_LEN: usize = 768;

/// Version word of the signature record.
pub const SEALED_VERSION: u32 = 0x0100;

/// Human readable spelling of the magic.
pub const MAGIC_ASCII: &[u8; 8] = b"yumyBao3";

/// The magic as it appears on the wire: each 4-byte half of
/// [`MAGIC_ASCII`] is read big endian and written back little endian, so the
/// bytes land reversed as `ymuy3oaB`. The bootloader expects exactly this.
pub const MAGIC_WIRE: &[u8; 8] = b"ymuy3oaB";

pub const SEMVER_LEN: usize = 16;

/// Fixed fields: six u32 words, two semvers and the key table.
pub const FIELDS_LEN: usize = 4 * 6 + SEMVER_LEN * 2 + PUBKEY_TABLE_LEN;

/// Zero padding between the fixed fields and the payload.
pub const PAD_LEN: usize = SIGBLOCK_LEN - SBLOB_LEN - FIELDS_LEN;

/// Everything in front of the payload.
pub const SEALED_HEADER_LEN: usize = FIELDS_LEN + PAD_LEN;

const _: () = assert!(FIELDS_LEN == 200);
const _: () = assert!(PAD_LEN == 436);
const _: () = assert!(SEALED_HEADER_LEN == SIGBLOCK_LEN - SBLOB_LEN);

/// Role codes understood by the bootloader.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCode {
    Invalid = 0,
    Boot0 = 1,
    Boot1 = 2,
    UpdatedBoot1 = 3,
    Loader = 4,
    UpdatedLoader = 5,
    Baremetal = 6,
    UpdatedBaremetal = 7,
    Kernel = 0x1_00,
    UpdatedKernel = 0x1_01,
    App = 0x10_0000,
    UpdatedApp = 0x10_0001,
    Developer = 0x1000_0000,
}

impl From<FunctionCode> for u32 {
    fn from(code: FunctionCode) -> u32 {
        code as u32
    }
}

/// The magic as the two u32 words stored in the record.
pub fn magic_words() -> [u32; 2] {
    [
        BigEndian::read_u32(&MAGIC_ASCII[0..4]),
        BigEndian::read_u32(&MAGIC_ASCII[4..8]),
    ]
}

/// Metadata envelope around a firmware payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedData {
    pub version: u32,
    pub magic: [u32; 2],
    pub signed_len: u32,
    pub function_code: u32,
    pub reserved: u32,
    pub min_semver: [u8; SEMVER_LEN],
    pub semver: [u8; SEMVER_LEN],
    pub pubkeys: [u8; PUBKEY_TABLE_LEN],
    pub payload: Vec<u8>,
}

impl SealedData {
    pub fn new(payload: &[u8], options: &ImageOptions) -> Self {
        // The field is a u32 on the wire; images never approach 4 GiB.
        let signed_len = (SIGBLOCK_LEN - SBLOB_LEN + payload.len()) as u32;
        Self {
            version: SEALED_VERSION,
            magic: magic_words(),
            signed_len,
            function_code: options.function_code,
            reserved: 0,
            min_semver: options.min_semver,
            semver: options.semver,
            pubkeys: pubkey::table_bytes(),
            payload: payload.to_vec(),
        }
    }

    /// The 200 fixed bytes in front of the padding.
    pub fn fields_bytes(&self) -> [u8; FIELDS_LEN] {
        let mut buf = [0u8; FIELDS_LEN];
        let words = [
            self.version,
            self.magic[0],
            self.magic[1],
            self.signed_len,
            self.function_code,
            self.reserved,
        ];
        LittleEndian::write_u32_into(&words, &mut buf[..24]);
        buf[24..40].copy_from_slice(&self.min_semver);
        buf[40..56].copy_from_slice(&self.semver);
        buf[56..].copy_from_slice(&self.pubkeys);
        buf
    }

    /// Serialize the fixed fields, padding and payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SEALED_HEADER_LEN + self.payload.len());
        buf.extend_from_slice(&self.fields_bytes());
        buf.resize(SEALED_HEADER_LEN, 0);
        buf.extend_from_slice(&self.payload);
        debug_assert_eq!(buf.len(), self.signed_len as usize);
        buf
    }
}

/// Build and serialize the sealed data for `payload` in one step.
pub fn build_sealed_data(payload: &[u8], options: &ImageOptions) -> Vec<u8> {
    SealedData::new(payload, options).to_bytes()
}
