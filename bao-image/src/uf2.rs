//! UF2 block packing.
//!
//! A UF2 stream is a sequence of self-describing 512-byte blocks. Every block
//! here carries 256 bytes of payload; the rest of its data area is padding.

use byteorder::{ByteOrder, LittleEndian};

pub const UF2_MAGIC_START0: u32 = 0x0A32_4655; // "UF2\n"
pub const UF2_MAGIC_START1: u32 = 0x9E5D_5157;
pub const UF2_MAGIC_END: u32 = 0x0AB1_6F30;

pub const UF2_FLAG_FAMILY_ID_PRESENT: u32 = 0x0000_2000;

pub const UF2_BLOCK_LEN: usize = 512;
pub const UF2_HEADER_LEN: usize = 32;
pub const UF2_PAYLOAD_LEN: usize = 256;

/// Padding between the payload and the trailing magic.
pub const UF2_PAD_LEN: usize = UF2_BLOCK_LEN - UF2_HEADER_LEN - UF2_PAYLOAD_LEN - 4;

const _: () = assert!(UF2_PAD_LEN == 220);

const DATA_OFFSET: usize = UF2_HEADER_LEN;
const END_OFFSET: usize = UF2_BLOCK_LEN - 4;

/// One 512-byte UF2 block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uf2Block {
    pub flags: u32,
    pub target_addr: u32,
    pub payload_len: u32,
    pub block_no: u32,
    pub num_blocks: u32,
    pub family_id: u32,
    pub data: [u8; UF2_PAYLOAD_LEN],
}

impl Uf2Block {
    pub fn to_bytes(&self) -> [u8; UF2_BLOCK_LEN] {
        let mut buf = [0u8; UF2_BLOCK_LEN];
        let header = [
            UF2_MAGIC_START0,
            UF2_MAGIC_START1,
            self.flags,
            self.target_addr,
            self.payload_len,
            self.block_no,
            self.num_blocks,
            self.family_id,
        ];
        LittleEndian::write_u32_into(&header, &mut buf[..UF2_HEADER_LEN]);
        buf[DATA_OFFSET..DATA_OFFSET + UF2_PAYLOAD_LEN].copy_from_slice(&self.data);
        LittleEndian::write_u32(&mut buf[END_OFFSET..], UF2_MAGIC_END);
        buf
    }

    /// Parse a block, returning `None` if any magic is wrong or the payload
    /// length does not fit the data area.
    pub fn from_bytes(buf: &[u8; UF2_BLOCK_LEN]) -> Option<Self> {
        let mut header = [0u32; 8];
        LittleEndian::read_u32_into(&buf[..UF2_HEADER_LEN], &mut header);
        let magic_end = LittleEndian::read_u32(&buf[END_OFFSET..]);
        if header[0] != UF2_MAGIC_START0
            || header[1] != UF2_MAGIC_START1
            || magic_end != UF2_MAGIC_END
            || header[4] as usize > UF2_PAYLOAD_LEN
        {
            return None;
        }

        let mut data = [0u8; UF2_PAYLOAD_LEN];
        data.copy_from_slice(&buf[DATA_OFFSET..DATA_OFFSET + UF2_PAYLOAD_LEN]);
        Some(Self {
            flags: header[2],
            target_addr: header[3],
            payload_len: header[4],
            block_no: header[5],
            num_blocks: header[6],
            family_id: header[7],
            data,
        })
    }
}

/// Number of blocks needed for `len` bytes.
pub fn block_count(len: usize) -> usize {
    len.div_ceil(UF2_PAYLOAD_LEN)
}

/// Split `data` into blocks addressed from `base_address`. The final block
/// is zero padded.
pub fn blocks(
    data: &[u8],
    family_id: u32,
    base_address: u32,
) -> impl Iterator<Item = Uf2Block> + '_ {
    let num_blocks = block_count(data.len()) as u32;
    let flags = if family_id != 0 {
        UF2_FLAG_FAMILY_ID_PRESENT
    } else {
        0
    };

    data.chunks(UF2_PAYLOAD_LEN)
        .enumerate()
        .map(move |(block_no, chunk)| {
            let mut payload = [0u8; UF2_PAYLOAD_LEN];
            payload[..chunk.len()].copy_from_slice(chunk);
            let offset = (block_no * UF2_PAYLOAD_LEN) as u32;
            Uf2Block {
                flags,
                target_addr: base_address.wrapping_add(offset),
                payload_len: UF2_PAYLOAD_LEN as u32,
                block_no: block_no as u32,
                num_blocks,
                family_id,
                data: payload,
            }
        })
}

/// Pack `data` into a UF2 byte stream.
pub fn pack(data: &[u8], family_id: u32, base_address: u32) -> Vec<u8> {
    log::debug!("uf2ify data is {} bytes", data.len());
    let mut out = Vec::with_capacity(block_count(data.len()) * UF2_BLOCK_LEN);
    for block in blocks(data, family_id, base_address) {
        out.extend_from_slice(&block.to_bytes());
    }
    out
}

/// Parse a UF2 stream back into blocks. Returns `None` on a trailing
/// partial block or a bad block.
pub fn parse(stream: &[u8]) -> Option<Vec<Uf2Block>> {
    if stream.len() % UF2_BLOCK_LEN != 0 {
        return None;
    }
    stream
        .chunks_exact(UF2_BLOCK_LEN)
        .map(|chunk| {
            <&[u8; UF2_BLOCK_LEN]>::try_from(chunk)
                .ok()
                .and_then(Uf2Block::from_bytes)
        })
        .collect()
}

/// Concatenate the payloads of `blocks` in block order.
pub fn unpack(blocks: &[Uf2Block]) -> Vec<u8> {
    let mut ordered: Vec<&Uf2Block> = blocks.iter().collect();
    ordered.sort_by_key(|b| b.block_no);
    ordered
        .into_iter()
        .flat_map(|b| {
            let len = (b.payload_len as usize).min(UF2_PAYLOAD_LEN);
            b.data[..len].iter().copied()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_blocks() {
        assert!(pack(&[], 0x1234, 0).is_empty());
        assert_eq!(block_count(0), 0);
    }

    #[test]
    fn test_single_byte_layout() {
        let stream = pack(&[0xaa], 0xa7d7_6373, 0x6006_0000);
        assert_eq!(stream.len(), UF2_BLOCK_LEN);
        assert_eq!(&stream[0..4], &[0x55, 0x46, 0x32, 0x0a]);
        assert_eq!(LittleEndian::read_u32(&stream[8..12]), UF2_FLAG_FAMILY_ID_PRESENT);
        assert_eq!(LittleEndian::read_u32(&stream[12..16]), 0x6006_0000);
        assert_eq!(LittleEndian::read_u32(&stream[16..20]), 256);
        assert_eq!(LittleEndian::read_u32(&stream[28..32]), 0xa7d7_6373);
        assert_eq!(stream[32], 0xaa);
        assert!(stream[33..END_OFFSET].iter().all(|b| *b == 0));
        assert_eq!(&stream[END_OFFSET..], &[0x30, 0x6f, 0xb1, 0x0a]);
    }

    #[test]
    fn test_zero_family_clears_flags() {
        let block = blocks(&[1, 2, 3], 0, 0).next().unwrap();
        assert_eq!(block.flags, 0);
        assert_eq!(block.family_id, 0);
    }

    #[test]
    fn test_from_bytes_rejects_bad_magic() {
        let mut raw = blocks(&[9; 10], 1, 0).next().unwrap().to_bytes();
        assert!(Uf2Block::from_bytes(&raw).is_some());
        raw[END_OFFSET] ^= 0xff;
        assert!(Uf2Block::from_bytes(&raw).is_none());
    }

    #[test]
    fn test_unpack_clamps_oversized_payload_len() {
        let mut block = blocks(&[7; 256], 1, 0).next().unwrap();
        block.payload_len = 300;
        assert_eq!(unpack(&[block]), vec![7u8; UF2_PAYLOAD_LEN]);
    }

    #[test]
    fn test_parse_rejects_partial_block() {
        let stream = pack(&[0u8; 300], 1, 0);
        assert!(parse(&stream[..UF2_BLOCK_LEN + 1]).is_none());
        assert_eq!(parse(&stream).unwrap().len(), 2);
    }
}
