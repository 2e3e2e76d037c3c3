//! Decoding of the fixed-size WOFF2 container header.

use skrifa::raw::{types::Tag, FontData, ReadError};

/// The `wOF2` signature tag every WOFF2 file starts with.
pub const SIGNATURE: Tag = Tag::new(b"wOF2");

/// Size in bytes of the fixed portion of a WOFF2 file.
pub const HEADER_SIZE: usize = 48;

/// Reasons a header fails to decode.
#[derive(Clone, Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("expected at least {HEADER_SIZE} bytes, found {0}")]
    TooShort(usize),
    #[error("bad signature 0x{:08X} (expected wOF2)", u32::from_be_bytes(.0.to_be_bytes()))]
    BadSignature(Tag),
    #[error("unreadable header field: {0}")]
    Field(#[from] ReadError),
}

/// The WOFF2 container header.
///
/// All multi-byte fields are big-endian. The `reserved` field is decoded
/// for reporting but never validated; only the signature is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Woff2Header {
    pub signature: Tag,
    pub flavor: Tag,
    pub length: u32,
    pub num_tables: u16,
    pub reserved: u16,
    pub total_sfnt_size: u32,
    pub total_compressed_size: u32,
    pub major_version: u16,
    pub minor_version: u16,
    pub meta_offset: u32,
    pub meta_length: u32,
    pub meta_orig_length: u32,
    pub priv_offset: u32,
    pub priv_length: u32,
}

impl Woff2Header {
    /// Decodes a header from the start of `bytes`.
    ///
    /// This is a pure decode: no bytes beyond the first 48 are inspected.
    pub fn read(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_SIZE {
            return Err(HeaderError::TooShort(bytes.len()));
        }
        let data = FontData::new(&bytes[..HEADER_SIZE]);
        let signature: Tag = data.read_at(0)?;
        if signature != SIGNATURE {
            return Err(HeaderError::BadSignature(signature));
        }
        Ok(Woff2Header {
            signature,
            flavor: data.read_at(4)?,
            length: data.read_at(8)?,
            num_tables: data.read_at(12)?,
            reserved: data.read_at(14)?,
            total_sfnt_size: data.read_at(16)?,
            total_compressed_size: data.read_at(20)?,
            major_version: data.read_at(24)?,
            minor_version: data.read_at(26)?,
            meta_offset: data.read_at(28)?,
            meta_length: data.read_at(32)?,
            meta_orig_length: data.read_at(36)?,
            priv_offset: data.read_at(40)?,
            priv_length: data.read_at(44)?,
        })
    }
}

impl std::fmt::Display for Woff2Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  signature: {}", self.signature)?;
        writeln!(
            f,
            "  flavor: 0x{:08X}",
            u32::from_be_bytes(self.flavor.to_be_bytes())
        )?;
        writeln!(f, "  length: {}", self.length)?;
        writeln!(f, "  numTables: {}", self.num_tables)?;
        writeln!(f, "  reserved: {}", self.reserved)?;
        writeln!(f, "  totalSfntSize: {}", self.total_sfnt_size)?;
        writeln!(f, "  totalCompressedSize: {}", self.total_compressed_size)?;
        writeln!(
            f,
            "  version: {}.{}",
            self.major_version, self.minor_version
        )
    }
}
