//! Byte-Stream Transform Module
//!
//! Reversible encoding applied uniformly to every artifact read and write.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

// == Byte Transform ==
/// Transform applied to artifact bytes on their way to and from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteTransform {
    /// Bytes pass through untouched.
    Identity,
    /// Bytes are gzip-compressed on write and decompressed on read.
    Gzip,
}

impl ByteTransform {
    // == Encode ==
    /// Encodes `bytes` for storage.
    pub fn encode(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Self::Identity => Ok(bytes.to_vec()),
            Self::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(bytes)?;
                encoder.finish()
            }
        }
    }

    // == Decode ==
    /// Decodes stored bytes back to their original form.
    pub fn decode(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Self::Identity => Ok(bytes.to_vec()),
            Self::Gzip => {
                let mut out = Vec::new();
                GzDecoder::new(bytes).read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }
}
