//! Compression framings observed in export payloads.

use std::fmt;
use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use tracing::debug;

use crate::{Error, Result};

/// How a deflate stream is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framing {
    /// Deflate with a zlib header and Adler-32 trailer (window bits 15).
    Zlib,
    /// Bare deflate stream without header or trailer (window bits -15).
    RawDeflate,
    /// Deflate inside a gzip member (window bits 31).
    Gzip,
}

impl Framing {
    /// Framings in the order they are attempted.
    pub const ALL: [Framing; 3] = [Framing::Zlib, Framing::RawDeflate, Framing::Gzip];

    /// The zlib window-bits value that selects this framing.
    pub const fn window_bits(self) -> i8 {
        match self {
            Framing::Zlib => 15,
            Framing::RawDeflate => -15,
            Framing::Gzip => 31,
        }
    }

    /// Inflate `data` assuming this framing.
    pub fn decompress(self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() * 4);
        match self {
            Framing::Zlib => ZlibDecoder::new(data).read_to_end(&mut output)?,
            Framing::RawDeflate => DeflateDecoder::new(data).read_to_end(&mut output)?,
            Framing::Gzip => GzDecoder::new(data).read_to_end(&mut output)?,
        };
        Ok(output)
    }

    /// Deflate `data` with this framing.
    pub fn compress(self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            Framing::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            Framing::RawDeflate => {
                let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            Framing::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Framing::Zlib => "zlib",
            Framing::RawDeflate => "raw-deflate",
            Framing::Gzip => "gzip",
        };
        write!(f, "{} (wbits={})", name, self.window_bits())
    }
}

/// Inflate `data`, trying each framing in [`Framing::ALL`] order.
///
/// The first framing that succeeds wins. Fails only when all of them fail.
pub fn decompress_any(data: &[u8]) -> Result<(Vec<u8>, Framing)> {
    let mut attempts = Vec::with_capacity(Framing::ALL.len());

    for framing in Framing::ALL {
        match framing.decompress(data) {
            Ok(output) => {
                debug!(%framing, bytes = output.len(), "payload inflated");
                return Ok((output, framing));
            }
            Err(e) => {
                debug!(%framing, error = %e, "framing rejected");
                attempts.push(format!("{}: {}", framing, e));
            }
        }
    }

    Err(Error::Decompression {
        attempts: attempts.join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"<PathOfBuilding2><Build level=\"90\"/></PathOfBuilding2>";

    #[test]
    fn test_each_framing_roundtrip() {
        for framing in Framing::ALL {
            let compressed = framing.compress(SAMPLE).unwrap();
            let (output, detected) = decompress_any(&compressed).unwrap();
            assert_eq!(output, SAMPLE);
            assert_eq!(detected, framing);
        }
    }

    #[test]
    fn test_zlib_rejects_raw_stream() {
        let compressed = Framing::RawDeflate.compress(SAMPLE).unwrap();
        assert!(Framing::Zlib.decompress(&compressed).is_err());
    }

    #[test]
    fn test_garbage_exhausts_all_framings() {
        let garbage = [0xffu8, 0xff, 0xff, 0xff, 0x00, 0x13];
        match decompress_any(&garbage) {
            Err(Error::Decompression { attempts }) => {
                assert!(attempts.contains("zlib"));
                assert!(attempts.contains("raw-deflate"));
                assert!(attempts.contains("gzip"));
            }
            other => panic!("expected decompression error, got {:?}", other),
        }
    }
}
