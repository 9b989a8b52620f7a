//! Codec for Path of Building export strings.
//!
//! An export string is an XML document, deflated, then encoded with the
//! URL-safe base64 alphabet. The deflate framing is not fixed: exports have
//! been seen as zlib streams, bare deflate streams and gzip members, so
//! decoding tries each in turn (see [`Framing::ALL`]).
//!
//! # Example
//!
//! ```
//! use pobx_codec::{decode, encode, Framing};
//!
//! let xml = r#"<PathOfBuilding2><Build level="90"/></PathOfBuilding2>"#;
//! let export = encode(xml, Framing::Zlib)?;
//! assert_eq!(decode(&export)?, xml);
//! # Ok::<(), pobx_codec::Error>(())
//! ```

mod error;
mod framing;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use tracing::debug;

pub use error::{Error, Result};
pub use framing::{decompress_any, Framing};

/// Standard-alphabet engine that accepts input with or without padding.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Map the URL-safe alphabet onto the standard one (`-` to `+`, `_` to `/`).
///
/// ASCII whitespace is dropped so wrapped or pasted exports still decode.
pub fn normalize_alphabet(export: &str) -> String {
    export
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect()
}

/// Decode an export string to its base64 payload bytes (still compressed).
pub fn decode_base64(export: &str) -> Result<Vec<u8>> {
    Ok(STANDARD_LENIENT.decode(normalize_alphabet(export))?)
}

/// Decode an export string to XML text.
///
/// Fails with [`Error::Decode`] on bad base64, [`Error::Decompression`] when
/// no framing inflates the payload, and [`Error::Encoding`] when the result
/// is not UTF-8.
pub fn decode(export: &str) -> Result<String> {
    let payload = decode_base64(export)?;
    let (inflated, framing) = decompress_any(&payload)?;
    debug!(%framing, payload = payload.len(), xml = inflated.len(), "export decoded");
    Ok(String::from_utf8(inflated)?)
}

/// Encode XML text as an export string using the given framing.
pub fn encode(xml: &str, framing: Framing) -> Result<String> {
    let compressed = framing.compress(xml.as_bytes())?;
    Ok(URL_SAFE.encode(compressed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<PathOfBuilding2><Build level="90" className="Warrior" ascendClassName="Juggernaut"/></PathOfBuilding2>"#;

    #[test]
    fn test_roundtrip_every_framing() {
        for framing in Framing::ALL {
            let export = encode(XML, framing).unwrap();
            assert_eq!(decode(&export).unwrap(), XML, "framing {}", framing);
        }
    }

    #[test]
    fn test_normalize_alphabet() {
        assert_eq!(normalize_alphabet("ab-_cd"), "ab+/cd");
        assert_eq!(normalize_alphabet(" ab\r\ncd \n"), "abcd");
    }

    #[test]
    fn test_unpadded_export_decodes() {
        let export = encode(XML, Framing::Zlib).unwrap();
        let unpadded = export.trim_end_matches('=');
        assert_eq!(decode(unpadded).unwrap(), XML);
    }

    #[test]
    fn test_standard_alphabet_is_accepted() {
        let compressed = Framing::Zlib.compress(XML.as_bytes()).unwrap();
        let export = base64::engine::general_purpose::STANDARD.encode(compressed);
        assert_eq!(decode(&export).unwrap(), XML);
    }

    #[test]
    fn test_malformed_base64() {
        assert!(matches!(decode("not*base64!"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_valid_base64_invalid_deflate() {
        let export = URL_SAFE.encode(b"plain text, not deflated");
        assert!(matches!(decode(&export), Err(Error::Decompression { .. })));
    }

    #[test]
    fn test_invalid_utf8_payload() {
        let compressed = Framing::Zlib.compress(&[0xc3, 0x28, 0xa0, 0xa1]).unwrap();
        let export = URL_SAFE.encode(compressed);
        assert!(matches!(decode(&export), Err(Error::Encoding(_))));
    }
}
