//! Content decoding for response bodies.
//!
//! Mirrors the role of Chromium's `FilterSourceStream`: undo the
//! `Content-Encoding` of a body, and turn bytes into text.

use crate::base::neterror::NetError;
use flate2::read::{MultiGzDecoder, ZlibDecoder};
use std::borrow::Cow;
use std::io::Read;

/// Supported `Content-Encoding` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
    Deflate,
}

impl ContentEncoding {
    /// Map a `Content-Encoding` header value. `None` means no header.
    pub fn from_header(value: Option<&str>) -> Result<Self, NetError> {
        let Some(value) = value else {
            return Ok(ContentEncoding::Identity);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "identity" => Ok(ContentEncoding::Identity),
            "gzip" | "x-gzip" => Ok(ContentEncoding::Gzip),
            "deflate" => Ok(ContentEncoding::Deflate),
            _ => Err(NetError::UnsupportedContentEncoding(value.to_string())),
        }
    }
}

/// Undo `encoding` on `body`. Identity borrows the input unchanged.
pub fn decompress(encoding: ContentEncoding, body: &[u8]) -> Result<Cow<'_, [u8]>, NetError> {
    let mut decoded = Vec::new();
    let result = match encoding {
        ContentEncoding::Identity => return Ok(Cow::Borrowed(body)),
        ContentEncoding::Gzip => MultiGzDecoder::new(body).read_to_end(&mut decoded),
        ContentEncoding::Deflate => ZlibDecoder::new(body).read_to_end(&mut decoded),
    };
    result.map_err(|e| {
        tracing::debug!(?encoding, error = %e, "content decoding failed");
        NetError::ContentDecodingFailed
    })?;
    Ok(Cow::Owned(decoded))
}

/// What to do with byte sequences that are invalid in the chosen encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeErrors {
    /// Fail with [`NetError::InvalidText`].
    #[default]
    Strict,
    /// Substitute U+FFFD REPLACEMENT CHARACTER.
    Replace,
}

/// Decode `bytes` as text in the encoding named by `label`
/// (any WHATWG label: `utf-8`, `latin1`, `gbk`, `shift_jis`, ...).
pub fn decode_text(bytes: &[u8], label: &str, errors: DecodeErrors) -> Result<String, NetError> {
    let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| NetError::UnknownEncoding(label.to_string()))?;
    match errors {
        DecodeErrors::Strict => encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
            .ok_or(NetError::InvalidText),
        DecodeErrors::Replace => {
            let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
            Ok(text.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_from_header() {
        assert_eq!(
            ContentEncoding::from_header(None).unwrap(),
            ContentEncoding::Identity
        );
        assert_eq!(
            ContentEncoding::from_header(Some("GZIP")).unwrap(),
            ContentEncoding::Gzip
        );
        assert_eq!(
            ContentEncoding::from_header(Some("deflate")).unwrap(),
            ContentEncoding::Deflate
        );
        assert!(matches!(
            ContentEncoding::from_header(Some("br")),
            Err(NetError::UnsupportedContentEncoding(v)) if v == "br"
        ));
    }

    #[test]
    fn test_gzip_roundtrip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"hello gzip").unwrap();
        let encoded = encoder.finish().unwrap();

        let decoded = decompress(ContentEncoding::Gzip, &encoded).unwrap();
        assert_eq!(&decoded[..], b"hello gzip");
    }

    #[test]
    fn test_deflate_roundtrip() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"hello deflate").unwrap();
        let encoded = encoder.finish().unwrap();

        let decoded = decompress(ContentEncoding::Deflate, &encoded).unwrap();
        assert_eq!(&decoded[..], b"hello deflate");
    }

    #[test]
    fn test_identity_borrows() {
        let decoded = decompress(ContentEncoding::Identity, b"raw").unwrap();
        assert!(matches!(decoded, Cow::Borrowed(b"raw")));
    }

    #[test]
    fn test_corrupt_gzip() {
        let err = decompress(ContentEncoding::Gzip, b"not gzip at all").unwrap_err();
        assert!(matches!(err, NetError::ContentDecodingFailed));
    }

    #[test]
    fn test_decode_text_encodings() {
        assert_eq!(
            decode_text("héllo".as_bytes(), "utf-8", DecodeErrors::Strict).unwrap(),
            "héllo"
        );
        // 0xE9 is 'é' in windows-1252
        assert_eq!(
            decode_text(b"caf\xe9", "latin1", DecodeErrors::Strict).unwrap(),
            "café"
        );
    }

    #[test]
    fn test_decode_text_error_policy() {
        let bytes = b"ok\xffok";
        assert!(matches!(
            decode_text(bytes, "utf-8", DecodeErrors::Strict),
            Err(NetError::InvalidText)
        ));
        assert_eq!(
            decode_text(bytes, "utf-8", DecodeErrors::Replace).unwrap(),
            "ok\u{fffd}ok"
        );
    }

    #[test]
    fn test_unknown_label() {
        assert!(matches!(
            decode_text(b"x", "klingon", DecodeErrors::Strict),
            Err(NetError::UnknownEncoding(_))
        ));
    }
}
