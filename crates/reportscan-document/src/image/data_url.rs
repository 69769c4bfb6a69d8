// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `data:` URL handling for images passed between the capture UI and the
// scanner. Only base64 payloads are accepted; that is what browser canvases
// and file readers produce.

use base64::{Engine, engine::general_purpose};
use reportscan_core::error::{ReportscanError, Result};

/// A decoded data URL: declared media type and raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Parse `data:<mime>[;params];base64,<payload>`.
///
/// Whitespace inside the payload is ignored. A missing media type defaults to
/// `text/plain`, as in RFC 2397.
pub fn decode_data_url(url: &str) -> Result<DataUrl> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| ReportscanError::DataUrl("missing `data:` scheme".into()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ReportscanError::DataUrl("missing `,` before payload".into()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(ReportscanError::DataUrl(
            "only base64-encoded payloads are supported".into(),
        ));
    }

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| ReportscanError::DataUrl(format!("invalid base64 payload: {}", err)))?;

    Ok(DataUrl {
        mime: if mime.is_empty() {
            "text/plain".to_string()
        } else {
            mime.to_ascii_lowercase()
        },
        bytes,
    })
}

/// Build a base64 data URL for `bytes` with the given media type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_data_url() {
        let url = encode_data_url("image/png", &[0x89, b'P', b'N', b'G']);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
        let parsed = decode_data_url(&url).unwrap();
        assert_eq!(parsed.mime, "image/png");
        assert_eq!(parsed.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn tolerates_whitespace_and_extra_params() {
        let parsed = decode_data_url(" data:IMAGE/JPEG;name=scan.jpg;base64,aGVs\nbG8= ").unwrap();
        assert_eq!(parsed.mime, "image/jpeg");
        assert_eq!(parsed.bytes, b"hello");
    }

    #[test]
    fn missing_mime_defaults_to_text_plain() {
        let parsed = decode_data_url("data:;base64,aGk=").unwrap();
        assert_eq!(parsed.mime, "text/plain");
    }

    #[test]
    fn rejects_non_base64_and_malformed_urls() {
        for bad in [
            "image/png;base64,aGk=",
            "data:image/png;base64",
            "data:image/png,hello",
            "data:image/png;base64,@@@",
        ] {
            assert!(
                matches!(decode_data_url(bad), Err(ReportscanError::DataUrl(_))),
                "{bad} should be rejected"
            );
        }
    }
}
