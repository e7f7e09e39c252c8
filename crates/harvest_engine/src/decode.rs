use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use harvest_logging::harvest_warn;

use crate::DocumentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng fallback.
///
/// Invalid sequences become U+FFFD. Only a body with no content at all is
/// rejected.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DocumentError> {
    let encoding = sniff_encoding(bytes, content_type);
    let (text, _, had_errors) = encoding.decode(bytes);
    if text.trim().is_empty() {
        return Err(DocumentError::Malformed {
            encoding: encoding.name().to_string(),
            message: "document body is empty".into(),
        });
    }
    if had_errors {
        harvest_warn!(
            "Replaced invalid {} byte sequences in a {} byte document",
            encoding.name(),
            bytes.len()
        );
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}

fn sniff_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]))
    })
}

#[cfg(test)]
mod tests {
    use super::charset_param;

    #[test]
    fn charset_is_read_case_insensitively() {
        assert_eq!(charset_param("text/html; Charset=\"UTF-8\""), Some("UTF-8"));
        assert_eq!(charset_param("text/html;charset=iso-8859-1"), Some("iso-8859-1"));
    }

    #[test]
    fn missing_charset_yields_none() {
        assert_eq!(charset_param("text/html"), None);
        assert_eq!(charset_param("text/html; boundary=x"), None);
    }
}
