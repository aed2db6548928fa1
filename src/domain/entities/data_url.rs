use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::DataUrlError;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";
const SVG_MIME: &str = "image/svg+xml";

/// A decoded `data:<mime>;base64,<payload>` image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn is_data_url(value: &str) -> bool {
        value
            .get(..SCHEME.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SCHEME))
    }

    /// Parses and decodes an image data URL.
    ///
    /// The declared MIME type must be `image/*`. If the payload carries a
    /// known file signature it has to be an image as well, so a PDF labelled
    /// `image/png` is refused. SVG is markup, so a declared `image/svg+xml`
    /// may sniff as text. Unrecognised payloads pass.
    pub fn parse(value: &str) -> Result<Self, DataUrlError> {
        if !Self::is_data_url(value) {
            return Err(DataUrlError::MissingScheme);
        }

        let (header, payload) = value[SCHEME.len()..]
            .split_once(',')
            .ok_or(DataUrlError::MissingSeparator)?;

        let header = header.trim();
        let media_type = header
            .len()
            .checked_sub(BASE64_MARKER.len())
            .filter(|&idx| {
                header
                    .get(idx..)
                    .is_some_and(|marker| marker.eq_ignore_ascii_case(BASE64_MARKER))
            })
            .map(|idx| &header[..idx])
            .ok_or(DataUrlError::NotBase64)?;

        // Parameters such as `;charset=` are allowed before the marker.
        let mime_type = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if !mime_type.starts_with("image/") {
            return Err(DataUrlError::NotAnImage(mime_type));
        }

        let payload = payload.trim();
        if payload.is_empty() {
            return Err(DataUrlError::EmptyPayload);
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| DataUrlError::InvalidEncoding)?;

        if let Some(kind) = infer::get(&bytes) {
            let svg_markup = mime_type == SVG_MIME && kind.matcher_type() == infer::MatcherType::Text;
            if kind.matcher_type() != infer::MatcherType::Image && !svg_markup {
                return Err(DataUrlError::ContentMismatch {
                    declared: mime_type,
                    detected: kind.mime_type().to_string(),
                });
            }
        }

        Ok(DataUrl { mime_type, bytes })
    }

    /// Encodes raw file contents the way a browser `FileReader` would.
    pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
        format!("{SCHEME}{mime_type}{BASE64_MARKER},{}", STANDARD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89,
    ];

    #[test]
    fn parses_png_data_url() {
        let url = DataUrl::encode("image/png", PNG);
        let parsed = DataUrl::parse(&url).unwrap();

        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.bytes, PNG);
    }

    #[test]
    fn detects_data_scheme_case_insensitively() {
        assert!(DataUrl::is_data_url("DATA:image/png;base64,AAAA"));
        assert!(!DataUrl::is_data_url("https://example.com/data:"));
        assert!(!DataUrl::is_data_url("dat"));
    }

    #[test]
    fn rejects_non_base64_data_urls() {
        assert_eq!(DataUrl::parse("data:image/svg+xml,<svg/>"), Err(DataUrlError::NotBase64));
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(DataUrl::parse("data:image/png;base64"), Err(DataUrlError::MissingSeparator));
    }

    #[test]
    fn rejects_non_image_mime() {
        assert_eq!(
            DataUrl::parse("data:application/pdf;base64,JVBERi0="),
            Err(DataUrlError::NotAnImage("application/pdf".into()))
        );
    }

    #[test]
    fn rejects_empty_and_garbled_payloads() {
        assert_eq!(DataUrl::parse("data:image/png;base64,"), Err(DataUrlError::EmptyPayload));
        assert_eq!(DataUrl::parse("data:image/png;base64,@@@"), Err(DataUrlError::InvalidEncoding));
    }

    #[test]
    fn rejects_content_that_is_not_an_image() {
        let url = DataUrl::encode("image/png", b"%PDF-1.7\n%\xE2\xE3\xCF\xD3");
        assert!(matches!(
            DataUrl::parse(&url),
            Err(DataUrlError::ContentMismatch { ref detected, .. }) if detected == "application/pdf"
        ));
    }

    #[test]
    fn accepts_svg_with_xml_declaration() {
        let svg = br#"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#;
        let parsed = DataUrl::parse(&DataUrl::encode("image/svg+xml", svg)).unwrap();

        assert_eq!(parsed.mime_type, "image/svg+xml");
        assert_eq!(parsed.bytes, svg);
    }

    #[test]
    fn text_labelled_as_raster_image_is_refused() {
        let url = DataUrl::encode("image/png", b"<?xml version=\"1.0\"?><note/>");
        assert!(matches!(DataUrl::parse(&url), Err(DataUrlError::ContentMismatch { .. })));
    }

    #[test]
    fn accepts_images_without_a_known_signature() {
        let url = DataUrl::encode("image/x-portable-pixmap", b"plain pixels");
        assert!(DataUrl::parse(&url).is_ok());
    }
}
