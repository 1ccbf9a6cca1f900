pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    infer::get(data).map(|kind| kind.mime_type().to_string())
}

pub fn normalize_gemini_mime_type(mime_type: &str) -> String {
    let lowered = mime_type.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        "image/x-png" => "image/png".to_string(),
        _ => lowered,
    }
}

/// Upload formats accepted by the page. Gemini takes more, but the form filters to these.
pub fn is_accepted_image_mime(mime_type: &str) -> bool {
    matches!(mime_type, "image/jpeg" | "image/png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_png_and_jpeg_magic_numbers() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F', 0, 1];
        assert_eq!(detect_mime_type(&png).as_deref(), Some("image/png"));
        assert_eq!(detect_mime_type(&jpeg).as_deref(), Some("image/jpeg"));
        assert_eq!(detect_mime_type(b"plain text"), None);
    }

    #[test]
    fn normalizes_legacy_aliases() {
        assert_eq!(normalize_gemini_mime_type(" IMAGE/JPG "), "image/jpeg");
        assert_eq!(normalize_gemini_mime_type("image/x-png"), "image/png");
        assert!(is_accepted_image_mime(&normalize_gemini_mime_type("image/pjpeg")));
        assert!(!is_accepted_image_mime("image/webp"));
    }
}
