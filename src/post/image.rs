use base64::{engine::general_purpose, Engine as _};

use crate::llm::media::{detect_mime_type, is_accepted_image_mime, normalize_gemini_mime_type};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Please upload an image to generate a post.")]
    Missing,
    #[error("Unsupported image type ({0}). Upload a JPG or PNG file.")]
    Unsupported(String),
    #[error("The uploaded file could not be read as an image: {0}")]
    Undecodable(String),
}

/// One uploaded image plus the user's optional description. Lives only as long as
/// the request (and the cached copy used by regenerate).
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub description: String,
}

impl ImageInput {
    pub fn from_upload(bytes: Vec<u8>, description: impl Into<String>) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Missing);
        }

        let mime_type = detect_mime_type(&bytes)
            .map(|mime| normalize_gemini_mime_type(&mime))
            .unwrap_or_else(|| "unknown".to_string());
        if !is_accepted_image_mime(&mime_type) {
            return Err(ImageError::Unsupported(mime_type));
        }

        let decoded = image::load_from_memory(&bytes)
            .map_err(|err| ImageError::Undecodable(err.to_string()))?;

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            mime_type,
            description: description.into(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn base64_data(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_png_and_records_dimensions() {
        let input = ImageInput::from_upload(test_images::png(), "a sunset").unwrap();
        assert_eq!(input.mime_type, "image/png");
        assert_eq!((input.width, input.height), (4, 3));
        assert_eq!(input.description, "a sunset");
    }

    #[test]
    fn accepts_jpeg() {
        let input = ImageInput::from_upload(test_images::jpeg(), "").unwrap();
        assert_eq!(input.mime_type, "image/jpeg");
        assert!(input.description.is_empty());
    }

    #[test]
    fn rejects_empty_upload() {
        let err = ImageInput::from_upload(Vec::new(), "").unwrap_err();
        assert_eq!(err, ImageError::Missing);
    }

    #[test]
    fn rejects_types_outside_the_filter() {
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;".to_vec();
        let err = ImageInput::from_upload(gif, "").unwrap_err();
        assert_eq!(err, ImageError::Unsupported("image/gif".to_string()));

        let err = ImageInput::from_upload(b"hello world".to_vec(), "").unwrap_err();
        assert_eq!(err, ImageError::Unsupported("unknown".to_string()));
    }

    #[test]
    fn rejects_truncated_png() {
        let mut bytes = test_images::png();
        bytes.truncate(20);
        let err = ImageInput::from_upload(bytes, "").unwrap_err();
        assert!(matches!(err, ImageError::Undecodable(_)));
    }

    #[test]
    fn data_url_carries_mime_and_base64() {
        let input = ImageInput::from_upload(test_images::png(), "").unwrap();
        let url = input.data_url();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
