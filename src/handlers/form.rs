use anyhow::Result;
use axum::extract::Multipart;

use crate::post::preferences::{parse_max_chars, Preferences, Tone, DEFAULT_MAX_CHARS};

/// Raw control values from one form submission, before the image is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedInput {
    pub preferences: Preferences,
    pub description: String,
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
struct FieldValues {
    tone: Option<String>,
    include_hashtags: bool,
    include_emoji: bool,
    max_chars: Option<String>,
    description: String,
    image: Option<Vec<u8>>,
}

impl FieldValues {
    fn apply_text(&mut self, name: &str, value: String) {
        match name {
            "tone" => self.tone = Some(value),
            // Unchecked boxes are simply absent from the submission.
            "include_hashtags" => self.include_hashtags = true,
            "include_emoji" => self.include_emoji = true,
            "max_chars" => self.max_chars = Some(value),
            "description" => self.description = value,
            _ => {}
        }
    }

    fn apply_file(&mut self, bytes: Vec<u8>) {
        if !bytes.is_empty() {
            self.image = Some(bytes);
        }
    }

    fn finish(self) -> CollectedInput {
        let tone = self
            .tone
            .as_deref()
            .map(Tone::from_form_value)
            .unwrap_or_default();
        let max_chars = self
            .max_chars
            .as_deref()
            .map(parse_max_chars)
            .unwrap_or(DEFAULT_MAX_CHARS);
        CollectedInput {
            preferences: Preferences::new(
                tone,
                self.include_hashtags,
                self.include_emoji,
                max_chars,
            ),
            description: normalize_description(&self.description),
            image: self.image,
        }
    }
}

/// Browsers submit textarea newlines as CRLF; the prompt uses plain `\n`.
fn normalize_description(value: &str) -> String {
    value.replace("\r\n", "\n")
}

pub async fn collect_multipart(mut multipart: Multipart) -> Result<CollectedInput> {
    let mut values = FieldValues::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let bytes = field.bytes().await?;
            values.apply_file(bytes.to_vec());
        } else {
            let text = field.text().await?;
            values.apply_text(&name, text);
        }
    }
    Ok(values.finish())
}
