/// Fixed platform ceiling used for the character-count indicator. Independent of the
/// user's advisory `max_chars`.
pub const PLATFORM_CHAR_LIMIT: usize = 280;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    pub text: String,
    pub char_count: usize,
}

impl GeneratedPost {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self { text, char_count }
    }

    pub fn is_over_limit(&self) -> bool {
        is_over_platform_limit(self.char_count)
    }
}

pub fn is_over_platform_limit(char_count: usize) -> bool {
    char_count > PLATFORM_CHAR_LIMIT
}

/// What one generation produced. The model call's error type is flattened into a
/// message so this stays cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(GeneratedPost),
    Empty,
    Failed(String),
}

impl GenerationOutcome {
    pub fn from_model_result(result: anyhow::Result<String>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => GenerationOutcome::Empty,
            Ok(text) => GenerationOutcome::Generated(GeneratedPost::new(text)),
            Err(err) => GenerationOutcome::Failed(format!("{err:#}")),
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            GenerationOutcome::Generated(_) => "success",
            GenerationOutcome::Empty => "empty",
            GenerationOutcome::Failed(_) => "error",
        }
    }
}
