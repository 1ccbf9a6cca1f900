use crate::post::outcome::{GeneratedPost, GenerationOutcome, PLATFORM_CHAR_LIMIT};

pub const DOWNLOAD_FILE_NAME: &str = "x_post.txt";
pub const DOWNLOAD_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const COPIED_TOAST: &str = "Post copied to clipboard!";
pub const EMPTY_RESPONSE_MESSAGE: &str = "No response generated from Gemini";

const WITHIN_LIMIT_COLOR: &str = "green";
const OVER_LIMIT_COLOR: &str = "red";

/// What the result panel shows after a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Post(GeneratedPost),
    Error(String),
}

impl ResultView {
    pub fn from_outcome(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Generated(post) => ResultView::Post(post),
            GenerationOutcome::Empty => ResultView::Error(EMPTY_RESPONSE_MESSAGE.to_string()),
            GenerationOutcome::Failed(message) => {
                ResultView::Error(format!("Error generating post: {message}"))
            }
        }
    }

    pub fn post(&self) -> Option<&GeneratedPost> {
        match self {
            ResultView::Post(post) => Some(post),
            ResultView::Error(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharCountBadge {
    pub label: String,
    pub color: &'static str,
    pub over_limit: bool,
}

pub fn char_count_badge(post: &GeneratedPost) -> CharCountBadge {
    let over_limit = post.is_over_limit();
    CharCountBadge {
        label: format!("Characters: {}/{}", post.char_count, PLATFORM_CHAR_LIMIT),
        color: if over_limit {
            OVER_LIMIT_COLOR
        } else {
            WITHIN_LIMIT_COLOR
        },
        over_limit,
    }
}

pub fn content_disposition() -> String {
    format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_and_empty_messages_differ() {
        let failed = ResultView::from_outcome(GenerationOutcome::Failed("boom".to_string()));
        let empty = ResultView::from_outcome(GenerationOutcome::Empty);
        assert_eq!(failed, ResultView::Error("Error generating post: boom".to_string()));
        assert_eq!(empty, ResultView::Error("No response generated from Gemini".to_string()));
        assert_ne!(failed, empty);
        assert!(failed.post().is_none());
        assert!(empty.post().is_none());
    }

    #[test]
    fn badge_is_green_up_to_280() {
        let badge = char_count_badge(&GeneratedPost::new("x".repeat(280)));
        assert_eq!(badge.label, "Characters: 280/280");
        assert_eq!(badge.color, "green");
        assert!(!badge.over_limit);

        let badge = char_count_badge(&GeneratedPost::new(""));
        assert_eq!(badge.label, "Characters: 0/280");
        assert!(!badge.over_limit);
    }

    #[test]
    fn badge_turns_red_past_280() {
        let badge = char_count_badge(&GeneratedPost::new("x".repeat(281)));
        assert_eq!(badge.label, "Characters: 281/280");
        assert_eq!(badge.color, "red");
        assert!(badge.over_limit);
    }

    #[test]
    fn download_is_named_x_post_txt() {
        assert_eq!(content_disposition(), "attachment; filename=\"x_post.txt\"");
        assert!(DOWNLOAD_CONTENT_TYPE.starts_with("text/plain"));
    }
}
