use std::fmt;

pub const MIN_MAX_CHARS: u16 = 100;
pub const MAX_MAX_CHARS: u16 = 280;
pub const DEFAULT_MAX_CHARS: u16 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Casual,
    Professional,
    Funny,
    Inspirational,
    Provocative,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Casual,
        Tone::Professional,
        Tone::Funny,
        Tone::Inspirational,
        Tone::Provocative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Casual => "Casual",
            Tone::Professional => "Professional",
            Tone::Funny => "Funny",
            Tone::Inspirational => "Inspirational",
            Tone::Provocative => "Provocative",
        }
    }

    /// Case-insensitive lookup by label; anything unrecognised maps to the default tone.
    pub fn from_form_value(value: &str) -> Self {
        let trimmed = value.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or_default()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generation preferences, captured fresh from the form for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub tone: Tone,
    pub include_hashtags: bool,
    pub include_emoji: bool,
    max_chars: u16,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            include_hashtags: true,
            include_emoji: true,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl Preferences {
    pub fn new(tone: Tone, include_hashtags: bool, include_emoji: bool, max_chars: u16) -> Self {
        Self {
            tone,
            include_hashtags,
            include_emoji,
            max_chars: clamp_max_chars(max_chars),
        }
    }

    /// Advisory target passed into the prompt; the model output is not held to it.
    pub fn max_chars(&self) -> u16 {
        self.max_chars
    }
}

pub fn clamp_max_chars(value: u16) -> u16 {
    value.clamp(MIN_MAX_CHARS, MAX_MAX_CHARS)
}

/// Parses the slider value from a form field, keeping the default for garbage input.
pub fn parse_max_chars(value: &str) -> u16 {
    value
        .trim()
        .parse::<i64>()
        .map(|parsed| parsed.clamp(i64::from(MIN_MAX_CHARS), i64::from(MAX_MAX_CHARS)) as u16)
        .unwrap_or(DEFAULT_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_parsing_ignores_case_and_whitespace() {
        assert_eq!(Tone::from_form_value(" funny "), Tone::Funny);
        assert_eq!(Tone::from_form_value("PROVOCATIVE"), Tone::Provocative);
    }

    #[test]
    fn unknown_tone_falls_back_to_casual() {
        assert_eq!(Tone::from_form_value("sarcastic"), Tone::Casual);
        assert_eq!(Tone::from_form_value(""), Tone::Casual);
    }

    #[test]
    fn defaults_match_the_settings_panel() {
        let preferences = Preferences::default();
        assert_eq!(preferences.tone, Tone::Casual);
        assert!(preferences.include_hashtags);
        assert!(preferences.include_emoji);
        assert_eq!(preferences.max_chars(), 250);
    }

    #[test]
    fn max_chars_is_clamped_to_slider_bounds() {
        assert_eq!(Preferences::new(Tone::Casual, true, true, 20).max_chars(), 100);
        assert_eq!(Preferences::new(Tone::Casual, true, true, 999).max_chars(), 280);
        assert_eq!(Preferences::new(Tone::Casual, true, true, 200).max_chars(), 200);
    }

    #[test]
    fn max_chars_form_value_parsing() {
        assert_eq!(parse_max_chars("180"), 180);
        assert_eq!(parse_max_chars("5000000"), 280);
        assert_eq!(parse_max_chars("99999999999"), 280);
        assert_eq!(parse_max_chars("-5"), 100);
        assert_eq!(parse_max_chars("abc"), DEFAULT_MAX_CHARS);
    }
}
