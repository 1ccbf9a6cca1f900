use crate::post::preferences::Preferences;

pub const NO_DESCRIPTION_LINE: &str = "The image shows:";

/// Builds the instruction text sent alongside the image. The line order is fixed;
/// the description is passed through untouched.
pub fn build_post_prompt(preferences: &Preferences, description: &str) -> String {
    let mut lines = vec![
        format!(
            "Generate a compelling Twitter (X) post for this image in a {} tone.",
            preferences.tone.label().to_lowercase()
        ),
        "The post should be engaging and appropriate for the platform.".to_string(),
        format!("Maximum {} characters.", preferences.max_chars()),
    ];

    lines.push(if preferences.include_hashtags {
        "Include relevant hashtags.".to_string()
    } else {
        "Do not include hashtags.".to_string()
    });
    lines.push(if preferences.include_emoji {
        "Use emojis where appropriate.".to_string()
    } else {
        "Do not use emojis.".to_string()
    });

    if description.is_empty() {
        lines.push(NO_DESCRIPTION_LINE.to_string());
    } else {
        lines.push(format!(
            "User provided this description of the image: {description}"
        ));
    }

    lines.join("\n")
}
