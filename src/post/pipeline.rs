use tracing::{info, warn};

use crate::llm::PostModel;
use crate::post::image::ImageInput;
use crate::post::outcome::GenerationOutcome;
use crate::post::preferences::Preferences;
use crate::post::prompt::build_post_prompt;
use crate::utils::timing::GenerationTimer;

/// Everything one generation needs. Cached by the session so regenerate can
/// replay it with fresh preferences.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub preferences: Preferences,
    pub image: ImageInput,
}

impl GenerationRequest {
    pub fn new(preferences: Preferences, image: ImageInput) -> Self {
        Self { preferences, image }
    }

    pub fn prompt(&self) -> String {
        build_post_prompt(&self.preferences, &self.image.description)
    }
}

/// Assembles the prompt and makes the single model call. Never fails: model errors and
/// empty replies come back as outcomes.
pub async fn generate<M: PostModel>(
    model: &M,
    request: &GenerationRequest,
    action: &str,
) -> GenerationOutcome {
    let mut timer = GenerationTimer::start(action, &request.preferences, &request.image.description);
    let prompt = request.prompt();

    let outcome = GenerationOutcome::from_model_result(model.generate(&prompt, &request.image).await);
    match &outcome {
        GenerationOutcome::Generated(post) => {
            info!(
                "Generated post with {} ({} chars, over_limit={})",
                model.name(),
                post.char_count,
                post.is_over_limit()
            );
            timer.complete(outcome.status_label(), None);
        }
        GenerationOutcome::Empty => {
            warn!("{} returned no usable text", model.name());
            timer.complete(outcome.status_label(), None);
        }
        GenerationOutcome::Failed(message) => {
            warn!("Post generation failed with {}: {}", model.name(), message);
            timer.complete(outcome.status_label(), Some(message));
        }
    }
    outcome
}

#[cfg(test)]
pub(crate) mod test_model {
    use std::collections::VecDeque;

    use anyhow::{anyhow, Result};
    use parking_lot::Mutex;

    use crate::llm::PostModel;
    use crate::post::image::ImageInput;

    /// Replays canned replies in order and records every prompt it sees.
    pub struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, String>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
            Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|reply| reply.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl PostModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, prompt: &str, _image: &ImageInput) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            let reply = self.replies.lock().pop_front();
            match reply {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(anyhow!(message)),
                None => Err(anyhow!("no scripted reply left")),
            }
        }
    }
}
