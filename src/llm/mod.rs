pub mod gemini;
pub mod media;

use std::future::Future;

use anyhow::Result;

use crate::post::image::ImageInput;

/// A hosted multimodal model that turns a prompt plus one image into post text.
/// Calls are not assumed to be deterministic or idempotent.
pub trait PostModel: Send + Sync {
    fn name(&self) -> &str;

    fn generate(
        &self,
        prompt: &str,
        image: &ImageInput,
    ) -> impl Future<Output = Result<String>> + Send;
}
