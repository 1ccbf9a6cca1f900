use std::sync::Arc;

use parking_lot::Mutex;

use crate::post::pipeline::GenerationRequest;
use crate::post::preferences::Preferences;
use crate::post::presenter::ResultView;

/// The one interactive session: current control values, the cached request used by
/// regenerate, and whatever the result panel shows. Nothing here outlives the process.
#[derive(Debug, Default)]
pub struct Session {
    pub preferences: Preferences,
    pub description: String,
    pub request: Option<GenerationRequest>,
    pub view: Option<ResultView>,
    pub warning: Option<String>,
    pub toast: Option<String>,
    pub copied_text: Option<String>,
}

impl Session {
    pub fn current_post_text(&self) -> Option<&str> {
        self.view
            .as_ref()
            .and_then(ResultView::post)
            .map(|post| post.text.as_str())
    }
}

pub struct AppState<M> {
    pub model: Arc<M>,
    pub session: Arc<Mutex<Session>>,
}

// Manual impl: `M` itself does not need to be `Clone`.
impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            session: Arc::clone(&self.session),
        }
    }
}

impl<M> AppState<M> {
    pub fn new(model: M) -> Self {
        AppState {
            model: Arc::new(model),
            session: Arc::new(Mutex::new(Session::default())),
        }
    }
}
