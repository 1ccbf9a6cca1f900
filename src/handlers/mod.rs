pub mod form;
pub mod page;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::llm::PostModel;
use crate::post::image::{ImageError, ImageInput};
use crate::post::pipeline::{generate, GenerationRequest};
use crate::post::presenter::{content_disposition, ResultView, COPIED_TOAST, DOWNLOAD_CONTENT_TYPE};
use crate::state::AppState;
use form::{collect_multipart, CollectedInput};
use page::{render_page, PageContext};

/// Where a generation takes its image from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageSource {
    /// A fresh upload replaces the cached image; without one the cached image is reused.
    UploadOrCached,
    Cached,
}

pub fn router<M: PostModel + 'static>(state: AppState<M>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index_handler::<M>))
        .route("/generate", post(generate_handler::<M>))
        .route("/regenerate", post(regenerate_handler::<M>))
        .route("/copy", post(copy_handler::<M>))
        .route("/download", get(download_handler::<M>))
        .route("/health", get(health_handler::<M>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn index_handler<M: PostModel>(State(state): State<AppState<M>>) -> Html<String> {
    let mut session = state.session.lock();
    let toast = session.toast.take();
    let page = render_page(&PageContext {
        preferences: &session.preferences,
        description: &session.description,
        image: session.request.as_ref().map(|request| &request.image),
        view: session.view.as_ref(),
        warning: session.warning.as_deref(),
        toast: toast.as_deref(),
        copied: session.copied_text.is_some(),
    });
    Html(page)
}

async fn generate_handler<M: PostModel>(
    State(state): State<AppState<M>>,
    multipart: Multipart,
) -> Redirect {
    submit(&state, multipart, ImageSource::UploadOrCached, "generate").await;
    Redirect::to("/")
}

async fn regenerate_handler<M: PostModel>(
    State(state): State<AppState<M>>,
    multipart: Multipart,
) -> Redirect {
    submit(&state, multipart, ImageSource::Cached, "regenerate").await;
    Redirect::to("/")
}

async fn submit<M: PostModel>(
    state: &AppState<M>,
    multipart: Multipart,
    source: ImageSource,
    action: &str,
) {
    match collect_multipart(multipart).await {
        Ok(input) => run_generation(state, input, source, action).await,
        Err(err) => {
            warn!("Failed to read {} form: {:#}", action, err);
            record_form_failure(state, format!("Upload failed: {err}"));
        }
    }
}

/// Drops the shown result so nothing from an earlier post survives a failed submit.
fn record_form_failure<M>(state: &AppState<M>, message: String) {
    let mut session = state.session.lock();
    session.view = None;
    session.copied_text = None;
    session.warning = Some(message);
}

/// Records the submitted controls and picks the image, or leaves a warning when
/// there is nothing to generate from.
fn prepare_request<M>(
    state: &AppState<M>,
    input: CollectedInput,
    source: ImageSource,
) -> Option<GenerationRequest> {
    let mut session = state.session.lock();
    session.preferences = input.preferences;
    session.description = input.description.clone();
    session.warning = None;
    session.toast = None;

    let upload = match source {
        ImageSource::UploadOrCached => input.image,
        ImageSource::Cached => None,
    };
    let image = match upload {
        Some(bytes) => ImageInput::from_upload(bytes, input.description),
        None => session
            .request
            .as_ref()
            .map(|cached| cached.image.clone().with_description(input.description))
            .ok_or(ImageError::Missing),
    };

    match image {
        Ok(image) => {
            let request = GenerationRequest::new(input.preferences, image);
            session.request = Some(request.clone());
            Some(request)
        }
        Err(err) => {
            info!("Generation skipped: {}", err);
            if upload_replaced_cache(&err) {
                session.request = None;
            }
            session.view = None;
            session.copied_text = None;
            session.warning = Some(err.to_string());
            None
        }
    }
}

fn upload_replaced_cache(err: &ImageError) -> bool {
    !matches!(err, ImageError::Missing)
}

async fn run_generation<M: PostModel>(
    state: &AppState<M>,
    input: CollectedInput,
    source: ImageSource,
    action: &str,
) {
    let Some(request) = prepare_request(state, input, source) else {
        return;
    };

    let outcome = generate(state.model.as_ref(), &request, action).await;

    let mut session = state.session.lock();
    session.view = Some(ResultView::from_outcome(outcome));
    session.copied_text = None;
}

async fn copy_handler<M: PostModel>(State(state): State<AppState<M>>) -> Redirect {
    let mut session = state.session.lock();
    if let Some(text) = session.current_post_text().map(str::to_string) {
        session.copied_text = Some(text);
        session.toast = Some(COPIED_TOAST.to_string());
    }
    Redirect::to("/")
}

async fn download_handler<M: PostModel>(State(state): State<AppState<M>>) -> Response {
    let session = state.session.lock();
    match session.current_post_text() {
        Some(text) => (
            [
                (header::CONTENT_TYPE, DOWNLOAD_CONTENT_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, content_disposition()),
            ],
            text.to_string(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "No generated post to download").into_response(),
    }
}

async fn health_handler<M: PostModel>(State(state): State<AppState<M>>) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "model": state.model.name() }))
}
