use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::post::preferences::Preferences;

pub const TIMING_TARGET: &str = "post.timing";

/// Wall-clock record for one generate/regenerate action, written to the timing log.
#[derive(Debug)]
pub struct GenerationTimer {
    action: String,
    tone: String,
    max_chars: u16,
    description_chars: usize,
    started_at: DateTime<Utc>,
    started_perf: Instant,
    completed: bool,
}

impl GenerationTimer {
    pub fn start(action: &str, preferences: &Preferences, description: &str) -> Self {
        let timer = GenerationTimer {
            action: action.to_string(),
            tone: preferences.tone.label().to_string(),
            max_chars: preferences.max_chars(),
            description_chars: description.chars().count(),
            started_at: Utc::now(),
            started_perf: Instant::now(),
            completed: false,
        };
        info!(
            target: "post.timing",
            "event=generation_started action={} tone={} max_chars={} description_chars={} started_at={}",
            timer.action,
            timer.tone,
            timer.max_chars,
            timer.description_chars,
            timer.started_at.to_rfc3339()
        );
        timer
    }

    pub fn complete(&mut self, status: &str, detail: Option<&str>) {
        if self.completed {
            return;
        }
        self.completed = true;
        let completed_at = Utc::now();
        let duration = self.started_perf.elapsed().as_secs_f64();
        info!(
            target: "post.timing",
            "event=generation_completed action={} tone={} started_at={} completed_at={} duration_s={:.3} status={} detail={}",
            self.action,
            self.tone,
            self.started_at.to_rfc3339(),
            completed_at.to_rfc3339(),
            duration,
            status,
            detail.unwrap_or_default()
        );
    }
}

pub async fn log_llm_timing<T, F, Fut>(
    provider: &str,
    model: &str,
    operation: &str,
    metadata: Option<JsonValue>,
    call: F,
) -> Result<T, anyhow::Error>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, anyhow::Error>>,
{
    let started_at = Utc::now();
    let started_perf = Instant::now();
    let metadata_text = metadata
        .as_ref()
        .map(|value| value.to_string())
        .unwrap_or_else(|| "{}".to_string());
    info!(
        target: "post.timing",
        "event=llm_request provider={} model={} operation={} started_at={} metadata={}",
        provider,
        model,
        operation,
        started_at.to_rfc3339(),
        metadata_text
    );

    let result = call().await;
    let status = if result.is_ok() { "success" } else { "error" };

    let completed_at = Utc::now();
    let duration = started_perf.elapsed().as_secs_f64();
    info!(
        target: "post.timing",
        "event=llm_response provider={} model={} operation={} completed_at={} duration_s={:.3} status={} metadata={}",
        provider,
        model,
        operation,
        completed_at.to_rfc3339(),
        duration,
        status,
        metadata_text
    );

    result
}
