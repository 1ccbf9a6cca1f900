use std::env;

use once_cell::sync::Lazy;
use tracing::warn;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_dir: String,
    pub bind_addr: String,
    pub max_upload_bytes: usize,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_temperature: f32,
    pub gemini_top_k: i32,
    pub gemini_top_p: f32,
    pub gemini_max_output_tokens: i32,
    pub gemini_safety_settings: String,
    pub gemini_timeout_seconds: u64,
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::load);

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

fn env_i32(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(default)
}

pub(crate) fn normalize_gemini_safety_settings(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "standard".to_string();
    }

    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "permissive" | "off" | "none" => "permissive".to_string(),
        "standard" | "default" => "standard".to_string(),
        _ => {
            warn!(
                "Unknown GEMINI_SAFETY_SETTINGS value '{}'; defaulting to standard.",
                value
            );
            "standard".to_string()
        }
    }
}

fn normalize_base_url(value: String) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_GEMINI_BASE_URL.to_string();
    }
    trimmed.to_string()
}

impl Config {
    /// Reads the process environment. Nothing here is fatal: a missing
    /// `GEMINI_API_KEY` only surfaces when a post is generated.
    pub fn load() -> Self {
        Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            log_dir: env_string("LOG_DIR", "logs"),
            bind_addr: env_string("BIND_ADDR", "127.0.0.1:8501"),
            max_upload_bytes: env_usize("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            gemini_api_key: env_string("GEMINI_API_KEY", "").trim().to_string(),
            gemini_base_url: normalize_base_url(env_string(
                "GEMINI_BASE_URL",
                DEFAULT_GEMINI_BASE_URL,
            )),
            gemini_model: env_string("GEMINI_MODEL", "gemini-1.5-flash"),
            gemini_temperature: env_f32("GEMINI_TEMPERATURE", 0.7),
            gemini_top_k: env_i32("GEMINI_TOP_K", 40),
            gemini_top_p: env_f32("GEMINI_TOP_P", 0.95),
            gemini_max_output_tokens: env_i32("GEMINI_MAX_OUTPUT_TOKENS", 1024),
            gemini_safety_settings: normalize_gemini_safety_settings(&env_string(
                "GEMINI_SAFETY_SETTINGS",
                "standard",
            )),
            gemini_timeout_seconds: env_u64("GEMINI_TIMEOUT_SECONDS", 90),
        }
    }

    pub fn has_gemini_api_key(&self) -> bool {
        !self.gemini_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_settings_accept_aliases() {
        assert_eq!(normalize_gemini_safety_settings("OFF"), "permissive");
        assert_eq!(normalize_gemini_safety_settings(" Standard "), "standard");
        assert_eq!(normalize_gemini_safety_settings(""), "standard");
    }

    #[test]
    fn unknown_safety_setting_falls_back_to_standard() {
        assert_eq!(normalize_gemini_safety_settings("paranoid"), "standard");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:9000/".to_string()),
            "http://localhost:9000"
        );
        assert_eq!(normalize_base_url("  ".to_string()), DEFAULT_GEMINI_BASE_URL);
    }
}
