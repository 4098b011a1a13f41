//! Environment-driven settings (§6.4), following the teacher's
//! `voice_agent_config::Settings` / `load_settings` pattern: one field per
//! recognized env var, each with a documented default.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Process-wide settings, loaded once at startup via [`Settings::from_env`].
#[derive(Debug, Clone)]
pub struct Settings {
    /// `LLM_API_KEY` — required for any non-mock LLM client.
    pub llm_api_key: Option<String>,
    /// `AWS_ACCESS_KEY_ID`.
    pub aws_access_key_id: Option<String>,
    /// `AWS_SECRET_ACCESS_KEY`.
    pub aws_secret_access_key: Option<String>,
    /// `AWS_REGION`.
    pub aws_region: Option<String>,
    /// `BUCKET_NAME`.
    pub bucket_name: Option<String>,
    /// `TOTAL_QUESTION_LIMIT`, default 15.
    pub total_question_limit: u32,
    /// `LLM_TIMEOUT_SEC`, default 60.
    pub llm_timeout: Duration,
    /// `LLM_MAX_RETRIES`, default 5.
    pub llm_max_retries: u32,
    /// `LLM_RATE_LIMIT_PER_MIN`, default 20.
    pub llm_rate_limit_per_min: u32,
    /// `SESSION_IDLE_TTL_SEC`, default 3600.
    pub session_idle_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_region: None,
            bucket_name: None,
            total_question_limit: 15,
            llm_timeout: Duration::from_secs(60),
            llm_max_retries: 5,
            llm_rate_limit_per_min: 20,
            session_idle_ttl: Duration::from_secs(3600),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment, falling back to the
    /// defaults in [`Settings::default`] for anything unset or malformed.
    /// Unlike the source's looser coercions, a present-but-unparsable
    /// numeric value is a hard [`ConfigError`] rather than a silent
    /// fallback, since a silently-wrong budget/timeout is worse than
    /// failing at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        settings.llm_api_key = non_empty_env("LLM_API_KEY");
        settings.aws_access_key_id = non_empty_env("AWS_ACCESS_KEY_ID");
        settings.aws_secret_access_key = non_empty_env("AWS_SECRET_ACCESS_KEY");
        settings.aws_region = non_empty_env("AWS_REGION");
        settings.bucket_name = non_empty_env("BUCKET_NAME");

        if let Some(raw) = non_empty_env("TOTAL_QUESTION_LIMIT") {
            settings.total_question_limit = parse_field("TOTAL_QUESTION_LIMIT", &raw)?;
        }
        if let Some(raw) = non_empty_env("LLM_TIMEOUT_SEC") {
            let secs: u64 = parse_field("LLM_TIMEOUT_SEC", &raw)?;
            settings.llm_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = non_empty_env("LLM_MAX_RETRIES") {
            settings.llm_max_retries = parse_field("LLM_MAX_RETRIES", &raw)?;
        }
        if let Some(raw) = non_empty_env("LLM_RATE_LIMIT_PER_MIN") {
            settings.llm_rate_limit_per_min = parse_field("LLM_RATE_LIMIT_PER_MIN", &raw)?;
        }
        if let Some(raw) = non_empty_env("SESSION_IDLE_TTL_SEC") {
            let secs: u64 = parse_field("SESSION_IDLE_TTL_SEC", &raw)?;
            settings.session_idle_ttl = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_field<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("could not parse '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let settings = Settings::default();
        assert_eq!(settings.total_question_limit, 15);
        assert_eq!(settings.llm_timeout, Duration::from_secs(60));
        assert_eq!(settings.llm_max_retries, 5);
        assert_eq!(settings.llm_rate_limit_per_min, 20);
        assert_eq!(settings.session_idle_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn rejects_malformed_numeric_override() {
        let result: Result<u32, ConfigError> = parse_field("TOTAL_QUESTION_LIMIT", "not-a-number");
        assert!(result.is_err());
    }
}
