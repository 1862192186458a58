use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the transcript. Never modified after it is appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Local wall-clock time shown next to the speaker label.
    pub fn timestamp_label(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub model: String,
    /// Seconds before an outstanding reply is abandoned.
    pub request_timeout: u64,
    /// Environment variable holding the generation API key.
    pub api_key_env: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            request_timeout: 60,
            api_key_env: "API_KEY".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let turn = Turn::user("选课");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "选课");

        let turn = Turn::assistant("好的");
        assert_eq!(turn.role, Role::Assistant);
    }

    #[test]
    fn test_timestamp_label_format() {
        let label = Turn::user("hi").timestamp_label();
        assert_eq!(label.len(), 5);
        assert_eq!(label.chars().nth(2), Some(':'));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.request_timeout, 60);
        assert_eq!(config.api_key_env, "API_KEY");
    }
}
