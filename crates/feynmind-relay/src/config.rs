//! Process-wide settings.
//!
//! Read once from the environment at startup and never reloaded.  The
//! binary loads an optional `.env` file before calling
//! [`Settings::from_env`].

use std::fmt;

use crate::error::{RelayError, Result};
use crate::llm::LlmClientConfig;
use crate::llm::client::{DEFAULT_MODEL, OPENAI_BASE_URL};

/// Default CORS origin: the local front-end dev server.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";

/// Resolved process settings.
#[derive(Clone)]
pub struct Settings {
    /// Bearer token for the completion API.
    pub openai_api_key: String,
    /// Model identifier sent with every completion request.
    pub model_name: String,
    /// Completion API base URL.
    pub openai_base_url: String,
    /// Origins allowed to make cross-origin requests.
    pub allowed_origins: Vec<String>,
    /// External data store for study progress, when configured.
    pub supabase: Option<SupabaseSettings>,
}

/// Connection details for the external progress store.
#[derive(Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_role: String,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY").ok_or(RelayError::MissingApiKey {
            variable: "OPENAI_API_KEY",
        })?;

        let supabase = match (get("SUPABASE_URL"), get("SUPABASE_SERVICE_ROLE")) {
            (Some(url), Some(service_role)) => Some(SupabaseSettings {
                url: url.trim().trim_end_matches('/').to_owned(),
                service_role,
            }),
            (None, None) => None,
            _ => {
                return Err(RelayError::Config {
                    reason: "SUPABASE_URL and SUPABASE_SERVICE_ROLE must be set together".into(),
                });
            }
        };

        Ok(Self {
            openai_api_key,
            model_name: get("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.to_owned()),
            allowed_origins: parse_origins(
                &get("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_owned()),
            ),
            supabase,
        })
    }

    /// Client configuration for the completion API.
    pub fn llm_config(&self) -> LlmClientConfig {
        LlmClientConfig::openai_compatible(
            self.openai_api_key.clone(),
            self.model_name.clone(),
            self.openai_base_url.clone(),
        )
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_owned)
        .collect()
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("openai_api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("openai_base_url", &self.openai_base_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("supabase", &self.supabase)
            .finish()
    }
}

impl fmt::Debug for SupabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseSettings")
            .field("url", &self.url)
            .field("service_role", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Settings> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply() {
        let s = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(s.model_name, "gpt-4o-mini");
        assert_eq!(s.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(s.allowed_origins, vec!["http://localhost:5173"]);
        assert!(s.supabase.is_none());
    }

    #[test]
    fn api_key_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, RelayError::MissingApiKey { .. }));
        let err = load(&[("OPENAI_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, RelayError::MissingApiKey { .. }));
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" http://a.test , http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn supabase_needs_both_values() {
        let s = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SUPABASE_URL", "https://proj.supabase.co/"),
            ("SUPABASE_SERVICE_ROLE", "service-key"),
        ])
        .unwrap();
        let sb = s.supabase.unwrap();
        assert_eq!(sb.url, "https://proj.supabase.co");

        let err = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SUPABASE_URL", "https://proj.supabase.co"),
        ])
        .unwrap_err();
        assert!(matches!(err, RelayError::Config { .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let s = load(&[
            ("OPENAI_API_KEY", "sk-secret"),
            ("SUPABASE_URL", "https://proj.supabase.co"),
            ("SUPABASE_SERVICE_ROLE", "role-secret"),
        ])
        .unwrap();
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(!dbg.contains("role-secret"));
        assert!(dbg.contains("gpt-4o-mini"));
    }

    #[test]
    fn llm_config_uses_overrides() {
        let s = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MODEL_NAME", "gpt-4o"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9999/v1"),
        ])
        .unwrap();
        let c = s.llm_config();
        assert_eq!(c.default_model, "gpt-4o");
        assert_eq!(c.base_url, "http://127.0.0.1:9999/v1");
    }
}
