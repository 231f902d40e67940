//! Generator configuration

/// Primary environment variable holding the API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Fallback environment variable holding the API key
pub const FALLBACK_API_KEY_VAR: &str = "API_KEY";

/// Environment variable overriding the model name
pub const MODEL_VAR: &str = "GEMINI_MODEL";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// REST endpoint root
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for [`crate::GeminiGenerator`]
#[derive(Clone, PartialEq, Eq)]
pub struct AssistConfig {
    /// API key; `None` disables generation
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Endpoint root, without trailing slash
    pub endpoint: String,
}

impl AssistConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: present(API_KEY_VAR).or_else(|| present(FALLBACK_API_KEY_VAR)),
            model: present(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Check whether an API key is present
    #[inline]
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

// Never print the key
impl std::fmt::Debug for AssistConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
