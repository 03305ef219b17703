/// Backend origin configuration.
///
/// A WASM client has no process environment at runtime, so the origin is
/// resolved at compile time: `FOLIO_API_BASE_URL` when set for the build,
/// otherwise the reference deployment at `http://localhost:8000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

impl ApiConfig {
    /// Resolve the origin for this build.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("FOLIO_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    /// Create a config with an explicit origin (tests point this at the
    /// mock backend). Trailing slashes are stripped so joins stay clean.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path (expected to start with `/`) onto the origin.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
