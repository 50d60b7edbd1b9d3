//! Client configuration

/// Client configuration for connecting to the Brew Server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// JWT token for authenticated (back-office) calls
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Whether a real backend is configured and reachable.
    ///
    /// `false` selects the in-memory fixture store (demo mode): an explicit
    /// configuration choice, not a runtime fallback on errors.
    pub backend_available: bool,
}

impl ClientConfig {
    /// Create a new configuration pointing at a real backend
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            backend_available: true,
        }
    }

    /// Demo-mode configuration: no backend, fixture data only
    pub fn demo() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout: 30,
            backend_available: false,
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
