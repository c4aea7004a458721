use crate::error::{Result, TaggerError};
use crate::types::FetchMode;
use base64::Engine;
use std::time::Duration;

/// Imagga v1 API root.
pub const DEFAULT_BASE_URL: &str = "http://api.imagga.com/v1";

/// Timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JPEG quality used for uploads (0.5 on a 0-1 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

/// Bytes sent per upload chunk; one progress update per chunk.
pub const DEFAULT_PROGRESS_CHUNK: usize = 16 * 1024;

/// Configuration for the Imagga client.
///
/// Passed to [`ImaggaClient::new`](crate::ImaggaClient::new) at construction;
/// nothing is read from process-wide state after that.
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    /// API root, e.g. "http://api.imagga.com/v1"
    pub base_url: String,
    /// Full `Authorization` header value, e.g. "Basic YWNj..."
    pub authorization: String,
    /// Per-request timeout (default: 10s)
    pub timeout: Duration,
    /// JPEG quality 1-100 (default: 50)
    pub jpeg_quality: u8,
    /// How the tag and color fetches are scheduled
    pub fetch_mode: FetchMode,
    /// Upload chunk size in bytes (default: 16 KiB)
    pub progress_chunk_size: usize,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            authorization: String::new(),
            timeout: DEFAULT_TIMEOUT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            fetch_mode: FetchMode::default(),
            progress_chunk_size: DEFAULT_PROGRESS_CHUNK,
        }
    }
}

impl TaggerConfig {
    /// Config using a pre-encoded Basic credential (the part after "Basic ").
    pub fn with_credential(credential: impl AsRef<str>) -> Self {
        Self {
            authorization: format!("Basic {}", credential.as_ref()),
            ..Default::default()
        }
    }

    /// Config using an Imagga API key and secret.
    pub fn with_basic_auth(api_key: &str, api_secret: &str) -> Self {
        let credential = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", api_key, api_secret));
        Self::with_credential(credential)
    }

    /// Build a config from `IMAGGA_*` environment variables.
    ///
    /// `IMAGGA_AUTHORIZATION` wins over `IMAGGA_API_KEY` + `IMAGGA_API_SECRET`.
    /// `IMAGGA_BASE_URL` and `IMAGGA_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let mut config = if let Ok(auth) = std::env::var("IMAGGA_AUTHORIZATION") {
            Self::default().authorization(auth)
        } else {
            match (
                std::env::var("IMAGGA_API_KEY"),
                std::env::var("IMAGGA_API_SECRET"),
            ) {
                (Ok(key), Ok(secret)) => Self::with_basic_auth(&key, &secret),
                _ => {
                    return Err(TaggerError::InvalidConfig(
                        "set IMAGGA_AUTHORIZATION or IMAGGA_API_KEY and IMAGGA_API_SECRET".into(),
                    ))
                }
            }
        };

        if let Ok(url) = std::env::var("IMAGGA_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(secs) = std::env::var("IMAGGA_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                TaggerError::InvalidConfig(format!("IMAGGA_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Set the API root.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the full `Authorization` header value.
    pub fn authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = value.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the JPEG quality, clamped to 1-100.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Choose sequential or concurrent tag/color fetching.
    pub fn fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Set the upload chunk size. Zero is treated as one byte.
    pub fn progress_chunk_size(mut self, bytes: usize) -> Self {
        self.progress_chunk_size = bytes.max(1);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            TaggerError::InvalidConfig(format!("bad base URL {}: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TaggerError::InvalidConfig(format!(
                "base URL must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(TaggerError::InvalidConfig(
                "timeout must be greater than zero".into(),
            ));
        }
        if self.authorization.trim().is_empty() {
            return Err(TaggerError::InvalidConfig(
                "authorization header is empty".into(),
            ));
        }
        reqwest::header::HeaderValue::from_str(&self.authorization).map_err(|_| {
            TaggerError::InvalidConfig("authorization is not a valid header value".into())
        })?;
        Ok(())
    }
}
