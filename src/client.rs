use reqwest::{Body, Client, Response};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::config::TaggerConfig;
use crate::error::{Result, TaggerError};
use crate::parser;
use crate::router::{self, Route};
use crate::types::PhotoColor;

/// Async client for the Imagga v1 API.
///
/// Wraps one `reqwest::Client` (connection pooling is shared across calls)
/// and the configuration every request is built from. Each method issues a
/// single request and reports failures as typed errors; the tolerant
/// three-step workflow lives in [`crate::workflow`].
///
/// # Example
/// ```no_run
/// use imagga_tagger::{ImaggaClient, TaggerConfig};
///
/// # async fn example() -> imagga_tagger::Result<()> {
/// let client = ImaggaClient::new(TaggerConfig::with_basic_auth("acc_key", "secret"))?;
/// let tags = client.tags("8aa6e7f083c628407895eb55320ac5ad").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImaggaClient {
    http: Client,
    config: TaggerConfig,
}

impl ImaggaClient {
    /// Create a client, validating the base URL and credential.
    pub fn new(config: TaggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: Client::new(),
            config,
        })
    }

    /// Use a custom `reqwest::Client` (for proxies, TLS, pool tuning).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Returns the configuration this client builds requests from.
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    // ── Upload ──────────────────────────────────────────────────────

    /// Upload JPEG bytes to `/content` and return the content identifier.
    ///
    /// `on_progress` receives the fraction of the body handed to the
    /// transport, non-decreasing, and always sees `1.0` before a successful
    /// return. It runs on the caller's task.
    pub async fn upload<F>(&self, jpeg: Vec<u8>, mut on_progress: F) -> Result<String>
    where
        F: FnMut(f32),
    {
        let route = Route::Content;
        let total = jpeg.len() as u64;
        let (tx, mut rx) = mpsc::unbounded_channel::<f32>();
        let body = progress_body(jpeg, self.config.progress_chunk_size, tx);
        let form = router::content_form(body, total)?;

        tracing::debug!(bytes = total, url = %route.url(&self.config), "uploading image");

        let mut last = 0.0_f32;
        let mut report = |fraction: f32| {
            if fraction > last {
                last = fraction;
                on_progress(fraction);
            }
        };

        let send = route
            .request(&self.http, &self.config)
            .multipart(form)
            .send();
        tokio::pin!(send);

        let resp = loop {
            tokio::select! {
                Some(fraction) = rx.recv() => report(fraction),
                resp = &mut send => break resp,
            }
        };
        while let Ok(fraction) = rx.try_recv() {
            report(fraction);
        }

        let resp = resp.map_err(|e| self.network_error(&route, e))?;
        let json = self.read_json(&route, resp).await?;
        let id = parser::parse_upload_id(&json)?;

        report(1.0);
        Ok(id)
    }

    // ── Tags ────────────────────────────────────────────────────────

    /// Fetch tags for uploaded content, in the order Imagga returns them.
    pub async fn tags(&self, content_id: &str) -> Result<Vec<String>> {
        let json = self.get_json(Route::Tags(content_id.to_string())).await?;
        parser::parse_tags(&json)
    }

    // ── Colors ──────────────────────────────────────────────────────

    /// Fetch dominant image colors for uploaded content.
    pub async fn colors(&self, content_id: &str) -> Result<Vec<PhotoColor>> {
        let json = self.get_json(Route::Colors(content_id.to_string())).await?;
        parser::parse_colors(&json)
    }

    async fn get_json(&self, route: Route) -> Result<Value> {
        tracing::debug!(url = %route.url(&self.config), query = ?route.query(), "GET");
        let resp = route
            .request(&self.http, &self.config)
            .send()
            .await
            .map_err(|e| self.network_error(&route, e))?;
        self.read_json(&route, resp).await
    }

    async fn read_json(&self, route: &Route, resp: Response) -> Result<Value> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TaggerError::Http { status, body });
        }

        resp.json::<Value>().await.map_err(|e| {
            TaggerError::Parse(format!("Imagga {} response is not JSON: {}", route.name(), e))
        })
    }

    fn network_error(&self, route: &Route, source: reqwest::Error) -> TaggerError {
        let context = if source.is_timeout() {
            format!(
                "Imagga {} request timed out after {:?}",
                route.name(),
                self.config.timeout
            )
        } else {
            format!(
                "Cannot reach Imagga at {} for {}",
                self.config.base_url,
                route.name()
            )
        };
        TaggerError::Network { context, source }
    }
}

/// Streamed request body that reports upload progress through `progress`.
fn progress_body(bytes: Vec<u8>, chunk_size: usize, progress: mpsc::UnboundedSender<f32>) -> Body {
    Body::wrap_stream(futures_util::stream::iter(progress_chunks(
        bytes, chunk_size, progress,
    )))
}

/// Split `bytes` into chunks, sending the cumulative fraction as each one
/// is pulled by the transport.
fn progress_chunks(
    bytes: Vec<u8>,
    chunk_size: usize,
    progress: mpsc::UnboundedSender<f32>,
) -> impl Iterator<Item = std::io::Result<Vec<u8>>> + Send + Sync + 'static {
    let total = bytes.len();
    let chunk_size = chunk_size.max(1);
    (0..total).step_by(chunk_size).map(move |start| {
        let end = (start + chunk_size).min(total);
        // Receiver is gone once the request resolved; nothing left to report.
        let _ = progress.send(end as f32 / total as f32);
        Ok(bytes[start..end].to_vec())
    })
}
