//! Request construction for the three Imagga endpoints.
//!
//! Every request carries the configured `Authorization` header and timeout.
//! Nothing here performs I/O, so built requests can be inspected in tests.

use crate::config::TaggerConfig;
use crate::error::{Result, TaggerError};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Method, RequestBuilder};

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "imagefile";
pub const UPLOAD_FILENAME: &str = "image.jpg";
pub const UPLOAD_MIME: &str = "image/jpeg";

/// An Imagga operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Upload an image; the body is attached with [`content_form`].
    Content,
    /// Tag previously uploaded content.
    Tags(String),
    /// Extract dominant colors of previously uploaded content.
    Colors(String),
}

impl Route {
    pub fn method(&self) -> Method {
        match self {
            Route::Content => Method::POST,
            Route::Tags(_) | Route::Colors(_) => Method::GET,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Content => "/content",
            Route::Tags(_) => "/tagging",
            Route::Colors(_) => "/colors",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Route::Content => Vec::new(),
            Route::Tags(id) => vec![("content", id.clone())],
            Route::Colors(id) => vec![
                ("content", id.clone()),
                ("extract_object_colors", "0".to_string()),
            ],
        }
    }

    /// Short name used in log lines and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Content => "upload",
            Route::Tags(_) => "tags",
            Route::Colors(_) => "colors",
        }
    }

    /// Full URL of this route under the configured base.
    pub fn url(&self, config: &TaggerConfig) -> String {
        format!("{}{}", normalize(&config.base_url), self.path())
    }

    /// Build the request with method, URL, query, auth header and timeout.
    pub fn request(&self, http: &Client, config: &TaggerConfig) -> RequestBuilder {
        let mut builder = http
            .request(self.method(), self.url(config))
            .header(AUTHORIZATION, &config.authorization)
            .timeout(config.timeout);

        let query = self.query();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder
    }
}

/// Multipart form for [`Route::Content`] wrapping a streamed JPEG body.
pub fn content_form(body: Body, len: u64) -> Result<Form> {
    let part = Part::stream_with_length(body, len)
        .file_name(UPLOAD_FILENAME)
        .mime_str(UPLOAD_MIME)
        .map_err(|e| TaggerError::Encoding(format!("Bad upload MIME type: {}", e)))?;
    Ok(Form::new().part(UPLOAD_FIELD, part))
}

fn normalize(base: &str) -> &str {
    base.trim_end_matches('/')
}
