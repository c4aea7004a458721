//! # imagga-tagger
//!
//! Async Rust client for the [Imagga](https://imagga.com) image-recognition
//! API: upload a photo, then fetch its tags and dominant colors.
//!
//! ## Features
//!
//! - **One-call workflow**: encode → upload → tags → colors, delivering
//!   whatever was obtained. Failures degrade to missing fields instead of
//!   errors.
//! - **Upload progress**: fractional callbacks while the body streams
//! - **Cancellation** via `tokio_util::sync::CancellationToken`, honored at
//!   every network call
//! - **Sequential or concurrent** tag/color fetching
//! - **Typed low-level calls** (`upload`, `tags`, `colors`) for callers that
//!   want the errors
//!
//! ## Quick Start
//!
//! ```no_run
//! use imagga_tagger::{ImaggaClient, TaggerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ImaggaClient::new(TaggerConfig::with_basic_auth("acc_key", "secret"))?;
//!     let image = image::open("photo.jpg")?;
//!
//!     let outcome = client
//!         .process(&image, |p| println!("Uploaded {:.0}%", p * 100.0))
//!         .await;
//!
//!     if let Some(tags) = &outcome.tags {
//!         println!("Tags: {}", tags.join(", "));
//!     }
//!     for color in outcome.colors.iter().flatten() {
//!         println!("Color: {}", color);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod parser;
pub mod router;
pub mod types;
pub mod workflow;

pub use client::ImaggaClient;
pub use config::{TaggerConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Result, TaggerError};
pub use router::Route;
pub use types::{FetchMode, Outcome, PhotoColor, WorkflowStage};
pub use tokio_util::sync::CancellationToken;
