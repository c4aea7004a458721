//! The upload → tags → colors workflow.
//!
//! Steps run in order: encode the image as JPEG, upload it, then fetch tags
//! and colors for the returned identifier. Nothing fails past this module:
//! every error is logged and turns the affected field of [`Outcome`] into
//! `None`. An encoding or upload failure ends the workflow before any fetch
//! is issued.

use image::DynamicImage;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::client::ImaggaClient;
use crate::encode;
use crate::error::{Result, TaggerError};
use crate::types::{FetchMode, Outcome, PhotoColor, WorkflowStage};

impl ImaggaClient {
    /// Run the full workflow for one image.
    ///
    /// `on_progress` receives upload fractions in `[0.0, 1.0]`.
    pub async fn process<F>(&self, image: &DynamicImage, on_progress: F) -> Outcome
    where
        F: FnMut(f32),
    {
        self.process_with_cancel(image, &CancellationToken::new(), on_progress)
            .await
    }

    /// Run the workflow and hand the result to `on_complete` exactly once.
    pub async fn process_with_callbacks<F, C>(
        &self,
        image: &DynamicImage,
        on_progress: F,
        on_complete: C,
    ) where
        F: FnMut(f32),
        C: FnOnce(Option<Vec<String>>, Option<Vec<PhotoColor>>),
    {
        let outcome = self.process(image, on_progress).await;
        on_complete(outcome.tags, outcome.colors);
    }

    /// Run the workflow, stopping at the next suspension point once
    /// `cancel` fires.
    ///
    /// A cancelled outcome keeps whatever was obtained before cancellation
    /// and has `cancelled` set.
    pub async fn process_with_cancel<F>(
        &self,
        image: &DynamicImage,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Outcome
    where
        F: FnMut(f32),
    {
        let mut outcome = Outcome::default();
        enter(WorkflowStage::Idle);
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            return finish(outcome);
        }

        let jpeg = match encode::encode_jpeg(image, self.config().jpeg_quality) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                tracing::warn!(error = %e, "Could not encode image, skipping upload");
                return finish(outcome);
            }
        };

        enter(WorkflowStage::Uploading);
        let uploaded = cancellable(cancel, self.upload(jpeg, on_progress)).await;
        let content_id = match settle("upload", uploaded, &mut outcome.cancelled) {
            Some(id) => id,
            None => return finish(outcome),
        };
        tracing::info!(content_id = %content_id, "Content uploaded");
        outcome.content_id = Some(content_id.clone());

        match self.config().fetch_mode {
            FetchMode::Sequential => {
                enter(WorkflowStage::FetchingTags);
                let tags = cancellable(cancel, self.tags(&content_id)).await;
                outcome.tags = settle("tags", tags, &mut outcome.cancelled);
                if outcome.cancelled {
                    return finish(outcome);
                }

                enter(WorkflowStage::FetchingColors);
                let colors = cancellable(cancel, self.colors(&content_id)).await;
                outcome.colors = settle("colors", colors, &mut outcome.cancelled);
            }
            FetchMode::Concurrent => {
                enter(WorkflowStage::FetchingTags);
                enter(WorkflowStage::FetchingColors);
                let (tags, colors) = tokio::join!(
                    cancellable(cancel, self.tags(&content_id)),
                    cancellable(cancel, self.colors(&content_id)),
                );
                outcome.tags = settle("tags", tags, &mut outcome.cancelled);
                outcome.colors = settle("colors", colors, &mut outcome.cancelled);
            }
        }

        finish(outcome)
    }
}

/// Race `fut` against the cancellation token.
async fn cancellable<T, Fut>(cancel: &CancellationToken, fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TaggerError::Cancelled),
        result = fut => result,
    }
}

/// Turn a step result into an optional field, logging the failure.
fn settle<T>(step: &str, result: Result<T>, cancelled: &mut bool) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(TaggerError::Cancelled) => {
            tracing::info!(step, "Cancelled");
            *cancelled = true;
            None
        }
        Err(e) => {
            tracing::warn!(step, error = %e, transport = e.is_transport(), "Step failed");
            None
        }
    }
}

fn enter(stage: WorkflowStage) {
    tracing::info!(stage = %stage, "Workflow stage");
}

fn finish(outcome: Outcome) -> Outcome {
    tracing::info!(
        stage = %WorkflowStage::Done,
        tags = outcome.tags.as_ref().map(Vec::len),
        colors = outcome.colors.as_ref().map(Vec::len),
        cancelled = outcome.cancelled,
        "Workflow finished"
    );
    outcome
}
