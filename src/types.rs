use serde::{Deserialize, Serialize};
use std::fmt;

/// A dominant color reported by Imagga's `/colors` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Imagga's `closest_palette_color`, e.g. "light brown".
    pub name: String,
}

impl PhotoColor {
    pub fn new(red: u8, green: u8, blue: u8, name: impl Into<String>) -> Self {
        Self {
            red,
            green,
            blue,
            name: name.into(),
        }
    }

    /// Render as `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for PhotoColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hex())
    }
}

/// Where a workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    Idle,
    Uploading,
    FetchingTags,
    FetchingColors,
    Done,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStage::Idle => "idle",
            WorkflowStage::Uploading => "uploading",
            WorkflowStage::FetchingTags => "fetching_tags",
            WorkflowStage::FetchingColors => "fetching_colors",
            WorkflowStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Whether tags and colors are fetched one after another or joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Tags complete before the colors request is issued.
    #[default]
    Sequential,
    /// Both requests run at once and are joined before completion.
    Concurrent,
}

/// Result of one upload-and-fetch workflow.
///
/// Any field may be absent: failures degrade to `None` instead of surfacing
/// as errors. Partial and empty outcomes are both valid terminal states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Identifier Imagga assigned to the upload, when the upload succeeded.
    pub content_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub colors: Option<Vec<PhotoColor>>,
    /// Set when the workflow stopped early because of cancellation.
    pub cancelled: bool,
}

impl Outcome {
    /// True when neither tags nor colors were obtained.
    pub fn is_empty(&self) -> bool {
        self.tags.is_none() && self.colors.is_none()
    }

    /// True when both tags and colors were obtained.
    pub fn is_complete(&self) -> bool {
        self.tags.is_some() && self.colors.is_some()
    }
}
