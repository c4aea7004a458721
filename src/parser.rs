//! Extraction of identifiers, tags and colors from Imagga JSON bodies.

use crate::error::{Result, TaggerError};
use crate::types::PhotoColor;
use serde_json::Value;

/// Identifier of the first uploaded item (`uploaded[0].id`).
///
/// A missing or empty identifier is an error: the dependent fetches would
/// have nothing to correlate against.
pub fn parse_upload_id(json: &Value) -> Result<String> {
    let id = json
        .pointer("/uploaded/0/id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| TaggerError::Parse("Upload response missing uploaded[0].id".into()))?;

    if id.trim().is_empty() {
        return Err(TaggerError::Parse("Upload response has an empty id".into()));
    }
    Ok(id.to_string())
}

/// Tag labels from `results[0].tags[].tag`, in response order.
///
/// An entry without a string `tag` yields `""` so positions match the
/// response.
pub fn parse_tags(json: &Value) -> Result<Vec<String>> {
    let tags = json
        .pointer("/results/0/tags")
        .and_then(|v| v.as_array())
        .ok_or_else(|| TaggerError::Parse("Tagging response missing results[0].tags".into()))?;

    Ok(tags
        .iter()
        .map(|t| t.get("tag").and_then(|v| v.as_str()).unwrap_or("").to_string())
        .collect())
}

/// Dominant colors from `results[0].info.image_colors[]`.
pub fn parse_colors(json: &Value) -> Result<Vec<PhotoColor>> {
    let entries = json
        .pointer("/results/0/info/image_colors")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            TaggerError::Parse("Colors response missing results[0].info.image_colors".into())
        })?;

    entries.iter().map(parse_color).collect()
}

fn parse_color(entry: &Value) -> Result<PhotoColor> {
    let name = entry
        .get("closest_palette_color")
        .and_then(|v| v.as_str())
        .ok_or_else(|| TaggerError::Parse("Color entry missing closest_palette_color".into()))?;

    Ok(PhotoColor {
        red: channel(entry, "r")?,
        green: channel(entry, "g")?,
        blue: channel(entry, "b")?,
        name: name.to_string(),
    })
}

fn channel(entry: &Value, key: &str) -> Result<u8> {
    let raw = entry
        .get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| TaggerError::Parse(format!("Color entry missing integer '{}'", key)))?;
    u8::try_from(raw)
        .map_err(|_| TaggerError::Parse(format!("Color channel '{}' out of range: {}", key, raw)))
}
