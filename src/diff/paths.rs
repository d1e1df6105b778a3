//! Structural paths and overlay lookups
//!
//! The unknown and sensitive overlays mirror the shape of the value they
//! describe, with `true` at the leaves that carry the flag. A path walks an
//! overlay from its root; anything that does not resolve is simply unflagged.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

const SEPARATOR: &str = "/";

/// Sequence of object keys and array indices from the root of a value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributePath {
    segments: Vec<String>,
}

impl AttributePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Path to an object property below this one
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }

    /// Path to an array element below this one
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Joined form used as the identity of a path
    pub fn normalized(&self) -> String {
        self.segments.join(SEPARATOR)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

/// Resolve the overlay node at `path`, if every segment resolves
pub fn node_at<'a>(overlay: Option<&'a Value>, path: &AttributePath) -> Option<&'a Value> {
    let mut current = overlay?;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Whether the overlay marks `path` with a literal `true`
pub fn is_flagged(overlay: Option<&Value>, path: &AttributePath) -> bool {
    matches!(node_at(overlay, path), Some(Value::Bool(true)))
}

/// Set of paths whose change forces the resource to be replaced
#[derive(Debug, Clone, Default)]
pub struct ReplacePaths {
    paths: HashSet<String>,
}

impl ReplacePaths {
    /// Build from plan `replace_paths`, where segments are keys or indices
    pub fn from_plan(raw: &[Vec<Value>]) -> Self {
        let paths = raw
            .iter()
            .map(|segments| {
                AttributePath::from_segments(segments.iter().map(segment_text)).normalized()
            })
            .collect();
        Self { paths }
    }

    pub fn contains(&self, path: &AttributePath) -> bool {
        self.paths.contains(&path.normalized())
    }
}

fn segment_text(segment: &Value) -> String {
    match segment {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
