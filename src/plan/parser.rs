//! Loading and validating plan documents

use super::types::Plan;
use crate::error::ShowError;
use semver::{Version, VersionReq};

/// Oldest plan format the renderer understands
const MINIMUM_FORMAT: &str = ">=1.2.0";

/// Parser for `terraform show -json` output
pub struct PlanLoader {
    supported: VersionReq,
}

impl Default for PlanLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanLoader {
    pub fn new() -> Self {
        Self {
            // The requirement string is a compile-time constant
            supported: VersionReq::parse(MINIMUM_FORMAT).unwrap_or(VersionReq::STAR),
        }
    }

    /// Parse plan JSON text
    pub fn parse(&self, text: &str) -> Result<Plan, ShowError> {
        serde_json::from_str(text).map_err(|e| ShowError::InvalidJson(e.to_string()))
    }

    /// Parse plan JSON text and reject unsupported format versions
    pub fn load(&self, text: &str) -> Result<Plan, ShowError> {
        let plan = self.parse(text)?;
        self.ensure_supported(&plan)?;
        Ok(plan)
    }

    /// Require `format_version` 1.2 or later
    pub fn ensure_supported(&self, plan: &Plan) -> Result<(), ShowError> {
        let supported = plan
            .format_version
            .as_deref()
            .and_then(parse_format_version)
            .is_some_and(|version| self.supported.matches(&version));

        if supported {
            Ok(())
        } else {
            Err(ShowError::UnsupportedFormat(plan.format_version.clone()))
        }
    }
}

/// Plan formats are `MAJOR.MINOR`, occasionally with a patch component
fn parse_format_version(raw: &str) -> Option<Version> {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split('.').collect();
    let padded = match parts.len() {
        2 => format!("{}.0", raw),
        3 => raw.to_string(),
        _ => return None,
    };
    Version::parse(&padded).ok()
}
