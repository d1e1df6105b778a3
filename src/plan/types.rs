//! Data types for Terraform JSON plans
//!
//! Only the parts of the plan document that the show renderer reads are
//! modelled; everything else in the file is ignored during deserialization.

use crate::diff::{ActionKind, ReplacePaths};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Root of a `terraform show -json` plan document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub format_version: Option<String>,

    #[serde(default)]
    pub terraform_version: Option<String>,

    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,

    /// Raw output changes keyed by output name, in document order
    #[serde(default)]
    pub output_changes: Map<String, Value>,
}

/// One resource's proposed change
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceChange {
    /// Full address (e.g., "module.net.aws_subnet.private[0]")
    pub address: String,

    #[serde(default)]
    pub module_address: Option<String>,

    /// "managed" or "data"
    #[serde(default)]
    pub mode: String,

    #[serde(rename = "type")]
    pub resource_type: String,

    pub name: String,

    #[serde(default)]
    pub index: Option<Value>,

    #[serde(default)]
    pub provider_name: Option<String>,

    pub change: Change,

    #[serde(default)]
    pub action_reason: Option<String>,
}

impl ResourceChange {
    pub fn action(&self) -> ActionKind {
        self.change.action()
    }

    pub fn is_data_source(&self) -> bool {
        self.mode.eq_ignore_ascii_case("data")
    }
}

/// Before/after states and overlays shared by resource and output changes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub before: Option<Value>,

    #[serde(default)]
    pub after: Option<Value>,

    #[serde(default)]
    pub after_unknown: Option<Value>,

    #[serde(default)]
    pub before_sensitive: Option<Value>,

    #[serde(default)]
    pub after_sensitive: Option<Value>,

    #[serde(default)]
    pub replace_paths: Vec<Vec<Value>>,
}

impl Change {
    pub fn action(&self) -> ActionKind {
        ActionKind::classify(&self.actions)
    }

    pub fn replace_paths(&self) -> ReplacePaths {
        ReplacePaths::from_plan(&self.replace_paths)
    }
}

/// A changed root module output
#[derive(Debug, Clone)]
pub struct OutputChange {
    pub name: String,
    pub action: ActionKind,
    pub change: Change,
}

impl OutputChange {
    /// Collect the outputs that actually change, in document order
    ///
    /// Entries that are not objects, have no `actions` array, or classify as
    /// no-op or unknown are skipped.
    pub fn collect(outputs: &Map<String, Value>) -> Vec<OutputChange> {
        outputs
            .iter()
            .filter(|(_, raw)| matches!(raw.get("actions"), Some(Value::Array(_))))
            .filter_map(|(name, raw)| {
                let change: Change = serde_json::from_value(raw.clone()).ok()?;
                let action = change.action();
                match action {
                    ActionKind::NoOp | ActionKind::Unknown => None,
                    _ => Some(OutputChange {
                        name: name.clone(),
                        action,
                        change,
                    }),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_change_deserializes() {
        let raw = json!({
            "address": "aws_instance.web",
            "mode": "managed",
            "type": "aws_instance",
            "name": "web",
            "provider_name": "registry.terraform.io/hashicorp/aws",
            "change": {
                "actions": ["delete", "create"],
                "before": {"ami": "a"},
                "after": {"ami": "b"},
                "after_unknown": {},
                "before_sensitive": false,
                "after_sensitive": {},
                "replace_paths": [["ami"]]
            },
            "action_reason": "replace_because_cannot_update"
        });

        let change: ResourceChange = serde_json::from_value(raw).unwrap();

        assert_eq!(change.resource_type, "aws_instance");
        assert_eq!(change.action(), ActionKind::Replace);
        assert!(!change.is_data_source());
        assert_eq!(change.change.before_sensitive, Some(json!(false)));
        assert_eq!(
            change.action_reason.as_deref(),
            Some("replace_because_cannot_update")
        );
    }

    #[test]
    fn test_null_states_become_none() {
        let raw = json!({
            "address": "aws_s3_bucket.logs",
            "mode": "managed",
            "type": "aws_s3_bucket",
            "name": "logs",
            "change": {"actions": ["create"], "before": null, "after": {"bucket": "logs"}}
        });

        let change: ResourceChange = serde_json::from_value(raw).unwrap();

        assert!(change.change.before.is_none());
        assert!(change.change.replace_paths.is_empty());
    }

    #[test]
    fn test_data_source_mode() {
        let raw = json!({
            "address": "data.aws_ami.ubuntu",
            "mode": "data",
            "type": "aws_ami",
            "name": "ubuntu",
            "change": {"actions": ["read"]}
        });

        let change: ResourceChange = serde_json::from_value(raw).unwrap();

        assert!(change.is_data_source());
        assert_eq!(change.action(), ActionKind::Read);
    }

    #[test]
    fn test_collect_output_changes_skips_noop_and_malformed() {
        let outputs = json!({
            "endpoint": {"actions": ["create"], "after": "https://x", "after_unknown": false},
            "unchanged": {"actions": ["no-op"], "before": 1, "after": 1},
            "weird": {"actions": ["create", "update"]},
            "not_an_object": "value",
            "no_actions": {"before": 1},
            "password": {"actions": ["update"], "before": "a", "after": "b", "after_sensitive": true}
        });

        let collected = OutputChange::collect(outputs.as_object().unwrap());
        let names: Vec<&str> = collected.iter().map(|o| o.name.as_str()).collect();

        assert_eq!(names, vec!["endpoint", "password"]);
        assert_eq!(collected[0].action, ActionKind::Create);
        assert_eq!(collected[1].change.after_sensitive, Some(json!(true)));
    }
}
