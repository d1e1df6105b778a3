//! Test helpers for building plan documents and resource changes
//!
//! Builders start from a minimal valid value and let each test set only the
//! fields it cares about.

#![cfg(test)]

use crate::plan::{Change, Plan, ResourceChange};
use serde_json::{Map, Value, json};

/// Builder for a single resource change
pub struct ResourceChangeBuilder {
    address: String,
    mode: String,
    resource_type: String,
    name: String,
    action_reason: Option<String>,
    change: Change,
}

impl ResourceChangeBuilder {
    /// Create a builder for `test_resource.example` with the given actions
    pub fn new(actions: &[&str]) -> Self {
        Self {
            address: "test_resource.example".to_string(),
            mode: "managed".to_string(),
            resource_type: "test_resource".to_string(),
            name: "example".to_string(),
            action_reason: None,
            change: Change {
                actions: actions.iter().map(|a| a.to_string()).collect(),
                ..Change::default()
            },
        }
    }

    pub fn create() -> Self {
        Self::new(&["create"])
    }

    pub fn update() -> Self {
        Self::new(&["update"])
    }

    pub fn delete() -> Self {
        Self::new(&["delete"])
    }

    pub fn replace() -> Self {
        Self::new(&["delete", "create"])
    }

    pub fn read() -> Self {
        Self::new(&["read"]).data_source()
    }

    pub fn no_op() -> Self {
        Self::new(&["no-op"])
    }

    /// Set the resource type and name, deriving the address from them
    pub fn named(mut self, resource_type: &str, name: &str) -> Self {
        self.resource_type = resource_type.to_string();
        self.name = name.to_string();
        self.address = if self.mode == "data" {
            format!("data.{}.{}", resource_type, name)
        } else {
            format!("{}.{}", resource_type, name)
        };
        self
    }

    /// Switch to a data source, prefixing the address with `data.`
    pub fn data_source(mut self) -> Self {
        self.mode = "data".to_string();
        if !self.address.starts_with("data.") {
            self.address = format!("data.{}", self.address);
        }
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn action_reason(mut self, reason: &str) -> Self {
        self.action_reason = Some(reason.to_string());
        self
    }

    pub fn before(mut self, value: Value) -> Self {
        self.change.before = Some(value);
        self
    }

    pub fn after(mut self, value: Value) -> Self {
        self.change.after = Some(value);
        self
    }

    pub fn after_unknown(mut self, value: Value) -> Self {
        self.change.after_unknown = Some(value);
        self
    }

    pub fn before_sensitive(mut self, value: Value) -> Self {
        self.change.before_sensitive = Some(value);
        self
    }

    pub fn after_sensitive(mut self, value: Value) -> Self {
        self.change.after_sensitive = Some(value);
        self
    }

    pub fn replace_path(mut self, segments: &[Value]) -> Self {
        self.change.replace_paths.push(segments.to_vec());
        self
    }

    pub fn build(self) -> ResourceChange {
        ResourceChange {
            address: self.address,
            module_address: None,
            mode: self.mode,
            resource_type: self.resource_type,
            name: self.name,
            index: None,
            provider_name: None,
            change: self.change,
            action_reason: self.action_reason,
        }
    }
}

/// Builder for a whole plan document
pub struct PlanBuilder {
    format_version: Option<String>,
    resources: Vec<ResourceChange>,
    outputs: Map<String, Value>,
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self {
            format_version: Some("1.2".to_string()),
            resources: Vec::new(),
            outputs: Map::new(),
        }
    }

    pub fn format_version(mut self, version: &str) -> Self {
        self.format_version = Some(version.to_string());
        self
    }

    pub fn resource(mut self, change: ResourceChangeBuilder) -> Self {
        self.resources.push(change.build());
        self
    }

    /// Add a raw output change entry, e.g. `json!({"actions": ["create"], "after": 1})`
    pub fn output(mut self, name: &str, change: Value) -> Self {
        self.outputs.insert(name.to_string(), change);
        self
    }

    pub fn build(self) -> Plan {
        Plan {
            format_version: self.format_version,
            terraform_version: Some("1.9.0".to_string()),
            resource_changes: self.resources,
            output_changes: self.outputs,
        }
    }

    /// Serialized form as `terraform show -json` would write it
    pub fn to_json(&self) -> String {
        let resources: Vec<Value> = self
            .resources
            .iter()
            .map(|rc| {
                json!({
                    "address": rc.address,
                    "mode": rc.mode,
                    "type": rc.resource_type,
                    "name": rc.name,
                    "change": {
                        "actions": rc.change.actions,
                        "before": rc.change.before,
                        "after": rc.change.after,
                        "after_unknown": rc.change.after_unknown,
                        "before_sensitive": rc.change.before_sensitive,
                        "after_sensitive": rc.change.after_sensitive,
                        "replace_paths": rc.change.replace_paths,
                    },
                    "action_reason": rc.action_reason,
                })
            })
            .collect();

        json!({
            "format_version": self.format_version,
            "terraform_version": "1.9.0",
            "resource_changes": resources,
            "output_changes": self.outputs,
        })
        .to_string()
    }
}
