//! Rendering of individual attribute values: additions, removals and updates

use super::lines::{
    KNOWN_AFTER_APPLY, SENSITIVE_VALUE, Trailer, deeper, write_arrow_line, write_closing,
    write_opening, write_scalar_line, write_sensitive_block,
};
use super::paths::AttributePath;
use super::renderer::{AttributeRenderer, ObjectLevel, is_blank, is_block_array, is_map, is_scalar};
use super::types::Marker;
use super::writer::AnsiTextWriter;
use serde_json::{Map, Value};

/// `= {` for maps, a bare `{` for nested objects with structure of their own
fn object_opener(map: &Map<String, Value>) -> &'static str {
    if is_map(map) { "= {" } else { "{" }
}

/// Labels of `{` openers are never padded
fn opener_width(opener: &str, width: usize) -> usize {
    if opener.starts_with('=') { width } else { 0 }
}

fn has_blocks(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty()) && is_block_array(value)
}

impl AttributeRenderer<'_> {
    pub(super) fn render_added_value(
        &self,
        writer: &mut AnsiTextWriter,
        value: &Value,
        label: &str,
        indent: &str,
        marker: Marker,
        path: &AttributePath,
        width: usize,
    ) {
        let forces = self.forces_replacement(path);
        if self.is_sensitive_after(path) {
            self.render_sensitive(writer, value, label, indent, marker, width, Trailer::replacement(forces));
            return;
        }
        if self.is_unknown(path) {
            write_scalar_line(writer, indent, marker, label, width, KNOWN_AFTER_APPLY, Trailer::replacement(forces));
            return;
        }
        if !self.should_render_added(value, path) {
            return;
        }

        match value {
            Value::Array(items) if is_block_array(value) => {
                for (index, item) in items.iter().enumerate() {
                    self.render_added_object_block(writer, item, label, indent, marker, &path.index(index));
                }
            }
            Value::Object(map) => {
                let opener = object_opener(map);
                write_opening(writer, indent, marker, label, opener_width(opener, width), opener, forces);
                self.render_added_properties(writer, map, path, &deeper(indent, 2), marker, is_map(map));
                write_closing(writer, indent, "}", Trailer::default());
            }
            Value::Array(items) => {
                write_opening(writer, indent, marker, label, width, "= [", forces);
                let item_indent = deeper(indent, 2);
                for (index, item) in items.iter().enumerate() {
                    self.render_added_item(writer, item, &item_indent, marker, &path.index(index));
                }
                write_closing(writer, indent, "]", Trailer::default());
            }
            scalar => write_scalar_line(
                writer,
                indent,
                marker,
                label,
                width,
                &self.formatter.render(scalar),
                Trailer::replacement(forces),
            ),
        }
    }

    pub(super) fn render_removed_value(
        &self,
        writer: &mut AnsiTextWriter,
        value: &Value,
        label: &str,
        indent: &str,
        path: &AttributePath,
        width: usize,
    ) {
        let marker = Marker::Remove;
        if self.is_sensitive_before(path) {
            self.render_sensitive(writer, value, label, indent, marker, width, Trailer::removal());
            return;
        }
        if !self.should_render_removed(value, path) {
            return;
        }

        match value {
            Value::Array(items) if is_block_array(value) => {
                for (index, item) in items.iter().enumerate() {
                    self.render_removed_object_block(writer, item, label, indent, &path.index(index));
                }
            }
            Value::Object(map) => {
                let opener = object_opener(map);
                let trailer = if is_map(map) { Trailer::removal() } else { Trailer::default() };
                write_opening(writer, indent, marker, label, opener_width(opener, width), opener, false);
                self.render_removed_properties(writer, map, path, &deeper(indent, 2), false, is_map(map));
                write_closing(writer, indent, "}", trailer);
            }
            Value::Array(items) => {
                write_opening(writer, indent, marker, label, width, "= [", false);
                let item_indent = deeper(indent, 2);
                for (index, item) in items.iter().enumerate() {
                    self.render_removed_item(writer, item, &item_indent, &path.index(index));
                }
                write_closing(writer, indent, "]", Trailer::removal());
            }
            scalar => write_scalar_line(
                writer,
                indent,
                marker,
                label,
                width,
                &self.formatter.render(scalar),
                Trailer::removal(),
            ),
        }
    }

    /// In-place change of a value present on both sides
    pub(super) fn render_updated_value(
        &self,
        writer: &mut AnsiTextWriter,
        before: &Value,
        after: &Value,
        label: &str,
        indent: &str,
        path: &AttributePath,
        width: usize,
    ) {
        let forces = self.forces_replacement(path);
        if self.is_sensitive_after(path) || self.is_sensitive_before(path) {
            let shown = if after.is_null() { before } else { after };
            self.render_sensitive(writer, shown, label, indent, Marker::Change, width, Trailer::replacement(forces));
            return;
        }
        if self.is_unknown(path) {
            if is_scalar(before) && !before.is_null() {
                write_arrow_line(writer, indent, label, width, &self.formatter.render(before), KNOWN_AFTER_APPLY, forces);
            } else {
                write_scalar_line(writer, indent, Marker::Change, label, width, KNOWN_AFTER_APPLY, Trailer::replacement(forces));
            }
            return;
        }
        if is_blank(before) && is_blank(after) {
            return;
        }
        if has_blocks(before) || has_blocks(after) {
            self.render_updated_blocks(writer, before, after, label, indent, path);
            return;
        }
        if before.is_null() {
            self.render_added_value(writer, after, label, indent, Marker::Add, path, width);
            return;
        }
        if after.is_null() {
            self.render_removed_value(writer, before, label, indent, path, width);
            return;
        }

        match (before, after) {
            (Value::Object(old), Value::Object(new)) => {
                let map = is_map(new) || (new.is_empty() && is_map(old));
                let opener = if map { "= {" } else { "{" };
                write_opening(writer, indent, Marker::Change, label, opener_width(opener, width), opener, forces);
                self.render_object_update(
                    writer,
                    old,
                    new,
                    path,
                    &deeper(indent, 2),
                    ObjectLevel {
                        identity: false,
                        map,
                    },
                );
                write_closing(writer, indent, "}", Trailer::default());
            }
            _ => write_arrow_line(
                writer,
                indent,
                label,
                width,
                &self.formatter.inline(before),
                &self.formatter.inline(after),
                forces,
            ),
        }
    }

    /// Placeholder for a value whose content must not be shown
    fn render_sensitive(
        &self,
        writer: &mut AnsiTextWriter,
        value: &Value,
        label: &str,
        indent: &str,
        marker: Marker,
        width: usize,
        trailer: Trailer,
    ) {
        match value {
            Value::Array(items) if has_blocks(value) => {
                for _ in items {
                    write_sensitive_block(writer, indent, marker, label);
                }
            }
            Value::Object(_) => write_sensitive_block(writer, indent, marker, label),
            _ => write_scalar_line(writer, indent, marker, label, width, SENSITIVE_VALUE, trailer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::paths::ReplacePaths;
    use crate::diff::renderer::PropertyOrder;
    use crate::diff::value::ValueFormatter;
    use serde_json::json;

    struct Overlays {
        unknown: Option<Value>,
        after_sensitive: Option<Value>,
        before_sensitive: Option<Value>,
        replace: Vec<Vec<Value>>,
    }

    impl Overlays {
        fn none() -> Self {
            Self {
                unknown: None,
                after_sensitive: None,
                before_sensitive: None,
                replace: Vec::new(),
            }
        }

        fn scope(&self) -> AttributeRenderer<'_> {
            AttributeRenderer {
                formatter: ValueFormatter::new(),
                after_unknown: self.unknown.as_ref(),
                after_sensitive: self.after_sensitive.as_ref(),
                before_sensitive: self.before_sensitive.as_ref(),
                replace: ReplacePaths::from_plan(&self.replace),
                order: PropertyOrder::Alphabetical,
            }
        }
    }

    fn key(name: &str) -> AttributePath {
        AttributePath::root().child(name)
    }

    #[test]
    fn test_added_scalar_with_replacement() {
        let overlays = Overlays {
            replace: vec![vec![json!("zone")]],
            ..Overlays::none()
        };
        let mut writer = AnsiTextWriter::new(false);
        overlays.scope().render_added_value(&mut writer, &json!("a"), "zone", "  ", Marker::Add, &key("zone"), 4);

        assert_eq!(writer.as_str(), "  + zone = \"a\" # forces replacement\n");
    }

    #[test]
    fn test_added_unknown_composite_is_placeholder() {
        let overlays = Overlays {
            unknown: Some(json!({"nested": true})),
            ..Overlays::none()
        };
        let mut writer = AnsiTextWriter::new(false);
        overlays.scope().render_added_value(&mut writer, &json!({"a": [1, 2]}), "nested", "", Marker::Add, &key("nested"), 0);

        assert_eq!(writer.as_str(), "+ nested = (known after apply)\n");
    }

    #[test]
    fn test_added_sensitive_block_array_masks_each_element() {
        let overlays = Overlays {
            after_sensitive: Some(json!({"secret": true})),
            ..Overlays::none()
        };
        let mut writer = AnsiTextWriter::new(false);
        overlays.scope().render_added_value(
            &mut writer,
            &json!([{"key": "one"}, {"key": "two"}]),
            "secret",
            "",
            Marker::Add,
            &key("secret"),
            0,
        );

        let output = writer.into_string();
        assert_eq!(output.matches("+ secret {").count(), 2);
        assert!(!output.contains("\"one\""));
        assert!(!output.contains("\"two\""));
    }

    #[test]
    fn test_removed_map_closes_with_null() {
        let mut writer = AnsiTextWriter::new(false);
        Overlays::none().scope().render_removed_value(&mut writer, &json!({"env": "dev"}), "tags", "", &key("tags"), 4);

        assert_eq!(
            writer.as_str(),
            "- tags = {\n    - \"env\" = \"dev\" -> null\n  } -> null\n"
        );
    }

    #[test]
    fn test_removed_blank_value_is_skipped() {
        let mut writer = AnsiTextWriter::new(false);
        Overlays::none().scope().render_removed_value(&mut writer, &json!(""), "note", "", &key("note"), 4);

        assert!(writer.is_empty());
    }

    #[test]
    fn test_updated_from_null_is_addition() {
        let mut writer = AnsiTextWriter::new(false);
        Overlays::none().scope().render_updated_value(&mut writer, &Value::Null, &json!("x"), "note", "", &key("note"), 4);

        assert_eq!(writer.as_str(), "+ note = \"x\"\n");
    }

    #[test]
    fn test_updated_to_null_is_removal() {
        let mut writer = AnsiTextWriter::new(false);
        Overlays::none().scope().render_updated_value(&mut writer, &json!(3), &Value::Null, "count", "", &key("count"), 5);

        assert_eq!(writer.as_str(), "- count = 3 -> null\n");
    }

    #[test]
    fn test_updated_type_change_is_arrow() {
        let mut writer = AnsiTextWriter::new(false);
        Overlays::none().scope().render_updated_value(&mut writer, &json!("1"), &json!(1), "port", "", &key("port"), 4);

        assert_eq!(writer.as_str(), "~ port = \"1\" -> 1\n");
    }

    #[test]
    fn test_updated_before_sensitive_hides_both_sides() {
        let overlays = Overlays {
            before_sensitive: Some(json!({"token": true})),
            ..Overlays::none()
        };
        let mut writer = AnsiTextWriter::new(false);
        overlays.scope().render_updated_value(&mut writer, &json!("old"), &json!("new"), "token", "", &key("token"), 5);

        assert_eq!(writer.as_str(), "~ token = (sensitive value)\n");
    }

    #[test]
    fn test_updated_unknown_scalar_keeps_before() {
        let overlays = Overlays {
            unknown: Some(json!({"ip": true})),
            ..Overlays::none()
        };
        let mut writer = AnsiTextWriter::new(false);
        overlays.scope().render_updated_value(&mut writer, &json!("10.0.0.1"), &Value::Null, "ip", "", &key("ip"), 2);

        assert_eq!(writer.as_str(), "~ ip = \"10.0.0.1\" -> (known after apply)\n");
    }
}
