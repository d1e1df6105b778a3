//! Nested blocks and list elements

use super::lines::{
    KNOWN_AFTER_APPLY, SENSITIVE_VALUE, Trailer, deeper, write_closing, write_list_item,
    write_opening, write_scalar_line, write_sensitive_block,
};
use super::paths::AttributePath;
use super::renderer::AttributeRenderer;
use super::types::Marker;
use super::writer::AnsiTextWriter;
use serde_json::Value;

impl AttributeRenderer<'_> {
    /// Block arrays are not matched element by element: every old block is
    /// removed and every new one added.
    pub(super) fn render_updated_blocks(
        &self,
        writer: &mut AnsiTextWriter,
        before: &Value,
        after: &Value,
        label: &str,
        indent: &str,
        path: &AttributePath,
    ) {
        if let Value::Array(items) = before {
            for (index, item) in items.iter().enumerate() {
                self.render_removed_object_block(writer, item, label, indent, &path.index(index));
            }
        }
        if let Value::Array(items) = after {
            for (index, item) in items.iter().enumerate() {
                let element = path.index(index);
                let marker = if self.forces_replacement(&element) {
                    Marker::Remove
                } else {
                    Marker::Add
                };
                self.render_added_object_block(writer, item, label, indent, marker, &element);
            }
        }
    }

    /// `<marker> label { ... }` for one element of a block array
    ///
    /// The element's own lines share the opener's marker. A block in the
    /// replace set is shown by its `-` marker, not by a trailer.
    pub(super) fn render_added_object_block(
        &self,
        writer: &mut AnsiTextWriter,
        item: &Value,
        label: &str,
        indent: &str,
        marker: Marker,
        path: &AttributePath,
    ) {
        let Value::Object(map) = item else {
            self.render_added_value(writer, item, label, indent, marker, path, 0);
            return;
        };
        if self.is_sensitive_after(path) {
            write_sensitive_block(writer, indent, marker, label);
            return;
        }
        if self.is_unknown(path) {
            write_scalar_line(writer, indent, marker, label, 0, KNOWN_AFTER_APPLY, Trailer::default());
            return;
        }

        write_opening(writer, indent, marker, label, 0, "{", false);
        self.render_added_properties(writer, map, path, &deeper(indent, 2), marker, false);
        write_closing(writer, indent, "}", Trailer::default());
    }

    pub(super) fn render_removed_object_block(
        &self,
        writer: &mut AnsiTextWriter,
        item: &Value,
        label: &str,
        indent: &str,
        path: &AttributePath,
    ) {
        let Value::Object(map) = item else {
            self.render_removed_value(writer, item, label, indent, path, 0);
            return;
        };
        if self.is_sensitive_before(path) {
            write_sensitive_block(writer, indent, Marker::Remove, label);
            return;
        }

        write_opening(writer, indent, Marker::Remove, label, 0, "{", false);
        self.render_removed_properties(writer, map, path, &deeper(indent, 2), true, false);
        write_closing(writer, indent, "}", Trailer::default());
    }

    /// Element of a primitive or nested list
    pub(super) fn render_added_item(
        &self,
        writer: &mut AnsiTextWriter,
        item: &Value,
        indent: &str,
        marker: Marker,
        path: &AttributePath,
    ) {
        if self.is_sensitive_after(path) {
            write_list_item(writer, indent, marker, SENSITIVE_VALUE);
            return;
        }
        if self.is_unknown(path) {
            write_list_item(writer, indent, marker, KNOWN_AFTER_APPLY);
            return;
        }

        match item {
            Value::Object(map) => {
                write_opening(writer, indent, marker, "", 0, "{", false);
                self.render_added_properties(writer, map, path, &deeper(indent, 2), marker, false);
                write_closing(writer, indent, "},", Trailer::default());
            }
            Value::Array(items) => {
                write_opening(writer, indent, marker, "", 0, "[", false);
                let nested = deeper(indent, 2);
                for (index, child) in items.iter().enumerate() {
                    self.render_added_item(writer, child, &nested, marker, &path.index(index));
                }
                write_closing(writer, indent, "],", Trailer::default());
            }
            scalar => write_list_item(writer, indent, marker, &self.formatter.render(scalar)),
        }
    }

    pub(super) fn render_removed_item(
        &self,
        writer: &mut AnsiTextWriter,
        item: &Value,
        indent: &str,
        path: &AttributePath,
    ) {
        let marker = Marker::Remove;
        if self.is_sensitive_before(path) {
            write_list_item(writer, indent, marker, SENSITIVE_VALUE);
            return;
        }

        match item {
            Value::Object(map) => {
                write_opening(writer, indent, marker, "", 0, "{", false);
                self.render_removed_properties(writer, map, path, &deeper(indent, 2), false, false);
                write_closing(writer, indent, "},", Trailer::default());
            }
            Value::Array(items) => {
                write_opening(writer, indent, marker, "", 0, "[", false);
                let nested = deeper(indent, 2);
                for (index, child) in items.iter().enumerate() {
                    self.render_removed_item(writer, child, &nested, &path.index(index));
                }
                write_closing(writer, indent, "],", Trailer::default());
            }
            scalar => write_list_item(writer, indent, marker, &self.formatter.render(scalar)),
        }
    }
}
