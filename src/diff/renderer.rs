//! Attribute body rendering for a single resource change
//!
//! [`DiffRenderer`] is the entry point. It builds an [`AttributeRenderer`]
//! scoped to one resource, which walks the before and after trees together
//! and writes `terraform show` style lines. Value and block rendering live in
//! the sibling `values` and `blocks` modules.

use super::lines::{
    KNOWN_AFTER_APPLY, deeper, write_arrow_line, write_context_line,
    write_unchanged_comment,
};
use super::paths::{AttributePath, ReplacePaths, is_flagged, node_at};
use super::types::{ActionKind, Marker};
use super::value::ValueFormatter;
use super::writer::AnsiTextWriter;
use crate::plan::ResourceChange;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;

/// Stand-in for properties that only exist in the unknown overlay
static NULL: Value = Value::Null;

/// Keys shown even when unchanged so the reader can tell resources apart
const IDENTITY_KEYS: [&str; 2] = ["id", "name"];

/// Renders the attribute body of a resource block
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffRenderer {
    formatter: ValueFormatter,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self {
            formatter: ValueFormatter::new(),
        }
    }

    /// Write the attribute lines for `change`
    ///
    /// Lines start two indentation levels below `base_indent`, which is the
    /// indentation of the enclosing `resource` line.
    pub fn render_attributes(
        &self,
        writer: &mut AnsiTextWriter,
        change: &ResourceChange,
        action: ActionKind,
        base_indent: &str,
    ) {
        let indent = deeper(base_indent, 2);
        let data = &change.change;
        let scope = AttributeRenderer {
            formatter: self.formatter,
            after_unknown: data.after_unknown.as_ref(),
            after_sensitive: data.after_sensitive.as_ref(),
            before_sensitive: data.before_sensitive.as_ref(),
            replace: data.replace_paths(),
            order: match action {
                ActionKind::Replace => PropertyOrder::Before,
                _ => PropertyOrder::Alphabetical,
            },
        };
        let root = AttributePath::root();

        match action {
            ActionKind::Create | ActionKind::Read => {
                if let Some(Value::Object(after)) = &data.after {
                    scope.render_added_properties(writer, after, &root, &indent, Marker::Add, false);
                }
            }
            ActionKind::Delete => {
                if let Some(Value::Object(before)) = &data.before {
                    scope.render_removed_properties(writer, before, &root, &indent, false, false);
                }
            }
            ActionKind::Update | ActionKind::Replace | ActionKind::Unknown => {
                match (&data.before, &data.after) {
                    (Some(Value::Object(before)), Some(Value::Object(after))) => {
                        scope.render_object_update(
                            writer,
                            before,
                            after,
                            &root,
                            &indent,
                            ObjectLevel::RESOURCE,
                        );
                    }
                    (_, Some(Value::Object(after))) => {
                        scope.render_added_properties(writer, after, &root, &indent, Marker::Add, false);
                    }
                    (Some(Value::Object(before)), _) => {
                        scope.render_removed_properties(writer, before, &root, &indent, false, false);
                    }
                    _ => {}
                }
            }
            ActionKind::NoOp => {}
        }
    }
}

/// Order of properties inside one object level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PropertyOrder {
    Alphabetical,
    /// Key order of the before state, used for replacements
    Before,
}

/// Shape of the object level being reconciled
#[derive(Debug, Clone, Copy)]
pub(super) struct ObjectLevel {
    /// Unchanged identity keys are printed instead of counted
    pub identity: bool,
    /// Keys are quoted and hidden entries are counted as elements
    pub map: bool,
}

impl ObjectLevel {
    const RESOURCE: ObjectLevel = ObjectLevel {
        identity: true,
        map: false,
    };
}

/// Per-resource rendering state: overlays, replace paths and ordering
pub(super) struct AttributeRenderer<'a> {
    pub(super) formatter: ValueFormatter,
    pub(super) after_unknown: Option<&'a Value>,
    pub(super) after_sensitive: Option<&'a Value>,
    pub(super) before_sensitive: Option<&'a Value>,
    pub(super) replace: ReplacePaths,
    pub(super) order: PropertyOrder,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Property<'v> {
    pub name: &'v str,
    pub value: &'v Value,
}

/// How one key differs between the before and after objects
#[derive(Debug, Clone, Copy)]
enum Delta<'v> {
    Unchanged(&'v Value),
    Changed(&'v Value, &'v Value),
    Added(&'v Value),
    Removed(&'v Value),
    /// Removed from after but still present once the apply resolves it
    RemovedUnknown(&'v Value),
}

#[derive(Debug, Clone, Copy)]
struct Entry<'v> {
    name: &'v str,
    delta: Delta<'v>,
    before_index: Option<usize>,
}

impl<'v> Entry<'v> {
    fn primary(&self) -> &'v Value {
        match self.delta {
            Delta::Unchanged(value)
            | Delta::Added(value)
            | Delta::Removed(value)
            | Delta::RemovedUnknown(value) => value,
            Delta::Changed(before, after) => {
                if after.is_null() {
                    before
                } else {
                    after
                }
            }
        }
    }

    fn is_block(&self) -> bool {
        is_block_array(self.primary())
    }
}

impl<'a> AttributeRenderer<'a> {
    pub(super) fn is_unknown(&self, path: &AttributePath) -> bool {
        is_flagged(self.after_unknown, path)
    }

    pub(super) fn is_sensitive_after(&self, path: &AttributePath) -> bool {
        is_flagged(self.after_sensitive, path)
    }

    pub(super) fn is_sensitive_before(&self, path: &AttributePath) -> bool {
        is_flagged(self.before_sensitive, path)
    }

    pub(super) fn forces_replacement(&self, path: &AttributePath) -> bool {
        self.replace.contains(path)
    }

    pub(super) fn should_render_added(&self, value: &Value, path: &AttributePath) -> bool {
        self.is_unknown(path) || self.is_sensitive_after(path) || !is_blank(value)
    }

    pub(super) fn should_render_removed(&self, value: &Value, path: &AttributePath) -> bool {
        self.is_sensitive_before(path) || !is_blank(value)
    }

    /// Every property of `map` as an addition
    ///
    /// `quoted` is set for map values only; resource roots, blocks and list
    /// elements keep bare attribute names.
    pub(super) fn render_added_properties(
        &self,
        writer: &mut AnsiTextWriter,
        map: &Map<String, Value>,
        path: &AttributePath,
        indent: &str,
        marker: Marker,
        quoted: bool,
    ) {
        let unknown = node_at(self.after_unknown, path);
        let mut props = properties(map, unknown);
        sort_by_kind(&mut props, PropertyOrder::Alphabetical);
        let width = label_width(props.iter().map(|p| (p.name, p.value)), unknown, quoted);

        let mut printed = false;
        for prop in &props {
            let label = label(prop.name, quoted);
            let child = path.child(prop.name);
            if is_block_array(prop.value) {
                let mut fragment = writer.scratch();
                self.render_added_value(&mut fragment, prop.value, &label, indent, marker, &child, width);
                emit_fragment(writer, &mut printed, fragment);
            } else {
                let start = writer.lines_written();
                self.render_added_value(writer, prop.value, &label, indent, marker, &child, width);
                printed |= writer.lines_written() > start;
            }
        }
    }

    /// Every property of `map` as a removal
    ///
    /// With `count_hidden`, properties that have nothing to show are summarised
    /// in an unchanged-attributes comment.
    pub(super) fn render_removed_properties(
        &self,
        writer: &mut AnsiTextWriter,
        map: &Map<String, Value>,
        path: &AttributePath,
        indent: &str,
        count_hidden: bool,
        quoted: bool,
    ) {
        let mut props = properties(map, None);
        sort_by_kind(&mut props, self.order);
        let width = label_width(props.iter().map(|p| (p.name, p.value)), None, quoted);

        let mut printed = false;
        let mut hidden = 0;
        let mut comment_written = false;
        for prop in &props {
            let label = label(prop.name, quoted);
            let child = path.child(prop.name);
            if is_block_array(prop.value) {
                if !comment_written {
                    self.write_hidden(writer, indent, hidden, quoted, &mut printed);
                    comment_written = true;
                }
                let mut fragment = writer.scratch();
                self.render_removed_value(&mut fragment, prop.value, &label, indent, &child, width);
                emit_fragment(writer, &mut printed, fragment);
            } else {
                if count_hidden && !self.should_render_removed(prop.value, &child) {
                    hidden += 1;
                    continue;
                }
                let start = writer.lines_written();
                self.render_removed_value(writer, prop.value, &label, indent, &child, width);
                printed |= writer.lines_written() > start;
            }
        }
        if !comment_written {
            self.write_hidden(writer, indent, hidden, quoted, &mut printed);
        }
    }

    fn write_hidden(
        &self,
        writer: &mut AnsiTextWriter,
        indent: &str,
        hidden: usize,
        quoted: bool,
        printed: &mut bool,
    ) {
        if hidden > 0 {
            write_unchanged_comment(writer, &deeper(indent, 1), hidden, noun(quoted));
            *printed = true;
        }
    }

    /// Reconcile two versions of the same object
    pub(super) fn render_object_update(
        &self,
        writer: &mut AnsiTextWriter,
        before: &Map<String, Value>,
        after: &Map<String, Value>,
        path: &AttributePath,
        indent: &str,
        level: ObjectLevel,
    ) {
        let unknown = node_at(self.after_unknown, path);
        let entries = self.reconcile(before, after, path, unknown);
        let quoted = level.map;
        let width = label_width(entries.iter().map(|e| (e.name, e.primary())), unknown, quoted);

        let start = writer.lines_written();
        let mut unchanged_attributes = 0;
        let mut context = Vec::new();

        for entry in entries.iter().filter(|e| !e.is_block()) {
            let label = label(entry.name, quoted);
            if let Delta::Unchanged(value) = entry.delta {
                if is_void(value) {
                    continue;
                }
                if level.identity && IDENTITY_KEYS.contains(&entry.name) && is_scalar(value) {
                    let text = self.formatter.render(value);
                    match self.order {
                        PropertyOrder::Before => {
                            write_context_line(writer, indent, &label, width, &text)
                        }
                        PropertyOrder::Alphabetical => context.push((label, text)),
                    }
                } else {
                    unchanged_attributes += 1;
                }
                continue;
            }
            self.render_delta(writer, entry, &label, indent, &path.child(entry.name), width);
        }

        for (label, text) in &context {
            write_context_line(writer, indent, label, width, text);
        }
        if unchanged_attributes > 0 {
            write_unchanged_comment(writer, &deeper(indent, 1), unchanged_attributes, noun(quoted));
        }

        let mut printed = writer.lines_written() > start;
        let mut unchanged_blocks = 0;

        for entry in entries.iter().filter(|e| e.is_block()) {
            if let Delta::Unchanged(value) = entry.delta {
                if let Value::Array(items) = value {
                    unchanged_blocks += items.len();
                }
                continue;
            }
            let label = label(entry.name, quoted);
            let mut fragment = writer.scratch();
            self.render_delta(&mut fragment, entry, &label, indent, &path.child(entry.name), width);
            emit_fragment(writer, &mut printed, fragment);
        }

        if unchanged_blocks > 0 {
            if printed {
                writer.write_line_if_not_blank();
            }
            write_unchanged_comment(writer, &deeper(indent, 1), unchanged_blocks, "block");
        }
    }

    fn render_delta(
        &self,
        writer: &mut AnsiTextWriter,
        entry: &Entry<'_>,
        label: &str,
        indent: &str,
        path: &AttributePath,
        width: usize,
    ) {
        match entry.delta {
            Delta::Unchanged(_) => {}
            Delta::Changed(before, after) => {
                self.render_updated_value(writer, before, after, label, indent, path, width)
            }
            Delta::Added(value) => {
                self.render_added_value(writer, value, label, indent, Marker::Add, path, width)
            }
            Delta::Removed(value) => {
                self.render_removed_value(writer, value, label, indent, path, width)
            }
            Delta::RemovedUnknown(before) => write_arrow_line(
                writer,
                indent,
                label,
                width,
                &self.formatter.render(before),
                KNOWN_AFTER_APPLY,
                self.forces_replacement(path),
            ),
        }
    }

    /// Classify every key of both objects and put them in display order
    fn reconcile<'v>(
        &self,
        before: &'v Map<String, Value>,
        after: &'v Map<String, Value>,
        path: &AttributePath,
        unknown: Option<&'v Value>,
    ) -> Vec<Entry<'v>> {
        let positions: HashMap<&str, usize> = before
            .keys()
            .enumerate()
            .map(|(index, key)| (key.as_str(), index))
            .collect();
        let mut entries = Vec::with_capacity(before.len().max(after.len()));

        for (name, after_value) in after {
            let delta = match before.get(name) {
                Some(before_value) if before_value == after_value => Delta::Unchanged(after_value),
                Some(before_value) => Delta::Changed(before_value, after_value),
                None => Delta::Added(after_value),
            };
            entries.push(Entry {
                name,
                delta,
                before_index: positions.get(name.as_str()).copied(),
            });
        }

        if let Some(Value::Object(pending)) = unknown {
            for name in pending.keys() {
                if !after.contains_key(name) && !before.contains_key(name) {
                    entries.push(Entry {
                        name,
                        delta: Delta::Added(&NULL),
                        before_index: None,
                    });
                }
            }
        }

        for (name, before_value) in before {
            if after.contains_key(name) {
                continue;
            }
            let delta = if self.is_unknown(&path.child(name)) {
                if before_value.is_null() {
                    Delta::Added(&NULL)
                } else if is_scalar(before_value) {
                    Delta::RemovedUnknown(before_value)
                } else {
                    Delta::Removed(before_value)
                }
            } else {
                Delta::Removed(before_value)
            };
            entries.push(Entry {
                name,
                delta,
                before_index: positions.get(name.as_str()).copied(),
            });
        }

        match self.order {
            PropertyOrder::Alphabetical => {
                entries.sort_by(|a, b| (a.is_block(), a.name).cmp(&(b.is_block(), b.name)))
            }
            PropertyOrder::Before => entries
                .sort_by_key(|e| (e.is_block(), e.before_index.unwrap_or(usize::MAX))),
        }
        entries
    }
}

/// Append a rendered block group, separated from earlier output by one blank line
fn emit_fragment(writer: &mut AnsiTextWriter, printed: &mut bool, fragment: AnsiTextWriter) {
    if fragment.is_empty() {
        return;
    }
    if *printed {
        writer.write_line_if_not_blank();
    }
    writer.append(fragment);
    *printed = true;
}

fn noun(quoted: bool) -> &'static str {
    if quoted { "element" } else { "attribute" }
}

pub(super) fn label(name: &str, quoted: bool) -> Cow<'_, str> {
    if quoted {
        Cow::Owned(format!("\"{}\"", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Properties of `map` plus keys that only the unknown overlay knows about
pub(super) fn properties<'v>(
    map: &'v Map<String, Value>,
    unknown: Option<&'v Value>,
) -> Vec<Property<'v>> {
    let mut props: Vec<Property<'v>> = map
        .iter()
        .map(|(name, value)| Property { name, value })
        .collect();
    if let Some(Value::Object(pending)) = unknown {
        for name in pending.keys() {
            if !map.contains_key(name) {
                props.push(Property { name, value: &NULL });
            }
        }
    }
    props
}

/// Inline values first, block arrays last
///
/// Each group is sorted by key, or kept in document order when `order` follows
/// the before state.
pub(super) fn sort_by_kind(props: &mut [Property<'_>], order: PropertyOrder) {
    match order {
        PropertyOrder::Alphabetical => props.sort_by(|a, b| {
            (is_block_array(a.value), a.name).cmp(&(is_block_array(b.value), b.name))
        }),
        PropertyOrder::Before => props.sort_by_key(|p| is_block_array(p.value)),
    }
}

/// Column width for `name = value` alignment
///
/// Names written as `name = ...` take part: scalars, primitive arrays, maps
/// and anything the unknown overlay replaces with a placeholder.
pub(super) fn label_width<'v>(
    items: impl Iterator<Item = (&'v str, &'v Value)>,
    unknown: Option<&Value>,
    quoted: bool,
) -> usize {
    let widest = items
        .filter(|(name, value)| {
            if matches!(unknown.and_then(|u| u.get(*name)), Some(Value::Bool(true))) {
                return true;
            }
            match value {
                Value::Null => false,
                Value::Object(map) => is_map(map),
                other => is_scalar(other) || is_primitive_array(other),
            }
        })
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    if quoted && widest > 0 { widest + 2 } else { widest }
}

pub(super) fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Null or an empty collection
pub(super) fn is_void(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Void or an empty string
pub(super) fn is_blank(value: &Value) -> bool {
    is_void(value) || matches!(value, Value::String(text) if text.is_empty())
}

/// Array of objects; empty arrays count since their element type is unknown
pub(super) fn is_block_array(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_object),
        _ => false,
    }
}

pub(super) fn is_primitive_array(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty() && items.iter().all(is_scalar),
        _ => false,
    }
}

/// Object whose values are all scalars, shown with quoted keys
pub(super) fn is_map(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.values().all(is_scalar)
}
