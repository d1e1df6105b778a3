//! Line-level building blocks shared by the attribute renderers

use super::types::{AnsiStyle, Marker};
use super::writer::AnsiTextWriter;

/// One level of indentation
pub const INDENT: &str = "  ";

pub(crate) const KNOWN_AFTER_APPLY: &str = "(known after apply)";
pub(crate) const SENSITIVE_VALUE: &str = "(sensitive value)";

/// Optional trailers on an attribute line
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Trailer {
    /// Dim `-> null`, used when a value is removed
    pub to_null: bool,
    /// Red `# forces replacement`
    pub forces_replacement: bool,
}

impl Trailer {
    pub fn replacement(forces_replacement: bool) -> Self {
        Self {
            to_null: false,
            forces_replacement,
        }
    }

    pub fn removal() -> Self {
        Self {
            to_null: true,
            forces_replacement: false,
        }
    }
}

/// `indent` followed by `levels` extra indentation steps
pub(crate) fn deeper(indent: &str, levels: usize) -> String {
    format!("{}{}", indent, INDENT.repeat(levels))
}

pub(crate) fn write_marker(writer: &mut AnsiTextWriter, marker: Marker) {
    writer.write_styled(marker.symbol(), &[marker.style()]);
    writer.write_reset();
    writer.write(" ");
}

fn write_name(writer: &mut AnsiTextWriter, label: &str, width: usize) {
    writer.write(&format!("{:<width$}", label, width = width));
    writer.write(" = ");
}

fn write_trailer(writer: &mut AnsiTextWriter, trailer: Trailer) {
    if trailer.to_null {
        writer.write(" ");
        writer.write_styled("-> null", &[AnsiStyle::Dim]);
    }
    if trailer.forces_replacement {
        writer.write(" ");
        writer.write_styled("# forces replacement", &[AnsiStyle::Red]);
    }
}

/// `<indent><marker> <label> = <value>` with optional trailers
pub(crate) fn write_scalar_line(
    writer: &mut AnsiTextWriter,
    indent: &str,
    marker: Marker,
    label: &str,
    width: usize,
    value: &str,
    trailer: Trailer,
) {
    writer.write(indent);
    write_marker(writer, marker);
    write_name(writer, label, width);
    writer.write(value);
    write_trailer(writer, trailer);
    writer.end_line();
}

/// Unmarked attribute shown for context, aligned with marked siblings
pub(crate) fn write_context_line(
    writer: &mut AnsiTextWriter,
    indent: &str,
    label: &str,
    width: usize,
    value: &str,
) {
    writer.write(indent);
    writer.write(INDENT);
    write_name(writer, label, width);
    writer.write(value);
    writer.end_line();
}

/// `<indent>~ <label> = <before> -> <after>`
pub(crate) fn write_arrow_line(
    writer: &mut AnsiTextWriter,
    indent: &str,
    label: &str,
    width: usize,
    before: &str,
    after: &str,
    forces_replacement: bool,
) {
    writer.write(indent);
    write_marker(writer, Marker::Change);
    write_name(writer, label, width);
    writer.write(before);
    writer.write(" ");
    writer.write_styled("->", &[AnsiStyle::Yellow]);
    writer.write(" ");
    writer.write(after);
    write_trailer(writer, Trailer::replacement(forces_replacement));
    writer.end_line();
}

/// Opening line of a nested structure: `<indent><marker> <label> <opener>`
///
/// `opener` carries the punctuation, e.g. `= {`, `= [` or `{`. The label is
/// padded to `width` so `=` openers line up with scalar siblings.
pub(crate) fn write_opening(
    writer: &mut AnsiTextWriter,
    indent: &str,
    marker: Marker,
    label: &str,
    width: usize,
    opener: &str,
    forces_replacement: bool,
) {
    writer.write(indent);
    write_marker(writer, marker);
    if !label.is_empty() {
        writer.write(&format!("{:<width$}", label, width = width));
        writer.write(" ");
    }
    writer.write(opener);
    write_trailer(writer, Trailer::replacement(forces_replacement));
    writer.end_line();
}

/// Closing punctuation one level below the opening marker column
pub(crate) fn write_closing(
    writer: &mut AnsiTextWriter,
    indent: &str,
    closer: &str,
    trailer: Trailer,
) {
    writer.write(indent);
    writer.write(INDENT);
    writer.write(closer);
    write_trailer(writer, trailer);
    writer.end_line();
}

/// `<indent><marker> <text>,` for an element of a list
pub(crate) fn write_list_item(writer: &mut AnsiTextWriter, indent: &str, marker: Marker, text: &str) {
    writer.write(indent);
    write_marker(writer, marker);
    writer.write(text);
    writer.write_line(",");
}

/// `# (N unchanged <noun>s hidden)`
pub(crate) fn write_unchanged_comment(
    writer: &mut AnsiTextWriter,
    indent: &str,
    count: usize,
    noun: &str,
) {
    let plural = if count == 1 { "" } else { "s" };
    writer.write(indent);
    writer.write_line_styled(
        &format!("# ({} unchanged {}{} hidden)", count, noun, plural),
        &[AnsiStyle::Dim],
    );
}

/// Block whose contents are withheld because part of it is sensitive
pub(crate) fn write_sensitive_block(
    writer: &mut AnsiTextWriter,
    indent: &str,
    marker: Marker,
    label: &str,
) {
    write_opening(writer, indent, marker, label, 0, "{", false);
    let comment_indent = deeper(indent, 3);
    writer.write(&comment_indent);
    writer.write_line_styled(
        "# At least one attribute in this block is (or was) sensitive,",
        &[AnsiStyle::Dim],
    );
    writer.write(&comment_indent);
    writer.write_line_styled("# so its contents will not be displayed.", &[AnsiStyle::Dim]);
    write_closing(writer, indent, "}", Trailer::default());
}
