//! Full plan document: legend, resource blocks, summary and outputs

use super::lines::{INDENT, KNOWN_AFTER_APPLY, SENSITIVE_VALUE};
use super::renderer::DiffRenderer;
use super::types::{ActionKind, AnsiStyle};
use super::value::ValueFormatter;
use super::writer::AnsiTextWriter;
use crate::plan::{Change, OutputChange, Plan, ResourceChange};
use serde_json::Value;
use tracing::debug;

const LEGEND_INTRO: [&str; 2] = [
    "Terraform used the selected providers to generate the following execution",
    "plan. Resource actions are indicated with the following symbols:",
];

const ACTIONS_HEADING: &str = "Terraform will perform the following actions:";

const OUTPUTS_HEADING: &str = "Changes to Outputs:";

/// Renders a whole plan the way `terraform show` does
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowRenderer {
    diff: DiffRenderer,
    formatter: ValueFormatter,
}

impl ShowRenderer {
    pub fn new() -> Self {
        Self {
            diff: DiffRenderer::new(),
            formatter: ValueFormatter::new(),
        }
    }

    /// Render the complete document on the calling thread
    pub fn render(&self, plan: &Plan, color: bool) -> String {
        let resources = plan
            .resource_changes
            .iter()
            .filter_map(|change| self.render_resource(change, color))
            .collect();
        self.assemble(plan, color, resources)
    }

    /// Header, block and trailing blank line for one resource
    ///
    /// Returns `None` for no-op changes, which are not shown.
    pub fn render_resource(&self, change: &ResourceChange, color: bool) -> Option<AnsiTextWriter> {
        let action = change.action();
        if action == ActionKind::NoOp {
            return None;
        }
        debug!(
            address = %change.address,
            module = ?change.module_address,
            index = ?change.index,
            provider = ?change.provider_name,
            ?action,
            "Rendering resource change"
        );

        let mut writer = AnsiTextWriter::new(color);
        write_header(&mut writer, change, action);
        self.write_block(&mut writer, change, action);
        writer.end_line();
        Some(writer)
    }

    /// Join pre-rendered resource fragments into the final document
    ///
    /// `resources` must be in plan order.
    pub fn assemble(&self, plan: &Plan, color: bool, resources: Vec<AnsiTextWriter>) -> String {
        let mut writer = AnsiTextWriter::new(color);
        writer.end_line();
        write_legend(&mut writer, plan);

        writer.write_line(ACTIONS_HEADING);
        writer.end_line();
        for resource in resources {
            writer.append(resource);
        }

        write_summary(&mut writer, plan);
        self.write_outputs(&mut writer, plan);
        writer.into_string()
    }

    fn write_block(&self, writer: &mut AnsiTextWriter, change: &ResourceChange, action: ActionKind) {
        let keyword = if change.is_data_source() { "data" } else { "resource" };

        writer.write_reset();
        writer.write(action.block_indent());
        write_action_marker(writer, action);
        writer.write_reset();
        writer.write_line(&format!(
            " {} \"{}\" \"{}\" {{",
            keyword, change.resource_type, change.name
        ));

        self.diff.render_attributes(writer, change, action, INDENT);

        writer.write(INDENT);
        writer.write(INDENT);
        writer.write_line("}");
    }

    fn write_outputs(&self, writer: &mut AnsiTextWriter, plan: &Plan) {
        let outputs = OutputChange::collect(&plan.output_changes);
        if outputs.is_empty() {
            return;
        }

        // Aligned against every output, including unchanged ones
        let width = plan
            .output_changes
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);

        writer.end_line();
        writer.write_line(OUTPUTS_HEADING);
        for output in &outputs {
            debug!(output = %output.name, action = ?output.action, "Rendering output change");
            let name = format!("{:<width$}", output.name, width = width);
            let change = &output.change;
            writer.write(INDENT);
            match output.action {
                ActionKind::Create => {
                    writer.write_styled("+", &[AnsiStyle::Green]);
                    writer.write(&format!(" {} = ", name));
                    writer.write_line(&self.output_after(change));
                }
                ActionKind::Delete => {
                    writer.write_styled("-", &[AnsiStyle::Red]);
                    writer.write(&format!(" {} = ", name));
                    writer.write(&self.output_before(change));
                    writer.write(" ");
                    writer.write_line_styled("-> null", &[AnsiStyle::Dim]);
                }
                _ => {
                    writer.write_styled("~", &[AnsiStyle::Yellow]);
                    writer.write_reset();
                    writer.write(&format!(" {} = ", name));
                    writer.write(&self.output_before(change));
                    writer.write(" -> ");
                    writer.write_line(&self.output_after(change));
                }
            }
        }
    }

    fn output_before(&self, change: &Change) -> String {
        if root_flagged(&change.before_sensitive) || root_flagged(&change.after_sensitive) {
            return SENSITIVE_VALUE.to_string();
        }
        self.output_text(change.before.as_ref())
    }

    fn output_after(&self, change: &Change) -> String {
        if root_flagged(&change.after_sensitive) {
            return SENSITIVE_VALUE.to_string();
        }
        if root_flagged(&change.after_unknown) {
            return KNOWN_AFTER_APPLY.to_string();
        }
        self.output_text(change.after.as_ref())
    }

    fn output_text(&self, value: Option<&Value>) -> String {
        value.map(|v| self.formatter.render(v)).unwrap_or_default()
    }
}

fn root_flagged(overlay: &Option<Value>) -> bool {
    matches!(overlay, Some(Value::Bool(true)))
}

fn write_legend(writer: &mut AnsiTextWriter, plan: &Plan) {
    let has = |kind: ActionKind| plan.resource_changes.iter().any(|rc| rc.action() == kind);

    for line in LEGEND_INTRO {
        writer.write_line(line);
    }
    for (symbol, style, description) in [
        ("+", AnsiStyle::Green, "create"),
        ("~", AnsiStyle::Yellow, "update in-place"),
        ("-", AnsiStyle::Red, "destroy"),
    ] {
        writer.write(INDENT);
        writer.write_styled(symbol, &[style]);
        writer.write(" ");
        writer.write(description);
        writer.write_reset();
        writer.end_line();
    }
    if has(ActionKind::Replace) {
        write_action_marker(writer, ActionKind::Replace);
        writer.write(" destroy and then create replacement");
        writer.write_reset();
        writer.end_line();
    }
    if has(ActionKind::Read) {
        writer.write(" ");
        writer.write_styled("<=", &[AnsiStyle::Cyan]);
        writer.write(" read (data resources)");
        writer.write_reset();
        writer.end_line();
    }
    writer.end_line();
}

/// Marker column of a resource line, without its indentation
fn write_action_marker(writer: &mut AnsiTextWriter, action: ActionKind) {
    match action {
        ActionKind::Create => writer.write_styled("+", &[AnsiStyle::Green]),
        ActionKind::Delete => writer.write_styled("-", &[AnsiStyle::Red]),
        ActionKind::Read => writer.write_styled("<=", &[AnsiStyle::Cyan]),
        ActionKind::Replace => {
            writer.write_styled("-", &[AnsiStyle::Red]);
            writer.write("/");
            writer.write_styled("+", &[AnsiStyle::Green]);
        }
        ActionKind::Update | ActionKind::NoOp | ActionKind::Unknown => {
            writer.write_styled("~", &[AnsiStyle::Yellow])
        }
    }
}

fn write_header(writer: &mut AnsiTextWriter, change: &ResourceChange, action: ActionKind) {
    let (verb, emphasis) = action.verb();
    writer.write(INDENT);
    writer.write_styled(&format!("# {}", change.address), &[AnsiStyle::Bold]);
    writer.write(" ");
    writer.write(verb);
    if let Some(emphasis) = emphasis {
        writer.write_styled(emphasis, &[AnsiStyle::Bold, AnsiStyle::Red]);
    }
    writer.end_line();

    if let Some(reason) = change.action_reason.as_deref().and_then(|r| reason_comment(r, change)) {
        writer.write(INDENT);
        writer.write_line(&reason);
    }
}

fn reason_comment(reason: &str, change: &ResourceChange) -> Option<String> {
    match reason {
        "replace_because_cannot_update" => None,
        "read_because_dependency_pending" => {
            Some("# (depends on a resource or a module with changes pending)".to_string())
        }
        "delete_because_no_resource_config" => Some(format!(
            "# (because {} is not in configuration)",
            change.address
        )),
        other => Some(format!("# ({})", other)),
    }
}

fn write_summary(writer: &mut AnsiTextWriter, plan: &Plan) {
    let (add, change, destroy) = plan
        .resource_changes
        .iter()
        .map(|rc| rc.action().summary_counts())
        .fold((0, 0, 0), |acc, counts| {
            (acc.0 + counts.0, acc.1 + counts.1, acc.2 + counts.2)
        });

    writer.write_styled("Plan:", &[AnsiStyle::Bold]);
    writer.write(" ");
    writer.write_line(&format!(
        "{} to add, {} to change, {} to destroy.",
        add, change, destroy
    ));
}
