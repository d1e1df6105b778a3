use crate::commands::parallel::render_resources_parallel;
use crate::context::Context;
use crate::diff::ShowRenderer;
use crate::error::ShowError;
use crate::plan::{Plan, PlanLoader};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a single render
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// Plan JSON produced by `terraform show -json`
    pub input: PathBuf,
    /// Write the document here instead of stdout
    pub output: Option<PathBuf>,
    /// Emit ANSI escape sequences
    pub color: bool,
    /// Resource renders in flight; 1 renders on the calling thread
    pub jobs: usize,
}

/// Handles rendering a plan file
pub struct ShowCommand;

impl ShowCommand {
    /// Load the plan, render it and deliver the document
    pub fn execute(ctx: &Context, options: &ShowOptions) -> Result<(), ShowError> {
        if !ctx.fs.exists(&options.input) || ctx.fs.is_dir(&options.input) {
            return Err(ShowError::InputNotFound(options.input.clone()));
        }

        let text = ctx
            .fs
            .read_to_string(&options.input)
            .map_err(|e| ShowError::Io(format!("{:#}", e)))?;
        let plan = PlanLoader::new().load(&text)?;
        info!(
            input = %options.input.display(),
            format_version = plan.format_version.as_deref().unwrap_or_default(),
            terraform_version = plan.terraform_version.as_deref().unwrap_or("unknown"),
            resources = plan.resource_changes.len(),
            "Loaded plan"
        );

        let document = Self::render(plan, options)?;

        match &options.output {
            Some(path) => {
                ctx.fs
                    .write(path, &document)
                    .map_err(|e| ShowError::WriteFailed(format!("{:#}", e)))?;
                info!(output = %path.display(), bytes = document.len(), "Wrote rendered plan");
            }
            None => {
                ctx.output
                    .document(&document)
                    .map_err(|e| ShowError::WriteFailed(format!("{:#}", e)))?;
            }
        }

        Ok(())
    }

    fn render(plan: Plan, options: &ShowOptions) -> Result<String, ShowError> {
        let renderer = ShowRenderer::new();
        if options.jobs <= 1 || plan.resource_changes.len() <= 1 {
            return Ok(renderer.render(&plan, options.color));
        }

        debug!(jobs = options.jobs, "Rendering resources in parallel");
        let plan = Arc::new(plan);
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ShowError::Render(format!("Failed to create tokio runtime: {}", e)))?;
        let fragments = runtime.block_on(render_resources_parallel(
            Arc::clone(&plan),
            renderer,
            options.color,
            options.jobs,
        ))?;

        Ok(renderer.assemble(&plan, options.color, fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{PlanBuilder, ResourceChangeBuilder};
    use crate::traits::{FileSystem, MockFileSystem, MockOutput};
    use serde_json::json;
    use std::path::Path;

    fn setup(plan_json: &str) -> (Context, Arc<MockFileSystem>, Arc<MockOutput>) {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/work/plan.json", plan_json);
        let output = Arc::new(MockOutput::new());
        let ctx = Context::test_with(fs.clone(), output.clone());
        (ctx, fs, output)
    }

    fn options() -> ShowOptions {
        ShowOptions {
            input: PathBuf::from("/work/plan.json"),
            output: None,
            color: false,
            jobs: 1,
        }
    }

    fn sample_plan() -> PlanBuilder {
        PlanBuilder::new()
            .resource(
                ResourceChangeBuilder::update()
                    .named("aws_instance", "web")
                    .before(json!({"size": "small"}))
                    .after(json!({"size": "large"})),
            )
            .resource(
                ResourceChangeBuilder::create()
                    .named("aws_eip", "ip")
                    .after(json!({"domain": "vpc"})),
            )
    }

    #[test]
    fn test_renders_to_output() {
        let (ctx, _, output) = setup(&sample_plan().to_json());

        ShowCommand::execute(&ctx, &options()).unwrap();

        let document = output.documents();
        assert!(document.contains("  # aws_instance.web will be updated in-place"));
        assert!(document.contains("      ~ size = \"small\" -> \"large\""));
        assert!(document.contains("Plan: 1 to add, 1 to change, 0 to destroy."));
        assert!(!document.contains('\x1b'));
    }

    #[test]
    fn test_writes_output_file() {
        let (ctx, fs, output) = setup(&sample_plan().to_json());
        let target = PathBuf::from("/work/out/nested/plan.txt");

        ShowCommand::execute(
            &ctx,
            &ShowOptions {
                output: Some(target.clone()),
                ..options()
            },
        )
        .unwrap();

        let written = fs.get_file_contents(&target).unwrap();
        assert!(written.starts_with("\nTerraform used the selected providers"));
        assert!(output.documents().is_empty());
        assert!(fs.is_dir(Path::new("/work/out/nested")));
    }

    #[test]
    fn test_parallel_render_matches_sequential() {
        let plan_json = sample_plan().to_json();
        let (ctx, _, sequential) = setup(&plan_json);
        ShowCommand::execute(&ctx, &options()).unwrap();

        let (ctx, _, parallel) = setup(&plan_json);
        ShowCommand::execute(&ctx, &ShowOptions { jobs: 4, ..options() }).unwrap();

        assert_eq!(sequential.documents(), parallel.documents());
    }

    #[test]
    fn test_color_output() {
        let (ctx, _, output) = setup(&sample_plan().to_json());

        ShowCommand::execute(&ctx, &ShowOptions { color: true, ..options() }).unwrap();

        assert!(output.documents().contains("\x1b[1mPlan:\x1b[0m"));
    }

    #[test]
    fn test_missing_input() {
        let ctx = Context::test();

        let err = ShowCommand::execute(&ctx, &options()).unwrap_err();

        assert!(matches!(err, ShowError::InputNotFound(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_json() {
        let (ctx, _, _) = setup("{\"format_version\": ");

        let err = ShowCommand::execute(&ctx, &options()).unwrap_err();

        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_unsupported_format() {
        let (ctx, _, output) = setup(&sample_plan().format_version("1.1").to_json());

        let err = ShowCommand::execute(&ctx, &options()).unwrap_err();

        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("1.1"));
        assert!(output.documents().is_empty());
    }

    #[test]
    fn test_write_failure() {
        let (ctx, fs, _) = setup(&sample_plan().to_json());
        fs.deny_writes("/readonly");

        let err = ShowCommand::execute(
            &ctx,
            &ShowOptions {
                output: Some(PathBuf::from("/readonly/plan.txt")),
                ..options()
            },
        )
        .unwrap_err();

        assert!(matches!(err, ShowError::WriteFailed(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
