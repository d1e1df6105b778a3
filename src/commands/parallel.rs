//! Parallel rendering of resource changes.
//!
//! Each resource is rendered into its own writer on the blocking pool, with at
//! most `jobs` renders in flight. Fragments come back in plan order.

use crate::diff::{AnsiTextWriter, ShowRenderer};
use crate::error::ShowError;
use crate::plan::Plan;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Render every resource change of `plan`, skipping no-ops
///
/// # Arguments
/// * `plan` - Plan shared with the worker tasks
/// * `renderer` - Renderer copied into each task
/// * `color` - Whether fragments carry ANSI styling
/// * `jobs` - Maximum number of concurrent renders
pub async fn render_resources_parallel(
    plan: Arc<Plan>,
    renderer: ShowRenderer,
    color: bool,
    jobs: usize,
) -> Result<Vec<AnsiTextWriter>, ShowError> {
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut handles = Vec::with_capacity(plan.resource_changes.len());

    for index in 0..plan.resource_changes.len() {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ShowError::Render(e.to_string()))?;
        let plan = Arc::clone(&plan);

        handles.push(tokio::task::spawn_blocking(move || {
            let fragment = renderer.render_resource(&plan.resource_changes[index], color);
            drop(permit);
            fragment
        }));
    }

    let mut fragments = Vec::with_capacity(handles.len());
    for handle in handles {
        let fragment = handle
            .await
            .map_err(|e| ShowError::Render(format!("Task panicked: {}", e)))?;
        fragments.extend(fragment);
    }

    Ok(fragments)
}
