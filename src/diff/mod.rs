//! Plan diff rendering
//!
//! Turns the changes of a Terraform JSON plan into the human-readable,
//! color-coded text that `terraform show` prints.
//!
//! # Layout
//!
//! - [`ShowRenderer`] produces the whole document: legend, resource blocks,
//!   summary line and the outputs section
//! - [`DiffRenderer`] renders the attribute body of one resource
//! - [`AnsiTextWriter`] collects text and ANSI styling, and keeps blank lines
//!   from doubling up
//!
//! # Example
//!
//! ```ignore
//! use crate::diff::ShowRenderer;
//! use crate::plan::PlanLoader;
//!
//! let plan = PlanLoader::new().load(&json_text)?;
//! let text = ShowRenderer::new().render(&plan, true);
//! print!("{}", text);
//! ```

mod blocks;
mod lines;
mod paths;
mod renderer;
mod show;
mod types;
mod value;
mod values;
mod writer;

pub use paths::ReplacePaths;
pub use show::ShowRenderer;
pub use types::ActionKind;
pub use writer::AnsiTextWriter;
