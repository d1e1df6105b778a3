//! Terraform JSON plan model and loader

mod parser;
mod types;

pub use parser::PlanLoader;
pub use types::{Change, OutputChange, Plan, ResourceChange};
