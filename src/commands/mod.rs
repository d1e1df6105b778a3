pub mod parallel;
pub mod show;

pub use show::{ShowCommand, ShowOptions};
