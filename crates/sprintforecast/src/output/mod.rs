//! Rendering of forecasts and plans.

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_plan, format_result, format_summary};
