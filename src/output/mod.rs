//! Rendering of command results as JSON or terminal tables.

pub mod json;
pub mod terminal;

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;

pub use json::to_json;
pub use terminal::{level_color, risk_table, RiskRow, TerminalView};

/// Renders `value` in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> Result<String>
where
    T: Serialize + TerminalView,
{
    match format {
        OutputFormat::Json => to_json(value),
        OutputFormat::Terminal => Ok(value.render_terminal()),
    }
}

/// Renders `value` and writes it to stdout.
pub fn emit<T>(value: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize + TerminalView,
{
    println!("{}", render(value, format)?);
    Ok(())
}
