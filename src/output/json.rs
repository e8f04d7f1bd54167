use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-printed JSON, the machine-readable output of every command.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
