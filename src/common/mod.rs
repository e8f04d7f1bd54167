//! Common utilities shared across the riskmap codebase.
//!
//! Key components:
//! - **Ratios**: the one place means, ratios and percentages are computed, so an
//!   empty denominator always resolves to a defined default instead of `NaN`
//! - **Text utilities**: number and currency formatting for display labels

pub mod ratio;
pub mod text;

pub use ratio::{mean, percentage, ratio_or, rounded_percentage, safe_ratio};
pub use text::{format_currency, group_thousands};
