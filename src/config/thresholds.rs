use serde::{Deserialize, Serialize};

/// Score boundaries for one entity type.
///
/// A score at or above `high` is HIGH, at or above `medium` is MEDIUM, otherwise LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThresholds {
    #[serde(default = "default_high_threshold")]
    pub high: u8,

    #[serde(default = "default_medium_threshold")]
    pub medium: u8,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            high: default_high_threshold(),
            medium: default_medium_threshold(),
        }
    }
}

impl LevelThresholds {
    pub fn new(high: u8, medium: u8) -> Self {
        Self { high, medium }
    }

    pub fn validation_errors(&self, scope: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if self.high > 100 {
            errors.push(format!(
                "thresholds.{}.high {} is invalid (must be 0-100)",
                scope, self.high
            ));
        }
        if self.medium > self.high {
            errors.push(format!(
                "thresholds.{}.medium {} must not exceed high {}",
                scope, self.medium, self.high
            ));
        }
        errors
    }
}

/// One threshold table per entity type. All three default to the same 70/30 table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default)]
    pub employee: LevelThresholds,

    #[serde(default)]
    pub system: LevelThresholds,

    #[serde(default)]
    pub team: LevelThresholds,
}

impl ThresholdsConfig {
    pub fn validation_errors(&self) -> Vec<String> {
        [
            ("employee", &self.employee),
            ("system", &self.system),
            ("team", &self.team),
        ]
        .into_iter()
        .flat_map(|(scope, table)| table.validation_errors(scope))
        .collect()
    }
}

fn default_high_threshold() -> u8 {
    70
}
fn default_medium_threshold() -> u8 {
    30
}
