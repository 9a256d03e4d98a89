use std::fmt;

use serde::{Deserialize, Serialize};

/// Tipo de un paso. No existen otros valores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepType {
    Given,
    When,
    Expect,
    Before,
    After,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Given => "GIVEN",
            StepType::When => "WHEN",
            StepType::Expect => "EXPECT",
            StepType::Before => "BEFORE",
            StepType::After => "AFTER",
        }
    }

    /// `true` para los hooks de ciclo de vida (`BEFORE`/`AFTER`).
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, StepType::Before | StepType::After)
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
