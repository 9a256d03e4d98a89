//! Errores del core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StepError {
    #[error("callback failed: {0}")] Callback(String),
    #[error("hook task panicked: {0}")] HookPanicked(String),
    #[error("hook task cancelled before completion")] HookCancelled,
    #[error("invalid hook mode: {0}")] InvalidHookMode(String),
}

impl StepError {
    /// Atajo para que los callbacks reporten un fallo con mensaje libre.
    pub fn callback(msg: impl Into<String>) -> Self {
        Self::Callback(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_variant_format() {
        let err = StepError::callback("login form missing");
        assert_eq!(err.to_string(), "callback failed: login form missing");
    }

    #[test]
    fn errors_roundtrip_through_json() {
        let err = StepError::HookPanicked("boom".into());
        let json = serde_json::to_string(&err).expect("serialize");
        let back: StepError = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, err);
    }
}
