use thiserror::Error;
use uiflow_core::StepError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en escenario: {0}")]
    Step(#[from] StepError),
}
