//! Registro de escenarios de todo el proceso.
//!
//! Los ficheros de escenarios llaman a `scenario(path)` y el builder queda
//! registrado aquí sin más pasos. El registro se inicializa en el primer uso
//! y `reset()` lo vacía (teardown entre ejecuciones o tests). Quien necesite
//! aislamiento debe inyectar su propio `InMemoryTestRegistry` en
//! `StepBuilder::new` en lugar de usar este módulo.
use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use uiflow_core::{InMemoryTestRegistry, StepBuilder};

use crate::config::CONFIG;
use crate::errors::AppError;

static REGISTRY: Lazy<InMemoryTestRegistry<Value>> = Lazy::new(InMemoryTestRegistry::new);

pub fn registry() -> &'static InMemoryTestRegistry<Value> {
    &REGISTRY
}

/// Crea un escenario registrado en el registro global, con el `HookMode` de
/// `CONFIG`.
pub fn scenario(path: impl Into<String>) -> StepBuilder<Value> {
    StepBuilder::with_mode(path, registry(), CONFIG.hooks.mode)
}

/// Liquida los hooks pendientes de todos los escenarios registrados.
///
/// Recorre todos aunque alguno falle y devuelve el primer error.
pub async fn settle_all() -> Result<(), AppError> {
    let mut first_err = None;
    for builder in registry().builders() {
        if let Err(e) = builder.settle().await {
            warn!("hooks of '{}' failed: {e}", builder.path());
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Vacía el registro global y devuelve cuántos escenarios contenía.
pub fn reset() -> usize {
    registry().clear()
}
