//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! Hoy sólo gobierna cómo se ejecutan los callbacks de hooks `before`/`after`
//! de los escenarios creados con `global::scenario`.
use std::env;

use log::warn;
use once_cell::sync::Lazy;
use uiflow_core::HookMode;

use crate::errors::AppError;

/// Variable que selecciona el `HookMode` (`spawn` | `deferred`).
pub const HOOK_MODE_VAR: &str = "UIFLOW_HOOK_MODE";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub hooks: HookConfig,
}

/// Parámetros de ejecución de hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookConfig {
    pub mode: HookMode,
}

impl AppConfig {
    /// Construye la configuración a partir de una función de búsqueda de
    /// claves. Un valor ausente o vacío usa el valor por defecto.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let mode = match lookup(HOOK_MODE_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse::<HookMode>().map_err(|e| AppError::Config(format!("{HOOK_MODE_VAR}: {e}")))?
            }
            _ => HookMode::default(),
        };
        Ok(Self { hooks: HookConfig { mode } })
    }

    /// Lee `.env` (si existe) y el entorno del proceso. Un valor inválido se
    /// registra con `warn!` y se sustituye por el valor por defecto.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok()).unwrap_or_else(|e| {
                                                       warn!("{e}; using default configuration");
                                                       Self::default()
                                                   })
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
