//! uiflow Rust Library
//!
//! Capa de aplicación sobre `uiflow-core`:
//! - `config`: configuración desde entorno/.env (`CONFIG`).
//! - `global`: registro de escenarios de todo el proceso.
//! - `errors`: error de aplicación.
//!
//! Reexporta la API de builder para que los ficheros de escenarios sólo
//! dependan de este crate.

pub mod config;
pub mod errors;
pub mod global;

pub use uiflow_core::{callback, constants, payload, Hook, HookMode, InMemoryTestRegistry, ScenarioDescriptor, Step, StepBuilder, StepError, StepType, TestRegistry};
