//! Modelo de pasos de un escenario.
//!
//! Un escenario es una secuencia ordenada de `Step`. Este módulo define:
//! - `StepType`: enumeración cerrada de tipos de paso.
//! - `Step`: registro que consume el motor de ejecución.
//! - `StepCallback` / `SharedCallback`: acción asíncrona opcional de un paso.
//! - `StepInput` / `StepArg` / `Hook`: las formas de argumento que aceptan los
//!   métodos del builder. La forma se decide por tipo, nunca por el valor.

mod callable;
mod input;
mod kind;
mod record;

pub(crate) use callable::invoke;
pub use callable::{SharedCallback, StepCallback, StepFuture};
pub use input::{callback, payload, CallbackArg, Hook, Payload, StepArg, StepInput};
pub use kind::StepType;
pub use record::Step;
