//! uiflow-core: builder declarativo de escenarios Given/When/Expect.
//!
//! Un escenario se describe encadenando pasos sobre un `StepBuilder`, que se
//! registra solo en un `TestRegistry` al construirse. El resultado es una
//! lista ordenada de `Step` que un motor de ejecución externo reproduce; aquí
//! no se ejecuta ni se informa nada, salvo los callbacks de hooks
//! `before`/`after`, que se lanzan al añadirse.
pub mod builder;
pub mod constants;
pub mod errors;
pub mod registry;
pub mod step;

pub use builder::{HookMode, ScenarioDescriptor, StepBuilder};
pub use errors::StepError;
pub use registry::{InMemoryTestRegistry, Registration, TestRegistry};
pub use step::{callback, payload, CallbackArg, Hook, Payload, SharedCallback, Step, StepArg, StepCallback, StepInput, StepType};
