//! Contrato de registro de escenarios y registro en memoria.

mod store;
mod types;

pub use store::{InMemoryTestRegistry, TestRegistry};
pub use types::Registration;
