//! `StepBuilder`: acumulador fluido de pasos de un escenario.
//!
//! Notas de diseño
//! - El builder es un handle barato (`Arc`) sobre estado compartido. El
//!   registro guarda un clon del mismo handle en la construcción, así que ve
//!   cada paso añadido después.
//! - Los métodos encadenables consumen `self` y lo devuelven, igual que el
//!   resto de builders del workspace.
//! - `before`/`after` no esperan al callback del hook: lo dejan pendiente (ver
//!   `pending`) y cualquiera puede esperarlo después con `settle()`.

mod core;
mod descriptor;
mod pending;

pub use self::core::StepBuilder;
pub use descriptor::ScenarioDescriptor;
pub use pending::HookMode;
