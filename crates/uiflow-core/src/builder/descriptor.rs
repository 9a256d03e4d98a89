use serde::Serialize;
use uuid::Uuid;

use crate::step::Step;

/// Instantánea serializable de un escenario: lo que lee el motor de ejecución.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDescriptor<T> {
    pub id: Uuid,
    pub path: String,
    pub test_name: String,
    pub suite_name: String,
    pub steps: Vec<Step<T>>,
}
