use std::fmt;

use serde::Serialize;

use super::{SharedCallback, StepType};

/// Descriptor de un paso tal como lo lee el motor de ejecución.
///
/// Los campos son privados: `has_callback` se calcula una sola vez en `new` a
/// partir de `callback` y no hay forma de modificar uno sin el otro.
///
/// Serializado queda como `{"type","description","action","payload"?,"hasCallback"}`;
/// el callback nunca se serializa y `payload` se omite si no existe.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step<T> {
    #[serde(rename = "type")]
    step_type: StepType,
    description: String,
    action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<T>,
    #[serde(skip)]
    callback: Option<SharedCallback>,
    has_callback: bool,
}

impl<T> Step<T> {
    pub fn new(step_type: StepType,
               description: impl Into<String>,
               action: impl Into<String>,
               payload: Option<T>,
               callback: Option<SharedCallback>)
               -> Self {
        let has_callback = callback.is_some();
        Self { step_type,
               description: description.into(),
               action: action.into(),
               payload,
               callback,
               has_callback }
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn action(&self) -> &str {
        &self.action
    }
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }
    pub fn callback(&self) -> Option<&SharedCallback> {
        self.callback.as_ref()
    }
    pub fn has_callback(&self) -> bool {
        self.has_callback
    }
}

impl<T: Clone> Clone for Step<T> {
    fn clone(&self) -> Self {
        Self { step_type: self.step_type,
               description: self.description.clone(),
               action: self.action.clone(),
               payload: self.payload.clone(),
               callback: self.callback.clone(),
               has_callback: self.has_callback }
    }
}

impl<T: fmt::Debug> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
         .field("step_type", &self.step_type)
         .field("description", &self.description)
         .field("action", &self.action)
         .field("payload", &self.payload)
         .field("has_callback", &self.has_callback)
         .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn has_callback_follows_callback_presence() {
        let cb: SharedCallback = Arc::new(|| async { Ok::<(), crate::StepError>(()) });
        let with = Step::<()>::new(StepType::When, "click", "click", None, Some(cb));
        let without = Step::<()>::new(StepType::When, "click", "click", None, None);
        assert!(with.has_callback() && with.callback().is_some());
        assert!(!without.has_callback() && without.callback().is_none());
    }

    #[test]
    fn serialized_shape_omits_missing_payload_and_callback() {
        let bare = Step::<serde_json::Value>::new(StepType::Expect, "title shown", "title shown", None, None);
        assert_eq!(serde_json::to_value(&bare).unwrap(),
                   json!({"type": "EXPECT", "description": "title shown", "action": "title shown", "hasCallback": false}));

        let loaded = Step::new(StepType::Before, "SET_STATE", "SET_STATE", Some(json!({"x": 1})), None);
        assert_eq!(serde_json::to_value(&loaded).unwrap()["payload"], json!({"x": 1}));
    }
}
