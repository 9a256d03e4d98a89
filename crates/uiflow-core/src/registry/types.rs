use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::builder::StepBuilder;

/// Alta de un builder en un registro.
pub struct Registration<T> {
    pub id: Uuid,
    pub registered_at: DateTime<Utc>, // metadato, no participa en el orden
    pub builder: StepBuilder<T>,
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self { id: self.id, registered_at: self.registered_at, builder: self.builder.clone() }
    }
}
