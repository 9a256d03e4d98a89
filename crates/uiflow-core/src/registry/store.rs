use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use indexmap::IndexMap;
use log::debug;
use uuid::Uuid;

use super::Registration;
use crate::builder::{ScenarioDescriptor, StepBuilder};

/// Colector central de escenarios.
///
/// `StepBuilder::new` llama a `register_test` exactamente una vez, de forma
/// síncrona, con el propio builder. Idempotencia, clave de almacenamiento y
/// orden de ejecución entre escenarios son decisión de cada implementación.
pub trait TestRegistry<T> {
    fn register_test(&self, builder: StepBuilder<T>);
}

impl<T, R: TestRegistry<T> + ?Sized> TestRegistry<T> for &R {
    fn register_test(&self, builder: StepBuilder<T>) {
        (**self).register_test(builder)
    }
}

impl<T, R: TestRegistry<T> + ?Sized> TestRegistry<T> for Arc<R> {
    fn register_test(&self, builder: StepBuilder<T>) {
        (**self).register_test(builder)
    }
}

/// Registro en memoria, seguro entre hilos.
///
/// Conserva el orden de alta y usa el id del builder como clave: registrar
/// dos veces la misma instancia no la duplica.
pub struct InMemoryTestRegistry<T> {
    inner: RwLock<IndexMap<Uuid, Registration<T>>>,
}

impl<T> InMemoryTestRegistry<T> {
    pub fn new() -> Self {
        Self { inner: RwLock::new(IndexMap::new()) }
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<Uuid, Registration<T>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<Uuid, Registration<T>>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<Registration<T>> {
        self.read().get(&id).cloned()
    }

    /// Registros en orden de alta.
    pub fn registrations(&self) -> Vec<Registration<T>> {
        self.read().values().cloned().collect()
    }

    /// Builders en orden de alta.
    pub fn builders(&self) -> Vec<StepBuilder<T>> {
        self.read().values().map(|r| r.builder.clone()).collect()
    }

    /// Builders cuyo `path` coincide; puede haber varios por fichero.
    pub fn by_path(&self, path: &str) -> Vec<StepBuilder<T>> {
        self.read().values().filter(|r| r.builder.path() == path).map(|r| r.builder.clone()).collect()
    }

    /// Vacía el registro y devuelve cuántos escenarios tenía.
    pub fn clear(&self) -> usize {
        let mut map = self.write();
        let n = map.len();
        map.clear();
        n
    }
}

impl<T: Clone> InMemoryTestRegistry<T> {
    pub fn descriptors(&self) -> Vec<ScenarioDescriptor<T>> {
        self.builders().iter().map(StepBuilder::descriptor).collect()
    }
}

impl<T> Default for InMemoryTestRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TestRegistry<T> for InMemoryTestRegistry<T> {
    fn register_test(&self, builder: StepBuilder<T>) {
        let id = builder.id();
        debug!("registry: scenario '{}' registered as {id}", builder.path());
        self.write().entry(id).or_insert_with(|| Registration { id, registered_at: Utc::now(), builder });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::payload;

    #[test]
    fn keeps_registration_order_and_filters_by_path() {
        let registry = InMemoryTestRegistry::<i32>::new();
        let a = StepBuilder::new("tests/a.rs", &registry);
        let b = StepBuilder::new("tests/b.rs", &registry);
        let a2 = StepBuilder::new("tests/a.rs", &registry);

        let ids: Vec<_> = registry.builders().iter().map(StepBuilder::id).collect();
        assert_eq!(ids, vec![a.id(), b.id(), a2.id()]);
        assert_eq!(registry.by_path("tests/a.rs").len(), 2);
        assert!(registry.by_path("tests/missing.rs").is_empty());
    }

    #[test]
    fn registering_same_instance_twice_is_idempotent() {
        let registry = InMemoryTestRegistry::<i32>::new();
        let builder = StepBuilder::new("p", &registry);
        let first_seen = registry.get(builder.id()).expect("registered").registered_at;
        registry.register_test(builder.clone());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(builder.id()).expect("registered").registered_at, first_seen);
    }

    #[test]
    fn sees_steps_added_after_registration() {
        let registry = InMemoryTestRegistry::<i32>::new();
        let _scenario = StepBuilder::new("p", &registry).test("late").given("a", payload(1));
        let descriptors = registry.descriptors();
        assert_eq!(descriptors[0].test_name, "late");
        assert_eq!(descriptors[0].steps.len(), 1);
    }

    #[test]
    fn clear_empties_registry() {
        let registry = Arc::new(InMemoryTestRegistry::<i32>::new());
        StepBuilder::new("p", &registry);
        StepBuilder::new("q", &registry);
        assert_eq!(registry.clear(), 2);
        assert!(registry.is_empty());
    }
}
