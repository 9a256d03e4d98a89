use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};
use serde_json::Value;
use uuid::Uuid;

use super::descriptor::ScenarioDescriptor;
use super::pending::{HookMode, PendingHook};
use crate::errors::StepError;
use crate::registry::TestRegistry;
use crate::step::{Hook, SharedCallback, Step, StepInput, StepType};

struct ScenarioState<T> {
    test_name: String,
    suite_name: String,
    steps: Vec<Step<T>>,
}

struct Shared<T> {
    id: Uuid,
    path: String,
    mode: HookMode,
    state: RwLock<ScenarioState<T>>,
    pending: Mutex<Vec<PendingHook>>,
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        for hook in pending.drain(..) {
            if hook.is_deferred() {
                warn!("scenario '{}' dropped with unsettled {} hook at step {}: callback never invoked",
                      self.path,
                      hook.step_type(),
                      hook.step_index());
            } else {
                warn!("scenario '{}' dropped with unsettled {} hook at step {}: task left detached",
                      self.path,
                      hook.step_type(),
                      hook.step_index());
            }
        }
    }
}

/// Builder de un escenario Given/When/Expect.
///
/// Se crea una vez por escenario y se registra en el `TestRegistry` recibido
/// durante la construcción; no existe un builder sin registrar. Los clones
/// comparten estado: todos son la misma instancia (`is_same`).
///
/// ```ignore
/// let registry = InMemoryTestRegistry::<i32>::new();
/// let login = StepBuilder::new("tests/login.rs", &registry)
///     .test("user can log in")
///     .given("a registered user", payload(1))
///     .when("the form is submitted", callback(|| async { Ok(()) }))
///     .expect("the dashboard is shown", ());
/// ```
pub struct StepBuilder<T = Value> {
    inner: Arc<Shared<T>>,
}

impl<T> StepBuilder<T> {
    /// Crea el builder para `path` y lo registra, usando `HookMode::Spawn`.
    pub fn new<R>(path: impl Into<String>, registry: &R) -> Self
        where R: TestRegistry<T> + ?Sized
    {
        Self::with_mode(path, registry, HookMode::default())
    }

    /// Igual que `new` pero eligiendo cómo se ejecutan los callbacks de hooks.
    pub fn with_mode<R>(path: impl Into<String>, registry: &R, mode: HookMode) -> Self
        where R: TestRegistry<T> + ?Sized
    {
        let shared = Shared { id: Uuid::new_v4(),
                              path: path.into(),
                              mode,
                              state: RwLock::new(ScenarioState { test_name: String::new(),
                                                                 suite_name: String::new(),
                                                                 steps: Vec::new() }),
                              pending: Mutex::new(Vec::new()) };
        let builder = Self { inner: Arc::new(shared) };
        debug!("registering scenario '{}' ({})", builder.path(), builder.id());
        registry.register_test(builder.clone());
        builder
    }

    fn read(&self) -> RwLockReadGuard<'_, ScenarioState<T>> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ScenarioState<T>> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, Vec<PendingHook>> {
        self.inner.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn path(&self) -> &str {
        &self.inner.path
    }

    pub fn hook_mode(&self) -> HookMode {
        self.inner.mode
    }

    /// `true` si ambos handles apuntan al mismo builder.
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Fija el nombre del escenario (sobrescribe el anterior).
    pub fn test(self, name: impl Into<String>) -> Self {
        self.write().test_name = name.into();
        self
    }

    pub fn test_name(&self) -> String {
        self.read().test_name.clone()
    }

    pub fn set_suite_name(self, name: impl Into<String>) -> Self {
        self.write().suite_name = name.into();
        self
    }

    pub fn get_suite_name(&self) -> String {
        self.read().suite_name.clone()
    }

    pub fn given(self, description: impl Into<String>, input: impl Into<StepInput<T>>) -> Self {
        self.push_step(StepType::Given, description.into(), input.into());
        self
    }

    pub fn when(self, description: impl Into<String>, input: impl Into<StepInput<T>>) -> Self {
        self.push_step(StepType::When, description.into(), input.into());
        self
    }

    pub fn expect(self, description: impl Into<String>, input: impl Into<StepInput<T>>) -> Self {
        self.push_step(StepType::Expect, description.into(), input.into());
        self
    }

    /// Añade un hook `BEFORE`. Si trae función, ésta se lanza pero no se
    /// espera: la llamada vuelve antes de que termine (ver `settle`).
    pub fn before(self, hook: impl Into<Hook<T>>) -> Self {
        let (action, payload, callback) = hook.into().resolve();
        self.add_step(StepType::Before, action, payload, callback);
        self
    }

    /// Añade un hook `AFTER`, con la misma semántica que `before`.
    pub fn after(self, hook: impl Into<Hook<T>>) -> Self {
        let (action, payload, callback) = hook.into().resolve();
        self.add_step(StepType::After, action, payload, callback);
        self
    }

    fn push_step(&self, step_type: StepType, description: String, input: StepInput<T>) {
        let (payload, callback) = input.resolve();
        let step = Step::new(step_type, description.clone(), description, payload, callback);
        let mut state = self.write();
        debug!("{} step #{} appended to '{}': {}", step_type, state.steps.len(), self.path(), step.description());
        state.steps.push(step);
    }

    /// Añade el paso de inmediato y, si lleva callback, deja su ejecución
    /// pendiente según el `HookMode` del builder.
    fn add_step(&self, step_type: StepType, action: String, payload: Option<T>, callback: Option<SharedCallback>) {
        let step = Step::new(step_type, action.clone(), action, payload, callback.clone());
        let index = {
            let mut state = self.write();
            state.steps.push(step);
            state.steps.len() - 1
        };
        debug!("{} hook #{} appended to '{}' (callback: {})", step_type, index, self.path(), callback.is_some());
        if let Some(cb) = callback {
            let hook = PendingHook::start(self.inner.mode, self.path(), index, step_type, cb);
            self.pending().push(hook);
        }
    }

    pub fn step_count(&self) -> usize {
        self.read().steps.len()
    }

    /// Acceso de sólo lectura a los pasos sin clonarlos.
    ///
    /// `f` corre con el lock de lectura tomado: dentro de `f` no se puede
    /// encadenar sobre este builder ni sobre sus clones (`given`, `before`,
    /// `test`...), porque esperarían el lock de escritura para siempre. Para
    /// eso hay que usar `steps()`, que devuelve una copia.
    pub fn with_steps<F, O>(&self, f: F) -> O
        where F: FnOnce(&[Step<T>]) -> O
    {
        f(&self.read().steps)
    }

    /// Número de callbacks de hooks aún no liquidados con `settle`.
    pub fn pending_hooks(&self) -> usize {
        self.pending().len()
    }

    /// Espera todos los callbacks de hooks pendientes, en orden de alta.
    ///
    /// Devuelve el primer error; los siguientes se registran con `warn!`.
    /// Cada callback se liquida una sola vez: una segunda llamada sin hooks
    /// nuevos devuelve `Ok(())`.
    pub async fn settle(&self) -> Result<(), StepError> {
        let drained = std::mem::take(&mut *self.pending());
        let mut first_err = None;
        for hook in drained {
            if let Err(e) = hook.finish().await {
                if first_err.is_none() {
                    first_err = Some(e);
                } else {
                    warn!("additional hook failure in '{}': {e}", self.path());
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl<T: Clone> StepBuilder<T> {
    pub fn steps(&self) -> Vec<Step<T>> {
        self.read().steps.clone()
    }

    pub fn descriptor(&self) -> ScenarioDescriptor<T> {
        let state = self.read();
        ScenarioDescriptor { id: self.id(),
                             path: self.path().to_string(),
                             test_name: state.test_name.clone(),
                             suite_name: state.suite_name.clone(),
                             steps: state.steps.clone() }
    }
}

impl<T> Clone for StepBuilder<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> fmt::Debug for StepBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepBuilder")
         .field("id", &self.id())
         .field("path", &self.path())
         .field("test_name", &self.test_name())
         .field("steps", &self.step_count())
         .finish_non_exhaustive()
    }
}
