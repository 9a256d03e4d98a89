//! Formas de argumento de los métodos del builder.
//!
//! `given`/`when`/`expect` reciben `(description, callbackOrPayload?, callback?)`.
//! Aquí esa lista se modela con tipos:
//!
//! | llamada                  | payload   | callback |
//! |--------------------------|-----------|----------|
//! | `()`                     | —         | —        |
//! | `callback(f)`            | —         | `f`      |
//! | `payload(v)`             | `v`       | —        |
//! | `payload(v).then(f)`     | `v`       | `f`      |
//!
//! Un payload "falsy" (`0`, `""`, `false`, `null`) sigue siendo un payload: la
//! forma depende del tipo del argumento, no de su valor.
//!
//! `before`/`after` reciben un `Hook`: una función a ejecutar o un nombre de
//! acción con payload opcional.
use std::future::Future;
use std::sync::Arc;

use crate::constants::{EXECUTE_FUNCTION, SET_STATE};
use crate::errors::StepError;

use super::SharedCallback;

fn share<F, Fut>(f: F) -> SharedCallback
    where F: Fn() -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<(), StepError>> + Send + 'static
{
    Arc::new(f)
}

/// Segundo argumento de `given`/`when`/`expect` ya clasificado por tipo.
pub enum StepArg<T> {
    Payload(T),
    Callback(SharedCallback),
}

impl<T> StepArg<T> {
    /// `true` si el argumento es invocable. Es la única comprobación que
    /// decide entre "callback" y "payload".
    pub fn is_callback(&self) -> bool {
        matches!(self, StepArg::Callback(_))
    }

    fn into_callback(self) -> Option<SharedCallback> {
        match self {
            StepArg::Callback(cb) => Some(cb),
            StepArg::Payload(_) => None,
        }
    }

    fn into_payload(self) -> Option<T> {
        match self {
            StepArg::Payload(value) => Some(value),
            StepArg::Callback(_) => None,
        }
    }
}

/// Argumentos opcionales completos de un paso `GIVEN`/`WHEN`/`EXPECT`.
pub struct StepInput<T> {
    arg: Option<StepArg<T>>,
    trailing: Option<SharedCallback>,
}

impl<T> StepInput<T> {
    pub fn empty() -> Self {
        Self { arg: None, trailing: None }
    }

    /// Resuelve los argumentos en `(payload, callback)`.
    ///
    /// El callback final sólo se toma cuando el segundo argumento era un
    /// payload; tras un callback no hay tercer argumento posible.
    pub(crate) fn resolve(self) -> (Option<T>, Option<SharedCallback>) {
        match self.arg {
            None => (None, None),
            Some(arg) if arg.is_callback() => (None, arg.into_callback()),
            Some(arg) => (arg.into_payload(), self.trailing),
        }
    }
}

impl<T> Default for StepInput<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<()> for StepInput<T> {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl<T> From<StepArg<T>> for StepInput<T> {
    fn from(arg: StepArg<T>) -> Self {
        Self { arg: Some(arg), trailing: None }
    }
}

/// Payload de un paso, con un callback opcional detrás.
pub struct Payload<T> {
    value: T,
    callback: Option<SharedCallback>,
}

impl<T> Payload<T> {
    /// Añade el tercer argumento: el callback que acompaña al payload.
    pub fn then<F, Fut>(mut self, f: F) -> Self
        where F: Fn() -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<(), StepError>> + Send + 'static
    {
        self.callback = Some(share(f));
        self
    }
}

impl<T> From<Payload<T>> for StepInput<T> {
    fn from(p: Payload<T>) -> Self {
        Self { arg: Some(StepArg::Payload(p.value)), trailing: p.callback }
    }
}

/// Callback pasado directamente como segundo argumento.
pub struct CallbackArg(SharedCallback);

impl CallbackArg {
    pub fn shared(cb: SharedCallback) -> Self {
        Self(cb)
    }
}

impl<T> From<CallbackArg> for StepInput<T> {
    fn from(cb: CallbackArg) -> Self {
        StepArg::Callback(cb.0).into()
    }
}

/// Segundo argumento con datos para el paso.
pub fn payload<T>(value: T) -> Payload<T> {
    Payload { value, callback: None }
}

/// Segundo argumento invocable.
pub fn callback<F, Fut>(f: F) -> CallbackArg
    where F: Fn() -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<(), StepError>> + Send + 'static
{
    CallbackArg(share(f))
}

/// Argumento de `before`/`after`.
pub enum Hook<T> {
    /// Función a ejecutar al registrar el paso (`EXECUTE_FUNCTION`).
    Function(SharedCallback),
    /// Acción con nombre. Un nombre ausente o vacío se resuelve a `SET_STATE`.
    Action { action: Option<String>, payload: Option<T> },
}

impl<T> Hook<T> {
    pub fn function<F, Fut>(f: F) -> Self
        where F: Fn() -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<(), StepError>> + Send + 'static
    {
        Hook::Function(share(f))
    }

    pub fn action(action: impl Into<String>, payload: Option<T>) -> Self {
        Hook::Action { action: Some(action.into()), payload }
    }

    pub fn set_state(payload: T) -> Self {
        Hook::Action { action: Some(SET_STATE.to_string()), payload: Some(payload) }
    }

    /// Resuelve el hook en `(action, payload, callback)`.
    pub(crate) fn resolve(self) -> (String, Option<T>, Option<SharedCallback>) {
        match self {
            Hook::Function(cb) => (EXECUTE_FUNCTION.to_string(), None, Some(cb)),
            Hook::Action { action, payload } => {
                let action = action.filter(|a| !a.is_empty()).unwrap_or_else(|| SET_STATE.to_string());
                (action, payload, None)
            }
        }
    }
}

impl<T> From<&str> for Hook<T> {
    fn from(action: &str) -> Self {
        Hook::Action { action: Some(action.to_string()), payload: None }
    }
}

impl<T> From<String> for Hook<T> {
    fn from(action: String) -> Self {
        Hook::Action { action: Some(action), payload: None }
    }
}

impl<T> From<CallbackArg> for Hook<T> {
    fn from(cb: CallbackArg) -> Self {
        Hook::Function(cb.0)
    }
}
