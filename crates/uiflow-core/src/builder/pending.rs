//! Callbacks de hooks lanzados por `before`/`after` y aún no liquidados.
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};

use crate::errors::StepError;
use crate::step::{invoke, SharedCallback, StepType};

/// Cómo se ejecuta el callback de un hook al añadir el paso.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookMode {
    /// Se lanza en el runtime Tokio actual en cuanto se añade el paso. Sin
    /// runtime disponible se comporta como `Deferred`.
    #[default]
    Spawn,
    /// Se guarda y se invoca por primera vez en `settle()`.
    Deferred,
}

impl FromStr for HookMode {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spawn" => Ok(HookMode::Spawn),
            "deferred" => Ok(HookMode::Deferred),
            other => Err(StepError::InvalidHookMode(other.to_string())),
        }
    }
}

impl fmt::Display for HookMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookMode::Spawn => f.write_str("spawn"),
            HookMode::Deferred => f.write_str("deferred"),
        }
    }
}

enum Task {
    Spawned(JoinHandle<Result<(), StepError>>),
    Deferred(SharedCallback),
}

/// Callback de un hook pendiente, con la posición del paso que lo originó.
pub(crate) struct PendingHook {
    step_index: usize,
    step_type: StepType,
    task: Task,
}

fn join_outcome(joined: Result<Result<(), StepError>, JoinError>, step_type: StepType, step_index: usize) -> Result<(), StepError> {
    match joined {
        Ok(res) => res,
        Err(e) if e.is_panic() => Err(StepError::HookPanicked(format!("{step_type} hook at step {step_index}"))),
        Err(_) => Err(StepError::HookCancelled),
    }
}

impl PendingHook {
    pub(crate) fn start(mode: HookMode, scenario: &str, step_index: usize, step_type: StepType, callback: SharedCallback) -> Self {
        let task = match (mode, Handle::try_current()) {
            (HookMode::Spawn, Ok(handle)) => {
                let fut = invoke(&callback);
                // El callback corre en su propia tarea: así un pánico llega
                // aquí como `JoinError` y también se registra.
                let inner = handle.spawn(fut);
                let scenario = scenario.to_string();
                Task::Spawned(handle.spawn(async move {
                                  let res = join_outcome(inner.await, step_type, step_index);
                                  if let Err(e) = &res {
                                      warn!("'{scenario}': {step_type} hook at step {step_index} failed and was not awaited yet: {e}");
                                  }
                                  res
                              }))
            }
            (HookMode::Spawn, Err(_)) => {
                warn!("'{scenario}': no tokio runtime for {step_type} hook at step {step_index}; it only runs once settle() is awaited");
                Task::Deferred(callback)
            }
            (HookMode::Deferred, _) => Task::Deferred(callback),
        };
        Self { step_index, step_type, task }
    }

    pub(crate) fn step_index(&self) -> usize {
        self.step_index
    }

    pub(crate) fn step_type(&self) -> StepType {
        self.step_type
    }

    /// `true` si el callback todavía no se ha invocado.
    pub(crate) fn is_deferred(&self) -> bool {
        matches!(self.task, Task::Deferred(_))
    }

    /// Espera (o invoca, si estaba diferido) el callback.
    pub(crate) async fn finish(self) -> Result<(), StepError> {
        let res = match self.task {
            Task::Spawned(handle) => join_outcome(handle.await, self.step_type, self.step_index),
            Task::Deferred(cb) => invoke(&cb).await,
        };
        debug!("{} hook at step {} settled: ok={}", self.step_type, self.step_index, res.is_ok());
        res
    }
}
