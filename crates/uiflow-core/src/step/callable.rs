use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StepError;

/// Futuro devuelto por un callback ya encapsulado.
pub type StepFuture = Pin<Box<dyn Future<Output = Result<(), StepError>> + Send + 'static>>;

/// Acción asíncrona sin argumentos asociada a un paso.
///
/// La señal de finalización es el `Result`: `Ok(())` si el paso se cumplió,
/// `Err` con el motivo en caso contrario. Cualquier closure
/// `Fn() -> impl Future<Output = Result<(), StepError>>` lo implementa.
#[async_trait]
pub trait StepCallback: Send + Sync {
    async fn call(&self) -> Result<(), StepError>;
}

#[async_trait]
impl<F, Fut> StepCallback for F
    where F: Fn() -> Fut + Send + Sync,
          Fut: Future<Output = Result<(), StepError>> + Send + 'static
{
    async fn call(&self) -> Result<(), StepError> {
        (self)().await
    }
}

/// Callback compartible entre el paso registrado y la tarea que lo ejecuta.
pub type SharedCallback = Arc<dyn StepCallback>;

/// Lanza el callback y devuelve un futuro `'static` apto para `tokio::spawn`.
pub(crate) fn invoke(callback: &SharedCallback) -> StepFuture {
    let cb = Arc::clone(callback);
    Box::pin(async move { cb.call().await })
}
