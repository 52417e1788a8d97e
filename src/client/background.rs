//! Background dispatch on top of the blocking client.
//!
//! These helpers only move a synchronous call onto tokio's blocking pool;
//! request building, decoding and error mapping stay in [`Ml4kClient`].
//! They must be called from within a tokio runtime.

use crate::client::core::Ml4kClient;
use crate::types::{Classification, ClassificationInput, ModelStatus};
use crate::{Error, Result};
use std::future::Future;
use tokio::task::JoinHandle;

impl Ml4kClient {
    /// Run `call` against a clone of this client on the blocking pool.
    ///
    /// The future resolves exactly once. A worker that panics or is cancelled
    /// surfaces as [`Error::Dispatch`].
    pub fn dispatch<T, F>(&self, call: F) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: Send + 'static,
        F: FnOnce(&Ml4kClient) -> Result<T> + Send + 'static,
    {
        let client = self.clone();
        let handle = tokio::task::spawn_blocking(move || call(&client));
        async move {
            handle.await.map_err(|e| Error::Dispatch {
                message: e.to_string(),
            })?
        }
    }

    /// [`Ml4kClient::classify`] on the blocking pool. Call inside a tokio runtime.
    pub fn spawn_classify(
        &self,
        input: ClassificationInput,
    ) -> impl Future<Output = Result<Classification>> + Send + 'static {
        self.dispatch(move |client| client.classify(&input))
    }

    /// [`Ml4kClient::add_training_data`] on the blocking pool. Call inside a tokio runtime.
    pub fn spawn_add_training_data(
        &self,
        input: ClassificationInput,
        label: impl Into<String>,
    ) -> impl Future<Output = Result<()>> + Send + 'static {
        let label = label.into();
        self.dispatch(move |client| client.add_training_data(&input, &label))
    }

    /// [`Ml4kClient::model_status`] on the blocking pool. Call inside a tokio runtime.
    pub fn spawn_model_status(&self) -> impl Future<Output = Result<ModelStatus>> + Send + 'static {
        self.dispatch(|client| client.model_status())
    }

    /// [`Ml4kClient::train`] on the blocking pool. Call inside a tokio runtime.
    pub fn spawn_train(&self) -> impl Future<Output = Result<()>> + Send + 'static {
        self.dispatch(|client| client.train())
    }

    /// Fire-and-forget classification; `on_complete` is invoked exactly once
    /// with the result, on the worker thread.
    pub fn classify_with<F>(&self, input: ClassificationInput, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Classification>) + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || on_complete(client.classify(&input)))
    }
}
