//! Object-safe wrapper around [`GenerationBackend`].
//!
//! `GenerationBackend` uses RPITIT, which is not object-safe. The
//! orchestrator races backends, spawns them onto the runtime, and picks
//! them from configuration at startup, so it needs `dyn` dispatch. The
//! shim trait below boxes the returned future and a blanket impl covers
//! every concrete backend.

use std::future::Future;
use std::pin::Pin;

use leadline_types::llm::{GenerationOutcome, GenerationRequest, LlmError};

use crate::llm::backend::GenerationBackend;

/// Object-safe version of [`GenerationBackend`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch; a blanket
/// implementation covers every type implementing `GenerationBackend`.
pub trait GenerationBackendDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationOutcome, LlmError>> + Send + 'a>>;
}

impl<T: GenerationBackend> GenerationBackendDyn for T {
    fn name(&self) -> &str {
        GenerationBackend::name(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationOutcome, LlmError>> + Send + 'a>> {
        Box::pin(GenerationBackend::generate(self, request))
    }
}

/// A type-erased generation backend.
///
/// Mirrors the [`GenerationBackend`] surface with the future boxed, so
/// handlers and the orchestrator can hold any backend behind one type.
pub struct BoxGenerationBackend {
    inner: Box<dyn GenerationBackendDyn>,
}

impl BoxGenerationBackend {
    pub fn new<T: GenerationBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, LlmError> {
        self.inner.generate_boxed(request).await
    }
}

impl std::fmt::Debug for BoxGenerationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxGenerationBackend")
            .field("name", &self.inner.name())
            .finish()
    }
}
