//! Short URL allocation and resolution.

use std::sync::Arc;

use crate::domain::repositories::{CodeStore, StoreError};
use crate::utils::code_generator::{
    CodeGenerator, GenerationError, SHORT_URL_CODE_LENGTH, SecureCodeGenerator,
};

/// Failures of the shortening service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortenError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The candidate code is already mapped. Never retried.
    #[error("short code {0} is already taken")]
    DuplicateCode(String),
    #[error("short code {0} not found")]
    CodeNotFound(String),
    /// Any other store failure, passed through unchanged.
    #[error(transparent)]
    Store(StoreError),
}

/// Service that allocates short codes and resolves them back to URLs.
///
/// # Allocation policy
///
/// Exactly one 7-character candidate is generated per call and offered to
/// the store's atomic set-if-absent. A collision is reported as
/// [`ShortenError::DuplicateCode`]; the service does not regenerate.
pub struct ShortenService<S: CodeStore + ?Sized, G: CodeGenerator = SecureCodeGenerator> {
    store: Arc<S>,
    generator: G,
}

impl<S: CodeStore + ?Sized> ShortenService<S> {
    /// Creates a service using the OS-backed code generator.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_generator(store, SecureCodeGenerator::new())
    }
}

impl<S: CodeStore + ?Sized, G: CodeGenerator> ShortenService<S, G> {
    pub fn with_generator(store: Arc<S>, generator: G) -> Self {
        Self { store, generator }
    }

    /// Allocates a short code for `url`.
    ///
    /// `expire_seconds <= 0` keeps the mapping for 24 hours; any upper bound
    /// is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::Generation`] if the entropy source fails
    /// - [`ShortenError::DuplicateCode`] if the candidate is already mapped
    /// - [`ShortenError::Store`] on any store failure
    pub async fn shorten_url(&self, url: &str, expire_seconds: i64) -> Result<String, ShortenError> {
        let code = self.generator.generate_code(SHORT_URL_CODE_LENGTH)?;

        let stored = self
            .store
            .store_if_not_exists(&code, url, expire_seconds)
            .await
            .map_err(ShortenError::Store)?;

        if !stored {
            tracing::warn!(code = %code, "Short code collision");
            return Err(ShortenError::DuplicateCode(code));
        }

        tracing::debug!(code = %code, expire_seconds, "Short code allocated");
        Ok(code)
    }

    /// Resolves a short code to its target URL.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::CodeNotFound`] for unknown or expired codes.
    /// Other store errors, including connectivity failures, pass through as
    /// [`ShortenError::Store`].
    pub async fn get_url(&self, code: &str) -> Result<String, ShortenError> {
        self.store.get(code).await.map_err(|e| match e {
            StoreError::NotFound => ShortenError::CodeNotFound(code.to_string()),
            other => ShortenError::Store(other),
        })
    }

    /// Checks that the code store is reachable.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    /// Constructs the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}
