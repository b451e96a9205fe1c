// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM chat-completion backends.

use async_trait::async_trait;

use crate::error::LibrisError;
use crate::types::{HealthStatus, ProviderRequest, ProviderResponse};

/// Adapter for LLM providers.
///
/// A single non-streaming completion call. Implementations must not retry:
/// any transport failure or non-success status is returned as
/// [`LibrisError::Provider`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this provider.
    fn name(&self) -> &str;

    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, LibrisError>;

    /// Reports whether the provider is usable. Must not consume tokens.
    async fn health_check(&self) -> Result<HealthStatus, LibrisError> {
        Ok(HealthStatus::Healthy)
    }
}
