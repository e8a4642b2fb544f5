//! Reasoning-engine client module
//!
//! Models the external reasoning service as a capability trait so any
//! concrete provider is substitutable (strategy pattern). The shipped
//! implementation targets the Anthropic Messages API; tests use the scripted
//! mock under [`client::mock`].

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
#[allow(unused_imports)]
pub use types::Role;
pub use types::{CompletionRequest, CompletionResponse, ContentBlock, Message, MessageContent, StopReason, ToolCall, ToolDefinition};

use crate::config::LlmConfig;

/// Create a reasoning-engine client for the provider named in config
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicClient::from_config(config)?)),
        other => Err(LlmError::InvalidResponse(format!(
            "Unknown reasoning provider: '{}'. Supported: anthropic",
            other
        ))),
    }
}
