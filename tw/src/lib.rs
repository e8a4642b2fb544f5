//! Tripwright - conversational trip-planning engine
//!
//! Turns an accumulated chat transcript into either a follow-up question, a
//! missing-slot signal for the UI, or a finished structured trip plan. The
//! reasoning engine drives the conversation through a bounded tool-calling
//! loop; everything around it degrades to a well-formed response no matter
//! what fails.
//!
//! # Modules
//!
//! - [`transcript`] - raw record normalization and snapshot handling
//! - [`slots`] - destination/dates/guests readiness gate
//! - [`profile`] - per-user preference accumulation
//! - [`photos`] - memoized destination image resolution
//! - [`travel`] - flight and hotel capabilities with deterministic catalogs
//! - [`tools`] - tool registry and the built-in planning tools
//! - [`llm`] - reasoning-engine client trait and Anthropic implementation
//! - [`agent`] - the plan orchestrator
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod photos;
pub mod profile;
pub mod prompts;
pub mod slots;
pub mod tools;
pub mod transcript;
pub mod travel;

// Re-export commonly used types
pub use agent::PlannerEngine;
pub use config::{Config, LlmConfig};
pub use domain::{ChatRequest, ChatResponse, Plan, Signal, TurnRecord};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError};
pub use photos::{ImageResolver, PhotoSearch};
pub use profile::UserProfile;
pub use slots::{SlotKind, SlotState};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
