//! Turn outcome classification
//!
//! Every engine response collapses into exactly one tagged outcome before the
//! orchestrator acts on it, so the terminal/continue decision lives in one
//! match instead of being spread across the loop body.

use crate::llm::{CompletionResponse, ToolCall};
use crate::slots::SlotKind;
use crate::tools::builtin::slot_kind_for;

/// What the reasoning engine produced this turn
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// Plain text for the traveller
    Text(String),
    /// Neither text nor tool calls
    Empty,
    /// A request_* tool was proposed; the matching signal terminates the turn
    SlotRequest(SlotKind),
    /// Ordinary tool calls to dispatch in emission order
    ToolBatch(Vec<ToolCall>),
}

impl TurnOutcome {
    /// Collapse a response into one outcome
    ///
    /// A slot-request anywhere in the batch wins over every other proposed
    /// call: the traveller's missing answer blocks the rest of the work, so
    /// the remainder of the batch is discarded.
    pub fn classify(response: &CompletionResponse) -> Self {
        if let Some(kind) = response.tool_calls.iter().find_map(|call| slot_kind_for(&call.name)) {
            return TurnOutcome::SlotRequest(kind);
        }

        if !response.tool_calls.is_empty() {
            return TurnOutcome::ToolBatch(response.tool_calls.clone());
        }

        match response.content.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => TurnOutcome::Text(text.to_string()),
            _ => TurnOutcome::Empty,
        }
    }
}
