//! PlannerEngine - drives one chat request to a well-formed response

use std::sync::Arc;

use tracing::{debug, warn, Instrument};
use userstore::{MemoryStore, UserStore};
use uuid::Uuid;

use crate::domain::{ChatRequest, ChatResponse, Plan, Signal};
use crate::llm::{CompletionRequest, CompletionResponse, ContentBlock, LlmClient, Message, ToolCall, ToolDefinition};
use crate::photos::ImageResolver;
use crate::profile::UserProfile;
use crate::prompts;
use crate::slots::{SlotKind, SlotState};
use crate::tools::builtin::{slot_request_definition, FINALIZE_TRIP};
use crate::tools::{ToolContext, ToolRegistry};
use crate::transcript;
use crate::travel::{FlightSearch, HotelSearch, StaticFlightCatalog, StaticHotelCatalog};

/// Default bound on reasoning turns per request
pub const DEFAULT_MAX_TURNS: u32 = 6;

const DEFAULT_MAX_TOKENS: u32 = 1024;

/// User id recorded when the request carries none
const ANONYMOUS_USER: &str = "anonymous";

/// The orchestrator behind every chat turn
///
/// `handle` is infallible by construction: whatever the reasoning engine or
/// the collaborators do, the caller gets a well-formed [`ChatResponse`].
pub struct PlannerEngine {
    llm: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    profiles: MemoryStore<UserProfile>,
    flights: Arc<dyn FlightSearch>,
    hotels: Arc<dyn HotelSearch>,
    images: Arc<ImageResolver>,
    max_turns: u32,
    max_tokens: u32,
}

impl PlannerEngine {
    /// Create an engine with the standard tools and deterministic catalogs
    pub fn new(llm: Arc<dyn LlmClient>, images: Arc<ImageResolver>) -> Self {
        Self {
            llm,
            registry: ToolRegistry::standard(),
            profiles: MemoryStore::new(),
            flights: Arc::new(StaticFlightCatalog::default()),
            hotels: Arc::new(StaticHotelCatalog),
            images,
            max_turns: DEFAULT_MAX_TURNS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the per-request turn bound
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    /// Set the max tokens per completion
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Swap the flight capability
    pub fn with_flights(mut self, flights: Arc<dyn FlightSearch>) -> Self {
        self.flights = flights;
        self
    }

    /// Swap the lodging capability
    pub fn with_hotels(mut self, hotels: Arc<dyn HotelSearch>) -> Self {
        self.hotels = hotels;
        self
    }

    /// Drive one request to a response
    pub async fn handle(&self, request: ChatRequest) -> ChatResponse {
        let request_id = Uuid::new_v4().to_string();
        let user_id = request.user_id.clone().unwrap_or_else(|| ANONYMOUS_USER.to_string());

        let span = tracing::info_span!("chat_turn", %request_id, %user_id);
        self.handle_inner(request, request_id, user_id).instrument(span).await
    }

    async fn handle_inner(&self, request: ChatRequest, request_id: String, user_id: String) -> ChatResponse {
        debug!(records = request.messages.len(), "handle: called");

        let mut messages = transcript::normalize(&request.messages);
        let slots = SlotState::detect(&transcript::user_text_since_snapshot(&request.messages));

        let cumulative = transcript::cumulative_user_text(&request.messages);
        self.profiles.mutate(&user_id, &mut |profile| profile.absorb(&cumulative));
        let profile = self.profiles.get(&user_id);

        let system_prompt = prompts::system_prompt(&profile, &slots);
        let tools = self.turn_catalog(&slots);
        debug!(tool_count = tools.len(), ?slots, "handle: turn catalog built");

        let ctx = ToolContext::new(
            request_id.clone(),
            user_id,
            Arc::clone(&self.flights),
            Arc::clone(&self.hotels),
            Arc::clone(&self.images),
        );

        for turn in 1..=self.max_turns {
            debug!(turn, max_turns = self.max_turns, "handle: turn start");

            let completion = CompletionRequest {
                system_prompt: system_prompt.clone(),
                messages: messages.clone(),
                tools: tools.clone(),
                max_tokens: self.max_tokens,
            };

            let response = match self.llm.complete(completion).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(%request_id, turn, error = %e, "handle: reasoning engine call failed");
                    return ChatResponse::text(prompts::OFFLINE_MESSAGE);
                }
            };

            match super::TurnOutcome::classify(&response) {
                super::TurnOutcome::Text(text) => {
                    debug!(turn, "handle: text outcome, turn complete");
                    return ChatResponse::text(text);
                }
                super::TurnOutcome::Empty => {
                    debug!(turn, "handle: empty outcome, re-prompting the traveller");
                    return ChatResponse::text(prompts::REPROMPT_MESSAGE);
                }
                super::TurnOutcome::SlotRequest(kind) => {
                    debug!(turn, ?kind, "handle: slot request outcome");
                    let signal = match kind {
                        SlotKind::Dates => Signal::DateNeeded,
                        SlotKind::Guests => Signal::GuestsNeeded,
                    };
                    return ChatResponse::with_signal(prompts::slot_request_text(kind), signal);
                }
                super::TurnOutcome::ToolBatch(calls) => {
                    let calls = self.known_calls(calls, &request_id);
                    if calls.is_empty() {
                        // Nothing dispatchable, but the turn bound still
                        // applies: give the model another chance to recover
                        debug!(turn, "handle: batch held no known tools, continuing");
                        continue;
                    }

                    messages.push(assistant_message(&response, &calls));

                    let mut result_blocks = Vec::with_capacity(calls.len());
                    for call in &calls {
                        let result = self.registry.dispatch(call, &ctx).await;
                        debug!(turn, tool = %call.name, is_error = result.is_error, "handle: tool dispatched");

                        if call.name == FINALIZE_TRIP && !result.is_error {
                            return finished_plan_response(&response, result.content);
                        }

                        result_blocks.push(ContentBlock::tool_result(
                            call.id.clone(),
                            result.content_text(),
                            result.is_error,
                        ));
                    }
                    messages.push(Message::user_blocks(result_blocks));
                }
            }
        }

        warn!(%request_id, max_turns = self.max_turns, "handle: turn bound exhausted without a terminal outcome");
        ChatResponse::text(prompts::SOFT_FAILURE_MESSAGE)
    }

    /// Tool catalog for this turn, gated by slot state
    ///
    /// The search tools are always available. Exactly one request_* tool is
    /// added while its slot is missing, and the finalizer only once all
    /// slots are filled, so the model cannot finalize early or ask for two
    /// things at once.
    fn turn_catalog(&self, slots: &SlotState) -> Vec<ToolDefinition> {
        let mut definitions = self.registry.definitions_for(&["search_flights", "search_hotels"]);

        match slots.gate() {
            Some(kind) => definitions.push(slot_request_definition(kind)),
            None if slots.ready_for_plan() => {
                definitions.extend(self.registry.definitions_for(&[FINALIZE_TRIP]));
            }
            None => {}
        }

        definitions
    }

    /// Drop proposed calls for names nothing can answer
    fn known_calls(&self, calls: Vec<ToolCall>, request_id: &str) -> Vec<ToolCall> {
        calls
            .into_iter()
            .filter(|call| {
                let known = self.registry.has_tool(&call.name);
                if !known {
                    warn!(%request_id, name = %call.name, "known_calls: unknown tool proposed, skipping");
                }
                known
            })
            .collect()
    }
}

/// Assistant message carrying the model's text and the kept tool calls
fn assistant_message(response: &CompletionResponse, calls: &[ToolCall]) -> Message {
    let mut blocks = Vec::with_capacity(calls.len() + 1);

    if let Some(text) = &response.content {
        if !text.trim().is_empty() {
            blocks.push(ContentBlock::text(text));
        }
    }

    for call in calls {
        blocks.push(ContentBlock::ToolUse {
            id: call.id.clone(),
            name: call.name.clone(),
            input: call.input.clone(),
        });
    }

    Message::assistant_blocks(blocks)
}

/// Terminal planReady response from a successful finalizer result
fn finished_plan_response(response: &CompletionResponse, plan_value: serde_json::Value) -> ChatResponse {
    let plan: Plan = match serde_json::from_value(plan_value) {
        Ok(plan) => plan,
        Err(e) => {
            // The finalizer serialized this itself, so this only fires if a
            // replacement tool returns a foreign shape under the same name.
            warn!(error = %e, "finished_plan_response: finalizer result did not parse");
            return ChatResponse::text(prompts::SOFT_FAILURE_MESSAGE);
        }
    };

    let text = response
        .content
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(prompts::PLAN_READY_MESSAGE)
        .to_string();

    ChatResponse::with_signal(text, Signal::PlanReady { payload: plan })
}
