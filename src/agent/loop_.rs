use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::agent::ToolRegistry;
use crate::error::Error;
use crate::traits::{CallOptions, ChatMessage, ChatRequest, Provider};

const DEFAULT_MAX_ROUNDS: usize = 10;

/// Multi-round execution loop between a generation provider and the tool
/// registry.
///
/// Each round asks the provider for a completion with the registry's tool
/// definitions attached, dispatches any requested calls sequentially, folds
/// the results into the next request, and repeats. A response without tool
/// calls is returned verbatim. The round budget bounds runaway tool-calling;
/// once it is spent, one final tool-free generation renders the accumulated
/// results into natural language so the caller never receives a bare tool
/// result.
pub struct AgentLoop {
    provider: Arc<dyn Provider>,
    registry: Arc<ToolRegistry>,
    max_rounds: usize,
    options: CallOptions,
}

impl AgentLoop {
    pub fn new(provider: Arc<dyn Provider>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            provider,
            registry,
            max_rounds: DEFAULT_MAX_ROUNDS,
            options: CallOptions::default(),
        }
    }

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    /// Drive one conversation turn to a final textual answer.
    ///
    /// Provider and dispatch failures abort the turn and surface to the
    /// caller unretried. Cancellation is checked before every round and
    /// threaded into every provider call and tool execution.
    pub async fn run(
        &self,
        cancel: CancellationToken,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, Error> {
        let run_id = Uuid::new_v4();
        let tools = self.registry.definitions();

        let mut results: Vec<(String, String)> = Vec::new();
        let mut rounds = 0;

        while rounds < self.max_rounds {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let prompt = if results.is_empty() {
                user_message.to_string()
            } else {
                compose_followup(&results, user_message)
            };
            let messages = [ChatMessage::system(system_prompt), ChatMessage::user(prompt)];
            let request = ChatRequest {
                messages: &messages,
                tools: if tools.is_empty() {
                    None
                } else {
                    Some(&tools)
                },
                options: &self.options,
            };

            let response = self.provider.chat(cancel.clone(), request).await?;
            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or(Error::EmptyResponse)?;

            if !choice.has_tool_calls() {
                // Directly answerable turn: return the content verbatim
                // without spending another round.
                tracing::info!(%run_id, rounds, "turn finalized");
                return Ok(choice.content);
            }

            for call in &choice.tool_calls {
                let result = self.registry.execute(cancel.clone(), call).await?;
                results.push((call.name.clone(), result.content));
            }

            rounds += 1;
            tracing::debug!(%run_id, rounds, results = results.len(), "round complete");
        }

        tracing::warn!(%run_id, rounds, "round budget exhausted, summarizing gathered results");
        self.finalize(cancel, system_prompt, user_message, &results)
            .await
    }

    /// One tool-free generation that turns the gathered results into the
    /// final answer.
    async fn finalize(
        &self,
        cancel: CancellationToken,
        system_prompt: &str,
        user_message: &str,
        results: &[(String, String)],
    ) -> Result<String, Error> {
        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(compose_followup(results, user_message)),
        ];
        let request = ChatRequest {
            messages: &messages,
            tools: None,
            options: &self.options,
        };

        let response = self.provider.chat(cancel, request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(Error::EmptyResponse)?;

        Ok(choice.content)
    }
}

/// Render accumulated tool results, one line per result in execution order,
/// together with the original question.
fn compose_followup(results: &[(String, String)], user_message: &str) -> String {
    let lines: Vec<String> = results
        .iter()
        .map(|(name, content)| format!("Tool '{name}' returned: {content}"))
        .collect();

    format!(
        "Based on the following tool results, please provide a comprehensive answer to the user's question:\n\n{}\n\nOriginal question: {}",
        lines.join("\n"),
        user_message
    )
}
