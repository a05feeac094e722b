//! Two-phase exchange state machine.
//!
//! An exchange moves `Initial -> AwaitingTool -> Final`, or ends in `Failed`.
//! Tool calling is offered on the initial backend call only; the call after a
//! tool round always runs with tools disabled, so an exchange issues at most
//! two backend calls.

use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_timer::Delay;
use futures_util::future::{Either, select};
use rcommon::GenerationOptions;
use rprovider::{Message, ModelProvider, ModelRequest, ModelResponse};
use rtooling::FileContentResolver;
use tokio_util::sync::CancellationToken;

use crate::{
    BackendRound, Conversation, ExchangeContext, ExchangeError, ExchangeHooks, NoopExchangeHooks,
};

pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initial,
    AwaitingTool,
    Final,
    Failed,
}

/// Terminal result of one exchange together with its full transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    pub conversation: Conversation,
    pub state: DriverState,
    pub backend_calls: u32,
    pub result: Result<String, ExchangeError>,
}

impl ExchangeOutcome {
    pub fn answer(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    pub fn error(&self) -> Option<&ExchangeError> {
        self.result.as_ref().err()
    }
}

#[derive(Clone)]
pub struct ConversationDriver {
    provider: Arc<dyn ModelProvider>,
    resolver: FileContentResolver,
    hooks: Arc<dyn ExchangeHooks>,
    model: String,
    options: GenerationOptions,
    backend_timeout: Duration,
}

struct Exchange {
    conversation: Conversation,
    state: DriverState,
    backend_calls: u32,
}

impl ConversationDriver {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        resolver: FileContentResolver,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            resolver,
            hooks: Arc::new(NoopExchangeHooks),
            model: model.into(),
            options: GenerationOptions::default(),
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ExchangeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_backend_timeout(mut self, backend_timeout: Duration) -> Self {
        self.backend_timeout = backend_timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn resolver(&self) -> &FileContentResolver {
        &self.resolver
    }

    pub async fn run(
        &self,
        conversation: Conversation,
        context: &ExchangeContext,
        cancel: &CancellationToken,
    ) -> ExchangeOutcome {
        let started = Instant::now();
        self.hooks.on_exchange_start(context);

        let mut exchange = Exchange {
            conversation,
            state: DriverState::Initial,
            backend_calls: 0,
        };
        let result = self.drive(&mut exchange, context, cancel).await;

        match &result {
            Ok(_) => {
                exchange.state = DriverState::Final;
                self.hooks
                    .on_exchange_complete(context, exchange.backend_calls, started.elapsed());
            }
            Err(error) => {
                exchange.state = DriverState::Failed;
                tracing::warn!(
                    exchange_id = %context.exchange_id,
                    mode = %context.mode,
                    error_kind = error.kind.as_str(),
                    error = %error.message,
                    "exchange failed"
                );
                self.hooks
                    .on_exchange_failure(context, error, started.elapsed());
            }
        }

        ExchangeOutcome {
            conversation: exchange.conversation,
            state: exchange.state,
            backend_calls: exchange.backend_calls,
            result,
        }
    }

    async fn drive(
        &self,
        exchange: &mut Exchange,
        context: &ExchangeContext,
        cancel: &CancellationToken,
    ) -> Result<String, ExchangeError> {
        if !self.provider.is_configured() {
            return Err(ExchangeError::configuration_missing(
                "no credential configured for the model backend",
            ));
        }

        let first = self
            .call_backend(exchange, BackendRound::Initial, context, cancel)
            .await?;
        if !first.has_usable_content() {
            return Err(empty_response());
        }

        let tool_calls = first.message.tool_calls().cloned().collect::<Vec<_>>();
        let first_text = first.message.joined_text();
        exchange.conversation.push(first.message)?;

        if tool_calls.is_empty() {
            return final_text(&first_text);
        }

        exchange.state = DriverState::AwaitingTool;
        let tool_result = until_cancelled(
            cancel,
            self.resolver.resolve(&tool_calls, &context.fetch),
        )
        .await?;
        let files = tool_result.payload["files"]
            .as_array()
            .map_or(0, Vec::len);
        self.hooks.on_tool_round(context, tool_calls.len(), files);
        exchange.conversation.push(Message::tool(tool_result))?;

        let second = self
            .call_backend(exchange, BackendRound::AfterTool, context, cancel)
            .await?;
        if second.message.has_tool_calls() {
            tracing::debug!(
                exchange_id = %context.exchange_id,
                "ignoring tool calls after the tool round"
            );
        }

        let text = second.message.joined_text();
        if !second.message.parts.is_empty() {
            exchange.conversation.push(second.message)?;
        }
        final_text(&text)
    }

    async fn call_backend(
        &self,
        exchange: &mut Exchange,
        round: BackendRound,
        context: &ExchangeContext,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ExchangeError> {
        let request = ModelRequest::builder(self.model.clone())
            .messages(exchange.conversation.messages().iter().cloned())
            .options(self.options)
            .tool(self.resolver.definition())
            .tools_enabled(round.tools_enabled())
            .exchange_id(context.exchange_id.clone())
            .build()?;

        exchange.backend_calls += 1;
        let started = Instant::now();

        let call = select(
            self.provider.complete(request),
            Delay::new(self.backend_timeout),
        );
        let result = match until_cancelled(cancel, call).await {
            Err(cancelled) => Err(cancelled),
            Ok(Either::Left((response, _))) => response.map_err(ExchangeError::from),
            Ok(Either::Right(((), _))) => Err(ExchangeError::backend_unavailable(format!(
                "model backend did not respond within {}s",
                self.backend_timeout.as_secs_f32()
            ))),
        };

        self.hooks
            .on_backend_call(context, round, started.elapsed(), result.as_ref().err());
        result
    }
}

impl std::fmt::Debug for ConversationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationDriver")
            .field("provider", &self.provider.id())
            .field("model", &self.model)
            .field("options", &self.options)
            .field("backend_timeout", &self.backend_timeout)
            .finish_non_exhaustive()
    }
}

async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    future: F,
) -> Result<F::Output, ExchangeError> {
    if cancel.is_cancelled() {
        return Err(cancelled());
    }

    let future = pin!(future);
    let cancelled_signal = pin!(cancel.cancelled());
    match select(future, cancelled_signal).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(cancelled()),
    }
}

fn final_text(text: &str) -> Result<String, ExchangeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(empty_response());
    }
    Ok(trimmed.to_string())
}

fn empty_response() -> ExchangeError {
    ExchangeError::backend_empty_response("the model returned no usable content")
}

fn cancelled() -> ExchangeError {
    ExchangeError::cancelled("the exchange was cancelled before it completed")
}
