//! Request/response flow shared by every adapter

use crate::error::{ParleyError, ParleyResult};
use crate::llm::messages::{ConversationEntry, EntryContent};
use crate::llm::transport::{HttpRequest, Transport};
use tracing::instrument;

use super::error_utils::api_error;
use super::provider_trait::{ProviderAdapter, SendRequest, TurnResult};

/// Validate, build, post, parse.
///
/// Nothing is appended unless the vendor answered successfully and the reply
/// parsed, so every error leaves the caller's conversation reusable as is.
#[instrument(
    skip_all,
    fields(provider = %adapter.id(), model = %request.model, history = request.conversation.len()),
    level = "debug"
)]
pub async fn send(
    adapter: &dyn ProviderAdapter,
    transport: &dyn Transport,
    request: SendRequest<'_>,
) -> ParleyResult<TurnResult> {
    let provider = adapter.id();

    if request.api_key.trim().is_empty() {
        return Err(ParleyError::config(format!("{} API key not provided", provider)));
    }
    if request.model.trim().is_empty() {
        return Err(ParleyError::config(format!("No model configured for {}", provider)));
    }
    request.conversation.ensure_provider(provider)?;

    let mut history = request.conversation.native_history();
    let input_entry = match (request.input.content(), adapter.encode_input(&request.input)) {
        (Some(content), Some(native)) => {
            let entry = ConversationEntry::new(provider, content, native);
            entry.extend_native(&mut history);
            Some(entry)
        }
        _ => None,
    };

    let tools = adapter.format_tools(request.tools);
    let include_sampling = adapter.wants_sampling_params(request.model);
    if !include_sampling {
        tracing::debug!("omitting sampling parameters for reasoning model");
    }
    let body = adapter.build_body(&request, history, tools, include_sampling);

    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    headers.extend(adapter.auth_headers(request.api_key));

    let http_request = HttpRequest {
        url: adapter.endpoint(request.model, request.api_key)?,
        headers,
        body,
        timeout: adapter.request_timeout(),
    };

    let response = transport.post(http_request).await?;
    if !response.is_success() {
        let err = api_error(response.status, &response.body, provider);
        tracing::warn!(status = response.status, error = %err, "vendor returned an error status");
        return Err(err);
    }

    let reply = adapter.parse_reply(&response.body)?;
    let finished = reply.is_finished();
    tracing::debug!(
        tool_calls = reply.tool_calls.len(),
        finished,
        stop_reason = reply.stop_reason.as_deref().unwrap_or(""),
        "parsed vendor reply"
    );

    let reply_entry = ConversationEntry::new(
        provider,
        EntryContent::Assistant {
            text: reply.text.clone(),
            tool_calls: reply.tool_calls.clone(),
        },
        reply.native,
    );
    let conversation = request
        .conversation
        .appended(input_entry.into_iter().chain(std::iter::once(reply_entry)));

    Ok(TurnResult {
        text: reply.text,
        tool_calls: reply.tool_calls,
        conversation,
        finished,
        stop_reason: reply.stop_reason,
    })
}
