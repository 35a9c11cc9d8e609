//! Single request/response generation call

use veracity_llm::{LlmError, LlmProvider, LlmRequest};

/// Send one prompt to `model` and return the trimmed reply.
///
/// Temperature is clamped into `[0, 1]`. Failures are returned untouched;
/// whether to abort or degrade is the caller's decision.
pub async fn generate<L>(
    llm: &L,
    model: &str,
    prompt: &str,
    temperature: f32,
) -> Result<String, LlmError>
where
    L: LlmProvider + ?Sized,
{
    let request = LlmRequest::simple(prompt)
        .model(model)
        .temperature(temperature.clamp(0.0, 1.0));

    let response = llm.complete(request).await?;
    tracing::trace!(
        provider = llm.name(),
        model = %response.model,
        latency_ms = response.latency_ms,
        "Generation complete"
    );
    Ok(response.content.trim().to_string())
}
