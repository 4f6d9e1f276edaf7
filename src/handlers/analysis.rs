//! Analysis orchestrator: prompt composition, one model call, schema parse.

use crate::errors::AppError;
use crate::handlers::ai::ModelClient;
use crate::prompts::{build_system_prompt, build_user_prompt};
use crate::schema;
use crate::types::review::AnalysisResponse;

/// Runs one code analysis through the model provider.
///
/// Composes the system instruction (persona, tasks, schema description,
/// output constraints) and the user message carrying `code` verbatim, issues
/// exactly one completion call, and validates the raw output against the
/// analysis schema.
///
/// Every failure mode is fatal to the request: transport errors from the
/// provider and validation errors from parsing propagate unchanged to the
/// caller. No retry, no fallback, no partial result.
pub async fn analyze(
    client: &dyn ModelClient,
    code: &str,
    language: &str,
) -> Result<AnalysisResponse, AppError> {
    let system_prompt = build_system_prompt(language);
    let user_prompt = build_user_prompt(code);

    tracing::debug!(
        "Requesting AI analysis ({} code, {} chars)",
        language,
        code.len()
    );

    let raw_output = client
        .complete(&system_prompt, &user_prompt)
        .await
        .map_err(|e| {
            tracing::error!("AI analysis error: {}", e);
            AppError::AI(e)
        })?;

    let response = schema::parse(&raw_output).map_err(|e| {
        tracing::error!("AI analysis error: {}", e);
        AppError::Schema(e)
    })?;

    Ok(response)
}
