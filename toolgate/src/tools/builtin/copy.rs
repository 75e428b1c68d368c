//! Advertising copy generation, run only after a human approves it.

use super::{parse_args, GET_PERSUASIVE_COPY};
use crate::completion::{CompletionClient, CompletionRequest};
use crate::errors::ToolError;
use crate::tools::{ToolContext, ToolExecutor};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Deserialize)]
struct CopyArgs {
    prompt: String,
}

/// Generates advertising copy through a completion client.
pub struct PersuasiveCopy {
    completion: Arc<dyn CompletionClient>,
}

impl PersuasiveCopy {
    /// Creates the executor.
    #[must_use]
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    /// Builds the completion request for a brief.
    #[must_use]
    pub fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest::new(
            system_prompt(prompt),
            format!("Crie uma copy persuasiva com base nas seguintes informações: {prompt}"),
        )
    }
}

impl std::fmt::Debug for PersuasiveCopy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersuasiveCopy").finish_non_exhaustive()
    }
}

#[async_trait]
impl ToolExecutor for PersuasiveCopy {
    async fn execute(
        &self,
        args: serde_json::Value,
        _ctx: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        let CopyArgs { prompt } = parse_args(GET_PERSUASIVE_COPY, args)?;
        info!(%prompt, "Generating persuasive copy");

        let text = self
            .completion
            .complete(Self::request(&prompt))
            .await
            .map_err(|e| ToolError::execution_failed(GET_PERSUASIVE_COPY, e.to_string()))?;

        debug!(chars = text.len(), "Copy generated");
        Ok(serde_json::Value::String(text))
    }
}

fn system_prompt(prompt: &str) -> String {
    format!(
        r#"Você é um redator publicitário especializado em marketing e copywriting. Gere textos persuasivos (copies) com base nas informações fornecidas a seguir.

As copies devem ser criativas, envolventes e direcionadas ao público-alvo descrito. Foque em despertar o interesse, destacar a proposta de valor e incentivar a ação.

Informações:
"{prompt}"

A resposta deve conter:
1. Headline principal
2. Subheadline complementar
3. Texto para o corpo do anúncio (máximo 3 parágrafos curtos)
4. Call to Action (CTA) impactante
5. Versões alternativas de headline (2 variações)

Formato da resposta:
- Headline:
- Subheadline:
- Corpo do anúncio:
- CTA:
- Variações de headline:

Use uma linguagem clara, objetiva e emocionalmente envolvente, adaptada ao público descrito."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CompletionError;
    use crate::testing::MockCompletion;
    use serde_json::json;

    #[tokio::test]
    async fn test_copy_generated() {
        let completion = Arc::new(MockCompletion::new("Copy gerada"));
        let tool = PersuasiveCopy::new(completion.clone());

        let result = tool
            .execute(json!({"prompt": "café artesanal"}), &ToolContext::new("c1"))
            .await
            .unwrap();

        assert_eq!(result, json!("Copy gerada"));
        let requests = completion.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].system.contains("\"café artesanal\""));
        assert_eq!(
            requests[0].prompt,
            "Crie uma copy persuasiva com base nas seguintes informações: café artesanal"
        );
    }

    #[tokio::test]
    async fn test_completion_failure() {
        let completion = Arc::new(MockCompletion::failing(CompletionError::Status {
            status: 429,
            body: "rate limited".to_string(),
        }));
        let tool = PersuasiveCopy::new(completion);

        let err = tool
            .execute(json!({"prompt": "x"}), &ToolContext::new("c1"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_result_string(),
            "Error: completion endpoint returned 429: rate limited"
        );
    }
}
