// Text generation using Gemini
//
// This is the infrastructure implementation of BaseTextGenerator.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{
    CandidateText, GeminiClient, GeminiError, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig,
};
use tracing::{debug, warn};

use super::{BaseTextGenerator, Generation, GenerationOptions};

/// Gemini implementation of text generation
#[derive(Clone)]
pub struct GeminiTextGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiTextGenerator {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl From<&GenerationOptions> for GenerationConfig {
    fn from(options: &GenerationOptions) -> Self {
        GenerationConfig {
            temperature: Some(options.temperature),
            top_p: Some(options.top_p),
            top_k: Some(options.top_k),
            max_output_tokens: Some(options.max_output_tokens),
            response_mime_type: options.response_mime_type.clone(),
        }
    }
}

/// Collapse the nested candidate structure into a [`Generation`].
pub fn generation_from_response(response: &GenerateContentResponse) -> Generation {
    match response.first_candidate_text() {
        CandidateText::Text(text) => Generation::Text(text.to_string()),
        CandidateText::Missing => {
            if let Some(reason) = response.block_reason() {
                debug!(block_reason = reason, "Gemini blocked the prompt");
            }
            Generation::Empty
        }
        CandidateText::NonText => {
            Generation::Malformed("first candidate part carries no text".to_string())
        }
    }
}

#[async_trait]
impl BaseTextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation> {
        debug!(
            prompt_length = prompt.len(),
            model = %self.model,
            "Calling Gemini generateContent"
        );

        let request = GenerateContentRequest::user(prompt).generation_config(options.into());

        match self.client.generate_content(&self.model, request).await {
            Ok(response) => Ok(generation_from_response(&response)),
            // A 2xx with an unreadable body is a partial response, not a failed call
            Err(GeminiError::Parse(reason)) => {
                warn!(model = %self.model, reason = %reason, "Unreadable Gemini response");
                Ok(Generation::Malformed(reason))
            }
            Err(e) => Err(e.into()),
        }
    }
}
