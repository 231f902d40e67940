//! Generator seam and fallback handling

use crate::error::AssistError;
use async_trait::async_trait;

/// Shown when no API key is configured
pub const MISSING_API_KEY: &str = "Please configure an API key to generate descriptions.";

/// Shown when the model answered with no text
pub const EMPTY_DESCRIPTION: &str = "No description was generated.";

/// Shown for any other failure
pub const GENERATION_FAILED: &str =
    "An error occurred while generating the description. Please try again later.";

/// Something that can draft a task description
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    /// Draft a description for a task titled `title`
    ///
    /// # Errors
    /// Returns `AssistError` on missing configuration, transport failure
    /// or an empty answer
    async fn generate(&self, title: &str) -> Result<String, AssistError>;
}

/// Prompt sent to the model for `title`
#[must_use]
pub fn prompt_for(title: &str) -> String {
    format!(
        "You are an assistant on a charity task-management platform.\n\
         The task is titled: \"{title}\".\n\
         Write a detailed, professional description of this task in about 50 words.\n\
         Focus on practical steps."
    )
}

/// Generate a description, mapping every failure to a fixed message
///
/// Makes a single attempt; there is no retry.
pub async fn describe_or_fallback(generator: &dyn DescriptionGenerator, title: &str) -> String {
    match generator.generate(title).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(AssistError::EmptyResponse) => EMPTY_DESCRIPTION.to_string(),
        Err(AssistError::MissingApiKey) => {
            tracing::warn!("API key is missing, description generation disabled");
            MISSING_API_KEY.to_string()
        }
        Err(err) => {
            tracing::error!(error = %err, "error generating description");
            GENERATION_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn passes_text_through() {
        let mut generator = MockDescriptionGenerator::new();
        generator
            .expect_generate()
            .withf(|title| title.to_string() == "Food basket drive")
            .times(1)
            .returning(|_| Ok("Collect and pack baskets.".to_string()));

        let text = describe_or_fallback(&generator, "Food basket drive").await;
        assert_eq!(text, "Collect and pack baskets.");
    }

    #[tokio::test]
    async fn missing_key_message() {
        let mut generator = MockDescriptionGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(AssistError::MissingApiKey));

        assert_eq!(describe_or_fallback(&generator, "x").await, MISSING_API_KEY);
    }

    #[tokio::test]
    async fn empty_answer_message() {
        let mut generator = MockDescriptionGenerator::new();
        generator.expect_generate().returning(|_| Ok("   ".to_string()));
        assert_eq!(describe_or_fallback(&generator, "x").await, EMPTY_DESCRIPTION);

        let mut generator = MockDescriptionGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(AssistError::EmptyResponse));
        assert_eq!(describe_or_fallback(&generator, "x").await, EMPTY_DESCRIPTION);
    }

    #[tokio::test]
    async fn other_errors_single_attempt() {
        let mut generator = MockDescriptionGenerator::new();
        generator.expect_generate().times(1).returning(|_| {
            Err(AssistError::Status {
                status: 503,
                body: String::new(),
            })
        });
        assert_eq!(describe_or_fallback(&generator, "x").await, GENERATION_FAILED);
    }

    #[test]
    fn prompt_mentions_title() {
        let prompt = prompt_for("Winter clothing drive");
        assert!(prompt.contains("\"Winter clothing drive\""));
        assert!(prompt.contains("50 words"));
    }
}
