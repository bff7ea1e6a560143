/// Lovable AI gateway client
///
/// Single chat-completions endpoint used for two flows:
/// 1. Personality insights: analyze assessment answers into a typed payload
/// 2. Coaching recommendations: free-form coaching text per recommendation kind
///
/// The bearer credential comes from configuration (process environment).
use reqwest::Client as HttpClient;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{ChatCompletionResponse, ChatMessage, CoachingKind, PersonalityInsights},
    services::providers::InsightsGateway,
};

const COMPLETION_MODEL: &str = "google/gemini-2.5-flash";

const INSIGHTS_SYSTEM_PROMPT: &str = "You are a thoughtful personality analyst. Analyze the \
    user's answers and provide: 1) A personality type (4-5 words), 2) 3-5 key strengths, \
    3) 3-5 areas for personal growth. Be empathetic, insightful, and encouraging. Format as \
    JSON with keys: personalityType, strengths (array), areasForGrowth (array).";

const INSIGHTS_TEMPERATURE: f64 = 0.7;
const COACHING_TEMPERATURE: f64 = 0.8;

#[derive(Clone)]
pub struct AiGatewayClient {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
}

impl AiGatewayClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
        }
    }

    /// Run one chat completion and return the first choice's content
    async fn complete(&self, messages: Vec<ChatMessage>, temperature: f64) -> AppResult<String> {
        let url = format!("{}/v1/chat/completions", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": COMPLETION_MODEL,
                "messages": messages,
                "temperature": temperature,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "AI gateway returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion.into_content().ok_or_else(|| {
            AppError::ExternalApi("AI gateway response contained no choices".to_string())
        })
    }
}

/// Parse the model's content into insights, falling back to the fixed
/// default when the content is not the requested JSON shape.
fn parse_insights(content: &str) -> PersonalityInsights {
    match serde_json::from_str::<PersonalityInsights>(content) {
        Ok(insights) => insights,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "AI gateway content was not insight JSON, using default insights"
            );
            PersonalityInsights::default_fallback()
        }
    }
}

#[async_trait::async_trait]
impl InsightsGateway for AiGatewayClient {
    async fn personality_insights(&self, answers: &[String]) -> AppResult<PersonalityInsights> {
        let answers_json =
            serde_json::to_string_pretty(answers).map_err(|e| AppError::Internal(e.to_string()))?;

        let messages = vec![
            ChatMessage::system(INSIGHTS_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Based on these assessment answers, provide personality insights:\n\n{}",
                answers_json
            )),
        ];

        let content = self.complete(messages, INSIGHTS_TEMPERATURE).await?;
        let insights = parse_insights(&content);

        tracing::info!(
            personality_type = %insights.personality_type,
            strengths = insights.strengths.len(),
            "Personality insights generated"
        );

        Ok(insights)
    }

    async fn coaching_recommendations(
        &self,
        user_context: &Value,
        kind: CoachingKind,
    ) -> AppResult<String> {
        let messages = vec![
            ChatMessage::system(kind.system_prompt()),
            ChatMessage::user(user_context.to_string()),
        ];

        let recommendations = self.complete(messages, COACHING_TEMPERATURE).await?;

        tracing::info!(
            kind = ?kind,
            length = recommendations.len(),
            "Coaching recommendations generated"
        );

        Ok(recommendations)
    }
}
