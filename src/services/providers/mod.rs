/// AI completion gateway abstraction
///
/// The assessment flow and the coaching proxy both talk to an external
/// chat-completion gateway. Keeping the gateway behind a trait keeps the
/// services unit-testable and the bearer credential handling in one place.
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{CoachingKind, PersonalityInsights},
};

pub mod ai_gateway;

/// Trait for AI completion gateways
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InsightsGateway: Send + Sync {
    /// Analyze assessment answers into personality insights.
    ///
    /// Implementations return the fixed default insights when the gateway
    /// responds with content that is not valid insight JSON; transport and
    /// HTTP-level failures surface as errors for the caller to degrade on.
    async fn personality_insights(&self, answers: &[String]) -> AppResult<PersonalityInsights>;

    /// Generate coaching recommendation text for the given context.
    ///
    /// No fallback here: failures propagate and the endpoint answers with a
    /// JSON error body.
    async fn coaching_recommendations(
        &self,
        user_context: &Value,
        kind: CoachingKind,
    ) -> AppResult<String>;
}
