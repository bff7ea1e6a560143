use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    db::SocialRepository,
    error::{AppError, AppResult},
    models::{AssessmentRecord, NewAssessment, PersonalityInsights, PersonalityProfile},
    services::providers::InsightsGateway,
};

/// Personality assessment flow
///
/// Takes a completed answer set, asks the AI gateway for insights, and
/// persists the result. Gateway failures degrade to the fixed default
/// insights instead of failing the submission; only validation and storage
/// errors reach the caller.
pub struct AssessmentService {
    repository: Arc<dyn SocialRepository>,
    gateway: Arc<dyn InsightsGateway>,
}

impl AssessmentService {
    pub fn new(repository: Arc<dyn SocialRepository>, gateway: Arc<dyn InsightsGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// Submit a completed assessment and return the stored record
    pub async fn submit(&self, user_id: Uuid, answers: Vec<String>) -> AppResult<AssessmentRecord> {
        if answers.is_empty() {
            return Err(AppError::InvalidInput(
                "assessment answers must not be empty".to_string(),
            ));
        }

        let insights = match self.gateway.personality_insights(&answers).await {
            Ok(insights) => insights,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Insights gateway failed, using default insights"
                );
                PersonalityInsights::default_fallback()
            }
        };

        let record = self
            .repository
            .insert_assessment(NewAssessment {
                user_id,
                assessment_data: json!(answers),
                insights,
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            assessment_id = %record.id,
            personality_type = %record.personality_type,
            "Assessment stored"
        );

        Ok(record)
    }

    /// Latest profile for a user, if they have completed an assessment
    pub async fn latest_profile(&self, user_id: Uuid) -> AppResult<Option<PersonalityProfile>> {
        self.repository.latest_profile(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::MockSocialRepository;
    use crate::services::providers::MockInsightsGateway;
    use chrono::Utc;

    fn record_from(assessment: NewAssessment) -> AssessmentRecord {
        AssessmentRecord {
            id: Uuid::new_v4(),
            user_id: assessment.user_id,
            assessment_data: assessment.assessment_data,
            personality_type: assessment.insights.personality_type,
            strengths: assessment.insights.strengths,
            areas_for_growth: assessment.insights.areas_for_growth,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_answers_blocked_before_any_call() {
        let mut repo = MockSocialRepository::new();
        repo.expect_insert_assessment().never();
        let mut gateway = MockInsightsGateway::new();
        gateway.expect_personality_insights().never();

        let service = AssessmentService::new(Arc::new(repo), Arc::new(gateway));
        let result = service.submit(Uuid::new_v4(), vec![]).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_submit_persists_gateway_insights() {
        let mut gateway = MockInsightsGateway::new();
        gateway.expect_personality_insights().returning(|_| {
            Ok(PersonalityInsights {
                personality_type: "Curious Builder".to_string(),
                strengths: vec!["Analytical".to_string()],
                areas_for_growth: vec!["Patience".to_string()],
            })
        });

        let mut repo = MockSocialRepository::new();
        repo.expect_insert_assessment()
            .times(1)
            .returning(|assessment| Ok(record_from(assessment)));

        let service = AssessmentService::new(Arc::new(repo), Arc::new(gateway));
        let record = service
            .submit(Uuid::new_v4(), vec!["Reading or learning".to_string()])
            .await
            .unwrap();

        assert_eq!(record.personality_type, "Curious Builder");
        assert_eq!(record.strengths, vec!["Analytical"]);
    }

    #[tokio::test]
    async fn test_gateway_failure_degrades_to_default_insights() {
        let mut gateway = MockInsightsGateway::new();
        gateway
            .expect_personality_insights()
            .returning(|_| Err(AppError::ExternalApi("gateway down".to_string())));

        let mut repo = MockSocialRepository::new();
        repo.expect_insert_assessment()
            .times(1)
            .returning(|assessment| Ok(record_from(assessment)));

        let service = AssessmentService::new(Arc::new(repo), Arc::new(gateway));
        let record = service
            .submit(Uuid::new_v4(), vec!["Socializing with friends".to_string()])
            .await
            .unwrap();

        let fallback = PersonalityInsights::default_fallback();
        assert_eq!(record.personality_type, fallback.personality_type);
        assert_eq!(record.strengths, fallback.strengths);
        assert_eq!(record.areas_for_growth, fallback.areas_for_growth);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut gateway = MockInsightsGateway::new();
        gateway
            .expect_personality_insights()
            .returning(|_| Ok(PersonalityInsights::default_fallback()));

        let mut repo = MockSocialRepository::new();
        repo.expect_insert_assessment()
            .returning(|_| Err(AppError::Internal("storage unavailable".to_string())));

        let service = AssessmentService::new(Arc::new(repo), Arc::new(gateway));
        let result = service
            .submit(Uuid::new_v4(), vec!["Creative pursuits".to_string()])
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
