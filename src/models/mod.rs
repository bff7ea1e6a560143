use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's personality profile: the latest assessment result used for
/// compatibility recommendations. Earlier assessments stay in the
/// `persona_assessments` table as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonalityProfile {
    pub user_id: Uuid,
    /// Empty when the assessment produced no type; an empty type never
    /// counts as a match.
    pub personality_type: String,
    pub strengths: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted personality assessment, including the raw answers
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Raw answer payload exactly as submitted
    pub assessment_data: serde_json::Value,
    pub personality_type: String,
    pub strengths: Vec<String>,
    pub areas_for_growth: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// New assessment waiting to be persisted
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub user_id: Uuid,
    pub assessment_data: serde_json::Value,
    pub insights: PersonalityInsights,
}

/// Friend request lifecycle state
///
/// `Rejected` is terminal but does not block a future request from either
/// side; only `Pending` participates in duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A directed friend request between two users
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// One direction of a mutual friendship
///
/// A friendship always exists as two rows (`user -> friend` and
/// `friend -> user`) written in the same transaction.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Friendship {
    pub id: Uuid,
    pub user_id: Uuid,
    pub friend_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A scored connection suggestion. Transient: recomputed per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub user_id: Uuid,
    /// Bounded compatibility score in 0..=100
    pub score: u8,
    pub common_strengths: Vec<String>,
}

// ============================================================================
// AI Completion Gateway Types
// ============================================================================

/// Personality insights produced by the AI gateway
///
/// Serialized with camelCase keys to match the gateway's JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityInsights {
    pub personality_type: String,
    pub strengths: Vec<String>,
    pub areas_for_growth: Vec<String>,
}

impl PersonalityInsights {
    /// Fixed fallback used whenever the gateway fails or returns content
    /// that is not valid insight JSON. The assessment flow never fails on
    /// the AI path.
    pub fn default_fallback() -> Self {
        Self {
            personality_type: "Reflective Explorer".to_string(),
            strengths: vec![
                "Self-aware".to_string(),
                "Thoughtful".to_string(),
                "Growth-oriented".to_string(),
            ],
            areas_for_growth: vec![
                "Continue self-reflection".to_string(),
                "Embrace new experiences".to_string(),
            ],
        }
    }
}

/// Which coaching prompt the recommendation proxy should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachingKind {
    Food,
    Story,
    Goals,
}

impl CoachingKind {
    /// System prompt for the completion gateway
    pub fn system_prompt(&self) -> &'static str {
        match self {
            CoachingKind::Food => {
                "You are a wellness coach. Based on the user's recent food logs and mood, \
                 suggest 3 specific healthy meal ideas and lifestyle tips. Be practical and \
                 encouraging."
            }
            CoachingKind::Story => {
                "You are a creative writing coach. Based on the user's story themes and mood \
                 patterns, suggest 3 meaningful writing prompts or reflection topics. Be \
                 inspiring and thought-provoking."
            }
            CoachingKind::Goals => {
                "You are a life coach. Based on the user's goals and progress, provide 3 \
                 actionable suggestions to help them stay motivated and make progress. Be \
                 supportive and specific."
            }
        }
    }
}

/// Chat message sent to the completion gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Raw completion response from the gateway
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if the gateway returned any
    pub fn into_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            r#""pending""#
        );
        let status: RequestStatus = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(status, RequestStatus::Rejected);
    }

    #[test]
    fn test_insights_camel_case_contract() {
        let json = r#"{
            "personalityType": "Curious Builder",
            "strengths": ["Analytical", "Persistent"],
            "areasForGrowth": ["Delegate more"]
        }"#;

        let insights: PersonalityInsights = serde_json::from_str(json).unwrap();
        assert_eq!(insights.personality_type, "Curious Builder");
        assert_eq!(insights.strengths.len(), 2);
        assert_eq!(insights.areas_for_growth, vec!["Delegate more"]);

        let back = serde_json::to_value(&insights).unwrap();
        assert!(back.get("personalityType").is_some());
        assert!(back.get("areasForGrowth").is_some());
    }

    #[test]
    fn test_default_fallback_shape() {
        let fallback = PersonalityInsights::default_fallback();
        assert_eq!(fallback.personality_type, "Reflective Explorer");
        assert_eq!(fallback.strengths.len(), 3);
        assert_eq!(fallback.areas_for_growth.len(), 2);
    }

    #[test]
    fn test_coaching_kind_deserialization() {
        let kind: CoachingKind = serde_json::from_str(r#""food""#).unwrap();
        assert_eq!(kind, CoachingKind::Food);
        let kind: CoachingKind = serde_json::from_str(r#""goals""#).unwrap();
        assert_eq!(kind, CoachingKind::Goals);
        assert!(serde_json::from_str::<CoachingKind>(r#""sleep""#).is_err());
    }

    #[test]
    fn test_coaching_prompts_are_distinct() {
        let prompts = [
            CoachingKind::Food.system_prompt(),
            CoachingKind::Story.system_prompt(),
            CoachingKind::Goals.system_prompt(),
        ];
        assert!(prompts[0].contains("wellness coach"));
        assert!(prompts[1].contains("creative writing coach"));
        assert!(prompts[2].contains("life coach"));
    }

    #[test]
    fn test_chat_completion_into_content() {
        let json = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "hello there" } }
            ]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_content().as_deref(), Some("hello there"));
    }

    #[test]
    fn test_chat_completion_empty_choices() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
        assert_eq!(response.into_content(), None);
    }
}
