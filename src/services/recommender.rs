use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{PersonalityProfile, Recommendation};

/// Output list is truncated to this many suggestions
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Points per shared strength
const STRENGTH_WEIGHT: u32 = 20;

/// Bonus for an exact personality-type match
const TYPE_MATCH_BONUS: u32 = 30;

/// Scores are clamped to this ceiling
const SCORE_CEILING: u32 = 100;

/// Ranks candidate profiles by compatibility with the requester.
///
/// Pure function of its three inputs: re-running with the same requester
/// profile, candidate pool, and friend set yields an identical ordered list.
/// Candidates equal to the requester or already connected via a friend edge
/// are excluded. Without a requester profile the result is empty: the
/// assessment is a precondition, not an error.
pub fn recommend(
    requester: Option<&PersonalityProfile>,
    pool: &[PersonalityProfile],
    friend_ids: &HashSet<Uuid>,
) -> Vec<Recommendation> {
    let Some(requester) = requester else {
        return Vec::new();
    };

    let own_strengths: HashSet<&str> = requester.strengths.iter().map(String::as_str).collect();

    let mut recommendations: Vec<Recommendation> = pool
        .iter()
        .filter(|candidate| {
            candidate.user_id != requester.user_id && !friend_ids.contains(&candidate.user_id)
        })
        .map(|candidate| score_candidate(requester, &own_strengths, candidate))
        .collect();

    // Stable sort keeps pool order among equal scores
    recommendations.sort_by(|a, b| b.score.cmp(&a.score));
    recommendations.truncate(MAX_RECOMMENDATIONS);

    recommendations
}

/// Scores a single candidate against the requester.
///
/// `common_strengths` uses set semantics: case-sensitive exact match, each
/// shared strength counted once even if it repeats in either list. A missing
/// personality type (stored empty) never earns the match bonus.
fn score_candidate(
    requester: &PersonalityProfile,
    own_strengths: &HashSet<&str>,
    candidate: &PersonalityProfile,
) -> Recommendation {
    let mut seen = HashSet::new();
    let common_strengths: Vec<String> = candidate
        .strengths
        .iter()
        .filter(|s| own_strengths.contains(s.as_str()))
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect();

    let type_match = !candidate.personality_type.is_empty()
        && candidate.personality_type == requester.personality_type;

    let raw = common_strengths.len() as u32 * STRENGTH_WEIGHT
        + if type_match { TYPE_MATCH_BONUS } else { 0 };
    let score = raw.min(SCORE_CEILING) as u8;

    Recommendation {
        user_id: candidate.user_id,
        score,
        common_strengths,
    }
}
