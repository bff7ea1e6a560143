use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{AssessmentRecord, FriendRequest, Friendship, NewAssessment, PersonalityProfile},
};

/// Storage capabilities the social core depends on
///
/// The recommender and the friend-request transitions are written against
/// this trait so they stay unit-testable without a live backend. The
/// PostgreSQL implementation owns all transaction boundaries: `accept_request`
/// and `remove_friendship` are all-or-nothing, and a failure means no state
/// changed.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SocialRepository: Send + Sync {
    /// Most recent personality profile for a user, if any assessment exists
    async fn latest_profile(&self, user_id: Uuid) -> AppResult<Option<PersonalityProfile>>;

    /// Latest profiles of up to `limit` other users, excluding the given one
    async fn candidate_profiles(
        &self,
        excluding: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PersonalityProfile>>;

    /// Persist a completed assessment and return the stored record
    async fn insert_assessment(&self, assessment: NewAssessment) -> AppResult<AssessmentRecord>;

    /// Ids of every user the given user has a friend edge to
    async fn friend_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Friendship rows owned by the given user
    async fn friendships_of(&self, user_id: Uuid) -> AppResult<Vec<Friendship>>;

    /// Whether a friendship edge exists between the two users
    async fn are_friends(&self, user_id: Uuid, other_id: Uuid) -> AppResult<bool>;

    /// Look up a friend request by id
    async fn request(&self, id: Uuid) -> AppResult<Option<FriendRequest>>;

    /// Pending request between two users, in either direction
    async fn pending_request_between(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> AppResult<Option<FriendRequest>>;

    /// Pending requests addressed to the given user
    async fn pending_incoming(&self, user_id: Uuid) -> AppResult<Vec<FriendRequest>>;

    /// Pending requests sent by the given user
    async fn pending_outgoing(&self, user_id: Uuid) -> AppResult<Vec<FriendRequest>>;

    /// Insert a new pending request
    async fn insert_request(&self, sender_id: Uuid, receiver_id: Uuid)
        -> AppResult<FriendRequest>;

    /// Accept a pending request: mark it accepted and create both friendship
    /// rows in one transaction. On failure the request stays pending and no
    /// friendship row exists.
    async fn accept_request(&self, id: Uuid) -> AppResult<()>;

    /// Decline a pending request (terminal)
    async fn decline_request(&self, id: Uuid) -> AppResult<()>;

    /// Remove both directional friendship rows between two users
    async fn remove_friendship(&self, user_id: Uuid, friend_id: Uuid) -> AppResult<()>;
}
