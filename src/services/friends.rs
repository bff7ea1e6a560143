use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::SocialRepository,
    error::{AppError, AppResult},
    models::{FriendRequest, Friendship, Recommendation, RequestStatus},
    services::recommender,
};

/// Friend-request transitions and connection suggestions
///
/// Validates every transition before any write: create is rejected while an
/// edge exists between the pair in any live state, accept and decline are
/// receiver-only, removal is symmetric. The repository implementation makes
/// the multi-row writes atomic; this service guarantees they are only
/// attempted from a legal state.
pub struct FriendService {
    repository: Arc<dyn SocialRepository>,
}

impl FriendService {
    pub fn new(repository: Arc<dyn SocialRepository>) -> Self {
        Self { repository }
    }

    /// Create a pending request from `sender_id` to `receiver_id`.
    ///
    /// Duplicate when the pair is already connected or a pending request
    /// exists in either direction. A previously declined request does not
    /// block a new one.
    pub async fn send_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> AppResult<FriendRequest> {
        if sender_id == receiver_id {
            return Err(AppError::InvalidInput(
                "cannot send a friend request to yourself".to_string(),
            ));
        }

        if self.repository.are_friends(sender_id, receiver_id).await? {
            return Err(AppError::DuplicateRequest(
                "users are already friends".to_string(),
            ));
        }

        if self
            .repository
            .pending_request_between(sender_id, receiver_id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateRequest(
                "a request between these users is already pending".to_string(),
            ));
        }

        let request = self.repository.insert_request(sender_id, receiver_id).await?;

        tracing::info!(
            request_id = %request.id,
            sender_id = %sender_id,
            receiver_id = %receiver_id,
            "Friend request created"
        );

        Ok(request)
    }

    /// Accept a pending request. Only the receiver may accept; the
    /// bidirectional friendship is created atomically by the repository, so
    /// a failure leaves the request pending and no edge behind.
    pub async fn accept_request(&self, request_id: Uuid, acting_user: Uuid) -> AppResult<()> {
        let request = self.load_pending(request_id, acting_user).await?;
        self.repository.accept_request(request.id).await
    }

    /// Decline a pending request. Receiver-only; terminal for this request
    /// but not for the pair.
    pub async fn decline_request(&self, request_id: Uuid, acting_user: Uuid) -> AppResult<()> {
        let request = self.load_pending(request_id, acting_user).await?;
        self.repository.decline_request(request.id).await?;

        tracing::info!(request_id = %request.id, "Friend request declined");
        Ok(())
    }

    /// Remove an existing friendship, both directions together.
    pub async fn remove_friend(&self, user_id: Uuid, friend_id: Uuid) -> AppResult<()> {
        if user_id == friend_id {
            return Err(AppError::InvalidInput(
                "cannot remove yourself".to_string(),
            ));
        }

        self.repository.remove_friendship(user_id, friend_id).await?;

        tracing::info!(user_id = %user_id, friend_id = %friend_id, "Friendship removed");
        Ok(())
    }

    /// Current friendships of a user
    pub async fn friends_of(&self, user_id: Uuid) -> AppResult<Vec<Friendship>> {
        self.repository.friendships_of(user_id).await
    }

    /// Pending requests addressed to and sent by a user
    pub async fn pending_requests(
        &self,
        user_id: Uuid,
    ) -> AppResult<(Vec<FriendRequest>, Vec<FriendRequest>)> {
        let incoming = self.repository.pending_incoming(user_id).await?;
        let outgoing = self.repository.pending_outgoing(user_id).await?;
        Ok((incoming, outgoing))
    }

    /// Ranked connection suggestions for a user.
    ///
    /// Fetches the requester's latest profile, a bounded candidate pool, and
    /// the friend set, then runs the pure recommender over the snapshot. A
    /// user without a completed assessment gets an empty list.
    pub async fn recommendations_for(
        &self,
        user_id: Uuid,
        pool_size: i64,
    ) -> AppResult<Vec<Recommendation>> {
        let Some(profile) = self.repository.latest_profile(user_id).await? else {
            return Ok(Vec::new());
        };

        let candidates = self.repository.candidate_profiles(user_id, pool_size).await?;
        let friend_ids: HashSet<Uuid> =
            self.repository.friend_ids(user_id).await?.into_iter().collect();

        let recommendations = recommender::recommend(Some(&profile), &candidates, &friend_ids);

        tracing::debug!(
            user_id = %user_id,
            pool = candidates.len(),
            suggested = recommendations.len(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }

    async fn load_pending(&self, request_id: Uuid, acting_user: Uuid) -> AppResult<FriendRequest> {
        let request = self
            .repository
            .request(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("friend request {}", request_id)))?;

        if request.receiver_id != acting_user {
            return Err(AppError::Forbidden(
                "only the receiver may act on a friend request".to_string(),
            ));
        }

        if request.status != RequestStatus::Pending {
            return Err(AppError::InvalidInput(
                "friend request is not pending".to_string(),
            ));
        }

        Ok(request)
    }
}
