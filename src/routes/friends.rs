use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{FriendRequest, Friendship, Recommendation, RequestStatus},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SendFriendRequestBody {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
}

/// Acting user for receiver-only transitions. The id is an opaque,
/// already-authenticated identity; session handling lives outside this
/// service.
#[derive(Debug, Deserialize)]
pub struct ActingUserBody {
    pub receiver_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<FriendRequest> for FriendRequestResponse {
    fn from(request: FriendRequest) -> Self {
        Self {
            id: request.id,
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PendingRequestsResponse {
    pub incoming: Vec<FriendRequestResponse>,
    pub outgoing: Vec<FriendRequestResponse>,
}

#[derive(Debug, Serialize)]
pub struct FriendshipResponse {
    pub friend_id: Uuid,
    pub since: DateTime<Utc>,
}

impl From<Friendship> for FriendshipResponse {
    fn from(friendship: Friendship) -> Self {
        Self {
            friend_id: friendship.friend_id,
            since: friendship.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub user_id: Uuid,
    pub compatibility_score: u8,
    pub common_strengths: Vec<String>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            user_id: rec.user_id,
            compatibility_score: rec.score,
            common_strengths: rec.common_strengths,
        }
    }
}

/// Ranked connection suggestions for a user
///
/// Empty until the user completes an assessment; at most five suggestions.
pub async fn recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let recommendations = state
        .friends
        .recommendations_for(user_id, state.candidate_pool_size)
        .await?;

    Ok(Json(
        recommendations.into_iter().map(RecommendationResponse::from).collect(),
    ))
}

/// Create a pending friend request
pub async fn send_request(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<SendFriendRequestBody>,
) -> AppResult<(StatusCode, Json<FriendRequestResponse>)> {
    tracing::info!(
        request_id = %request_id,
        sender_id = %body.sender_id,
        receiver_id = %body.receiver_id,
        "Processing friend request"
    );

    let request = state
        .friends
        .send_request(body.sender_id, body.receiver_id)
        .await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

/// Accept a pending friend request (receiver only)
pub async fn accept_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ActingUserBody>,
) -> AppResult<StatusCode> {
    state.friends.accept_request(id, body.receiver_id).await?;
    Ok(StatusCode::OK)
}

/// Decline a pending friend request (receiver only)
pub async fn decline_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ActingUserBody>,
) -> AppResult<StatusCode> {
    state.friends.decline_request(id, body.receiver_id).await?;
    Ok(StatusCode::OK)
}

/// Current friendships of a user
pub async fn list_friends(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<FriendshipResponse>>> {
    let friendships = state.friends.friends_of(user_id).await?;
    Ok(Json(
        friendships.into_iter().map(FriendshipResponse::from).collect(),
    ))
}

/// Pending incoming and outgoing requests for a user
pub async fn list_requests(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<PendingRequestsResponse>> {
    let (incoming, outgoing) = state.friends.pending_requests(user_id).await?;

    Ok(Json(PendingRequestsResponse {
        incoming: incoming.into_iter().map(FriendRequestResponse::from).collect(),
        outgoing: outgoing.into_iter().map(FriendRequestResponse::from).collect(),
    }))
}

/// Remove a friendship, both directions together
pub async fn remove_friend(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.friends.remove_friend(user_id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
