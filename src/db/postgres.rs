use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AssessmentRecord, FriendRequest, Friendship, NewAssessment, PersonalityProfile},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// PostgreSQL-backed implementation of [`crate::db::SocialRepository`]
///
/// Owns every transaction boundary the state machine relies on: accepting a
/// request and removing a friendship are single all-or-nothing units, so a
/// mutual friendship is never observable as one-directional.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait::async_trait]
impl crate::db::SocialRepository for PostgresRepository {
    async fn latest_profile(&self, user_id: Uuid) -> AppResult<Option<PersonalityProfile>> {
        let profile = sqlx::query_as::<_, PersonalityProfile>(
            r#"
            SELECT user_id,
                   COALESCE(personality_type, '') AS personality_type,
                   COALESCE(strengths, '{}') AS strengths,
                   created_at
            FROM persona_assessments
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn candidate_profiles(
        &self,
        excluding: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PersonalityProfile>> {
        // DISTINCT ON keeps only the latest assessment per candidate
        let profiles = sqlx::query_as::<_, PersonalityProfile>(
            r#"
            SELECT DISTINCT ON (user_id)
                   user_id,
                   COALESCE(personality_type, '') AS personality_type,
                   COALESCE(strengths, '{}') AS strengths,
                   created_at
            FROM persona_assessments
            WHERE user_id <> $1
            ORDER BY user_id, created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(excluding)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn insert_assessment(&self, assessment: NewAssessment) -> AppResult<AssessmentRecord> {
        let record = sqlx::query_as::<_, AssessmentRecord>(
            r#"
            INSERT INTO persona_assessments
                (id, user_id, assessment_data, personality_type, strengths, areas_for_growth)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, assessment_data, personality_type, strengths,
                      areas_for_growth, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(assessment.user_id)
        .bind(assessment.assessment_data)
        .bind(assessment.insights.personality_type)
        .bind(assessment.insights.strengths)
        .bind(assessment.insights.areas_for_growth)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn friend_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT friend_id FROM friendships WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn friendships_of(&self, user_id: Uuid) -> AppResult<Vec<Friendship>> {
        let friendships = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, user_id, friend_id, created_at
            FROM friendships
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friendships)
    }

    async fn are_friends(&self, user_id: Uuid, other_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM friendships
                WHERE user_id = $1 AND friend_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn request(&self, id: Uuid) -> AppResult<Option<FriendRequest>> {
        let request = sqlx::query_as::<_, FriendRequest>(
            r#"
            SELECT id, sender_id, receiver_id, status, created_at
            FROM friend_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn pending_request_between(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> AppResult<Option<FriendRequest>> {
        let request = sqlx::query_as::<_, FriendRequest>(
            r#"
            SELECT id, sender_id, receiver_id, status, created_at
            FROM friend_requests
            WHERE status = 'pending'
              AND ((sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1))
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn pending_incoming(&self, user_id: Uuid) -> AppResult<Vec<FriendRequest>> {
        let requests = sqlx::query_as::<_, FriendRequest>(
            r#"
            SELECT id, sender_id, receiver_id, status, created_at
            FROM friend_requests
            WHERE receiver_id = $1 AND status = 'pending'
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn pending_outgoing(&self, user_id: Uuid) -> AppResult<Vec<FriendRequest>> {
        let requests = sqlx::query_as::<_, FriendRequest>(
            r#"
            SELECT id, sender_id, receiver_id, status, created_at
            FROM friend_requests
            WHERE sender_id = $1 AND status = 'pending'
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn insert_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> AppResult<FriendRequest> {
        // The partial unique index on the unordered pending pair backs up the
        // service-level duplicate check under concurrent submissions.
        let result = sqlx::query_as::<_, FriendRequest>(
            r#"
            INSERT INTO friend_requests (id, sender_id, receiver_id, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id, sender_id, receiver_id, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(request) => Ok(request),
            Err(err) if is_unique_violation(&err) => Err(AppError::DuplicateRequest(format!(
                "a pending request already exists between {} and {}",
                sender_id, receiver_id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn accept_request(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // The status guard turns a lost race into not-found instead of a
        // second pair of friendship rows.
        let updated = sqlx::query_as::<_, (Uuid, Uuid)>(
            r#"
            UPDATE friend_requests
            SET status = 'accepted'
            WHERE id = $1 AND status = 'pending'
            RETURNING sender_id, receiver_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((sender_id, receiver_id)) = updated else {
            return Err(AppError::NotFound(format!("pending friend request {}", id)));
        };

        sqlx::query(
            r#"
            INSERT INTO friendships (id, user_id, friend_id)
            VALUES ($1, $2, $3), ($4, $3, $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(receiver_id)
        .bind(sender_id)
        .bind(Uuid::new_v4())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            request_id = %id,
            sender_id = %sender_id,
            receiver_id = %receiver_id,
            "Friend request accepted"
        );

        Ok(())
    }

    async fn decline_request(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE friend_requests
            SET status = 'rejected'
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("pending friend request {}", id)));
        }

        Ok(())
    }

    async fn remove_friendship(&self, user_id: Uuid, friend_id: Uuid) -> AppResult<()> {
        // Single statement removes both directions atomically
        let result = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE (user_id = $1 AND friend_id = $2)
               OR (user_id = $2 AND friend_id = $1)
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "friendship between {} and {}",
                user_id, friend_id
            )));
        }

        Ok(())
    }
}
