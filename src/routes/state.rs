use std::sync::Arc;

use crate::{
    config::Config,
    db::SocialRepository,
    services::{providers::InsightsGateway, AssessmentService, FriendService},
};

/// Shared application state
///
/// Services hold trait objects for the repository and the AI gateway, so
/// endpoint tests can swap in doubles without a live backend.
#[derive(Clone)]
pub struct AppState {
    pub assessments: Arc<AssessmentService>,
    pub friends: Arc<FriendService>,
    pub gateway: Arc<dyn InsightsGateway>,
    pub candidate_pool_size: i64,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn SocialRepository>,
        gateway: Arc<dyn InsightsGateway>,
        config: &Config,
    ) -> Self {
        Self {
            assessments: Arc::new(AssessmentService::new(repository.clone(), gateway.clone())),
            friends: Arc::new(FriendService::new(repository)),
            gateway,
            candidate_pool_size: config.candidate_pool_size,
        }
    }
}
