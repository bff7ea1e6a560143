pub mod assessment;
pub mod friends;
pub mod providers;
pub mod recommender;

pub use assessment::AssessmentService;
pub use friends::FriendService;
