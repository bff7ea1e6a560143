pub mod postgres;
pub mod repository;

pub use postgres::{create_pool, PostgresRepository};
pub use repository::SocialRepository;
