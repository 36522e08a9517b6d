//! `PostgreSQL` adapters for player persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresUserRepository;
pub(crate) use repository::update_user;
