//! In-memory adapters for player persistence.

mod user;

pub use user::InMemoryUserRepository;
