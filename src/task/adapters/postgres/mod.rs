//! `PostgreSQL` adapters for task lifecycle persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
pub(crate) use repository::{insert_task, update_task};
