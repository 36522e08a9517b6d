//! Unit of work spanning both aggregates.
//!
//! Every use case that mutates more than one aggregate collects the results
//! in a [`Changeset`] and hands it to [`GameStore::commit`], which applies
//! all of it or none of it.

pub mod memory;
pub mod postgres;
mod ports;

pub use memory::InMemoryGameStore;
pub use ports::{Changeset, GameStore, StoreError, StoreResult};
