//! Adapter implementations for player persistence.

pub mod memory;
pub mod postgres;
