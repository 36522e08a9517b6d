//! Task lifecycle management.
//!
//! Players create daily, custom and urgent tasks, start them by paying
//! energy and complete them for experience, gold and attribute growth.
//! Urgent calls carry a deadline and a decline penalty, and a periodic sweep
//! expires the ones left open past their deadline. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
