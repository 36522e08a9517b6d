//! Step definitions shared by the game behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
