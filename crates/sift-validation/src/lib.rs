//! # sift-validation
//!
//! Configuration acceptance in three stages: syntactic (field domains),
//! semantic (cross-field consistency), behavioral (a live probe query).
//! Stages run in order and the first failing stage short-circuits,
//! reporting only its own violations. Validation never mutates state.

pub mod behavioral;
pub mod engine;
pub mod semantic;
pub mod syntactic;

pub use engine::{Stage, Validator, Verdict, Violation};
