//! Candidate/offer compatibility scoring.
//!
//! The [`matching`] module holds the scoring engine and the collaborator seams it
//! reads profiles from and writes results to; the remaining modules carry the
//! configuration, telemetry and error plumbing shared with the service binary.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
