//! Game implementations.
//!
//! - `duel`: Reference rules engine used by the tests and benches

pub mod duel;
