//! Black-box runner for boolean template test scripts.
//!
//! Each script under the scripts directory is rendered by the subject binary,
//! optionally with a JSON fixture, and must print `true` to pass.
pub mod cli;
pub mod config;
pub mod discover;
pub mod fixture;
pub mod invoke;
pub mod output;
pub mod runner;
pub mod verdict;
