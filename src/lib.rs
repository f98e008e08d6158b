//! Arena library: the client, workflows and CLI plumbing behind the `arena`
//! binary.
//!
//! Integration tests in `tests/` drive `api::ArenaClient` and the
//! `commands::*` workflows through this library target.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fairness;
pub mod interrupt;
pub mod output;
pub mod project;
pub mod strategy;
