//! Command workflows.
//!
//! Single-request commands are dispatched straight from `main`; the modules
//! here hold the multi-step workflows and their exit-code mapping.

pub mod lobby;
pub mod onboard;
pub mod play;
pub mod qualify;
