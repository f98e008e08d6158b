//! Terminal output: JSON results on stdout, status lines and logs on stderr.

pub mod formatter;
pub mod logger;
