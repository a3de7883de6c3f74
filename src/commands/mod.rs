//! Subcommand entry points.

pub mod inspect;
pub mod stream;
